//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (PYTHON_SERVICE_URL, PORT)
//!     → semantic validation
//!     → GatewayConfig (validated, immutable)
//!     → passed into HttpServer at construction
//! ```
//!
//! # Design Decisions
//! - Config is resolved once at process start; no reload path
//! - All fields have defaults so the gateway runs with no file at all
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;

pub use schema::GatewayConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::TimeoutConfig;
pub use schema::UpstreamConfig;
