//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, route table, request ID, timeout)
//!     → handler extracts and validates required fields
//!     → upstream client forwards the extracted subset
//!     → error.rs maps failures to the error envelope
//!     → Send to client
//! ```

pub mod error;
pub mod server;

pub use error::{ErrorEnvelope, GatewayError};
pub use server::HttpServer;
