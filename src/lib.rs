//! Forwarding gateway for the model server.
//!
//! Receives JSON requests, validates required fields, forwards the extracted
//! subset to one fixed upstream service, and relays the upstream response
//! verbatim (or a translated error envelope) back to the caller.

pub mod config;
pub mod http;
pub mod observability;
pub mod upstream;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use upstream::UpstreamClient;
