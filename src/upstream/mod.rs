//! Upstream model server client.
//!
//! # Data Flow
//! ```text
//! handler extracts required fields
//!     → client.rs builds {base_url}{path} request (JSON)
//!     → awaits response with bounded timeout
//!     → 2xx: body bytes relayed verbatim to the caller
//!     → non-2xx / transport error: mapped to GatewayError
//! ```
//!
//! # Design Decisions
//! - One reqwest client built at startup, shared by all requests
//! - The upstream body is never re-serialized on the success path
//! - Upstream error bodies are discarded; only the failure text surfaces

pub mod client;

pub use client::{RelayedResponse, UpstreamBuildError, UpstreamClient};
