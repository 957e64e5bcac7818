//! Gateway error types and their HTTP mapping.
//!
//! Two failure kinds exist: local validation failures (400, never reach the
//! upstream) and upstream failures (500, regardless of cause). Every failure
//! is terminal for its request and reported immediately as an
//! [`ErrorEnvelope`] JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON body returned to the caller for every failure.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// Failure of a single gateway request.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// A required input field was missing or empty. Detected locally; no
    /// upstream call is made.
    #[error("{0}")]
    Validation(&'static str),

    /// The upstream call failed at the transport level (connect, timeout,
    /// or reading the body).
    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The upstream answered with a non-success status. Its body is
    /// discarded, never merged into the envelope.
    #[error("upstream returned status {0}")]
    UpstreamStatus(StatusCode),
}

impl GatewayError {
    /// Status code presented to the caller.
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Validation(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream(_) | GatewayError::UpstreamStatus(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let envelope = ErrorEnvelope {
            error: self.to_string(),
        };
        (status, Json(envelope)).into_response()
    }
}
