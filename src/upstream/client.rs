//! HTTP client for the upstream model server.

use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::{TimeoutConfig, UpstreamConfig};
use crate::http::error::GatewayError;

/// Error constructing the upstream client at startup.
#[derive(Debug, Error)]
pub enum UpstreamBuildError {
    #[error("invalid upstream base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// A successful upstream response, relayed to the caller untouched.
#[derive(Debug)]
pub struct RelayedResponse {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for RelayedResponse {
    fn into_response(self) -> Response {
        let content_type = self
            .content_type
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));
        let mut response = (self.status, self.body).into_response();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, content_type);
        response
    }
}

/// Shared client for all requests to the upstream model server.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    base_url: String,
}

impl UpstreamClient {
    /// Build the client with the configured connect and request timeouts.
    pub fn new(
        upstream: &UpstreamConfig,
        timeouts: &TimeoutConfig,
    ) -> Result<Self, UpstreamBuildError> {
        // Parsed only to reject unusable URLs at startup; the string form
        // is kept so route paths concatenate without Url::join surprises.
        Url::parse(&upstream.base_url)?;

        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.request_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: upstream.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// POST a JSON body to `{base_url}{path}` and relay the response.
    pub async fn post_json(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<RelayedResponse, GatewayError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .json(body)
            .send()
            .await?;
        Self::relay(response).await
    }

    /// GET `{base_url}{path}` and relay the response.
    pub async fn get(&self, path: &str) -> Result<RelayedResponse, GatewayError> {
        let response = self.client.get(self.endpoint(path)).send().await?;
        Self::relay(response).await
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn an upstream response into a verbatim relay, or an error for
    /// non-success statuses. The error path drops the upstream body.
    async fn relay(response: reqwest::Response) -> Result<RelayedResponse, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::UpstreamStatus(status));
        }

        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response.bytes().await?;

        Ok(RelayedResponse {
            status,
            content_type,
            body,
        })
    }
}
