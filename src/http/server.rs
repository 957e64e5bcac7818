//! HTTP server setup and route handlers.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Validate required fields before any upstream call
//! - Forward extracted fields to the upstream model server
//! - Relay upstream responses verbatim

use std::future::Future;
use std::time::{Duration, Instant};

use axum::body::Bytes;
use axum::extract::State;
use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::http::error::GatewayError;
use crate::observability::metrics;
use crate::upstream::{RelayedResponse, UpstreamBuildError, UpstreamClient};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstream: UpstreamClient,
}

/// HTTP server for the forwarding gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Result<Self, UpstreamBuildError> {
        let upstream = UpstreamClient::new(&config.upstream, &config.timeouts)?;
        let state = AppState { upstream };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// The same route set is mounted bare and under `/api`, matching both
    /// address forms clients of the original service used.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let routes = Router::new()
            .route("/select_model", post(select_model))
            .route("/query", post(query))
            .route("/conversation_history", get(conversation_history));

        Router::new()
            .merge(routes.clone())
            .nest("/api", routes)
            .with_state(state)
            // Inbound timeout sits above the upstream budget so a stalled
            // upstream surfaces as the 500 envelope, not a bare 408.
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs + 1,
            )))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Inbound body for `/select_model`. Extra fields are ignored; a missing
/// `model` is handled as a validation failure, not a deserialization error.
#[derive(Debug, Default, Deserialize)]
pub struct SelectModelRequest {
    pub model: Option<String>,
}

/// Inbound body for `/query`. The `model` field is accepted for
/// compatibility but only `prompt` is forwarded.
#[derive(Debug, Default, Deserialize)]
pub struct QueryRequest {
    #[allow(dead_code)]
    pub model: Option<String>,
    pub prompt: Option<String>,
}

async fn select_model(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<RelayedResponse, GatewayError> {
    forward("select_model", async {
        let request: SelectModelRequest = parse_body(&body);
        let model = require_field(request.model, "Model is required.")?;
        state
            .upstream
            .post_json("/select_model", &json!({ "model": model }))
            .await
    })
    .await
}

async fn query(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<RelayedResponse, GatewayError> {
    forward("query", async {
        let request: QueryRequest = parse_body(&body);
        let prompt = require_field(request.prompt, "Prompt is required.")?;
        state
            .upstream
            .post_json("/query", &json!({ "prompt": prompt }))
            .await
    })
    .await
}

async fn conversation_history(
    State(state): State<AppState>,
) -> Result<RelayedResponse, GatewayError> {
    forward("conversation_history", async {
        state.upstream.get("/conversation_history").await
    })
    .await
}

/// Lenient body parse: absent, empty, or malformed bodies all surface as
/// missing-field validation failures, which is the only validation this
/// gateway performs.
fn parse_body<T: DeserializeOwned + Default>(body: &Bytes) -> T {
    serde_json::from_slice(body).unwrap_or_default()
}

/// Reject absent or empty required fields before any upstream call.
fn require_field(
    value: Option<String>,
    message: &'static str,
) -> Result<String, GatewayError> {
    value
        .filter(|v| !v.is_empty())
        .ok_or(GatewayError::Validation(message))
}

/// Run one forwarding operation, recording metrics and logging the outcome.
async fn forward<F>(route: &'static str, call: F) -> Result<RelayedResponse, GatewayError>
where
    F: Future<Output = Result<RelayedResponse, GatewayError>>,
{
    let start = Instant::now();
    let result = call.await;

    match &result {
        Ok(relayed) => {
            metrics::record_request(route, relayed.status.as_u16(), start);
            tracing::debug!(
                route = route,
                status = relayed.status.as_u16(),
                "Relayed upstream response"
            );
        }
        Err(error @ GatewayError::Validation(_)) => {
            metrics::record_request(route, error.status_code().as_u16(), start);
            tracing::debug!(route = route, error = %error, "Rejected request locally");
        }
        Err(error) => {
            metrics::record_request(route, error.status_code().as_u16(), start);
            metrics::record_upstream_error(route);
            tracing::error!(route = route, error = %error, "Upstream error");
        }
    }

    result
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
