use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

pub mod config;
pub mod domain;
pub mod errors;
pub mod http;
pub mod logging;
pub mod mcp;
pub mod registry;

use domain::manifest::{build_manifest, Manifest};
use mcp::dispatcher::{Dispatcher, NotificationErrorPolicy};
use registry::ToolCapabilities;

/// Path prefix shared by the JSON-RPC endpoint and the tool endpoints.
pub const BASE_PATH: &str = "/sse";

#[derive(Clone)]
pub struct AppState {
    pub capabilities: Arc<dyn ToolCapabilities>,
    pub dispatcher: Dispatcher,
    pub manifest: Arc<Manifest>,
}

impl AppState {
    pub fn new(
        capabilities: Arc<dyn ToolCapabilities>,
        notification_errors: NotificationErrorPolicy,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(capabilities.clone(), notification_errors),
            capabilities,
            manifest: Arc::new(build_manifest()),
        }
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(http::handlers::health))
        .route(BASE_PATH, post(http::handlers::rpc_endpoint))
        .route("/sse/.well-known/mcp.json", get(http::handlers::manifest))
        .route("/.well-known/mcp.json", get(http::handlers::manifest))
        .route("/sse/time-report", get(http::handlers::time_report))
        .route("/sse/search", get(http::handlers::search))
        .route("/sse/fetch", get(http::handlers::fetch))
        .layer(middleware::from_fn(logging::request_logging_middleware))
        .with_state(state)
}
