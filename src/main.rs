use std::sync::Arc;

use time_report_mcp::{
    build_app, config::Config, logging, registry::FixtureRegistry, AppState, BASE_PATH,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init_logging();

    let config = Config::from_env()?;

    let registry = Arc::new(FixtureRegistry::new());
    let bind_socket = config.bind_socket()?;
    let state = AppState::new(registry, config.notification_errors);
    let app = build_app(state);
    let listener = tokio::net::TcpListener::bind(bind_socket).await?;

    info!(
        bind_addr = %config.bind_addr,
        bind_port = config.bind_port,
        rpc_endpoint = BASE_PATH,
        notification_errors = ?config.notification_errors,
        "server starting"
    );

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
