pub mod auth;
pub mod handlers;
pub mod routes;
pub(crate) mod session_service;

pub use auth::SessionGate;

use crate::config::AppConfig;
use crate::dispatch::Dispatcher;
use crate::platforms;
use crate::upstream::UpstreamClient;
use anyhow::Result;
use axum::{Router, middleware};
use handlers::ApiState;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Path of the streaming session endpoint
pub const SESSION_PATH: &str = "/sse";

/// Build the shared state from configuration
pub fn build_state(config: &AppConfig) -> Result<ApiState> {
    let registry = platforms::build_registry(config)?;
    let client = UpstreamClient::new(Duration::from_secs(config.mcp.request_timeout_secs))?;

    Ok(ApiState {
        dispatcher: Arc::new(Dispatcher::new(Arc::new(registry), client)),
        gate: SessionGate::new(config.mcp.secret.clone()),
    })
}

pub async fn start_server(config: AppConfig) -> Result<()> {
    let addr = format!("{}:{}", config.http.host, config.http.port);

    let state = build_state(&config)?;
    let tool_count = state.dispatcher.catalog().len();

    let ct = CancellationToken::new();
    let app = build_router(
        state,
        Duration::from_secs(config.mcp.sse_keep_alive_secs),
        ct.child_token(),
    );

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("HTTP server listening on {}", addr);
    info!("Health check: http://{}/health", addr);
    info!("MCP session: http://{}{} ({} tools)", addr, SESSION_PATH, tool_count);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(ct))
        .await?;

    Ok(())
}

/// Assemble the HTTP surface. The session endpoint and the tool routes sit behind the gate.
pub fn build_router(state: ApiState, keep_alive: Duration, ct: CancellationToken) -> Router {
    let session = session_service::create_session_service(state.dispatcher.clone(), keep_alive, ct);

    let gated = Router::new()
        .merge(routes::tool_routes())
        .nest_service(SESSION_PATH, session)
        .layer(middleware::from_fn_with_state(
            state.gate.clone(),
            auth::require_session_secret,
        ));

    Router::new()
        .merge(routes::health_routes())
        .merge(routes::message_routes())
        .merge(gated)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal(ct: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down...");
        },
        _ = terminate => {
            info!("Received SIGTERM signal, shutting down...");
        },
    }

    // Close open sessions so their streams end
    ct.cancel();
}
