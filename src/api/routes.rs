use crate::api::handlers::ApiState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn health_routes() -> Router<ApiState> {
    Router::new()
        .route("/health", get(super::handlers::health_check))
        .route("/info", get(super::handlers::server_info))
}

pub fn message_routes() -> Router<ApiState> {
    Router::new().route("/message", post(super::handlers::message_ack))
}

/// Plain-JSON mirror of list-tools / call-tool; mounted behind the session gate
pub fn tool_routes() -> Router<ApiState> {
    Router::new()
        .route("/tools", get(super::handlers::list_tools))
        .route("/tools/call", post(super::handlers::call_tool))
}
