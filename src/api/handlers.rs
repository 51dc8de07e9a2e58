use crate::api::auth::SessionGate;
use crate::dispatch::Dispatcher;
use crate::error::GatewayError;
use crate::mcp::ToolCallRequest;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::info;

/// Application state shared across handlers
#[derive(Clone)]
pub struct ApiState {
    pub dispatcher: Arc<Dispatcher>,
    pub gate: SessionGate,
}

pub(crate) async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "service": env!("CARGO_PKG_NAME"),
    }))
}

pub(crate) async fn server_info() -> impl IntoResponse {
    Json(json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "description": env!("CARGO_PKG_DESCRIPTION"),
    }))
}

/// Legacy message endpoint: acknowledged, routing happens on the session
pub(crate) async fn message_ack() -> StatusCode {
    StatusCode::OK
}

pub(crate) async fn list_tools(State(state): State<ApiState>) -> impl IntoResponse {
    Json(json!({
        "tools": state.dispatcher.catalog(),
    }))
}

/// Plain-JSON tool call. Tool failures still answer 200 with `isError: true`.
pub(crate) async fn call_tool(
    State(state): State<ApiState>,
    Json(payload): Json<Value>,
) -> Result<impl IntoResponse, GatewayError> {
    let request: ToolCallRequest = serde_json::from_value(payload)?;
    info!("Received REST call for tool: {}", request.name);

    let result = state.dispatcher.dispatch(request).await;
    Ok(Json(result))
}
