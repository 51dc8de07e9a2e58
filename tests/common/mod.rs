use axum::{
    Router,
    body::Body,
    http::{Request, header},
};
use coolify_nocodb_mcp::{
    api,
    config::{AppConfig, HttpConfig, LoggingConfig, McpConfig, PlatformConfig},
};
use futures::StreamExt;
use serde_json::Value;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub const SECRET: &str = "test-secret";
pub const COOLIFY_TOKEN: &str = "coolify-token";
pub const NOCODB_TOKEN: &str = "nocodb-token";

/// Config pointing both platforms at the given base URLs
pub fn create_config(coolify_url: &str, nocodb_url: &str) -> AppConfig {
    let mut coolify = PlatformConfig::coolify();
    coolify.api_url = coolify_url.to_string();
    coolify.token = Some(COOLIFY_TOKEN.to_string());

    let mut nocodb = PlatformConfig::nocodb();
    nocodb.api_url = nocodb_url.to_string();
    nocodb.token = Some(NOCODB_TOKEN.to_string());

    AppConfig {
        http: HttpConfig {
            host: "127.0.0.1".to_string(),
            port: 3000,
        },
        logging: LoggingConfig::default(),
        mcp: McpConfig {
            secret: SECRET.to_string(),
            request_timeout_secs: 5,
            ..Default::default()
        },
        coolify,
        nocodb,
    }
}

/// Config whose upstreams are unreachable; fine for anything that never calls out
pub fn create_offline_config() -> AppConfig {
    create_config("http://127.0.0.1:9/api/v1", "http://127.0.0.1:9")
}

/// Build a test Router from the given config (no HTTP server, uses tower::oneshot).
pub fn build_test_app(config: &AppConfig) -> Router {
    let state = api::build_state(config).unwrap();
    api::build_router(state, Duration::from_secs(15), CancellationToken::new())
}

pub fn get(uri: &str, bearer: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Authorized POST of a tool call to the plain-JSON mirror
pub fn call_tool(name: &str, arguments: serde_json::Value) -> Request<Body> {
    let body = serde_json::json!({ "name": name, "arguments": arguments });
    Request::builder()
        .method("POST")
        .uri("/tools/call")
        .header(header::AUTHORIZATION, format!("Bearer {}", SECRET))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Helper to extract JSON from a response body.
pub async fn response_json(response: axum::http::Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Text of the single content block of a tool result
pub fn result_text(result: &Value) -> String {
    let content = result["content"].as_array().unwrap();
    assert_eq!(content.len(), 1, "expected exactly one content block");
    assert_eq!(content[0]["type"], "text");
    content[0]["text"].as_str().unwrap().to_string()
}

/// Authorized JSON-RPC POST to the session endpoint
pub fn session_post(message: &Value, session_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/sse")
        .header(header::AUTHORIZATION, format!("Bearer {}", SECRET))
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::ACCEPT, "application/json, text/event-stream");
    if let Some(id) = session_id {
        builder = builder.header("mcp-session-id", id);
    }
    builder.body(Body::from(message.to_string())).unwrap()
}

pub fn initialize_message(id: u64) -> Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": id,
        "method": "initialize",
        "params": {
            "protocolVersion": "2025-03-26",
            "capabilities": {},
            "clientInfo": {"name": "integration-test", "version": "0.0.0"}
        }
    })
}

/// Read the JSON-RPC response with the given id from a session reply.
/// SSE replies stay open for keep-alives, so events are parsed as they arrive.
pub async fn read_rpc_response(response: axum::http::Response<Body>, id: u64) -> Value {
    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .is_some_and(|v| v.as_bytes().starts_with(b"application/json"));
    if is_json {
        return response_json(response).await;
    }

    let mut stream = response.into_body().into_data_stream();
    let read = async move {
        let mut buffer = String::new();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.unwrap();
            buffer.push_str(&String::from_utf8_lossy(&chunk).replace("\r\n", "\n"));

            while let Some(end) = buffer.find("\n\n") {
                let event: String = buffer.drain(..end + 2).collect();
                let data: Vec<&str> = event
                    .lines()
                    .filter_map(|line| line.strip_prefix("data:"))
                    .map(str::trim_start)
                    .collect();
                let Ok(message) = serde_json::from_str::<Value>(&data.join("\n")) else {
                    continue;
                };
                if message["id"] == id {
                    return message;
                }
            }
        }
        panic!("session stream ended before response {}", id);
    };

    tokio::time::timeout(Duration::from_secs(10), read)
        .await
        .expect("timed out waiting for session response")
}
