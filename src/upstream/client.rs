use super::{UpstreamError, UpstreamRequest, UpstreamTarget};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Longest upstream error body kept in an error message
const MAX_ERROR_BODY: usize = 512;

/// Thin wrapper around a shared reqwest client. One request per call, no retries.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
}

impl UpstreamClient {
    pub fn new(timeout: Duration) -> Result<Self, UpstreamError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;
        Ok(Self { http })
    }

    /// Send the request and parse the response body as JSON
    pub async fn fetch_json(
        &self,
        target: &UpstreamTarget,
        request: &UpstreamRequest,
    ) -> Result<Value, UpstreamError> {
        let response = self.send(target, request).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    /// Send the request and ignore the response body
    pub async fn execute(
        &self,
        target: &UpstreamTarget,
        request: &UpstreamRequest,
    ) -> Result<(), UpstreamError> {
        self.send(target, request).await.map(drop)
    }

    async fn send(
        &self,
        target: &UpstreamTarget,
        request: &UpstreamRequest,
    ) -> Result<Response, UpstreamError> {
        let url = request.url(target.base_url())?;
        let (auth_name, auth_value) = target.auth()?;

        debug!("{} {} ({})", request.method, url, target.name());

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .header(auth_name, auth_value);
        if let Some(body) = &request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: truncate(body.trim(), MAX_ERROR_BODY),
            });
        }

        Ok(response)
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &text[..end])
}
