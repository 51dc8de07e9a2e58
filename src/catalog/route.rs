use super::{ToolArguments, ToolHandler};
use crate::error::Result;
use crate::upstream::{UpstreamClient, UpstreamRequest, UpstreamTarget};
use async_trait::async_trait;
use std::sync::Arc;

/// Builds the outbound request from the call arguments. Must be pure.
pub type RequestBuilder = fn(&ToolArguments) -> Result<UpstreamRequest>;

/// How a successful upstream response becomes the result text
#[derive(Clone, Copy)]
pub enum Reply {
    /// Pretty-printed JSON of the response body
    Json,
    /// Fixed confirmation naming the affected identifier; the body is not read
    Confirm(fn(&ToolArguments) -> Result<String>),
}

/// Tool backed by exactly one HTTP call against one platform
#[derive(Clone)]
pub struct HttpRoute {
    target: Arc<UpstreamTarget>,
    build: RequestBuilder,
    reply: Reply,
}

impl HttpRoute {
    pub fn new(target: Arc<UpstreamTarget>, build: RequestBuilder, reply: Reply) -> Self {
        Self {
            target,
            build,
            reply,
        }
    }

    pub fn json(target: Arc<UpstreamTarget>, build: RequestBuilder) -> Self {
        Self::new(target, build, Reply::Json)
    }

    pub fn confirm(
        target: Arc<UpstreamTarget>,
        build: RequestBuilder,
        message: fn(&ToolArguments) -> Result<String>,
    ) -> Self {
        Self::new(target, build, Reply::Confirm(message))
    }
}

#[async_trait]
impl ToolHandler for HttpRoute {
    async fn call(&self, client: &UpstreamClient, args: &ToolArguments) -> Result<String> {
        let request = (self.build)(args)?;

        match self.reply {
            Reply::Json => {
                let body = client.fetch_json(&self.target, &request).await?;
                Ok(serde_json::to_string_pretty(&body)?)
            }
            Reply::Confirm(message) => {
                client.execute(&self.target, &request).await?;
                message(args)
            }
        }
    }
}
