//! Routes a named tool call to its handler and folds every outcome,
//! failures included, into a [`ToolCallResult`].

use crate::catalog::{ToolArguments, ToolDescriptor, ToolRegistry};
use crate::error::{GatewayError, Result};
use crate::mcp::{ToolCallRequest, ToolCallResult};
use crate::upstream::UpstreamClient;
use std::sync::Arc;
use tracing::{debug, warn};

/// Prefix of the text block returned for a failed call
pub const ERROR_PREFIX: &str = "Erreur";

/// Stateless across calls; shares only the read-only registry and HTTP client
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
    client: UpstreamClient,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>, client: UpstreamClient) -> Self {
        Self { registry, client }
    }

    /// The tool catalog, in registration order
    pub fn catalog(&self) -> &[ToolDescriptor] {
        self.registry.list()
    }

    /// Execute one call. Never fails: errors come back with `is_error` set.
    pub async fn dispatch(&self, request: ToolCallRequest) -> ToolCallResult {
        let name = request.name.clone();
        match self.try_dispatch(request).await {
            Ok(text) => {
                debug!("Tool {} succeeded", name);
                ToolCallResult::text(text)
            }
            Err(e) => {
                warn!("Tool {} failed: {}", name, e);
                ToolCallResult::error(format!("{}: {}", ERROR_PREFIX, e))
            }
        }
    }

    async fn try_dispatch(&self, request: ToolCallRequest) -> Result<String> {
        let handler = self
            .registry
            .handler(&request.name)
            .ok_or_else(|| GatewayError::UnknownTool(request.name.clone()))?;

        let args = ToolArguments::from_value(request.arguments)?;
        debug!("Dispatching tool {}", request.name);

        handler.call(&self.client, &args).await
    }
}
