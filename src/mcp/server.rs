// MCP server handler serving the tool catalog and dispatcher over a session

use rmcp::model::{
    CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
    PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

use super::types::{ToolCallRequest, ToolCallResult, ToolContent};
use crate::catalog::ToolDescriptor;
use crate::dispatch::Dispatcher;

/// One instance per session; all instances share the same dispatcher
#[derive(Clone)]
pub struct ToolServer {
    dispatcher: Arc<Dispatcher>,
}

impl ToolServer {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    pub fn tools(&self) -> Vec<Tool> {
        self.dispatcher.catalog().iter().map(to_mcp_tool).collect()
    }

    pub async fn call(&self, params: CallToolRequestParams) -> CallToolResult {
        let request = ToolCallRequest {
            name: params.name.to_string(),
            arguments: params.arguments.map(Value::Object).unwrap_or(Value::Null),
        };

        to_mcp_result(self.dispatcher.dispatch(request).await)
    }
}

fn to_mcp_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name.clone(),
        descriptor.description.clone(),
        Arc::new(descriptor.schema_object()),
    )
}

fn to_mcp_result(result: ToolCallResult) -> CallToolResult {
    let content: Vec<Content> = result
        .content
        .into_iter()
        .map(|c| match c {
            ToolContent::Text { text } => Content::text(text),
        })
        .collect();

    if result.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

impl ServerHandler for ToolServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(
                "Outils Coolify (applications, déploiements) et NocoDB (bases, tables, enregistrements)"
                    .to_string(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _params: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        debug!("Listing {} tools", self.dispatcher.catalog().len());

        Ok(ListToolsResult {
            meta: None,
            tools: self.tools(),
            next_cursor: None,
        })
    }

    // Tool failures are carried in the result, never as a protocol error
    async fn call_tool(
        &self,
        params: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Session calling tool: {}", params.name);
        Ok(self.call(params).await)
    }
}
