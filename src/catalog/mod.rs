//! Tool catalog: the ordered set of advertised tools and the handler behind each one.
//!
//! Every registered name has exactly one descriptor and exactly one handler;
//! the registry refuses duplicates, so the catalog and the dispatch table
//! cannot drift apart.

pub(crate) mod arguments;
pub(crate) mod route;

pub use arguments::ToolArguments;
pub use route::{HttpRoute, Reply};

use crate::error::{GatewayError, Result};
use crate::upstream::UpstreamClient;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Map, Value, json};
use std::collections::HashMap;
use std::sync::Arc;

/// Name, description and parameter schema of one tool
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl ToolDescriptor {
    /// Descriptor with an empty object schema
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: json!({
                "type": "object",
                "properties": {},
                "required": [],
            }),
        }
    }

    pub fn required(mut self, param: &str, kind: &str, description: &str) -> Self {
        self.insert_property(param, json!({ "type": kind, "description": description }));
        if let Some(required) = self.input_schema["required"].as_array_mut() {
            required.push(Value::String(param.to_string()));
        }
        self
    }

    pub fn optional(mut self, param: &str, kind: &str, description: &str, default: Option<Value>) -> Self {
        let mut property = json!({ "type": kind, "description": description });
        if let Some(default) = default {
            property["default"] = default;
        }
        self.insert_property(param, property);
        self
    }

    fn insert_property(&mut self, param: &str, property: Value) {
        if let Some(properties) = self.input_schema["properties"].as_object_mut() {
            properties.insert(param.to_string(), property);
        }
    }

    /// Schema as a JSON object
    pub fn schema_object(&self) -> Map<String, Value> {
        self.input_schema.as_object().cloned().unwrap_or_default()
    }
}

/// Executes one tool. Returns the text of the single content block on success.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    async fn call(&self, client: &UpstreamClient, args: &ToolArguments) -> Result<String>;
}

/// A descriptor paired with its handler, as contributed by a platform
pub struct ToolEntry {
    pub descriptor: ToolDescriptor,
    pub handler: Arc<dyn ToolHandler>,
}

impl ToolEntry {
    pub fn new(descriptor: ToolDescriptor, handler: impl ToolHandler + 'static) -> Self {
        Self {
            descriptor,
            handler: Arc::new(handler),
        }
    }
}

/// Ordered catalog plus name → handler lookup. Built at startup, read-only afterwards.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
    handlers: HashMap<String, Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: ToolEntry) -> Result<()> {
        let name = entry.descriptor.name.clone();
        if self.handlers.contains_key(&name) {
            return Err(GatewayError::Config(format!(
                "Duplicate tool name '{}' in catalog",
                name
            )));
        }

        self.handlers.insert(name, entry.handler);
        self.tools.push(entry.descriptor);
        Ok(())
    }

    pub fn register_all(&mut self, entries: impl IntoIterator<Item = ToolEntry>) -> Result<()> {
        entries.into_iter().try_for_each(|entry| self.register(entry))
    }

    /// Catalog in registration order
    pub fn list(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    pub fn handler(&self, name: &str) -> Option<Arc<dyn ToolHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
