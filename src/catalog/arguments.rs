use crate::error::{GatewayError, Result};
use serde_json::{Map, Value};

/// Arguments of one tool call, keyed by parameter name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolArguments(Map<String, Value>);

impl ToolArguments {
    pub fn new(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Accepts an object or `null`; anything else is rejected
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(GatewayError::invalid_argument(
                "arguments",
                format!("expected an object, got {}", kind(&other)),
            )),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// Identifier-like argument. Numbers are accepted and rendered as text.
    /// `.` and `..` are rejected: they would collapse into the parent path.
    pub fn required_str(&self, name: &str) -> Result<String> {
        match self.get(name) {
            None => Err(GatewayError::MissingArgument(name.to_string())),
            Some(Value::String(s)) if s.trim().is_empty() => {
                Err(GatewayError::MissingArgument(name.to_string()))
            }
            Some(Value::String(s)) if is_dot_segment(s) => Err(GatewayError::invalid_argument(
                name,
                format!("'{}' is not a valid identifier", s),
            )),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(GatewayError::invalid_argument(
                name,
                format!("expected a string, got {}", kind(other)),
            )),
        }
    }

    pub fn optional_u64(&self, name: &str) -> Result<Option<u64>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Number(n)) => n.as_u64().map(Some).ok_or_else(|| {
                GatewayError::invalid_argument(name, "expected a non-negative integer")
            }),
            Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| {
                GatewayError::invalid_argument(name, "expected a non-negative integer")
            }),
            Some(other) => Err(GatewayError::invalid_argument(
                name,
                format!("expected a number, got {}", kind(other)),
            )),
        }
    }

    pub fn required_object(&self, name: &str) -> Result<Value> {
        match self.get(name) {
            None => Err(GatewayError::MissingArgument(name.to_string())),
            Some(value @ Value::Object(_)) => Ok(value.clone()),
            Some(other) => Err(GatewayError::invalid_argument(
                name,
                format!("expected an object, got {}", kind(other)),
            )),
        }
    }
}

impl From<Map<String, Value>> for ToolArguments {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn is_dot_segment(s: &str) -> bool {
    matches!(s, "." | "..")
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
