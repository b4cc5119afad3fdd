use crate::mcp::error_codes;
use async_trait::async_trait;
use paypal_api::{PayPalClient, PayPalError};
use serde_json::{json, Value};

/// A failure surfaced by a tool handler, carrying the protocol error code it
/// maps to.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolError {
    pub code: i32,
    pub message: String,
}

impl ToolError {
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self {
            code: error_codes::INVALID_PARAMS,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: error_codes::INTERNAL_ERROR,
            message: message.into(),
        }
    }
}

impl From<PayPalError> for ToolError {
    fn from(err: PayPalError) -> Self {
        ToolError::internal(err.to_string())
    }
}

/// A trait for a tool that can be executed by the MCP server. Params arrive
/// schema-validated; handlers deserialize them into typed requests.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError>;
}

/// Wraps an API result in the MCP content envelope.
pub fn tool_result(value: &Value) -> Result<Value, ToolError> {
    let text = serde_json::to_string(value).map_err(|e| ToolError::internal(e.to_string()))?;
    Ok(json!({
        "content": [{ "type": "text", "text": text }]
    }))
}
