use crate::tools::{tool_result, Handler, ToolError};
use async_trait::async_trait;
use paypal_api::types::CreateOrderRequest;
use paypal_api::PayPalClient;
use serde::Deserialize;
use serde_json::Value;

// --- CreateOrder Tool ---

pub struct CreateOrder;

#[async_trait]
impl Handler for CreateOrder {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: CreateOrderRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.create_order(&request).await?;
        tool_result(&result)
    }
}

// --- GetOrder Tool ---

#[derive(Debug, Deserialize)]
struct OrderIdParams {
    /// The order id generated by the create call.
    id: String,
}

pub struct GetOrder;

#[async_trait]
impl Handler for GetOrder {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: OrderIdParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.get_order(&params.id).await?;
        tool_result(&result)
    }
}

// --- CaptureOrder Tool ---

pub struct CaptureOrder;

#[async_trait]
impl Handler for CaptureOrder {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: OrderIdParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.capture_order(&params.id).await?;
        tool_result(&result)
    }
}
