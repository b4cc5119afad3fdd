use crate::tools::{tool_result, Handler, ToolError};
use async_trait::async_trait;
use paypal_api::types::{CancelSubscriptionRequest, CreateSubscriptionRequest};
use paypal_api::PayPalClient;
use serde::Deserialize;
use serde_json::Value;

// --- CreateSubscription Tool ---

pub struct CreateSubscription;

#[async_trait]
impl Handler for CreateSubscription {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: CreateSubscriptionRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.create_subscription(&request).await?;
        tool_result(&result)
    }
}

// --- ShowSubscriptionDetails Tool ---

#[derive(Debug, Deserialize)]
struct ShowSubscriptionDetailsParams {
    subscription_id: String,
}

pub struct ShowSubscriptionDetails;

#[async_trait]
impl Handler for ShowSubscriptionDetails {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: ShowSubscriptionDetailsParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client
            .show_subscription_details(&params.subscription_id)
            .await?;
        tool_result(&result)
    }
}

// --- CancelSubscription Tool ---

pub struct CancelSubscription;

#[async_trait]
impl Handler for CancelSubscription {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: CancelSubscriptionRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.cancel_subscription(&request).await?;
        tool_result(&result)
    }
}
