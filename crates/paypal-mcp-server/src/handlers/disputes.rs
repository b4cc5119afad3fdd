use crate::tools::{tool_result, Handler, ToolError};
use async_trait::async_trait;
use paypal_api::types::{AcceptDisputeClaimRequest, ListDisputesParams};
use paypal_api::PayPalClient;
use serde::Deserialize;
use serde_json::Value;

// --- ListDisputes Tool ---

pub struct ListDisputes;

#[async_trait]
impl Handler for ListDisputes {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: ListDisputesParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.list_disputes(&params).await?;
        tool_result(&result)
    }
}

// --- GetDispute Tool ---

#[derive(Debug, Deserialize)]
struct GetDisputeParams {
    dispute_id: String,
}

pub struct GetDispute;

#[async_trait]
impl Handler for GetDispute {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: GetDisputeParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.get_dispute(&params.dispute_id).await?;
        tool_result(&result)
    }
}

// --- AcceptDisputeClaim Tool ---

pub struct AcceptDisputeClaim;

#[async_trait]
impl Handler for AcceptDisputeClaim {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: AcceptDisputeClaimRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.accept_dispute_claim(&request).await?;
        tool_result(&result)
    }
}
