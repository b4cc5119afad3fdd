use crate::tools::{tool_result, Handler, ToolError};
use async_trait::async_trait;
use paypal_api::types::{CreateShipmentRequest, GetShipmentTrackingParams};
use paypal_api::PayPalClient;
use serde_json::Value;

// --- CreateShipment Tool ---

pub struct CreateShipment;

#[async_trait]
impl Handler for CreateShipment {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: CreateShipmentRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.create_shipment(&request).await?;
        tool_result(&result)
    }
}

// --- GetShipmentTracking Tool ---

pub struct GetShipmentTracking;

#[async_trait]
impl Handler for GetShipmentTracking {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: GetShipmentTrackingParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;

        // Both ids are optional in the schema, but the trackers endpoint can
        // only be queried by transaction id.
        let transaction_id = params.transaction_id.ok_or_else(|| {
            ToolError::invalid_params("transaction_id is required to get shipment tracking")
        })?;

        let result = client.get_shipment_tracking(&transaction_id).await?;
        tool_result(&result)
    }
}
