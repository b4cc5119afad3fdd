use crate::tools::{tool_result, Handler, ToolError};
use async_trait::async_trait;
use paypal_api::types::{CreatePlanRequest, ListPlansParams};
use paypal_api::PayPalClient;
use serde::Deserialize;
use serde_json::Value;

// --- CreateSubscriptionPlan Tool ---

pub struct CreateSubscriptionPlan;

#[async_trait]
impl Handler for CreateSubscriptionPlan {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: CreatePlanRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.create_subscription_plan(&request).await?;
        tool_result(&result)
    }
}

// --- ListSubscriptionPlans Tool ---

pub struct ListSubscriptionPlans;

#[async_trait]
impl Handler for ListSubscriptionPlans {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: ListPlansParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.list_subscription_plans(&params).await?;
        tool_result(&result)
    }
}

// --- ShowSubscriptionPlanDetails Tool ---

#[derive(Debug, Deserialize)]
struct ShowPlanDetailsParams {
    plan_id: String,
}

pub struct ShowSubscriptionPlanDetails;

#[async_trait]
impl Handler for ShowSubscriptionPlanDetails {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: ShowPlanDetailsParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client
            .show_subscription_plan_details(&params.plan_id)
            .await?;
        tool_result(&result)
    }
}
