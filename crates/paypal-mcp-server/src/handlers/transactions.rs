use crate::tools::{tool_result, Handler, ToolError};
use async_trait::async_trait;
use paypal_api::types::ListTransactionsParams;
use paypal_api::PayPalClient;
use serde_json::Value;

// --- ListTransactions Tool ---

pub struct ListTransactions;

#[async_trait]
impl Handler for ListTransactions {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: ListTransactionsParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.list_transactions(&params).await?;
        tool_result(&result)
    }
}
