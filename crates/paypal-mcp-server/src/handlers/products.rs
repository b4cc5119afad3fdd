use crate::tools::{tool_result, Handler, ToolError};
use async_trait::async_trait;
use paypal_api::types::{CreateProductRequest, ListProductsParams, UpdateProductRequest};
use paypal_api::PayPalClient;
use serde::Deserialize;
use serde_json::Value;

// --- CreateProduct Tool ---

pub struct CreateProduct;

#[async_trait]
impl Handler for CreateProduct {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: CreateProductRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.create_product(&request).await?;
        tool_result(&result)
    }
}

// --- ListProducts Tool ---

pub struct ListProducts;

#[async_trait]
impl Handler for ListProducts {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: ListProductsParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.list_products(&params).await?;
        tool_result(&result)
    }
}

// --- ShowProductDetails Tool ---

#[derive(Debug, Deserialize)]
struct ShowProductDetailsParams {
    product_id: String,
}

pub struct ShowProductDetails;

#[async_trait]
impl Handler for ShowProductDetails {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: ShowProductDetailsParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.show_product_details(&params.product_id).await?;
        tool_result(&result)
    }
}

// --- UpdateProduct Tool ---

pub struct UpdateProduct;

#[async_trait]
impl Handler for UpdateProduct {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: UpdateProductRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.update_product(&request).await?;
        tool_result(&result)
    }
}
