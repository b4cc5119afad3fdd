use crate::tools::{tool_result, Handler, ToolError};
use async_trait::async_trait;
use paypal_api::types::{
    CancelSentInvoiceRequest, CreateInvoiceRequest, GenerateInvoiceQrCodeRequest,
    ListInvoicesParams, SendInvoiceReminderRequest, SendInvoiceRequest,
};
use paypal_api::PayPalClient;
use serde::Deserialize;
use serde_json::Value;

// --- CreateInvoice Tool ---

pub struct CreateInvoice;

#[async_trait]
impl Handler for CreateInvoice {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: CreateInvoiceRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.create_invoice(&request).await?;
        tool_result(&result)
    }
}

// --- ListInvoices Tool ---

pub struct ListInvoices;

#[async_trait]
impl Handler for ListInvoices {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: ListInvoicesParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.list_invoices(&params).await?;
        tool_result(&result)
    }
}

// --- GetInvoice Tool ---

#[derive(Debug, Deserialize)]
struct GetInvoiceParams {
    invoice_id: String,
}

pub struct GetInvoice;

#[async_trait]
impl Handler for GetInvoice {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let params: GetInvoiceParams =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.get_invoice(&params.invoice_id).await?;
        tool_result(&result)
    }
}

// --- SendInvoice Tool ---

pub struct SendInvoice;

#[async_trait]
impl Handler for SendInvoice {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: SendInvoiceRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.send_invoice(&request).await?;
        tool_result(&result)
    }
}

// --- SendInvoiceReminder Tool ---

pub struct SendInvoiceReminder;

#[async_trait]
impl Handler for SendInvoiceReminder {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: SendInvoiceReminderRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.send_invoice_reminder(&request).await?;
        tool_result(&result)
    }
}

// --- CancelSentInvoice Tool ---

pub struct CancelSentInvoice;

#[async_trait]
impl Handler for CancelSentInvoice {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: CancelSentInvoiceRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.cancel_sent_invoice(&request).await?;
        tool_result(&result)
    }
}

// --- GenerateInvoiceQrCode Tool ---

pub struct GenerateInvoiceQrCode;

#[async_trait]
impl Handler for GenerateInvoiceQrCode {
    async fn execute(&self, client: &PayPalClient, params: Value) -> Result<Value, ToolError> {
        let request: GenerateInvoiceQrCodeRequest =
            serde_json::from_value(params).map_err(|e| ToolError::invalid_params(e.to_string()))?;
        let result = client.generate_invoice_qr_code(&request).await?;
        tool_result(&result)
    }
}
