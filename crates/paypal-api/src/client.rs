use crate::{config::Config, error::PayPalError, types::*, Result};
use chrono::{Duration as ChronoDuration, SecondsFormat, Utc};
use reqwest::Client;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

/// The main client for interacting with the PayPal REST API.
///
/// Responses are returned as raw [`serde_json::Value`]s; the server treats
/// them as opaque payloads and forwards them to the caller verbatim.
#[derive(Debug, Clone)]
pub struct PayPalClient {
    http_client: Client,
    base_url: String,
    access_token: String,
}

impl PayPalClient {
    /// Creates a new `PayPalClient` from a given configuration.
    pub fn new(config: Config) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url().to_string(),
            access_token: config.access_token,
        })
    }

    /// Creates a new `PayPalClient` with a custom `reqwest::Client`.
    pub fn with_client(client: Client, base_url: &str, access_token: &str) -> Self {
        Self {
            http_client: client,
            base_url: base_url.to_string(),
            access_token: access_token.to_string(),
        }
    }

    fn add_auth(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.bearer_auth(&self.access_token)
    }

    /// Sends the request and maps non-success statuses to [`PayPalError::Api`],
    /// extracting `message` and `details[].description` from the error body.
    async fn finish(&self, builder: reqwest::RequestBuilder) -> Result<Value> {
        let response = self.add_auth(builder).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(PayPalError::from_response(status.as_u16(), &text));
        }

        if text.is_empty() {
            Ok(Value::Null)
        } else {
            Ok(serde_json::from_str(&text)?)
        }
    }

    async fn get(&self, url: String, query: &[(&str, String)]) -> Result<Value> {
        let mut builder = self.http_client.get(&url);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        self.finish(builder).await
    }

    async fn post<B: Serialize + ?Sized>(&self, url: String, body: &B) -> Result<Value> {
        self.finish(self.http_client.post(&url).json(body)).await
    }

    async fn patch<B: Serialize + ?Sized>(&self, url: String, body: &B) -> Result<Value> {
        self.finish(self.http_client.patch(&url).json(body)).await
    }

    // === Invoices ===

    /// Creates an invoice. When the API answers with its link-only success
    /// shape, the invoice is automatically sent to the recipient and the
    /// combined create/send results are returned.
    pub async fn create_invoice(&self, invoice: &CreateInvoiceRequest) -> Result<Value> {
        info!("Starting invoice creation process");

        let url = format!("{}/v2/invoicing/invoices", self.base_url);
        let result = self.post(url, invoice).await?;

        let Some(invoice_id) = extract_invoice_id(&result) else {
            return Ok(result);
        };
        info!(invoice_id = %invoice_id, "Invoice created, sending to recipient");

        let send_request = SendInvoiceRequest {
            invoice_id,
            note: Some(
                "Thank you for choosing us. If there are any issues, feel free to contact us"
                    .to_string(),
            ),
            send_to_recipient: Some(true),
            additional_recipients: None,
        };

        match self.send_invoice(&send_request).await {
            Ok(send_result) => Ok(json!({
                "createResult": result,
                "sendResult": send_result,
            })),
            Err(e) => {
                // A failed auto-send still leaves a created invoice behind.
                warn!(error = %e, "Failed to auto-send created invoice");
                Ok(result)
            }
        }
    }

    pub async fn list_invoices(&self, params: &ListInvoicesParams) -> Result<Value> {
        let url = format!("{}/v2/invoicing/invoices", self.base_url);
        let mut query = vec![
            ("page", params.page.to_string()),
            ("page_size", params.page_size.to_string()),
        ];
        push_bool(&mut query, "total_required", params.total_required);
        self.get(url, &query).await
    }

    pub async fn get_invoice(&self, invoice_id: &str) -> Result<Value> {
        let url = format!("{}/v2/invoicing/invoices/{}", self.base_url, invoice_id);
        self.get(url, &[]).await
    }

    pub async fn send_invoice(&self, request: &SendInvoiceRequest) -> Result<Value> {
        let url = format!(
            "{}/v2/invoicing/invoices/{}/send",
            self.base_url, request.invoice_id
        );
        self.post(url, request).await
    }

    pub async fn send_invoice_reminder(
        &self,
        request: &SendInvoiceReminderRequest,
    ) -> Result<Value> {
        let url = format!(
            "{}/v2/invoicing/invoices/{}/remind",
            self.base_url, request.invoice_id
        );
        self.post(url, request).await
    }

    pub async fn cancel_sent_invoice(&self, request: &CancelSentInvoiceRequest) -> Result<Value> {
        let url = format!(
            "{}/v2/invoicing/invoices/{}/cancel",
            self.base_url, request.invoice_id
        );
        self.post(url, request).await
    }

    pub async fn generate_invoice_qr_code(
        &self,
        request: &GenerateInvoiceQrCodeRequest,
    ) -> Result<Value> {
        let url = format!(
            "{}/v2/invoicing/invoices/{}/generate-qr-code",
            self.base_url, request.invoice_id
        );
        self.post(
            url,
            &json!({ "width": request.width, "height": request.height }),
        )
        .await
    }

    // === Products ===

    pub async fn create_product(&self, product: &CreateProductRequest) -> Result<Value> {
        let url = format!("{}/v1/catalogs/products", self.base_url);
        self.post(url, product).await
    }

    pub async fn list_products(&self, params: &ListProductsParams) -> Result<Value> {
        let url = format!("{}/v1/catalogs/products", self.base_url);
        let mut query = Vec::new();
        push_num(&mut query, "page", params.page);
        push_num(&mut query, "page_size", params.page_size);
        push_bool(&mut query, "total_required", params.total_required);
        self.get(url, &query).await
    }

    pub async fn show_product_details(&self, product_id: &str) -> Result<Value> {
        let url = format!("{}/v1/catalogs/products/{}", self.base_url, product_id);
        self.get(url, &[]).await
    }

    pub async fn update_product(&self, request: &UpdateProductRequest) -> Result<Value> {
        let url = format!(
            "{}/v1/catalogs/products/{}",
            self.base_url, request.product_id
        );
        self.patch(url, &request.operations).await
    }

    // === Subscription plans ===

    pub async fn create_subscription_plan(&self, plan: &CreatePlanRequest) -> Result<Value> {
        let url = format!("{}/v1/billing/plans", self.base_url);
        self.post(url, plan).await
    }

    pub async fn list_subscription_plans(&self, params: &ListPlansParams) -> Result<Value> {
        let url = format!("{}/v1/billing/plans", self.base_url);
        let mut query = Vec::new();
        if let Some(product_id) = &params.product_id {
            query.push(("product_id", product_id.clone()));
        }
        push_num(&mut query, "page", params.page);
        push_num(&mut query, "page_size", params.page_size);
        push_bool(&mut query, "total_required", params.total_required);
        self.get(url, &query).await
    }

    pub async fn show_subscription_plan_details(&self, plan_id: &str) -> Result<Value> {
        let url = format!("{}/v1/billing/plans/{}", self.base_url, plan_id);
        self.get(url, &[]).await
    }

    // === Subscriptions ===

    pub async fn create_subscription(
        &self,
        subscription: &CreateSubscriptionRequest,
    ) -> Result<Value> {
        let url = format!("{}/v1/billing/subscriptions", self.base_url);
        self.post(url, subscription).await
    }

    pub async fn show_subscription_details(&self, subscription_id: &str) -> Result<Value> {
        let url = format!(
            "{}/v1/billing/subscriptions/{}",
            self.base_url, subscription_id
        );
        self.get(url, &[]).await
    }

    pub async fn cancel_subscription(&self, request: &CancelSubscriptionRequest) -> Result<Value> {
        let url = format!(
            "{}/v1/billing/subscriptions/{}/cancel",
            self.base_url, request.subscription_id
        );
        self.post(url, &request.payload).await
    }

    // === Shipments ===

    pub async fn create_shipment(&self, request: &CreateShipmentRequest) -> Result<Value> {
        let url = format!("{}/v1/shipping/trackers-batch", self.base_url);
        let mut tracker = json!({
            "transaction_id": request.transaction_id,
            "tracking_number": request.tracking_number,
            "status": request.status,
        });
        if let Some(carrier) = &request.carrier {
            tracker["carrier"] = json!(carrier);
        }
        self.post(url, &json!({ "trackers": [tracker] })).await
    }

    pub async fn get_shipment_tracking(&self, transaction_id: &str) -> Result<Value> {
        let url = format!("{}/v1/shipping/trackers", self.base_url);
        self.get(url, &[("transaction_id", transaction_id.to_string())])
            .await
    }

    // === Orders ===

    /// Creates a checkout order. The simplified item list is expanded into a
    /// full order body with a single purchase unit and an amount breakdown.
    pub async fn create_order(&self, request: &CreateOrderRequest) -> Result<Value> {
        debug!(items = request.items.len(), "Creating order");
        let url = format!("{}/v2/checkout/orders", self.base_url);
        let body = build_order_body(request);
        self.post(url, &body).await
    }

    pub async fn get_order(&self, order_id: &str) -> Result<Value> {
        let url = format!("{}/v2/checkout/orders/{}", self.base_url, order_id);
        self.get(url, &[]).await
    }

    pub async fn capture_order(&self, order_id: &str) -> Result<Value> {
        let url = format!("{}/v2/checkout/orders/{}/capture", self.base_url, order_id);
        self.post(url, &json!({})).await
    }

    // === Disputes ===

    pub async fn list_disputes(&self, params: &ListDisputesParams) -> Result<Value> {
        let url = format!("{}/v1/customer/disputes", self.base_url);
        let mut query = vec![
            ("page_size", params.page_size.to_string()),
            ("page", params.page.to_string()),
        ];
        if let Some(id) = &params.disputed_transaction_id {
            query.push(("disputed_transaction_id", id.clone()));
        }
        if let Some(state) = &params.dispute_state {
            query.push(("dispute_state", enum_str(state)));
        }
        self.get(url, &query).await
    }

    pub async fn get_dispute(&self, dispute_id: &str) -> Result<Value> {
        let url = format!("{}/v1/customer/disputes/{}", self.base_url, dispute_id);
        self.get(url, &[]).await
    }

    pub async fn accept_dispute_claim(
        &self,
        request: &AcceptDisputeClaimRequest,
    ) -> Result<Value> {
        let url = format!(
            "{}/v1/customer/disputes/{}/accept-claim",
            self.base_url, request.dispute_id
        );
        self.post(url, &json!({ "note": request.note })).await
    }

    // === Transactions ===

    /// Lists transactions. When no window is supplied, the last 31 days are
    /// used (the reporting API's maximum range).
    pub async fn list_transactions(&self, params: &ListTransactionsParams) -> Result<Value> {
        let url = format!("{}/v1/reporting/transactions", self.base_url);

        let end_date = params
            .end_date
            .clone()
            .unwrap_or_else(|| Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        let start_date = params.start_date.clone().unwrap_or_else(|| {
            (Utc::now() - ChronoDuration::days(31)).to_rfc3339_opts(SecondsFormat::Secs, true)
        });

        let mut query = vec![
            ("start_date", start_date),
            ("end_date", end_date),
            ("page_size", params.page_size.to_string()),
            ("page", params.page.to_string()),
        ];
        if let Some(id) = &params.transaction_id {
            query.push(("transaction_id", id.clone()));
        }
        if let Some(status) = &params.transaction_status {
            query.push(("transaction_status", enum_str(status)));
        }
        self.get(url, &query).await
    }
}

/// Detects the link-only success shape returned by the invoicing API and
/// extracts the invoice id from its href.
fn extract_invoice_id(result: &Value) -> Option<String> {
    let rel = result.get("rel").and_then(|v| v.as_str())?;
    let href = result.get("href").and_then(|v| v.as_str())?;
    let method = result.get("method").and_then(|v| v.as_str())?;

    if rel == "self" && method == "GET" && href.contains("/v2/invoicing/invoices/") {
        href.rsplit('/').next().map(|id| id.to_string())
    } else {
        None
    }
}

fn build_order_body(request: &CreateOrderRequest) -> Value {
    let currency = &request.currency_code;

    let mut item_total = 0.0;
    let mut tax_total = 0.0;
    let items: Vec<Value> = request
        .items
        .iter()
        .map(|item| {
            let quantity = item.quantity as f64;
            let unit_tax = item.item_cost * item.tax_percent / 100.0;
            item_total += item.item_cost * quantity;
            tax_total += unit_tax * quantity;

            let mut entry = json!({
                "name": item.name,
                "quantity": item.quantity.to_string(),
                "unit_amount": { "currency_code": currency, "value": money(item.item_cost) },
                "tax": { "currency_code": currency, "value": money(unit_tax) },
            });
            if let Some(description) = &item.description {
                entry["description"] = json!(description);
            }
            entry
        })
        .collect();

    let total = item_total + tax_total + request.shipping_cost - request.discount;

    let mut purchase_unit = json!({
        "amount": {
            "currency_code": currency,
            "value": money(total),
            "breakdown": {
                "item_total": { "currency_code": currency, "value": money(item_total) },
                "tax_total": { "currency_code": currency, "value": money(tax_total) },
                "shipping": { "currency_code": currency, "value": money(request.shipping_cost) },
                "discount": { "currency_code": currency, "value": money(request.discount) },
            },
        },
        "items": items,
    });
    if let Some(address) = &request.shipping_address {
        purchase_unit["shipping"] = json!({ "address": address });
    }
    if let Some(notes) = &request.notes {
        purchase_unit["description"] = json!(notes);
    }

    json!({
        "intent": "CAPTURE",
        "purchase_units": [purchase_unit],
        "application_context": {
            "return_url": request.return_url,
            "cancel_url": request.cancel_url,
        },
    })
}

fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Renders an enum's wire representation for use in a query string.
fn enum_str<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(Value::String(s)) => s,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

fn push_num(query: &mut Vec<(&str, String)>, key: &'static str, value: Option<u32>) {
    if let Some(v) = value {
        query.push((key, v.to_string()));
    }
}

fn push_bool(query: &mut Vec<(&str, String)>, key: &'static str, value: Option<bool>) {
    if let Some(v) = value {
        // Booleans are rendered lowercase in query strings.
        query.push((key, v.to_string()));
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn extract_invoice_id_matches_link_shape() {
        let result = json!({
            "rel": "self",
            "href": "https://api-m.sandbox.paypal.com/v2/invoicing/invoices/INV2-XYZ",
            "method": "GET",
        });
        assert_eq!(extract_invoice_id(&result), Some("INV2-XYZ".to_string()));
    }

    #[test]
    fn extract_invoice_id_rejects_other_shapes() {
        assert_eq!(extract_invoice_id(&json!({"id": "INV2-XYZ"})), None);
        let wrong_method = json!({
            "rel": "self",
            "href": "https://api-m.sandbox.paypal.com/v2/invoicing/invoices/INV2-XYZ",
            "method": "POST",
        });
        assert_eq!(extract_invoice_id(&wrong_method), None);
    }

    #[test]
    fn order_body_computes_amount_breakdown() {
        let request = CreateOrderRequest {
            currency_code: "USD".to_string(),
            items: vec![OrderItem {
                name: "Widget".to_string(),
                quantity: 2,
                description: None,
                item_cost: 10.0,
                tax_percent: 10.0,
                item_total: 20.0,
            }],
            discount: 1.0,
            shipping_cost: 5.0,
            shipping_address: None,
            notes: None,
            return_url: "https://example.com/returnUrl".to_string(),
            cancel_url: "https://example.com/cancelUrl".to_string(),
        };

        let body = build_order_body(&request);
        let amount = &body["purchase_units"][0]["amount"];
        assert_eq!(amount["value"], "26.00");
        assert_eq!(amount["breakdown"]["item_total"]["value"], "20.00");
        assert_eq!(amount["breakdown"]["tax_total"]["value"], "2.00");
        assert_eq!(amount["breakdown"]["shipping"]["value"], "5.00");
        assert_eq!(amount["breakdown"]["discount"]["value"], "1.00");
        assert_eq!(body["intent"], "CAPTURE");

        let item = &body["purchase_units"][0]["items"][0];
        assert_eq!(item["quantity"], "2");
        assert_eq!(item["unit_amount"]["value"], "10.00");
        assert_eq!(item["tax"]["value"], "1.00");
    }
}
