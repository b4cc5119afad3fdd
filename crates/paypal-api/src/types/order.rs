use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    /// The item quantity; must be a whole number.
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The cost of each item, up to 2 decimal points.
    #[serde(rename = "itemCost")]
    pub item_cost: f64,
    #[serde(rename = "taxPercent", default)]
    pub tax_percent: f64,
    /// The total cost of this line item.
    #[serde(rename = "itemTotal")]
    pub item_total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderShippingAddress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_line_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_area_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_area_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    #[serde(rename = "currencyCode")]
    pub currency_code: String,
    /// The items in the order (at most 50).
    pub items: Vec<OrderItem>,
    #[serde(default)]
    pub discount: f64,
    #[serde(rename = "shippingCost", default)]
    pub shipping_cost: f64,
    #[serde(rename = "shippingAddress", skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<OrderShippingAddress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "returnUrl", default = "default_return_url")]
    pub return_url: String,
    #[serde(rename = "cancelUrl", default = "default_cancel_url")]
    pub cancel_url: String,
}

fn default_quantity() -> u32 {
    1
}

fn default_return_url() -> String {
    "https://example.com/returnUrl".to_string()
}

fn default_cancel_url() -> String {
    "https://example.com/cancelUrl".to_string()
}
