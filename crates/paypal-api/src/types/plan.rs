use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IntervalUnit {
    Day,
    Week,
    Month,
    Year,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frequency {
    pub interval_unit: IntervalUnit,
    pub interval_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedPrice {
    pub currency_code: String,
    pub value: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PricingScheme {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_price: Option<FixedPrice>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TenureType {
    Regular,
    Trial,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingCycle {
    pub frequency: Frequency,
    pub tenure_type: TenureType,
    pub sequence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cycles: Option<u32>,
    pub pricing_scheme: PricingScheme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetupFee {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SetupFeeFailureAction {
    Continue,
    Cancel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_bill_outstanding: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_fee: Option<SetupFee>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup_fee_failure_action: Option<SetupFeeFailureAction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_failure_threshold: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Taxes {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percentage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inclusive: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlanRequest {
    pub product_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub billing_cycles: Vec<BillingCycle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_preferences: Option<PaymentPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxes: Option<Taxes>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPlansParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_required: Option<bool>,
}
