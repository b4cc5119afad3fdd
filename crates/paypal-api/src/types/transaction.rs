use serde::{Deserialize, Serialize};

/// Transaction status codes used by the reporting API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// Denied
    D,
    /// Pending
    P,
    /// Success
    S,
    /// Voided
    V,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTransactionsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_status: Option<TransactionStatus>,
    /// RFC 3339 timestamp; seconds required, fractional seconds optional.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    /// RFC 3339 timestamp; the maximum supported range is 31 days.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

fn default_page_size() -> u32 {
    100
}

fn default_page() -> u32 {
    1
}
