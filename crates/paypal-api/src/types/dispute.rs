use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DisputeState {
    RequiredAction,
    RequiredOtherPartyAction,
    UnderPaypalReview,
    Resolved,
    OpenInquiries,
    Appealable,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDisputesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disputed_transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dispute_state: Option<DisputeState>,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptDisputeClaimRequest {
    pub dispute_id: String,
    /// Why the seller is accepting the claim.
    pub note: String,
}

fn default_page_size() -> u32 {
    10
}

fn default_page() -> u32 {
    1
}
