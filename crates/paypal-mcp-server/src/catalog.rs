//! The static capability catalog: every tool the server can expose, with its
//! description, parameter schema and governing (resource group, action)
//! pairs. The registry filters this list by the enablement map at startup.

use crate::handlers;
use crate::mcp::registry::Capability;
use crate::mcp::schema::{Field, FieldType, Schema};
use std::sync::Arc;

const SHIPMENT_STATUSES: &[&str] = &["ON_HOLD", "SHIPPED", "DELIVERED", "CANCELLED"];
const DISPUTE_STATES: &[&str] = &[
    "REQUIRED_ACTION",
    "REQUIRED_OTHER_PARTY_ACTION",
    "UNDER_PAYPAL_REVIEW",
    "RESOLVED",
    "OPEN_INQUIRIES",
    "APPEALABLE",
];
const TRANSACTION_STATUSES: &[&str] = &["D", "P", "S", "V"];
const PRODUCT_TYPES: &[&str] = &["PHYSICAL", "DIGITAL", "SERVICE"];
const CURRENCY_CODES: &[&str] = &["USD"];

const CREATE_INVOICE: &[Field] = &[
    Field::required("detail", FieldType::Object),
    Field::optional("invoicer", FieldType::Object),
    Field::optional("primary_recipients", FieldType::Array { max_items: None }),
    Field::optional("items", FieldType::Array { max_items: None }),
];

const LIST_INVOICES: &[Field] = &[
    Field::optional("page", FieldType::Integer),
    Field::optional("page_size", FieldType::Integer),
    Field::optional("total_required", FieldType::Boolean),
];

const GET_INVOICE: &[Field] = &[Field::required("invoice_id", FieldType::String)];

const SEND_INVOICE: &[Field] = &[
    Field::required("invoice_id", FieldType::String),
    Field::optional("note", FieldType::String),
    Field::optional("send_to_recipient", FieldType::Boolean),
    Field::optional("additional_recipients", FieldType::Array { max_items: None }),
];

const SEND_INVOICE_REMINDER: &[Field] = &[
    Field::required("invoice_id", FieldType::String),
    Field::optional("subject", FieldType::String),
    Field::optional("note", FieldType::String),
    Field::optional("additional_recipients", FieldType::Array { max_items: None }),
];

const CANCEL_SENT_INVOICE: &[Field] = &[
    Field::required("invoice_id", FieldType::String),
    Field::optional("note", FieldType::String),
    Field::optional("send_to_recipient", FieldType::Boolean),
    Field::optional("additional_recipients", FieldType::Array { max_items: None }),
];

const GENERATE_INVOICE_QR_CODE: &[Field] = &[
    Field::required("invoice_id", FieldType::String),
    Field::required("width", FieldType::Integer),
    Field::required("height", FieldType::Integer),
];

const CREATE_PRODUCT: &[Field] = &[
    Field::required("name", FieldType::String),
    Field::required("type", FieldType::Enum(PRODUCT_TYPES)),
    Field::optional("description", FieldType::String),
    Field::optional("category", FieldType::String),
    Field::optional("image_url", FieldType::String),
    Field::optional("home_url", FieldType::String),
];

const LIST_PRODUCTS: &[Field] = &[
    Field::optional("page", FieldType::Integer),
    Field::optional("page_size", FieldType::Integer),
    Field::optional("total_required", FieldType::Boolean),
];

const SHOW_PRODUCT_DETAILS: &[Field] = &[Field::required("product_id", FieldType::String)];

const UPDATE_PRODUCT: &[Field] = &[
    Field::required("product_id", FieldType::String),
    Field::required("operations", FieldType::Array { max_items: None }),
];

const CREATE_SUBSCRIPTION_PLAN: &[Field] = &[
    Field::required("product_id", FieldType::String),
    Field::required("name", FieldType::String),
    Field::optional("description", FieldType::String),
    Field::required("billing_cycles", FieldType::Array { max_items: None }),
    Field::optional("payment_preferences", FieldType::Object),
    Field::optional("taxes", FieldType::Object),
];

const LIST_SUBSCRIPTION_PLANS: &[Field] = &[
    Field::optional("product_id", FieldType::String),
    Field::optional("page", FieldType::Integer),
    Field::optional("page_size", FieldType::Integer),
    Field::optional("total_required", FieldType::Boolean),
];

const SHOW_SUBSCRIPTION_PLAN_DETAILS: &[Field] = &[Field::required("plan_id", FieldType::String)];

const CREATE_SUBSCRIPTION: &[Field] = &[
    Field::required("plan_id", FieldType::String),
    Field::optional("quantity", FieldType::Integer),
    Field::optional("shipping_amount", FieldType::Object),
    Field::required("subscriber", FieldType::Object),
    Field::optional("application_context", FieldType::Object),
];

const SHOW_SUBSCRIPTION_DETAILS: &[Field] = &[Field::required("subscription_id", FieldType::String)];

const CANCEL_SUBSCRIPTION: &[Field] = &[
    Field::required("subscription_id", FieldType::String),
    Field::required("payload", FieldType::Object),
];

const CREATE_SHIPMENT: &[Field] = &[
    Field::optional("order_id", FieldType::String),
    Field::required("tracking_number", FieldType::String),
    Field::required("transaction_id", FieldType::String),
    Field::optional("status", FieldType::Enum(SHIPMENT_STATUSES)),
    Field::optional("carrier", FieldType::String),
];

const GET_SHIPMENT_TRACKING: &[Field] = &[
    Field::optional("order_id", FieldType::String),
    Field::optional("transaction_id", FieldType::String),
];

const CREATE_ORDER: &[Field] = &[
    Field::required("currencyCode", FieldType::Enum(CURRENCY_CODES)),
    Field::required("items", FieldType::Array { max_items: Some(50) }),
    Field::optional("discount", FieldType::Number),
    Field::optional("shippingCost", FieldType::Number),
    Field::optional("shippingAddress", FieldType::Object),
    Field::optional("notes", FieldType::String),
    Field::optional("returnUrl", FieldType::String),
    Field::optional("cancelUrl", FieldType::String),
];

const ORDER_ID: &[Field] = &[Field::required("id", FieldType::String)];

const LIST_DISPUTES: &[Field] = &[
    Field::optional("disputed_transaction_id", FieldType::String),
    Field::optional("dispute_state", FieldType::Enum(DISPUTE_STATES)),
    Field::optional("page_size", FieldType::Integer),
    Field::optional("page", FieldType::Integer),
];

const GET_DISPUTE: &[Field] = &[Field::required("dispute_id", FieldType::String)];

const ACCEPT_DISPUTE_CLAIM: &[Field] = &[
    Field::required("dispute_id", FieldType::String),
    Field::required("note", FieldType::String),
];

const LIST_TRANSACTIONS: &[Field] = &[
    Field::optional("transaction_id", FieldType::String),
    Field::optional("transaction_status", FieldType::Enum(TRANSACTION_STATUSES)),
    Field::optional("start_date", FieldType::String),
    Field::optional("end_date", FieldType::String),
    Field::optional("page_size", FieldType::Integer),
    Field::optional("page", FieldType::Integer),
];

fn capability(
    method: &'static str,
    description: &'static str,
    fields: &'static [Field],
    actions: &'static [(&'static str, &'static str)],
    handler: Arc<dyn crate::tools::Handler>,
) -> Capability {
    Capability {
        method,
        description,
        schema: Schema::new(fields),
        actions,
        handler,
    }
}

/// The full tool catalog, in catalog order. Enablement filtering happens in
/// [`crate::mcp::registry::Registry::build`].
pub fn capabilities() -> Vec<Capability> {
    vec![
        capability(
            "create_invoice",
            "Create a new invoice in the PayPal system.",
            CREATE_INVOICE,
            &[("invoices", "create")],
            Arc::new(handlers::invoices::CreateInvoice),
        ),
        capability(
            "list_invoices",
            "List invoices with optional pagination and filtering.",
            LIST_INVOICES,
            &[("invoices", "list")],
            Arc::new(handlers::invoices::ListInvoices),
        ),
        capability(
            "get_invoice",
            "Retrieve details of a specific invoice.",
            GET_INVOICE,
            &[("invoices", "get")],
            Arc::new(handlers::invoices::GetInvoice),
        ),
        capability(
            "send_invoice",
            "Send an invoice to recipients.",
            SEND_INVOICE,
            &[("invoices", "send")],
            Arc::new(handlers::invoices::SendInvoice),
        ),
        capability(
            "send_invoice_reminder",
            "Send a reminder for an existing invoice.",
            SEND_INVOICE_REMINDER,
            &[("invoices", "sendReminder")],
            Arc::new(handlers::invoices::SendInvoiceReminder),
        ),
        capability(
            "cancel_sent_invoice",
            "Cancel a sent invoice.",
            CANCEL_SENT_INVOICE,
            &[("invoices", "cancel")],
            Arc::new(handlers::invoices::CancelSentInvoice),
        ),
        capability(
            "generate_invoice_qr_code",
            "Generate a QR code for an invoice.",
            GENERATE_INVOICE_QR_CODE,
            &[("invoices", "generateQRC")],
            Arc::new(handlers::invoices::GenerateInvoiceQrCode),
        ),
        capability(
            "create_product",
            "Create a new product in the PayPal catalog.",
            CREATE_PRODUCT,
            &[("products", "create")],
            Arc::new(handlers::products::CreateProduct),
        ),
        capability(
            "list_products",
            "List products with optional pagination and filtering.",
            LIST_PRODUCTS,
            &[("products", "list")],
            Arc::new(handlers::products::ListProducts),
        ),
        capability(
            "show_product_details",
            "Retrieve details of a specific product.",
            SHOW_PRODUCT_DETAILS,
            &[("products", "show")],
            Arc::new(handlers::products::ShowProductDetails),
        ),
        capability(
            "update_product",
            "Update an existing product.",
            UPDATE_PRODUCT,
            &[("products", "update")],
            Arc::new(handlers::products::UpdateProduct),
        ),
        capability(
            "create_subscription_plan",
            "Create a new subscription plan.",
            CREATE_SUBSCRIPTION_PLAN,
            &[("subscriptionPlans", "create")],
            Arc::new(handlers::plans::CreateSubscriptionPlan),
        ),
        capability(
            "list_subscription_plans",
            "List subscription plans.",
            LIST_SUBSCRIPTION_PLANS,
            &[("subscriptionPlans", "list")],
            Arc::new(handlers::plans::ListSubscriptionPlans),
        ),
        capability(
            "show_subscription_plan_details",
            "Retrieve details of a specific subscription plan.",
            SHOW_SUBSCRIPTION_PLAN_DETAILS,
            &[("subscriptionPlans", "show")],
            Arc::new(handlers::plans::ShowSubscriptionPlanDetails),
        ),
        capability(
            "create_subscription",
            "Create a new subscription.",
            CREATE_SUBSCRIPTION,
            &[("subscriptions", "create")],
            Arc::new(handlers::subscriptions::CreateSubscription),
        ),
        capability(
            "show_subscription_details",
            "Retrieve details of a specific subscription.",
            SHOW_SUBSCRIPTION_DETAILS,
            &[("subscriptions", "show")],
            Arc::new(handlers::subscriptions::ShowSubscriptionDetails),
        ),
        capability(
            "cancel_subscription",
            "Cancel an active subscription.",
            CANCEL_SUBSCRIPTION,
            &[("subscriptions", "cancel")],
            Arc::new(handlers::subscriptions::CancelSubscription),
        ),
        capability(
            "create_shipment",
            "Create a shipment tracking record.",
            CREATE_SHIPMENT,
            &[("shipment", "create")],
            Arc::new(handlers::shipment::CreateShipment),
        ),
        capability(
            "get_shipment_tracking",
            "Retrieve shipment tracking information.",
            GET_SHIPMENT_TRACKING,
            &[("shipment", "get")],
            Arc::new(handlers::shipment::GetShipmentTracking),
        ),
        capability(
            "create_order",
            "Create an order in PayPal system based on provided details.",
            CREATE_ORDER,
            &[("orders", "create")],
            Arc::new(handlers::orders::CreateOrder),
        ),
        capability(
            "get_order",
            "Retrieve the details of an order.",
            ORDER_ID,
            &[("orders", "get")],
            Arc::new(handlers::orders::GetOrder),
        ),
        capability(
            "capture_order",
            "Capture payment for an authorized order.",
            ORDER_ID,
            &[("orders", "capture")],
            Arc::new(handlers::orders::CaptureOrder),
        ),
        capability(
            "list_disputes",
            "Retrieve a summary of all open disputes.",
            LIST_DISPUTES,
            &[("disputes", "list")],
            Arc::new(handlers::disputes::ListDisputes),
        ),
        capability(
            "get_dispute",
            "Retrieve detailed information of a specific dispute.",
            GET_DISPUTE,
            &[("disputes", "get")],
            Arc::new(handlers::disputes::GetDispute),
        ),
        capability(
            "accept_dispute_claim",
            "Accept a dispute claim.",
            ACCEPT_DISPUTE_CLAIM,
            &[("disputes", "create")],
            Arc::new(handlers::disputes::AcceptDisputeClaim),
        ),
        capability(
            "list_transactions",
            "List transactions with optional pagination and filtering.",
            LIST_TRANSACTIONS,
            &[("transactions", "list")],
            Arc::new(handlers::transactions::ListTransactions),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_26_unique_methods() {
        let catalog = capabilities();
        assert_eq!(catalog.len(), 26);
        let methods: HashSet<&str> = catalog.iter().map(|c| c.method).collect();
        assert_eq!(methods.len(), 26);
    }

    #[test]
    fn every_capability_has_a_governing_pair_and_description() {
        for capability in capabilities() {
            assert!(
                !capability.actions.is_empty(),
                "{} has no governing pair",
                capability.method
            );
            assert!(!capability.description.is_empty());
        }
    }
}
