//! Request payload types for the PayPal REST endpoints.

pub mod dispute;
pub mod invoice;
pub mod order;
pub mod plan;
pub mod product;
pub mod shipment;
pub mod subscription;
pub mod transaction;

pub use dispute::{AcceptDisputeClaimRequest, DisputeState, ListDisputesParams};
pub use invoice::{
    CancelSentInvoiceRequest, CreateInvoiceRequest, GenerateInvoiceQrCodeRequest, InvoiceDetail,
    ListInvoicesParams, SendInvoiceReminderRequest, SendInvoiceRequest,
};
pub use order::{CreateOrderRequest, OrderItem, OrderShippingAddress};
pub use plan::{CreatePlanRequest, ListPlansParams};
pub use product::{CreateProductRequest, ListProductsParams, ProductType, UpdateProductRequest};
pub use shipment::{CreateShipmentRequest, GetShipmentTrackingParams, ShipmentStatus};
pub use subscription::{CancellationReason, CancelSubscriptionRequest, CreateSubscriptionRequest};
pub use transaction::{ListTransactionsParams, TransactionStatus};
