pub mod disputes;
pub mod invoices;
pub mod orders;
pub mod plans;
pub mod products;
pub mod shipment;
pub mod subscriptions;
pub mod transactions;
