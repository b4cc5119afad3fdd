//! PayPal REST API client library
//!
//! This crate provides a Rust client for the PayPal REST API, covering the
//! invoicing, catalog, billing, checkout, shipping, dispute and reporting
//! endpoints used by the MCP server.

pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-exports
pub use client::PayPalClient;
pub use config::Config;
pub use error::PayPalError;

pub type Result<T> = std::result::Result<T, PayPalError>;
