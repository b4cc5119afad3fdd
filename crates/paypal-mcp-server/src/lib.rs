//! PayPal MCP Server
//!
//! MCP server exposing PayPal invoicing, catalog, billing, checkout,
//! shipping, dispute and reporting operations as tools. Messages are
//! exchanged over stdio using Content-Length framed JSON.

pub mod catalog;
pub mod config;
pub mod handlers;
pub mod mcp;
pub mod server;
pub mod tools;

// Re-exports
pub use config::ServerConfig;
pub use server::PayPalMcpServer;

#[cfg(test)]
mod tests;
