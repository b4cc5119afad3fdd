use crate::mcp::registry::Actions;
use anyhow::{bail, Context, Result};

/// The tool ids accepted by `--tools`, as `product.action` pairs.
pub const ACCEPTED_TOOLS: &[&str] = &[
    "invoices.create",
    "invoices.list",
    "invoices.get",
    "invoices.send",
    "invoices.sendReminder",
    "invoices.cancel",
    "invoices.generateQRC",
    "orders.create",
    "orders.get",
    "orders.capture",
    "disputes.list",
    "disputes.get",
    "disputes.create",
    "shipment.create",
    "shipment.get",
    "products.create",
    "products.list",
    "products.update",
    "products.show",
    "subscriptionPlans.create",
    "subscriptionPlans.list",
    "subscriptionPlans.show",
    "subscriptions.create",
    "subscriptions.show",
    "subscriptions.cancel",
    "transactions.list",
];

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// The enablement map handed to the registry.
    pub actions: Actions,
    pub access_token: String,
    pub sandbox: bool,
}

impl ServerConfig {
    /// Builds the configuration from CLI arguments with environment
    /// fallbacks (`PAYPAL_ACCESS_TOKEN`, `PAYPAL_ENVIRONMENT`). Anything
    /// other than `PRODUCTION` means sandbox.
    pub fn from_args(
        tools: &str,
        access_token: Option<String>,
        environment: Option<String>,
    ) -> Result<Self> {
        let actions = parse_tools(tools)?;

        let access_token = access_token
            .or_else(|| std::env::var("PAYPAL_ACCESS_TOKEN").ok())
            .context(
                "PayPal access token not provided. Provide it via the --access-token argument \
                 or set the PAYPAL_ACCESS_TOKEN environment variable",
            )?;

        let environment = environment
            .or_else(|| std::env::var("PAYPAL_ENVIRONMENT").ok())
            .unwrap_or_else(|| "SANDBOX".to_string());
        let sandbox = !environment.eq_ignore_ascii_case("PRODUCTION");

        Ok(Self {
            actions,
            access_token,
            sandbox,
        })
    }
}

/// Parses the `--tools` argument (comma-separated `product.action` ids, or
/// `all`) into the enablement map. Unknown ids are a startup error.
pub fn parse_tools(tools: &str) -> Result<Actions> {
    let requested: Vec<&str> = tools.split(',').map(str::trim).collect();

    for id in &requested {
        if *id != "all" && !ACCEPTED_TOOLS.contains(id) {
            bail!(
                "Invalid tool: {id}. Accepted tools are: all, {}",
                ACCEPTED_TOOLS.join(", ")
            );
        }
    }

    let enabled: Vec<&str> = if requested.contains(&"all") {
        ACCEPTED_TOOLS.to_vec()
    } else {
        requested
    };

    let mut actions = Actions::new();
    for id in enabled {
        let Some((product, action)) = id.split_once('.') else {
            bail!("Invalid tool: {id}");
        };
        actions
            .entry(product.to_string())
            .or_default()
            .insert(action.to_string(), true);
    }
    Ok(actions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_enables_every_accepted_tool() {
        let actions = parse_tools("all").unwrap();
        let enabled: usize = actions.values().map(|entries| entries.len()).sum();
        assert_eq!(enabled, ACCEPTED_TOOLS.len());
        assert_eq!(actions["invoices"]["create"], true);
        assert_eq!(actions["transactions"]["list"], true);
    }

    #[test]
    fn explicit_list_enables_only_those_tools() {
        let actions = parse_tools("invoices.create, orders.capture").unwrap();
        assert_eq!(actions["invoices"]["create"], true);
        assert_eq!(actions["orders"]["capture"], true);
        assert!(actions.get("disputes").is_none());
        assert!(actions["invoices"].get("list").is_none());
    }

    #[test]
    fn unknown_tool_is_rejected_with_accepted_list() {
        let err = parse_tools("invoices.create,payouts.create").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("Invalid tool: payouts.create"));
        assert!(message.contains("invoices.create"));
    }

    #[test]
    fn environment_defaults_to_sandbox() {
        let config = ServerConfig::from_args(
            "invoices.create",
            Some("token".to_string()),
            Some("SANDBOX".to_string()),
        )
        .unwrap();
        assert!(config.sandbox);

        let config = ServerConfig::from_args(
            "invoices.create",
            Some("token".to_string()),
            Some("PRODUCTION".to_string()),
        )
        .unwrap();
        assert!(!config.sandbox);
    }
}
