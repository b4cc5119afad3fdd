use anyhow::Result;
use clap::Parser;
use paypal_mcp_server::{PayPalMcpServer, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "paypal-mcp-server", version, about = "PayPal MCP Server")]
struct Cli {
    /// Comma-separated list of tools to enable, or 'all' for all tools
    #[arg(long)]
    tools: String,

    /// PayPal API access token (falls back to PAYPAL_ACCESS_TOKEN)
    #[arg(long)]
    access_token: Option<String>,

    /// PayPal environment: SANDBOX or PRODUCTION (falls back to PAYPAL_ENVIRONMENT)
    #[arg(long)]
    paypal_environment: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Log to stderr to keep stdout clean for MCP messages
        .json()
        .init();

    let config = ServerConfig::from_args(&cli.tools, cli.access_token, cli.paypal_environment)?;
    info!(
        mode = if config.sandbox { "Sandbox" } else { "Production" },
        "Starting PayPal MCP Server"
    );

    let server = PayPalMcpServer::new(config)?;
    server.run().await?;
    Ok(())
}
