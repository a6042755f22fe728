//! SafeNest compliance MCP server: safety plus data-governance tools.

use anyhow::Result;
use safenest_client::SafeNestClient;
use safenest_mcp::{McpHandler, McpServer, ServerInfo, ToolRegistry};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let client = match SafeNestClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let handler = McpHandler::new(ToolRegistry::compliance(), Arc::new(client))
        .with_server_info(ServerInfo::new("safenest-compliance-mcp"));
    let server = McpServer::new(handler);

    eprintln!("SafeNest compliance MCP server running on stdio");
    server.run().await?;

    Ok(())
}
