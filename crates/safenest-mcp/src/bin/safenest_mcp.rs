//! SafeNest MCP server: the safety toolset over stdio.

use anyhow::Result;
use safenest_client::SafeNestClient;
use safenest_mcp::{McpHandler, McpServer, ToolRegistry};
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

    let handler = McpHandler::new(ToolRegistry::safety(), Arc::new(client));
    let server = McpServer::new(handler);

    eprintln!("SafeNest MCP server running on stdio");
    server.run().await?;

    Ok(())
}
