//! MCP server
//!
//! Line-delimited JSON-RPC over stdio. One request per line; responses are
//! flushed immediately so the client never waits on a buffer. Lines that
//! fail to parse are logged and skipped; the loop ends at EOF.

use crate::handler::McpHandler;
use crate::protocol::{McpRequest, McpResponse};
use crate::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// MCP server over stdio
pub struct McpServer {
    handler: McpHandler,
}

impl McpServer {
    /// Create a server around a handler
    pub fn new(handler: McpHandler) -> Self {
        Self { handler }
    }

    /// Run the server until stdin closes
    pub async fn run(&self) -> Result<()> {
        let stdin = tokio::io::stdin();
        let mut stdout = tokio::io::stdout();
        let mut lines = BufReader::new(stdin).lines();

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match serde_json::from_str::<McpRequest>(line) {
                Ok(request) => {
                    if let Some(response) = self.handler.handle(&request).await {
                        let json = serde_json::to_string(&response)?;
                        stdout.write_all(json.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;
                    }
                }
                Err(e) => {
                    tracing::warn!("failed to parse request: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Handle a single request (for testing)
    pub async fn handle_request(&self, request: &McpRequest) -> Option<McpResponse> {
        self.handler.handle(request).await
    }

    /// Get the handler
    pub fn handler(&self) -> &McpHandler {
        &self.handler
    }
}
