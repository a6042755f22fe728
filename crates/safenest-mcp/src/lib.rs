//! # SafeNest MCP
//!
//! Model Context Protocol server for the SafeNest child-safety API.
//! Exposes detection, guidance, and data-governance capabilities as tools.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                          MCP SERVER                                │
//! ├────────────────────────────────────────────────────────────────────┤
//! │                                                                    │
//! │  MCP CLIENT ◄──── JSON-RPC over stdio ────┐                        │
//! │       │                                   │                        │
//! │       ▼                                   │                        │
//! │  ┌──────────────────────────────────────┐ │                        │
//! │  │            TOOL REGISTRY             │ │                        │
//! │  │                                      │ │                        │
//! │  │  detect_bullying    → verdict        │ │                        │
//! │  │  detect_grooming    → risk flags     │ │                        │
//! │  │  detect_unsafe      → categories     │ │                        │
//! │  │  analyze            → combined scan  │ │                        │
//! │  │  analyze_emotions   → emotion scores │ │                        │
//! │  │  get_action_plan    → guidance steps │ │                        │
//! │  │  generate_report    → incident report│ │                        │
//! │  │  (+ compliance: consent, erasure,    │ │                        │
//! │  │     export, rectify, audit, breach)  │ │                        │
//! │  └──────────────────────────────────────┘ │                        │
//! │                     │                     │                        │
//! │                     ▼                     │                        │
//! │  ┌──────────────────────────────────────┐ │                        │
//! │  │        safenest-client (HTTPS)       │─┘                        │
//! │  │  all detection logic is backend-side │                          │
//! │  └──────────────────────────────────────┘                          │
//! │                                                                    │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Two deployments share this library: the safety server registers the
//! detection toolset, the compliance server registers the detection toolset
//! plus the data-governance tools. A per-call fault never takes the process
//! down; it comes back to the caller as an error-flagged tool result.

pub mod compliance_tools;
pub mod format;
pub mod handler;
pub mod protocol;
pub mod server;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use handler::McpHandler;
pub use protocol::{McpRequest, McpResponse, ServerInfo, Tool, ToolCall, ToolResult};
pub use server::McpServer;
pub use tools::{SafeNestTool, ToolRegistry};

/// Result type for safenest-mcp operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in safenest-mcp
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Client(#[from] safenest_client::Error),
}

impl Error {
    /// Text surfaced to the caller in an `"Error: <msg>"` tool result.
    ///
    /// Backend faults report their raw message (or `"Unknown error"` when
    /// the backend supplied none); argument-decode faults report the serde
    /// message. The two are indistinguishable to the caller.
    pub fn fault_message(&self) -> String {
        match self {
            Self::Client(e) => e.message(),
            Self::InvalidParameters(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
