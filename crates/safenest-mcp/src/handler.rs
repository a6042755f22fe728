//! MCP request handler
//!
//! Routes incoming requests to the tool registry. Per-call faults stay
//! inside the tool-result envelope: an unknown tool or a backend failure
//! comes back as an error-flagged result, never as a process fault.

use crate::protocol::{
    error_codes, McpRequest, McpResponse, ServerCapabilities, ServerInfo, ToolCall, ToolResult,
};
use crate::tools::ToolRegistry;
use crate::Error;
use safenest_client::SafeNestApi;
use serde_json::{json, Value};
use std::sync::Arc;

/// Handler for MCP requests
pub struct McpHandler {
    registry: ToolRegistry,
    api: Arc<dyn SafeNestApi>,
    server_info: ServerInfo,
    capabilities: ServerCapabilities,
}

impl McpHandler {
    /// Create a handler over a registry and a backend client handle
    pub fn new(registry: ToolRegistry, api: Arc<dyn SafeNestApi>) -> Self {
        Self {
            registry,
            api,
            server_info: ServerInfo::default(),
            capabilities: ServerCapabilities::default(),
        }
    }

    /// Override the advertised server info
    pub fn with_server_info(mut self, server_info: ServerInfo) -> Self {
        self.server_info = server_info;
        self
    }

    /// Handle an MCP request. Returns `None` for notifications.
    pub async fn handle(&self, request: &McpRequest) -> Option<McpResponse> {
        if request.is_notification() {
            return None;
        }

        let response = match request.method.as_str() {
            "initialize" => self.handle_initialize(request),
            "tools/list" => self.handle_tools_list(request),
            "tools/call" => self.handle_tools_call(request).await,
            _ => McpResponse::error(
                request.id.clone(),
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            ),
        };

        Some(response)
    }

    fn handle_initialize(&self, request: &McpRequest) -> McpResponse {
        McpResponse::success(
            request.id.clone(),
            json!({
                "protocolVersion": "2024-11-05",
                "serverInfo": self.server_info,
                "capabilities": self.capabilities
            }),
        )
    }

    fn handle_tools_list(&self, request: &McpRequest) -> McpResponse {
        let tools: Vec<Value> = self
            .registry
            .definitions()
            .into_iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect();

        McpResponse::success(request.id.clone(), json!({ "tools": tools }))
    }

    async fn handle_tools_call(&self, request: &McpRequest) -> McpResponse {
        let params = match &request.params {
            Some(p) => p,
            None => {
                return McpResponse::error(
                    request.id.clone(),
                    error_codes::INVALID_PARAMS,
                    "Missing params",
                )
            }
        };

        let tool_name = match params.get("name").and_then(|v| v.as_str()) {
            Some(n) => n,
            None => {
                return McpResponse::error(
                    request.id.clone(),
                    error_codes::INVALID_PARAMS,
                    "Missing tool name",
                )
            }
        };

        let call = ToolCall {
            name: tool_name.to_string(),
            arguments: params.get("arguments").cloned().unwrap_or(json!({})),
        };

        let result = match self.registry.execute(&call, self.api.as_ref()).await {
            Ok(result) => result,
            Err(Error::ToolNotFound(name)) => {
                ToolResult::error(format!("Unknown tool: {}", name))
            }
            Err(e) => {
                tracing::warn!(tool = %call.name, "tool call failed: {}", e);
                ToolResult::error(format!("Error: {}", e.fault_message()))
            }
        };

        // Serialize the ToolResult itself so a None error flag stays off
        // the wire instead of becoming `"isError": null`.
        match serde_json::to_value(&result) {
            Ok(payload) => McpResponse::success(request.id.clone(), payload),
            Err(e) => McpResponse::error(
                request.id.clone(),
                error_codes::INTERNAL_ERROR,
                format!("Failed to encode tool result: {}", e),
            ),
        }
    }

    /// Get the tool registry
    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubApi;

    fn handler() -> McpHandler {
        McpHandler::new(ToolRegistry::safety(), Arc::new(StubApi::new()))
    }

    fn failing_handler(message: &str) -> McpHandler {
        McpHandler::new(
            ToolRegistry::safety(),
            Arc::new(StubApi::failing_with(message)),
        )
    }

    fn result_text(response: &McpResponse) -> String {
        let result = response.result.as_ref().unwrap();
        result["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_initialize() {
        let request = McpRequest::new("initialize").with_id(1);

        let response = handler().handle(&request).await.unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["protocolVersion"], "2024-11-05");
        assert_eq!(result["serverInfo"]["name"], "safenest-mcp");
    }

    #[tokio::test]
    async fn test_tools_list() {
        let request = McpRequest::new("tools/list").with_id(1);

        let response = handler().handle(&request).await.unwrap();
        let result = response.result.unwrap();
        let tools = result["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 7);
        assert!(tools.iter().all(|t| t["inputSchema"]["type"] == "object"));
    }

    #[tokio::test]
    async fn test_tools_call_success() {
        let request = McpRequest::new("tools/call").with_id(1).with_params(json!({
            "name": "detect_bullying",
            "arguments": { "content": "you are worthless" }
        }));

        let response = handler().handle(&request).await.unwrap();
        let result = response.result.unwrap();
        assert_ne!(result["isError"], true);
        assert!(result["content"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Bullying Detected"));
    }

    #[tokio::test]
    async fn test_tools_call_success_omits_error_flag() {
        let request = McpRequest::new("tools/call").with_id(1).with_params(json!({
            "name": "detect_bullying",
            "arguments": { "content": "you are worthless" }
        }));

        let response = handler().handle(&request).await.unwrap();
        let result = response.result.unwrap();
        // No "isError" key at all on success, not a JSON null.
        assert!(!result.as_object().unwrap().contains_key("isError"));
    }

    #[tokio::test]
    async fn test_unknown_tool_is_error_result_not_protocol_fault() {
        let request = McpRequest::new("tools/call").with_id(1).with_params(json!({
            "name": "frobnicate",
            "arguments": {}
        }));

        let response = handler().handle(&request).await.unwrap();
        assert!(response.error.is_none());

        let result = response.result.as_ref().unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result_text(&response), "Unknown tool: frobnicate");
    }

    #[tokio::test]
    async fn test_backend_fault_is_wrapped() {
        let request = McpRequest::new("tools/call").with_id(1).with_params(json!({
            "name": "analyze",
            "arguments": { "content": "hello" }
        }));

        let response = failing_handler("boom").handle(&request).await.unwrap();
        let result = response.result.as_ref().unwrap();
        assert_eq!(result["isError"], true);
        assert_eq!(result_text(&response), "Error: boom");
    }

    #[tokio::test]
    async fn test_backend_fault_without_message() {
        let request = McpRequest::new("tools/call").with_id(1).with_params(json!({
            "name": "analyze",
            "arguments": { "content": "hello" }
        }));

        let response = failing_handler("").handle(&request).await.unwrap();
        assert_eq!(result_text(&response), "Error: Unknown error");
    }

    #[tokio::test]
    async fn test_invalid_arguments_use_same_envelope() {
        let request = McpRequest::new("tools/call").with_id(1).with_params(json!({
            "name": "detect_bullying",
            "arguments": { "wrong": true }
        }));

        let response = handler().handle(&request).await.unwrap();
        let result = response.result.as_ref().unwrap();
        assert_eq!(result["isError"], true);
        assert!(result_text(&response).starts_with("Error: "));
    }

    #[tokio::test]
    async fn test_missing_params() {
        let request = McpRequest::new("tools/call").with_id(1);

        let response = handler().handle(&request).await.unwrap();
        assert_eq!(
            response.error.unwrap().code,
            error_codes::INVALID_PARAMS
        );
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let request = McpRequest::new("unknown/method").with_id(1);

        let response = handler().handle(&request).await.unwrap();
        assert_eq!(
            response.error.unwrap().code,
            error_codes::METHOD_NOT_FOUND
        );
    }

    #[tokio::test]
    async fn test_notification_gets_no_response() {
        let note = McpRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        };

        assert!(handler().handle(&note).await.is_none());
    }
}
