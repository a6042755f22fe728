//! SafeNest safety tools
//!
//! Each tool decodes its arguments into a typed request, makes exactly one
//! backend call, and renders the result through the formatter. The registry
//! doubles as the dispatch table, so a registered name always has a handler.

use crate::format;
use crate::protocol::{Tool, ToolCall, ToolResult};
use crate::{Error, Result};
use async_trait::async_trait;
use safenest_client::types::*;
use safenest_client::SafeNestApi;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;

/// A SafeNest tool implementation
#[async_trait]
pub trait SafeNestTool: Send + Sync {
    /// Get the tool definition
    fn definition(&self) -> Tool;

    /// Execute the tool against the backend
    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult>;
}

/// Decode caller arguments into a typed request record
pub(crate) fn decode<T: DeserializeOwned>(args: Value) -> Result<T> {
    serde_json::from_value(args).map_err(|e| Error::InvalidParameters(e.to_string()))
}

/// Registry of available tools
pub struct ToolRegistry {
    tools: HashMap<String, Box<dyn SafeNestTool>>,
}

impl ToolRegistry {
    fn empty() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Registry for the safety deployment: detection and guidance tools
    pub fn safety() -> Self {
        let mut registry = Self::empty();

        registry.register(Box::new(DetectBullying));
        registry.register(Box::new(DetectGrooming));
        registry.register(Box::new(DetectUnsafe));
        registry.register(Box::new(Analyze));
        registry.register(Box::new(AnalyzeEmotions));
        registry.register(Box::new(GetActionPlan));
        registry.register(Box::new(GenerateReport));

        registry
    }

    /// Registry for the compliance deployment: safety plus data governance
    pub fn compliance() -> Self {
        let mut registry = Self::safety();
        crate::compliance_tools::register_compliance_tools(&mut registry);
        registry
    }

    /// Register a tool
    pub fn register(&mut self, tool: Box<dyn SafeNestTool>) {
        let name = tool.definition().name.clone();
        self.tools.insert(name, tool);
    }

    /// All tool definitions, sorted by name for stable listings
    pub fn definitions(&self) -> Vec<Tool> {
        let mut defs: Vec<Tool> = self.tools.values().map(|t| t.definition()).collect();
        defs.sort_by(|a, b| a.name.cmp(&b.name));
        defs
    }

    /// Execute a tool call
    pub async fn execute(&self, call: &ToolCall, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let tool = self
            .tools
            .get(&call.name)
            .ok_or_else(|| Error::ToolNotFound(call.name.clone()))?;

        tool.execute(call.arguments.clone(), api).await
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&dyn SafeNestTool> {
        self.tools.get(name).map(|t| t.as_ref())
    }
}

// ============== Detection tools ==============

/// Analyze text for bullying and harassment
pub struct DetectBullying;

#[async_trait]
impl SafeNestTool for DetectBullying {
    fn definition(&self) -> Tool {
        Tool::new(
            "detect_bullying",
            "Analyze text content to detect bullying, harassment, or harmful language. \
             Returns severity, type of bullying, confidence score, and recommended actions.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "The text content to analyze for bullying"
                },
                "context": {
                    "type": "object",
                    "description": "Optional context for better analysis",
                    "properties": {
                        "language": { "type": "string" },
                        "ageGroup": { "type": "string" },
                        "relationship": { "type": "string" },
                        "platform": { "type": "string" }
                    }
                }
            },
            "required": ["content"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: DetectBullyingRequest = decode(args)?;
        let verdict = api.detect_bullying(req).await?;
        Ok(ToolResult::text(format::bullying(&verdict)))
    }
}

/// Analyze a conversation for grooming patterns
pub struct DetectGrooming;

#[async_trait]
impl SafeNestTool for DetectGrooming {
    fn definition(&self) -> Tool {
        Tool::new(
            "detect_grooming",
            "Analyze a conversation for grooming patterns and predatory behavior. \
             Identifies manipulation tactics, boundary violations, and isolation attempts.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "messages": {
                    "type": "array",
                    "description": "Array of messages in the conversation",
                    "items": {
                        "type": "object",
                        "properties": {
                            "role": {
                                "type": "string",
                                "enum": ["adult", "child", "unknown"],
                                "description": "Role of the message sender"
                            },
                            "content": {
                                "type": "string",
                                "description": "Message content"
                            }
                        },
                        "required": ["role", "content"]
                    }
                },
                "childAge": {
                    "type": "number",
                    "description": "Age of the child in the conversation"
                }
            },
            "required": ["messages"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: DetectGroomingRequest = decode(args)?;
        let verdict = api.detect_grooming(req).await?;
        Ok(ToolResult::text(format::grooming(&verdict)))
    }
}

/// Detect unsafe content categories
pub struct DetectUnsafe;

#[async_trait]
impl SafeNestTool for DetectUnsafe {
    fn definition(&self) -> Tool {
        Tool::new(
            "detect_unsafe",
            "Detect unsafe content including self-harm, violence, drugs, explicit material, \
             or other harmful content categories.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "The text content to analyze for unsafe content"
                },
                "context": {
                    "type": "object",
                    "description": "Optional context for better analysis",
                    "properties": {
                        "language": { "type": "string" },
                        "ageGroup": { "type": "string" },
                        "platform": { "type": "string" }
                    }
                }
            },
            "required": ["content"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: DetectUnsafeRequest = decode(args)?;
        let verdict = api.detect_unsafe(req).await?;
        Ok(ToolResult::text(format::unsafe_content(&verdict)))
    }
}

/// Combined bullying + unsafe screening
pub struct Analyze;

#[async_trait]
impl SafeNestTool for Analyze {
    fn definition(&self) -> Tool {
        Tool::new(
            "analyze",
            "Quick comprehensive safety analysis that checks for both bullying and unsafe \
             content. Best for general content screening.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "The text content to analyze"
                },
                "include": {
                    "type": "array",
                    "items": { "type": "string", "enum": ["bullying", "unsafe"] },
                    "description": "Which checks to run (default: both)"
                }
            },
            "required": ["content"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: AnalyzeRequest = decode(args)?;
        let result = api.analyze(req).await?;
        Ok(ToolResult::text(format::analysis(&result)))
    }
}

/// Emotional content and mental-state analysis
pub struct AnalyzeEmotions;

#[async_trait]
impl SafeNestTool for AnalyzeEmotions {
    fn definition(&self) -> Tool {
        Tool::new(
            "analyze_emotions",
            "Analyze emotional content and mental state indicators. Identifies dominant \
             emotions, trends, and provides follow-up recommendations.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "content": {
                    "type": "string",
                    "description": "The text content to analyze for emotions"
                }
            },
            "required": ["content"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: AnalyzeEmotionsRequest = decode(args)?;
        let report = api.analyze_emotions(req).await?;
        Ok(ToolResult::text(format::emotions(&report)))
    }
}

/// Age-appropriate guidance for a safety situation
pub struct GetActionPlan;

#[async_trait]
impl SafeNestTool for GetActionPlan {
    fn definition(&self) -> Tool {
        Tool::new(
            "get_action_plan",
            "Generate age-appropriate guidance and action steps for handling a safety \
             situation. Tailored for children, parents, or educators.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "situation": {
                    "type": "string",
                    "description": "Description of the situation needing guidance"
                },
                "childAge": {
                    "type": "number",
                    "description": "Age of the child involved"
                },
                "audience": {
                    "type": "string",
                    "enum": ["child", "parent", "educator", "platform"],
                    "description": "Who the guidance is for (default: parent)"
                },
                "severity": {
                    "type": "string",
                    "enum": ["low", "medium", "high", "critical"],
                    "description": "Severity of the situation"
                }
            },
            "required": ["situation"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: ActionPlanRequest = decode(args)?;
        let plan = api.get_action_plan(req).await?;
        Ok(ToolResult::text(format::action_plan(&plan)))
    }
}

/// Incident report generation from a conversation
pub struct GenerateReport;

#[async_trait]
impl SafeNestTool for GenerateReport {
    fn definition(&self) -> Tool {
        Tool::new(
            "generate_report",
            "Generate a comprehensive incident report from a conversation. Includes summary, \
             risk level, and recommended next steps.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "messages": {
                    "type": "array",
                    "description": "Array of messages in the incident",
                    "items": {
                        "type": "object",
                        "properties": {
                            "sender": { "type": "string", "description": "Name/ID of sender" },
                            "content": { "type": "string", "description": "Message content" }
                        },
                        "required": ["sender", "content"]
                    }
                },
                "childAge": {
                    "type": "number",
                    "description": "Age of the child involved"
                },
                "incidentType": {
                    "type": "string",
                    "description": "Type of incident (e.g., bullying, grooming)"
                }
            },
            "required": ["messages"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: GenerateReportRequest = decode(args)?;
        let report = api.generate_report(req).await?;
        Ok(ToolResult::text(format::report(&report)))
    }
}
