//! Data-governance tools
//!
//! Registered only by the compliance deployment: consent management,
//! erasure, export, rectification, audit logs, and breach records. The
//! backend owns all record keeping; these tools proxy and render.

use crate::format;
use crate::protocol::{Tool, ToolResult};
use crate::tools::{decode, SafeNestTool, ToolRegistry};
use crate::Result;
use async_trait::async_trait;
use safenest_client::types::*;
use safenest_client::SafeNestApi;
use serde::Deserialize;
use serde_json::{json, Value};

/// Register all data-governance tools
pub fn register_compliance_tools(registry: &mut ToolRegistry) {
    registry.register(Box::new(DeleteAccountData));
    registry.register(Box::new(ExportAccountData));
    registry.register(Box::new(RecordConsent));
    registry.register(Box::new(WithdrawConsent));
    registry.register(Box::new(GetConsentStatus));
    registry.register(Box::new(RectifyData));
    registry.register(Box::new(GetAuditLogs));
    registry.register(Box::new(LogBreach));
    registry.register(Box::new(ListBreaches));
    registry.register(Box::new(GetBreach));
    registry.register(Box::new(UpdateBreach));
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserArgs {
    user_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BreachArgs {
    breach_id: String,
}

/// Erase a user's data (right to erasure)
pub struct DeleteAccountData;

#[async_trait]
impl SafeNestTool for DeleteAccountData {
    fn definition(&self) -> Tool {
        Tool::new(
            "delete_account_data",
            "Request deletion of all data held for a user (right to erasure). \
             Returns a receipt with the erasure request status.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "userId": {
                    "type": "string",
                    "description": "ID of the user whose data should be deleted"
                },
                "reason": {
                    "type": "string",
                    "description": "Optional reason recorded with the request"
                }
            },
            "required": ["userId"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: ErasureRequest = decode(args)?;
        let receipt = api.delete_account_data(req).await?;
        Ok(ToolResult::text(format::erasure(&receipt)))
    }
}

/// Export a user's data (data portability)
pub struct ExportAccountData;

#[async_trait]
impl SafeNestTool for ExportAccountData {
    fn definition(&self) -> Tool {
        Tool::new(
            "export_account_data",
            "Export all data held for a user in a portable format. Returns a \
             time-limited download link.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "userId": {
                    "type": "string",
                    "description": "ID of the user whose data should be exported"
                },
                "format": {
                    "type": "string",
                    "enum": ["json", "csv"],
                    "description": "Export format (default: json)"
                }
            },
            "required": ["userId"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: ExportRequest = decode(args)?;
        let receipt = api.export_account_data(req).await?;
        Ok(ToolResult::text(format::export(&receipt)))
    }
}

/// Record a user's consent
pub struct RecordConsent;

#[async_trait]
impl SafeNestTool for RecordConsent {
    fn definition(&self) -> Tool {
        Tool::new(
            "record_consent",
            "Record a user's consent for a specific processing purpose.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "userId": {
                    "type": "string",
                    "description": "ID of the consenting user"
                },
                "consentType": {
                    "type": "string",
                    "description": "Processing purpose (e.g. analytics, monitoring)"
                }
            },
            "required": ["userId", "consentType"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: ConsentRequest = decode(args)?;
        let record = api.record_consent(req).await?;
        Ok(ToolResult::text(format::consent_update(&record)))
    }
}

/// Withdraw a previously recorded consent
pub struct WithdrawConsent;

#[async_trait]
impl SafeNestTool for WithdrawConsent {
    fn definition(&self) -> Tool {
        Tool::new(
            "withdraw_consent",
            "Withdraw a user's previously recorded consent for a processing purpose.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "userId": {
                    "type": "string",
                    "description": "ID of the user withdrawing consent"
                },
                "consentType": {
                    "type": "string",
                    "description": "Processing purpose to withdraw"
                }
            },
            "required": ["userId", "consentType"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: ConsentRequest = decode(args)?;
        let record = api.withdraw_consent(req).await?;
        Ok(ToolResult::text(format::consent_update(&record)))
    }
}

/// Current consent status for a user
pub struct GetConsentStatus;

#[async_trait]
impl SafeNestTool for GetConsentStatus {
    fn definition(&self) -> Tool {
        Tool::new(
            "get_consent_status",
            "Get the current consent status for a user across all processing purposes.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "userId": {
                    "type": "string",
                    "description": "ID of the user to look up"
                }
            },
            "required": ["userId"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let args: UserArgs = decode(args)?;
        let status = api.get_consent_status(&args.user_id).await?;
        Ok(ToolResult::text(format::consent_status(&status)))
    }
}

/// Correct inaccurate user data (right to rectification)
pub struct RectifyData;

#[async_trait]
impl SafeNestTool for RectifyData {
    fn definition(&self) -> Tool {
        Tool::new(
            "rectify_data",
            "Correct inaccurate data held for a user (right to rectification).",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "userId": {
                    "type": "string",
                    "description": "ID of the user whose data should be corrected"
                },
                "corrections": {
                    "type": "object",
                    "description": "Field name to corrected value"
                }
            },
            "required": ["userId", "corrections"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: RectifyRequest = decode(args)?;
        let receipt = api.rectify_data(req).await?;
        Ok(ToolResult::text(format::rectification(&receipt)))
    }
}

/// Data-processing audit trail
pub struct GetAuditLogs;

#[async_trait]
impl SafeNestTool for GetAuditLogs {
    fn definition(&self) -> Tool {
        Tool::new(
            "get_audit_logs",
            "Retrieve the data-processing audit trail, optionally filtered by user.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "userId": {
                    "type": "string",
                    "description": "Only return entries concerning this user"
                },
                "limit": {
                    "type": "number",
                    "description": "Maximum number of entries to return"
                }
            },
            "required": []
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let query: AuditLogQuery = decode(args)?;
        let page = api.get_audit_logs(query).await?;
        Ok(ToolResult::text(format::audit_logs(&page)))
    }
}

/// Log a new data breach
pub struct LogBreach;

#[async_trait]
impl SafeNestTool for LogBreach {
    fn definition(&self) -> Tool {
        Tool::new(
            "log_breach",
            "Log a new data breach incident with severity, scope, and affected data categories.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "description": {
                    "type": "string",
                    "description": "What happened"
                },
                "severity": {
                    "type": "string",
                    "enum": ["low", "medium", "high", "critical"],
                    "description": "Severity of the breach"
                },
                "affectedUsers": {
                    "type": "number",
                    "description": "Number of users affected"
                },
                "dataCategories": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Data categories involved (e.g. emails, messages)"
                }
            },
            "required": ["description", "severity", "affectedUsers"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: LogBreachRequest = decode(args)?;
        let record = api.log_breach(req).await?;
        Ok(ToolResult::text(format::breach(&record)))
    }
}

/// List all recorded breaches
pub struct ListBreaches;

#[async_trait]
impl SafeNestTool for ListBreaches {
    fn definition(&self) -> Tool {
        Tool::new("list_breaches", "List all recorded data breach incidents.")
    }

    async fn execute(&self, _args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let list = api.list_breaches().await?;
        Ok(ToolResult::text(format::breach_list(&list)))
    }
}

/// Fetch one breach record
pub struct GetBreach;

#[async_trait]
impl SafeNestTool for GetBreach {
    fn definition(&self) -> Tool {
        Tool::new("get_breach", "Get the full record of a single data breach incident.")
            .with_schema(json!({
                "type": "object",
                "properties": {
                    "breachId": {
                        "type": "string",
                        "description": "ID of the breach record"
                    }
                },
                "required": ["breachId"]
            }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let args: BreachArgs = decode(args)?;
        let record = api.get_breach(&args.breach_id).await?;
        Ok(ToolResult::text(format::breach(&record)))
    }
}

/// Update a breach record's status or notes
pub struct UpdateBreach;

#[async_trait]
impl SafeNestTool for UpdateBreach {
    fn definition(&self) -> Tool {
        Tool::new(
            "update_breach",
            "Update the status or notes of an existing data breach record.",
        )
        .with_schema(json!({
            "type": "object",
            "properties": {
                "breachId": {
                    "type": "string",
                    "description": "ID of the breach record to update"
                },
                "status": {
                    "type": "string",
                    "enum": ["open", "investigating", "contained", "resolved"],
                    "description": "New status"
                },
                "notes": {
                    "type": "string",
                    "description": "Investigation notes to append"
                }
            },
            "required": ["breachId"]
        }))
    }

    async fn execute(&self, args: Value, api: &dyn SafeNestApi) -> Result<ToolResult> {
        let req: UpdateBreachRequest = decode(args)?;
        let record = api.update_breach(req).await?;
        Ok(ToolResult::text(format::breach(&record)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StubApi;
    use crate::protocol::ToolCall;

    const COMPLIANCE_ONLY: [&str; 11] = [
        "delete_account_data",
        "export_account_data",
        "get_audit_logs",
        "get_breach",
        "get_consent_status",
        "list_breaches",
        "log_breach",
        "record_consent",
        "rectify_data",
        "update_breach",
        "withdraw_consent",
    ];

    #[test]
    fn test_compliance_registry_is_superset_of_safety() {
        let safety: Vec<String> = ToolRegistry::safety()
            .definitions()
            .into_iter()
            .map(|t| t.name)
            .collect();
        let compliance: Vec<String> = ToolRegistry::compliance()
            .definitions()
            .into_iter()
            .map(|t| t.name)
            .collect();

        assert_eq!(compliance.len(), safety.len() + COMPLIANCE_ONLY.len());
        for name in &safety {
            assert!(compliance.contains(name), "{} missing", name);
        }
        for name in COMPLIANCE_ONLY {
            assert!(compliance.iter().any(|n| n == name), "{} missing", name);
        }
    }

    #[tokio::test]
    async fn test_withdraw_consent_renders_withdrawal() {
        let api = StubApi::new();
        let registry = ToolRegistry::compliance();
        let call = ToolCall {
            name: "withdraw_consent".to_string(),
            arguments: json!({ "userId": "u_1", "consentType": "analytics" }),
        };

        let result = registry.execute(&call, &api).await.unwrap();
        assert!(result.content[0].text.contains("## 🚫 Consent Withdrawn"));
    }

    #[tokio::test]
    async fn test_log_breach_renders_record() {
        let api = StubApi::new();
        let registry = ToolRegistry::compliance();
        let call = ToolCall {
            name: "log_breach".to_string(),
            arguments: json!({
                "description": "vendor leak",
                "severity": "high",
                "affectedUsers": 1200,
                "dataCategories": ["emails"]
            }),
        };

        let result = registry.execute(&call, &api).await.unwrap();
        let text = &result.content[0].text;
        assert!(text.contains("## 🚨 Data Breach Record"));
        assert!(text.contains("**Severity:** 🔴 High"));
    }
}
