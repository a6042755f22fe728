//! SafeNest API payload types
//!
//! Request bodies serialize with camelCase keys (the API's argument
//! convention); detection results come back snake_case. Severity, risk and
//! trend labels stay open strings: the closed-set interpretation belongs to
//! the presentation layer, and an unrecognized label from the backend must
//! not turn into a decode failure here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============== Detection requests ==============

/// Optional context sent alongside detection requests
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectBullyingRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<AnalysisContext>,
}

/// One message in a conversation under grooming analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Sender role: "adult", "child" or "unknown"
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectGroomingRequest {
    pub messages: Vec<ConversationMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_age: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectUnsafeRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<AnalysisContext>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub content: String,
    /// Which checks to run ("bullying", "unsafe"); both when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeEmotionsRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPlanRequest {
    pub situation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_age: Option<u32>,
    /// "child", "parent", "educator" or "platform"; backend defaults to parent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audience: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
}

/// One message in an incident under report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentMessage {
    pub sender: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateReportRequest {
    pub messages: Vec<IncidentMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_age: Option<u32>,
    /// Type of incident (e.g. bullying, grooming)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incident_type: Option<String>,
}

// ============== Detection results ==============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BullyingVerdict {
    pub is_bullying: bool,
    pub severity: String,
    /// 0.0..=1.0
    pub confidence: f64,
    /// 0.0..=1.0
    pub risk_score: f64,
    #[serde(default)]
    pub bullying_type: Vec<String>,
    pub rationale: String,
    pub recommended_action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroomingVerdict {
    /// "none", "low", "medium", "high" or "critical"
    pub grooming_risk: String,
    pub confidence: f64,
    pub risk_score: f64,
    #[serde(default)]
    pub flags: Vec<String>,
    pub rationale: String,
    pub recommended_action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnsafeVerdict {
    #[serde(rename = "unsafe")]
    pub is_unsafe: bool,
    pub severity: String,
    pub confidence: f64,
    pub risk_score: f64,
    #[serde(default)]
    pub categories: Vec<String>,
    pub rationale: String,
    pub recommended_action: String,
}

/// Combined quick-screening result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyAnalysis {
    pub risk_level: String,
    pub risk_score: f64,
    pub summary: String,
    pub recommended_action: String,
    #[serde(default)]
    pub bullying: Option<BullyingVerdict>,
    #[serde(rename = "unsafe", default)]
    pub unsafe_content: Option<UnsafeVerdict>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmotionReport {
    #[serde(default)]
    pub dominant_emotions: Vec<String>,
    /// "improving", "stable" or "worsening"
    pub trend: String,
    /// Emotion name -> score in 0.0..=1.0
    #[serde(default)]
    pub emotion_scores: BTreeMap<String, f64>,
    pub summary: String,
    pub recommended_followup: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionPlan {
    pub audience: String,
    pub tone: String,
    #[serde(default)]
    pub reading_level: Option<String>,
    #[serde(default)]
    pub steps: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncidentReport {
    pub risk_level: String,
    pub summary: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub recommended_next_steps: Vec<String>,
}

// ============== Governance requests ==============

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErasureRequest {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    pub user_id: String,
    /// "json" or "csv"; backend defaults to json
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsentRequest {
    pub user_id: String,
    pub consent_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RectifyRequest {
    pub user_id: String,
    /// Field name -> corrected value
    pub corrections: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogBreachRequest {
    pub description: String,
    pub severity: String,
    pub affected_users: u64,
    #[serde(default)]
    pub data_categories: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBreachRequest {
    pub breach_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ============== Governance results ==============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErasureReceipt {
    pub request_id: String,
    pub status: String,
    #[serde(default)]
    pub deleted_categories: Vec<String>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportReceipt {
    pub request_id: String,
    pub format: String,
    pub download_url: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentRecord {
    pub user_id: String,
    pub consent_type: String,
    pub granted: bool,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsentStatus {
    pub user_id: String,
    #[serde(default)]
    pub consents: Vec<ConsentRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RectificationReceipt {
    pub request_id: String,
    pub status: String,
    #[serde(default)]
    pub updated_fields: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub action: String,
    pub resource: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogPage {
    #[serde(default)]
    pub entries: Vec<AuditLogEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreachRecord {
    pub id: String,
    pub description: String,
    pub severity: String,
    pub status: String,
    pub affected_users: u64,
    #[serde(default)]
    pub data_categories: Vec<String>,
    #[serde(default)]
    pub occurred_at: Option<DateTime<Utc>>,
    pub reported_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreachList {
    #[serde(default)]
    pub breaches: Vec<BreachRecord>,
}
