//! Test support: a canned in-process backend.
//!
//! `StubApi` implements [`SafeNestApi`] with fixed fixtures, plus a failure
//! mode that makes every call fault with a given message. Echo fields from
//! the request are preserved where tests need to see them flow through.

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use safenest_client::types::*;
use safenest_client::{Error, Result, SafeNestApi};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub(crate) struct StubApi {
    /// When set, every call fails with this message (may be empty)
    failure: Option<String>,
}

impl StubApi {
    pub(crate) fn new() -> Self {
        Self { failure: None }
    }

    pub(crate) fn failing_with(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
        }
    }

    fn check(&self) -> Result<()> {
        match &self.failure {
            Some(message) => Err(Error::Api {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Minimal valid arguments for each registered tool name
    pub(crate) fn valid_arguments(name: &str) -> Value {
        match name {
            "detect_bullying" | "detect_unsafe" | "analyze" | "analyze_emotions" => {
                json!({ "content": "sample text" })
            }
            "detect_grooming" => json!({
                "messages": [{ "role": "adult", "content": "hello" }]
            }),
            "get_action_plan" => json!({ "situation": "name calling at school" }),
            "generate_report" => json!({
                "messages": [{ "sender": "user_a", "content": "hello" }]
            }),
            "delete_account_data" | "export_account_data" | "get_consent_status" => {
                json!({ "userId": "u_1" })
            }
            "record_consent" | "withdraw_consent" => {
                json!({ "userId": "u_1", "consentType": "analytics" })
            }
            "rectify_data" => json!({ "userId": "u_1", "corrections": { "email": "a@b.c" } }),
            "get_audit_logs" | "list_breaches" => json!({}),
            "log_breach" => json!({
                "description": "test breach",
                "severity": "low",
                "affectedUsers": 1
            }),
            "get_breach" | "update_breach" => json!({ "breachId": "br_1" }),
            other => panic!("no fixture arguments for tool {}", other),
        }
    }

    fn breach_fixture(id: &str, description: &str, severity: &str) -> BreachRecord {
        BreachRecord {
            id: id.to_string(),
            description: description.to_string(),
            severity: severity.to_string(),
            status: "open".to_string(),
            affected_users: 1200,
            data_categories: vec!["emails".to_string()],
            occurred_at: None,
            reported_at: Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap(),
        }
    }
}

#[async_trait]
impl SafeNestApi for StubApi {
    async fn detect_bullying(&self, _req: DetectBullyingRequest) -> Result<BullyingVerdict> {
        self.check()?;
        Ok(BullyingVerdict {
            is_bullying: true,
            severity: "high".to_string(),
            confidence: 0.91,
            risk_score: 0.88,
            bullying_type: vec!["insults".to_string()],
            rationale: "Direct personal attack on the recipient.".to_string(),
            recommended_action: "warn".to_string(),
        })
    }

    async fn detect_grooming(&self, _req: DetectGroomingRequest) -> Result<GroomingVerdict> {
        self.check()?;
        Ok(GroomingVerdict {
            grooming_risk: "none".to_string(),
            confidence: 0.9,
            risk_score: 0.05,
            flags: vec![],
            rationale: "Ordinary conversation.".to_string(),
            recommended_action: "none".to_string(),
        })
    }

    async fn detect_unsafe(&self, _req: DetectUnsafeRequest) -> Result<UnsafeVerdict> {
        self.check()?;
        Ok(UnsafeVerdict {
            is_unsafe: false,
            severity: "low".to_string(),
            confidence: 0.85,
            risk_score: 0.1,
            categories: vec![],
            rationale: "No unsafe content found.".to_string(),
            recommended_action: "none".to_string(),
        })
    }

    async fn analyze(&self, _req: AnalyzeRequest) -> Result<SafetyAnalysis> {
        self.check()?;
        Ok(SafetyAnalysis {
            risk_level: "low".to_string(),
            risk_score: 0.12,
            summary: "Nothing of concern.".to_string(),
            recommended_action: "none".to_string(),
            bullying: None,
            unsafe_content: None,
        })
    }

    async fn analyze_emotions(&self, _req: AnalyzeEmotionsRequest) -> Result<EmotionReport> {
        self.check()?;
        let mut scores = BTreeMap::new();
        scores.insert("calm".to_string(), 0.7);
        scores.insert("sadness".to_string(), 0.2);
        Ok(EmotionReport {
            dominant_emotions: vec!["calm".to_string()],
            trend: "stable".to_string(),
            emotion_scores: scores,
            summary: "Mostly settled.".to_string(),
            recommended_followup: "No follow-up needed.".to_string(),
        })
    }

    async fn get_action_plan(&self, req: ActionPlanRequest) -> Result<ActionPlan> {
        self.check()?;
        Ok(ActionPlan {
            audience: req.audience.unwrap_or_else(|| "parent".to_string()),
            tone: "supportive".to_string(),
            reading_level: None,
            steps: vec![
                "Stay calm and listen.".to_string(),
                "Document what happened.".to_string(),
            ],
        })
    }

    async fn generate_report(&self, _req: GenerateReportRequest) -> Result<IncidentReport> {
        self.check()?;
        Ok(IncidentReport {
            risk_level: "medium".to_string(),
            summary: "Repeated unkind messages.".to_string(),
            categories: vec!["bullying".to_string()],
            recommended_next_steps: vec!["Talk to the school.".to_string()],
        })
    }

    async fn delete_account_data(&self, _req: ErasureRequest) -> Result<ErasureReceipt> {
        self.check()?;
        Ok(ErasureReceipt {
            request_id: "er_1".to_string(),
            status: "accepted".to_string(),
            deleted_categories: vec!["messages".to_string(), "profile".to_string()],
            completed_at: None,
        })
    }

    async fn export_account_data(&self, req: ExportRequest) -> Result<ExportReceipt> {
        self.check()?;
        Ok(ExportReceipt {
            request_id: "ex_1".to_string(),
            format: req.format.unwrap_or_else(|| "json".to_string()),
            download_url: "https://api.safenest.dev/exports/ex_1".to_string(),
            expires_at: Utc.with_ymd_and_hms(2026, 2, 1, 0, 0, 0).unwrap(),
        })
    }

    async fn record_consent(&self, req: ConsentRequest) -> Result<ConsentRecord> {
        self.check()?;
        Ok(ConsentRecord {
            user_id: req.user_id,
            consent_type: req.consent_type,
            granted: true,
            recorded_at: Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap(),
        })
    }

    async fn withdraw_consent(&self, req: ConsentRequest) -> Result<ConsentRecord> {
        self.check()?;
        Ok(ConsentRecord {
            user_id: req.user_id,
            consent_type: req.consent_type,
            granted: false,
            recorded_at: Utc.with_ymd_and_hms(2026, 1, 11, 12, 0, 0).unwrap(),
        })
    }

    async fn get_consent_status(&self, user_id: &str) -> Result<ConsentStatus> {
        self.check()?;
        Ok(ConsentStatus {
            user_id: user_id.to_string(),
            consents: vec![ConsentRecord {
                user_id: user_id.to_string(),
                consent_type: "analytics".to_string(),
                granted: true,
                recorded_at: Utc.with_ymd_and_hms(2026, 1, 10, 12, 0, 0).unwrap(),
            }],
        })
    }

    async fn rectify_data(&self, req: RectifyRequest) -> Result<RectificationReceipt> {
        self.check()?;
        Ok(RectificationReceipt {
            request_id: "rq_1".to_string(),
            status: "applied".to_string(),
            updated_fields: req.corrections.keys().cloned().collect(),
        })
    }

    async fn get_audit_logs(&self, _query: AuditLogQuery) -> Result<AuditLogPage> {
        self.check()?;
        Ok(AuditLogPage {
            entries: vec![AuditLogEntry {
                timestamp: Utc.with_ymd_and_hms(2026, 1, 12, 8, 0, 0).unwrap(),
                actor: "admin".to_string(),
                action: "exported_data".to_string(),
                resource: "user:u_1".to_string(),
            }],
        })
    }

    async fn log_breach(&self, req: LogBreachRequest) -> Result<BreachRecord> {
        self.check()?;
        let mut record = Self::breach_fixture("br_new", &req.description, &req.severity);
        record.affected_users = req.affected_users;
        record.data_categories = req.data_categories;
        Ok(record)
    }

    async fn list_breaches(&self) -> Result<BreachList> {
        self.check()?;
        Ok(BreachList {
            breaches: vec![
                Self::breach_fixture("br_1", "vendor leak", "high"),
                Self::breach_fixture("br_2", "misdirected email", "low"),
            ],
        })
    }

    async fn get_breach(&self, breach_id: &str) -> Result<BreachRecord> {
        self.check()?;
        Ok(Self::breach_fixture(breach_id, "vendor leak", "high"))
    }

    async fn update_breach(&self, req: UpdateBreachRequest) -> Result<BreachRecord> {
        self.check()?;
        let mut record = Self::breach_fixture(&req.breach_id, "vendor leak", "high");
        if let Some(status) = req.status {
            record.status = status;
        }
        Ok(record)
    }
}
