//! SafeNest HTTP client
//!
//! Thin async client over the SafeNest REST API. Every capability is one
//! endpoint; the [`SafeNestApi`] trait keeps consumers decoupled from the
//! HTTP layer so tests can stand in a stub.

use crate::types::*;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.safenest.dev";
const API_KEY_VAR: &str = "SAFENEST_API_KEY";
const API_URL_VAR: &str = "SAFENEST_API_URL";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent as `x-api-key`
    pub api_key: String,
    /// Base URL of the SafeNest API
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a config with default endpoint and timeout
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Load from the process environment.
    ///
    /// `SAFENEST_API_KEY` is required; `SAFENEST_API_URL` optionally
    /// overrides the endpoint.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var(API_KEY_VAR).map_err(|_| Error::MissingCredential(API_KEY_VAR))?;

        let mut config = Self::new(api_key);
        if let Ok(url) = env::var(API_URL_VAR) {
            config.base_url = url;
        }

        Ok(config)
    }

    /// Override the API endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// One async method per SafeNest capability.
///
/// The backend is authoritative and opaque: methods forward arguments and
/// decode results, nothing more.
#[async_trait]
pub trait SafeNestApi: Send + Sync {
    // Safety
    async fn detect_bullying(&self, req: DetectBullyingRequest) -> Result<BullyingVerdict>;
    async fn detect_grooming(&self, req: DetectGroomingRequest) -> Result<GroomingVerdict>;
    async fn detect_unsafe(&self, req: DetectUnsafeRequest) -> Result<UnsafeVerdict>;
    async fn analyze(&self, req: AnalyzeRequest) -> Result<SafetyAnalysis>;
    async fn analyze_emotions(&self, req: AnalyzeEmotionsRequest) -> Result<EmotionReport>;
    async fn get_action_plan(&self, req: ActionPlanRequest) -> Result<ActionPlan>;
    async fn generate_report(&self, req: GenerateReportRequest) -> Result<IncidentReport>;

    // Governance
    async fn delete_account_data(&self, req: ErasureRequest) -> Result<ErasureReceipt>;
    async fn export_account_data(&self, req: ExportRequest) -> Result<ExportReceipt>;
    async fn record_consent(&self, req: ConsentRequest) -> Result<ConsentRecord>;
    async fn withdraw_consent(&self, req: ConsentRequest) -> Result<ConsentRecord>;
    async fn get_consent_status(&self, user_id: &str) -> Result<ConsentStatus>;
    async fn rectify_data(&self, req: RectifyRequest) -> Result<RectificationReceipt>;
    async fn get_audit_logs(&self, query: AuditLogQuery) -> Result<AuditLogPage>;
    async fn log_breach(&self, req: LogBreachRequest) -> Result<BreachRecord>;
    async fn list_breaches(&self) -> Result<BreachList>;
    async fn get_breach(&self, breach_id: &str) -> Result<BreachRecord>;
    async fn update_breach(&self, req: UpdateBreachRequest) -> Result<BreachRecord>;
}

/// SafeNest API client
pub struct SafeNestClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl SafeNestClient {
    /// Create a client from a config
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::ConnectionFailed(e.to_string()))?;

        Ok(Self { config, http })
    }

    /// Create a client from the process environment
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn post<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let request = self
            .http
            .post(self.url(path))
            .header("x-api-key", &self.config.api_key)
            .json(body);
        self.execute(path, request).await
    }

    async fn get<R: DeserializeOwned>(&self, path: &str) -> Result<R> {
        let request = self
            .http
            .get(self.url(path))
            .header("x-api-key", &self.config.api_key);
        self.execute(path, request).await
    }

    async fn get_with_query<Q: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<R> {
        let request = self
            .http
            .get(self.url(path))
            .header("x-api-key", &self.config.api_key)
            .query(query);
        self.execute(path, request).await
    }

    async fn patch<B: Serialize, R: DeserializeOwned>(&self, path: &str, body: &B) -> Result<R> {
        let request = self
            .http
            .patch(self.url(path))
            .header("x-api-key", &self.config.api_key)
            .json(body);
        self.execute(path, request).await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<R> {
        tracing::debug!(path, "calling SafeNest API");

        let response = request
            .send()
            .await
            .map_err(|e| Error::ConnectionFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                message: extract_error_message(&body),
            });
        }

        response.json().await.map_err(|e| Error::Parse(e.to_string()))
    }
}

/// Pull the human-readable message out of an error body.
///
/// The API wraps faults as `{"error": {"message": "..."}}`; older endpoints
/// return a bare `{"message": "..."}`. Anything else passes through as-is.
fn extract_error_message(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.trim().to_string();
    };

    json.get("error")
        .and_then(|e| e.get("message"))
        .or_else(|| json.get("message"))
        .and_then(|m| m.as_str())
        .map(|m| m.to_string())
        .unwrap_or_else(|| body.trim().to_string())
}

#[async_trait]
impl SafeNestApi for SafeNestClient {
    async fn detect_bullying(&self, req: DetectBullyingRequest) -> Result<BullyingVerdict> {
        self.post("/v1/detect/bullying", &req).await
    }

    async fn detect_grooming(&self, req: DetectGroomingRequest) -> Result<GroomingVerdict> {
        self.post("/v1/detect/grooming", &req).await
    }

    async fn detect_unsafe(&self, req: DetectUnsafeRequest) -> Result<UnsafeVerdict> {
        self.post("/v1/detect/unsafe", &req).await
    }

    async fn analyze(&self, req: AnalyzeRequest) -> Result<SafetyAnalysis> {
        self.post("/v1/analyze", &req).await
    }

    async fn analyze_emotions(&self, req: AnalyzeEmotionsRequest) -> Result<EmotionReport> {
        self.post("/v1/analyze/emotions", &req).await
    }

    async fn get_action_plan(&self, req: ActionPlanRequest) -> Result<ActionPlan> {
        self.post("/v1/action-plan", &req).await
    }

    async fn generate_report(&self, req: GenerateReportRequest) -> Result<IncidentReport> {
        self.post("/v1/report", &req).await
    }

    async fn delete_account_data(&self, req: ErasureRequest) -> Result<ErasureReceipt> {
        self.post("/v1/privacy/erasure", &req).await
    }

    async fn export_account_data(&self, req: ExportRequest) -> Result<ExportReceipt> {
        self.post("/v1/privacy/export", &req).await
    }

    async fn record_consent(&self, req: ConsentRequest) -> Result<ConsentRecord> {
        self.post("/v1/consent", &req).await
    }

    async fn withdraw_consent(&self, req: ConsentRequest) -> Result<ConsentRecord> {
        self.post("/v1/consent/withdraw", &req).await
    }

    async fn get_consent_status(&self, user_id: &str) -> Result<ConsentStatus> {
        self.get(&format!("/v1/consent/{}", user_id)).await
    }

    async fn rectify_data(&self, req: RectifyRequest) -> Result<RectificationReceipt> {
        self.post("/v1/privacy/rectify", &req).await
    }

    async fn get_audit_logs(&self, query: AuditLogQuery) -> Result<AuditLogPage> {
        self.get_with_query("/v1/audit-logs", &query).await
    }

    async fn log_breach(&self, req: LogBreachRequest) -> Result<BreachRecord> {
        self.post("/v1/breaches", &req).await
    }

    async fn list_breaches(&self) -> Result<BreachList> {
        self.get("/v1/breaches").await
    }

    async fn get_breach(&self, breach_id: &str) -> Result<BreachRecord> {
        self.get(&format!("/v1/breaches/{}", breach_id)).await
    }

    async fn update_breach(&self, req: UpdateBreachRequest) -> Result<BreachRecord> {
        let path = format!("/v1/breaches/{}", req.breach_id);
        self.patch(&path, &req).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = ClientConfig::new("sk-test");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_client_builds_from_config() {
        assert!(SafeNestClient::new(ClientConfig::new("sk-test")).is_ok());
    }

    #[test]
    fn test_url_joining_strips_trailing_slash() {
        let client = SafeNestClient::new(
            ClientConfig::new("sk-test").base_url("https://staging.safenest.dev/"),
        )
        .unwrap();
        assert_eq!(
            client.url("/v1/analyze"),
            "https://staging.safenest.dev/v1/analyze"
        );
    }

    #[test]
    fn test_extract_error_message_nested() {
        let body = r#"{"error": {"message": "content is required"}}"#;
        assert_eq!(extract_error_message(body), "content is required");
    }

    #[test]
    fn test_extract_error_message_flat() {
        let body = r#"{"message": "rate limited"}"#;
        assert_eq!(extract_error_message(body), "rate limited");
    }

    #[test]
    fn test_extract_error_message_opaque_body() {
        assert_eq!(extract_error_message("bad gateway"), "bad gateway");
    }
}
