use axum::http::{HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::Instant;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub token_url: String,
    pub client_id: String,
    pub client_secret: String,
}

#[derive(Debug, Clone)]
pub enum UpstreamOutcome {
    Response {
        status: StatusCode,
        headers: HeaderMap,
        body: Value,
    },
    Unreachable(String),
}

#[derive(Debug, Clone)]
pub struct MotdEntry {
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMotdRequest {
    pub secret_key: String,
    #[serde(default)]
    pub clear: Option<bool>,
    #[serde(default)]
    pub motd: Option<String>,
    #[serde(default)]
    pub expiry: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UptimeResponse {
    pub started_at: String,
    pub uptime: UptimeBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motd: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UptimeBreakdown {
    pub milliseconds: u64,
    pub seconds: u64,
    pub minutes: u64,
    pub hours: u64,
    pub days: u64,
}
