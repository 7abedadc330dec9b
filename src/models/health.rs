use serde::{Deserialize, Serialize};
use sonic_rs::Value;

/// Health classification of a single service.
///
/// Variants are ordered by severity so the aggregate status is simply the
/// maximum of the per-service statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// The outcome of probing one downstream service.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceCheck {
    pub status: ServiceStatus,
    pub connected: bool,
    /// Wall-clock time around the probe, recorded regardless of outcome.
    #[serde(rename = "responseTime", skip_serializing_if = "Option::is_none")]
    pub response_time: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The raw upstream payload. Recorded, never used to reclassify.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// AI service check, tagged with the probed URL.
#[derive(Debug, Clone, Serialize)]
pub struct AiServiceCheck {
    #[serde(rename = "apiUrl")]
    pub api_url: String,
    #[serde(flatten)]
    pub check: ServiceCheck,
}

/// Gibbon backend check, tagged with the probed URL.
#[derive(Debug, Clone, Serialize)]
pub struct GibbonCheck {
    #[serde(rename = "gibbonUrl")]
    pub gibbon_url: String,
    #[serde(flatten)]
    pub check: ServiceCheck,
}

/// The per-service results inside an aggregated report.
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    #[serde(rename = "aiService")]
    pub ai_service: AiServiceCheck,
    pub gibbon: GibbonCheck,
}

/// The aggregated health report returned by `GET /api/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: ServiceStatus,
    /// ISO-8601 with millisecond precision, generated once per report.
    pub timestamp: String,
    pub service: &'static str,
    pub version: &'static str,
    pub checks: HealthChecks,
}
