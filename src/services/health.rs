use chrono::{SecondsFormat, Utc};
use futures::future::join;
use std::time::{Duration, Instant};

use crate::models::health::{
    AiServiceCheck, GibbonCheck, HealthChecks, HealthReport, ServiceCheck, ServiceStatus,
};
use crate::state::AppState;

/// The fixed service identity reported by the health endpoint.
pub const SERVICE_NAME: &str = "parent-portal";

/// Probes one downstream service within a bounded time budget.
///
/// Classification is transport-level only: a request error or timeout is
/// `unhealthy`, a non-2xx reply is `degraded`, a 2xx reply is `healthy`
/// regardless of what the upstream reports about itself in the body.
pub async fn check_service(
    client: &reqwest::Client,
    url: &str,
    timeout: Duration,
) -> ServiceCheck {
    let started = Instant::now();
    let outcome = tokio::time::timeout(timeout, client.get(url).send()).await;
    let response_time = started.elapsed().as_millis() as u64;

    match outcome {
        Err(_) => ServiceCheck {
            status: ServiceStatus::Unhealthy,
            connected: false,
            response_time: Some(response_time),
            error: Some(format!(
                "Health check timed out after {}ms",
                timeout.as_millis()
            )),
            details: None,
        },
        Ok(Err(err)) => ServiceCheck {
            status: ServiceStatus::Unhealthy,
            connected: false,
            response_time: Some(response_time),
            error: Some(err.to_string()),
            details: None,
        },
        Ok(Ok(response)) if response.status().is_success() => {
            let details = response
                .bytes()
                .await
                .ok()
                .and_then(|bytes| sonic_rs::from_slice(&bytes).ok());

            ServiceCheck {
                status: ServiceStatus::Healthy,
                connected: true,
                response_time: Some(response_time),
                error: None,
                details,
            }
        }
        Ok(Ok(response)) => {
            let status = response.status();
            ServiceCheck {
                status: ServiceStatus::Degraded,
                connected: false,
                response_time: Some(response_time),
                error: Some(format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                )),
                details: None,
            }
        }
    }
}

/// Probes both downstream services concurrently and reduces their statuses
/// to one report. Waits for both probes (or their timeouts) to finish.
pub async fn aggregate(state: &AppState) -> HealthReport {
    let timeout = Duration::from_millis(state.config.health_check_timeout_ms);

    let (ai_service, gibbon) = join(
        check_service(&state.http, &state.config.ai_service_url, timeout),
        check_service(&state.http, &state.config.gibbon_url, timeout),
    )
    .await;

    let status = ai_service.status.max(gibbon.status);

    HealthReport {
        status,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        service: SERVICE_NAME,
        version: env!("CARGO_PKG_VERSION"),
        checks: HealthChecks {
            ai_service: AiServiceCheck {
                api_url: state.config.ai_service_url.clone(),
                check: ai_service,
            },
            gibbon: GibbonCheck {
                gibbon_url: state.config.gibbon_url.clone(),
                check: gibbon,
            },
        },
    }
}
