use std::sync::Arc;

use axum::{Json, extract::State};
use sessionq::data::{HealthResponse, HealthStatus, StoreInfo, UptimeInfo};
use sessionq::log;

use crate::services::SessionService;

fn uptime_seconds(started_at: chrono::DateTime<chrono::Utc>) -> i64 {
    (chrono::Utc::now() - started_at).num_seconds()
}

fn human_readable_uptime(uptime_seconds: i64) -> String {
    let days = uptime_seconds / 86400;
    let hours = (uptime_seconds % 86400) / 3600;
    let minutes = (uptime_seconds % 3600) / 60;
    let secs = uptime_seconds % 60;

    if days > 0 {
        format!("{days}d {hours}h {minutes}m {secs}s")
    } else if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses((status = 200, description = "Uptime and store reachability", body = HealthResponse))
)]
pub async fn get(State(state): State<Arc<crate::AppState>>) -> Json<HealthResponse> {
    let (status, store) = match state.sessions.count().await {
        Ok(count) => (
            HealthStatus::Healthy,
            StoreInfo {
                status: "up".to_string(),
                sessions: Some(count),
            },
        ),
        Err(err) => {
            log::warn!("Health check could not reach the store: {err}");
            (
                HealthStatus::Degraded,
                StoreInfo {
                    status: "down".to_string(),
                    sessions: None,
                },
            )
        }
    };
    let seconds = uptime_seconds(state.started_at);

    let health_response = HealthResponse {
        status,
        timestamp: chrono::Utc::now().to_rfc3339(),
        started_at: state.started_at.to_rfc3339(),
        uptime: UptimeInfo {
            seconds,
            human: human_readable_uptime(seconds),
        },
        store,
    };

    log::info!("Health check: {:?}", health_response);

    Json(health_response)
}
