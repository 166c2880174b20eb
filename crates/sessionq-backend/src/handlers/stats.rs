//! Dashboard counters, each answered with a bare JSON integer.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::errors::ApiError;
use crate::services::SessionService;

type Stat = Result<Json<i64>, ApiError>;

#[utoipa::path(
    get,
    path = "/stats/sessions",
    responses((status = 200, description = "Total sessions", body = i64))
)]
pub async fn sessions(State(state): State<Arc<crate::AppState>>) -> Stat {
    Ok(Json(state.sessions.count().await?))
}

#[utoipa::path(
    get,
    path = "/stats/speakers",
    responses((status = 200, description = "Distinct non-blank speaker names", body = i64))
)]
pub async fn speakers(State(state): State<Arc<crate::AppState>>) -> Stat {
    Ok(Json(state.sessions.count_distinct_speakers().await?))
}

#[utoipa::path(
    get,
    path = "/stats/selflearning",
    responses((status = 200, description = "Sessions with a learning category", body = i64))
)]
pub async fn self_learning(State(state): State<Arc<crate::AppState>>) -> Stat {
    Ok(Json(state.sessions.count_self_learning().await?))
}

#[utoipa::path(
    get,
    path = "/stats/hours",
    responses((status = 200, description = "Total content hours, truncated", body = i64))
)]
pub async fn hours(State(state): State<Arc<crate::AppState>>) -> Stat {
    Ok(Json(state.sessions.total_hours().await?))
}

#[utoipa::path(
    get,
    path = "/stats/recorded",
    responses((status = 200, description = "Sessions with a recorded status", body = i64))
)]
pub async fn recorded(State(state): State<Arc<crate::AppState>>) -> Stat {
    Ok(Json(state.sessions.count_recorded().await?))
}
