use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};

use sessionq::data::{Session, SessionFilter};
use sessionq::log;

use crate::errors::ApiError;
use crate::services::SessionService;

/// Handler to get a session by its code
#[utoipa::path(
    get,
    path = "/session/{code}",
    params(("code" = String, Path, description = "Exact session code")),
    responses(
        (status = 200, description = "The session", body = Session),
        (status = 404, description = "No session with this code")
    )
)]
pub async fn get(
    State(state): State<Arc<crate::AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Session>, ApiError> {
    state
        .sessions
        .get_by_code(&code)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

/// Handler to list every session
#[utoipa::path(
    get,
    path = "/sessions",
    responses((status = 200, description = "Every session", body = [Session]))
)]
pub async fn list(State(state): State<Arc<crate::AppState>>) -> Result<Json<Vec<Session>>, ApiError> {
    Ok(Json(state.sessions.list().await?))
}

/// Handler to filter sessions by any combination of partial matches
#[utoipa::path(
    get,
    path = "/sessions/filter",
    params(SessionFilter),
    responses((status = 200, description = "Sessions matching every non-blank parameter", body = [Session]))
)]
pub async fn filter(
    State(state): State<Arc<crate::AppState>>,
    Query(filter): Query<SessionFilter>,
) -> Result<Json<Vec<Session>>, ApiError> {
    log::debug!("Filtering sessions: {:?}", filter);
    Ok(Json(state.sessions.filter(&filter).await?))
}
