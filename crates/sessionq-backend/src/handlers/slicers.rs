//! Distinct values for the dashboard's filter dropdowns.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::errors::ApiError;
use crate::services::SessionService;

type Values = Result<Json<Vec<String>>, ApiError>;

#[utoipa::path(
    get,
    path = "/slicers/tags",
    responses((status = 200, description = "Distinct tag strings", body = [String]))
)]
pub async fn tags(State(state): State<Arc<crate::AppState>>) -> Values {
    Ok(Json(state.sessions.distinct_tags().await?))
}

#[utoipa::path(
    get,
    path = "/slicers/learningcategories",
    responses((status = 200, description = "Distinct learning categories", body = [String]))
)]
pub async fn learning_categories(State(state): State<Arc<crate::AppState>>) -> Values {
    Ok(Json(state.sessions.distinct_learning_categories().await?))
}

#[utoipa::path(
    get,
    path = "/slicers/sessionlevels",
    responses((status = 200, description = "Distinct session levels", body = [String]))
)]
pub async fn session_levels(State(state): State<Arc<crate::AppState>>) -> Values {
    Ok(Json(state.sessions.distinct_session_levels().await?))
}

#[utoipa::path(
    get,
    path = "/slicers/sessiontypes",
    responses((status = 200, description = "Distinct session types", body = [String]))
)]
pub async fn session_types(State(state): State<Arc<crate::AppState>>) -> Values {
    Ok(Json(state.sessions.distinct_session_types().await?))
}

#[utoipa::path(
    get,
    path = "/slicers/speakernames",
    responses((status = 200, description = "Distinct speaker name strings", body = [String]))
)]
pub async fn speaker_names(State(state): State<Arc<crate::AppState>>) -> Values {
    Ok(Json(state.sessions.distinct_speaker_names().await?))
}
