//! The root redirect and the OpenAPI description it lands on.

use axum::{Json, response::Redirect};
use sessionq::data::{HealthResponse, Session};
use utoipa::OpenApi;

use super::{health, session, slicers, stats};

pub const DOCS_PATH: &str = "/swagger";

#[derive(OpenApi)]
#[openapi(
    info(title = "sessionq", description = "Read-only queries over conference session metadata"),
    paths(
        session::get,
        session::list,
        session::filter,
        stats::sessions,
        stats::speakers,
        stats::self_learning,
        stats::hours,
        stats::recorded,
        slicers::tags,
        slicers::learning_categories,
        slicers::session_levels,
        slicers::session_types,
        slicers::speaker_names,
        health::get,
    ),
    components(schemas(Session, HealthResponse))
)]
pub struct ApiDoc;

pub async fn root() -> Redirect {
    Redirect::to(DOCS_PATH)
}

pub async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
