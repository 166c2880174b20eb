use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use sessionq::log;

use crate::AppState;
use crate::handlers;

fn cors(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!("Ignoring invalid CORS origin: {origin}");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_headers([header::CONTENT_TYPE])
        .allow_methods([Method::GET])
}

/// Setup the routes for the server and configure CORS and request tracing
pub fn setup_routes(state: Arc<AppState>) -> Router {
    let cors = cors(&state.config.cors_origins());

    Router::new()
        .route("/", get(handlers::docs::root))
        .route(handlers::docs::DOCS_PATH, get(handlers::docs::openapi))
        .route("/health", get(handlers::health::get))
        .route("/session/{code}", get(handlers::session::get))
        .route("/sessions", get(handlers::session::list))
        .route("/sessions/filter", get(handlers::session::filter))
        .route("/stats/sessions", get(handlers::stats::sessions))
        .route("/stats/speakers", get(handlers::stats::speakers))
        .route("/stats/selflearning", get(handlers::stats::self_learning))
        .route("/stats/hours", get(handlers::stats::hours))
        .route("/stats/recorded", get(handlers::stats::recorded))
        .route("/slicers/tags", get(handlers::slicers::tags))
        .route("/slicers/learningcategories", get(handlers::slicers::learning_categories))
        .route("/slicers/sessionlevels", get(handlers::slicers::session_levels))
        .route("/slicers/sessiontypes", get(handlers::slicers::session_types))
        .route("/slicers/speakernames", get(handlers::slicers::speaker_names))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use clap::Parser;
    use sessionq::data::{HealthResponse, HealthStatus, Session};
    use sessionq::serde_json::{self, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::services::fixtures::{Fixture, codes};

    fn app(database: &str) -> Router {
        let config = Config::try_parse_from(["sessionq-backend", "--database", database]).unwrap();
        setup_routes(Arc::new(AppState::new(config)))
    }

    async fn send(router: Router, uri: &str) -> Response {
        router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json<T: sessionq::serde::de::DeserializeOwned>(response: Response) -> T {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn get_session_by_code() {
        let fixture = Fixture::new();
        let response = send(app(fixture.database()), "/session/LAB202").await;

        assert_eq!(response.status(), StatusCode::OK);
        let session: Session = body_json(response).await;
        assert_eq!(session.session_code, "LAB202");
        assert_eq!(session.speaker_name.as_deref(), Some("Grace Hopper"));
    }

    #[tokio::test]
    async fn unknown_code_is_404_with_empty_body() {
        let fixture = Fixture::new();
        let response = send(app(fixture.database()), "/session/NOPE").await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn list_and_filter_sessions() {
        let fixture = Fixture::new();

        let response = send(app(fixture.database()), "/sessions").await;
        assert_eq!(response.status(), StatusCode::OK);
        let all: Vec<Session> = body_json(response).await;
        assert_eq!(all.len(), 5);

        let response = send(
            app(fixture.database()),
            "/sessions/filter?tag=Rust&speakerName=Ada&learningCategory=",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let filtered: Vec<Session> = body_json(response).await;
        assert_eq!(codes(filtered), ["BRK101", "BRK150"]);

        let response = send(app(fixture.database()), "/sessions/filter").await;
        let unfiltered: Vec<Session> = body_json(response).await;
        assert_eq!(codes(unfiltered), codes(all));
    }

    #[tokio::test]
    async fn stats_are_bare_integers() {
        let fixture = Fixture::new();

        for (uri, expected) in [
            ("/stats/sessions", 5),
            ("/stats/speakers", 3),
            ("/stats/selflearning", 3),
            ("/stats/hours", 3),
            ("/stats/recorded", 2),
        ] {
            let response = send(app(fixture.database()), uri).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            let value: Value = body_json(response).await;
            assert_eq!(value, Value::from(expected), "{uri}");
        }
    }

    #[tokio::test]
    async fn slicers_return_string_arrays() {
        let fixture = Fixture::new();
        fixture.insert_control_whitespace_row();

        for (uri, expected) in [
            ("/slicers/tags", vec!["AI, Cloud", "AI, Rust", "Rust", "Storage"]),
            ("/slicers/learningcategories", vec!["Learn Module", "Learn Path"]),
            ("/slicers/sessionlevels", vec!["Advanced", "Foundational", "Intermediate"]),
            ("/slicers/sessiontypes", vec!["Breakout", "Demo", "Keynote", "Lab"]),
            (
                "/slicers/speakernames",
                vec!["Ada Lovelace", "Ada Lovelace, Grace Hopper", "Grace Hopper"],
            ),
        ] {
            let response = send(app(fixture.database()), uri).await;
            assert_eq!(response.status(), StatusCode::OK, "{uri}");
            let mut values: Vec<String> = body_json(response).await;
            values.sort();
            assert_eq!(values, expected, "{uri}");
        }
    }

    #[tokio::test]
    async fn root_redirects_to_docs() {
        let fixture = Fixture::new();
        let response = send(app(fixture.database()), "/").await;

        assert!(response.status().is_redirection());
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            handlers::docs::DOCS_PATH
        );

        let response = send(app(fixture.database()), handlers::docs::DOCS_PATH).await;
        assert_eq!(response.status(), StatusCode::OK);
        let doc: Value = body_json(response).await;
        assert!(doc["paths"]["/session/{code}"]["get"].is_object());
        assert_eq!(doc["info"]["title"], "sessionq");
    }

    #[tokio::test]
    async fn store_failure_is_500() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.db");
        let missing = missing.to_str().unwrap();

        for uri in ["/sessions", "/session/BRK101", "/stats/hours", "/slicers/tags"] {
            let response = send(app(missing), uri).await;
            assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        }
    }

    #[tokio::test]
    async fn health_reports_store_state() {
        let fixture = Fixture::new();
        let response = send(app(fixture.database()), "/health").await;
        let health: HealthResponse = body_json(response).await;
        assert_eq!(health.status, HealthStatus::Healthy);
        assert_eq!(health.store.sessions, Some(5));

        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.db");
        let response = send(app(missing.to_str().unwrap()), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let health: HealthResponse = body_json(response).await;
        assert_eq!(health.status, HealthStatus::Degraded);
        assert_eq!(health.store.status, "down");
    }

    #[tokio::test]
    async fn post_is_not_allowed() {
        let fixture = Fixture::new();
        let response = app(fixture.database())
            .oneshot(
                Request::post("/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
