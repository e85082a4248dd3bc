// Router creation.
// Every route answers GET; other verbs get a JSON 405.

use axum::{Router, http::Method, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::*;
use super::types::AppState;

/// Create the REST API router.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/health", get(health).fallback(method_not_allowed))
        .route("/projects", get(list_projects).fallback(method_not_allowed))
        .route(
            "/projects/:name",
            get(get_project).fallback(method_not_allowed),
        )
        .route("/profile", get(get_profile).fallback(method_not_allowed))
        .route("/stats", get(get_stats).fallback(method_not_allowed))
        .fallback(not_found)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
