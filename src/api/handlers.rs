// API endpoint handlers.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Utc;
use tracing::{info, warn};

use crate::github::Profile;
use crate::projects::{AccountStats, RepositoryDetail};

use super::error::ApiError;
use super::types::*;

/// `GET /projects?type=featured|all&category=&featured=&limit=`
pub(super) async fn list_projects(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<ApiResponse<ProjectsPayload>>, ApiError> {
    let query = ProjectsQuery::from_params(&params);
    let owner = &*state.owner;

    let repositories = match query.kind {
        ProjectsType::Featured => state.aggregator.featured(owner).await,
        ProjectsType::All => state.aggregator.all(owner, &query.filter).await,
    }
    .map_err(|e| ApiError::new("Failed to fetch GitHub repositories", e, state.dev_mode))?;

    let profile = match state.aggregator.profile(owner).await {
        Ok(profile) => Some(profile),
        Err(e) => {
            warn!(owner, error = %e, "profile unavailable, omitting from projects response");
            None
        }
    };

    info!(kind = ?query.kind, count = repositories.len(), "served projects");

    Ok(Json(ApiResponse::ok(ProjectsPayload {
        count: repositories.len(),
        repositories,
        profile,
        kind: query.kind,
    })))
}

/// `GET /projects/:name`
pub(super) async fn get_project(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ApiResponse<RepositoryDetail>>, ApiError> {
    let detail = state
        .aggregator
        .repository(&state.owner, &name)
        .await
        .map_err(|e| ApiError::new("Error fetching repository details", e, state.dev_mode))?;

    Ok(Json(ApiResponse::ok(detail)))
}

/// `GET /profile`
pub(super) async fn get_profile(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Profile>>, ApiError> {
    let profile = state
        .aggregator
        .profile(&state.owner)
        .await
        .map_err(|e| ApiError::new("Error fetching GitHub user profile", e, state.dev_mode))?;

    Ok(Json(ApiResponse::ok(profile)))
}

/// `GET /stats`
pub(super) async fn get_stats(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<AccountStats>>, ApiError> {
    let stats = state
        .aggregator
        .stats(&state.owner)
        .await
        .map_err(|e| ApiError::new("Error fetching GitHub statistics", e, state.dev_mode))?;

    Ok(Json(ApiResponse::ok(stats)))
}

/// `GET /health`
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let now = Utc::now();
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime_secs: (now - state.started_at).num_seconds(),
        owner: state.owner.to_string(),
        cache: state.aggregator.cache_stats(),
    })
}

/// Any verb other than GET on a known route.
pub(super) async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method not allowed")),
    )
}

/// Unknown route.
pub(super) async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not found")))
}
