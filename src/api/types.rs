// API request and response types.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::CacheStats;
use crate::config::Config;
use crate::github::Profile;
use crate::projects::{Aggregator, EnrichedRepository, ProjectFilter};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<Aggregator>,
    /// GitHub account every view is built for.
    pub owner: Arc<str>,
    pub dev_mode: bool,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(aggregator: Arc<Aggregator>, config: &Config) -> Self {
        Self {
            aggregator,
            owner: Arc::from(config.owner.as_str()),
            dev_mode: config.dev_mode,
            started_at: Utc::now(),
        }
    }
}

/// Success envelope shared by every endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Failure envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Debug representation, development mode only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            message: None,
            detail: None,
        }
    }
}

/// Which repositories `/projects` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectsType {
    #[default]
    Featured,
    All,
}

/// Parsed `/projects` query string. Malformed values fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectsQuery {
    pub kind: ProjectsType,
    pub filter: ProjectFilter,
}

impl ProjectsQuery {
    pub fn from_params(params: &HashMap<String, String>) -> Self {
        let kind = match params.get("type").map(|s| s.trim()) {
            Some("all") => ProjectsType::All,
            _ => ProjectsType::Featured,
        };

        let category = params
            .get("category")
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let featured_only = params
            .get("featured")
            .map(|s| {
                let s = s.trim();
                s.eq_ignore_ascii_case("true") || s == "1"
            })
            .unwrap_or(false);

        let limit = params.get("limit").and_then(|s| s.trim().parse().ok());

        Self {
            kind,
            filter: ProjectFilter {
                category,
                featured_only,
                limit,
            },
        }
    }
}

/// Payload of `GET /projects`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProjectsPayload {
    pub repositories: Vec<EnrichedRepository>,
    /// `null` when the profile could not be fetched.
    pub profile: Option<Profile>,
    pub count: usize,
    #[serde(rename = "type")]
    pub kind: ProjectsType,
}

/// Payload of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_secs: i64,
    pub owner: String,
    pub cache: CacheStats,
}
