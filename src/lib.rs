// Portfolio projects API.
// Serves curated GitHub repositories, language breakdowns, and profile data as JSON.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod projects;

use std::sync::Arc;

use axum::Router;

use crate::api::AppState;
use crate::cache::Clock;
use crate::config::Config;
use crate::github::Fetcher;
use crate::projects::{Aggregator, FeaturedSet, ProjectCaches};

/// Wire the aggregator, caches, and router for `config`.
pub fn build_app(config: &Config, fetcher: Arc<dyn Fetcher>, clock: Arc<dyn Clock>) -> Router {
    let caches = ProjectCaches::from_config(config, clock);
    let featured = FeaturedSet::new(config.featured.iter().cloned());
    let aggregator = Arc::new(Aggregator::new(fetcher, caches, featured));

    api::create_router(AppState::new(aggregator, config))
}
