// Project aggregation module.
// Selects, enriches, and orders repositories for the portfolio's project views.

pub mod aggregate;
pub mod featured;
pub mod filter;
pub mod languages;
pub mod stats;

pub use aggregate::{
    Aggregator, EnrichedRepository, ProjectCaches, RepositoryDetail, is_valid_repo_name,
};
pub use featured::{DEFAULT_FEATURED, FeaturedSet};
pub use filter::ProjectFilter;
pub use languages::{LanguageBreakdown, LanguageShare, compute_breakdown};
pub use stats::{AccountStats, compute_stats};
