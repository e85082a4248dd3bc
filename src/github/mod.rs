// GitHub API module.
// Provides the client, the Fetcher seam, and types for the GitHub REST API.

pub mod client;
pub mod endpoints;
pub mod fetcher;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use fetcher::Fetcher;
pub use types::*;
