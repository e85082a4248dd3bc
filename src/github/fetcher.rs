// Fetcher abstraction over the GitHub API.
// Lets the aggregation layer run against the live client or an in-memory fake.

use async_trait::async_trait;

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{LanguageBytes, Profile, Readme, Repository};

/// Read-only access to the repository-hosting API.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// All public repositories owned by `owner`.
    async fn list_repositories(&self, owner: &str) -> Result<Vec<Repository>>;

    /// Language byte counts for one repository.
    async fn get_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes>;

    async fn get_profile(&self, owner: &str) -> Result<Profile>;

    async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository>;

    async fn get_readme(&self, owner: &str, repo: &str) -> Result<Readme>;
}

#[async_trait]
impl Fetcher for GitHubClient {
    async fn list_repositories(&self, owner: &str) -> Result<Vec<Repository>> {
        self.get_all_user_repos(owner).await
    }

    async fn get_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes> {
        self.get_repo_languages(owner, repo).await
    }

    async fn get_profile(&self, owner: &str) -> Result<Profile> {
        self.get_user(owner).await
    }

    async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository> {
        self.get_repo(owner, repo).await
    }

    async fn get_readme(&self, owner: &str, repo: &str) -> Result<Readme> {
        self.get_repo_readme(owner, repo).await
    }
}
