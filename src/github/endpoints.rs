// GitHub API endpoint functions.
// Typed methods for the repository, language, profile, and README endpoints.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{LanguageBytes, Profile, Readme, Repository};

/// Page size for repository listings (GitHub's maximum).
pub const REPOS_PER_PAGE: u32 = 100;

/// Upper bound on listing pages fetched per call.
pub const MAX_REPO_PAGES: u32 = 10;

impl GitHubClient {
    /// Get one page of a user's public repositories, most recently updated first.
    pub async fn get_user_repos(
        &self,
        owner: &str,
        page: u32,
        per_page: u32,
    ) -> Result<Vec<Repository>> {
        let params = [
            ("sort", "updated"),
            ("direction", "desc"),
            ("page", &page.to_string()),
            ("per_page", &per_page.to_string()),
        ];
        let response = self
            .get_with_params(&format!("/users/{}/repos", owner), &params)
            .await?;
        let repos: Vec<Repository> = response.json().await?;
        Ok(repos)
    }

    /// Get all of a user's public repositories, following pagination.
    pub async fn get_all_user_repos(&self, owner: &str) -> Result<Vec<Repository>> {
        let mut repos = Vec::new();

        for page in 1..=MAX_REPO_PAGES {
            let batch = self.get_user_repos(owner, page, REPOS_PER_PAGE).await?;
            let done = batch.len() < REPOS_PER_PAGE as usize;
            repos.extend(batch);
            if done {
                break;
            }
        }

        Ok(repos)
    }

    /// Get a specific repository.
    pub async fn get_repo(&self, owner: &str, repo: &str) -> Result<Repository> {
        let response = self.get(&format!("/repos/{}/{}", owner, repo)).await?;
        let repository: Repository = response.json().await?;
        Ok(repository)
    }

    /// Get the language byte counts for a repository.
    pub async fn get_repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes> {
        let response = self
            .get(&format!("/repos/{}/{}/languages", owner, repo))
            .await?;
        let languages: LanguageBytes = response.json().await?;
        Ok(languages)
    }

    /// Get a user's public profile.
    pub async fn get_user(&self, owner: &str) -> Result<Profile> {
        let response = self.get(&format!("/users/{}", owner)).await?;
        let profile: Profile = response.json().await?;
        Ok(profile)
    }

    /// Get README metadata for a repository.
    pub async fn get_repo_readme(&self, owner: &str, repo: &str) -> Result<Readme> {
        let response = self
            .get(&format!("/repos/{}/{}/readme", owner, repo))
            .await?;
        let readme: Readme = response.json().await?;
        Ok(readme)
    }
}
