// Project aggregation.
// Combines cached GitHub listings, language breakdowns, and the featured allow-list.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::cache::{CacheStats, Clock, TtlCache};
use crate::config::Config;
use crate::error::{PortfolioError, Result};
use crate::github::{Fetcher, Profile, Readme, Repository};

use super::featured::FeaturedSet;
use super::filter::ProjectFilter;
use super::languages::{LanguageBreakdown, compute_breakdown};
use super::stats::{AccountStats, compute_stats};

/// Repository with its language breakdown attached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedRepository {
    #[serde(flatten)]
    pub repository: Repository,
    pub languages: LanguageBreakdown,
    /// Name is on the featured allow-list.
    pub featured: bool,
}

/// Single repository view including README metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositoryDetail {
    #[serde(flatten)]
    pub project: EnrichedRepository,
    pub readme: Option<Readme>,
}

/// One TTL cache per resource kind.
pub struct ProjectCaches {
    pub repos: TtlCache<Vec<Repository>>,
    pub languages: TtlCache<LanguageBreakdown>,
    pub profiles: TtlCache<Profile>,
    pub details: TtlCache<RepositoryDetail>,
}

impl ProjectCaches {
    pub fn new(
        listing_ttl: Duration,
        detail_ttl: Duration,
        profile_ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repos: TtlCache::new(listing_ttl, clock.clone()),
            languages: TtlCache::new(detail_ttl, clock.clone()),
            profiles: TtlCache::new(profile_ttl, clock.clone()),
            details: TtlCache::new(detail_ttl, clock),
        }
    }

    pub fn from_config(config: &Config, clock: Arc<dyn Clock>) -> Self {
        Self::new(
            config.listing_ttl(),
            config.detail_ttl(),
            config.profile_ttl(),
            clock,
        )
    }

    pub fn stats(&self) -> CacheStats {
        self.repos
            .stats()
            .merge(self.languages.stats())
            .merge(self.profiles.stats())
            .merge(self.details.stats())
    }
}

fn repos_key(owner: &str) -> String {
    format!("repos:{}", owner)
}

fn languages_key(owner: &str, repo: &str) -> String {
    format!("languages:{}/{}", owner, repo)
}

fn profile_key(owner: &str) -> String {
    format!("profile:{}", owner)
}

fn detail_key(owner: &str, repo: &str) -> String {
    format!("repo:{}/{}", owner, repo)
}

/// Names GitHub accepts for repositories: ASCII alphanumerics, `-`, `_` and `.`.
pub fn is_valid_repo_name(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= 100
        && name != "."
        && name != ".."
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}

/// Serves the portfolio's repository views from cache, falling back to the fetcher.
pub struct Aggregator {
    fetcher: Arc<dyn Fetcher>,
    caches: ProjectCaches,
    featured: FeaturedSet,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn Fetcher>, caches: ProjectCaches, featured: FeaturedSet) -> Self {
        Self {
            fetcher,
            caches,
            featured,
        }
    }

    pub fn featured_set(&self) -> &FeaturedSet {
        &self.featured
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.caches.stats()
    }

    /// Every repository the owner has, as last fetched.
    pub async fn repositories(&self, owner: &str) -> Result<Vec<Repository>> {
        let key = repos_key(owner);
        if let Some(repos) = self.caches.repos.get(&key) {
            debug!(owner, "repository listing cache hit");
            return Ok(repos);
        }

        debug!(owner, "repository listing cache miss");
        let repos = self.fetcher.list_repositories(owner).await?;
        self.caches.repos.set(key, repos.clone());
        Ok(repos)
    }

    /// Allow-listed repositories in allow-list order, with languages attached.
    pub async fn featured(&self, owner: &str) -> Result<Vec<EnrichedRepository>> {
        let mut selected: Vec<(usize, Repository)> = self
            .repositories(owner)
            .await?
            .into_iter()
            .filter_map(|repo| self.featured.position(&repo.name).map(|pos| (pos, repo)))
            .collect();
        selected.sort_by_key(|(pos, _)| *pos);

        let repos = selected.into_iter().map(|(_, repo)| repo).collect();
        Ok(self.enrich(owner, repos).await)
    }

    /// Non-fork, non-archived repositories, most recently updated first.
    pub async fn all(&self, owner: &str, filter: &ProjectFilter) -> Result<Vec<EnrichedRepository>> {
        let mut repos: Vec<Repository> = self
            .repositories(owner)
            .await?
            .into_iter()
            .filter(Repository::is_active_source)
            .filter(|repo| filter.matches(repo, &self.featured))
            .collect();

        repos.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        filter.truncate(&mut repos);

        Ok(self.enrich(owner, repos).await)
    }

    /// Language breakdown for one repository; empty if GitHub could not be reached.
    pub async fn languages(&self, owner: &str, repo: &str) -> LanguageBreakdown {
        match self.fetch_languages(owner, repo).await {
            Ok(breakdown) => breakdown,
            Err(e) => {
                warn!(owner, repo, error = %e, "language fetch failed, using empty breakdown");
                Vec::new()
            }
        }
    }

    /// Cached breakdown, or a fresh one from the fetcher. Only successes are stored.
    async fn fetch_languages(&self, owner: &str, repo: &str) -> Result<LanguageBreakdown> {
        let key = languages_key(owner, repo);
        if let Some(breakdown) = self.caches.languages.get(&key) {
            return Ok(breakdown);
        }

        let breakdown = compute_breakdown(&self.fetcher.get_languages(owner, repo).await?);
        self.caches.languages.set(key, breakdown.clone());
        Ok(breakdown)
    }

    pub async fn profile(&self, owner: &str) -> Result<Profile> {
        let key = profile_key(owner);
        if let Some(profile) = self.caches.profiles.get(&key) {
            return Ok(profile);
        }

        let profile = self.fetcher.get_profile(owner).await?;
        self.caches.profiles.set(key, profile.clone());
        Ok(profile)
    }

    /// Detail view of one repository by name.
    pub async fn repository(&self, owner: &str, name: &str) -> Result<RepositoryDetail> {
        if !is_valid_repo_name(name) {
            return Err(PortfolioError::NotFound(format!("repository '{}'", name)));
        }

        let key = detail_key(owner, name);
        if let Some(detail) = self.caches.details.get(&key) {
            return Ok(detail);
        }

        let repository = match self.fetcher.get_repository(owner, name).await {
            Ok(repository) => repository,
            Err(e) if e.upstream_status() == Some(404) => {
                return Err(PortfolioError::NotFound(format!("repository '{}'", name)));
            }
            Err(e) => return Err(e),
        };

        let (languages, readme) = tokio::join!(
            self.fetch_languages(owner, name),
            self.fetcher.get_readme(owner, name)
        );

        // A detail built from a failed fetch is served once but never cached
        let mut complete = true;
        let languages = languages.unwrap_or_else(|e| {
            warn!(owner, repo = name, error = %e, "language fetch failed, using empty breakdown");
            complete = false;
            Vec::new()
        });
        let readme = match readme {
            Ok(readme) => Some(readme),
            Err(e) if e.upstream_status() == Some(404) => {
                debug!(owner, repo = name, "no README available");
                None
            }
            Err(e) => {
                warn!(owner, repo = name, error = %e, "README fetch failed");
                complete = false;
                None
            }
        };

        let detail = RepositoryDetail {
            project: EnrichedRepository {
                featured: self.featured.contains(&repository.name),
                repository,
                languages,
            },
            readme,
        };
        if complete {
            self.caches.details.set(key, detail.clone());
        }
        Ok(detail)
    }

    /// Account summary built from the cached listing and profile.
    pub async fn stats(&self, owner: &str) -> Result<AccountStats> {
        let (profile, repos) = tokio::join!(self.profile(owner), self.repositories(owner));
        Ok(compute_stats(&profile?, &repos?))
    }

    async fn enrich(&self, owner: &str, repos: Vec<Repository>) -> Vec<EnrichedRepository> {
        let breakdowns = join_all(repos.iter().map(|repo| self.languages(owner, &repo.name))).await;

        repos
            .into_iter()
            .zip(breakdowns)
            .map(|(repository, languages)| EnrichedRepository {
                featured: self.featured.contains(&repository.name),
                repository,
                languages,
            })
            .collect()
    }
}
