// Service configuration.
// Built once at startup from defaults, an optional config file, and the environment.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{PortfolioError, Result};
use crate::github::GITHUB_API_BASE;
use crate::projects::DEFAULT_FEATURED;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "PORTFOLIO_CONFIG";

/// Runtime configuration for the portfolio API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Address to bind the HTTP listener to.
    pub host: String,
    pub port: u16,

    /// GitHub account whose repositories are shown.
    pub owner: String,

    /// Optional token; requests go out unauthenticated without it.
    pub github_token: Option<String>,

    /// Base URL of the GitHub REST API.
    pub api_base_url: String,

    pub request_timeout_secs: u64,

    /// TTL for repository listings.
    pub listing_ttl_secs: u64,
    /// TTL for per-repository languages and detail.
    pub detail_ttl_secs: u64,
    /// TTL for the owner's profile.
    pub profile_ttl_secs: u64,

    /// Ordered allow-list of featured repository names.
    pub featured: Vec<String>,

    /// Include debug detail in error responses.
    pub dev_mode: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            owner: "sandiphembram2021".to_string(),
            github_token: None,
            api_base_url: GITHUB_API_BASE.to_string(),
            request_timeout_secs: 10,
            listing_ttl_secs: 10 * 60,
            detail_ttl_secs: 30 * 60,
            profile_ttl_secs: 60 * 60,
            featured: DEFAULT_FEATURED.iter().map(|s| s.to_string()).collect(),
            dev_mode: false,
        }
    }
}

impl Config {
    /// Load configuration from `.env`, the config file, and `PORTFOLIO_*` variables.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let path = std::env::var(CONFIG_PATH_ENV)
            .ok()
            .map(PathBuf::from)
            .or_else(default_config_path);

        let mut config = Self::from_sources(path.as_deref(), true)?;

        // Conventional GitHub variables win over the prefixed ones.
        if let Ok(token) = std::env::var("GITHUB_TOKEN") {
            config.github_token = Some(token);
        }
        if let Ok(owner) = std::env::var("GITHUB_USERNAME") {
            config.owner = owner;
        }

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from an optional file, optionally layering the environment.
    pub fn from_sources(path: Option<&Path>, with_env: bool) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        if with_env {
            builder = builder.add_source(
                config::Environment::with_prefix("PORTFOLIO")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("featured"),
            );
        }

        let config = builder
            .build()
            .and_then(|cfg| cfg.try_deserialize::<Config>())
            .map_err(|e| PortfolioError::Config(e.to_string()))?;

        Ok(config)
    }

    /// Drop empty strings that env files commonly leave behind.
    fn normalize(&mut self) {
        if self.github_token.as_deref().is_some_and(|t| t.trim().is_empty()) {
            self.github_token = None;
        }
        self.featured.retain(|name| !name.trim().is_empty());
        self.api_base_url = self.api_base_url.trim_end_matches('/').to_string();
    }

    fn validate(&self) -> Result<()> {
        if self.owner.trim().is_empty() {
            return Err(PortfolioError::Config("owner must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(PortfolioError::Config(
                "request_timeout_secs must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn listing_ttl(&self) -> Duration {
        Duration::from_secs(self.listing_ttl_secs)
    }

    pub fn detail_ttl(&self) -> Duration {
        Duration::from_secs(self.detail_ttl_secs)
    }

    pub fn profile_ttl(&self) -> Duration {
        Duration::from_secs(self.profile_ttl_secs)
    }

    /// Socket address string for the listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Platform config file location (~/.config/portfolio-api/config.toml on Linux).
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "portfolio-api").map(|dirs| dirs.config_dir().join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.owner, "sandiphembram2021");
        assert!(config.github_token.is_none());
        assert_eq!(config.listing_ttl(), Duration::from_secs(600));
        assert_eq!(config.detail_ttl(), Duration::from_secs(1800));
        assert_eq!(config.profile_ttl(), Duration::from_secs(3600));
        assert_eq!(config.featured.len(), DEFAULT_FEATURED.len());
        assert!(!config.dev_mode);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        let config = Config::from_sources(Some(path.as_path()), false).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.api_base_url, "https://api.github.com");
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
port = 3000
owner = "octocat"
listing_ttl_secs = 60
featured = ["hello-world", "spoon-knife"]
dev_mode = true
"#,
        )
        .unwrap();

        let config = Config::from_sources(Some(path.as_path()), false).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.owner, "octocat");
        assert_eq!(config.listing_ttl(), Duration::from_secs(60));
        assert_eq!(config.featured, vec!["hello-world", "spoon-knife"]);
        assert!(config.dev_mode);
        // Untouched fields keep their defaults
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.profile_ttl_secs, 3600);
    }

    #[test]
    fn test_normalize_drops_blank_values() {
        let mut config = Config {
            github_token: Some("  ".to_string()),
            featured: vec!["a".to_string(), "".to_string()],
            api_base_url: "http://localhost:1234/".to_string(),
            ..Config::default()
        };
        config.normalize();

        assert!(config.github_token.is_none());
        assert_eq!(config.featured, vec!["a"]);
        assert_eq!(config.api_base_url, "http://localhost:1234");
    }

    #[test]
    fn test_validate_rejects_empty_owner() {
        let config = Config {
            owner: " ".to_string(),
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(PortfolioError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            request_timeout_secs: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_path_name() {
        if let Some(path) = default_config_path() {
            assert!(path.ends_with("config.toml"));
        }
    }
}
