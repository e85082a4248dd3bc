// Error types for the portfolio API.
// Covers upstream GitHub failures, missing resources, and configuration problems.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    /// Non-2xx response or transport failure talking to GitHub.
    #[error("GitHub API error ({}): {message}", status_label(.status))]
    Upstream {
        status: Option<u16>,
        message: String,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl PortfolioError {
    /// Build an upstream error from an HTTP status and response text.
    pub fn upstream(status: u16, message: impl Into<String>) -> Self {
        PortfolioError::Upstream {
            status: Some(status),
            message: message.into(),
        }
    }

    /// HTTP status reported by GitHub, if a response was received.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            PortfolioError::Upstream { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PortfolioError {
    fn from(err: reqwest::Error) -> Self {
        PortfolioError::Upstream {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

fn status_label(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("HTTP {}", code),
        None => "no response".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, PortfolioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display_with_status() {
        let err = PortfolioError::upstream(503, "Service Unavailable");
        assert_eq!(
            err.to_string(),
            "GitHub API error (HTTP 503): Service Unavailable"
        );
        assert_eq!(err.upstream_status(), Some(503));
    }

    #[test]
    fn test_upstream_display_without_status() {
        let err = PortfolioError::Upstream {
            status: None,
            message: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "GitHub API error (no response): connection refused"
        );
        assert_eq!(err.upstream_status(), None);
    }

    #[test]
    fn test_not_found_has_no_upstream_status() {
        let err = PortfolioError::NotFound("repo".to_string());
        assert_eq!(err.upstream_status(), None);
        assert_eq!(err.to_string(), "Resource not found: repo");
    }
}
