// HTTP error responses.
// Maps PortfolioError onto status codes and the JSON failure envelope.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::error::PortfolioError;

use super::types::ErrorBody;

/// A failed request: the cause plus a user-facing summary.
#[derive(Debug)]
pub struct ApiError {
    pub error: PortfolioError,
    pub summary: &'static str,
    pub dev_mode: bool,
}

impl ApiError {
    pub fn new(summary: &'static str, error: PortfolioError, dev_mode: bool) -> Self {
        Self {
            error,
            summary,
            dev_mode,
        }
    }

    pub fn status(&self) -> StatusCode {
        status_for(&self.error)
    }
}

/// Upstream client errors about the request itself pass through; the rest are 500s.
pub fn status_for(err: &PortfolioError) -> StatusCode {
    match err {
        PortfolioError::NotFound(_) => StatusCode::NOT_FOUND,
        PortfolioError::Upstream {
            status: Some(code @ (400 | 404 | 422)),
            ..
        } => StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        error!(status = status.as_u16(), error = %self.error, "{}", self.summary);

        let body = ErrorBody {
            success: false,
            error: self.summary.to_string(),
            message: Some(self.error.to_string()),
            detail: self.dev_mode.then(|| format!("{:?}", self.error)),
        };

        (status, Json(body)).into_response()
    }
}
