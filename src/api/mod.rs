// REST API module.
// axum router, handlers, and the JSON envelopes they return.

mod error;
mod handlers;
mod router;
pub mod types;

pub use error::{ApiError, status_for};
pub use router::create_router;
pub use types::{
    ApiResponse, AppState, ErrorBody, HealthResponse, ProjectsPayload, ProjectsQuery, ProjectsType,
};
