use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use goldsim_domain::DomainError;
use goldsim_simulation::SimulationError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

/// API-layer error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 - Bad request (invalid input)
    #[error("{0}")]
    BadRequest(String),

    /// 504 - The run exceeded its time budget
    #[error("simulation timed out after {0} ms")]
    Timeout(u128),

    /// 503 - The run was cancelled before completing
    #[error("{0}")]
    Cancelled(String),

    /// 500 - Internal error
    #[error("{0}")]
    Internal(String),
}

/// JSON error response body
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    code: &'static str,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Cancelled(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Timeout(_) => "timeout",
            ApiError::Cancelled(_) => "cancelled",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Internal(msg) => error!(message = %msg, "request failed"),
            ApiError::Timeout(_) | ApiError::Cancelled(_) => {
                warn!(error = %self, "request aborted")
            }
            ApiError::BadRequest(_) => {}
        }

        let body = ErrorBody {
            error: self.to_string(),
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

// Engine errors: validation failures are the caller's fault
impl From<SimulationError> for ApiError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::InvalidParameter(e) => ApiError::BadRequest(e.to_string()),
            e @ SimulationError::Cancelled { .. } => ApiError::Cancelled(e.to_string()),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("simulation task failed: {err}"))
    }
}
