//! Axum-specific error types and mappings.
//!
//! Maps core errors to HTTP status codes and a JSON `{error, status}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cfphub_core::{AggregationError, CoreError, PortalError, RepositoryError};
use serde::Serialize;
use thiserror::Error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (invalid input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A portal failed or returned unusable data.
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// Aggregation ran past its deadline.
    #[error("Gateway timeout: {0}")]
    GatewayTimeout(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::GatewayTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::warn!(status = status.as_u16(), error = %self, "Request failed");
        }
        let message = match self {
            Self::NotFound(msg)
            | Self::BadRequest(msg)
            | Self::BadGateway(msg)
            | Self::GatewayTimeout(msg)
            | Self::Internal(msg) => msg,
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
        };
        (status, axum::Json(body)).into_response()
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Repository(repo_err) => repo_err.into(),
            CoreError::Portal(portal_err) => portal_err.into(),
            CoreError::Aggregation(agg_err) => agg_err.into(),
            CoreError::Config(config_err) => Self::BadRequest(config_err.to_string()),
        }
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::Storage(msg) => Self::Internal(format!("Storage: {msg}")),
            RepositoryError::Serialization(msg) => {
                Self::Internal(format!("Serialization: {msg}"))
            }
            RepositoryError::Constraint(msg) => Self::BadRequest(msg),
            RepositoryError::Invalid(e) => Self::BadGateway(e.to_string()),
        }
    }
}

impl From<PortalError> for HttpError {
    fn from(err: PortalError) -> Self {
        match err {
            PortalError::Configuration { message } => Self::Internal(message),
            other => Self::BadGateway(other.to_string()),
        }
    }
}

impl From<AggregationError> for HttpError {
    fn from(err: AggregationError) -> Self {
        match err {
            AggregationError::Timeout { .. } => Self::GatewayTimeout(err.to_string()),
            AggregationError::Portal { .. } | AggregationError::Invalid(_) => {
                Self::BadGateway(err.to_string())
            }
            AggregationError::Storage(_) | AggregationError::Internal(_) => {
                Self::Internal(err.to_string())
            }
        }
    }
}
