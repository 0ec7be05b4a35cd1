//! CLI error classification and exit codes.

use cfphub_core::{AggregationError, ConfigError, CoreError, RepositoryError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Anything without a more specific category.
    #[error("{0}")]
    General(String),

    /// Invalid input.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// A named portal or event does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database error.
    #[error("Database error: {0}")]
    Database(String),

    /// A portal failed or could not be reached.
    #[error("Portal unavailable: {0}")]
    Unavailable(String),

    /// Aggregation ran past its deadline.
    #[error("Timed out: {0}")]
    Timeout(String),
}

impl CliError {
    /// Map error to an exit code following sysexits.h.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::General(_) | Self::NotFound(_) => 1,
            Self::Arguments(_) => 64,   // EX_USAGE
            Self::Unavailable(_) => 69, // EX_UNAVAILABLE
            Self::Database(_) => 74,    // EX_IOERR
            Self::Timeout(_) => 75,     // EX_TEMPFAIL
            Self::Config(_) => 78,      // EX_CONFIG
        }
    }

    /// Classify an error returned by a command handler.
    pub fn classify(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(core) = cause.downcast_ref::<CoreError>() {
                return Self::from(core);
            }
            if let Some(agg) = cause.downcast_ref::<AggregationError>() {
                return Self::from(agg);
            }
            if let Some(config) = cause.downcast_ref::<ConfigError>() {
                return Self::Config(config.to_string());
            }
            if let Some(repo) = cause.downcast_ref::<RepositoryError>() {
                return Self::from(repo);
            }
        }
        Self::General(format!("{err:#}"))
    }
}

impl From<&RepositoryError> for CliError {
    fn from(err: &RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg.clone()),
            RepositoryError::Constraint(_) | RepositoryError::Invalid(_) => {
                Self::Arguments(err.to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<&AggregationError> for CliError {
    fn from(err: &AggregationError) -> Self {
        match err {
            AggregationError::Timeout { .. } => Self::Timeout(err.to_string()),
            AggregationError::Portal { .. } | AggregationError::Invalid(_) => {
                Self::Unavailable(err.to_string())
            }
            AggregationError::Storage(_) => Self::Database(err.to_string()),
            AggregationError::Internal(_) => Self::General(err.to_string()),
        }
    }
}

impl From<&CoreError> for CliError {
    fn from(err: &CoreError) -> Self {
        match err {
            CoreError::Repository(repo) => repo.into(),
            CoreError::Aggregation(agg) => agg.into(),
            CoreError::Portal(portal) => Self::Unavailable(portal.to_string()),
            CoreError::Config(config) => Self::Config(config.to_string()),
        }
    }
}
