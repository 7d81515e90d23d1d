use diesel::result::Error as DieselError;
use std::fmt::Display;
use thiserror::Error;

/// Error raised while bootstrapping the database at startup
#[derive(Debug, Error)]
pub enum InitError {
    #[error("cannot init database pool : {0}")]
    Pool(String),
    #[error("cannot reach database : {0}")]
    Connection(String),
    #[error("cannot run database migrations : {0}")]
    Migration(String),
}

/// Runtime database error, always tagged with the operation that failed
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to get connection from pool for operation '{operation}': {message}")]
    PoolError { operation: String, message: String },

    #[error("Database interaction failed for operation '{operation}': {message}")]
    InteractionError { operation: String, message: String },

    #[error("Record not found in operation '{operation}'")]
    NotFound { operation: String },

    #[error("Database query error in operation '{operation}': {message}")]
    QueryError { operation: String, message: String },

    #[error("Unique constraint violation in operation '{operation}': {message}")]
    UniqueViolation { operation: String, message: String },

    #[error("Stored value is invalid in operation '{operation}': {message}")]
    InvalidRow { operation: String, message: String },
}

impl DatabaseError {
    /// Create a `QueryError` with operation context
    pub fn query_error(operation: impl Display, message: impl Display) -> Self {
        Self::QueryError {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an `InvalidRow` error for a row that cannot be mapped back to the domain
    pub fn invalid_row(operation: impl Display, message: impl Display) -> Self {
        Self::InvalidRow {
            operation: operation.to_string(),
            message: message.to_string(),
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Extract the operation context from the error
    pub fn operation(&self) -> &str {
        match self {
            Self::PoolError { operation, .. }
            | Self::InteractionError { operation, .. }
            | Self::NotFound { operation }
            | Self::QueryError { operation, .. }
            | Self::UniqueViolation { operation, .. }
            | Self::InvalidRow { operation, .. } => operation,
        }
    }

    /// Replace the operation recorded by a conversion that had no context
    #[must_use]
    pub fn with_operation(self, operation: impl Display) -> Self {
        let operation = operation.to_string();
        match self {
            Self::PoolError { message, .. } => Self::PoolError { operation, message },
            Self::InteractionError { message, .. } => Self::InteractionError { operation, message },
            Self::NotFound { .. } => Self::NotFound { operation },
            Self::QueryError { message, .. } => Self::QueryError { operation, message },
            Self::UniqueViolation { message, .. } => Self::UniqueViolation { operation, message },
            Self::InvalidRow { message, .. } => Self::InvalidRow { operation, message },
        }
    }
}

impl From<DieselError> for DatabaseError {
    fn from(err: DieselError) -> Self {
        match err {
            DieselError::NotFound => Self::NotFound {
                operation: "unknown".to_string(),
            },
            DieselError::DatabaseError(
                diesel::result::DatabaseErrorKind::UniqueViolation,
                info,
            ) => Self::UniqueViolation {
                operation: "unknown".to_string(),
                message: info.message().to_string(),
            },
            other => Self::QueryError {
                operation: "unknown".to_string(),
                message: other.to_string(),
            },
        }
    }
}
