//! Error types for repository operations.

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations.
///
/// Validation failures, missing rows, and infrastructure errors are kept
/// distinct so the HTTP layer can map each to its own status code.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    /// Connection pool or database connection errors. Typically transient.
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// SQL query execution errors.
    #[error("Query error: {message}")]
    Query { message: String, retryable: bool },

    /// Requested entity was not found.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// A write violated a data constraint (missing required field, dangling
    /// foreign key). The surrounding transaction has been rolled back.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Configuration or initialization error.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Internal/unexpected errors.
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl RepositoryError {
    /// Create a connection error. Connection errors are retryable.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a non-retryable query error.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            retryable: false,
        }
    }

    /// Create a not-found error for an entity/id pair.
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound { entity, id }
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Whether retrying the operation could succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connection { .. } => true,
            Self::Query { retryable, .. } => *retryable,
            _ => false,
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::DatabaseErrorKind;

        match err {
            diesel::result::Error::NotFound => RepositoryError::query("Record not found"),
            diesel::result::Error::DatabaseError(kind, info) => {
                let message = info.message().to_string();
                match kind {
                    // Constraint violations are caller input problems, and
                    // Postgres has already rolled the transaction back.
                    DatabaseErrorKind::ForeignKeyViolation
                    | DatabaseErrorKind::NotNullViolation
                    | DatabaseErrorKind::CheckViolation
                    | DatabaseErrorKind::UniqueViolation => RepositoryError::validation(message),
                    DatabaseErrorKind::SerializationFailure => RepositoryError::Query {
                        message,
                        retryable: true,
                    },
                    _ => RepositoryError::query(message),
                }
            }
            diesel::result::Error::QueryBuilderError(e) => {
                RepositoryError::query(format!("Query builder error: {}", e))
            }
            diesel::result::Error::DeserializationError(e) => {
                RepositoryError::internal(format!("Deserialization error: {}", e))
            }
            diesel::result::Error::SerializationError(e) => {
                RepositoryError::internal(format!("Serialization error: {}", e))
            }
            other => RepositoryError::query(other.to_string()),
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::connection(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display_names_entity() {
        let err = RepositoryError::not_found("Scientist", 9);
        assert_eq!(err.to_string(), "Scientist 9 not found");
    }

    #[test]
    fn test_retryable_classification() {
        assert!(RepositoryError::connection("pool exhausted").is_retryable());
        assert!(!RepositoryError::query("syntax error").is_retryable());
        assert!(!RepositoryError::validation("name is required").is_retryable());
        assert!(RepositoryError::Query {
            message: "serialization failure".to_string(),
            retryable: true,
        }
        .is_retryable());
    }
}
