//! Data access errors

/// PostgreSQL SQLSTATE for `unique_violation`
pub const UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL SQLSTATE for `foreign_key_violation`
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// Error type for database operations
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("No rows returned: {0}")]
    NotFound(String),

    #[error("Invalid procedure name: {0}")]
    InvalidProcedure(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Result type for database operations
pub type DbResult<T> = Result<T, DbError>;

impl DbError {
    /// SQLSTATE reported by the server, if the failure came from a statement
    pub fn sql_state(&self) -> Option<String> {
        match self {
            Self::Database(sqlx::Error::Database(e)) => e.code().map(|code| code.into_owned()),
            _ => None,
        }
    }

    /// Unique or foreign-key constraint violation
    pub fn is_integrity_violation(&self) -> bool {
        matches!(
            self.sql_state().as_deref(),
            Some(UNIQUE_VIOLATION) | Some(FOREIGN_KEY_VIOLATION)
        )
    }
}
