//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SalesError ← CoreError (not found, stock, validation) or DbError      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in REST app) ← Status code + JSON body                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kasir_core::{CoreError, ValidationError};
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - Update or delete of an id that doesn't exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique constraint violation.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Referencing a non-existent category_id
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// CHECK constraint violation (negative price/stock/total).
    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Database file doesn't exist and can't be created
    /// - File permissions issue
    /// - Malformed connection string
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The database stayed locked by another writer past the busy timeout.
    #[error("Database is busy: {0}")]
    Busy(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Analyze message for constraint type
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports constraint kinds in the message text:
                // "UNIQUE constraint failed: <table>.<column>"
                // "FOREIGN KEY constraint failed"
                // "CHECK constraint failed: <expr>"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("CHECK constraint failed") {
                    DbError::ConstraintViolation {
                        message: msg.to_string(),
                    }
                } else if msg.contains("database is locked") || msg.contains("database is busy") {
                    DbError::Busy(msg.to_string())
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Sales Error
// =============================================================================

/// Error returned by the checkout and reporting operations.
///
/// A checkout can fail on a business rule (validation, unknown product,
/// insufficient stock) or on storage. Either way the unit of work has been
/// rolled back by the time the caller sees this.
#[derive(Debug, Error)]
pub enum SalesError {
    /// A business rule rejected the request.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The durable store failed.
    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

/// The distinguishable kinds a caller maps to responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesErrorKind {
    Validation,
    ProductNotFound,
    InsufficientStock,
    Storage,
}

impl SalesError {
    /// Classifies the error.
    pub fn kind(&self) -> SalesErrorKind {
        match self {
            SalesError::Core(CoreError::Validation(_)) => SalesErrorKind::Validation,
            SalesError::Core(CoreError::AmountOverflow { .. }) => SalesErrorKind::Validation,
            SalesError::Core(CoreError::ProductNotFound(_)) => SalesErrorKind::ProductNotFound,
            SalesError::Core(CoreError::InsufficientStock { .. }) => {
                SalesErrorKind::InsufficientStock
            }
            SalesError::Storage(_) => SalesErrorKind::Storage,
        }
    }
}

impl From<ValidationError> for SalesError {
    fn from(err: ValidationError) -> Self {
        SalesError::Core(CoreError::Validation(err))
    }
}

impl From<sqlx::Error> for SalesError {
    fn from(err: sqlx::Error) -> Self {
        SalesError::Storage(DbError::from(err))
    }
}

/// Result type for checkout and reporting operations.
pub type SalesResult<T> = Result<T, SalesError>;
