//! Error types for the catalog query demos
//!
//! Library functions return [`QueryError`] or [`ConfigError`]; the binary
//! wraps them in `anyhow` with additional context.
//!
//! # Examples
//!
//! ```rust
//! use catalog::errors::{DbErrorKind, QueryError};
//! use sea_orm::DbErr;
//!
//! let err = QueryError::from(DbErr::RecordNotFound("product 43".to_string()));
//! assert_eq!(err.db_kind(), Some(DbErrorKind::NotFound));
//! ```

use std::path::PathBuf;

use sea_orm::DbErr;
use thiserror::Error;

/// Errors raised while running a query demo inside a session
#[derive(Error, Debug)]
pub enum QueryError {
    /// The persistence provider rejected or failed the statement
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    /// A literal date bound could not be parsed as `YYYY-MM-DD`
    #[error("Invalid date '{value}': {source}")]
    InvalidDate {
        /// The literal that failed to parse
        value: String,
        /// Underlying chrono parse failure
        #[source]
        source: chrono::ParseError,
    },

    /// Beginning or finishing the ambient transaction failed
    #[error("Transaction error: {0}")]
    Transaction(String),
}

impl QueryError {
    /// Category of the underlying database error, if there is one
    pub fn db_kind(&self) -> Option<DbErrorKind> {
        match self {
            Self::Database(err) => Some(DbErrorKind::from_db_err(err)),
            _ => None,
        }
    }
}

/// Errors raised while loading the TOML configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Categories of database errors
///
/// Only used to label failures in logs; nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbErrorKind {
    /// Query returned no row where one was required
    NotFound,
    /// Unique constraint violation
    UniqueViolation,
    /// Foreign key constraint violation
    ForeignKeyViolation,
    /// Could not reach or open the database
    ConnectionError,
    /// Statement or acquire timeout
    Timeout,
    /// Anything else
    Unknown,
}

impl DbErrorKind {
    /// Categorize a sea_orm database error
    pub fn from_db_err(err: &DbErr) -> Self {
        match err {
            DbErr::RecordNotFound(_) => Self::NotFound,
            DbErr::Conn(err) if err.to_string().to_lowercase().contains("timeout") => {
                Self::Timeout
            }
            DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => Self::ConnectionError,
            DbErr::Exec(err) => Self::from_message(&err.to_string()),
            DbErr::Query(err) => Self::from_message(&err.to_string()),
            DbErr::Custom(msg) => Self::from_message(msg),
            _ => Self::Unknown,
        }
    }

    fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();
        if msg_lower.contains("unique") || msg_lower.contains("duplicate") {
            Self::UniqueViolation
        } else if msg_lower.contains("foreign key") {
            Self::ForeignKeyViolation
        } else if msg_lower.contains("timeout") {
            Self::Timeout
        } else {
            Self::Unknown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NotFound => "not_found",
            Self::UniqueViolation => "unique_violation",
            Self::ForeignKeyViolation => "foreign_key_violation",
            Self::ConnectionError => "connection",
            Self::Timeout => "timeout",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DbErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
