//! Error types for MySQL operations.

use std::time::Duration;

use thiserror::Error;

/// Server error code for rejected credentials.
const ER_ACCESS_DENIED: u16 = 1045;

/// Result type for MySQL operations.
pub type MysqlResult<T> = Result<T, MysqlError>;

/// Error type for MySQL operations.
#[derive(Debug, Error)]
pub enum MysqlError {
    /// MySQL driver error.
    #[error("MySQL error: {0}")]
    Mysql(#[from] mysql_async::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// Connecting took longer than the configured timeout.
    #[error("Timed out after {}s connecting to {host}", .after.as_secs())]
    Timeout {
        /// Host the connection was attempted against.
        host: String,
        /// Configured timeout.
        after: Duration,
    },
}

impl MysqlError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Whether the server could not be reached or refused the credentials.
    pub fn is_connectivity(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Mysql(mysql_async::Error::Io(_)) => true,
            Self::Mysql(mysql_async::Error::Driver(_)) => true,
            Self::Mysql(mysql_async::Error::Server(e)) => e.code == ER_ACCESS_DENIED,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MysqlError::config("invalid url");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("invalid url"));
    }

    #[test]
    fn test_timeout_display() {
        let err = MysqlError::Timeout {
            host: "db.internal".to_string(),
            after: Duration::from_secs(10),
        };
        assert_eq!(err.to_string(), "Timed out after 10s connecting to db.internal");
    }

    #[test]
    fn test_connectivity_classification() {
        assert!(
            MysqlError::Timeout {
                host: "localhost".to_string(),
                after: Duration::from_secs(1),
            }
            .is_connectivity()
        );
        assert!(!MysqlError::query("syntax").is_connectivity());
        assert!(!MysqlError::config("bad").is_connectivity());
    }

    fn server_error(code: u16, state: &str) -> MysqlError {
        MysqlError::Mysql(mysql_async::Error::Server(mysql_async::ServerError {
            code,
            message: "server said no".to_string(),
            state: state.to_string(),
        }))
    }

    #[test]
    fn test_access_denied_is_connectivity() {
        assert!(server_error(1045, "28000").is_connectivity());
        assert!(!server_error(1064, "42000").is_connectivity());
    }
}
