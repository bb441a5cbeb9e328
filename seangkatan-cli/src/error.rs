//! CLI error types and result alias.

use miette::Diagnostic;
use seangkatan_migrate::MigrationError;
use thiserror::Error;

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug, Diagnostic)]
pub enum CliError {
    /// IO error
    #[error("IO error: {0}")]
    #[diagnostic(code(seangkatan::io))]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    #[diagnostic(
        code(seangkatan::config),
        help("check seangkatan.toml, .env and the DB_* environment variables")
    )]
    Config(String),

    /// Lifecycle operation error
    #[error("Migration error: {0}")]
    #[diagnostic(code(seangkatan::migration))]
    Migration(#[from] MigrationError),

    /// Output serialization error
    #[error("Serialization error: {0}")]
    #[diagnostic(code(seangkatan::serialize))]
    Serialize(#[from] serde_json::Error),
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::Config(format!("Failed to parse TOML: {}", err))
    }
}

impl CliError {
    /// Follow-up advice printed under the error, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            CliError::Migration(e) if e.is_connectivity() => {
                Some("check DB_HOST, DB_PORT, DB_USER and DB_PASSWORD")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use seangkatan_mysql::MysqlError;

    use super::*;

    #[test]
    fn test_migration_error_message() {
        let err = CliError::from(MigrationError::MissingDatabase);
        assert_eq!(
            err.to_string(),
            "Migration error: No database name configured"
        );
    }

    #[test]
    fn test_connectivity_errors_carry_a_hint() {
        let err = CliError::from(MigrationError::Database(MysqlError::Timeout {
            host: "db.internal".to_string(),
            after: Duration::from_secs(5),
        }));
        assert!(err.hint().is_some_and(|hint| hint.contains("DB_HOST")));

        let err = CliError::from(MigrationError::MissingDatabase);
        assert_eq!(err.hint(), None);
    }

    #[test]
    fn test_toml_error_is_config_error() {
        let err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err = CliError::from(err);
        assert!(matches!(err, CliError::Config(_)));
        assert!(err.to_string().starts_with("Configuration error: Failed to parse TOML"));
    }
}
