//! Error types for the lifecycle orchestrator.

use std::path::PathBuf;

use seangkatan_mysql::MysqlError;
use thiserror::Error;

/// Result type alias for orchestration operations.
pub type MigrateResult<T> = Result<T, MigrationError>;

/// Errors that can occur while building, seeding or exporting the database.
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Connecting or talking to the server failed outside a specific step.
    #[error("Database error: {0}")]
    Database(#[from] MysqlError),

    /// A DDL statement failed. Tables created before it are kept.
    #[error("Failed to create table '{table}': {source}")]
    Schema {
        /// Table whose DDL failed.
        table: &'static str,
        /// Driver error.
        #[source]
        source: MysqlError,
    },

    /// A table is declared before one of the tables it references.
    #[error("Table '{table}' is declared before its dependency '{dependency}'")]
    InvalidOrder {
        /// Referencing table.
        table: &'static str,
        /// Referenced table.
        dependency: &'static str,
    },

    /// Emptying a table during a forced reseed failed.
    #[error("Failed to truncate table '{table}': {source}")]
    Truncate {
        /// Table being truncated.
        table: &'static str,
        /// Driver error.
        #[source]
        source: MysqlError,
    },

    /// A fixture row could not be inserted.
    #[error("Failed to seed table '{table}': {source}")]
    Seed {
        /// Table being seeded.
        table: &'static str,
        /// Driver error.
        #[source]
        source: MysqlError,
    },

    /// A fixture refers to a record no earlier step produced.
    #[error("Fixture references unknown {entity} '{key}'")]
    UnresolvedReference {
        /// Entity kind being looked up.
        entity: &'static str,
        /// Fixture key that was not found.
        key: String,
    },

    /// Password hashing failed.
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    /// A database name that cannot be used as an identifier.
    #[error("Invalid database name '{0}': only letters, digits, '_' and '$' are allowed")]
    InvalidIdentifier(String),

    /// No database name is configured for an operation that needs one.
    #[error("No database name configured")]
    MissingDatabase,

    /// The dump utility could not be started.
    #[error("Failed to run '{binary}': {source}")]
    DumpSpawn {
        /// Dump binary that was invoked.
        binary: String,
        /// Spawn error.
        #[source]
        source: std::io::Error,
    },

    /// The dump utility exited unsuccessfully.
    #[error("{binary} exited with code {}{}", exit_code_label(.code), stderr_suffix(.stderr))]
    DumpFailed {
        /// Dump binary that was invoked.
        binary: String,
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// Writing the backup file failed.
    #[error("Failed to write backup to {path}: {source}")]
    BackupIo {
        /// Target path.
        path: PathBuf,
        /// I/O error.
        #[source]
        source: std::io::Error,
    },
}

fn exit_code_label(code: &Option<i32>) -> String {
    code.map_or_else(|| "<signal>".to_string(), |c| c.to_string())
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

impl MigrationError {
    /// Whether the failure happened before any session with the server existed.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Database(e) if e.is_connectivity())
    }
}
