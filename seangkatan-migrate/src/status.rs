//! Read-only database inspection.

use serde::Serialize;
use tracing::debug;

use crate::error::MigrateResult;
use crate::executor::Executor;
use crate::lifecycle::quote_identifier;

/// Tables whose row counts the status report includes.
pub const KEY_TABLES: &[&str] = &["users", "classes", "events", "quizzes"];

/// Snapshot of the target database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatabaseStatus {
    /// Whether a connection could be opened and queried.
    pub connected: bool,
    /// Database name inspected.
    pub database: String,
    /// Tables present, sorted by name.
    pub tables: Vec<String>,
    /// Row counts of the key tables that exist.
    pub key_table_rows: Vec<(String, u64)>,
    /// Why inspection failed, when it did.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DatabaseStatus {
    /// Status for a database that could not be inspected.
    pub fn unavailable(database: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            connected: false,
            database: database.into(),
            tables: Vec::new(),
            key_table_rows: Vec::new(),
            error: Some(error.into()),
        }
    }

    /// Number of tables present.
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }
}

/// List the tables of `database` and count rows of the key tables.
pub async fn inspect<E>(executor: &mut E, database: &str) -> MigrateResult<DatabaseStatus>
where
    E: Executor + ?Sized,
{
    let tables = executor.table_names(database).await?;
    debug!(database, count = tables.len(), "Tables listed");

    let mut key_table_rows = Vec::new();
    for &table in KEY_TABLES {
        if !tables.iter().any(|t| t == table) {
            continue;
        }
        let sql = format!(
            "SELECT COUNT(*) FROM {}.{}",
            quote_identifier(database)?,
            quote_identifier(table)?
        );
        let rows = executor.count(&sql).await?;
        key_table_rows.push((table.to_string(), rows));
    }

    Ok(DatabaseStatus {
        connected: true,
        database: database.to_string(),
        tables,
        key_table_rows,
        error: None,
    })
}
