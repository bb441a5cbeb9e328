//! The lifecycle facade the CLI drives.
//!
//! Every operation opens its own connection and releases it on every exit
//! path before returning.

use std::path::PathBuf;
use std::sync::Arc;

use seangkatan_mysql::{MysqlConfig, MysqlConnection, MysqlPool};
use tracing::{debug, info, warn};

use crate::backup::{self, BackupOptions};
use crate::error::{MigrateResult, MigrationError};
use crate::lifecycle::{BuildReport, ensure_database, rebuild, recreate_database};
use crate::password::{Argon2Hasher, PasswordHasher};
use crate::schema::{SchemaReport, TABLES, apply_schema};
use crate::seed::{SeedMode, SeedOutcome, seed};
use crate::status::{DatabaseStatus, inspect};

/// One pool and the connection checked out of it.
struct Session {
    pool: MysqlPool,
    conn: MysqlConnection,
}

impl Session {
    async fn open(config: MysqlConfig) -> MigrateResult<Self> {
        let pool = MysqlPool::new(config);
        match pool.get().await {
            Ok(conn) => Ok(Self { pool, conn }),
            Err(e) => {
                if let Err(close_err) = pool.disconnect().await {
                    debug!(error = %close_err, "Pool close after failed connect");
                }
                Err(e.into())
            }
        }
    }

    fn executor(&mut self) -> &mut MysqlConnection {
        &mut self.conn
    }

    async fn close(self) {
        if let Err(e) = self.conn.close().await {
            warn!(error = %e, "Failed to close connection");
        }
        if let Err(e) = self.pool.disconnect().await {
            warn!(error = %e, "Failed to close connection pool");
        }
    }
}

/// Runs lifecycle operations against the configured database.
#[derive(Clone)]
pub struct Migrator {
    config: MysqlConfig,
    hasher: Arc<dyn PasswordHasher>,
}

impl Migrator {
    /// Migrator hashing seeded passwords with Argon2id.
    pub fn new(config: MysqlConfig) -> Self {
        Self {
            config,
            hasher: Arc::new(Argon2Hasher::new()),
        }
    }

    /// Replace the password hasher.
    pub fn with_hasher(mut self, hasher: impl PasswordHasher + 'static) -> Self {
        self.hasher = Arc::new(hasher);
        self
    }

    /// Connection settings, including the target database.
    pub fn config(&self) -> &MysqlConfig {
        &self.config
    }

    /// Target database name.
    pub fn database(&self) -> MigrateResult<&str> {
        self.config
            .database
            .as_deref()
            .ok_or(MigrationError::MissingDatabase)
    }

    /// Create the database if needed, then every missing table.
    pub async fn setup(&self) -> MigrateResult<SchemaReport> {
        let database = self.database()?;

        let mut server = Session::open(self.config.without_database()).await?;
        let created = ensure_database(server.executor(), database).await;
        server.close().await;
        created?;

        let mut session = Session::open(self.config.clone()).await?;
        let report = apply_schema(session.executor(), TABLES).await;
        session.close().await;

        let report = report?;
        info!(database, tables = report.tables.len(), "Schema applied");
        Ok(report)
    }

    /// Seed the fixture data.
    pub async fn seed(&self, mode: SeedMode) -> MigrateResult<SeedOutcome> {
        self.database()?;

        let mut session = Session::open(self.config.clone()).await?;
        let outcome = seed(session.executor(), self.hasher.as_ref(), TABLES, mode).await;
        session.close().await;
        outcome
    }

    /// [`setup`](Self::setup) followed by [`seed`](Self::seed).
    pub async fn migrate(&self, mode: SeedMode) -> MigrateResult<BuildReport> {
        let schema = self.setup().await?;
        let seed = self.seed(mode).await?;
        Ok(BuildReport { schema, seed })
    }

    /// Drop and recreate the database, then rebuild and force-seed it.
    ///
    /// The drop runs on a server-level connection. A failure there aborts
    /// before any schema work.
    pub async fn reset(&self) -> MigrateResult<BuildReport> {
        let database = self.database()?;

        let mut server = Session::open(self.config.without_database()).await?;
        let recreated = recreate_database(server.executor(), database).await;
        server.close().await;
        recreated?;

        let mut session = Session::open(self.config.clone()).await?;
        let report = rebuild(session.executor(), self.hasher.as_ref()).await;
        session.close().await;
        report
    }

    /// Inspect the database. Never fails: errors become an unavailable status.
    pub async fn status(&self) -> DatabaseStatus {
        let database = match self.database() {
            Ok(name) => name,
            Err(e) => return DatabaseStatus::unavailable("", e.to_string()),
        };

        let mut session = match Session::open(self.config.clone()).await {
            Ok(session) => session,
            Err(e) => {
                debug!(error = %e, "Status connection failed");
                return DatabaseStatus::unavailable(database, e.to_string());
            }
        };
        let status = inspect(session.executor(), database).await;
        session.close().await;

        status.unwrap_or_else(|e| DatabaseStatus::unavailable(database, e.to_string()))
    }

    /// Export the database through the dump binary.
    pub async fn backup(&self, options: &BackupOptions) -> MigrateResult<PathBuf> {
        backup::backup(&self.config, options).await
    }
}

impl std::fmt::Debug for Migrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Migrator")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("database", &self.config.database)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::testing::PlainHasher;

    fn unreachable() -> MysqlConfig {
        MysqlConfig::new("school")
            .host("127.0.0.1")
            .port(1)
            .username("root")
            .connect_timeout(Duration::from_secs(2))
    }

    #[test]
    fn test_debug_hides_password() {
        let migrator = Migrator::new(unreachable().password("hunter2"));
        let debug = format!("{migrator:?}");
        assert!(debug.contains("school"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_missing_database() {
        let migrator = Migrator::new(MysqlConfig::default());
        assert!(matches!(
            migrator.database(),
            Err(MigrationError::MissingDatabase)
        ));
    }

    #[tokio::test]
    async fn test_status_reports_unreachable_server() {
        let migrator = Migrator::new(unreachable());

        let status = migrator.status().await;

        assert!(!status.connected);
        assert_eq!(status.database, "school");
        assert!(status.error.is_some());
        assert_eq!(status.table_count(), 0);
    }

    #[tokio::test]
    async fn test_seed_propagates_connection_error() {
        let migrator = Migrator::new(unreachable()).with_hasher(PlainHasher);

        let err = migrator.seed(SeedMode::Guarded).await.unwrap_err();

        assert!(err.is_connectivity(), "unexpected error: {err}");
    }

    #[tokio::test]
    async fn test_reset_fails_before_schema_work() {
        let migrator = Migrator::new(unreachable()).with_hasher(PlainHasher);

        let err = migrator.reset().await.unwrap_err();

        assert!(matches!(err, MigrationError::Database(_)));
    }
}
