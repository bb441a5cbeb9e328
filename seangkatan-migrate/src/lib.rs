//! # seangkatan-migrate
//!
//! Lifecycle orchestration for the Seangkatan school database.
//!
//! This crate provides functionality for:
//! - Creating the fixed 19-table schema in foreign-key dependency order
//! - Seeding sample accounts, classes, events, quizzes, albums and chat rooms
//! - Forced reseeding with foreign-key checks suspended
//! - Dropping and rebuilding the whole database
//! - Status inspection and `mysqldump` backups
//!
//! ## Architecture
//!
//! Every step is a free function generic over [`Executor`], so it runs the
//! same against a live connection or an in-memory double. [`Migrator`] opens
//! the connections and sequences the steps for each command.
//!
//! ```text
//! ┌──────────┐     ┌───────────────┐     ┌─────────────┐
//! │ Migrator │────▶│ apply_schema  │────▶│ seed        │
//! └──────────┘     └───────────────┘     └─────────────┘
//!      │                                        │
//!      ▼                                        ▼
//! ┌───────────────────┐                 ┌─────────────┐
//! │ recreate_database │                 │ truncate_all│
//! └───────────────────┘                 └─────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use seangkatan_migrate::{Migrator, SeedMode, SeedOutcome};
//! use seangkatan_mysql::MysqlConfig;
//!
//! async fn prepare() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MysqlConfig::from_url("mysql://root@localhost/seangkatan_db")?;
//!     let migrator = Migrator::new(config);
//!
//!     migrator.setup().await?;
//!     match migrator.seed(SeedMode::Guarded).await? {
//!         SeedOutcome::Applied(report) => println!("{} rows", report.total_rows()),
//!         SeedOutcome::SkippedAlreadySeeded { .. } => println!("already seeded"),
//!     }
//!
//!     let status = migrator.status().await;
//!     println!("{} tables", status.table_count());
//!     Ok(())
//! }
//! ```

pub mod backup;
pub mod error;
pub mod executor;
pub mod fixtures;
pub mod lifecycle;
pub mod migrator;
pub mod password;
pub mod schema;
pub mod seed;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use backup::{BackupOptions, DEFAULT_DUMP_BINARY, default_backup_path};
pub use error::{MigrateResult, MigrationError};
pub use executor::Executor;
pub use lifecycle::BuildReport;
pub use migrator::Migrator;
pub use password::{Argon2Hasher, PasswordHasher};
pub use schema::{ANCHOR_TABLE, SchemaReport, TABLES, TableDefinition};
pub use seed::{SeedMode, SeedOutcome, SeedReport};
pub use status::{DatabaseStatus, KEY_TABLES};
