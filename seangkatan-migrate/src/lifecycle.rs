//! Database container lifecycle: creation, drop-and-recreate, rebuild.

use tracing::{info, warn};

use crate::error::{MigrateResult, MigrationError};
use crate::executor::Executor;
use crate::password::PasswordHasher;
use crate::schema::{SchemaReport, TABLES, apply_schema};
use crate::seed::{SeedMode, SeedOutcome, seed};

/// Backtick-quote a database name for DDL.
///
/// Names are restricted to `[A-Za-z0-9_$]+` since they cannot be bound as
/// parameters.
pub fn quote_identifier(name: &str) -> MigrateResult<String> {
    let valid = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$');

    if valid {
        Ok(format!("`{}`", name))
    } else {
        Err(MigrationError::InvalidIdentifier(name.to_string()))
    }
}

/// Create the database unless it already exists.
pub async fn ensure_database<E>(executor: &mut E, name: &str) -> MigrateResult<()>
where
    E: Executor + ?Sized,
{
    let quoted = quote_identifier(name)?;
    executor
        .execute(&format!("CREATE DATABASE IF NOT EXISTS {}", quoted))
        .await?;
    info!(database = name, "Database ready");
    Ok(())
}

/// Drop the database if present and create it empty.
///
/// Must run on a connection with no database selected.
pub async fn recreate_database<E>(executor: &mut E, name: &str) -> MigrateResult<()>
where
    E: Executor + ?Sized,
{
    let quoted = quote_identifier(name)?;

    warn!(database = name, "Dropping database");
    executor
        .execute(&format!("DROP DATABASE IF EXISTS {}", quoted))
        .await?;
    executor
        .execute(&format!("CREATE DATABASE {}", quoted))
        .await?;
    info!(database = name, "Database recreated");
    Ok(())
}

/// Tables created and seed outcome of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Tables created, in creation order.
    pub schema: SchemaReport,
    /// Always `Applied` for a rebuild.
    pub seed: SeedOutcome,
}

/// Create every table and force-seed the fixture data.
pub async fn rebuild<E>(executor: &mut E, hasher: &dyn PasswordHasher) -> MigrateResult<BuildReport>
where
    E: Executor + ?Sized,
{
    let schema = apply_schema(executor, TABLES).await?;
    let seed = seed(executor, hasher, TABLES, SeedMode::Force).await?;
    Ok(BuildReport { schema, seed })
}
