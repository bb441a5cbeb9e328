//! `seangkatan reset` - drop and rebuild the database.

use crate::commands::Context;
use crate::commands::seed::print_outcome;
use crate::error::CliResult;
use crate::output::{self, success, warn};

/// Run the reset command
pub async fn run(ctx: &Context) -> CliResult<()> {
    output::header("Reset");
    ctx.print_target();

    let database = ctx.migrator.database()?;
    warn(&format!("Dropping database '{}' and all of its data", database));

    output::step(1, 1, "Recreating database, tables and sample data...");
    let report = ctx.migrator.reset().await?;
    success(&format!("{} tables created", report.schema.tables.len()));
    print_outcome(&report.seed);

    output::newline();
    success("Reset complete");
    Ok(())
}
