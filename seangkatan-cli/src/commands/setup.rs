//! `seangkatan setup` - create the database and its tables.

use crate::commands::Context;
use crate::error::CliResult;
use crate::output::{self, info, success};

/// Run the setup command
pub async fn run(ctx: &Context) -> CliResult<()> {
    output::header("Setup");
    ctx.print_target();

    output::step(1, 1, "Creating database and tables...");
    let report = ctx.migrator.setup().await?;

    output::newline();
    success(&format!("{} tables ready", report.tables.len()));
    info("Run `seangkatan seed` to add the sample data");
    Ok(())
}
