//! `seangkatan migrate` - setup followed by seed.

use seangkatan_migrate::SeedMode;

use crate::cli::MigrateArgs;
use crate::commands::Context;
use crate::commands::seed::print_outcome;
use crate::error::CliResult;
use crate::output::{self, success};

/// Run the migrate command
pub async fn run(ctx: &Context, args: MigrateArgs) -> CliResult<()> {
    output::header("Migrate");
    ctx.print_target();

    output::step(1, 2, "Creating database and tables...");
    let schema = ctx.migrator.setup().await?;
    success(&format!("{} tables ready", schema.tables.len()));

    output::step(2, 2, "Seeding sample data...");
    let outcome = ctx.migrator.seed(SeedMode::from_force(args.force)).await?;
    print_outcome(&outcome);

    output::newline();
    success("Migration complete");
    Ok(())
}
