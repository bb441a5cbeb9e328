//! `seangkatan seed` - insert the sample data set.

use seangkatan_migrate::SeedMode;
use seangkatan_migrate::SeedOutcome;
use seangkatan_migrate::fixtures::{SAMPLE_PASSWORD, USERS};

use crate::cli::SeedArgs;
use crate::commands::Context;
use crate::error::CliResult;
use crate::output::{self, success, warn};

/// Run the seed command
pub async fn run(ctx: &Context, args: SeedArgs) -> CliResult<()> {
    output::header("Seed");
    ctx.print_target();

    let mode = SeedMode::from_force(args.force);
    if mode == SeedMode::Force {
        warn("Force mode: every table will be emptied first");
    }

    let outcome = ctx.migrator.seed(mode).await?;
    print_outcome(&outcome);
    Ok(())
}

/// Print what a seed run did.
pub(crate) fn print_outcome(outcome: &SeedOutcome) {
    match outcome {
        SeedOutcome::Applied(report) => {
            if !report.truncated.is_empty() {
                output::dim(&format!("Emptied {} tables", report.truncated.len()));
            }
            for (table, rows) in &report.inserted {
                output::list_item(&format!("{}: {} rows", table, rows));
            }
            output::newline();
            success(&format!(
                "Seeded {} rows in {}ms",
                report.total_rows(),
                report.duration_ms
            ));
            print_accounts();
        }
        SeedOutcome::SkippedAlreadySeeded { anchor_rows } => {
            warn(&format!(
                "Database already seeded ({} users). Use --force to seed again.",
                anchor_rows
            ));
        }
    }
}

fn print_accounts() {
    output::newline();
    output::section("Sample accounts");
    for user in USERS {
        output::list_item(&format!("{} ({})", user.username, user.role.as_str()));
    }
    output::kv("Password", SAMPLE_PASSWORD);
}
