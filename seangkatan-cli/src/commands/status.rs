//! `seangkatan status` - show connection state, tables and row counts.

use seangkatan_migrate::DatabaseStatus;

use crate::cli::StatusArgs;
use crate::commands::Context;
use crate::error::CliResult;
use crate::output::{self, success, warn};

/// Run the status command. An unreachable server is reported, not an error.
pub async fn run(ctx: &Context, args: StatusArgs) -> CliResult<()> {
    let status = ctx.migrator.status().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    output::header("Status");
    ctx.print_target();
    print_status(&status);
    Ok(())
}

fn print_status(status: &DatabaseStatus) {
    if !status.connected {
        warn(&format!(
            "Not connected: {}",
            status.error.as_deref().unwrap_or("unknown error")
        ));
        return;
    }

    success("Connected");
    output::kv("Tables", &status.table_count().to_string());

    if status.tables.is_empty() {
        output::dim("No tables yet. Run `seangkatan setup` to create them.");
        return;
    }

    output::newline();
    output::section("Row counts");
    for (table, rows) in &status.key_table_rows {
        output::list_item(&format!("{}: {}", table, rows));
    }
}
