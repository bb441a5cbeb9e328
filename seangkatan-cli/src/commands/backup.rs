//! `seangkatan backup` - export the database with mysqldump.

use crate::cli::BackupArgs;
use crate::commands::Context;
use crate::error::CliResult;
use crate::output::{self, success};

/// Run the backup command
pub async fn run(ctx: &Context, args: BackupArgs) -> CliResult<()> {
    output::header("Backup");
    ctx.print_target();

    let mut options = ctx.config.backup_options();
    if let Some(binary) = args.dump_binary {
        options = options.dump_binary(binary);
    }
    if let Some(path) = args.output {
        options = options.output(path);
    }

    output::step(1, 1, &format!("Running {}...", options.dump_binary));
    let path = ctx.migrator.backup(&options).await?;

    output::newline();
    success(&format!("Backup written to {}", path.display()));
    Ok(())
}
