//! Seangkatan CLI - command-line interface for the Seangkatan database.

use clap::error::{ContextKind, ErrorKind};
use clap::{CommandFactory, Parser};

use seangkatan_cli::cli::{Cli, Command};
use seangkatan_cli::commands::{self, Context};
use seangkatan_cli::error::CliResult;
use seangkatan_cli::{logging, output};

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    dotenv::dotenv().ok();
    logging::init();

    if let Err(e) = run().await {
        output::newline();
        output::error(&e.to_string());
        if let Some(hint) = e.hint() {
            output::dim(hint);
        }
        std::process::exit(1);
    }
}

async fn run() -> CliResult<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            // An unknown command falls back to the command listing
            ErrorKind::InvalidSubcommand => {
                let name = e
                    .get(ContextKind::InvalidSubcommand)
                    .map(ToString::to_string)
                    .unwrap_or_default();
                output::warn(&format!("Unknown command '{}'", name));
                Cli::command().print_help()?;
                return Ok(());
            }
            _ => {
                e.print()?;
                std::process::exit(1);
            }
        },
    };

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let ctx = Context::load(&cli.connection)?;

    match command {
        Command::Setup => commands::setup::run(&ctx).await,
        Command::Seed(args) => commands::seed::run(&ctx, args).await,
        Command::Migrate(args) => commands::migrate::run(&ctx, args).await,
        Command::Reset => commands::reset::run(&ctx).await,
        Command::Status(args) => commands::status::run(&ctx, args).await,
        Command::Backup(args) => commands::backup::run(&ctx, args).await,
    }
}
