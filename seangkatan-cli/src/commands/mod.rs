//! CLI command implementations.

pub mod backup;
pub mod migrate;
pub mod reset;
pub mod seed;
pub mod setup;
pub mod status;

use seangkatan_migrate::Migrator;

use crate::cli::ConnectionArgs;
use crate::config::Config;
use crate::error::CliResult;
use crate::output;

/// Resolved configuration and the migrator built from it.
#[derive(Debug)]
pub struct Context {
    pub config: Config,
    pub migrator: Migrator,
}

impl Context {
    /// Layer the config file, environment and flags, then build the migrator.
    pub fn load(args: &ConnectionArgs) -> CliResult<Self> {
        let mut config = Config::load_or_default(&args.config)?;
        config.apply_overrides(args);
        let migrator = Migrator::new(config.mysql_config()?);
        Ok(Self { config, migrator })
    }

    /// Print the server and database every command targets.
    pub fn print_target(&self) {
        let mysql = self.migrator.config();
        output::kv("Host", &format!("{}:{}", mysql.host, mysql.port));
        output::kv(
            "Database",
            mysql.database.as_deref().unwrap_or("<not configured>"),
        );
        output::newline();
    }
}
