//! CLI configuration handling.
//!
//! Values are layered, lowest precedence first: built-in defaults, the TOML
//! file, `.env` and process environment, then command-line flags. clap
//! merges the last two, so this module only sees the file and the parsed
//! [`ConnectionArgs`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use seangkatan_migrate::{BackupOptions, DEFAULT_DUMP_BINARY};
use seangkatan_mysql::MysqlConfig;
use tracing::debug;

use crate::cli::ConnectionArgs;
use crate::error::{CliError, CliResult};

/// Default config file name (lives in the working directory)
pub const CONFIG_FILE_NAME: &str = "seangkatan.toml";

/// Default database name
pub const DEFAULT_DATABASE: &str = "seangkatan_db";

/// Seangkatan CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration
    pub database: DatabaseConfig,

    /// Backup configuration
    pub backup: BackupConfig,
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a file, falling back to defaults when it does
    /// not exist.
    pub fn load_or_default(path: &Path) -> CliResult<Self> {
        if path.exists() {
            debug!(path = %path.display(), "Loading configuration file");
            Self::load(path)
        } else {
            debug!(path = %path.display(), "No configuration file, using defaults");
            Ok(Self::default())
        }
    }

    /// Apply environment and command-line values on top of the file.
    pub fn apply_overrides(&mut self, args: &ConnectionArgs) {
        let db = &mut self.database;
        if let Some(url) = &args.url {
            db.url = Some(url.clone());
        }
        if let Some(host) = &args.host {
            db.host = host.clone();
        }
        if let Some(port) = args.port {
            db.port = port;
        }
        if let Some(user) = &args.user {
            db.user = user.clone();
        }
        if let Some(password) = &args.password {
            db.password = password.clone();
        }
        if let Some(name) = &args.database {
            db.name = name.clone();
        }
    }

    /// Connection settings for the lifecycle crates.
    ///
    /// A URL replaces the host and port, and whichever of user, password and
    /// database it names.
    pub fn mysql_config(&self) -> CliResult<MysqlConfig> {
        let db = &self.database;

        let mut discrete = MysqlConfig::default()
            .host(&db.host)
            .port(db.port)
            .password(&db.password)
            .max_connections(db.pool_size)
            .connect_timeout(Duration::from_secs(db.connect_timeout_secs));
        if !db.user.is_empty() {
            discrete = discrete.username(&db.user);
        }
        if !db.name.is_empty() {
            discrete = discrete.database(&db.name);
        }

        let Some(url) = db.url.as_deref().filter(|url| !url.trim().is_empty()) else {
            return Ok(discrete);
        };

        let parsed = MysqlConfig::from_url(url).map_err(|e| CliError::Config(e.to_string()))?;
        Ok(MysqlConfig {
            host: parsed.host,
            port: parsed.port,
            database: parsed.database.or(discrete.database.clone()),
            username: parsed.username.or(discrete.username.clone()),
            password: parsed.password.or(discrete.password.clone()),
            ..discrete
        })
    }

    /// Backup settings with the configured dump binary.
    pub fn backup_options(&self) -> BackupOptions {
        BackupOptions::default().dump_binary(&self.backup.dump_binary)
    }
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Connection URL, overrides the discrete fields it names
    pub url: Option<String>,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// User name
    pub user: String,

    /// Password, empty for none
    pub password: String,

    /// Database name
    pub name: String,

    /// Maximum pooled connections
    pub pool_size: usize,

    /// Connection attempt timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: "localhost".to_string(),
            port: 3306,
            user: "root".to_string(),
            password: String::new(),
            name: DEFAULT_DATABASE.to_string(),
            pool_size: 10,
            connect_timeout_secs: 10,
        }
    }
}

/// Backup configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackupConfig {
    /// Dump program
    pub dump_binary: String,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            dump_binary: DEFAULT_DUMP_BINARY.to_string(),
        }
    }
}
