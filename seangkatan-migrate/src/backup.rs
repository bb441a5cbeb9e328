//! SQL dump export through an external `mysqldump`.
//!
//! The dump is streamed into `<output>.partial` and renamed into place only
//! after the dump process exits successfully, so a failed run never leaves a
//! truncated file at the requested path.
//!
//! The password is passed to the dump binary on its command line, where
//! other local users can see it in the process list.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use chrono::{NaiveDate, Utc};
use seangkatan_mysql::MysqlConfig;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::error::{MigrateResult, MigrationError};

/// Dump binary used when none is configured.
pub const DEFAULT_DUMP_BINARY: &str = "mysqldump";

/// Backup settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupOptions {
    /// Program invoked to produce the dump.
    pub dump_binary: String,
    /// Target file. Defaults to [`default_backup_path`] for today.
    pub output: Option<PathBuf>,
}

impl Default for BackupOptions {
    fn default() -> Self {
        Self {
            dump_binary: DEFAULT_DUMP_BINARY.to_string(),
            output: None,
        }
    }
}

impl BackupOptions {
    /// Set the program invoked to produce the dump.
    pub fn dump_binary(mut self, binary: impl Into<String>) -> Self {
        self.dump_binary = binary.into();
        self
    }

    /// Set the target file.
    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }
}

/// `backup_<database>_<YYYY-MM-DD>.sql`.
pub fn default_backup_path(database: &str, date: NaiveDate) -> PathBuf {
    PathBuf::from(format!("backup_{}_{}.sql", database, date.format("%Y-%m-%d")))
}

/// Arguments passed to the dump binary.
pub fn dump_args(config: &MysqlConfig) -> MigrateResult<Vec<String>> {
    let database = config
        .database
        .as_deref()
        .ok_or(MigrationError::MissingDatabase)?;

    let mut args = vec![
        "-h".to_string(),
        config.host.clone(),
        "-P".to_string(),
        config.port.to_string(),
    ];
    if let Some(user) = &config.username {
        args.push("-u".to_string());
        args.push(user.clone());
    }
    if let Some(password) = &config.password {
        args.push(format!("-p{}", password));
    }
    args.push("--routines".to_string());
    args.push("--triggers".to_string());
    args.push(database.to_string());

    Ok(args)
}

fn partial_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".partial");
    PathBuf::from(name)
}

fn write_error(path: &Path) -> impl FnOnce(io::Error) -> MigrationError + '_ {
    move |source| MigrationError::BackupIo {
        path: path.to_path_buf(),
        source,
    }
}

/// Dump the configured database to a file, returning its path.
pub async fn backup(config: &MysqlConfig, options: &BackupOptions) -> MigrateResult<PathBuf> {
    let database = config
        .database
        .as_deref()
        .ok_or(MigrationError::MissingDatabase)?;
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| default_backup_path(database, Utc::now().date_naive()));
    let partial = partial_path(&output);
    let args = dump_args(config)?;

    info!(
        database,
        binary = %options.dump_binary,
        output = %output.display(),
        "Creating backup"
    );

    if let Err(e) = run_dump(&options.dump_binary, &args, &partial).await {
        discard(&partial).await;
        return Err(e);
    }

    if let Err(e) = fs::rename(&partial, &output).await {
        discard(&partial).await;
        return Err(write_error(&output)(e));
    }

    info!(output = %output.display(), "Backup complete");
    Ok(output)
}

async fn run_dump(binary: &str, args: &[String], partial: &Path) -> MigrateResult<()> {
    let mut child = Command::new(binary)
        .args(args.iter().map(OsString::from))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| MigrationError::DumpSpawn {
            binary: binary.to_string(),
            source,
        })?;

    let (Some(stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take()) else {
        return Err(write_error(partial)(io::Error::other(
            "dump output was not captured",
        )));
    };

    let file = fs::File::create(partial).await.map_err(write_error(partial))?;

    // stdout and the file are owned by the copy so a failed write closes the
    // pipe; the child is killed so stderr reaches EOF.
    let copy = async {
        let (mut stdout, mut file) = (stdout, file);
        let copied = async {
            let bytes = tokio::io::copy(&mut stdout, &mut file).await?;
            file.flush().await?;
            file.sync_all().await?;
            Ok::<u64, io::Error>(bytes)
        }
        .await;
        if copied.is_err() {
            // Fails only when the child has already exited
            child.start_kill().ok();
        }
        copied
    };
    let collect = async {
        let mut buf = Vec::new();
        stderr.read_to_end(&mut buf).await.map(|_| buf)
    };
    let (copied, captured) = tokio::join!(copy, collect);

    let status = child.wait().await.map_err(write_error(partial))?;
    let bytes = copied.map_err(write_error(partial))?;

    let stderr = captured
        .map(|buf| String::from_utf8_lossy(&buf).into_owned())
        .unwrap_or_default();
    if !stderr.trim().is_empty() {
        warn!(binary, stderr = stderr.trim(), "Dump reported errors");
    }

    if !status.success() {
        return Err(MigrationError::DumpFailed {
            binary: binary.to_string(),
            code: status.code(),
            stderr,
        });
    }

    debug!(bytes, "Dump streamed");
    Ok(())
}

async fn discard(partial: &Path) {
    match fs::remove_file(partial).await {
        Ok(()) => debug!(path = %partial.display(), "Removed incomplete backup"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => warn!(
            path = %partial.display(),
            error = %e,
            "Could not remove incomplete backup"
        ),
    }
}
