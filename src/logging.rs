//! Tracing setup: console output plus one file per launch under the app's
//! `logs` directory.
//!
//! Log files are named `cardioform_<local timestamp>.log`. The timestamp
//! sorts lexically, so the oldest launches are the first names in order and
//! are the ones removed once more than [`KEEP_LOGS`] exist.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, fmt, fmt::time::OffsetTime, prelude::*, util::TryInitError};

use crate::app_dirs::{self, AppDirError};

/// Launch logs kept on disk, the current one included.
pub const KEEP_LOGS: usize = 10;

const FILE_PREFIX: &str = "cardioform";
const FILE_EXTENSION: &str = "log";
const DEFAULT_DIRECTIVES: &str = "info";
const FILE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Flushes the file writer when the process exits.
static FILE_WRITER: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error(transparent)]
    Directory(#[from] AppDirError),
    #[error("Could not list log files in {dir}: {source}")]
    ListLogs {
        dir: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not delete stale log {path}: {source}")]
    DeleteLog {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not open log file {path}: {source}")]
    OpenLog {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not build log file name: {0}")]
    Stamp(#[from] time::error::Format),
    #[error("Another tracing subscriber is already installed: {0}")]
    Install(#[from] TryInitError),
}

/// Install the global subscriber and return this launch's log file.
///
/// `RUST_LOG` overrides the default `info` filter. Calling again after a
/// successful start changes nothing.
pub fn init() -> Result<PathBuf, LoggingError> {
    let dir = app_dirs::logs_dir()?;
    let name = log_file_name(local_now())?;
    let path = dir.join(&name);
    if FILE_WRITER.get().is_some() {
        return Ok(path);
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| LoggingError::OpenLog {
            path: path.clone(),
            source,
        })?;
    remove_stale_logs(&dir, KEEP_LOGS)?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::never(&dir, &name));
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = OffsetTime::new(offset, LINE_STAMP);
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_timer(timer.clone()))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(writer),
        )
        .try_init()?;
    let _ = FILE_WRITER.set(guard);

    tracing::info!(path = %path.display(), "Logging initialized");
    Ok(path)
}

fn log_file_name(at: OffsetDateTime) -> Result<String, LoggingError> {
    Ok(format!(
        "{FILE_PREFIX}_{}.{FILE_EXTENSION}",
        at.format(FILE_STAMP)?
    ))
}

fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Delete the oldest launch logs in `dir` until at most `keep` remain.
///
/// Files without the app prefix or `.log` extension are ignored.
fn remove_stale_logs(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let list_failed = |source: std::io::Error| LoggingError::ListLogs {
        dir: dir.to_path_buf(),
        source,
    };
    let mut logs = Vec::new();
    for entry in fs::read_dir(dir).map_err(list_failed)? {
        let path = entry.map_err(list_failed)?.path();
        if is_launch_log(&path) {
            logs.push(path);
        }
    }
    if logs.len() <= keep {
        return Ok(());
    }
    logs.sort();
    let stale = logs.len() - keep;
    for path in logs.drain(..stale) {
        fs::remove_file(&path).map_err(|source| LoggingError::DeleteLog { path, source })?;
    }
    Ok(())
}

fn is_launch_log(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    path.is_file()
        && name.starts_with(FILE_PREFIX)
        && path.extension().is_some_and(|ext| ext == FILE_EXTENSION)
}
