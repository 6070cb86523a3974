//! Tracing setup for the native host.
//!
//! Each launch logs to stdout and to its own `support-widget_<stamp>.log` in
//! the app log directory. Only the newest [`MAX_LOG_FILES`] launch logs are
//! kept.

use std::{
    fs::{self, OpenOptions},
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::app_dirs;

pub const MAX_LOG_FILES: usize = 10;
const LOG_FILE_PREFIX: &str = "support-widget_";
const LOG_FILE_SUFFIX: &str = ".log";
const DEFAULT_DIRECTIVE: &str = "info";

const FILE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
const LINE_STAMP: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Keeps the file writer flushing for the life of the process.
static WRITER_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Log directory unavailable: {0}")]
    Directory(#[from] app_dirs::AppDirError),
    #[error("Failed to {action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to format log file timestamp: {0}")]
    FormatTime(#[from] time::error::Format),
    #[error("A global tracing subscriber is already installed: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Install the global subscriber. Later calls do nothing.
pub fn init() -> Result<(), LoggingError> {
    if WRITER_GUARD.get().is_some() {
        return Ok(());
    }
    let log_dir = app_dirs::logs_dir()?;
    let launch = LaunchLog::create(&log_dir, now_local_or_utc())?;
    launch.prune_older(MAX_LOG_FILES)?;

    let (file_writer, guard) = tracing_appender::non_blocking(
        tracing_appender::rolling::never(&log_dir, &launch.file_name),
    );
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    let timer = fmt::time::OffsetTime::new(offset, LINE_STAMP);
    tracing::subscriber::set_global_default(
        tracing_subscriber::registry()
            .with(
                EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
            )
            .with(fmt::layer().with_timer(timer.clone()))
            .with(
                fmt::layer()
                    .with_ansi(false)
                    .with_timer(timer)
                    .with_writer(file_writer),
            ),
    )?;
    let _ = WRITER_GUARD.set(guard);
    tracing::info!(path = %launch.path().display(), "Logging initialized");
    Ok(())
}

/// The log file belonging to this launch.
struct LaunchLog {
    dir: PathBuf,
    file_name: String,
}

impl LaunchLog {
    fn create(dir: &Path, started: OffsetDateTime) -> Result<Self, LoggingError> {
        let file_name = format!(
            "{LOG_FILE_PREFIX}{}{LOG_FILE_SUFFIX}",
            started.format(FILE_STAMP)?
        );
        let launch = Self {
            dir: dir.to_path_buf(),
            file_name,
        };
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(launch.path())
            .map_err(|source| LoggingError::Io {
                action: "create",
                path: launch.path(),
                source,
            })?;
        Ok(launch)
    }

    fn path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }

    /// Delete launch logs beyond the newest `keep`; stamps sort by name.
    fn prune_older(&self, keep: usize) -> Result<(), LoggingError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| LoggingError::Io {
            action: "read",
            path: self.dir.clone(),
            source,
        })?;
        let mut names = entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .filter(|name| is_launch_log(name))
            .collect::<Vec<_>>();
        names.sort_unstable_by(|a, b| b.cmp(a));
        for name in names.into_iter().skip(keep) {
            let path = self.dir.join(name);
            fs::remove_file(&path).map_err(|source| LoggingError::Io {
                action: "remove",
                path,
                source,
            })?;
        }
        Ok(())
    }
}

fn is_launch_log(name: &str) -> bool {
    name.starts_with(LOG_FILE_PREFIX) && name.ends_with(LOG_FILE_SUFFIX)
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
