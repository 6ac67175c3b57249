//! Console and file tracing for one app session.
//!
//! Every launch writes `damagecheck_<local timestamp>.log` under the app logs
//! directory. Timestamped names sort chronologically, so pruning keeps the
//! newest sessions by name alone.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{InitError, RollingFileAppender, Rotation},
};
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*};

use crate::app_dirs::{self, AppDirError};

/// Session logs kept on disk, the current one included.
const KEPT_SESSIONS: usize = 10;
const SESSION_PREFIX: &str = "damagecheck";
const LOG_EXTENSION: &str = "log";
const DEFAULT_LEVEL: &str = "info";

struct Session {
    path: PathBuf,
    _guard: WorkerGuard,
}

static SESSION: OnceLock<Session> = OnceLock::new();

/// Errors that may occur while starting session logging.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    /// The app logs directory could not be resolved or created.
    #[error(transparent)]
    Dirs(#[from] AppDirError),
    /// The session timestamp could not be formatted.
    #[error("Failed to name the session log: {0}")]
    SessionName(#[from] time::error::Format),
    /// The session log file could not be opened.
    #[error("Failed to open session log in {dir}: {source}")]
    OpenLog { dir: PathBuf, source: InitError },
    /// Older session logs could not be listed.
    #[error("Failed to list session logs in {dir}: {source}")]
    ListLogs { dir: PathBuf, source: io::Error },
    /// An older session log could not be removed.
    #[error("Failed to remove old session log {path}: {source}")]
    RemoveLog { path: PathBuf, source: io::Error },
    /// Another global subscriber is already installed.
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Start logging to stdout and this session's file, returning the file path.
///
/// `RUST_LOG` wins over `level`, and an unparsable `level` means `info`.
/// Later calls return the path chosen by the first one.
pub fn init(level: Option<&str>) -> Result<PathBuf, LoggingError> {
    if let Some(session) = SESSION.get() {
        return Ok(session.path.clone());
    }

    let dir = app_dirs::logs_dir()?;
    let stem = session_stem(now_local_or_utc())?;
    prune_sessions(&dir, KEPT_SESSIONS - 1)?;
    let appender = open_session_log(&dir, &stem)?;
    let (file_writer, guard) = tracing_appender::non_blocking(appender);

    let timer = build_timer();
    let subscriber = Registry::default()
        .with(build_env_filter(level))
        .with(
            fmt::layer()
                .with_timer(timer.clone())
                .with_writer(io::stdout),
        )
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_timer(timer)
                .with_writer(file_writer),
        );
    tracing::subscriber::set_global_default(subscriber)?;

    let path = dir.join(format!("{stem}.{LOG_EXTENSION}"));
    let _ = SESSION.set(Session {
        path: path.clone(),
        _guard: guard,
    });
    tracing::info!("Session log at {}", path.display());
    Ok(path)
}

fn open_session_log(dir: &Path, stem: &str) -> Result<RollingFileAppender, LoggingError> {
    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(stem)
        .filename_suffix(LOG_EXTENSION)
        .build(dir)
        .map_err(|source| LoggingError::OpenLog {
            dir: dir.to_path_buf(),
            source,
        })
}

/// `damagecheck_YYYY-MM-DD_HH-MM-SS`, without the extension.
fn session_stem(now: OffsetDateTime) -> Result<String, LoggingError> {
    const STAMP: &[FormatItem<'_>] =
        format_description!("[year]-[month]-[day]_[hour]-[minute]-[second]");
    Ok(format!("{SESSION_PREFIX}_{}", now.format(STAMP)?))
}

fn is_session_log(name: &str) -> bool {
    name.strip_prefix(SESSION_PREFIX)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix(LOG_EXTENSION))
        .is_some_and(|stamp| stamp.ends_with('.'))
}

/// Delete the oldest session logs until at most `keep` remain.
fn prune_sessions(dir: &Path, keep: usize) -> Result<(), LoggingError> {
    let listing = fs::read_dir(dir).map_err(|source| LoggingError::ListLogs {
        dir: dir.to_path_buf(),
        source,
    })?;
    let mut sessions: Vec<PathBuf> = listing
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_file()))
        .filter(|entry| entry.file_name().to_str().is_some_and(is_session_log))
        .map(|entry| entry.path())
        .collect();
    sessions.sort();
    let excess = sessions.len().saturating_sub(keep);
    for path in sessions.into_iter().take(excess) {
        fs::remove_file(&path).map_err(|source| LoggingError::RemoveLog { path, source })?;
    }
    Ok(())
}

fn build_timer() -> fmt::time::OffsetTime<time::format_description::BorrowedFormatItem<'static>> {
    const DISPLAY_FORMAT: &[FormatItem<'static>] =
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    fmt::time::OffsetTime::new(offset, DISPLAY_FORMAT.into())
}

fn now_local_or_utc() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

fn build_env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback_filter(level))
}

fn fallback_filter(level: Option<&str>) -> EnvFilter {
    level
        .and_then(|level| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LEVEL))
}
