//! File logging for the terminal UI.
//!
//! The alternate screen owns stdout, so records go to a plain-text log file.

use std::path::Path;
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use humantime::format_rfc3339;
use log::{LevelFilter, info, warn};

/// Thread-safe initialization guard.
static INIT_LOGGER_ONCE: Once = Once::new();

/// Tracks if logger initialization was already attempted.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

#[derive(thiserror::Error, Debug)]
pub enum LoggerError {
    #[error("failed to open log file {path}: {source}")]
    File {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to install logger: {0}")]
    Install(#[from] log::SetLoggerError),
}

/// Route `log` records at `level` and above to `log_file`.
///
/// Safe to call more than once; later calls log a warning and return Ok.
pub fn initialize(log_file: &Path, level: LevelFilter) -> Result<(), LoggerError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("Logger already initialized");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(log_file, level);
        if result.is_ok() {
            info!("Logger initialized with level: {level:?}");
        }
    });

    result
}

fn initialize_internal(log_file: &Path, level: LevelFilter) -> Result<(), LoggerError> {
    let file = fern::log_file(log_file).map_err(|source| LoggerError::File {
        path: log_file.display().to_string(),
        source,
    })?;

    Dispatch::new()
        .level(level)
        // reqwest/hyper internals are noise at debug level
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{date} - {level}] {message} [{target}]",
                date = format_rfc3339(SystemTime::now()),
                level = record.level(),
                message = message,
                target = record.target(),
            ))
        })
        .chain(file)
        .apply()?;

    Ok(())
}
