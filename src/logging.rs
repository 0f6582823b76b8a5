//! Logging setup for the querysight binary.
//!
//! Console output goes to stderr so that stdout stays reserved for the JSON
//! documents the CLI prints. When a log directory is available, a daily
//! rotating file keeps the last 10 days of logs.
//!
//! ```no_run
//! querysight::logging::init(false, None).expect("Failed to initialize logging");
//! tracing::info!("ready");
//! ```

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
};

/// Log directory under a platform data directory.
pub fn log_dir_in(base_dir: &Path) -> PathBuf {
    base_dir.join("querysight").join("logs")
}

/// Gets the log directory path based on platform conventions, creating it if needed.
///
/// Returns:
/// - Windows: `%APPDATA%/querysight/logs`
/// - macOS: `~/Library/Application Support/querysight/logs`
/// - Linux: `~/.local/share/querysight/logs`
pub fn get_log_dir() -> Result<PathBuf> {
    let base_dir = dirs::data_dir().context("Failed to determine data directory")?;
    let log_dir = log_dir_in(&base_dir);
    ensure_dir(&log_dir)?;
    Ok(log_dir)
}

/// Directory for log files: `override_dir` when given, else [`get_log_dir`].
///
/// `None` when neither is available; logging then stays on stderr only.
pub fn resolve_log_dir(override_dir: Option<&Path>) -> Option<PathBuf> {
    match override_dir {
        Some(dir) => Some(dir.to_path_buf()),
        None => get_log_dir().ok(),
    }
}

fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    Ok(())
}

/// Initializes stderr logging, plus a rolling file when `log_dir` is given.
///
/// `RUST_LOG` overrides the level; otherwise `verbose` selects `debug` over `info`.
///
/// # Errors
///
/// Returns error if the log directory cannot be created or the file appender fails.
pub fn init(verbose: bool, log_dir: Option<&Path>) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("Failed to create env filter")?;

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_line_number(verbose)
        .with_writer(std::io::stderr);

    let file_layer = match log_dir {
        Some(dir) => {
            ensure_dir(dir)?;
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .max_log_files(10)
                .filename_prefix("querysight")
                .filename_suffix("log")
                .build(dir)
                .context("Failed to create log file appender")?;
            Some(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_line_number(true)
                    .with_file(true)
                    .with_ansi(false)
                    .with_writer(appender)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    if let Some(dir) = log_dir {
        tracing::debug!("Logging initialized, log directory: {}", dir.display());
    }

    Ok(())
}
