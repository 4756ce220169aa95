//! Logging Infrastructure
//!
//! Structured logging setup with support for both development and production environments.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger
pub fn init_logger() {
    init_logger_with_file(None, None, None);
}

/// Initialize the logger with optional JSON formatting and file output
///
/// `RUST_LOG` wins over `log_level` when set. Logs go to a daily rolling
/// file when `log_dir` exists, stdout otherwise. Calling this twice is a
/// no-op.
pub fn init_logger_with_file(log_level: Option<&str>, json: Option<bool>, log_dir: Option<&str>) {
    let level = log_level.unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    let file_appender = log_dir
        .map(Path::new)
        .filter(|p| p.is_dir())
        .map(|dir| tracing_appender::rolling::daily(dir, "storefront"));

    let result = match (json.unwrap_or(false), file_appender) {
        (true, Some(appender)) => subscriber.json().with_writer(appender).try_init(),
        (true, None) => subscriber.json().try_init(),
        (false, Some(appender)) => subscriber.with_ansi(false).with_writer(appender).try_init(),
        (false, None) => subscriber.try_init(),
    };
    if result.is_err() {
        tracing::debug!("Logger already initialized");
    }
}
