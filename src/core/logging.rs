//! File-based logging.
//!
//! The terminal belongs to ratatui while the app runs, so nothing may be
//! written to stdout; log output goes to a daily-rolling JSON file under
//! the data directory instead. `log` macro events are bridged into
//! `tracing` so both macro families land in the same file.

use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the logging system.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of
/// the application so buffered logs are flushed on shutdown. Returns
/// `None` (and logs nowhere) when the log directory cannot be created —
/// a logging failure is never fatal to the app.
pub fn init(data_dir: &Path) -> Option<WorkerGuard> {
    let log_dir = data_dir.join("logs");
    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("Failed to create logs directory {}: {e}", log_dir.display());
        return None;
    }

    let file_appender = tracing_appender::rolling::daily(&log_dir, "traitcloud.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_ansi(false)
        .with_writer(writer);

    if tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init()
        .is_err()
    {
        // Already initialized (tests) — keep the guard anyway.
        return Some(guard);
    }

    // Route `log` macro events into tracing.
    let _ = tracing_log::LogTracer::init();

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Some(guard)
}
