//! File logging for the simulator.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Platform-specific log directory.
///
/// - macOS: `~/Library/Caches/uncuff/logs`
/// - Linux: `~/.cache/uncuff/logs` (or `$XDG_CACHE_HOME/uncuff/logs`)
/// - Windows: `%LOCALAPPDATA%\uncuff\logs`
/// - Fallback: `/tmp/uncuff/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "uncuff")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/uncuff"))
        .join("logs")
}

/// Installs the global subscriber writing to `<log_dir>/<session>/sim.log`.
///
/// Filtering follows `RUST_LOG`, defaulting to `info`. Stdout is left to the
/// event printer. Buffered lines are flushed when the returned guard drops,
/// so keep it alive until the simulator exits.
pub fn setup_logging(session_id: Option<String>) -> Result<(PathBuf, WorkerGuard)> {
    let session_id = session_id.unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        format!("session_{}", timestamp)
    });

    let session_log_dir = log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir)
        .with_context(|| format!("Failed to create log directory {}", session_log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(&session_log_dir, "sim.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    Ok((session_log_dir.join("sim.log"), guard))
}
