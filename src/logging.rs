//! Logging setup
//
// The terminal UI owns stdout, so events go to a log file.
// `RUST_LOG` overrides the default filter.
//
// Usage:
//   Call `logging::init()` at the start of main().

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info";

/// Where log lines are written
pub fn log_path() -> PathBuf {
    std::env::temp_dir().join("bank-dashboard.log")
}

/// Install the global subscriber. Returns the log file path.
///
/// Calling it twice is harmless: the second install is ignored.
pub fn init() -> std::io::Result<PathBuf> {
    let path = log_path();
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let env_filter = match std::env::var("RUST_LOG") {
        Ok(val) => EnvFilter::new(val),
        Err(_) => EnvFilter::new(DEFAULT_FILTER),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .try_init();

    Ok(path)
}
