//! Tracing setup
//!
//! The CLI logs to stderr. The TUI owns the terminal, so it logs to
//! `<cache_dir>/fluxify/fluxify.log` instead. `RUST_LOG` overrides the
//! default `warn` level in both cases.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log file used by the TUI
pub fn log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("fluxify").join("fluxify.log"))
}

/// Install a stderr subscriber (CLI mode)
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Install a file subscriber (TUI mode)
///
/// Logging is silently disabled when the cache directory is unusable.
pub fn init_file() {
    let file = log_path().and_then(|path| {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).ok()?;
        }
        OpenOptions::new().create(true).append(true).open(path).ok()
    });

    let Some(file) = file else {
        return;
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
