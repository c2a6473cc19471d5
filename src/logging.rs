//! File logging.
//!
//! The terminal is in raw mode with the alternate screen up, so log lines go
//! to a file instead of stderr. `RUST_LOG` sets the filter (default `info`).

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Returns `false`, leaving logging off, if
/// the file cannot be created or a subscriber is already installed.
pub fn init(path: &Path) -> bool {
    let Ok(file) = File::create(path) else {
        return false;
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .is_ok()
}
