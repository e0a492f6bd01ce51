//! Log setup.
//!
//! The TUI owns the terminal, so it logs to a file; the proxy logs to stderr.

use anyhow::{anyhow, Context, Result};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;

fn level(verbose: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Default log file: `<data-local-dir>/pokedex/pokedex.log`.
pub fn default_log_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "pokedex")
        .map(|dirs| dirs.data_local_dir().join("pokedex.log"))
}

/// Send log events to `path`, truncating it first.
pub fn init_file(path: &Path, verbose: bool) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_max_level(level(verbose))
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))
}

/// Send log events to stderr.
pub fn init_stderr(verbose: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(level(verbose))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))
}
