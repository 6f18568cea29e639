//! Tracing setup. The terminal belongs to the UI, so events go to a file.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::db::ensure_parent_dir;

/// Route tracing output to `path`. The terminal belongs to the TUI, so nothing
/// is written to stdout or stderr. `RUST_LOG` overrides the default `info`
/// level.
pub fn init_tracing(path: &Path) -> Result<()> {
    ensure_parent_dir(path).context("failed to create log directory")?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}
