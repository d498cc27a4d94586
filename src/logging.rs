//! File logging. The terminal belongs to the game, so records go to a file.

use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::prelude::*;

pub const LOG_FILE: &str = "duel-tetris.log";

/// Install the global subscriber, appending to `<dir>/duel-tetris.log`.
///
/// Returns the log path. Fails if a subscriber is already installed.
pub fn init(dir: &Path, level: LevelFilter) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let path = dir.join(LOG_FILE);
    let file: File = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .with(level)
        .try_init()
        .context("install tracing subscriber")?;
    Ok(path)
}
