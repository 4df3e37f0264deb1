//! Copies bundled county topology files into the public directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Recursively copy `from` into `to`, returning the number of files copied.
/// A missing `from` is skipped with a warning.
pub fn stage(from: &Path, to: &Path) -> Result<usize> {
    if !from.exists() {
        warn!("{} not found, skipping", from.display());
        return Ok(0);
    }

    fs::create_dir_all(to).with_context(|| format!("Failed to create {}", to.display()))?;

    let mut copied = 0;
    for entry in WalkDir::new(from) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(from)?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .with_context(|| format!("Failed to create {}", target.display()))?;
        } else {
            debug!("{} -> {}", entry.path().display(), target.display());
            fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy {}", entry.path().display()))?;
            copied += 1;
        }
    }

    info!(
        "Copied {} files from {} to {}",
        copied,
        from.display(),
        to.display()
    );
    Ok(copied)
}
