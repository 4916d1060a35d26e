//! Publishing the rendered calendar.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

/// Write `content` to `destination`, or to stdout when there is none.
pub fn publish(destination: Option<&Path>, content: &str) -> Result<()> {
    match destination {
        Some(path) => write_atomically(path, content),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(content.as_bytes())
                .and_then(|()| stdout.flush())
                .context("Failed to write to stdout")
        }
    }
}

/// Replace `path` with `content` in one step.
///
/// The content goes to a temporary file next to the destination, which is
/// then renamed over it. Readers see either the old file or the new one.
pub fn write_atomically(path: &Path, content: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .with_context(|| format!("Failed to write temporary file for {}", path.display()))?;
    tmp.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    tracing::debug!(path = %path.display(), bytes = content.len(), "Wrote output");
    Ok(())
}
