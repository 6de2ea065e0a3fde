//! Package discovery.

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};

/// Locate package directories whose manifest matches `pattern` (relative to
/// `root`), skipping anything under `node_modules`.
///
/// The result is sorted, so it does not depend on enumeration order.
pub fn discover_packages(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let escaped_root = glob::Pattern::escape(&root.to_string_lossy());
    let abs_pattern = format!("{}/{}", escaped_root.trim_end_matches('/'), pattern);
    let entries = glob::glob(&abs_pattern).map_err(|source| Error::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut dirs = Vec::new();
    for entry in entries {
        let manifest = entry.map_err(|e| {
            let path = e.path().to_path_buf();
            Error::read(path, e.into())
        })?;
        let rel = manifest.strip_prefix(root).unwrap_or(&manifest);
        if rel
            .components()
            .any(|c| matches!(c, Component::Normal(n) if n == "node_modules"))
        {
            continue;
        }
        if let Some(dir) = manifest.parent() {
            dirs.push(dir.to_path_buf());
        }
    }
    dirs.sort();
    dirs.dedup();
    Ok(dirs)
}
