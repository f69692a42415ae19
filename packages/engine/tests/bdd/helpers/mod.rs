//! Shared helpers for the BDD suite

pub mod criteria_loader;

use std::path::{Path, PathBuf};

/// Project root, two levels above the package manifest.
pub fn project_root() -> Option<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent() // packages/
        .and_then(|p| p.parent())
        .map(Path::to_path_buf)
}
