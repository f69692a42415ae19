//! Criteria loader for BDD tests
//!
//! Loads every YAML criteria table from the project-root `criteria/`
//! directory.

use crime_means_engine::{CriteriaRegistry, EngineError};
use walkdir::WalkDir;

use super::project_root;

/// Load all criteria YAML files into the registry.
///
/// Returns the number of rows loaded.
pub fn load_all_criteria(registry: &mut CriteriaRegistry) -> Result<usize, EngineError> {
    let criteria_dir = project_root()
        .map(|p| p.join("criteria"))
        .ok_or_else(|| EngineError::LoadError("Could not find criteria directory".to_string()))?;

    if !criteria_dir.exists() {
        return Err(EngineError::LoadError(format!(
            "Criteria directory not found: {}",
            criteria_dir.display()
        )));
    }

    let mut count = 0;

    for entry in WalkDir::new(&criteria_dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_file() && path.extension().is_some_and(|ext| ext == "yaml") {
            let rows = registry.load_from_file(path)?;
            tracing::debug!(path = %path.display(), rows, "Loaded criteria table");
            count += rows;
        }
    }

    Ok(count)
}
