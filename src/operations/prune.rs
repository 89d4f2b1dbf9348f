//! Removal of template-only files

use crate::config::template::{
    CI_FILE, ENTRY_FILE, PLACEHOLDER_TEST_CONTENT, PLACEHOLDER_TEST_FILE,
};
use crate::config::{Configuration, Toggles};
use crate::error::GwiError;
use crate::system::System;
use crate::utils::fs::{clear_directory, create_parent_directories, remove_path_if_exists};
use anyhow::{Context as _, Result};
use std::path::Path;
use tracing::debug;

/// A path scheduled for deletion, relative to the project root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PruneTarget {
    /// Delete everything inside the directory, keep the directory
    ContentsOf(&'static str),
    /// Delete the file or directory itself
    Path(&'static str),
}

impl PruneTarget {
    #[must_use]
    #[inline]
    pub const fn relative_path(self) -> &'static str {
        match self {
            Self::ContentsOf(path) | Self::Path(path) => path,
        }
    }
}

/// Paths deleted from every generated project
const ALWAYS_PRUNED: &[PruneTarget] = &[
    PruneTarget::ContentsOf("src"),
    PruneTarget::ContentsOf("tests"),
    PruneTarget::Path("bin"),
    PruneTarget::Path(".npmignore"),
    PruneTarget::Path("usage.gif"),
    PruneTarget::Path("yarn.lock"),
    PruneTarget::Path(".github"),
];

/// Deletion plan for the given toggles
#[must_use]
pub fn prune_plan(toggles: Toggles) -> Vec<PruneTarget> {
    let mut plan = ALWAYS_PRUNED.to_vec();
    if !toggles.ci {
        plan.push(PruneTarget::Path(CI_FILE));
    }
    plan
}

/// Summary of a prune pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct PruneResult {
    /// Number of filesystem entries removed
    pub removed: usize,
}

/// Delete template-only files, rename the entry file and write a placeholder test
///
/// Missing paths in the plan are tolerated.
///
/// # Errors
///
/// Returns an error if:
/// - An existing path cannot be removed
/// - The template entry file is missing or cannot be renamed
/// - The placeholder test cannot be written
pub fn prune_project(
    system: &dyn System,
    project_path: &Path,
    config: &Configuration,
) -> Result<PruneResult> {
    let mut removed = 0;

    for target in prune_plan(config.toggles()) {
        let path = project_path.join(target.relative_path());
        removed += match target {
            PruneTarget::ContentsOf(_) => clear_directory(system, &path)?,
            PruneTarget::Path(_) => usize::from(remove_path_if_exists(system, &path)?),
        };
    }
    debug!("Removed {} template entries", removed);

    let entry = project_path.join(ENTRY_FILE);
    let renamed = project_path.join(format!("{}.js", config.project_name()));
    system.rename(&entry, &renamed).map_err(|e| {
        GwiError::template(format!(
            "Cannot rename {} to {}: {e}",
            entry.display(),
            renamed.display()
        ))
    })?;

    let placeholder = project_path.join(PLACEHOLDER_TEST_FILE);
    create_parent_directories(system, &placeholder)?;
    system
        .write(&placeholder, PLACEHOLDER_TEST_CONTENT.as_bytes())
        .with_context(|| format!("Failed to write {}", placeholder.display()))?;

    Ok(PruneResult { removed })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ci_file_is_pruned_only_without_ci() {
        let with_ci = prune_plan(Toggles {
            ci: true,
            lint: true,
            install: true,
        });
        assert!(!with_ci.contains(&PruneTarget::Path(CI_FILE)));

        let without_ci = prune_plan(Toggles {
            ci: false,
            lint: true,
            install: true,
        });
        assert_eq!(without_ci.len(), with_ci.len() + 1);
        assert!(without_ci.contains(&PruneTarget::Path(CI_FILE)));
    }
}
