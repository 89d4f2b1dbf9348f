//! File system utilities

use crate::system::System;
use anyhow::{Context as _, Result};
use std::io;
use std::path::Path;
use tracing::debug;

/// Create parent directories for a file path if they don't exist
///
/// # Errors
///
/// Returns an error if the directories cannot be created
pub fn create_parent_directories(system: &dyn System, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent()
        && !system.exists(parent)?
    {
        system.create_dir_all(parent).with_context(|| {
            format!(
                "Failed to create parent directories for: {}",
                file_path.display()
            )
        })?;
    }
    Ok(())
}

/// Remove a file or directory tree, tolerating its absence
///
/// Returns whether anything was removed.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed
pub fn remove_path_if_exists(system: &dyn System, path: &Path) -> Result<bool> {
    let removal = if system.is_dir(path)? {
        system.remove_dir_all(path)
    } else if system.is_file(path)? {
        system.remove_file(path)
    } else {
        debug!("Nothing to remove at {}", path.display());
        return Ok(false);
    };

    match removal {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).with_context(|| format!("Failed to remove: {}", path.display())),
    }
}

/// Remove every entry inside `dir`, keeping the directory itself
///
/// Returns the number of entries removed; a missing directory removes nothing.
///
/// # Errors
///
/// Returns an error if the directory cannot be read or an entry cannot be removed
pub fn clear_directory(system: &dyn System, dir: &Path) -> Result<usize> {
    if !system.is_dir(dir)? {
        return Ok(0);
    }

    let entries = system
        .read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?;

    let mut removed = 0;
    for entry in entries {
        if remove_path_if_exists(system, &entry)? {
            removed += 1;
        }
    }

    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn clear_directory_keeps_the_directory() {
        let system = MockSystem::new()
            .with_file("/p/src/a.js", b"a")
            .unwrap()
            .with_file("/p/src/nested/b.js", b"b")
            .unwrap();

        let removed = clear_directory(&system, Path::new("/p/src")).unwrap();
        assert_eq!(removed, 2);
        assert!(system.is_dir(Path::new("/p/src")).unwrap());
        assert!(!system.exists(Path::new("/p/src/nested/b.js")).unwrap());
    }

    #[test]
    fn removing_missing_path_is_not_an_error() {
        let system = MockSystem::new();
        assert!(!remove_path_if_exists(&system, Path::new("/nope")).unwrap());
        assert_eq!(clear_directory(&system, Path::new("/nope")).unwrap(), 0);
    }
}
