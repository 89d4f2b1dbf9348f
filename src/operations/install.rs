//! Dependency installation

use crate::config::PackageManager;
use crate::error::GwiError;
use crate::system::{Invocation, ProcessRunner};
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// The command that installs dependencies with `package_manager`
#[must_use]
pub fn install_invocation(package_manager: PackageManager, project_dir: &Path) -> Invocation {
    Invocation::new(
        package_manager.as_str(),
        package_manager.install_args().iter().copied(),
    )
    .current_dir(project_dir)
}

/// Install the project's dependencies
///
/// # Errors
///
/// Returns the fixed manual-install error if the package manager cannot be
/// spawned or exits non-zero. Never retried.
pub fn install_dependencies(
    runner: &dyn ProcessRunner,
    package_manager: PackageManager,
    project_dir: &Path,
) -> Result<()> {
    let invocation = install_invocation(package_manager, project_dir);

    match runner.run(&invocation) {
        Ok(output) if output.success() => Ok(()),
        Ok(output) => {
            debug!(
                "'{}' exited with {:?}: {}",
                invocation,
                output.code,
                output.stderr.trim()
            );
            Err(GwiError::install_failed().into())
        }
        Err(err) => {
            debug!("'{}' could not run: {}", invocation, err);
            Err(GwiError::install_failed().into())
        }
    }
}
