//! Shallow clone of the template repository

use crate::config::TemplateSource;
use crate::config::template::FALLBACK_BRANCH;
use crate::error::GwiError;
use crate::system::{Invocation, ProcessRunner};
use anyhow::Result;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Outcome of a successful template clone
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CloneResult {
    /// Commit the template was cloned at
    pub commit_hash: String,
    /// The clone's `.git` directory; the caller removes it
    pub git_history_dir: PathBuf,
}

/// Clones the template into `<working_directory>/<project_name>`
#[non_exhaustive]
pub struct TemplateFetcher<'src> {
    runner: &'src dyn ProcessRunner,
    suppress_output: bool,
}

impl<'src> TemplateFetcher<'src> {
    #[must_use]
    #[inline]
    pub fn new(runner: &'src dyn ProcessRunner) -> Self {
        Self {
            runner,
            suppress_output: true,
        }
    }

    /// Show git's diagnostics instead of capturing them
    #[must_use]
    #[inline]
    pub const fn show_output(mut self, show: bool) -> Self {
        self.suppress_output = !show;
        self
    }

    /// Clone the template and read its HEAD commit
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `git` is not installed (no retry)
    /// - Both the configured branch and the fallback branch fail to clone
    /// - `git rev-parse HEAD` fails after a successful clone
    pub fn fetch(
        &self,
        source: &TemplateSource,
        working_directory: &Path,
        project_name: &str,
    ) -> Result<CloneResult> {
        let project_dir = working_directory.join(project_name);
        let git_history_dir = project_dir.join(".git");

        match self.clone_branch(source, &source.branch, working_directory, project_name) {
            Ok(()) => {}
            Err(CloneFailure::GitMissing) => return Err(GwiError::git_missing().into()),
            Err(CloneFailure::Failed(reason)) => {
                warn!(
                    "Cloning branch '{}' failed ({}), retrying with '{}'",
                    source.branch, reason, FALLBACK_BRANCH
                );
                self.clone_branch(source, FALLBACK_BRANCH, working_directory, project_name)
                    .map_err(|failure| {
                        debug!("Fallback clone failed: {:?}", failure);
                        GwiError::git(crate::error::GIT_CLONE_FAILED_MESSAGE)
                    })?;
            }
        }

        let commit_hash = self.read_head(&project_dir)?;
        debug!("Cloned {} at {}", source.repository, commit_hash);

        Ok(CloneResult {
            commit_hash,
            git_history_dir,
        })
    }

    fn clone_branch(
        &self,
        source: &TemplateSource,
        branch: &str,
        working_directory: &Path,
        project_name: &str,
    ) -> Result<(), CloneFailure> {
        let invocation = Invocation::new(
            "git",
            [
                "clone".to_owned(),
                "--depth=1".to_owned(),
                format!("--branch={branch}"),
                source.repository.clone(),
                project_name.to_owned(),
            ],
        )
        .current_dir(working_directory)
        .suppress_output(self.suppress_output);

        match self.runner.run(&invocation) {
            Ok(output) if output.success() => Ok(()),
            Ok(output) => Err(CloneFailure::Failed(format!(
                "exit code {}: {}",
                output.code.unwrap_or(-1),
                output.stderr.trim()
            ))),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Err(CloneFailure::GitMissing),
            Err(err) => Err(CloneFailure::Failed(err.to_string())),
        }
    }

    fn read_head(&self, project_dir: &Path) -> Result<String> {
        let invocation = Invocation::new("git", ["rev-parse", "HEAD"]).current_dir(project_dir);

        match self.runner.run(&invocation) {
            Ok(output) if output.success() => Ok(output.stdout_trimmed().to_owned()),
            Ok(output) => {
                debug!("git rev-parse failed: {}", output.stderr.trim());
                Err(GwiError::git(crate::error::GIT_REV_PARSE_FAILED_MESSAGE).into())
            }
            Err(err) => {
                debug!("git rev-parse could not run: {}", err);
                Err(GwiError::git(crate::error::GIT_REV_PARSE_FAILED_MESSAGE).into())
            }
        }
    }
}

#[derive(Debug)]
enum CloneFailure {
    GitMissing,
    Failed(String),
}
