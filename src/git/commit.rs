//! Initial commit of the generated project

use crate::config::Configuration;
use crate::config::template::INITIAL_COMMIT_MESSAGE;
use crate::error::GwiError;
use crate::system::{Invocation, ProcessRunner};
use anyhow::Result;
use std::path::Path;
use tracing::debug;

/// What the commit step ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Identity unknown, nothing was run
    Skipped,
    /// Maintainer case, repository initialized without a commit
    Initialized,
    /// Repository initialized and everything committed
    Committed,
}

/// Initialize the repository and commit, as gated by the configuration
///
/// # Errors
///
/// Returns an error if any git command fails to spawn or exits non-zero
pub fn initial_commit(
    runner: &dyn ProcessRunner,
    config: &Configuration,
    project_dir: &Path,
) -> Result<CommitOutcome> {
    if !config.should_commit() {
        debug!("Git identity unknown, skipping initial commit");
        return Ok(CommitOutcome::Skipped);
    }

    run_git(runner, project_dir, &["init".to_owned()])?;

    if config.is_maintainer() {
        return Ok(CommitOutcome::Initialized);
    }

    let identity = config.identity();
    run_git(runner, project_dir, &["add".to_owned(), "-A".to_owned()])?;
    run_git(
        runner,
        project_dir,
        &[
            "-c".to_owned(),
            format!("user.name={}", identity.full_name),
            "-c".to_owned(),
            format!("user.email={}", identity.email),
            "commit".to_owned(),
            "-m".to_owned(),
            INITIAL_COMMIT_MESSAGE.to_owned(),
        ],
    )?;

    Ok(CommitOutcome::Committed)
}

fn run_git(runner: &dyn ProcessRunner, project_dir: &Path, args: &[String]) -> Result<()> {
    let invocation = Invocation::new("git", args.iter().cloned()).current_dir(project_dir);

    let output = runner.run(&invocation).map_err(|err| {
        GwiError::git(format!("Failed to run '{}': {err}", invocation.command_line()))
    })?;

    if !output.success() {
        return Err(GwiError::git(format!(
            "'{}' failed with exit code {}: {}",
            invocation.command_line(),
            output.code.unwrap_or(-1),
            output.stderr.trim()
        ))
        .into());
    }

    Ok(())
}
