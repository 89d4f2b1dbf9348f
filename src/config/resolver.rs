//! Option resolver: merges user choices with inferred environment facts

use crate::config::template::{
    CANONICAL_REPOSITORY, FALLBACK_BRANCH, REPO_BRANCH_ENV, REPO_URL_ENV,
};
use crate::config::username::{UsernameLookup, resolve_username};
use crate::config::{Configuration, InferredOptions, TemplateSource, UserOptions};
use crate::error::GwiError;
use crate::git::lookup_identity;
use crate::system::{ProcessRunner, System};
use anyhow::Result;
use tracing::debug;

/// Compute where the template is cloned from
///
/// `GWI_REPO_URL` overrides the repository, paired with `GWI_REPO_BRANCH` or
/// the fallback branch. Without an override the canonical repository is
/// pinned to the tag matching the running version.
#[must_use]
pub fn template_source(system: &dyn System, starter_version: &str) -> TemplateSource {
    match system.env_var(REPO_URL_ENV) {
        Ok(repository) => TemplateSource {
            repository,
            branch: system
                .env_var(REPO_BRANCH_ENV)
                .unwrap_or_else(|_| FALLBACK_BRANCH.to_owned()),
        },
        Err(_) => TemplateSource {
            repository: CANONICAL_REPOSITORY.to_owned(),
            branch: format!("v{starter_version}"),
        },
    }
}

/// Build the immutable configuration for one run
///
/// Identity and username lookups degrade to placeholders instead of failing.
///
/// # Errors
///
/// Returns an error if the current working directory cannot be determined
pub fn resolve_configuration(
    user: UserOptions,
    system: &dyn System,
    runner: &dyn ProcessRunner,
    lookup: &dyn UsernameLookup,
) -> Result<Configuration> {
    let identity = lookup_identity(runner);
    let username = resolve_username(lookup, &identity.email);
    let template = template_source(system, &user.starter_version);
    let working_directory = system
        .current_dir()
        .map_err(|e| GwiError::filesystem(format!("Cannot get current directory: {e}")))?;

    debug!(
        "Resolved template {} at {}, username {}",
        template.repository, template.branch, username
    );

    Ok(Configuration::from_parts(
        user,
        InferredOptions {
            identity,
            username,
            template,
            working_directory,
        },
    ))
}
