//! `gwi` - A CLI tool for scaffolding new JavaScript repositories
//!
//! This library clones a template repository, rewrites its manifest, license,
//! readme and CI configuration for a new project, prunes template-only files,
//! and optionally installs dependencies and creates the first commit.

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod operations;
pub mod system;
pub mod utils;

use anyhow::Result;
use cli::Args;
use config::validation::validate_project_name;
use config::{GitHubUsernameLookup, resolve_configuration};
use operations::{ScaffoldOperation, ScaffoldReport};
use system::{RealProcessRunner, RealSystem, System};

/// Version of the running tool, used to pick the template tag
pub const STARTER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main entry point for the gwi library
///
/// # Errors
///
/// Returns an error if the project name is invalid or any scaffolding step fails
pub fn run(args: &Args) -> Result<ScaffoldReport> {
    let system = RealSystem::new();
    let runner = RealProcessRunner::new();
    let lookup = GitHubUsernameLookup::new().with_token(system.env_var("GITHUB_TOKEN").ok());

    let options = args.to_user_options(STARTER_VERSION);
    validate_project_name(&system, &options.project_name)?;

    let config = resolve_configuration(options, &system, &runner, &lookup)?;

    ScaffoldOperation::new(config, &system, &runner)
        .show_output(args.verbose)
        .execute()
}
