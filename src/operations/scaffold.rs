//! Scaffold operation coordination

use crate::config::Configuration;
use crate::git::{CommitOutcome, TemplateFetcher, initial_commit};
use crate::operations::install::install_dependencies;
use crate::operations::manifest::rewrite_manifest;
use crate::operations::patch::{PatchFlags, patch_document, patch_rules, patched_targets};
use crate::operations::prune::prune_project;
use crate::system::{ProcessRunner, System};
use crate::utils::fs::remove_path_if_exists;
use crate::utils::progress::Step;
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// What a finished scaffold produced
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScaffoldReport {
    pub project_name: String,
    pub project_path: PathBuf,
    /// Template commit the project was created from
    pub commit_hash: String,
    pub documents_patched: usize,
    pub entries_pruned: usize,
    pub installed: bool,
    pub commit: CommitOutcome,
}

impl ScaffoldReport {
    /// Line printed once the project is ready
    #[must_use]
    pub fn summary(&self) -> String {
        format!("Created {}. \u{1f389}", self.project_name)
    }
}

/// Coordinates the complete scaffold run
#[non_exhaustive]
pub struct ScaffoldOperation<'src> {
    config: Configuration,
    system: &'src dyn System,
    runner: &'src dyn ProcessRunner,
    show_output: bool,
}

impl<'src> ScaffoldOperation<'src> {
    #[must_use]
    #[inline]
    pub fn new(
        config: Configuration,
        system: &'src dyn System,
        runner: &'src dyn ProcessRunner,
    ) -> Self {
        Self {
            config,
            system,
            runner,
            show_output: false,
        }
    }

    /// Let git print its diagnostics while cloning
    #[must_use]
    #[inline]
    pub const fn show_output(mut self, show: bool) -> Self {
        self.show_output = show;
        self
    }

    #[must_use]
    #[inline]
    pub const fn config(&self) -> &Configuration {
        &self.config
    }

    /// Run every step in order
    ///
    /// A failure aborts the run and leaves the partially generated project on
    /// disk.
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails
    pub fn execute(&self) -> Result<ScaffoldReport> {
        let config = &self.config;
        let project_path = config.project_path();

        if config.is_maintainer() {
            info!("Welcome back, master.");
        }

        let step = Step::start("Cloning default repository.");
        let clone = TemplateFetcher::new(self.runner)
            .show_output(self.show_output)
            .fetch(
                config.template(),
                config.working_directory(),
                config.project_name(),
            )?;
        remove_path_if_exists(self.system, &clone.git_history_dir)
            .context("Failed to remove the template's git history")?;
        step.succeed_with(&format!("Cloned at commit: {}", clone.commit_hash));
        debug!("Template cloned into {}", project_path.display());

        let step = Step::start("Updating package.json");
        rewrite_manifest(self.system, &project_path, config)?;
        step.succeed();

        let rules = patch_rules(config);
        let flags = PatchFlags::from_config(config);
        let mut documents_patched = 0;
        for target in patched_targets(&rules, flags) {
            let step = Step::start(&format!("Updating {}", target.file_name()));
            if patch_document(self.system, &project_path, &rules, flags, target)? {
                documents_patched += 1;
            }
            step.succeed();
        }

        let step = Step::start("Deleting unnecessary files");
        let pruned = prune_project(self.system, &project_path, config)?;
        step.succeed();

        let installed = if config.toggles().install {
            let step = Step::start("Installing dependencies");
            install_dependencies(self.runner, config.package_manager(), &project_path)?;
            step.succeed();
            true
        } else {
            debug!("Dependency installation disabled");
            false
        };

        let commit = if config.should_commit() {
            let step = Step::start("Initializing git");
            let outcome = initial_commit(self.runner, config, &project_path)?;
            step.succeed();
            outcome
        } else {
            debug!("Git identity unknown, skipping initial commit");
            CommitOutcome::Skipped
        };

        Ok(ScaffoldReport {
            project_name: config.project_name().to_owned(),
            project_path,
            commit_hash: clone.commit_hash,
            documents_patched,
            entries_pruned: pruned.removed,
            installed,
            commit,
        })
    }
}
