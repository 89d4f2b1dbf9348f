//! Configuration management module
//!
//! Holds the immutable [`Configuration`] every scaffolding step reads from,
//! the option resolver that builds it, and project-name validation.

pub mod resolver;
pub mod template;
pub mod username;
pub mod validation;

use core::fmt;
use std::path::{Path, PathBuf};

pub use resolver::{resolve_configuration, template_source};
pub use username::{GitHubUsernameLookup, UsernameLookup, resolve_username};

/// Placeholder values used when the local identity cannot be determined
pub mod placeholders {
    pub const EMAIL: &str = "YOUR_EMAIL";
    pub const NAME: &str = "YOUR_NAME";
    pub const USERNAME: &str = "YOUR_GITHUB_USER_NAME";
}

/// Supported package managers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
}

impl PackageManager {
    pub const ALL: [Self; 2] = [Self::Npm, Self::Yarn];

    /// Executable name
    #[must_use]
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Yarn => "yarn",
        }
    }

    /// Arguments that install the project's dependencies
    #[must_use]
    #[inline]
    pub const fn install_args(self) -> &'static [&'static str] {
        match self {
            Self::Npm => &["install"],
            Self::Yarn => &[],
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feature switches chosen by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggles {
    /// Keep the CI pipeline definition
    pub ci: bool,
    /// Keep eslint tooling
    pub lint: bool,
    /// Install dependencies after scaffolding
    pub install: bool,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            ci: true,
            lint: true,
            install: true,
        }
    }
}

/// Local git identity, either real values or placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub full_name: String,
    pub email: String,
}

impl Identity {
    /// Identity made of both placeholder values
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            full_name: placeholders::NAME.to_owned(),
            email: placeholders::EMAIL.to_owned(),
        }
    }

    /// True when both name and email are real values
    #[must_use]
    #[inline]
    pub fn is_configured(&self) -> bool {
        self.full_name != placeholders::NAME && self.email != placeholders::EMAIL
    }
}

/// Where the template is cloned from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSource {
    pub repository: String,
    pub branch: String,
}

/// Choices supplied by the user on the command line
#[derive(Debug, Clone)]
pub struct UserOptions {
    pub project_name: String,
    pub description: String,
    pub package_manager: PackageManager,
    pub toggles: Toggles,
    /// Version of the running tool, used to pin the template tag
    pub starter_version: String,
}

/// Facts inferred from the environment
#[derive(Debug, Clone)]
pub struct InferredOptions {
    pub identity: Identity,
    pub username: String,
    pub template: TemplateSource,
    pub working_directory: PathBuf,
}

/// Immutable, fully resolved scaffolding configuration
#[derive(Debug, Clone)]
pub struct Configuration {
    project_name: String,
    description: String,
    package_manager: PackageManager,
    toggles: Toggles,
    identity: Identity,
    username: String,
    template: TemplateSource,
    working_directory: PathBuf,
    maintainer: bool,
}

impl Configuration {
    /// Merge user choices with inferred facts
    #[must_use]
    pub fn from_parts(user: UserOptions, inferred: InferredOptions) -> Self {
        let maintainer = inferred.username == template::maintainer::USERNAME;

        Self {
            project_name: user.project_name,
            description: user.description,
            package_manager: user.package_manager,
            toggles: user.toggles,
            identity: inferred.identity,
            username: inferred.username,
            template: inferred.template,
            working_directory: inferred.working_directory,
            maintainer,
        }
    }

    #[must_use]
    #[inline]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    #[must_use]
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    #[inline]
    pub const fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    #[must_use]
    #[inline]
    pub const fn toggles(&self) -> Toggles {
        self.toggles
    }

    #[must_use]
    #[inline]
    pub const fn identity(&self) -> &Identity {
        &self.identity
    }

    #[must_use]
    #[inline]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    #[inline]
    pub const fn template(&self) -> &TemplateSource {
        &self.template
    }

    #[must_use]
    #[inline]
    pub fn working_directory(&self) -> &Path {
        &self.working_directory
    }

    /// Directory the template is cloned into
    #[must_use]
    #[inline]
    pub fn project_path(&self) -> PathBuf {
        self.working_directory.join(&self.project_name)
    }

    /// Whether the resolved username is the template author's
    #[must_use]
    #[inline]
    pub const fn is_maintainer(&self) -> bool {
        self.maintainer
    }

    /// Whether the initial commit step should run
    #[must_use]
    #[inline]
    pub fn should_commit(&self) -> bool {
        self.identity.is_configured()
    }
}
