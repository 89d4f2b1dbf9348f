//! Fixed facts about the upstream template repository
//!
//! Every generated project starts from the same template, so the strings that
//! get rewritten are known ahead of time.

/// Name the template uses for itself in manifests, readmes and paths
pub const TEMPLATE_NAME: &str = "gwi";

/// Repository cloned when no override is configured
pub const CANONICAL_REPOSITORY: &str = "https://github.com/iamnapo/gwi.git";

/// Branch used for overridden repositories and for the clone retry
pub const FALLBACK_BRANCH: &str = "master";

/// Environment variable overriding the template repository URL
pub const REPO_URL_ENV: &str = "GWI_REPO_URL";

/// Environment variable overriding the template branch (only with `GWI_REPO_URL`)
pub const REPO_BRANCH_ENV: &str = "GWI_REPO_BRANCH";

/// Host prefix written into the manifest `repository` field
pub const REPOSITORY_HOST: &str = "github";

/// Version every generated project starts at
pub const INITIAL_VERSION: &str = "0.1.0";

/// Manifest file name
pub const MANIFEST_FILE: &str = "package.json";

/// License file name
pub const LICENSE_FILE: &str = "LICENSE";

/// Readme file name
pub const README_FILE: &str = "README.md";

/// CI pipeline definition
pub const CI_FILE: &str = ".travis.yml";

/// Template entry file, renamed after the new project
pub const ENTRY_FILE: &str = "index.js";

/// Placeholder test written into the pruned `tests` directory
pub const PLACEHOLDER_TEST_FILE: &str = "tests/unit.test.js";

pub const PLACEHOLDER_TEST_CONTENT: &str = "import test from 'ava';\n\ntest.todo('main');\n";

/// Tagline in the template readme, replaced by the project description
pub const TEMPLATE_TAGLINE: &str = "Interactive CLI for creating new JS repositories";

/// Usage image reference in the template readme
pub const TEMPLATE_USAGE_IMAGE: &str = "![Usage](usage.gif)";

/// Message of the first commit in generated repositories
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit\n\nCreated with iamnapo/gwi";

/// Identity of the template's author
pub mod maintainer {
    /// Host username that triggers the maintainer case
    pub const USERNAME: &str = "iamnapo";
    pub const NAME: &str = "Napoleon-Christos Oikonomou";
    pub const EMAIL: &str = "napoleonoikon@gmail.com";
    /// Site as it appears in the license and readme
    pub const SITE: &str = "iamnapo.me";
    /// Author URL written into the manifest
    pub const URL: &str = "https://iamnapo.me";
}
