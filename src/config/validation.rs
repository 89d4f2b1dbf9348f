//! Project name validation

use crate::error::GwiError;
use crate::system::System;
use anyhow::Result;
use regex::Regex;
use std::path::Path;

const MAX_NAME_LENGTH: usize = 214;

/// Diagnostic for `@scope/name`, valid on npm but not as a project directory
pub const SCOPED_NAME_MESSAGE: &str =
    "Scoped names are not supported. Use the bare name and set the scope in package.json.";

/// Names npm refuses regardless of shape
const BLACKLISTED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Node.js core modules, which cannot be published under the same name
const CORE_MODULES: &[&str] = &[
    "assert",
    "buffer",
    "child_process",
    "cluster",
    "console",
    "constants",
    "crypto",
    "dgram",
    "dns",
    "domain",
    "events",
    "fs",
    "http",
    "https",
    "module",
    "net",
    "os",
    "path",
    "process",
    "punycode",
    "querystring",
    "readline",
    "repl",
    "stream",
    "string_decoder",
    "sys",
    "timers",
    "tls",
    "tty",
    "url",
    "util",
    "v8",
    "vm",
    "zlib",
];

/// Check whether `name` is a valid npm package name for a new package
#[must_use]
pub fn is_valid_package_name(name: &str) -> bool {
    if name.is_empty() || name.len() > MAX_NAME_LENGTH {
        return false;
    }

    if name.trim() != name || name.starts_with('.') || name.starts_with('_') {
        return false;
    }

    if name.to_lowercase() != name {
        return false;
    }

    if BLACKLISTED_NAMES.contains(&name) || CORE_MODULES.contains(&name) {
        return false;
    }

    // Optional @scope/ prefix followed by URL-safe characters
    let pattern = Regex::new(r"^(?:@[a-z0-9\-.][a-z0-9\-._]*/)?[a-z0-9\-.][a-z0-9\-._]*$")
        .map(|regex| regex.is_match(name));

    matches!(pattern, Ok(true))
}

/// Validate a project name supplied by the user
///
/// # Errors
///
/// Returns an error if:
/// - The name is not a valid package name
/// - The name is scoped (`@scope/name`), which cannot double as a directory
///   and entry file name
/// - A file or directory with that name already exists in the working directory
pub fn validate_project_name(system: &dyn System, name: &str) -> Result<()> {
    if !is_valid_package_name(name) {
        return Err(GwiError::configuration("Name should be in-kebab-case.").into());
    }

    if name.starts_with('@') {
        return Err(GwiError::configuration(SCOPED_NAME_MESSAGE).into());
    }

    let cwd = system
        .current_dir()
        .map_err(|e| GwiError::filesystem(format!("Cannot get current directory: {e}")))?;

    if system.exists(&cwd.join(Path::new(name)))? {
        return Err(GwiError::configuration(format!(
            "The \"{name}\" path already exists in this directory."
        ))
        .into());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::MockSystem;

    #[test]
    fn accepts_valid_names() {
        assert!(is_valid_package_name("package-name"));
        assert!(is_valid_package_name("package-name-2"));
        assert!(is_valid_package_name("@example/package-name-2"));
        assert!(is_valid_package_name("lib.js"));
    }

    #[test]
    fn rejects_invalid_names() {
        assert!(!is_valid_package_name(""));
        assert!(!is_valid_package_name("PackageName"));
        assert!(!is_valid_package_name(".hidden"));
        assert!(!is_valid_package_name("_private"));
        assert!(!is_valid_package_name(" padded "));
        assert!(!is_valid_package_name("with space"));
        assert!(!is_valid_package_name("node_modules"));
        assert!(!is_valid_package_name("http"));
        assert!(!is_valid_package_name("bang!"));
        assert!(!is_valid_package_name(&"a".repeat(215)));
    }

    #[test]
    fn rejects_scoped_project_names() {
        let system = MockSystem::new().with_current_dir("/work").unwrap();

        let err = validate_project_name(&system, "@example/my-lib").unwrap_err();

        assert!(err.to_string().contains(SCOPED_NAME_MESSAGE));
        assert_eq!(err.downcast_ref::<GwiError>().unwrap().exit_code(), 1);
    }

    #[test]
    fn rejects_padded_project_names() {
        let system = MockSystem::new().with_current_dir("/work").unwrap();

        let err = validate_project_name(&system, " my-lib ").unwrap_err();

        assert!(err.to_string().contains("Name should be in-kebab-case."));
    }

    #[test]
    fn accepts_fresh_project_names() {
        let system = MockSystem::new().with_current_dir("/work").unwrap();

        validate_project_name(&system, "my-lib").unwrap();
    }
}
