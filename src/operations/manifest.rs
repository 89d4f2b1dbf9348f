//! `package.json` rewriting
//!
//! The manifest is edited structurally first (identity, scripts, hooks,
//! author, dependency filtering) and then passed through a textual rename so
//! every remaining mention of the template and its author points at the new
//! project.

use crate::config::template::{
    INITIAL_VERSION, MANIFEST_FILE, REPOSITORY_HOST, TEMPLATE_NAME, maintainer,
};
use crate::config::{Configuration, PackageManager};
use crate::error::GwiError;
use crate::system::System;
use anyhow::{Context as _, Result};
use regex::Regex;
use serde_json::{Map, Value, json};
use std::path::Path;
use tracing::debug;

/// Dev dependencies every generated project keeps
const KEPT_DEV_DEPENDENCIES: &[&str] = &["ava", "nyc", "husky"];

/// Dev dependencies kept only when lint tooling is enabled
const LINT_DEV_DEPENDENCIES: &[&str] = &[
    "babel-eslint",
    "eslint",
    "eslint-config-airbnb",
    "eslint-config-iamnapo",
    "eslint-plugin-import",
    "eslint-plugin-jsx-a11y",
    "eslint-plugin-react",
    "eslint-plugin-react-hooks",
];

/// Runtime dependencies every generated project keeps
const KEPT_DEPENDENCIES: &[&str] = &[];

/// Dependency names kept for the given lint toggle, in output order
#[must_use]
pub fn kept_dev_dependencies(lint: bool) -> Vec<&'static str> {
    let mut kept = KEPT_DEV_DEPENDENCIES.to_vec();
    if lint {
        kept.extend_from_slice(LINT_DEV_DEPENDENCIES);
    }
    kept
}

/// The fixed `scripts` table for the given toggles
#[must_use]
pub fn scripts_table(lint: bool, package_manager: PackageManager) -> Map<String, Value> {
    let mut scripts = Map::new();
    if lint {
        scripts.insert("lint".to_owned(), json!("eslint ."));
    }
    scripts.insert(
        "start".to_owned(),
        json!(format!("node ./bin/{TEMPLATE_NAME}.js")),
    );
    let test = if lint {
        format!("{package_manager} run lint && nyc ava")
    } else {
        "nyc ava".to_owned()
    };
    scripts.insert("test".to_owned(), json!(test));
    scripts
}

/// The pre-commit hook command for the chosen package manager
#[must_use]
pub fn pre_commit_hook(package_manager: PackageManager) -> String {
    format!("{package_manager} test")
}

/// Keep only `keep` entries of `from`, in `keep` order, skipping absent ones
fn filter_all_but(keep: &[&str], from: Option<&Value>) -> Value {
    let mut filtered = Map::new();
    if let Some(Value::Object(source)) = from {
        for name in keep {
            if let Some(version) = source.get(*name) {
                filtered.insert((*name).to_owned(), version.clone());
            }
        }
    }
    Value::Object(filtered)
}

/// Apply the structural edits to a parsed manifest
///
/// # Errors
///
/// Returns an error if the manifest is not a JSON object
pub fn transform_manifest(manifest: Value, config: &Configuration) -> Result<Value> {
    let Value::Object(mut pkg) = manifest else {
        return Err(GwiError::template(format!("{MANIFEST_FILE} is not a JSON object")).into());
    };

    let toggles = config.toggles();
    let package_manager = config.package_manager();
    let username = config.username();
    let project_name = config.project_name();

    let mut author = match pkg.get("author") {
        Some(Value::Object(existing)) => existing.clone(),
        _ => Map::new(),
    };
    let (author_name, author_url) = if config.is_maintainer() {
        (maintainer::NAME.to_owned(), maintainer::URL.to_owned())
    } else {
        (
            config.identity().full_name.clone(),
            format!("https://github.com/{username}"),
        )
    };
    author.insert("name".to_owned(), json!(author_name));
    author.insert("email".to_owned(), json!(config.identity().email));
    author.insert("url".to_owned(), json!(author_url));

    let dependencies = filter_all_but(KEPT_DEPENDENCIES, pkg.get("dependencies"));
    let dev_dependencies =
        filter_all_but(&kept_dev_dependencies(toggles.lint), pkg.get("devDependencies"));

    pkg.insert("name".to_owned(), json!(project_name));
    pkg.insert("version".to_owned(), json!(INITIAL_VERSION));
    pkg.insert("description".to_owned(), json!(config.description()));
    pkg.insert(
        "scripts".to_owned(),
        Value::Object(scripts_table(toggles.lint, package_manager)),
    );
    pkg.insert(
        "husky".to_owned(),
        json!({ "hooks": { "pre-commit": pre_commit_hook(package_manager) } }),
    );
    pkg.insert(
        "repository".to_owned(),
        json!(format!("{REPOSITORY_HOST}:{username}/{project_name}")),
    );
    pkg.insert("author".to_owned(), Value::Object(author));
    pkg.insert("dependencies".to_owned(), dependencies);
    pkg.insert("devDependencies".to_owned(), dev_dependencies);
    pkg.insert("keywords".to_owned(), json!([]));
    pkg.shift_remove("bin");

    Ok(Value::Object(pkg))
}

/// Serialize a manifest with two-space indentation and a trailing newline
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn render_manifest(manifest: &Value) -> Result<String> {
    let mut rendered =
        serde_json::to_string_pretty(manifest).context("Failed to serialize manifest")?;
    rendered.push('\n');
    Ok(rendered)
}

/// Rename every mention of the template and its author in manifest text
///
/// # Errors
///
/// Returns an error if a rename pattern fails to compile
pub fn retarget_manifest_text(text: &str, config: &Configuration) -> Result<String> {
    let renames = [
        (
            format!(r"\./bin/{}", regex::escape(TEMPLATE_NAME)),
            config.project_name(),
        ),
        (regex::escape(TEMPLATE_NAME), config.project_name()),
        (regex::escape(maintainer::USERNAME), config.username()),
    ];

    let mut result = text.to_owned();
    for (pattern, replacement) in renames {
        let regex = Regex::new(&pattern)
            .with_context(|| format!("Invalid manifest rename pattern: {pattern}"))?;
        result = regex
            .replace_all(&result, regex::NoExpand(replacement))
            .into_owned();
    }

    Ok(result)
}

/// Rewrite `<project>/package.json` for the new project
///
/// # Errors
///
/// Returns an error if:
/// - The manifest is missing or cannot be read
/// - The manifest is not valid JSON
/// - The rewritten manifest cannot be written back
pub fn rewrite_manifest(
    system: &dyn System,
    project_path: &Path,
    config: &Configuration,
) -> Result<()> {
    let manifest_path = project_path.join(MANIFEST_FILE);

    let content = system.read_to_string(&manifest_path).map_err(|e| {
        GwiError::template(format!("Failed to read {}: {e}", manifest_path.display()))
    })?;

    let manifest: Value = serde_json::from_str(&content).map_err(|e| {
        GwiError::template(format!("Failed to parse {}: {e}", manifest_path.display()))
    })?;

    let rewritten = render_manifest(&transform_manifest(manifest, config)?)?;
    system
        .write(&manifest_path, rewritten.as_bytes())
        .with_context(|| format!("Failed to write {}", manifest_path.display()))?;

    debug!("Structural manifest edits written");

    // Textual pass over what was just written
    let written = system
        .read_to_string(&manifest_path)
        .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
    let retargeted = retarget_manifest_text(&written, config)?;
    if retargeted != written {
        system
            .write(&manifest_path, retargeted.as_bytes())
            .with_context(|| format!("Failed to write {}", manifest_path.display()))?;
    }

    Ok(())
}
