//! Declarative document patching
//!
//! The edits applied to `LICENSE`, `README.md` and `.travis.yml` are described
//! as a table of [`PatchRule`]s. [`patch_rules`] builds the table for a
//! configuration, [`applicable_rules`] drops rules whose condition does not
//! hold, and [`apply_patches`] runs what is left, one file at a time.

use crate::config::Configuration;
use crate::config::template::{
    CI_FILE, LICENSE_FILE, README_FILE, TEMPLATE_NAME, TEMPLATE_TAGLINE, TEMPLATE_USAGE_IMAGE,
    maintainer,
};
use crate::error::GwiError;
use crate::system::System;
use anyhow::{Context as _, Result};
use regex::Regex;
use std::path::Path;
use tracing::debug;

/// Files touched by the patcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchTarget {
    License,
    Readme,
    CiPipeline,
}

impl PatchTarget {
    pub const ALL: [Self; 3] = [Self::License, Self::Readme, Self::CiPipeline];

    /// File name relative to the project root
    #[must_use]
    #[inline]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::License => LICENSE_FILE,
            Self::Readme => README_FILE,
            Self::CiPipeline => CI_FILE,
        }
    }
}

/// When a rule applies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    CiEnabled,
    CiDisabled,
    NotMaintainer,
}

/// Facts conditions are evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchFlags {
    pub ci: bool,
    pub maintainer: bool,
}

impl PatchFlags {
    #[must_use]
    #[inline]
    pub const fn from_config(config: &Configuration) -> Self {
        Self {
            ci: config.toggles().ci,
            maintainer: config.is_maintainer(),
        }
    }
}

impl Condition {
    #[must_use]
    #[inline]
    pub const fn holds(self, flags: PatchFlags) -> bool {
        match self {
            Self::Always => true,
            Self::CiEnabled => flags.ci,
            Self::CiDisabled => !flags.ci,
            Self::NotMaintainer => !flags.maintainer,
        }
    }
}

/// What to search for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// Exact text, every occurrence
    Literal(String),
    /// Regular expression, every match
    Regex(String),
}

/// One search/replace edit on one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchRule {
    pub target: PatchTarget,
    pub condition: Condition,
    pub pattern: Pattern,
    pub replacement: String,
}

impl PatchRule {
    fn literal(target: PatchTarget, condition: Condition, from: &str, to: &str) -> Self {
        Self {
            target,
            condition,
            pattern: Pattern::Literal(from.to_owned()),
            replacement: to.to_owned(),
        }
    }

    fn regex(target: PatchTarget, condition: Condition, from: &str, to: &str) -> Self {
        Self {
            target,
            condition,
            pattern: Pattern::Regex(from.to_owned()),
            replacement: to.to_owned(),
        }
    }
}

/// Build the full, ordered rule table for a configuration
#[must_use]
pub fn patch_rules(config: &Configuration) -> Vec<PatchRule> {
    use Condition::{Always, CiDisabled, CiEnabled, NotMaintainer};
    use PatchTarget::{CiPipeline, License, Readme};

    let identity = config.identity();
    let site = format!("github.com/{}", config.username());
    let usage = format!("```\n$ {}\n```", config.project_name());
    let template_badge = format!(r"\[!\[n.*{}\) ", regex::escape(TEMPLATE_NAME));
    let ci_badge = format!(r"\[!.*{}\) ", regex::escape(TEMPLATE_NAME));

    vec![
        // LICENSE
        PatchRule::literal(License, NotMaintainer, maintainer::NAME, &identity.full_name),
        PatchRule::literal(License, NotMaintainer, maintainer::EMAIL, &identity.email),
        PatchRule::literal(License, NotMaintainer, maintainer::SITE, &site),
        // README.md
        PatchRule::regex(Readme, Always, r"\n## A.*\n\n.*\n", ""),
        PatchRule::regex(Readme, Always, r" \[!\[G.*", ""),
        PatchRule::regex(Readme, Always, &template_badge, ""),
        PatchRule::regex(Readme, CiDisabled, &ci_badge, ""),
        PatchRule::literal(Readme, NotMaintainer, maintainer::NAME, &identity.full_name),
        PatchRule::literal(Readme, NotMaintainer, maintainer::EMAIL, &identity.email),
        PatchRule::literal(Readme, NotMaintainer, maintainer::SITE, &site),
        PatchRule::regex(Readme, Always, &regex::escape(TEMPLATE_NAME), config.project_name()),
        PatchRule::regex(
            Readme,
            Always,
            &regex::escape(maintainer::USERNAME),
            config.username(),
        ),
        PatchRule::literal(Readme, Always, TEMPLATE_TAGLINE, config.description()),
        PatchRule::literal(Readme, Always, TEMPLATE_USAGE_IMAGE, &usage),
        // .travis.yml
        PatchRule::regex(
            CiPipeline,
            CiEnabled,
            "npm",
            config.package_manager().as_str(),
        ),
        PatchRule::regex(CiPipeline, CiEnabled, r"^after.*\n.*codecov", ""),
    ]
}

/// Rules whose condition holds, in table order
#[must_use]
pub fn applicable_rules(rules: &[PatchRule], flags: PatchFlags) -> Vec<&PatchRule> {
    rules
        .iter()
        .filter(|rule| rule.condition.holds(flags))
        .collect()
}

/// Apply rules to a document in order, each one global
///
/// # Errors
///
/// Returns an error if a regex pattern is invalid
pub fn apply_rules_to_text<'rule, I>(text: &str, rules: I) -> Result<String>
where
    I: IntoIterator<Item = &'rule PatchRule>,
{
    let mut result = text.to_owned();

    for rule in rules {
        result = match &rule.pattern {
            Pattern::Literal(from) => result.replace(from.as_str(), &rule.replacement),
            Pattern::Regex(from) => {
                let regex =
                    Regex::new(from).with_context(|| format!("Invalid regex pattern: {from}"))?;
                regex
                    .replace_all(&result, regex::NoExpand(&rule.replacement))
                    .into_owned()
            }
        };
    }

    Ok(result)
}

/// Documents with at least one applicable rule, in patch order
#[must_use]
pub fn patched_targets(rules: &[PatchRule], flags: PatchFlags) -> Vec<PatchTarget> {
    let applicable = applicable_rules(rules, flags);
    PatchTarget::ALL
        .into_iter()
        .filter(|target| applicable.iter().any(|rule| rule.target == *target))
        .collect()
}

/// Apply the applicable rules for one document
///
/// A document without applicable rules is never opened. Returns whether the
/// content changed.
///
/// # Errors
///
/// Returns an error if:
/// - The document does not exist or cannot be read
/// - A regex pattern is invalid
/// - The patched document cannot be written
pub fn patch_document(
    system: &dyn System,
    project_path: &Path,
    rules: &[PatchRule],
    flags: PatchFlags,
    target: PatchTarget,
) -> Result<bool> {
    let file_rules: Vec<&PatchRule> = applicable_rules(rules, flags)
        .into_iter()
        .filter(|rule| rule.target == target)
        .collect();

    if file_rules.is_empty() {
        debug!("No edits for {}, skipping", target.file_name());
        return Ok(false);
    }

    let file_path = project_path.join(target.file_name());
    let content = system
        .read_to_string(&file_path)
        .map_err(|e| GwiError::template(format!("Cannot patch {}: {e}", file_path.display())))?;

    let patched = apply_rules_to_text(&content, file_rules.iter().copied())?;
    debug!("Applied {} edits to {}", file_rules.len(), target.file_name());

    if patched == content {
        return Ok(false);
    }

    system
        .write(&file_path, patched.as_bytes())
        .with_context(|| format!("Failed to write patched file: {}", file_path.display()))?;
    Ok(true)
}

/// Apply the applicable rules to every document
///
/// Returns the number of documents whose content changed.
///
/// # Errors
///
/// Returns an error if any document fails to patch, see [`patch_document`]
pub fn apply_patches(
    system: &dyn System,
    project_path: &Path,
    rules: &[PatchRule],
    flags: PatchFlags,
) -> Result<usize> {
    let mut files_changed = 0;
    for target in patched_targets(rules, flags) {
        if patch_document(system, project_path, rules, flags, target)? {
            files_changed += 1;
        }
    }
    Ok(files_changed)
}
