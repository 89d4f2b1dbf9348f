//! Core scaffolding operations
//!
//! Manifest rewriting, document patching, pruning, installation and the
//! orchestration that ties them together.

pub mod install;
pub mod manifest;
pub mod patch;
pub mod prune;
pub mod scaffold;

pub use install::install_dependencies;
pub use manifest::rewrite_manifest;
pub use patch::{apply_patches, patch_document, patch_rules};
pub use prune::prune_project;
pub use scaffold::{ScaffoldOperation, ScaffoldReport};
