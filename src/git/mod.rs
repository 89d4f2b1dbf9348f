//! Git operations module
//!
//! Handles cloning the template, reading the local identity and creating the
//! first commit. All commands go through [`crate::system::ProcessRunner`].

pub mod clone;
pub mod commit;
pub mod identity;

pub use clone::*;
pub use commit::*;
pub use identity::*;
