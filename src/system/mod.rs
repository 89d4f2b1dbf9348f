//! Boundary between gwi and the machine it runs on
//!
//! Scaffolding reads environment variables, edits the cloned project on disk
//! and launches `git` and the package manager. The first two go through
//! [`System`], processes through [`ProcessRunner`]. Both have in-memory
//! doubles in [`mock`].

use std::env::VarError;
use std::io;
use std::path::{Path, PathBuf};

pub mod mock;
pub mod process;
pub mod real;

pub use mock::{MockProcessRunner, MockResponse, MockSystem};
pub use process::{Invocation, ProcessOutput, ProcessRunner};
pub use real::{RealProcessRunner, RealSystem};

/// Environment and filesystem access
///
/// [`RealSystem`] forwards to `std`; [`MockSystem`] keeps everything in
/// memory.
pub trait System: Send + Sync {
    /// Value of the environment variable `key`
    fn env_var(&self, key: &str) -> Result<String, VarError>;

    /// Directory the project is created in
    fn current_dir(&self) -> io::Result<PathBuf>;

    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Create or truncate `path`; the parent directory must exist
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    /// Delete a directory tree
    fn remove_dir_all(&self, path: &Path) -> io::Result<()>;

    fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Move a file or directory tree
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;

    fn exists(&self, path: &Path) -> io::Result<bool>;

    fn is_file(&self, path: &Path) -> io::Result<bool>;

    fn is_dir(&self, path: &Path) -> io::Result<bool>;

    /// Direct children of `path`
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}
