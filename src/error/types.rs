//! Custom error types with exit codes

use thiserror::Error;

/// Diagnostic shown when the `git` executable cannot be spawned
pub const GIT_MISSING_MESSAGE: &str = "Git is not installed on your PATH. Please install Git and try again. \
For more information, visit: https://git-scm.com/book/en/v2/Getting-Started-Installing-Git";

/// Diagnostic shown when both clone attempts failed
pub const GIT_CLONE_FAILED_MESSAGE: &str = "Git clone failed.";

/// Diagnostic shown when the cloned HEAD cannot be read
pub const GIT_REV_PARSE_FAILED_MESSAGE: &str = "Git rev-parse failed.";

/// Diagnostic shown when the package manager install step fails
pub const INSTALL_FAILED_MESSAGE: &str = "Installation failed. You'll need to install manually.";

/// Main error type for gwi operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum GwiError {
    /// Configuration Error - invalid project name or unusable options
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Template Error - the cloned template does not have the expected shape
    #[error("Template error: {message}")]
    Template { message: String },

    /// Install Error - the package manager failed
    #[error("Install error: {message}")]
    Install { message: String },

    /// Git Error - Git operation failed
    #[error("Git error: {message}")]
    Git { message: String },

    /// Filesystem Error - file operation failed
    #[error("Filesystem error: {message}")]
    Filesystem { message: String },
}

impl GwiError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub const fn exit_code(&self) -> i32 {
        match *self {
            Self::Configuration { .. } => 1,
            Self::Template { .. } => 2,
            Self::Install { .. } => 3,
            Self::Git { .. } => 4,
            Self::Filesystem { .. } => 5,
        }
    }

    /// Create a configuration error
    #[inline]
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a template error
    #[inline]
    pub fn template<S: Into<String>>(message: S) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Create an install error carrying the fixed manual-install diagnostic
    #[inline]
    #[must_use]
    pub fn install_failed() -> Self {
        Self::Install {
            message: INSTALL_FAILED_MESSAGE.to_owned(),
        }
    }

    /// Create a git error
    #[inline]
    pub fn git<S: Into<String>>(message: S) -> Self {
        Self::Git {
            message: message.into(),
        }
    }

    /// Create the error reported when `git` is not on the PATH
    #[inline]
    #[must_use]
    pub fn git_missing() -> Self {
        Self::git(GIT_MISSING_MESSAGE)
    }

    /// Create a filesystem error
    #[inline]
    pub fn filesystem<S: Into<String>>(message: S) -> Self {
        Self::Filesystem {
            message: message.into(),
        }
    }
}
