use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while rendering or saving a directory tree.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum Error {
    /// The configured root directory does not exist or is not a directory.
    #[error("'{}' directory not found", path.display())]
    RootNotFound {
        /// Configured root path
        path: PathBuf,
    },

    /// A directory's contents could not be listed.
    #[error("Cannot list directory '{path}': {message}")]
    Access {
        /// Directory that failed to list
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// IO error while persisting output.
    #[error("IO error accessing '{path}': {message}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// Error message
        message: String,
    },

    /// Configuration validation error.
    #[error("Invalid configuration: {message}")]
    Config {
        /// Detailed error message
        message: String,
    },
}

impl Error {
    /// Creates a root-not-found error.
    #[must_use]
    pub fn root_not_found(path: impl Into<PathBuf>) -> Self {
        Self::RootNotFound { path: path.into() }
    }

    /// Creates an access error for a directory that could not be listed.
    #[must_use]
    pub fn access(path: impl Into<PathBuf>, source: &std::io::Error) -> Self {
        Self::Access {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates an IO error with path context.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Returns true if the root directory was missing.
    #[must_use]
    pub const fn is_root_not_found(&self) -> bool {
        matches!(self, Self::RootNotFound { .. })
    }

    /// Returns true if a directory could not be listed.
    #[must_use]
    pub const fn is_access(&self) -> bool {
        matches!(self, Self::Access { .. })
    }

    /// Returns true if this is an IO error.
    #[must_use]
    pub const fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Returns true if this is a configuration error.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_not_found_message() {
        let err = Error::root_not_found("src");
        assert!(err.is_root_not_found());
        assert_eq!(err.to_string(), "'src' directory not found");
    }

    #[test]
    fn test_access_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = Error::access("/tmp/locked", &io_err);
        assert!(err.is_access());
        assert!(err.to_string().contains("/tmp/locked"));
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = Error::io("/tmp/test.txt", io_err);
        assert!(err.is_io());
        assert!(err.to_string().contains("/tmp/test.txt"));
    }

    #[test]
    fn test_error_clone() {
        let err = Error::config("test");
        let cloned = err.clone();
        assert!(cloned.is_config());
        assert_eq!(err.to_string(), cloned.to_string());
    }
}
