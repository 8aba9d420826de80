//! Error types for the compiler.

use std::path::PathBuf;

/// Result type alias for compiler operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compiling style modules.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A style module failed while authoring its rules.
    #[error(transparent)]
    Build(#[from] kombu::Error),

    /// No module is registered for the requested path.
    #[error("no style module registered for '{}'", path.display())]
    UnknownModule { path: PathBuf },

    /// The path is rejected by the include/exclude filter.
    #[error("'{}' is excluded by the compiler filter", path.display())]
    Filtered { path: PathBuf },

    /// Writing compiled CSS failed.
    #[error("failed to write compiled CSS for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Hot-reload error.
    #[cfg(feature = "hot-reload")]
    #[error("hot-reload error: {0}")]
    HotReload(String),
}

impl Error {
    /// Create an unknown-module error.
    pub fn unknown_module(path: impl Into<PathBuf>) -> Self {
        Self::UnknownModule { path: path.into() }
    }

    /// Create a filtered-path error.
    pub fn filtered(path: impl Into<PathBuf>) -> Self {
        Self::Filtered { path: path.into() }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
