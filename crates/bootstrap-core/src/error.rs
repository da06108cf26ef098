//! Error types for bootstrap-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using bootstrap-core's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Failures that abort the bootstrap sequence
#[derive(Error, Debug)]
pub enum Error {
    /// Manifest file is missing
    #[error("Manifest not found: {}", .path.display())]
    ManifestNotFound { path: PathBuf },

    /// Manifest is not valid TOML
    #[error("Failed to parse {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// No line to anchor inserted metadata on
    #[error("Could not find a '{anchor}' line in the manifest")]
    AnchorNotFound { anchor: &'static str },

    /// Template download failed
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// Scaffold requested without a project name
    #[error("Project name missing: set [project].name in the manifest")]
    MissingProjectName,

    /// Filesystem operation failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Defaults file could not be read or parsed
    #[error("Invalid config file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    /// External tool could not be started or failed
    #[error("{program} failed: {message}")]
    Tool { program: String, message: String },
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
