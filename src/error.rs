//! Error type for the host-facing helpers around the localizer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading configuration, scanning a catalog or reading trees.
///
/// The localize pass itself never returns these: unresolved references and failed
/// copies are handled inside the pass.
#[derive(Debug, Error)]
pub enum LocalizeError {
    /// Failed to read or walk a path on disk.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Path that caused the error.
        path: PathBuf,
        /// Source I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Failed to parse a configuration file.
    #[error("failed to parse {}: {source}", .path.display())]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// Source parse error.
        #[source]
        source: serde_json::Error,
    },
    /// A document tree or catalog did not match the expected JSON shape.
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// A filename template referenced an unknown placeholder.
    #[error("invalid filename template `{template}`: {reason}")]
    InvalidTemplate {
        /// Template as written in the configuration.
        template: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Result alias used by the host-facing helpers.
pub type LocalizeResult<T> = Result<T, LocalizeError>;
