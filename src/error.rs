//! Error type shared by the manifest, alias, and configuration layers.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors that abort a merge or enforcement run.
///
/// Per-archive label lookups never produce one of these; they fall back to
/// the artifact path instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DepsError {
    /// An `--aliased_labels` declaration without any aliased label.
    #[error("alias declaration wanted > 1 '::' delimited values but got '{declaration}'")]
    MalformedAlias {
        /// The declaration as supplied.
        declaration: String,
    },

    /// An enforcement mode other than off/warn/error.
    #[error("unknown enforcement mode '{0}' (expected off, warn or error)")]
    UnknownMode(String),

    /// A required option was not supplied by flags, config file, or manifest.
    #[error("missing required option {0}")]
    MissingOption(&'static str),

    /// A manifest or config file could not be read.
    #[error("couldn't read {}: {message}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O message.
        message: String,
    },

    /// A manifest file was read but is not a valid dependency manifest.
    #[error("couldn't decode dependency manifest {}: {message}", path.display())]
    Decode {
        /// File that failed.
        path: PathBuf,
        /// What was wrong with it.
        message: String,
    },

    /// The merged manifest could not be written.
    #[error("couldn't write {}: {message}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O message.
        message: String,
    },

    /// The configuration file is not valid YAML for the option set.
    #[error("invalid config file {}: {message}", path.display())]
    Config {
        /// Config file path.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
}

/// Result alias for fallible library operations.
pub type Result<T, E = DepsError> = std::result::Result<T, E>;
