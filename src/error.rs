use thiserror::Error;

/// Errors returned by this crate.
///
/// The deduplication kernel itself never fails: these come from configuration
/// loading and from evaluating similarity signals, whose failures the kernel
/// absorbs as "not similar".
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// Two embeddings have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A signal source has nothing for the requested key.
    #[error("no data for key {key:?}")]
    MissingKey {
        /// The key that was looked up.
        key: String,
    },

    /// A caller-supplied similarity function failed.
    #[error("similarity failed: {0}")]
    Similarity(String),

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path of the configuration file.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::DedupConfig`].
    #[error("failed to parse config {path}: {message}")]
    ConfigParse {
        /// Path of the configuration file, or `<string>`.
        path: String,
        /// Parser message.
        message: String,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
