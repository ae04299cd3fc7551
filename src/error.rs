use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Error type returned while loading a source into a [`crate::types::RawTable`].
///
/// Per-value problems (an unparseable date or price) are never errors: the normalizer turns them
/// into null fields. Everything here aborts the whole load.
#[derive(Debug, Error)]
pub enum LoadError {
    /// A local source path does not exist. Checked before any read is attempted.
    #[error("source not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    /// Underlying I/O error (permission denied, read failure, ...).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Delimited-text parsing error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "remote")]
    /// Fetching a remote (http/https) source failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The source bytes are not valid in the configured encoding.
    #[error("failed to decode '{source_name}' as {encoding}")]
    Decode {
        source_name: String,
        encoding: &'static str,
    },

    /// The input does not have the expected shape.
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A [`crate::ingestion::SourceConfig`] could not be built.
    #[error("invalid config: {message}")]
    Config { message: String },

    /// An invalid glob pattern was given to [`crate::ingestion::unify`].
    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// A path matched by a glob pattern could not be read.
    #[error("glob error: {0}")]
    Glob(#[from] glob::GlobError),
}
