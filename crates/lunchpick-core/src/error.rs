use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for environment variable {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("cannot pick from an empty place set")]
    EmptyPlaceSet,
}

/// Failure to write the durable key-value store.
///
/// Reads never produce this: a missing or unreadable store is an empty one.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("state file I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("state serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Why a place list could not be turned into something to suggest from.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    /// The place source could not be reached. Retryable.
    #[error("place source unavailable: {0}")]
    SourceUnavailable(String),

    /// The source answered, but no usable records survived parsing.
    #[error("no places found in the source")]
    EmptyPlaceSet,
}
