use thiserror::Error;

/// Errors raised while loading market data.
#[derive(Debug, Error)]
pub enum DataError {
    /// Reading the source failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The source content could not be decoded.
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// The requested item is not in the source.
    #[error("{0} not found")]
    NotFound(String),
}
