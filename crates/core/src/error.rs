use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("invalid locator {locator}: {source}")]
    Locator {
        locator: String,
        source: url::ParseError,
    },

    #[error("unsupported locator scheme: {0}")]
    UnsupportedScheme(String),

    #[error("file locator has no usable path: {0}")]
    FilePath(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("fetch of {locator} returned status {status}")]
    Status {
        locator: String,
        status: StatusCode,
    },
}

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("corpus payload does not parse: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Format(#[from] FormatError),
}

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("serialize error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = IndexError> = std::result::Result<T, E>;
