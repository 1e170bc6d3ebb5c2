use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong while submitting one image for analysis
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Failed to read {}: {source}", path.display())]
    ReadImage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Server {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid endpoint URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Errors raised while loading the client configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Base URL {0:?} cannot carry endpoint paths")]
    NotABase(String),
}

/// Errors raised while reading a picked file for its preview
#[derive(Error, Debug)]
pub enum PreviewError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is empty", .0.display())]
    Empty(PathBuf),
}
