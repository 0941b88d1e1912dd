use thiserror::Error;

/// Errors raised by external data sources and stores
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Data source failed: {0}")]
    Source(String),

    #[error("Store failed: {0}")]
    Store(String),

    #[error("Key not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}

pub type DataResult<T> = std::result::Result<T, DataError>;
