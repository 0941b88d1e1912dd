//! Error types for the signals crate

use thiserror::Error;
use themis_core::FrameError;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SignalError {
    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Frame error: {0}")]
    Frame(#[from] FrameError),

    #[error("Config error: {0}")]
    Config(String),
}

pub type SignalResult<T> = std::result::Result<T, SignalError>;
