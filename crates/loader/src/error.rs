use themis_contracts::ContractError;
use themis_ports::DataError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Contract error: {0}")]
    Contract(#[from] ContractError),

    #[error("Unsupported timeframe '{0}'")]
    Timeframe(String),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type LoaderResult<T> = std::result::Result<T, LoaderError>;
