//! Error types for the contracts crate

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    #[error("Can't recognize {what} '{input}'")]
    Parse { what: &'static str, input: String },

    #[error("Start date table error: {0}")]
    Config(String),
}

impl ContractError {
    pub(crate) fn ticker(input: &str) -> Self {
        ContractError::Parse {
            what: "contract",
            input: input.to_string(),
        }
    }

    pub(crate) fn symbol(input: &str) -> Self {
        ContractError::Parse {
            what: "symbol (expected <symb>USD or <symb>USDT)",
            input: input.to_string(),
        }
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, ContractError::Parse { .. })
    }
}

pub type ContractResult<T> = std::result::Result<T, ContractError>;
