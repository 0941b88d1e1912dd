//! Dated futures contracts

mod contract;

pub use contract::Contract;
