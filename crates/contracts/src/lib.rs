//! Themis Contracts
//!
//! Futures contract identity for BitMEX-style quarterly tickers:
//!
//! - [`ContractTicker`]: `<root><month code><yy>` parsing and expiration
//!   (last Friday of the month, 15:00 UTC)
//! - [`StartDateTable`]: listing dates, injected as configuration
//! - [`ContractRegistry`]: enumerates the listed contracts of a symbol
//!   (`XBTUSD` -> `XBTH18`, `XBTM18`, ...)

mod calendar;
mod error;
mod registry;
mod start_dates;
mod ticker;

pub use calendar::last_weekday_of_month;
pub use error::{ContractError, ContractResult};
pub use registry::{ContractRegistry, FIRST_CONTRACT_YEAR, symbol_root};
pub use start_dates::StartDateTable;
pub use ticker::{ContractTicker, MonthCode};
