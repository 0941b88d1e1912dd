use chrono::Datelike;
use regex::Regex;
use std::sync::{Arc, LazyLock};
use themis_core::{Contract, Timestamp};
use themis_ports::Clock;

use crate::error::{ContractError, ContractResult};
use crate::start_dates::StartDateTable;
use crate::ticker::{ContractTicker, MonthCode};

/// First year with listed quarterly contracts
pub const FIRST_CONTRACT_YEAR: i32 = 2018;

static SYMBOL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+?)USDT?$").expect("symbol pattern is valid"));

/// Root of a perpetual symbol: `XBTUSD` -> `XBT`, `ethusdt` -> `ETH`
pub fn symbol_root(symbol: &str) -> ContractResult<String> {
    let upper = symbol.to_uppercase();
    SYMBOL
        .captures(&upper)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| ContractError::symbol(symbol))
}

/// Derives futures contracts for a symbol
///
/// Expirations are computed from the ticker; listing dates come from the
/// injected [`StartDateTable`]. `active` flags are evaluated against the
/// registry clock when the contracts are built.
pub struct ContractRegistry {
    start_dates: StartDateTable,
    clock: Arc<dyn Clock>,
}

impl ContractRegistry {
    pub fn new(start_dates: StartDateTable, clock: Arc<dyn Clock>) -> Self {
        log::debug!(
            "[ContractRegistry] {} listing dates, clock {}",
            start_dates.len(),
            clock.name()
        );
        Self { start_dates, clock }
    }

    /// Registry over the embedded BitMEX listing history
    pub fn bitmex(clock: Arc<dyn Clock>) -> ContractResult<Self> {
        Ok(Self::new(StartDateTable::bitmex()?, clock))
    }

    pub fn now(&self) -> Timestamp {
        self.clock.now()
    }

    pub fn start_dates(&self) -> &StartDateTable {
        &self.start_dates
    }

    /// Expiration of `ticker`: last Friday of the contract month, 15:00 UTC
    pub fn expiration_for(&self, ticker: &str) -> ContractResult<Timestamp> {
        ContractTicker::parse(ticker)?.expiration()
    }

    /// Listing time of `ticker`, if known
    pub fn start_date_for(&self, ticker: &str) -> Option<Timestamp> {
        self.start_dates.start_of(ticker)
    }

    /// All listed quarterly contracts of `symbol`, oldest first
    pub fn contracts_for(&self, symbol: &str) -> ContractResult<Vec<Contract>> {
        let root = symbol_root(symbol)?;
        let underlying = symbol.to_uppercase();
        let now = self.now();

        let mut contracts = Vec::new();
        for year in FIRST_CONTRACT_YEAR..=now.year() {
            for month in MonthCode::QUARTERLY {
                let ticker = ContractTicker::new(root.as_str(), month, year);
                let name = ticker.to_string();
                let Some(started) = self.start_date_for(&name) else {
                    continue;
                };
                let expiration = ticker.expiration()?;
                contracts.push(Contract::new(
                    underlying.as_str(),
                    name,
                    started,
                    expiration,
                    now,
                ));
            }
        }

        log::debug!(
            "[ContractRegistry] {} contracts for {} ({} active)",
            contracts.len(),
            underlying,
            contracts.iter().filter(|c| c.active).count()
        );
        Ok(contracts)
    }
}
