//! Bulk Data Loader
//!
//! Pulls the price history of every listed contract of a symbol, then the
//! underlying itself, into a [`DataStore`]:
//!
//! - contract window: listing time to now (active) or expiration + grace;
//!   contracts not listed yet are skipped
//! - underlying window: earliest contract listing to now
//! - a dataset whose key is already in the store is never fetched again
//! - one failing contract is logged and reported, the rest still load

use std::sync::Arc;
use themis_contracts::ContractRegistry;
use themis_core::{Contract, Timestamp};
use themis_ports::{DataSource, DataStore, StoreKey};

use crate::config::LoaderConfig;
use crate::error::LoaderResult;
use crate::report::{LoadOutcome, LoadReport};
use crate::timeframe::normalize_timeframe;

pub struct DataLoader {
    config: LoaderConfig,
    registry: ContractRegistry,
    source: Arc<dyn DataSource>,
    store: Arc<dyn DataStore>,
}

impl DataLoader {
    /// Create a loader
    ///
    /// A source whose name differs from `config.source` is accepted; the
    /// mismatch is only logged.
    pub fn new(
        config: LoaderConfig,
        registry: ContractRegistry,
        source: Arc<dyn DataSource>,
        store: Arc<dyn DataStore>,
    ) -> Self {
        if source.name() != config.source {
            log::warn!(
                "[DataLoader] Configured source '{}' but loading from '{}'",
                config.source,
                source.name()
            );
        }
        Self {
            config,
            registry,
            source,
            store,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn registry(&self) -> &ContractRegistry {
        &self.registry
    }

    /// Load window of a contract, `None` while it is not listed yet
    pub fn window_for(&self, contract: &Contract) -> Option<(Timestamp, Timestamp)> {
        let now = self.registry.now();
        if !contract.is_listed(now) {
            return None;
        }
        let end = if contract.active {
            now
        } else {
            contract.expiration + self.config.grace()
        };
        Some((contract.started, end))
    }

    /// Load one contract unless it is already stored
    ///
    /// `timeframe` may be given in either form ("1Min" or "1m"). A contract
    /// not listed yet at the registry's "now" is skipped.
    pub fn load_contract(&self, contract: &Contract, timeframe: &str) -> LoaderResult<LoadOutcome> {
        let timeframe = normalize_timeframe(timeframe)?;
        self.load_listed(contract, &timeframe)
    }

    /// Load every contract of `symbol` plus the underlying, at the
    /// configured timeframe
    pub fn load_all(&self, symbol: &str) -> LoaderResult<LoadReport> {
        let timeframe = self.config.timeframe.clone();
        self.load_all_with(symbol, &timeframe)
    }

    /// Load every contract of `symbol` plus the underlying
    ///
    /// Malformed symbols and timeframes fail the whole call; fetch and store
    /// failures only fail their own entry in the report.
    pub fn load_all_with(&self, symbol: &str, timeframe: &str) -> LoaderResult<LoadReport> {
        let timeframe = normalize_timeframe(timeframe)?;
        let underlying = symbol.to_uppercase();
        let contracts = self.registry.contracts_for(&underlying)?;

        log::info!(
            "[DataLoader] Loading {} contracts of {} ({}) from {}",
            contracts.len(),
            underlying,
            timeframe,
            self.source.name()
        );

        let mut report = LoadReport::new(underlying.as_str());
        for contract in &contracts {
            let outcome = self.isolate(&contract.ticker, self.load_listed(contract, &timeframe));
            report.push(contract.ticker.as_str(), outcome);
        }

        let now = self.registry.now();
        let earliest = contracts
            .iter()
            .filter(|c| c.is_listed(now))
            .map(|c| c.started)
            .min();
        let outcome = match earliest {
            Some(start) => self.isolate(
                &underlying,
                self.fetch_into_store(&underlying, start, now, &timeframe),
            ),
            None => {
                log::warn!(
                    "[DataLoader] No listed contracts for {}, underlying not loaded",
                    underlying
                );
                LoadOutcome::Skipped
            }
        };
        report.push(underlying.as_str(), outcome);

        log::info!(
            "[DataLoader] {}: {} fetched, {} failed, {} entries",
            underlying,
            report.fetched(),
            report.failures().len(),
            report.len()
        );
        Ok(report)
    }

    fn load_listed(&self, contract: &Contract, timeframe: &str) -> LoaderResult<LoadOutcome> {
        match self.window_for(contract) {
            Some((start, end)) => self.fetch_into_store(&contract.ticker, start, end, timeframe),
            None => {
                log::debug!(
                    "[DataLoader] {} not listed until {}, skipped",
                    contract.ticker,
                    contract.started
                );
                Ok(LoadOutcome::Skipped)
            }
        }
    }

    fn key_for(&self, ticker: &str) -> StoreKey {
        self.config.key_for(ticker)
    }

    fn fetch_into_store(
        &self,
        ticker: &str,
        start: Timestamp,
        end: Timestamp,
        timeframe: &str,
    ) -> LoaderResult<LoadOutcome> {
        let key = self.key_for(ticker);
        if self.store.exists(&key)? {
            log::debug!("[DataLoader] {} already in store", key);
            return Ok(LoadOutcome::Cached);
        }

        log::info!(
            "[DataLoader] Loading {} {} for {} : {}",
            ticker,
            timeframe,
            start,
            end
        );
        let frame = {
            let mut connection = self.source.open()?;
            connection.load_data(&[ticker.to_string()], start, end, timeframe)?
        };

        self.store.save(&key, &frame)?;
        log::info!("[DataLoader] Stored {} rows under {}", frame.len(), key);
        Ok(LoadOutcome::Loaded { rows: frame.len() })
    }

    fn isolate(&self, ticker: &str, result: LoaderResult<LoadOutcome>) -> LoadOutcome {
        result.unwrap_or_else(|e| {
            log::warn!("[DataLoader] Failed to load {}: {}", ticker, e);
            LoadOutcome::Failed(e.to_string())
        })
    }
}
