//! Contract listing dates
//!
//! Listing dates cannot be derived from the ticker, so they come from a
//! table. The table is plain configuration: loaded from JSON
//! (`{"XBTZ20": "2020-06-12", ...}`), from a file, or from the embedded
//! BitMEX listing history.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use themis_core::Timestamp;

use crate::error::{ContractError, ContractResult};

/// Ticker -> listing date
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StartDateTable {
    dates: IndexMap<String, NaiveDate>,
}

impl StartDateTable {
    /// An empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Known BitMEX quarterly listings (XBT, ETH, LTC, EOS; H18 to U21)
    pub fn bitmex() -> ContractResult<Self> {
        Self::from_json(include_str!("start_dates.json"))
    }

    /// Load a table from a JSON string
    pub fn from_json(json: &str) -> ContractResult<Self> {
        serde_json::from_str(json).map_err(|e| ContractError::Config(e.to_string()))
    }

    /// Load a table from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> ContractResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ContractError::Config(format!(
                "failed to read '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Builder-style insertion
    pub fn with(mut self, ticker: impl Into<String>, date: NaiveDate) -> Self {
        self.insert(ticker, date);
        self
    }

    /// Add or replace a listing date
    pub fn insert(&mut self, ticker: impl Into<String>, date: NaiveDate) -> Option<NaiveDate> {
        self.dates.insert(ticker.into(), date)
    }

    pub fn get(&self, ticker: &str) -> Option<NaiveDate> {
        self.dates.get(ticker).copied()
    }

    /// Listing time (midnight UTC of the listing date)
    pub fn start_of(&self, ticker: &str) -> Option<Timestamp> {
        self.get(ticker)
            .map(|date| Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)))
    }

    pub fn contains(&self, ticker: &str) -> bool {
        self.dates.contains_key(ticker)
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, NaiveDate)> {
        self.dates.iter().map(|(ticker, date)| (ticker.as_str(), *date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_table() {
        let table = StartDateTable::bitmex().unwrap();

        assert_eq!(table.len(), 55);
        assert_eq!(
            table.get("XBTZ20"),
            NaiveDate::from_ymd_opt(2020, 6, 12)
        );
        assert_eq!(
            table.get("XBTU21"),
            NaiveDate::from_ymd_opt(2021, 3, 12)
        );
        assert!(table.get("XBTZ21").is_none());
    }

    #[test]
    fn test_start_of_is_midnight_utc() {
        let table = StartDateTable::bitmex().unwrap();
        assert_eq!(
            table.start_of("ETHZ20"),
            Some(Utc.with_ymd_and_hms(2020, 9, 11, 0, 0, 0).unwrap())
        );
        assert_eq!(table.start_of("DOGEZ20"), None);
    }

    #[test]
    fn test_injected_entries() {
        let date = NaiveDate::from_ymd_opt(2021, 6, 11).unwrap();
        let mut table = StartDateTable::new().with("XBTZ21", date);

        assert!(table.contains("XBTZ21"));
        assert_eq!(table.insert("XBTZ21", date), Some(date));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_keeps_file_order() {
        let table =
            StartDateTable::from_json(r#"{"B": "2020-01-02", "A": "2020-01-01"}"#).unwrap();
        let tickers: Vec<_> = table.iter().map(|(t, _)| t).collect();
        assert_eq!(tickers, vec!["B", "A"]);
    }

    #[test]
    fn test_rejects_bad_dates() {
        let err = StartDateTable::from_json(r#"{"XBTZ20": "12/06/2020"}"#).unwrap_err();
        assert!(matches!(err, ContractError::Config(_)));
    }
}
