//! Integration test: DataLoader against a recording data source
//!
//! Tests:
//! 1. Every contract plus the underlying is fetched once and stored
//! 2. A second run fetches nothing
//! 3. Load windows follow the contract state and the clock
//! 4. Contracts listed after the clock are skipped
//! 5. Failures stay isolated to their own contract

use chrono::{Duration, TimeZone, Utc};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use themis_clock::FixedClock;
use themis_contracts::ContractRegistry;
use themis_core::{CLOSE, PriceFrame, Timestamp};
use themis_loader::{
    DataLoader, JsonFileStore, LoadOutcome, LoaderConfig, LoaderError, MemoryStore,
};
use themis_ports::{DataConnection, DataError, DataResult, DataSource, DataStore, StoreKey};

#[derive(Debug, Clone, PartialEq)]
struct Request {
    instrument: String,
    start: Timestamp,
    end: Timestamp,
    timeframe: String,
}

/// Records every request and answers with three one-minute bars
struct RecordingSource {
    name: String,
    requests: Mutex<Vec<Request>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingSource {
    fn new() -> Self {
        Self::named("kdb::bitmexh")
    }

    fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            requests: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    fn fail_on(&self, instrument: &str) {
        self.failing.lock().unwrap().insert(instrument.to_string());
    }

    fn recover(&self) {
        self.failing.lock().unwrap().clear();
    }

    fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    fn request_for(&self, instrument: &str) -> Option<Request> {
        self.requests()
            .into_iter()
            .find(|r| r.instrument == instrument)
    }
}

struct RecordingConnection<'a> {
    source: &'a RecordingSource,
}

impl DataSource for RecordingSource {
    fn open(&self) -> DataResult<Box<dyn DataConnection + '_>> {
        Ok(Box::new(RecordingConnection { source: self }))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl DataConnection for RecordingConnection<'_> {
    fn load_data(
        &mut self,
        instruments: &[String],
        start: Timestamp,
        end: Timestamp,
        timeframe: &str,
    ) -> DataResult<PriceFrame> {
        let instrument = instruments[0].clone();
        self.source.requests.lock().unwrap().push(Request {
            instrument: instrument.clone(),
            start,
            end,
            timeframe: timeframe.to_string(),
        });

        if self.source.failing.lock().unwrap().contains(&instrument) {
            return Err(DataError::Source(format!("no data for {}", instrument)));
        }

        let index = (0..3).map(|i| start + Duration::minutes(i)).collect();
        PriceFrame::new(index)
            .and_then(|f| f.with_column(&instrument, CLOSE, vec![Some(1.0); 3]))
            .map_err(|e| DataError::Source(e.to_string()))
    }
}

fn now() -> Timestamp {
    Utc.with_ymd_and_hms(2021, 1, 15, 12, 0, 0).unwrap()
}

fn loader_at(
    time: Timestamp,
    source: &Arc<RecordingSource>,
    store: Arc<dyn DataStore>,
) -> DataLoader {
    let registry = ContractRegistry::bitmex(Arc::new(FixedClock::at(time))).unwrap();
    DataLoader::new(LoaderConfig::default(), registry, source.clone(), store)
}

#[test]
fn test_second_load_fetches_nothing() {
    let _ = env_logger::try_init();

    let source = Arc::new(RecordingSource::new());
    let store = MemoryStore::new();
    let loader = loader_at(now(), &source, Arc::new(store.clone()));

    let first = loader.load_all("xbtusd").unwrap();
    // XBTH18..XBTU21 plus XBTUSD, XBTU21 not listed until March
    assert_eq!(first.len(), 16);
    assert_eq!(first.fetched(), 15);
    assert!(first.is_success());
    assert_eq!(source.requests().len(), 15);
    assert_eq!(store.len(), 15);

    let second = loader.load_all("XBTUSD").unwrap();
    assert_eq!(second.fetched(), 0);
    for (ticker, outcome) in second.entries() {
        let expected = if ticker == "XBTU21" {
            LoadOutcome::Skipped
        } else {
            LoadOutcome::Cached
        };
        assert_eq!(outcome, &expected, "{}", ticker);
    }
    assert_eq!(source.requests().len(), 15);
}

#[test]
fn test_contracts_load_before_underlying() {
    let source = Arc::new(RecordingSource::new());
    let loader = loader_at(now(), &source, Arc::new(MemoryStore::new()));

    let report = loader.load_all("XBTUSD").unwrap();
    let order: Vec<_> = report
        .entries()
        .iter()
        .filter(|(_, o)| *o != LoadOutcome::Skipped)
        .map(|(t, _)| t.as_str())
        .collect();
    assert_eq!(order.first(), Some(&"XBTH18"));
    assert_eq!(order.last(), Some(&"XBTUSD"));

    let requested: Vec<_> = source.requests().into_iter().map(|r| r.instrument).collect();
    assert_eq!(requested, order);
}

#[test]
fn test_store_keys() {
    let source = Arc::new(RecordingSource::new());
    let store = MemoryStore::new();
    let loader = loader_at(now(), &source, Arc::new(store.clone()));

    loader.load_all("ETHUSD").unwrap();

    let keys: Vec<_> = store.keys().iter().map(|k| k.to_string()).collect();
    assert!(keys.contains(&"m1/BITMEXH:ETHZ20".to_string()));
    assert!(keys.contains(&"m1/BITMEXH:ETHUSD".to_string()));
    assert!(keys.iter().all(|k| k.starts_with("m1/BITMEXH:ETH")));

    let frame = store.load(&StoreKey::new("m1", "BITMEXH", "ETHZ20")).unwrap();
    assert!(frame.column("ETHZ20", CLOSE).is_some());
}

#[test]
fn test_load_windows() {
    let source = Arc::new(RecordingSource::new());
    let loader = loader_at(now(), &source, Arc::new(MemoryStore::new()));

    loader.load_all("XBTUSD").unwrap();

    // Expired: listing to expiration + 7h
    let expired = source.request_for("XBTZ20").unwrap();
    assert_eq!(expired.start, Utc.with_ymd_and_hms(2020, 6, 12, 0, 0, 0).unwrap());
    assert_eq!(expired.end, Utc.with_ymd_and_hms(2020, 12, 25, 22, 0, 0).unwrap());
    assert_eq!(expired.timeframe, "1m");

    // Active: listing to now
    let active = source.request_for("XBTH21").unwrap();
    assert_eq!(active.start, Utc.with_ymd_and_hms(2020, 9, 11, 0, 0, 0).unwrap());
    assert_eq!(active.end, now());

    // Underlying: earliest listing to now
    let underlying = source.request_for("XBTUSD").unwrap();
    assert_eq!(
        underlying.start,
        Utc.with_ymd_and_hms(2017, 12, 15, 0, 0, 0).unwrap()
    );
    assert_eq!(underlying.end, now());
}

#[test]
fn test_unlisted_contracts_are_skipped() {
    let _ = env_logger::try_init();

    let source = Arc::new(RecordingSource::new());
    let at = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();
    let loader = loader_at(at, &source, Arc::new(MemoryStore::new()));

    let report = loader.load_all("ETHUSD").unwrap();
    for ticker in ["ETHM19", "ETHU19", "ETHZ19"] {
        assert_eq!(report.outcome_of(ticker), Some(&LoadOutcome::Skipped));
        assert!(source.request_for(ticker).is_none());
    }
    assert!(report.is_success());

    let requests = source.requests();
    assert!(!requests.is_empty());
    assert!(requests.iter().all(|r| r.start <= r.end));

    // ETHH19 was listed two weeks before the clock
    let listed = source.request_for("ETHH19").unwrap();
    assert_eq!(listed.end, at);

    let contract = loader
        .registry()
        .contracts_for("ETHUSD")
        .unwrap()
        .into_iter()
        .find(|c| c.ticker == "ETHU19")
        .unwrap();
    assert_eq!(loader.window_for(&contract), None);
    assert_eq!(loader.load_contract(&contract, "1Min").unwrap(), LoadOutcome::Skipped);
    assert_eq!(source.requests().len(), requests.len());
}

#[test]
fn test_failure_is_isolated() {
    let source = Arc::new(RecordingSource::new());
    let store = MemoryStore::new();
    let loader = loader_at(now(), &source, Arc::new(store.clone()));

    source.fail_on("XBTU20");
    let report = loader.load_all("XBTUSD").unwrap();

    let failures = report.failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].0, "XBTU20");
    assert!(failures[0].1.contains("no data for XBTU20"));
    assert_eq!(report.fetched(), 14);
    assert!(matches!(
        report.outcome_of("XBTZ20"),
        Some(LoadOutcome::Loaded { rows: 3 })
    ));
    assert!(!store.exists(&StoreKey::new("m1", "BITMEXH", "XBTU20")).unwrap());

    // Next run picks up only what is missing
    source.recover();
    let retry = loader.load_all("XBTUSD").unwrap();
    assert_eq!(retry.fetched(), 1);
    assert_eq!(
        retry.outcome_of("XBTU20"),
        Some(&LoadOutcome::Loaded { rows: 3 })
    );
}

#[test]
fn test_unknown_root_skips_underlying() {
    let source = Arc::new(RecordingSource::new());
    let loader = loader_at(now(), &source, Arc::new(MemoryStore::new()));

    let report = loader.load_all("DOGEUSD").unwrap();
    assert_eq!(report.entries(), &[("DOGEUSD".to_string(), LoadOutcome::Skipped)]);
    assert!(source.requests().is_empty());
}

#[test]
fn test_malformed_input_is_fatal() {
    let source = Arc::new(RecordingSource::new());
    let loader = loader_at(now(), &source, Arc::new(MemoryStore::new()));

    assert!(matches!(
        loader.load_all("ABC"),
        Err(LoaderError::Contract(e)) if e.is_parse()
    ));
    assert!(matches!(
        loader.load_all_with("XBTUSD", "minutely"),
        Err(LoaderError::Timeframe(_))
    ));
    assert!(source.requests().is_empty());
}

#[test]
fn test_single_contract_and_timeframe() {
    let source = Arc::new(RecordingSource::new());
    let loader = loader_at(now(), &source, Arc::new(MemoryStore::new()));

    let contract = loader
        .registry()
        .contracts_for("XBTUSD")
        .unwrap()
        .into_iter()
        .find(|c| c.ticker == "XBTM20")
        .unwrap();

    let outcome = loader.load_contract(&contract, "5Min").unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded { rows: 3 });
    assert_eq!(loader.load_contract(&contract, "5Min").unwrap(), LoadOutcome::Cached);

    let requests = source.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].timeframe, "5m");
}

#[test]
fn test_configured_timeframe_and_source() {
    let _ = env_logger::try_init();

    // Source name differs from the configured one: logged, still loads
    let source = Arc::new(RecordingSource::named("kdb::replica"));
    let registry = ContractRegistry::bitmex(Arc::new(FixedClock::at(now()))).unwrap();
    let config = LoaderConfig::default()
        .with_source("kdb::bitmexh")
        .with_timeframe("5Min");

    let loader = DataLoader::new(config, registry, source.clone(), Arc::new(MemoryStore::new()));
    let report = loader.load_all("XBTUSD").unwrap();

    assert_eq!(report.fetched(), 15);
    assert!(source.requests().iter().all(|r| r.timeframe == "5m"));
}

#[test]
fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let source = Arc::new(RecordingSource::new());
    let at = Utc.with_ymd_and_hms(2019, 1, 1, 0, 0, 0).unwrap();

    let store = JsonFileStore::open(dir.path()).unwrap();
    let report = loader_at(at, &source, Arc::new(store)).load_all("ETHUSD").unwrap();
    // ETHH18..ETHH19 plus ETHUSD, later contracts not listed yet
    assert_eq!(report.fetched(), 6);
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 6);

    let reopened = JsonFileStore::open(dir.path()).unwrap();
    let report = loader_at(at + Duration::days(1), &source, Arc::new(reopened))
        .load_all("ETHUSD")
        .unwrap();
    assert_eq!(report.fetched(), 0);
    assert_eq!(source.requests().len(), 6);
}
