//! Loader configuration
//!
//! ```json
//! {
//!   "namespace": "m1",
//!   "prefix": "BITMEXH",
//!   "source": "kdb::bitmexh",
//!   "timeframe": "1Min",
//!   "grace_hours": 7
//! }
//! ```
//!
//! Every field is optional; missing fields take the defaults above.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::path::Path;
use themis_ports::StoreKey;

use crate::error::{LoaderError, LoaderResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Store namespace (first key segment)
    pub namespace: String,
    /// Exchange prefix in store keys
    pub prefix: String,
    /// Name of the data source to fetch from
    pub source: String,
    /// Bar timeframe, e.g. "1Min"
    pub timeframe: String,
    /// Data kept past an expired contract's expiration
    pub grace_hours: u32,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            namespace: "m1".to_string(),
            prefix: "BITMEXH".to_string(),
            source: "kdb::bitmexh".to_string(),
            timeframe: "1Min".to_string(),
            grace_hours: 7,
        }
    }
}

impl LoaderConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> LoaderResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            LoaderError::Config(format!(
                "failed to read '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> LoaderResult<Self> {
        serde_json::from_str(json).map_err(|e| LoaderError::Config(e.to_string()))
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn with_timeframe(mut self, timeframe: impl Into<String>) -> Self {
        self.timeframe = timeframe.into();
        self
    }

    pub fn grace(&self) -> Duration {
        Duration::hours(self.grace_hours.into())
    }

    /// Store key for `ticker` (`<namespace>/<prefix>:<ticker>`)
    pub fn key_for(&self, ticker: &str) -> StoreKey {
        StoreKey::new(&self.namespace, &self.prefix, ticker)
    }
}
