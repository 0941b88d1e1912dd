//! Signal pipeline configuration
//!
//! A JSON document pairing a spread maker with a spread trader:
//!
//! ```json
//! {
//!   "maker": {
//!     "calculator": { "kind": "percentage", "logret": true },
//!     "smoother": { "kind": "kalman", "pvar": 1e-5, "mvar": 1e-3 }
//!   },
//!   "trader": { "size": "1", "entry": 0.002, "exit": 0.0 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{SignalError, SignalResult};
use crate::maker::{SpreadMaker, SpreadMakerConfig};
use crate::trader::{SpreadTrader, SpreadTraderConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalConfig {
    #[serde(default)]
    pub maker: SpreadMakerConfig,
    #[serde(default)]
    pub trader: SpreadTraderConfig,
}

impl SignalConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> SignalResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            SignalError::Config(format!(
                "failed to read '{}': {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_json(&content)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> SignalResult<Self> {
        serde_json::from_str(json).map_err(|e| SignalError::Config(e.to_string()))
    }

    /// Build the configured maker and trader
    pub fn build(&self) -> SignalResult<(SpreadMaker, SpreadTrader)> {
        Ok((
            SpreadMaker::new(self.maker),
            SpreadTrader::new(self.trader.clone())?,
        ))
    }
}
