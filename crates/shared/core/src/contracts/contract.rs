use serde::{Deserialize, Serialize};

use crate::values::Timestamp;

/// A dated futures contract (e.g., XBTZ20)
///
/// Built on demand from a listing date and the expiration derived from the
/// ticker. Only the price data of a contract is ever persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contract {
    /// Underlying symbol (e.g., "XBTUSD")
    pub underlying: String,
    /// Contract ticker (e.g., "XBTZ20")
    pub ticker: String,
    /// Listing time
    pub started: Timestamp,
    /// Expiration time
    pub expiration: Timestamp,
    /// Whether the contract had not yet expired when it was built
    pub active: bool,
}

impl Contract {
    /// Create a contract, evaluating `active` against `now`
    pub fn new(
        underlying: impl Into<String>,
        ticker: impl Into<String>,
        started: Timestamp,
        expiration: Timestamp,
        now: Timestamp,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            ticker: ticker.into(),
            started,
            expiration,
            active: expiration >= now,
        }
    }

    /// Check if the contract was already trading at `now`
    pub fn is_listed(&self, now: Timestamp) -> bool {
        self.started <= now
    }

    /// Check if the contract has expired at `now`
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now > self.expiration
    }
}

impl std::fmt::Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | {} - {} {} |",
            self.ticker,
            self.started,
            self.expiration,
            if self.active { "ACTIVE " } else { "EXPIRED" }
        )
    }
}
