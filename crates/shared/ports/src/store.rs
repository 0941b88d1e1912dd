use themis_core::PriceFrame;

use crate::error::DataResult;

/// Key of a stored dataset: `<namespace>/<prefix>:<ticker>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey(String);

impl StoreKey {
    pub fn new(namespace: &str, prefix: &str, ticker: &str) -> Self {
        Self(format!("{}/{}:{}", namespace, prefix, ticker))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StoreKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Port for persisted price frames
pub trait DataStore: Send + Sync {
    /// Whether a dataset exists under `key`
    fn exists(&self, key: &StoreKey) -> DataResult<bool>;

    /// Persist `frame` under `key`, replacing any previous dataset
    fn save(&self, key: &StoreKey, frame: &PriceFrame) -> DataResult<()>;

    /// Load the dataset stored under `key`
    fn load(&self, key: &StoreKey) -> DataResult<PriceFrame>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_key_format() {
        let key = StoreKey::new("m1", "BITMEXH", "XBTZ20");
        assert_eq!(key.as_str(), "m1/BITMEXH:XBTZ20");
        assert_eq!(format!("{}", key), "m1/BITMEXH:XBTZ20");
    }
}
