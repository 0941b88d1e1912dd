//! Data store adapters
//!
//! - [`MemoryStore`]: concurrent in-process map, for tests and dry runs
//! - [`JsonFileStore`]: one JSON document per key under a root directory

use dashmap::DashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use themis_core::PriceFrame;
use themis_ports::{DataError, DataResult, DataStore, StoreKey};

/// In-memory store backed by a [`DashMap`]
///
/// Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    frames: Arc<DashMap<StoreKey, PriceFrame>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Stored keys, sorted
    pub fn keys(&self) -> Vec<StoreKey> {
        let mut keys: Vec<_> = self.frames.iter().map(|e| e.key().clone()).collect();
        keys.sort();
        keys
    }
}

impl DataStore for MemoryStore {
    fn exists(&self, key: &StoreKey) -> DataResult<bool> {
        Ok(self.frames.contains_key(key))
    }

    fn save(&self, key: &StoreKey, frame: &PriceFrame) -> DataResult<()> {
        self.frames.insert(key.clone(), frame.clone());
        Ok(())
    }

    fn load(&self, key: &StoreKey) -> DataResult<PriceFrame> {
        self.frames
            .get(key)
            .map(|frame| frame.clone())
            .ok_or_else(|| DataError::NotFound(key.to_string()))
    }
}

/// File-backed store
///
/// `m1/BITMEXH:XBTZ20` is stored as `<root>/m1_2FBITMEXH_3AXBTZ20.json`:
/// ASCII letters, digits, `.` and `-` are kept, every other byte (including
/// `_`) is written as `_` plus two hex digits, so distinct keys never share
/// a file. Documents are written to a temporary file and renamed into place.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed
    pub fn open(root: impl Into<PathBuf>) -> DataResult<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        log::debug!("[JsonFileStore] Opened store at {}", root.display());
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the dataset for `key`
    pub fn path_for(&self, key: &StoreKey) -> PathBuf {
        let mut name = String::with_capacity(key.as_str().len() + 5);
        for byte in key.as_str().bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-') {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("_{:02X}", byte));
            }
        }
        name.push_str(".json");
        self.root.join(name)
    }
}

impl DataStore for JsonFileStore {
    fn exists(&self, key: &StoreKey) -> DataResult<bool> {
        Ok(self.path_for(key).is_file())
    }

    fn save(&self, key: &StoreKey, frame: &PriceFrame) -> DataResult<()> {
        let json =
            serde_json::to_string(frame).map_err(|e| DataError::Serialization(e.to_string()))?;

        let mut staged = tempfile::NamedTempFile::new_in(&self.root)?;
        staged.write_all(json.as_bytes())?;
        staged.as_file().sync_all()?;
        staged
            .persist(self.path_for(key))
            .map_err(|e| DataError::Io(e.error))?;
        Ok(())
    }

    fn load(&self, key: &StoreKey) -> DataResult<PriceFrame> {
        let path = self.path_for(key);
        if !path.is_file() {
            return Err(DataError::NotFound(key.to_string()));
        }
        let content = std::fs::read_to_string(&path)?;
        serde_json::from_str(&content).map_err(|e| DataError::Serialization(e.to_string()))
    }
}
