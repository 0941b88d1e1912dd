//! Themis Loader
//!
//! Bulk historical data loading for futures contracts and their underlying.
//!
//! ```text
//!   ContractRegistry ──contracts──▶ DataLoader ──open/load_data──▶ DataSource
//!                                       │
//!                                       └──exists/save──▶ DataStore
//!                                                  (MemoryStore, JsonFileStore)
//! ```

mod config;
mod error;
mod loader;
mod report;
mod store;
mod timeframe;

pub use config::LoaderConfig;
pub use error::{LoaderError, LoaderResult};
pub use loader::DataLoader;
pub use report::{LoadOutcome, LoadReport};
pub use store::{JsonFileStore, MemoryStore};
pub use timeframe::normalize_timeframe;
