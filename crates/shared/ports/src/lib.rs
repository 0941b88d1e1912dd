//! Themis Ports
//!
//! Port definitions (traits) for the Themis toolkit.
//! These define the boundaries between domain logic and infrastructure.

mod clock;
mod data_source;
mod error;
mod store;

pub use clock::Clock;
pub use data_source::{DataConnection, DataSource};
pub use error::{DataError, DataResult};
pub use store::{DataStore, StoreKey};
