use themis_core::{PriceFrame, Timestamp};

use crate::error::DataResult;

/// Port for historical market data
///
/// A source hands out scoped connections. A connection is released when it
/// is dropped, so callers hold one only for the duration of a single load.
pub trait DataSource: Send + Sync {
    /// Open a connection to the source
    fn open(&self) -> DataResult<Box<dyn DataConnection + '_>>;

    /// Get the source's name/identifier for debugging
    fn name(&self) -> &str {
        "DataSource"
    }
}

/// An open connection to a [`DataSource`]
pub trait DataConnection {
    /// Load bars for `instruments` in `[start, end]`
    ///
    /// `timeframe` is the short code ("1m", "1h", ...).
    fn load_data(
        &mut self,
        instruments: &[String],
        start: Timestamp,
        end: Timestamp,
        timeframe: &str,
    ) -> DataResult<PriceFrame>;
}
