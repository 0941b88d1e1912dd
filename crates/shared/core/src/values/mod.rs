use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Signed position size on one leg (negative = short)
pub type Quantity = Decimal;

/// Bar and contract times, always UTC
pub type Timestamp = DateTime<Utc>;
