//! Themis Core Domain
//!
//! Pure domain types for the Themis research toolkit.
//! This crate contains no I/O and is 100% unit testable.

pub mod contracts;
pub mod entities;
pub mod frame;
pub mod values;

// Re-export commonly used types at crate root
pub use contracts::Contract;
pub use entities::{LegTarget, PositionChange, SignalLog, SpreadDirection};
pub use frame::{CLOSE, Column, FrameError, FrameResult, INDICATORS, PriceFrame, TimeSeries};
pub use values::{Quantity, Timestamp};
