//! Time-indexed price tables and dense scalar series

mod error;
mod price_frame;
mod series;

pub use error::{FrameError, FrameResult};
pub use price_frame::{CLOSE, Column, INDICATORS, PriceFrame};
pub use series::TimeSeries;
