//! Spread calculators
//!
//! Turn the close prices of two instruments into a single spread series.
//! Rows where either close is missing are dropped first; rows whose spread
//! is not finite (zero or negative closes in the ratio modes) are dropped
//! after.

use serde::{Deserialize, Serialize};
use themis_core::{CLOSE, PriceFrame, TimeSeries};

use crate::error::{SignalError, SignalResult};

/// How the spread between the two legs is measured
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpreadCalculator {
    /// `close_A - close_B`
    #[default]
    Absolute,
    /// `close_A / close_B - 1`, or `ln(close_A / close_B)` with `logret`
    Percentage {
        #[serde(default)]
        logret: bool,
    },
}

impl SpreadCalculator {
    /// Compute the spread over the rows where both closes are present
    pub fn compute_spread(&self, frame: &PriceFrame) -> SignalResult<TimeSeries> {
        let (first, second) = spread_pair(frame)?;
        let (a, b) = aligned_closes(frame, &first, &second)?;

        let spread = match self {
            SpreadCalculator::Absolute => a.zip_with(&b, |a, b| a - b)?,
            SpreadCalculator::Percentage { logret: false } => a.zip_with(&b, |a, b| a / b - 1.0)?,
            SpreadCalculator::Percentage { logret: true } => a.zip_with(&b, |a, b| (a / b).ln())?,
        };

        let finite = spread.finite();
        if finite.len() < spread.len() {
            log::debug!(
                "[SpreadCalculator] Dropped {} non-finite spread values for {}/{}",
                spread.len() - finite.len(),
                first,
                second
            );
        }
        Ok(finite)
    }
}

/// The two instruments of a spread, in column order
///
/// Exactly two instruments must carry a close column; the indicator
/// namespace is never a leg.
pub fn spread_pair(frame: &PriceFrame) -> SignalResult<(String, String)> {
    match frame.instruments_with(CLOSE).as_slice() {
        [first, second] => Ok((first.to_string(), second.to_string())),
        found => Err(SignalError::MissingData(format!(
            "spread needs close prices for exactly two instruments, found {:?}",
            found
        ))),
    }
}

/// Close series of both legs restricted to rows where both are present
fn aligned_closes(
    frame: &PriceFrame,
    first: &str,
    second: &str,
) -> SignalResult<(TimeSeries, TimeSeries)> {
    let (Some(a), Some(b)) = (frame.column(first, CLOSE), frame.column(second, CLOSE)) else {
        return Err(SignalError::MissingData(format!(
            "close column missing for {} or {}",
            first, second
        )));
    };

    let mut index = Vec::new();
    let mut left = Vec::new();
    let mut right = Vec::new();
    for ((t, a), b) in frame.index().iter().zip(a).zip(b) {
        if let (Some(a), Some(b)) = (a, b) {
            index.push(*t);
            left.push(*a);
            right.push(*b);
        }
    }

    Ok((
        TimeSeries::new(index.clone(), left)?,
        TimeSeries::new(index, right)?,
    ))
}
