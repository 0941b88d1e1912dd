//! Spread Maker
//!
//! Attaches the indicator bundle to a price frame:
//! - `S`: raw spread between the two legs
//! - `M`: smoothed spread
//! - `dS`: residual `S - M`, the mean-reverting component that gets traded
//!
//! All three live under the reserved `indicators` namespace and are aligned to
//! the full index of the input frame (missing where the spread is undefined).

use serde::{Deserialize, Serialize};
use themis_core::{INDICATORS, PriceFrame};

use crate::calculator::SpreadCalculator;
use crate::error::SignalResult;
use crate::smoother::Smoother;

/// Raw spread column
pub const SPREAD: &str = "S";
/// Smoothed spread column
pub const SMOOTHED: &str = "M";
/// Residual column
pub const RESIDUAL: &str = "dS";

/// Configuration for the spread maker
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SpreadMakerConfig {
    #[serde(default)]
    pub calculator: SpreadCalculator,
    #[serde(default)]
    pub smoother: Smoother,
}

/// Computes the spread indicators for a two-instrument frame
#[derive(Debug, Clone, Default)]
pub struct SpreadMaker {
    config: SpreadMakerConfig,
}

impl SpreadMaker {
    pub fn new(config: SpreadMakerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SpreadMakerConfig {
        &self.config
    }

    /// Return a copy of `frame` carrying the indicator bundle
    ///
    /// Indicator columns already present on `frame` are replaced. When the
    /// legs never overlap only an all-missing `dS` column is attached.
    pub fn transform(&self, frame: &PriceFrame) -> SignalResult<PriceFrame> {
        let spread = self.config.calculator.compute_spread(frame)?;

        let mut out = frame.clone();
        out.remove_instrument(INDICATORS);

        if spread.is_empty() {
            log::debug!(
                "[SpreadMaker] No overlapping closes in {} rows, residual left empty",
                frame.len()
            );
            out.insert_column(INDICATORS, RESIDUAL, vec![None; frame.len()])?;
            return Ok(out);
        }

        let smoothed = self.config.smoother.smooth(&spread)?;
        let residual = spread.zip_with(&smoothed, |s, m| s - m)?;

        out.insert_column(INDICATORS, SPREAD, frame.align(&spread))?;
        out.insert_column(INDICATORS, SMOOTHED, frame.align(&smoothed))?;
        out.insert_column(INDICATORS, RESIDUAL, frame.align(&residual))?;

        log::debug!(
            "[SpreadMaker] Spread computed on {} of {} rows",
            spread.len(),
            frame.len()
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smoother::{KalmanSmoother, PeriodSmoother};
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone, Utc};
    use themis_core::{CLOSE, Timestamp};

    fn ts(minute: i64) -> Timestamp {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap() + Duration::minutes(minute)
    }

    fn frame() -> PriceFrame {
        PriceFrame::new(vec![ts(0), ts(1), ts(2), ts(3)])
            .unwrap()
            .with_column("ETHZ20", CLOSE, vec![Some(12.0), Some(14.0), None, Some(13.0)])
            .unwrap()
            .with_column("ETHUSD", CLOSE, vec![Some(10.0), Some(11.0), Some(12.0), Some(12.0)])
            .unwrap()
    }

    #[test]
    fn test_indicator_bundle_is_aligned() {
        let maker = SpreadMaker::new(SpreadMakerConfig {
            calculator: SpreadCalculator::Absolute,
            smoother: Smoother::Kalman(KalmanSmoother::default()),
        });
        let out = maker.transform(&frame()).unwrap();

        assert_eq!(out.index(), frame().index());
        let s = out.column(INDICATORS, SPREAD).unwrap();
        let m = out.column(INDICATORS, SMOOTHED).unwrap();
        let ds = out.column(INDICATORS, RESIDUAL).unwrap();

        assert_eq!(s, &[Some(2.0), Some(3.0), None, Some(1.0)]);
        assert!(m[2].is_none());
        assert!(ds[2].is_none());
        // Smoother starts at the first observation
        assert_eq!(m[0], Some(2.0));
        assert_eq!(ds[0], Some(0.0));
        for i in [0, 1, 3] {
            assert_relative_eq!(ds[i].unwrap(), s[i].unwrap() - m[i].unwrap());
        }
    }

    #[test]
    fn test_input_columns_are_preserved() {
        let out = SpreadMaker::default().transform(&frame()).unwrap();
        assert_eq!(out.column("ETHZ20", CLOSE), frame().column("ETHZ20", CLOSE));
        assert_eq!(out.instruments(), vec!["ETHZ20", "ETHUSD", INDICATORS]);
    }

    #[test]
    fn test_rerun_replaces_indicators() {
        let maker = SpreadMaker::new(SpreadMakerConfig {
            calculator: SpreadCalculator::Absolute,
            smoother: Smoother::Period(PeriodSmoother::ema(Duration::minutes(5))),
        });
        let once = maker.transform(&frame()).unwrap();
        let twice = maker.transform(&once).unwrap();

        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_overlap_attaches_missing_residual() {
        let frame = PriceFrame::new(vec![ts(0), ts(1)])
            .unwrap()
            .with_column("A", CLOSE, vec![Some(1.0), None])
            .unwrap()
            .with_column("B", CLOSE, vec![None, Some(1.0)])
            .unwrap();

        let out = SpreadMaker::default().transform(&frame).unwrap();

        assert_eq!(out.index(), frame.index());
        assert_eq!(out.column(INDICATORS, RESIDUAL).unwrap(), &[None, None]);
        assert!(out.column(INDICATORS, SPREAD).is_none());
        assert!(out.column(INDICATORS, SMOOTHED).is_none());
    }
}
