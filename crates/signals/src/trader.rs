//! Spread Trader
//!
//! Turns the residual `dS` into a sparse log of target positions on both legs
//! using a four-threshold hysteresis scheme:
//!
//! ```text
//!   +entry ──────────────  short entry: falls back below +entry (stays above -exit)
//!    exit  ──────────────  long exit:   rises through exit
//!   -exit  ──────────────  short exit:  falls through -exit
//!   -entry ──────────────  long entry:  climbs back above -entry (stays below exit)
//! ```
//!
//! Triggers only look at the current and the previous residual. A record is
//! emitted only when the triggered direction differs from the last one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use themis_core::{
    INDICATORS, LegTarget, PositionChange, PriceFrame, Quantity, SignalLog, SpreadDirection,
    Timestamp,
};

use crate::calculator::spread_pair;
use crate::error::{SignalError, SignalResult};
use crate::maker::RESIDUAL;

/// Which leg is bought when the spread is bought
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegConvention {
    /// Long spread = sell the first instrument, buy the second
    #[default]
    ShortFirstLongSecond,
    /// Long spread = buy the first instrument, sell the second
    LongFirstShortSecond,
}

impl LegConvention {
    /// Signs applied to `size` for (first, second)
    pub fn leg_signs(&self, direction: SpreadDirection) -> (i8, i8) {
        let d = direction.signum();
        match self {
            LegConvention::ShortFirstLongSecond => (-d, d),
            LegConvention::LongFirstShortSecond => (d, -d),
        }
    }
}

/// Configuration for the spread trader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpreadTraderConfig {
    /// Position size per leg
    pub size: Quantity,
    /// Entry threshold (must be positive)
    pub entry: f64,
    /// Exit threshold
    pub exit: f64,
    /// Leg direction mapping
    #[serde(default)]
    pub legs: LegConvention,
}

impl Default for SpreadTraderConfig {
    fn default() -> Self {
        Self {
            size: Decimal::ONE,
            entry: 1.0,
            exit: 0.0,
            legs: LegConvention::default(),
        }
    }
}

/// Streaming hysteresis state machine over residual samples
///
/// State is the last emitted direction (none before the first trigger).
#[derive(Debug, Clone)]
pub struct SpreadSignalMachine {
    entry: f64,
    exit: f64,
    previous: Option<f64>,
    last: Option<SpreadDirection>,
}

impl SpreadSignalMachine {
    pub fn new(entry: f64, exit: f64) -> SignalResult<Self> {
        if !(entry.is_finite() && entry > 0.0) {
            return Err(SignalError::InvalidParameter(format!(
                "entry threshold must be positive, got {}",
                entry
            )));
        }
        if !exit.is_finite() {
            return Err(SignalError::InvalidParameter(format!(
                "exit threshold must be finite, got {}",
                exit
            )));
        }
        Ok(Self {
            entry,
            exit,
            previous: None,
            last: None,
        })
    }

    /// Direction triggered by the move `previous -> current`, if any
    pub fn trigger(&self, previous: f64, current: f64) -> Option<SpreadDirection> {
        let (entry, exit) = (self.entry, self.exit);

        if previous < -entry && current > -entry && current < exit {
            Some(SpreadDirection::Long)
        } else if previous < exit && current > exit {
            Some(SpreadDirection::Flat)
        } else if previous > entry && current < entry && current > -exit {
            Some(SpreadDirection::Short)
        } else if previous > -exit && current < -exit {
            Some(SpreadDirection::Flat)
        } else {
            None
        }
    }

    /// Feed one residual sample; returns the new direction on a change
    ///
    /// NaN samples are treated as missing and skipped entirely.
    pub fn on_sample(&mut self, residual: f64) -> Option<SpreadDirection> {
        if residual.is_nan() {
            return None;
        }

        let change = self
            .previous
            .and_then(|previous| self.trigger(previous, residual))
            .filter(|direction| self.last != Some(*direction));

        self.previous = Some(residual);
        if change.is_some() {
            self.last = change;
        }
        change
    }

    /// Current direction (flat before the first trigger)
    pub fn direction(&self) -> SpreadDirection {
        self.last.unwrap_or(SpreadDirection::Flat)
    }

    /// Forget all history
    pub fn reset(&mut self) {
        self.previous = None;
        self.last = None;
    }
}

/// Generates position changes for the two legs of a spread frame
#[derive(Debug, Clone)]
pub struct SpreadTrader {
    config: SpreadTraderConfig,
}

impl SpreadTrader {
    /// Create a trader, validating thresholds
    pub fn new(config: SpreadTraderConfig) -> SignalResult<Self> {
        SpreadSignalMachine::new(config.entry, config.exit)?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &SpreadTraderConfig {
        &self.config
    }

    /// Run the state machine over the whole residual history of `frame`
    ///
    /// The legs are the two instruments of the frame, in column order. A
    /// frame without any residual value yields one flat record at its first
    /// timestamp.
    pub fn predict(&self, frame: &PriceFrame) -> SignalResult<SignalLog> {
        let (first, second) = spread_pair(frame)?;
        let mut log = SignalLog::new();

        let residual = frame.series(INDICATORS, RESIDUAL).unwrap_or_default();
        if residual.values().iter().all(|v| v.is_nan()) {
            if let Some(start) = frame.first_timestamp() {
                log::debug!("[SpreadTrader] No residual for {}/{}, staying flat", first, second);
                log.push(PositionChange::flat(start, &first, &second));
            }
            return Ok(log);
        }

        let mut machine = SpreadSignalMachine::new(self.config.entry, self.config.exit)?;
        for (time, value) in residual.iter() {
            if let Some(direction) = machine.on_sample(value) {
                let change = self.change(time, direction, &first, &second);
                log::debug!(
                    "[SpreadTrader] {} at {}: dS={:.6}, {}={} {}={}",
                    direction,
                    time,
                    value,
                    change.first.instrument,
                    change.first.position,
                    change.second.instrument,
                    change.second.position
                );
                log.push(change);
            }
        }

        Ok(log)
    }

    fn change(
        &self,
        time: Timestamp,
        direction: SpreadDirection,
        first: &str,
        second: &str,
    ) -> PositionChange {
        let (a, b) = self.config.legs.leg_signs(direction);
        PositionChange {
            time,
            direction,
            first: LegTarget::new(first, self.scaled(a)),
            second: LegTarget::new(second, self.scaled(b)),
        }
    }

    fn scaled(&self, sign: i8) -> Quantity {
        match sign {
            1 => self.config.size,
            -1 => -self.config.size,
            _ => Decimal::ZERO,
        }
    }
}
