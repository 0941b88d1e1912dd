use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::values::{Quantity, Timestamp};

/// Directional view on a two-leg spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpreadDirection {
    /// Short the spread
    Short,
    /// No position
    Flat,
    /// Long the spread
    Long,
}

impl SpreadDirection {
    /// -1, 0 or +1
    pub fn signum(&self) -> i8 {
        match self {
            SpreadDirection::Short => -1,
            SpreadDirection::Flat => 0,
            SpreadDirection::Long => 1,
        }
    }

    pub fn is_flat(&self) -> bool {
        matches!(self, SpreadDirection::Flat)
    }
}

impl std::fmt::Display for SpreadDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SpreadDirection::Short => write!(f, "SHORT"),
            SpreadDirection::Flat => write!(f, "FLAT"),
            SpreadDirection::Long => write!(f, "LONG"),
        }
    }
}

/// Target position for one leg
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegTarget {
    pub instrument: String,
    /// Signed target position (positive = long, negative = short)
    pub position: Quantity,
}

impl LegTarget {
    pub fn new(instrument: impl Into<String>, position: Quantity) -> Self {
        Self {
            instrument: instrument.into(),
            position,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.position.is_zero()
    }
}

/// A change of target positions on both legs at one timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionChange {
    pub time: Timestamp,
    pub direction: SpreadDirection,
    pub first: LegTarget,
    pub second: LegTarget,
}

impl PositionChange {
    /// Both legs flat
    pub fn flat(time: Timestamp, first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            time,
            direction: SpreadDirection::Flat,
            first: LegTarget::new(first, Decimal::ZERO),
            second: LegTarget::new(second, Decimal::ZERO),
        }
    }

    /// Target position for `instrument`, if it is one of the legs
    pub fn position_of(&self, instrument: &str) -> Option<Quantity> {
        [&self.first, &self.second]
            .into_iter()
            .find(|leg| leg.instrument == instrument)
            .map(|leg| leg.position)
    }
}

/// Sparse, time-ordered log of position changes
///
/// Consecutive records always carry different directions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalLog {
    changes: Vec<PositionChange>,
}

impl SignalLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a change; callers keep records in time order
    pub fn push(&mut self, change: PositionChange) {
        self.changes.push(change);
    }

    pub fn changes(&self) -> &[PositionChange] {
        &self.changes
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn last(&self) -> Option<&PositionChange> {
        self.changes.last()
    }

    /// Latest change at or before `at`
    pub fn position_at(&self, at: Timestamp) -> Option<&PositionChange> {
        let upto = self.changes.partition_point(|c| c.time <= at);
        upto.checked_sub(1).map(|i| &self.changes[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &PositionChange> {
        self.changes.iter()
    }
}

impl IntoIterator for SignalLog {
    type Item = PositionChange;
    type IntoIter = std::vec::IntoIter<PositionChange>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}
