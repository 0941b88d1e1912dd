use serde::{Deserialize, Serialize};

use super::error::{FrameError, FrameResult, check_index};
use super::series::TimeSeries;
use crate::values::Timestamp;

/// Close price field name
pub const CLOSE: &str = "close";

/// Reserved instrument namespace for derived indicator columns
pub const INDICATORS: &str = "indicators";

/// One column of a [`PriceFrame`], keyed by (instrument, field)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Instrument identifier (or the [`INDICATORS`] namespace)
    pub instrument: String,
    /// Field name (open, high, low, close, volume, ...)
    pub field: String,
    /// One value per index entry, `None` where missing
    pub values: Vec<Option<f64>>,
}

impl Column {
    fn key(&self) -> String {
        format!("{}.{}", self.instrument, self.field)
    }

    fn is(&self, instrument: &str, field: &str) -> bool {
        self.instrument == instrument && self.field == field
    }
}

/// Time-indexed table of prices for one or more instruments
///
/// Columns keep their insertion order; the order decides which instrument is
/// the first and which the second leg of a spread.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrame")]
pub struct PriceFrame {
    index: Vec<Timestamp>,
    columns: Vec<Column>,
}

#[derive(Deserialize)]
struct RawFrame {
    index: Vec<Timestamp>,
    columns: Vec<Column>,
}

impl TryFrom<RawFrame> for PriceFrame {
    type Error = FrameError;

    fn try_from(raw: RawFrame) -> FrameResult<Self> {
        let mut frame = PriceFrame::new(raw.index)?;
        for column in raw.columns {
            if frame.column(&column.instrument, &column.field).is_some() {
                return Err(FrameError::DuplicateColumn(column.key()));
            }
            frame.insert_column(column.instrument, column.field, column.values)?;
        }
        Ok(frame)
    }
}

impl PriceFrame {
    /// Create a frame with an index and no columns
    pub fn new(index: Vec<Timestamp>) -> FrameResult<Self> {
        check_index(&index)?;
        Ok(Self {
            index,
            columns: Vec::new(),
        })
    }

    /// Builder-style column insertion
    pub fn with_column(
        mut self,
        instrument: impl Into<String>,
        field: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> FrameResult<Self> {
        self.insert_column(instrument, field, values)?;
        Ok(self)
    }

    /// Insert a column, replacing any existing column with the same key
    pub fn insert_column(
        &mut self,
        instrument: impl Into<String>,
        field: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> FrameResult<()> {
        let column = Column {
            instrument: instrument.into(),
            field: field.into(),
            values,
        };
        if column.values.len() != self.index.len() {
            return Err(FrameError::LengthMismatch {
                column: column.key(),
                expected: self.index.len(),
                actual: column.values.len(),
            });
        }

        match self
            .columns
            .iter_mut()
            .find(|c| c.is(&column.instrument, &column.field))
        {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
        Ok(())
    }

    /// Drop every column belonging to `instrument`
    pub fn remove_instrument(&mut self, instrument: &str) {
        self.columns.retain(|c| c.instrument != instrument);
    }

    pub fn index(&self) -> &[Timestamp] {
        &self.index
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.index.first().copied()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Values of one column
    pub fn column(&self, instrument: &str, field: &str) -> Option<&[Option<f64>]> {
        self.columns
            .iter()
            .find(|c| c.is(instrument, field))
            .map(|c| c.values.as_slice())
    }

    /// Distinct instruments in column order
    pub fn instruments(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for column in &self.columns {
            if !seen.contains(&column.instrument.as_str()) {
                seen.push(&column.instrument);
            }
        }
        seen
    }

    /// Instruments carrying `field`, in column order, excluding [`INDICATORS`]
    pub fn instruments_with(&self, field: &str) -> Vec<&str> {
        self.instruments()
            .into_iter()
            .filter(|i| *i != INDICATORS && self.column(i, field).is_some())
            .collect()
    }

    /// Non-missing values of one column as a dense series
    pub fn series(&self, instrument: &str, field: &str) -> Option<TimeSeries> {
        let values = self.column(instrument, field)?;
        let (index, values): (Vec<_>, Vec<_>) = self
            .index
            .iter()
            .zip(values)
            .filter_map(|(t, v)| v.map(|v| (*t, v)))
            .unzip();
        // Subset of an already validated index
        TimeSeries::new(index, values).ok()
    }

    /// Left-join a series onto this frame's index
    ///
    /// Timestamps of the frame missing from `series` get `None`; timestamps of
    /// `series` unknown to the frame are ignored.
    pub fn align(&self, series: &TimeSeries) -> Vec<Option<f64>> {
        let mut aligned = Vec::with_capacity(self.index.len());
        let mut source = series.iter().peekable();

        for t in &self.index {
            while source.next_if(|(s, _)| s < t).is_some() {}
            aligned.push(source.next_if(|(s, _)| s == t).map(|(_, v)| v));
        }
        aligned
    }

    /// Rows with `start <= t <= end`
    pub fn between(&self, start: Timestamp, end: Timestamp) -> PriceFrame {
        let from = self.index.partition_point(|t| *t < start);
        let to = self.index.partition_point(|t| *t <= end).max(from);

        PriceFrame {
            index: self.index[from..to].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|c| Column {
                    instrument: c.instrument.clone(),
                    field: c.field.clone(),
                    values: c.values[from..to].to_vec(),
                })
                .collect(),
        }
    }
}
