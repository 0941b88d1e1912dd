use thiserror::Error;

use crate::values::Timestamp;

/// Structural errors raised while building a frame or series
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("Index is not strictly increasing at position {position} ({timestamp})")]
    UnorderedIndex {
        position: usize,
        timestamp: Timestamp,
    },

    #[error("Column {column} has {actual} values, index has {expected}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),
}

pub type FrameResult<T> = std::result::Result<T, FrameError>;

/// Checks that timestamps are strictly increasing
pub(crate) fn check_index(index: &[Timestamp]) -> FrameResult<()> {
    for (position, pair) in index.windows(2).enumerate() {
        if pair[1] <= pair[0] {
            return Err(FrameError::UnorderedIndex {
                position: position + 1,
                timestamp: pair[1],
            });
        }
    }
    Ok(())
}
