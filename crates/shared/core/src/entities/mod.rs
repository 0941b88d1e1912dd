mod signal;

pub use signal::{LegTarget, PositionChange, SignalLog, SpreadDirection};
