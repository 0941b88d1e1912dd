use chrono::Duration;
use parking_lot::RwLock;
use themis_core::Timestamp;
use themis_ports::Clock;

/// Clock frozen at a given instant
///
/// Only moves when told to, which keeps "now"-dependent logic (active
/// contracts, load windows) deterministic in tests.
pub struct FixedClock {
    current: RwLock<Timestamp>,
}

impl FixedClock {
    pub fn at(time: Timestamp) -> Self {
        Self {
            current: RwLock::new(time),
        }
    }

    /// Jump to an absolute time
    pub fn set(&self, time: Timestamp) {
        *self.current.write() = time;
    }

    /// Move forward (or backward, for negative durations)
    pub fn advance(&self, by: Duration) {
        *self.current.write() += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }

    fn name(&self) -> &str {
        "FixedClock"
    }
}
