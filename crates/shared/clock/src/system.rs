use chrono::Utc;
use themis_core::Timestamp;
use themis_ports::Clock;

/// Wall-clock UTC time
///
/// Used by real bulk loads: decides which contracts are still trading and
/// where the load window of an active contract ends.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_system_clock_is_current() {
        let clock = SystemClock::new();
        let before = Utc::now();
        let now = clock.now();

        assert!(now >= before);
        assert!(now > Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }
}
