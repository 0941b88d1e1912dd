use themis_core::Timestamp;

/// Port for "now"
///
/// Contract `active` flags and the end of an active contract's load window
/// are both read from a clock, so loads can be replayed at a fixed instant.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;

    /// Identifier for log lines
    fn name(&self) -> &str {
        "Clock"
    }
}
