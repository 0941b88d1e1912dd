//! Themis Clock Infrastructure
//!
//! - [`SystemClock`]: wall-clock UTC time for real loads
//! - [`FixedClock`]: frozen time for deterministic tests and replays

mod fixed;
mod system;

pub use fixed::FixedClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use themis_ports::Clock;
