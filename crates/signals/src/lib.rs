//! Themis Signals
//!
//! Statistical-arbitrage signal generation for a pair of instruments:
//! - Spread calculators (absolute, percentage/log)
//! - Smoothers (time-aware EMA/SMA, Kalman filter)
//! - Spread maker attaching the `S`/`M`/`dS` indicator bundle
//! - Spread trader turning the residual into position changes
//!
//! ## Pipeline
//!
//! ```text
//! PriceFrame (two legs, close prices)
//!         │
//!         ▼
//!   SpreadCalculator ──► S
//!         │
//!         ▼
//!      Smoother ──────► M,  dS = S - M
//!         │
//!         ▼
//!   SpreadTrader (hysteresis on dS)
//!         │
//!         ▼
//!     SignalLog (sparse position changes)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use themis_signals::{SpreadMaker, SpreadMakerConfig, SpreadTrader, SpreadTraderConfig};
//!
//! let maker = SpreadMaker::new(SpreadMakerConfig::default());
//! let trader = SpreadTrader::new(SpreadTraderConfig {
//!     size: dec!(1),
//!     entry: 2.0,
//!     exit: 0.5,
//!     ..Default::default()
//! })?;
//! let signals = trader.predict(&maker.transform(&frame)?)?;
//! ```

pub mod calculator;
pub mod config;
pub mod error;
pub mod maker;
pub mod smoother;
pub mod trader;

// Re-export main types
pub use calculator::{SpreadCalculator, spread_pair};
pub use config::SignalConfig;
pub use error::{SignalError, SignalResult};
pub use maker::{RESIDUAL, SMOOTHED, SPREAD, SpreadMaker, SpreadMakerConfig};
pub use smoother::{
    KalmanSmoother, PeriodMethod, PeriodSmoother, Smoother, ema_time, kalman_filter, sma_time,
};
pub use trader::{LegConvention, SpreadSignalMachine, SpreadTrader, SpreadTraderConfig};
