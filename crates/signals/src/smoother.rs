//! Smoothers
//!
//! Denoise a spread series into an estimate of its slowly moving level.
//! Every call re-runs over the full history; nothing is carried between calls.
//!
//! - [`PeriodSmoother`]: time-aware EMA (or time-window mean) over a period
//! - [`KalmanSmoother`]: scalar random-walk Kalman filter

use chrono::Duration;
use serde::{Deserialize, Serialize};
use themis_core::TimeSeries;

use crate::error::{SignalError, SignalResult};

/// Smoothing strategy applied to the raw spread
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Smoother {
    Period(PeriodSmoother),
    Kalman(KalmanSmoother),
}

impl Default for Smoother {
    fn default() -> Self {
        Smoother::Kalman(KalmanSmoother::default())
    }
}

impl Smoother {
    /// Smooth `series`; the result shares its index
    pub fn smooth(&self, series: &TimeSeries) -> SignalResult<TimeSeries> {
        match self {
            Smoother::Period(p) => p.smooth(series),
            Smoother::Kalman(k) => k.smooth(series),
        }
    }
}

/// Averaging method of a [`PeriodSmoother`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodMethod {
    /// Exponential moving average with time-based decay
    #[default]
    Ema,
    /// Mean of the observations inside the trailing window
    Sma,
}

/// Smoother over a time period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSmoother {
    /// Period length in seconds
    pub period_secs: u64,
    #[serde(default)]
    pub method: PeriodMethod,
}

impl PeriodSmoother {
    /// Time-aware EMA over `period`
    pub fn ema(period: Duration) -> Self {
        Self {
            period_secs: period.num_seconds().max(0) as u64,
            method: PeriodMethod::Ema,
        }
    }

    /// Trailing time-window mean over `period`
    pub fn sma(period: Duration) -> Self {
        Self {
            period_secs: period.num_seconds().max(0) as u64,
            method: PeriodMethod::Sma,
        }
    }

    pub fn period(&self) -> Duration {
        Duration::seconds(self.period_secs as i64)
    }

    pub fn smooth(&self, series: &TimeSeries) -> SignalResult<TimeSeries> {
        if self.period_secs == 0 {
            return Err(SignalError::InvalidParameter(
                "smoothing period must be positive".to_string(),
            ));
        }
        match self.method {
            PeriodMethod::Ema => ema_time(series, self.period()),
            PeriodMethod::Sma => sma_time(series, self.period()),
        }
    }
}

/// Scalar Kalman filter with process variance `pvar` and measurement variance `mvar`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KalmanSmoother {
    pub pvar: f64,
    pub mvar: f64,
}

impl Default for KalmanSmoother {
    fn default() -> Self {
        Self {
            pvar: 1e-5,
            mvar: 1e-3,
        }
    }
}

impl KalmanSmoother {
    pub fn new(pvar: f64, mvar: f64) -> Self {
        Self { pvar, mvar }
    }

    /// Filtered mean; the variance output is dropped
    pub fn smooth(&self, series: &TimeSeries) -> SignalResult<TimeSeries> {
        let (mean, _variance) = kalman_filter(series, self.pvar, self.mvar)?;
        Ok(mean)
    }
}

/// Exponential moving average with time-based decay
///
/// Each observation is blended in with weight `1 - exp(-dt / period)`, where
/// `dt` is the time elapsed since the previous observation. A long gap lets
/// the new value dominate; bars arriving in quick succession move it little.
/// Non-finite observations come out as NaN and leave the average untouched.
pub fn ema_time(series: &TimeSeries, period: Duration) -> SignalResult<TimeSeries> {
    let tau = seconds(period);
    if tau <= 0.0 {
        return Err(SignalError::InvalidParameter(
            "EMA period must be positive".to_string(),
        ));
    }

    let mut values = Vec::with_capacity(series.len());
    let mut previous: Option<(f64, f64)> = None;
    for (t, x) in series.iter() {
        if !x.is_finite() {
            values.push(f64::NAN);
            continue;
        }
        let now = t.timestamp_millis() as f64 / 1000.0;
        let ema = match previous {
            None => x,
            Some((last, ema)) => {
                let weight = 1.0 - (-(now - last) / tau).exp();
                ema + weight * (x - ema)
            }
        };
        values.push(ema);
        previous = Some((now, ema));
    }

    Ok(series.with_values(values)?)
}

/// Mean of the finite observations in the trailing window `(t - period, t]`
pub fn sma_time(series: &TimeSeries, period: Duration) -> SignalResult<TimeSeries> {
    if period <= Duration::zero() {
        return Err(SignalError::InvalidParameter(
            "SMA period must be positive".to_string(),
        ));
    }

    let index = series.index();
    let data = series.values();
    let mut values = Vec::with_capacity(series.len());
    let mut start = 0;
    let mut sum = 0.0;
    let mut count = 0usize;
    for (i, t) in index.iter().enumerate() {
        if data[i].is_finite() {
            sum += data[i];
            count += 1;
        }
        while index[start] <= *t - period {
            if data[start].is_finite() {
                sum -= data[start];
                count -= 1;
            }
            start += 1;
        }
        values.push(if count > 0 { sum / count as f64 } else { f64::NAN });
    }

    Ok(series.with_values(values)?)
}

/// Random-walk Kalman filter
///
/// Returns the filtered mean and the estimate variance at every timestamp.
/// The state starts at the first observation with unit variance. Non-finite
/// observations come out as NaN and are not fed to the filter.
pub fn kalman_filter(
    series: &TimeSeries,
    pvar: f64,
    mvar: f64,
) -> SignalResult<(TimeSeries, TimeSeries)> {
    if !(pvar >= 0.0 && mvar >= 0.0) || pvar + mvar == 0.0 {
        return Err(SignalError::InvalidParameter(format!(
            "Kalman variances must be non-negative and not both zero (pvar={}, mvar={})",
            pvar, mvar
        )));
    }

    let mut means = Vec::with_capacity(series.len());
    let mut variances = Vec::with_capacity(series.len());
    let mut state: Option<(f64, f64)> = None;
    for x in series.values() {
        if !x.is_finite() {
            means.push(f64::NAN);
            variances.push(f64::NAN);
            continue;
        }
        let (mean, variance) = match state {
            None => (*x, 1.0),
            Some((mean, variance)) => {
                // Predict: random walk keeps the mean, widens the variance
                let prior = variance + pvar;
                let gain = prior / (prior + mvar);
                (mean + gain * (x - mean), (1.0 - gain) * prior)
            }
        };
        means.push(mean);
        variances.push(variance);
        state = Some((mean, variance));
    }

    Ok((series.with_values(means)?, series.with_values(variances)?))
}

fn seconds(period: Duration) -> f64 {
    period.num_milliseconds() as f64 / 1000.0
}
