use regex::Regex;
use std::sync::LazyLock;

use crate::error::{LoaderError, LoaderResult};

static TIMEFRAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)([A-Za-z]+)$").expect("timeframe pattern is valid"));

/// Normalise a timeframe to the data source's short code
///
/// Keeps the digit run and the first letter of the unit, lowercased:
/// `"1Min"` -> `"1m"`, `"4H"` -> `"4h"`, `"1D"` -> `"1d"`.
pub fn normalize_timeframe(timeframe: &str) -> LoaderResult<String> {
    let caps = TIMEFRAME
        .captures(timeframe.trim())
        .ok_or_else(|| LoaderError::Timeframe(timeframe.to_string()))?;

    let unit = caps[2]
        .chars()
        .next()
        .map(|c| c.to_ascii_lowercase())
        .ok_or_else(|| LoaderError::Timeframe(timeframe.to_string()))?;
    Ok(format!("{}{}", &caps[1], unit))
}
