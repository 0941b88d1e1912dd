//! Futures ticker codes
//!
//! A BitMEX-style ticker is `<root><month code><two-digit year>`, e.g.
//! `XBTZ20` = XBT, December 2020.

use chrono::{NaiveDate, NaiveTime, TimeZone, Utc, Weekday};
use regex::Regex;
use std::sync::LazyLock;
use themis_core::Timestamp;

use crate::calendar::last_weekday_of_month;
use crate::error::{ContractError, ContractResult};

static TICKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([A-Z]+)([FGHJKMNQUVXZ])(\d{2})$").expect("ticker pattern is valid")
});

/// Futures month codes, January (F) through December (Z)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MonthCode {
    F,
    G,
    H,
    J,
    K,
    M,
    N,
    Q,
    U,
    V,
    X,
    Z,
}

impl MonthCode {
    /// All codes in calendar order
    pub const ALL: [MonthCode; 12] = [
        MonthCode::F,
        MonthCode::G,
        MonthCode::H,
        MonthCode::J,
        MonthCode::K,
        MonthCode::M,
        MonthCode::N,
        MonthCode::Q,
        MonthCode::U,
        MonthCode::V,
        MonthCode::X,
        MonthCode::Z,
    ];

    /// Quarterly expiries: March, June, September, December
    pub const QUARTERLY: [MonthCode; 4] = [MonthCode::H, MonthCode::M, MonthCode::U, MonthCode::Z];

    pub fn from_char(c: char) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_char() == c)
    }

    pub fn as_char(&self) -> char {
        match self {
            MonthCode::F => 'F',
            MonthCode::G => 'G',
            MonthCode::H => 'H',
            MonthCode::J => 'J',
            MonthCode::K => 'K',
            MonthCode::M => 'M',
            MonthCode::N => 'N',
            MonthCode::Q => 'Q',
            MonthCode::U => 'U',
            MonthCode::V => 'V',
            MonthCode::X => 'X',
            MonthCode::Z => 'Z',
        }
    }

    /// Calendar month, 1-12
    pub fn month(&self) -> u32 {
        *self as u32 + 1
    }
}

/// A parsed contract ticker
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContractTicker {
    /// Underlying root (e.g., "XBT")
    pub root: String,
    pub month: MonthCode,
    /// Full year (2000 + two-digit suffix)
    pub year: i32,
}

impl ContractTicker {
    pub fn new(root: impl Into<String>, month: MonthCode, year: i32) -> Self {
        Self {
            root: root.into(),
            month,
            year,
        }
    }

    /// Parse `<letters><month code><2 digits>` at the end of `ticker`
    pub fn parse(ticker: &str) -> ContractResult<Self> {
        let caps = TICKER
            .captures(ticker)
            .ok_or_else(|| ContractError::ticker(ticker))?;

        let month = caps[2]
            .chars()
            .next()
            .and_then(MonthCode::from_char)
            .ok_or_else(|| ContractError::ticker(ticker))?;
        let year: i32 = caps[3].parse().map_err(|_| ContractError::ticker(ticker))?;

        Ok(Self::new(&caps[1], month, 2000 + year))
    }

    /// Last Friday of the contract month at 15:00 UTC
    pub fn expiration(&self) -> ContractResult<Timestamp> {
        let day = last_weekday_of_month(self.year, self.month.month(), Weekday::Fri)
            .ok_or_else(|| ContractError::ticker(&self.to_string()))?;
        Ok(at_settlement(day))
    }
}

impl std::fmt::Display for ContractTicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}{}{:02}",
            self.root,
            self.month.as_char(),
            self.year.rem_euclid(100)
        )
    }
}

/// Settlement time (15:00 UTC) on `day`
fn at_settlement(day: NaiveDate) -> Timestamp {
    let settlement = NaiveTime::from_hms_opt(15, 0, 0).unwrap_or_default();
    Utc.from_utc_datetime(&day.and_time(settlement))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_codes() {
        assert_eq!(MonthCode::F.month(), 1);
        assert_eq!(MonthCode::H.month(), 3);
        assert_eq!(MonthCode::Z.month(), 12);
        assert_eq!(MonthCode::from_char('U'), Some(MonthCode::U));
        assert_eq!(MonthCode::from_char('A'), None);
        for (i, code) in MonthCode::ALL.iter().enumerate() {
            assert_eq!(code.month(), i as u32 + 1);
        }
    }

    #[test]
    fn test_parse_ticker() {
        let ticker = ContractTicker::parse("XBTZ20").unwrap();
        assert_eq!(ticker.root, "XBT");
        assert_eq!(ticker.month, MonthCode::Z);
        assert_eq!(ticker.year, 2020);
        assert_eq!(ticker.to_string(), "XBTZ20");
    }

    #[test]
    fn test_parse_ticker_rejects_malformed() {
        for bad in ["XYZ", "XBT", "XBTZ2", "XBTA20", "Z20", "xbtz20", "XBTZ20X"] {
            let err = ContractTicker::parse(bad).unwrap_err();
            assert!(err.is_parse(), "{} should not parse", bad);
        }
    }

    #[test]
    fn test_expiration_last_friday() {
        let expiry = ContractTicker::parse("XBTZ20").unwrap().expiration().unwrap();
        assert_eq!(
            expiry,
            Utc.with_ymd_and_hms(2020, 12, 25, 15, 0, 0).unwrap()
        );

        let expiry = ContractTicker::parse("ETHU20").unwrap().expiration().unwrap();
        assert_eq!(
            expiry,
            Utc.with_ymd_and_hms(2020, 9, 25, 15, 0, 0).unwrap()
        );

        // Month ending on a Friday
        let expiry = ContractTicker::parse("XBTH19").unwrap().expiration().unwrap();
        assert_eq!(
            expiry,
            Utc.with_ymd_and_hms(2019, 3, 29, 15, 0, 0).unwrap()
        );
    }
}
