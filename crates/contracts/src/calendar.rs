//! Calendar helpers for expiry dates

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Last `weekday` of the given month, `None` for an invalid year/month
pub fn last_weekday_of_month(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }?;
    let last_day = next_month.pred_opt()?;

    let back = (last_day.weekday().num_days_from_monday() + 7 - weekday.num_days_from_monday()) % 7;
    last_day.checked_sub_days(Days::new(back.into()))
}
