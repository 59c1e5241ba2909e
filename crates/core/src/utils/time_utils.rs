use chrono::{DateTime, Datelike, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::errors::{Result, ValidationError};

/// Timezone used when a caller does not say which calendar day "today" is.
pub const DEFAULT_LEDGER_TZ: Tz = chrono_tz::UTC;

/// Converts a UTC instant to the calendar date the user sees in `tz`.
///
/// Calorie days are keyed by the user's local date, so an entry logged at
/// 23:30 local time must not land on the next UTC day.
pub fn ledger_date_from_utc(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

pub fn ledger_date_today(tz: Tz) -> NaiveDate {
    ledger_date_from_utc(Utc::now(), tz)
}

/// Parses an IANA timezone name, falling back to [`DEFAULT_LEDGER_TZ`] when absent.
pub fn parse_timezone(name: Option<&str>) -> Result<Tz> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        None => Ok(DEFAULT_LEDGER_TZ),
        Some(n) => n.parse::<Tz>().map_err(|_| {
            ValidationError::InvalidInput(format!("Unknown timezone '{}'", n)).into()
        }),
    }
}

/// Formats the `YYYY-MM` key used for monthly documents.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Parses a `YYYY-MM` month key into the first day of that month.
pub fn parse_month_key(key: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", key.trim()), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidInput(format!("Invalid month '{}', expected YYYY-MM", key)).into()
    })
}

/// Returns the `YYYY-MM` key of the month before `key`.
pub fn previous_month_key(key: &str) -> Result<String> {
    let first = parse_month_key(key)?;
    let last_of_previous = first.pred_opt().ok_or_else(|| {
        ValidationError::InvalidInput(format!("No month precedes '{}'", key))
    })?;
    Ok(month_key(last_of_previous))
}
