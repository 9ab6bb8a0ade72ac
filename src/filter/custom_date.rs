//! Parsing for the absolute "custom" date a client can filter on.
//!
//! Two textual forms are accepted:
//! - ISO dates (`2025-12-09`), passed through verbatim,
//! - slash dates (`9/december/2025` or `9/12/2025`), normalised to ISO.

use time::{Date, Month};

use crate::filter::ValidationError;

const MONTH_NAMES: [(&str, Month); 12] = [
    ("january", Month::January),
    ("february", Month::February),
    ("march", Month::March),
    ("april", Month::April),
    ("may", Month::May),
    ("june", Month::June),
    ("july", Month::July),
    ("august", Month::August),
    ("september", Month::September),
    ("october", Month::October),
    ("november", Month::November),
    ("december", Month::December),
];

/// Normalise a custom date to `YYYY-MM-DD`.
///
/// # Errors
/// Returns a [ValidationError] if `text` is neither an ISO date nor a slash
/// date with exactly three parts, if the month is not a known month name or a
/// number from 1 to 12, or if the parts do not form a real date.
pub fn parse_custom_date(text: &str) -> Result<String, ValidationError> {
    if is_iso_date(text) {
        return Ok(text.to_owned());
    }

    let parts: Vec<&str> = text.split('/').map(str::trim).collect();
    let [day, month, year] = parts.as_slice() else {
        return Err(ValidationError::InvalidCustomDate { value: text.to_owned() });
    };

    let month = parse_month(text, month)?;

    let invalid = || ValidationError::InvalidCustomDate { value: text.to_owned() };
    let day: u8 = parse_digits(day, 1..=2).ok_or_else(invalid)?;
    let year: i32 = parse_digits(year, 4..=4).ok_or_else(invalid)?;

    let date = Date::from_calendar_date(year, month, day)
        .map_err(|_| ValidationError::InvalidCalendarDate {
            value: text.to_owned(),
        })?;

    Ok(format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    ))
}

/// Whether `text` has the shape `DDDD-DD-DD`.
///
/// Only the shape is checked, the value is handed to the database as-is.
fn is_iso_date(text: &str) -> bool {
    let bytes = text.as_bytes();

    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, byte)| match i {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

fn parse_month(date: &str, month: &str) -> Result<Month, ValidationError> {
    if !month.is_empty() && month.bytes().all(|byte| byte.is_ascii_digit()) {
        let number: i64 = month
            .parse()
            .map_err(|_| ValidationError::InvalidCustomDate { value: date.to_owned() })?;

        return u8::try_from(number)
            .ok()
            .and_then(|number| Month::try_from(number).ok())
            .ok_or_else(|| ValidationError::MonthOutOfRange {
                date: date.to_owned(),
                month: number,
            });
    }

    let lowercase = month.to_lowercase();

    MONTH_NAMES
        .iter()
        .find(|(name, _)| *name == lowercase)
        .map(|(_, month)| *month)
        .ok_or_else(|| ValidationError::UnknownMonth {
            date: date.to_owned(),
            month: month.to_owned(),
        })
}

fn parse_digits<T: std::str::FromStr>(
    text: &str,
    allowed_lengths: std::ops::RangeInclusive<usize>,
) -> Option<T> {
    if !allowed_lengths.contains(&text.len()) || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    text.parse().ok()
}
