//! Errors raised while compiling filter criteria.

/// A filter value that could not be turned into a SQL condition.
///
/// Every variant is attributable to a single filter field and carries the raw
/// value the client sent, so the HTTP layer can echo it back.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// An age range that is neither `"N-M"` nor `"N+"` with integer bounds.
    #[error("invalid age range \"{value}\", expected a range like \"18-25\" or \"60+\"")]
    InvalidAgeRange {
        /// The age range as sent.
        value: String,
    },

    /// A custom date that is neither `YYYY-MM-DD` nor `day/month/year`.
    #[error("invalid custom date \"{value}\", expected YYYY-MM-DD or day/month/year")]
    InvalidCustomDate {
        /// The full custom date string.
        value: String,
    },

    /// The month part of a `day/month/year` date is not a known month name.
    #[error("unknown month \"{month}\" in custom date \"{date}\"")]
    UnknownMonth {
        /// The full custom date string.
        date: String,
        /// The month part that could not be matched.
        month: String,
    },

    /// The month part of a `day/month/year` date is a number outside 1-12.
    #[error("month {month} is out of range in custom date \"{date}\"")]
    MonthOutOfRange {
        /// The full custom date string.
        date: String,
        /// The month number that was given.
        month: i64,
    },

    /// The parts of a `day/month/year` date do not form a real calendar date,
    /// e.g. "31/february/2025".
    #[error("\"{value}\" is not a valid calendar date")]
    InvalidCalendarDate {
        /// The full custom date string.
        value: String,
    },
}

impl ValidationError {
    /// The name of the filter field, as it appears in the query string, that
    /// holds the offending value.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::InvalidAgeRange { .. } => "ageRange",
            ValidationError::InvalidCustomDate { .. }
            | ValidationError::UnknownMonth { .. }
            | ValidationError::MonthOutOfRange { .. }
            | ValidationError::InvalidCalendarDate { .. } => "dateRange.customDate",
        }
    }

    /// The raw value that failed validation.
    pub fn value(&self) -> &str {
        match self {
            ValidationError::InvalidAgeRange { value }
            | ValidationError::InvalidCustomDate { value }
            | ValidationError::InvalidCalendarDate { value } => value,
            ValidationError::UnknownMonth { date, .. }
            | ValidationError::MonthOutOfRange { date, .. } => date,
        }
    }
}
