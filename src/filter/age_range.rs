//! Parsing for customer age buckets such as "18-25" and "60+".

use crate::filter::ValidationError;

/// The age bounds selected by one age bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBounds {
    /// Ages from the first to the second bound, inclusive.
    Between(i64, i64),
    /// Ages at or above the bound.
    AtLeast(i64),
}

impl AgeBounds {
    /// Parse an age bucket written as `"N-M"` or `"N+"`.
    ///
    /// Surrounding whitespace is ignored. A range whose lower bound is above
    /// its upper bound is accepted as-is, it simply matches nobody.
    ///
    /// # Errors
    /// Returns [ValidationError::InvalidAgeRange] if either bound is not a
    /// non-negative integer or the text has neither shape.
    pub fn parse(range: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidAgeRange { value: range.to_owned() };
        let trimmed = range.trim();

        if let Some(min) = trimmed.strip_suffix('+') {
            return parse_age(min).map(AgeBounds::AtLeast).ok_or_else(invalid);
        }

        let (min, max) = trimmed.split_once('-').ok_or_else(invalid)?;
        let min = parse_age(min).ok_or_else(invalid)?;
        let max = parse_age(max).ok_or_else(invalid)?;

        Ok(AgeBounds::Between(min, max))
    }
}

fn parse_age(text: &str) -> Option<i64> {
    let text = text.trim();

    if text.is_empty() || !text.bytes().all(|byte| byte.is_ascii_digit()) {
        return None;
    }

    text.parse().ok()
}
