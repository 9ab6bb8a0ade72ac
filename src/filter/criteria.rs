//! The filter criteria a client can apply to the sales listing.

use serde::{Deserialize, Serialize};

/// The fixed age buckets offered to clients.
pub const AGE_RANGE_OPTIONS: [&str; 5] = ["18-25", "26-35", "36-45", "46-60", "60+"];

/// The filters and sort order requested for a sales query.
///
/// Empty lists and `None` mean "no restriction". List order is preserved all
/// the way through to the bound query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Customer regions, e.g. "North".
    pub customer_region: Vec<String>,
    /// Customer genders, e.g. "Female".
    pub gender: Vec<String>,
    /// Customer age buckets, each either `"N-M"` or `"N+"`.
    pub age_range: Vec<String>,
    /// Product categories, e.g. "Electronics".
    pub product_category: Vec<String>,
    /// Product tags, e.g. "VIP".
    pub tags: Vec<String>,
    /// Payment methods, e.g. "UPI".
    pub payment_method: Vec<String>,
    /// Relative and/or absolute date restrictions.
    pub date_range: Option<DateFilter>,
    /// Free text matched against customer name, phone number and ID.
    pub search: Option<String>,
    /// The raw sort key, see [SortBy::from_query_value].
    pub sort_by: Option<String>,
}

impl FilterCriteria {
    /// The number of individual filter selections, used for the "clear all"
    /// control on the dashboard.
    pub fn active_filter_count(&self) -> usize {
        let list_count = self.customer_region.len()
            + self.gender.len()
            + self.age_range.len()
            + self.product_category.len()
            + self.tags.len()
            + self.payment_method.len();

        let date_count = self.date_range.as_ref().map_or(0, |date_filter| {
            let quick_select_count = date_filter.relative_ranges().len();
            let custom_count = usize::from(date_filter.custom_date().is_some());
            quick_select_count + custom_count
        });

        let search_count = usize::from(
            self.search
                .as_deref()
                .is_some_and(|search| !search.trim().is_empty()),
        );

        list_count + date_count + search_count
    }
}

/// A date restriction made of relative "quick select" ranges and an optional
/// absolute custom date. The two parts are OR-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateFilter {
    /// Relative ranges in the order the client selected them.
    pub quick_select: Vec<QuickSelect>,
    /// An absolute date as `YYYY-MM-DD` or `day/month/year`.
    pub custom_date: Option<String>,
}

impl DateFilter {
    /// The recognised relative ranges with duplicates removed, keeping the
    /// first occurrence of each.
    pub fn relative_ranges(&self) -> Vec<RelativeRange> {
        let mut ranges = Vec::with_capacity(self.quick_select.len());

        for option in &self.quick_select {
            match option {
                QuickSelect::Range(range) if !ranges.contains(range) => ranges.push(*range),
                _ => {}
            }
        }

        ranges
    }

    /// The custom date, if one was given that is not just whitespace.
    pub fn custom_date(&self) -> Option<&str> {
        self.custom_date
            .as_deref()
            .map(str::trim)
            .filter(|date| !date.is_empty())
    }
}

/// A relative date range anchored on the current date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelativeRange {
    /// The current calendar date.
    Today,
    /// The day before the current date.
    Yesterday,
    /// The last seven days including today.
    Last7Days,
    /// The last thirty days including today.
    Last30Days,
    /// The current calendar month.
    ThisMonth,
    /// The previous calendar month.
    LastMonth,
}

impl RelativeRange {
    /// All ranges in the order they are shown to users.
    pub const ALL: [RelativeRange; 6] = [
        RelativeRange::Today,
        RelativeRange::Yesterday,
        RelativeRange::Last7Days,
        RelativeRange::Last30Days,
        RelativeRange::ThisMonth,
        RelativeRange::LastMonth,
    ];

    /// Parse the token used in query strings, e.g. "last7days".
    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "today" => Some(Self::Today),
            "yesterday" => Some(Self::Yesterday),
            "last7days" => Some(Self::Last7Days),
            "last30days" => Some(Self::Last30Days),
            "thisMonth" => Some(Self::ThisMonth),
            "lastMonth" => Some(Self::LastMonth),
            _ => None,
        }
    }

    /// The token used for this range in query strings.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Today => "today",
            Self::Yesterday => "yesterday",
            Self::Last7Days => "last7days",
            Self::Last30Days => "last30days",
            Self::ThisMonth => "thisMonth",
            Self::LastMonth => "lastMonth",
        }
    }

    /// The label shown next to the checkbox.
    pub fn label(self) -> &'static str {
        match self {
            Self::Today => "Today",
            Self::Yesterday => "Yesterday",
            Self::Last7Days => "Last 7 days",
            Self::Last30Days => "Last 30 days",
            Self::ThisMonth => "This month",
            Self::LastMonth => "Last month",
        }
    }
}

/// A single quick-select token as sent by a client.
///
/// Clients may send the inert "custom" marker alongside a custom date, and
/// tokens this server does not know about. Neither is an error, so decoding
/// never fails on the token text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QuickSelect {
    /// A recognised relative range.
    Range(RelativeRange),
    /// The marker the UI sends when a custom date is in use.
    Custom,
    /// Any other token.
    Unknown(String),
}

impl From<String> for QuickSelect {
    fn from(value: String) -> Self {
        if value == "custom" {
            return QuickSelect::Custom;
        }

        match RelativeRange::from_query_value(&value) {
            Some(range) => QuickSelect::Range(range),
            None => QuickSelect::Unknown(value),
        }
    }
}

impl From<QuickSelect> for String {
    fn from(value: QuickSelect) -> Self {
        match value {
            QuickSelect::Range(range) => range.as_query_value().to_owned(),
            QuickSelect::Custom => "custom".to_owned(),
            QuickSelect::Unknown(token) => token,
        }
    }
}

/// The sort orders available for the sales listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Customer name, A to Z.
    NameAsc,
    /// Customer name, Z to A.
    NameDesc,
    /// Final amount, smallest first.
    AmountAsc,
    /// Final amount, largest first.
    AmountDesc,
    /// Oldest first.
    DateAsc,
    /// Newest first.
    #[default]
    DateDesc,
}

impl SortBy {
    /// All sort orders in the order they are shown to users.
    pub const ALL: [SortBy; 6] = [
        SortBy::DateDesc,
        SortBy::DateAsc,
        SortBy::NameAsc,
        SortBy::NameDesc,
        SortBy::AmountDesc,
        SortBy::AmountAsc,
    ];

    /// Parse a sort key such as "amount-desc".
    pub fn from_query_value(value: &str) -> Option<Self> {
        match value {
            "name-asc" => Some(Self::NameAsc),
            "name-desc" => Some(Self::NameDesc),
            "amount-asc" => Some(Self::AmountAsc),
            "amount-desc" => Some(Self::AmountDesc),
            "date-asc" => Some(Self::DateAsc),
            "date-desc" => Some(Self::DateDesc),
            _ => None,
        }
    }

    /// Resolve an optional, possibly unknown, sort key to a sort order.
    ///
    /// Absent and unrecognised keys fall back to [SortBy::DateDesc].
    pub fn resolve(value: Option<&str>) -> Self {
        match value {
            None | Some("") => Self::default(),
            Some(key) => Self::from_query_value(key).unwrap_or_else(|| {
                tracing::warn!("Unknown sort key \"{key}\", sorting by date instead");
                Self::default()
            }),
        }
    }

    /// The `sortBy` query value.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::NameAsc => "name-asc",
            Self::NameDesc => "name-desc",
            Self::AmountAsc => "amount-asc",
            Self::AmountDesc => "amount-desc",
            Self::DateAsc => "date-asc",
            Self::DateDesc => "date-desc",
        }
    }

    /// The text of the option in the sort select.
    pub fn label(self) -> &'static str {
        match self {
            Self::NameAsc => "Customer name (A-Z)",
            Self::NameDesc => "Customer name (Z-A)",
            Self::AmountAsc => "Amount (low to high)",
            Self::AmountDesc => "Amount (high to low)",
            Self::DateAsc => "Date (oldest first)",
            Self::DateDesc => "Date (newest first)",
        }
    }

    /// The column and direction for an `ORDER BY` clause.
    pub fn order_by(self) -> &'static str {
        match self {
            Self::NameAsc => "c.customer_name ASC",
            Self::NameDesc => "c.customer_name DESC",
            Self::AmountAsc => "t.final_amount ASC",
            Self::AmountDesc => "t.final_amount DESC",
            Self::DateAsc => "t.date ASC",
            Self::DateDesc => "t.date DESC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DateFilter, FilterCriteria, QuickSelect, RelativeRange, SortBy};

    #[test]
    fn quick_select_tokens_never_fail_to_decode() {
        let got: Vec<QuickSelect> =
            serde_json::from_str(r#"["today", "custom", "nextWeek"]"#).unwrap();

        assert_eq!(
            got,
            vec![
                QuickSelect::Range(RelativeRange::Today),
                QuickSelect::Custom,
                QuickSelect::Unknown("nextWeek".to_owned()),
            ]
        );
    }

    #[test]
    fn relative_ranges_drop_duplicates_and_markers() {
        let date_filter = DateFilter {
            quick_select: vec![
                QuickSelect::Range(RelativeRange::LastMonth),
                QuickSelect::Custom,
                QuickSelect::Range(RelativeRange::Today),
                QuickSelect::Range(RelativeRange::LastMonth),
                QuickSelect::Unknown("bogus".to_owned()),
            ],
            custom_date: None,
        };

        assert_eq!(
            date_filter.relative_ranges(),
            vec![RelativeRange::LastMonth, RelativeRange::Today]
        );
    }

    #[test]
    fn blank_custom_date_is_absent() {
        let date_filter = DateFilter {
            quick_select: Vec::new(),
            custom_date: Some("   ".to_owned()),
        };

        assert_eq!(date_filter.custom_date(), None);
    }

    #[test]
    fn unknown_sort_key_falls_back_to_date_descending() {
        assert_eq!(SortBy::resolve(Some("bogus")), SortBy::DateDesc);
        assert_eq!(SortBy::resolve(None), SortBy::DateDesc);
        assert_eq!(SortBy::resolve(Some("name-asc")), SortBy::NameAsc);
    }

    #[test]
    fn sort_keys_round_trip() {
        for sort_by in SortBy::ALL {
            assert_eq!(
                SortBy::from_query_value(sort_by.as_query_value()),
                Some(sort_by)
            );
        }
    }

    #[test]
    fn counts_active_filters() {
        let criteria = FilterCriteria {
            gender: vec!["Female".to_owned(), "Male".to_owned()],
            age_range: vec!["60+".to_owned()],
            date_range: Some(DateFilter {
                quick_select: vec![
                    QuickSelect::Range(RelativeRange::Today),
                    QuickSelect::Custom,
                ],
                custom_date: Some("2025-12-09".to_owned()),
            }),
            search: Some("Rao".to_owned()),
            sort_by: Some("amount-desc".to_owned()),
            ..Default::default()
        };

        assert_eq!(criteria.active_filter_count(), 6);
    }
}
