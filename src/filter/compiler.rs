//! Compiles [FilterCriteria] into a parameterised SQL `WHERE` clause.
//!
//! The compiler collects one [PredicateTerm] per applied filter. Each term
//! owns the parameters for its own placeholders, so the clause text and the
//! parameter list are produced together in [FilterQueryCompiler::build_where_clause]
//! and cannot drift apart.

use rusqlite::types::{ToSql, ToSqlOutput};

use crate::filter::{
    AgeBounds, DateFilter, FilterCriteria, QuickSelect, RelativeRange, SortBy, ValidationError,
    parse_custom_date,
};

/// A value bound to a `?` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    /// A text value.
    Text(String),
    /// An integer value.
    Integer(i64),
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_owned())
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Integer(value)
    }
}

impl ToSql for SqlParam {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self {
            SqlParam::Text(text) => text.to_sql(),
            SqlParam::Integer(number) => number.to_sql(),
        }
    }
}

/// A `WHERE` clause and the parameters for its placeholders, in placeholder
/// order.
///
/// `clause` is either empty or starts with `"WHERE "`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledPredicate {
    /// Empty, or `WHERE ` followed by the AND-combined terms.
    pub clause: String,
    /// Values for the placeholders in `clause`, in order.
    pub parameters: Vec<SqlParam>,
}

/// The columns each filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterColumns {
    /// Column holding the customer region.
    pub customer_region: &'static str,
    /// Column holding the customer gender.
    pub gender: &'static str,
    /// Column holding the customer age.
    pub age: &'static str,
    /// Column holding the product category.
    pub product_category: &'static str,
    /// Column holding one product tag per joined row.
    pub tag: &'static str,
    /// Column holding the payment method.
    pub payment_method: &'static str,
    /// Column holding the `YYYY-MM-DD` sale date.
    pub date: &'static str,
    /// Columns matched by the free text search: name, phone number and ID.
    pub search: [&'static str; 3],
}

impl FilterColumns {
    /// Columns of the sales listing query, see [crate::sales].
    pub const SALES: FilterColumns = FilterColumns {
        customer_region: "c.customer_region",
        gender: "c.gender",
        age: "c.age",
        product_category: "p.product_category",
        tag: "pt.tag",
        payment_method: "t.payment_method",
        date: "t.date",
        search: ["c.customer_name", "c.phone_number", "c.customer_id"],
    };
}

/// One AND-combined fragment of a `WHERE` clause.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PredicateTerm {
    sql: String,
    parameters: Vec<SqlParam>,
}

impl PredicateTerm {
    fn new(sql: String, parameters: Vec<SqlParam>) -> Self {
        debug_assert_eq!(
            sql.matches('?').count(),
            parameters.len(),
            "placeholder count must match parameter count in {sql:?}"
        );

        Self { sql, parameters }
    }
}

/// Builds a [CompiledPredicate] one filter at a time.
///
/// Every `add_*` method consumes the compiler and hands it back, so a failed
/// validation drops the half-built clause along with the compiler.
#[derive(Debug, Clone, Default)]
pub struct FilterQueryCompiler {
    terms: Vec<PredicateTerm>,
}

impl FilterQueryCompiler {
    /// An empty compiler that matches every sale.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict `column` to one of `values`.
    ///
    /// Adds `column IN (?, ...)` with one placeholder per value, binding the
    /// values in the given order. Does nothing if `values` is empty.
    pub fn add_set_filter(mut self, column: &str, values: &[String]) -> Self {
        if values.is_empty() {
            return self;
        }

        let placeholders = vec!["?"; values.len()].join(", ");
        let parameters = values.iter().map(|value| value.as_str().into()).collect();

        self.terms.push(PredicateTerm::new(
            format!("{column} IN ({placeholders})"),
            parameters,
        ));

        self
    }

    /// Restrict `column` to any of the age buckets in `ranges`.
    ///
    /// All buckets are OR-combined into one parenthesised term. Does nothing
    /// if `ranges` is empty.
    ///
    /// # Errors
    /// Returns [ValidationError::InvalidAgeRange] for the first bucket that is
    /// not `"N-M"` or `"N+"`.
    pub fn add_age_range_filter(
        mut self,
        column: &str,
        ranges: &[String],
    ) -> Result<Self, ValidationError> {
        if ranges.is_empty() {
            return Ok(self);
        }

        let mut conditions = Vec::with_capacity(ranges.len());
        let mut parameters = Vec::with_capacity(ranges.len() * 2);

        for range in ranges {
            match AgeBounds::parse(range)? {
                AgeBounds::Between(min, max) => {
                    conditions.push(format!("{column} BETWEEN ? AND ?"));
                    parameters.push(min.into());
                    parameters.push(max.into());
                }
                AgeBounds::AtLeast(min) => {
                    conditions.push(format!("{column} >= ?"));
                    parameters.push(min.into());
                }
            }
        }

        self.terms.push(PredicateTerm::new(
            format!("({})", conditions.join(" OR ")),
            parameters,
        ));

        Ok(self)
    }

    /// Restrict the date in `column` to the relative ranges and/or custom date
    /// in `date_filter`.
    ///
    /// Relative ranges are compared against the database's current date when
    /// the query runs. Unknown quick-select tokens and the "custom" marker
    /// are skipped. When both relative ranges and a custom date are present
    /// they are OR-combined into one term.
    ///
    /// # Errors
    /// Returns a [ValidationError] if the custom date is malformed.
    pub fn add_date_filter(
        mut self,
        column: &str,
        date_filter: Option<&DateFilter>,
    ) -> Result<Self, ValidationError> {
        let Some(date_filter) = date_filter else {
            return Ok(self);
        };

        tracing::debug!("Date filter received: {date_filter:?}");

        let mut conditions: Vec<String> = date_filter
            .relative_ranges()
            .into_iter()
            .map(|range| {
                tracing::debug!("Processing quick select: {}", range.as_query_value());
                relative_range_condition(column, range)
            })
            .collect();

        for option in &date_filter.quick_select {
            if let QuickSelect::Unknown(token) = option {
                tracing::warn!("Unknown quick select option: {token}");
            }
        }

        let custom_date = date_filter.custom_date().map(parse_custom_date).transpose()?;

        let term = match (conditions.is_empty(), custom_date) {
            (true, None) => return Ok(self),
            (true, Some(date)) => {
                PredicateTerm::new(format!("date({column}) = ?"), vec![date.into()])
            }
            (false, None) => PredicateTerm::new(format!("({})", conditions.join(" OR ")), vec![]),
            (false, Some(date)) => {
                conditions.push(format!("date({column}) = ?"));
                PredicateTerm::new(format!("({})", conditions.join(" OR ")), vec![date.into()])
            }
        };

        tracing::debug!("Date filter SQL condition: {}", term.sql);
        self.terms.push(term);

        Ok(self)
    }

    /// Match `text` anywhere in any of `columns`.
    ///
    /// Adds `(a LIKE ? OR b LIKE ? ...)` with the pattern `%text%` bound once
    /// per column. Does nothing if `text` is absent or blank.
    pub fn add_search_filter(mut self, columns: &[&str], text: Option<&str>) -> Self {
        let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
            return self;
        };

        if columns.is_empty() {
            return self;
        }

        let pattern = format!("%{text}%");
        let conditions: Vec<String> = columns
            .iter()
            .map(|column| format!("{column} LIKE ?"))
            .collect();
        let parameters = columns
            .iter()
            .map(|_| pattern.as_str().into())
            .collect();

        self.terms.push(PredicateTerm::new(
            format!("({})", conditions.join(" OR ")),
            parameters,
        ));

        self
    }

    /// Join the collected terms with `AND`.
    ///
    /// With no terms the clause and parameters are both empty.
    pub fn build_where_clause(&self) -> CompiledPredicate {
        if self.terms.is_empty() {
            return CompiledPredicate::default();
        }

        let clause = format!(
            "WHERE {}",
            self.terms
                .iter()
                .map(|term| term.sql.as_str())
                .collect::<Vec<_>>()
                .join(" AND ")
        );
        let parameters: Vec<SqlParam> = self
            .terms
            .iter()
            .flat_map(|term| term.parameters.iter().cloned())
            .collect();

        tracing::debug!("Final WHERE clause: {clause}");
        tracing::debug!("Final parameters: {parameters:?}");

        CompiledPredicate { clause, parameters }
    }

    /// The `ORDER BY` expression for a sort key, falling back to date
    /// descending for absent or unknown keys.
    pub fn build_order_by_clause(sort_by: Option<&str>) -> &'static str {
        SortBy::resolve(sort_by).order_by()
    }
}

/// Compile every filter in `criteria` against `columns`.
///
/// Filters are applied in a fixed order, so the same criteria always produce
/// the same clause and parameters no matter which query they are used in.
///
/// # Errors
/// Returns a [ValidationError] if an age range or the custom date is
/// malformed.
pub fn compile_filters(
    criteria: &FilterCriteria,
    columns: &FilterColumns,
) -> Result<CompiledPredicate, ValidationError> {
    let compiler = FilterQueryCompiler::new()
        .add_set_filter(columns.customer_region, &criteria.customer_region)
        .add_set_filter(columns.gender, &criteria.gender)
        .add_age_range_filter(columns.age, &criteria.age_range)?
        .add_set_filter(columns.product_category, &criteria.product_category)
        .add_set_filter(columns.tag, &criteria.tags)
        .add_set_filter(columns.payment_method, &criteria.payment_method)
        .add_date_filter(columns.date, criteria.date_range.as_ref())?
        .add_search_filter(&columns.search, criteria.search.as_deref());

    Ok(compiler.build_where_clause())
}

fn relative_range_condition(column: &str, range: RelativeRange) -> String {
    match range {
        RelativeRange::Today => format!("date({column}) = date('now')"),
        RelativeRange::Yesterday => format!("date({column}) = date('now', '-1 day')"),
        RelativeRange::Last7Days => format!("date({column}) >= date('now', '-7 days')"),
        RelativeRange::Last30Days => format!("date({column}) >= date('now', '-30 days')"),
        RelativeRange::ThisMonth => {
            format!("strftime('%Y-%m', {column}) = strftime('%Y-%m', 'now')")
        }
        RelativeRange::LastMonth => format!(
            "strftime('%Y-%m', {column}) = strftime('%Y-%m', 'now', 'start of month', '-1 month')"
        ),
    }
}
