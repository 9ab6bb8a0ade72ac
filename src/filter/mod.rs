//! Turns user-supplied sales filters into a parameterised SQL predicate.
//!
//! This module contains:
//! - The [FilterCriteria] model and its boundary decoders
//! - Parsers for age buckets and custom dates
//! - The [FilterQueryCompiler] that builds the `WHERE` and `ORDER BY` clauses
//!   shared by the listing, count and stats queries

mod age_range;
mod compiler;
mod criteria;
mod custom_date;
mod decode;
mod error;

pub use age_range::AgeBounds;
pub use compiler::{
    CompiledPredicate, FilterColumns, FilterQueryCompiler, SqlParam, compile_filters,
};
pub use criteria::{
    AGE_RANGE_OPTIONS, DateFilter, FilterCriteria, QuickSelect, RelativeRange, SortBy,
};
pub use custom_date::parse_custom_date;
pub use decode::{DecodeError, EncodedFilterParams, FormFilterParams, to_form_pairs};
pub use error::ValidationError;
