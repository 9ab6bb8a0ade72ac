//! Decoding of filter query parameters into [FilterCriteria].
//!
//! The JSON API receives every multi-select filter as a JSON encoded array
//! (`gender=["Female","Male"]`) and the date filter as a JSON encoded object.
//! The dashboard's HTML form instead repeats keys (`gender=Female&gender=Male`).
//! Both shapes are decoded here so the compiler only ever sees [FilterCriteria].

use serde::{Deserialize, de::DeserializeOwned};

use crate::filter::{DateFilter, FilterCriteria, QuickSelect};

/// A query parameter that could not be decoded.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("could not decode query parameter \"{parameter}\": {reason}")]
pub struct DecodeError {
    /// The name of the query parameter.
    pub parameter: &'static str,
    /// Why decoding failed.
    pub reason: String,
}

/// Filter query parameters as sent to the JSON API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncodedFilterParams {
    /// JSON array of customer regions.
    pub customer_region: Option<String>,
    /// JSON array of genders.
    pub gender: Option<String>,
    /// JSON array of age buckets.
    pub age_range: Option<String>,
    /// JSON array of product categories.
    pub product_category: Option<String>,
    /// JSON array of product tags.
    pub tags: Option<String>,
    /// JSON array of payment methods.
    pub payment_method: Option<String>,
    /// JSON object with `quickSelect` and `customDate`.
    pub date_range: Option<String>,
    /// Free text matched against name, phone number and customer ID.
    pub search: Option<String>,
    /// The sort key, e.g. `amount-desc`.
    pub sort_by: Option<String>,
}

impl EncodedFilterParams {
    /// Decode the JSON encoded parameters.
    ///
    /// Missing, empty and `null` parameters decode to "no restriction".
    ///
    /// # Errors
    /// Returns a [DecodeError] naming the first parameter that is not valid
    /// JSON of the expected shape.
    pub fn decode(self) -> Result<FilterCriteria, DecodeError> {
        Ok(FilterCriteria {
            customer_region: decode_list("customerRegion", self.customer_region)?,
            gender: decode_list("gender", self.gender)?,
            age_range: decode_list("ageRange", self.age_range)?,
            product_category: decode_list("productCategory", self.product_category)?,
            tags: decode_list("tags", self.tags)?,
            payment_method: decode_list("paymentMethod", self.payment_method)?,
            date_range: decode_json("dateRange", self.date_range)?,
            search: non_empty(self.search),
            sort_by: non_empty(self.sort_by),
        })
    }
}

/// Filter query parameters as submitted by the dashboard's HTML form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FormFilterParams {
    /// Checked customer regions.
    pub customer_region: Vec<String>,
    /// Checked genders.
    pub gender: Vec<String>,
    /// Checked age buckets, e.g. `26-35`.
    pub age_range: Vec<String>,
    /// Checked product categories.
    pub product_category: Vec<String>,
    /// Checked product tags.
    pub tags: Vec<String>,
    /// Checked payment methods.
    pub payment_method: Vec<String>,
    /// Checked relative date ranges, e.g. `last7days`.
    pub quick_select: Vec<String>,
    /// A single date typed into the custom date box.
    pub custom_date: Option<String>,
    /// Free text matched against name, phone number and customer ID.
    pub search: Option<String>,
    /// The sort key, e.g. `amount-desc`.
    pub sort_by: Option<String>,
}

impl From<FormFilterParams> for FilterCriteria {
    fn from(params: FormFilterParams) -> Self {
        let custom_date = non_empty(params.custom_date);
        let date_range = if params.quick_select.is_empty() && custom_date.is_none() {
            None
        } else {
            Some(DateFilter {
                quick_select: params
                    .quick_select
                    .into_iter()
                    .map(QuickSelect::from)
                    .collect(),
                custom_date,
            })
        };

        FilterCriteria {
            customer_region: params.customer_region,
            gender: params.gender,
            age_range: params.age_range,
            product_category: params.product_category,
            tags: params.tags,
            payment_method: params.payment_method,
            date_range,
            search: non_empty(params.search),
            sort_by: non_empty(params.sort_by),
        }
    }
}

/// Encode `criteria` as repeated-key form parameters.
///
/// Used to build links (pagination, sorting) that keep the current filters.
pub fn to_form_pairs(criteria: &FilterCriteria) -> Vec<(&'static str, String)> {
    let mut pairs = Vec::new();

    let lists: [(&'static str, &Vec<String>); 6] = [
        ("customerRegion", &criteria.customer_region),
        ("gender", &criteria.gender),
        ("ageRange", &criteria.age_range),
        ("productCategory", &criteria.product_category),
        ("tags", &criteria.tags),
        ("paymentMethod", &criteria.payment_method),
    ];

    for (key, values) in lists {
        pairs.extend(values.iter().map(|value| (key, value.clone())));
    }

    if let Some(date_filter) = &criteria.date_range {
        pairs.extend(
            date_filter
                .quick_select
                .iter()
                .map(|option| ("quickSelect", String::from(option.clone()))),
        );

        if let Some(custom_date) = date_filter.custom_date() {
            pairs.push(("customDate", custom_date.to_owned()));
        }
    }

    if let Some(search) = &criteria.search {
        pairs.push(("search", search.clone()));
    }

    if let Some(sort_by) = &criteria.sort_by {
        pairs.push(("sortBy", sort_by.clone()));
    }

    pairs
}

fn decode_list(parameter: &'static str, raw: Option<String>) -> Result<Vec<String>, DecodeError> {
    Ok(decode_json::<Vec<String>>(parameter, raw)?.unwrap_or_default())
}

fn decode_json<T: DeserializeOwned>(
    parameter: &'static str,
    raw: Option<String>,
) -> Result<Option<T>, DecodeError> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };

    serde_json::from_str::<Option<T>>(&raw).map_err(|error| DecodeError {
        parameter,
        reason: error.to_string(),
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
