//! The filter bar at the top of the dashboard.
//!
//! The filter bar is a plain GET form. Every multi-select filter submits one
//! value per checked box under the same key, e.g. `gender=Male&gender=Female`.

use maud::{Markup, html};

use crate::{
    endpoints,
    filter::{FilterCriteria, RelativeRange, SortBy},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CHECKBOX_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        LINK_STYLE,
    },
    sales::FilterOptions,
};

/// One multi-select filter and its current selection.
struct CheckboxGroup<'a> {
    label: &'a str,
    name: &'a str,
    options: &'a [String],
    selected: &'a [String],
}

pub(super) fn filter_bar_view(criteria: &FilterCriteria, options: &FilterOptions) -> Markup {
    let groups = [
        CheckboxGroup {
            label: "Customer Region",
            name: "customerRegion",
            options: &options.customer_regions,
            selected: &criteria.customer_region,
        },
        CheckboxGroup {
            label: "Gender",
            name: "gender",
            options: &options.genders,
            selected: &criteria.gender,
        },
        CheckboxGroup {
            label: "Age Range",
            name: "ageRange",
            options: &options.age_ranges,
            selected: &criteria.age_range,
        },
        CheckboxGroup {
            label: "Product Category",
            name: "productCategory",
            options: &options.product_categories,
            selected: &criteria.product_category,
        },
        CheckboxGroup {
            label: "Tags",
            name: "tags",
            options: &options.tags,
            selected: &criteria.tags,
        },
        CheckboxGroup {
            label: "Payment Method",
            name: "paymentMethod",
            options: &options.payment_methods,
            selected: &criteria.payment_method,
        },
    ];

    let active_filter_count = criteria.active_filter_count();

    html! {
        form
            id="filter-bar"
            method="get"
            action=(endpoints::DASHBOARD_VIEW)
            hx-get=(endpoints::DASHBOARD_VIEW)
            hx-target="#dashboard-content"
            hx-push-url="true"
            hx-trigger="change, submit"
            class="w-full flex flex-col gap-4 mb-6"
        {
            div class="flex flex-col md:flex-row gap-4 items-end"
            {
                div class="w-full md:flex-1"
                {
                    label for="search" class="sr-only" { "Search" }
                    input
                        type="search"
                        id="search"
                        name="search"
                        placeholder="Name, phone number or customer ID"
                        value=[criteria.search.as_deref()]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="w-full md:w-64"
                {
                    label for="sortBy" class="sr-only" { "Sort by" }
                    (sort_select(criteria.sort_by.as_deref()))
                }
            }

            div class="flex flex-wrap gap-2 items-start"
            {
                @for group in &groups {
                    (checkbox_group(group))
                }

                (date_filter(criteria))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }

                @if active_filter_count > 0 {
                    a
                        id="clear-filters"
                        href=(endpoints::DASHBOARD_VIEW)
                        class=(LINK_STYLE)
                    {
                        "Clear all (" (active_filter_count) ")"
                    }
                }
            }
        }
    }
}

fn checkbox_group(group: &CheckboxGroup) -> Markup {
    let selected_count = group
        .selected
        .iter()
        .filter(|value| group.options.contains(value))
        .count();

    html! {
        details
            class="relative rounded border border-gray-300 dark:border-gray-600
                bg-white dark:bg-gray-800 px-3 py-2 text-sm"
            data-filter=(group.name)
        {
            summary class="cursor-pointer select-none"
            {
                (group.label)
                @if selected_count > 0 {
                    " (" (selected_count) ")"
                }
            }

            div class="flex flex-col gap-1 mt-2"
            {
                @for option in group.options {
                    label class="flex items-center gap-2"
                    {
                        input
                            type="checkbox"
                            name=(group.name)
                            value=(option)
                            checked[group.selected.contains(option)]
                            class=(FORM_CHECKBOX_STYLE);
                        (option)
                    }
                }
            }
        }
    }
}

fn date_filter(criteria: &FilterCriteria) -> Markup {
    let (ranges, custom_date) = match &criteria.date_range {
        Some(date_filter) => (date_filter.relative_ranges(), date_filter.custom_date()),
        None => (Vec::new(), None),
    };

    html! {
        details
            class="relative rounded border border-gray-300 dark:border-gray-600
                bg-white dark:bg-gray-800 px-3 py-2 text-sm"
            data-filter="date"
        {
            summary class="cursor-pointer select-none" { "Date" }

            div class="flex flex-col gap-1 mt-2"
            {
                @for range in RelativeRange::ALL {
                    label class="flex items-center gap-2"
                    {
                        input
                            type="checkbox"
                            name="quickSelect"
                            value=(range.as_query_value())
                            checked[ranges.contains(&range)]
                            class=(FORM_CHECKBOX_STYLE);
                        (range.label())
                    }
                }

                label for="customDate" class=(FORM_LABEL_STYLE) { "Custom date" }
                input
                    type="text"
                    id="customDate"
                    name="customDate"
                    placeholder="YYYY-MM-DD or 9/december/2025"
                    value=[custom_date]
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }
    }
}

fn sort_select(sort_by: Option<&str>) -> Markup {
    let current = SortBy::resolve(sort_by);

    html! {
        select id="sortBy" name="sortBy" class=(FORM_TEXT_INPUT_STYLE)
        {
            @for option in SortBy::ALL {
                option value=(option.as_query_value()) selected[option == current]
                {
                    "Sort by: " (option.label())
                }
            }
        }
    }
}
