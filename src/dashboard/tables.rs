//! Stats cards, the sales table and the page links below it.

use maud::{Markup, html};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    html::{
        CARD_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        currency_rounded_with_tooltip, format_currency,
    },
    pagination::{PaginationIndicator, create_pagination_indicators},
    sales::{Pagination, SaleRow, SalesStats},
};

const TABLE_DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[day]/[month]/[year]");

pub(super) fn stats_cards(stats: &SalesStats) -> Markup {
    html! {
        section id="stats" class="w-full grid grid-cols-1 md:grid-cols-3 gap-4 mb-6"
        {
            div class=(CARD_STYLE)
            {
                span class="text-sm text-gray-500 dark:text-gray-400" { "Total units sold" }
                span class="text-2xl font-bold" data-stat="total-units" { (stats.total_units) }
            }

            div class=(CARD_STYLE)
            {
                span class="text-sm text-gray-500 dark:text-gray-400" { "Total Amount" }
                span class="text-2xl font-bold" data-stat="total-amount"
                {
                    (currency_rounded_with_tooltip(stats.total_amount))
                }
                span class="text-sm" { (stats.total_orders) " orders" }
            }

            div class=(CARD_STYLE)
            {
                span class="text-sm text-gray-500 dark:text-gray-400" { "Total Discount" }
                span class="text-2xl font-bold" data-stat="total-discount"
                {
                    (currency_rounded_with_tooltip(stats.total_discount))
                }
                span class="text-sm" { (stats.discount_orders) " orders" }
            }
        }
    }
}

pub(super) fn sales_table(rows: &[SaleRow]) -> Markup {
    if rows.is_empty() {
        return html! {
            p id="no-sales" class="py-8 text-center text-gray-500 dark:text-gray-400"
            {
                "No sales match the current filters."
            }
        };
    }

    html! {
        div class="w-full overflow-x-auto shadow-md rounded"
        {
            table id="sales-table" class="w-full text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Transaction ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Customer ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Customer name" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Phone Number" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Gender" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Age" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Product Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Quantity" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Total Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Customer region" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Product ID" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Employee name" }
                    }
                }

                tbody
                {
                    @for row in rows {
                        tr class=(TABLE_ROW_STYLE) data-transaction-id=(row.transaction_id)
                        {
                            td class=(TABLE_CELL_STYLE) { (row.transaction_id) }
                            td class=(TABLE_CELL_STYLE) { (format_date(row)) }
                            td class=(TABLE_CELL_STYLE) { (row.customer_id) }
                            td class=(TABLE_CELL_STYLE) { (row.customer_name) }
                            td class=(TABLE_CELL_STYLE) { (row.phone_number) }
                            td class=(TABLE_CELL_STYLE) { (row.gender) }
                            td class=(TABLE_CELL_STYLE) { (row.age) }
                            td class=(TABLE_CELL_STYLE) { (row.product_category) }
                            td class=(TABLE_CELL_STYLE) { (row.quantity) }
                            td class=(TABLE_CELL_STYLE) { (format_currency(row.final_amount)) }
                            td class=(TABLE_CELL_STYLE) { (row.customer_region) }
                            td class=(TABLE_CELL_STYLE) { (row.product_id) }
                            td class=(TABLE_CELL_STYLE) { (row.employee_name.as_deref().unwrap_or("-")) }
                        }
                    }
                }
            }
        }
    }
}

/// Render the page links for `pagination`.
///
/// `page_link` builds the URL of a page number so the links keep the current
/// filters.
pub(super) fn pagination_view(
    pagination: &Pagination,
    max_pages: u64,
    page_link: impl Fn(u64) -> String,
) -> Markup {
    let indicators =
        create_pagination_indicators(pagination.current_page, pagination.total_pages, max_pages);

    let first_shown = if pagination.total_records == 0 {
        0
    } else {
        (pagination.current_page - 1) * pagination.limit + 1
    };
    let last_shown = (pagination.current_page * pagination.limit).min(pagination.total_records);

    html! {
        nav class="flex flex-col items-center gap-2 my-4" aria-label="Pagination"
        {
            ul class="flex items-center gap-1 text-sm"
            {
                @for indicator in indicators {
                    li
                    {
                        @match indicator {
                            PaginationIndicator::CurrPage(page) => {
                                span
                                    aria-current="page"
                                    class="px-3 py-2 rounded bg-blue-600 text-white"
                                {
                                    (page)
                                }
                            }
                            PaginationIndicator::Page(page) => {
                                (page_anchor(&page_link(page), &page.to_string()))
                            }
                            PaginationIndicator::Ellipsis => {
                                span class="px-3 py-2" { "..." }
                            }
                            PaginationIndicator::BackButton(page) => {
                                (page_anchor(&page_link(page), "‹ Previous"))
                            }
                            PaginationIndicator::NextButton(page) => {
                                (page_anchor(&page_link(page), "Next ›"))
                            }
                        }
                    }
                }
            }

            p id="pagination-info" class="text-sm text-gray-500 dark:text-gray-400"
            {
                "Showing " (first_shown) " - " (last_shown)
                " of " (pagination.total_records) " entries"
            }
        }
    }
}

fn page_anchor(url: &str, text: &str) -> Markup {
    html! {
        a
            href=(url)
            hx-get=(url)
            hx-target="#dashboard-content"
            hx-push-url="true"
            class="px-3 py-2 rounded text-blue-600 hover:bg-gray-100
                dark:text-blue-500 dark:hover:bg-gray-700"
        {
            (text)
        }
    }
}

fn format_date(row: &SaleRow) -> String {
    row.date
        .format(TABLE_DATE_FORMAT)
        .unwrap_or_else(|_| row.date.to_string())
}
