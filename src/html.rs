//! Shared page layout, styles and formatting helpers for the HTML views.

use maud::{DOCTYPE, Markup, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "px-4 py-2 bg-blue-500 \
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

// Form styles
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";
pub const FORM_CHECKBOX_STYLE: &str = "rounded-sm border-gray-300 \
    text-blue-600 shadow-xs focus:border-blue-300 focus:ring-3 \
    focus:ring-blue-200/50";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Card style
pub const CARD_STYLE: &str = "flex flex-col gap-1 p-4 rounded-lg bg-white \
    dark:bg-gray-800 border border-gray-200 dark:border-gray-700";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

/// The page skeleton shared by every HTML view.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Sales Dashboard" }
                link href="/static/main.css" rel="stylesheet";

                script src="/static/htmx-2.0.8-min.js" integrity="sha384-/TgkGk7p307TH7EXJDuUlgG3Ce1UVolAOFopFekQkkXihi5u/6OCvVKyz1W+idaz" {}
            }

            body class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-blue-600 dark:text-blue-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-blue-600
                            hover:bg-blue-800 focus:ring-4 focus:outline-hidden
                            focus:ring-blue-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-blue-900 my-4"
                    {
                        "Back to Dashboard"
                    }
                }
            }
        }
    );

    base(title, &content)
}

/// Format `number` as rupees with two decimal places, e.g. "₹1,234.50".
pub fn format_currency(number: f64) -> String {
    let paise = (number.abs() * 100.0).round();
    let whole = (paise / 100.0).trunc();
    let fraction = (paise - whole * 100.0) as u64;
    let sign = if number < 0.0 && paise > 0.0 { "-" } else { "" };

    format!("{sign}{}.{fraction:02}", format_rupees(whole))
}

/// Format `number` as rupees rounded to the nearest whole number, e.g. "₹1,235".
pub fn format_currency_rounded(number: f64) -> String {
    let whole = number.abs().round();
    let sign = if number < 0.0 && whole > 0.0 { "-" } else { "" };

    format!("{sign}{}", format_rupees(whole))
}

/// Format a non-negative whole number of rupees with thousands separators.
fn format_rupees(whole: f64) -> String {
    static RUPEE_FMT: OnceLock<Formatter> = OnceLock::new();

    let rupee_fmt = RUPEE_FMT.get_or_init(|| {
        Formatter::currency("₹")
            .expect("the rupee sign is a valid currency prefix")
            .precision(Precision::Decimals(0))
    });

    // numfmt renders zero as "0" without the prefix.
    if whole == 0.0 {
        "₹0".to_owned()
    } else {
        rupee_fmt.fmt_string(whole)
    }
}

/// Creates a span with `amount` rounded to the nearest whole number and a
/// tooltip (title) that shows `amount` rounded to two decimal places.
pub fn currency_rounded_with_tooltip(amount: f64) -> Markup {
    html!(
        span title=(format_currency(amount)) { (format_currency_rounded(amount)) }
    )
}

#[cfg(test)]
mod tests {
    use super::{format_currency, format_currency_rounded};

    #[test]
    fn formats_currency_with_two_decimals() {
        assert_eq!(format_currency(1234.5), "₹1,234.50");
        assert_eq!(format_currency(0.0), "₹0.00");
        assert_eq!(format_currency(-12.25), "-₹12.25");
        assert_eq!(format_currency(1000.0), "₹1,000.00");
        assert_eq!(format_currency(0.999), "₹1.00");
    }

    #[test]
    fn formats_rounded_currency() {
        assert_eq!(format_currency_rounded(1234.5), "₹1,235");
        assert_eq!(format_currency_rounded(0.2), "₹0");
        assert_eq!(format_currency_rounded(-0.2), "₹0");
        assert_eq!(format_currency_rounded(-99.6), "-₹100");
    }
}
