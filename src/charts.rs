//! Chart generation and rendering for the tracker page.
//!
//! This module creates interactive ECharts visualizations for the transactions:
//! - **Trend Chart**: daily income and expense totals as two lines
//! - **Category Chart**: share of each category as a pie, coloured by kind
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    datatype::DataPointItem,
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, ItemStyle, JsFunction, Label, Tooltip,
        Trigger,
    },
    series::{Line, Pie},
};
use maud::{Markup, PreEscaped, html};
use time::{format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    aggregation::{CategoryTotal, DailyTotals},
    html::HeadElement,
    transaction::TransactionKind,
};

const INCOME_COLOR: &str = "#10B981";
const EXPENSE_COLOR: &str = "#EF4444";

/// Short day labels for the trend chart, e.g. "10 Jan".
const DAY_LABEL_FORMAT: &[BorrowedFormatItem] =
    format_description!("[day padding:none] [month repr:short]");

/// A chart with its HTML container ID and ECharts configuration.
pub struct TrackerChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Build the trend and category charts for `daily` and `categories`.
pub fn tracker_charts(daily: &[DailyTotals], categories: &[CategoryTotal]) -> [TrackerChart; 2] {
    [
        TrackerChart {
            id: "trend-chart",
            options: trend_chart(daily).to_string(),
        },
        TrackerChart {
            id: "category-chart",
            options: category_chart(categories).to_string(),
        },
    ]
}

/// Renders the HTML containers for the charts.
pub fn charts_view(charts: &[TrackerChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto"
        {
            div class="grid grid-cols-1 lg:grid-cols-2 gap-6"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[400px] rounded-xl shadow-lg bg-white dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for the charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub fn charts_script(charts: &[TrackerChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id,
                escape_script_text(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// Escape `<` so that user text inside the options, such as a category named
/// `</script>`, cannot close the surrounding script element.
///
/// `<` only appears inside string literals in the options, where `\u003c`
/// decodes back to the same character.
fn escape_script_text(options: &str) -> String {
    options.replace('<', "\\u003c")
}

/// Income and expenses per day, oldest day first.
pub fn trend_chart(daily: &[DailyTotals]) -> Chart {
    let labels: Vec<String> = daily
        .iter()
        .map(|day| {
            day.date
                .format(DAY_LABEL_FORMAT)
                .unwrap_or_else(|_| day.date.to_string())
        })
        .collect();
    let income: Vec<f64> = daily.iter().map(|day| day.income).collect();
    let expenses: Vec<f64> = daily.iter().map(|day| day.expenses).collect();

    Chart::new()
        .title(Title::new().text("Income vs Expenses Trend"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("bottom"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("10%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(
            Line::new()
                .name("Income")
                .item_style(ItemStyle::new().color(INCOME_COLOR))
                .data(income),
        )
        .series(
            Line::new()
                .name("Expenses")
                .item_style(ItemStyle::new().color(EXPENSE_COLOR))
                .data(expenses),
        )
}

/// The total per category as pie slices, green for income and red for expenses.
pub fn category_chart(categories: &[CategoryTotal]) -> Chart {
    let data: Vec<DataPointItem> = categories
        .iter()
        .map(|category| {
            let color = match category.kind {
                TransactionKind::Income => INCOME_COLOR,
                TransactionKind::Expense => EXPENSE_COLOR,
            };

            DataPointItem::new(category.total)
                .name(category.name.as_str())
                .item_style(ItemStyle::new().color(color).opacity(0.8))
        })
        .collect();

    Chart::new()
        .title(Title::new().text("Category Distribution"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().top("bottom"))
        .series(
            Pie::new()
                .name("Categories")
                .radius("60%")
                .label(Label::new().formatter("{b} ({d}%)"))
                .data(data),
        )
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-NG', {
              style: 'currency',
              currency: 'NGN'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Line))
}
