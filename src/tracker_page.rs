//! The tracker page: summary cards, charts, filters, forms and the transaction list.
//!
//! The filter and sort controls are a plain GET form, so the current view is
//! described entirely by the query string and survives page refreshes.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    aggregation::{Totals, calculate_totals, category_totals, daily_totals},
    category::{Category, categories_view},
    charts::{charts_script, charts_view, tracker_charts},
    date_format::{format_display_date, format_iso_date, parse_optional_date},
    endpoints::{self, format_endpoint},
    export::EXPORT_FILE_NAME,
    html::{
        BUTTON_DELETE_STYLE, BUTTON_SECONDARY_STYLE, CARD_STYLE, EXPENSE_BADGE_STYLE,
        FORM_TEXT_INPUT_STYLE, HeadElement, INCOME_BADGE_STYLE, LINK_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency, naira_input_styles,
    },
    ledger::Ledger,
    query::{CategoryFilter, DateRange, KindFilter, SortField, SortOrder, TransactionQuery},
    timezone::local_today,
    transaction::{Transaction, TransactionKind, transaction_form_view},
};

const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@6.0.0/dist/echarts.min.js";

/// The state needed to display the tracker page.
#[derive(Debug, Clone)]
pub struct TrackerPageState {
    pub ledger: Arc<Mutex<Ledger>>,
    /// The local timezone as a canonical timezone name, e.g. "Africa/Lagos".
    pub local_timezone: String,
}

impl FromRef<AppState> for TrackerPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The filter and sort controls as they appear in the query string.
///
/// Every field is optional, a missing field means the default view.
#[derive(Debug, Default, Deserialize)]
pub struct TrackerQueryParams {
    pub kind: Option<KindFilter>,
    pub category: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub sort: Option<SortField>,
    pub order: Option<SortOrder>,
}

/// The state of the filter form, with the date bounds kept separately so
/// that a single bound is still shown in its input.
#[derive(Debug)]
struct FilterState {
    query: TransactionQuery,
    start: Option<Date>,
    end: Option<Date>,
}

impl From<TrackerQueryParams> for FilterState {
    fn from(params: TrackerQueryParams) -> Self {
        let start = parse_optional_date(params.start.as_deref());
        let end = parse_optional_date(params.end.as_deref());

        Self {
            query: TransactionQuery {
                kind: params.kind.unwrap_or_default(),
                category: CategoryFilter::from_query_value(params.category.as_deref()),
                date_range: DateRange::from_bounds(start, end),
                sort_field: params.sort.unwrap_or_default(),
                sort_order: params.order.unwrap_or_default(),
            },
            start,
            end,
        }
    }
}

/// Display the tracker page for the filters in the query string.
pub async fn get_tracker_page(
    State(state): State<TrackerPageState>,
    Query(params): Query<TrackerQueryParams>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone)?;
    let filters = FilterState::from(params);

    let ledger = state
        .ledger
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire ledger lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    Ok(tracker_view(ledger.transactions(), ledger.categories(), &filters, today).into_response())
}

fn tracker_view(
    transactions: &[Transaction],
    categories: &[Category],
    filters: &FilterState,
    today: Date,
) -> Markup {
    let totals = calculate_totals(transactions);
    let charts = tracker_charts(&daily_totals(transactions), &category_totals(transactions));
    let visible_transactions = filters.query.apply(transactions);

    let content = html!(
        main class="max-w-6xl mx-auto p-4 space-y-6"
        {
            section class=(CARD_STYLE)
            {
                h1 class="mb-6 text-3xl font-bold text-gray-800 dark:text-white"
                {
                    "Personal Finance Tracker"
                }

                (summary_cards_view(&totals))
            }

            (charts_view(&charts))

            section class=(CARD_STYLE) { (filter_form_view(filters, categories)) }

            section class=(CARD_STYLE) { (transaction_form_view(categories, today)) }

            section class=(CARD_STYLE)
            {
                h2 class="mb-4 text-xl font-semibold text-gray-900 dark:text-white" { "Manage Categories" }

                (categories_view(categories))
            }

            section class=(CARD_STYLE)
            {
                h2 class="mb-4 text-xl font-semibold text-gray-900 dark:text-white" { "Transactions" }

                (transactions_table_view(&visible_transactions))
            }

            div class="flex justify-end"
            {
                a
                    href=(endpoints::EXPORT)
                    download=(EXPORT_FILE_NAME)
                    class=(BUTTON_SECONDARY_STYLE)
                {
                    "Export Data"
                }
            }
        }
    );

    let head_elements = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(&charts),
        naira_input_styles(),
    ];

    base("Tracker", &head_elements, &content)
}

fn summary_cards_view(totals: &Totals) -> Markup {
    let cards = [
        (
            "Total Income",
            totals.income,
            "bg-green-50 dark:bg-green-900/30",
            "text-green-800 dark:text-green-300",
            "text-green-600 dark:text-green-400",
        ),
        (
            "Total Expenses",
            totals.expenses,
            "bg-red-50 dark:bg-red-900/30",
            "text-red-800 dark:text-red-300",
            "text-red-600 dark:text-red-400",
        ),
        (
            "Balance",
            totals.balance,
            "bg-blue-50 dark:bg-blue-900/30",
            "text-blue-800 dark:text-blue-300",
            "text-blue-600 dark:text-blue-400",
        ),
    ];

    html! {
        div id="summary" class="grid grid-cols-1 md:grid-cols-3 gap-6"
        {
            @for (title, amount, background, title_color, amount_color) in cards {
                div class={"p-6 rounded-xl shadow-sm " (background)}
                {
                    h2 class={"text-sm font-semibold " (title_color)} { (title) }
                    p class={"mt-2 text-2xl font-bold " (amount_color)} { (format_currency(amount)) }
                }
            }
        }
    }
}

fn filter_form_view(filters: &FilterState, categories: &[Category]) -> Markup {
    let query = &filters.query;
    let start = filters.start.map(format_iso_date).unwrap_or_default();
    let end = filters.end.map(format_iso_date).unwrap_or_default();

    html! {
        form
            id="filters"
            method="get"
            action=(endpoints::ROOT)
            onchange="this.requestSubmit()"
            class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-4"
        {
            select name="sort" aria-label="Sort by" class=(FORM_TEXT_INPUT_STYLE)
            {
                @for (field, label) in [
                    (SortField::Date, "Sort by Date"),
                    (SortField::Amount, "Sort by Amount"),
                    (SortField::Category, "Sort by Category"),
                ] {
                    option value=(field.as_query_value()) selected[query.sort_field == field] { (label) }
                }
            }

            select name="order" aria-label="Sort order" class=(FORM_TEXT_INPUT_STYLE)
            {
                @for (order, label) in [(SortOrder::Desc, "Descending"), (SortOrder::Asc, "Ascending")] {
                    option value=(order.as_query_value()) selected[query.sort_order == order] { (label) }
                }
            }

            input
                type="date"
                name="start"
                aria-label="Start date"
                value=(start)
                class=(FORM_TEXT_INPUT_STYLE);

            input
                type="date"
                name="end"
                aria-label="End date"
                value=(end)
                class=(FORM_TEXT_INPUT_STYLE);

            select name="kind" aria-label="Type" class=(FORM_TEXT_INPUT_STYLE)
            {
                @for (kind, label) in [
                    (KindFilter::All, "All Types"),
                    (KindFilter::Income, "Income"),
                    (KindFilter::Expense, "Expense"),
                ] {
                    option value=(kind.as_query_value()) selected[query.kind == kind] { (label) }
                }
            }

            select name="category" aria-label="Category" class=(FORM_TEXT_INPUT_STYLE)
            {
                option value=(CategoryFilter::ALL) selected[query.category == CategoryFilter::All] { "All Categories" }

                @for category in categories {
                    option
                        value=(category.name)
                        selected[query.category.as_query_value() == category.name.as_ref()]
                    {
                        (category.name)
                    }
                }
            }

            noscript { button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Apply" } }

            a href=(endpoints::ROOT) class={"self-center " (LINK_STYLE)} { "Clear filters" }
        }
    }
}

fn transactions_table_view(transactions: &[&Transaction]) -> Markup {
    if transactions.is_empty() {
        return html! {
            p class="py-8 text-center text-gray-500 dark:text-gray-400"
            {
                "No transactions found. Add some transactions to get started!"
            }
        };
    }

    html! {
        div class="overflow-x-auto"
        {
            table id="transactions" class="w-full min-w-[600px] text-sm text-left text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                        th scope="col" class=(TABLE_CELL_STYLE) { "Notes" }
                        th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Actions" }
                    }
                }

                tbody
                {
                    @for transaction in transactions {
                        (transaction_row_view(transaction))
                    }
                }
            }
        }
    }
}

fn transaction_row_view(transaction: &Transaction) -> Markup {
    let (badge_style, amount_style) = match transaction.kind {
        TransactionKind::Income => (INCOME_BADGE_STYLE, "font-medium text-green-600"),
        TransactionKind::Expense => (EXPENSE_BADGE_STYLE, "font-medium text-red-600"),
    };
    let notes = transaction
        .notes
        .as_deref()
        .filter(|notes| !notes.is_empty())
        .unwrap_or("-");

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (format_display_date(transaction.date)) }
            td class=(TABLE_CELL_STYLE) { span class=(badge_style) { (transaction.kind.label()) } }
            td class=(TABLE_CELL_STYLE) { (transaction.category) }
            td class=(TABLE_CELL_STYLE) { span class=(amount_style) { (format_currency(transaction.amount)) } }
            td class=(TABLE_CELL_STYLE) { span class="text-sm text-gray-600 dark:text-gray-400" { (notes) } }
            td class={(TABLE_CELL_STYLE) " text-right"}
            {
                button
                    hx-delete=(format_endpoint(endpoints::TRANSACTION, transaction.id.as_str()))
                    hx-target-error="#alert-container"
                    title="Delete transaction"
                    class=(BUTTON_DELETE_STYLE)
                {
                    "Delete"
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::{Query, State};
    use scraper::{ElementRef, Html, Selector};
    use time::macros::date;

    use crate::{
        Error,
        category::{Category, CategoryName, default_categories},
        query::{KindFilter, SortField, SortOrder},
        record_id::RecordId,
        test_utils::{assert_status_ok, assert_valid_html, get_test_ledger, parse_html_document},
        tracker_page::{
            FilterState, TrackerPageState, TrackerQueryParams, get_tracker_page, tracker_view,
        },
        transaction::{Transaction, TransactionKind},
    };

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            Transaction::build(
                TransactionKind::Income,
                5000.0,
                "Salary",
                date!(2024 - 01 - 10),
            )
            .finalize(RecordId::new("1"))
            .unwrap(),
            Transaction::build(
                TransactionKind::Expense,
                1500.0,
                "Food",
                date!(2024 - 01 - 12),
            )
            .notes("Groceries")
            .finalize(RecordId::new("2"))
            .unwrap(),
        ]
    }

    fn render(transactions: &[Transaction], params: TrackerQueryParams) -> Html {
        let markup = tracker_view(
            transactions,
            &default_categories(),
            &FilterState::from(params),
            date!(2024 - 02 - 01),
        );
        Html::parse_document(&markup.into_string())
    }

    fn table_rows(html: &Html) -> Vec<ElementRef<'_>> {
        html.select(&Selector::parse("#transactions tbody tr").unwrap())
            .collect()
    }

    fn cell_texts(row: &ElementRef<'_>) -> Vec<String> {
        row.select(&Selector::parse("td").unwrap())
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect()
    }

    #[test]
    fn empty_tracker_shows_message() {
        let html = render(&[], TrackerQueryParams::default());
        assert_valid_html(&html);

        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No transactions found. Add some transactions to get started!"));
        assert!(table_rows(&html).is_empty());
    }

    #[test]
    fn summary_shows_totals_for_all_transactions() {
        let html = render(
            &sample_transactions(),
            TrackerQueryParams {
                kind: Some(KindFilter::Expense),
                ..Default::default()
            },
        );

        let summary = html
            .select(&Selector::parse("#summary").unwrap())
            .next()
            .unwrap()
            .text()
            .collect::<String>();
        assert!(summary.contains("₦5,000.00"), "{summary}");
        assert!(summary.contains("₦1,500.00"), "{summary}");
        assert!(summary.contains("₦3,500.00"), "{summary}");
    }

    #[test]
    fn rows_are_newest_first_by_default() {
        let html = render(&sample_transactions(), TrackerQueryParams::default());

        let rows = table_rows(&html);

        assert_eq!(rows.len(), 2);
        assert_eq!(
            cell_texts(&rows[0])[..5],
            ["12/01/2024", "Expense", "Food", "₦1,500.00", "Groceries"]
        );
        assert_eq!(
            cell_texts(&rows[1])[..5],
            ["10/01/2024", "Income", "Salary", "₦5,000.00", "-"]
        );
    }

    #[test]
    fn rows_have_delete_buttons() {
        let html = render(&sample_transactions(), TrackerQueryParams::default());

        let targets: Vec<_> = html
            .select(&Selector::parse("button[hx-delete]").unwrap())
            .filter_map(|button| button.value().attr("hx-delete"))
            .collect();

        assert_eq!(targets, ["/api/transactions/2", "/api/transactions/1"]);
    }

    #[test]
    fn filters_are_applied_and_kept_in_form() {
        let html = render(
            &sample_transactions(),
            TrackerQueryParams {
                category: Some("Salary".to_owned()),
                start: Some("2024-01-01".to_owned()),
                end: Some(String::new()),
                sort: Some(SortField::Amount),
                order: Some(SortOrder::Asc),
                ..Default::default()
            },
        );

        let rows = table_rows(&html);
        assert_eq!(rows.len(), 1);
        assert_eq!(cell_texts(&rows[0])[2], "Salary");

        let selected = |name: &str| {
            let selector =
                Selector::parse(&format!("#filters select[name={name}] option[selected]"))
                    .unwrap();
            html.select(&selector)
                .next()
                .and_then(|option| option.value().attr("value"))
                .map(str::to_owned)
        };
        assert_eq!(selected("category").as_deref(), Some("Salary"));
        assert_eq!(selected("sort").as_deref(), Some("amount"));
        assert_eq!(selected("order").as_deref(), Some("asc"));
        assert_eq!(selected("kind").as_deref(), Some("all"));

        let start = html
            .select(&Selector::parse("#filters input[name=start]").unwrap())
            .next()
            .unwrap();
        assert_eq!(start.value().attr("value"), Some("2024-01-01"));
    }

    #[test]
    fn category_text_is_not_rendered_as_markup() {
        let category = "</script><script>alert(1)</script>";
        let transactions = [Transaction::build(
            TransactionKind::Expense,
            10.0,
            category,
            date!(2024 - 01 - 12),
        )
        .finalize(RecordId::new("1"))
        .unwrap()];

        let markup = tracker_view(
            &transactions,
            &default_categories(),
            &FilterState::from(TrackerQueryParams::default()),
            date!(2024 - 02 - 01),
        )
        .into_string();

        assert!(!markup.contains("<script>alert(1)</script>"));

        let html = Html::parse_document(&markup);
        assert_eq!(cell_texts(&table_rows(&html)[0])[2], category);
    }

    #[test]
    fn category_named_all_can_be_filtered() {
        let mut categories = default_categories();
        categories.push(Category {
            id: RecordId::new("6"),
            name: CategoryName::new_unchecked("all"),
            kind: TransactionKind::Expense,
        });
        let mut transactions = sample_transactions();
        transactions.push(
            Transaction::build(TransactionKind::Expense, 20.0, "all", date!(2024 - 01 - 13))
                .finalize(RecordId::new("3"))
                .unwrap(),
        );

        let markup = tracker_view(
            &transactions,
            &categories,
            &FilterState::from(TrackerQueryParams {
                category: Some("all".to_owned()),
                ..Default::default()
            }),
            date!(2024 - 02 - 01),
        );
        let html = Html::parse_document(&markup.into_string());

        let rows = table_rows(&html);
        assert_eq!(rows.len(), 1);
        assert_eq!(cell_texts(&rows[0])[2], "all");

        let options: Vec<_> = html
            .select(&Selector::parse("#filters select[name=category] option").unwrap())
            .map(|option| option.value().attr("value").unwrap_or_default().to_owned())
            .collect();
        assert_eq!(options[0], "");
        assert!(options.contains(&"all".to_owned()));
    }

    #[test]
    fn single_date_bound_does_not_filter() {
        let html = render(
            &sample_transactions(),
            TrackerQueryParams {
                start: Some("2024-01-11".to_owned()),
                ..Default::default()
            },
        );

        assert_eq!(table_rows(&html).len(), 2);
    }

    #[test]
    fn page_includes_charts_and_export_link() {
        let html = render(&sample_transactions(), TrackerQueryParams::default());

        for selector in ["#trend-chart", "#category-chart", "a[href='/api/export'][download]"] {
            assert!(
                html.select(&Selector::parse(selector).unwrap())
                    .next()
                    .is_some(),
                "missing {selector}"
            );
        }
    }

    #[tokio::test]
    async fn handler_renders_page() {
        let state = TrackerPageState {
            ledger: get_test_ledger(),
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_tracker_page(State(state), Query(TrackerQueryParams::default()))
            .await
            .unwrap();

        assert_status_ok(&response);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
    }

    #[tokio::test]
    async fn handler_rejects_invalid_timezone() {
        let state = TrackerPageState {
            ledger: get_test_ledger(),
            local_timezone: "Not/A_Zone".to_owned(),
        };

        let result = get_tracker_page(State(state), Query(TrackerQueryParams::default())).await;

        assert!(matches!(result, Err(Error::InvalidTimezoneError(_))));
    }
}
