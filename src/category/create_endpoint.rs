//! Category creation form and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRefresh;
use maud::{Markup, html};

use crate::{
    AppState, Error, endpoints,
    category::{Category, CategoryFormData},
    html::{BUTTON_PRIMARY_STYLE, FORM_TEXT_INPUT_STYLE},
    ledger::Ledger,
    transaction::TransactionKind,
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Handle category creation form submission.
///
/// A blank name is ignored without telling the user, the page is left as is.
pub async fn create_category_endpoint(
    State(state): State<CreateCategoryState>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match ledger.add_category(&form.name, form.kind) {
        Ok(category) => {
            tracing::info!("Created {} category {}", category.kind, category.name);
            (HxRefresh(true), StatusCode::OK).into_response()
        }
        Err(Error::EmptyCategoryName) => {
            tracing::debug!("ignoring category with blank name {:?}", form.name);
            StatusCode::NO_CONTENT.into_response()
        }
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");
            error.into_alert_response()
        }
    }
}

/// The form for adding a category above the income and expense category lists.
pub fn categories_view(categories: &[Category]) -> Markup {
    html! {
        (new_category_form_view())

        div class="grid grid-cols-1 gap-4 md:grid-cols-2"
        {
            (category_list_view(TransactionKind::Income, categories))
            (category_list_view(TransactionKind::Expense, categories))
        }
    }
}

fn category_list_view(kind: TransactionKind, categories: &[Category]) -> Markup {
    let (heading, item_style) = match kind {
        TransactionKind::Income => (
            "Income Categories",
            "p-2 rounded-lg bg-green-50 dark:bg-green-900/30",
        ),
        TransactionKind::Expense => (
            "Expense Categories",
            "p-2 rounded-lg bg-red-50 dark:bg-red-900/30",
        ),
    };

    html! {
        div data-category-kind=(kind.as_str())
        {
            h3 class="mb-2 font-semibold text-gray-900 dark:text-white" { (heading) }

            ul class="space-y-2 text-sm text-gray-700 dark:text-gray-300"
            {
                @for category in categories.iter().filter(|category| category.kind == kind) {
                    li class=(item_style) { (category.name) }
                }
            }
        }
    }
}

fn new_category_form_view() -> Markup {
    html! {
        form
            hx-post=(endpoints::CATEGORIES_API)
            hx-target-error="#alert-container"
            class="flex flex-wrap gap-4 mb-4"
        {
            label for="new-category-name" class="sr-only" { "Category name" }

            input
                id="new-category-name"
                type="text"
                name="name"
                placeholder="New category name"
                required
                class=(FORM_TEXT_INPUT_STYLE);

            label for="new-category-type" class="sr-only" { "Category type" }

            select id="new-category-type" name="type" class=(FORM_TEXT_INPUT_STYLE)
            {
                option value=(TransactionKind::Income.as_str()) { (TransactionKind::Income.label()) }
                option value=(TransactionKind::Expense.as_str()) selected { (TransactionKind::Expense.label()) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Category" }
        }
    }
}

#[cfg(test)]
mod view_tests {
    use scraper::{Html, Selector};

    use crate::{
        category::{create_endpoint::categories_view, default_categories},
        endpoints,
        test_utils::{
            assert_form_input, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_valid_html, must_get_form,
        },
    };

    #[test]
    fn lists_are_split_by_kind() {
        let html = Html::parse_fragment(&categories_view(&default_categories()).into_string());
        assert_valid_html(&html);

        let names_for = |kind: &str| {
            let selector = Selector::parse(&format!("[data-category-kind={kind}] li")).unwrap();
            html.select(&selector)
                .map(|li| li.text().collect::<String>())
                .collect::<Vec<_>>()
        };

        assert_eq!(names_for("income"), ["Salary", "Freelance"]);
        assert_eq!(names_for("expense"), ["Food", "Transport", "Utilities"]);
    }

    #[test]
    fn add_form_posts_name_and_type() {
        let html = Html::parse_fragment(&categories_view(&[]).into_string());

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::CATEGORIES_API, "hx-post");
        assert_form_input(&form, "name", "text");
        assert_form_submit_button_with_text(&form, "Add Category");

        let selected_kind = form
            .select(&Selector::parse("select[name=type] option[selected]").unwrap())
            .next()
            .expect("no kind selected by default");
        assert_eq!(selected_kind.value().attr("value"), Some("expense"));
    }
}
