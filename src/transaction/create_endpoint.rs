//! Defines the form and endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRefresh;
use maud::{Markup, html};
use serde::Deserialize;
use time::Date;

use crate::{
    AppState, Error,
    category::Category,
    date_format::format_iso_date,
    endpoints,
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    ledger::Ledger,
    transaction::{Transaction, TransactionKind},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// The form data for creating a transaction.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// Whether the transaction is income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// The value of the transaction in naira.
    pub amount: f64,
    /// The name of the category.
    pub category: String,
    /// The date when the transaction ocurred.
    #[serde(with = "crate::date_format")]
    pub date: Date,
    /// Free text notes, may be empty.
    #[serde(default)]
    pub notes: String,
}

/// A route handler for creating a new transaction, refreshes the page on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    Form(form): Form<TransactionForm>,
) -> Response {
    let new_transaction =
        Transaction::build(form.kind, form.amount, &form.category, form.date).notes(&form.notes);

    let mut ledger = match state.ledger.lock() {
        Ok(ledger) => ledger,
        Err(error) => {
            tracing::error!("could not acquire ledger lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match ledger.add_transaction(new_transaction) {
        Ok(transaction) => {
            tracing::info!(
                "Created {} transaction {} in {}",
                transaction.kind,
                transaction.id,
                transaction.category
            );
            (HxRefresh(true), StatusCode::OK).into_response()
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_alert_response()
        }
    }
}

/// The collapsible form for adding a transaction.
///
/// `today` is used as the default date.
pub fn transaction_form_view(categories: &[Category], today: Date) -> Markup {
    let today = format_iso_date(today);

    html! {
        details id="transaction-form"
        {
            summary class={"inline-block cursor-pointer list-none " (BUTTON_PRIMARY_STYLE)}
            {
                "Add Transaction"
            }

            form
                hx-post=(endpoints::TRANSACTIONS_API)
                hx-target-error="#alert-container"
                class="mt-4 space-y-4"
            {
                h2 class="text-xl font-semibold text-gray-900 dark:text-white" { "Add New Transaction" }

                div class="grid grid-cols-1 gap-4 md:grid-cols-2"
                {
                    div
                    {
                        label for="type" class=(FORM_LABEL_STYLE) { "Type" }

                        select name="type" id="type" required class=(FORM_TEXT_INPUT_STYLE)
                        {
                            option value=(TransactionKind::Income.as_str()) { (TransactionKind::Income.label()) }
                            option value=(TransactionKind::Expense.as_str()) selected { (TransactionKind::Expense.label()) }
                        }
                    }

                    div
                    {
                        label for="amount" class=(FORM_LABEL_STYLE) { "Amount (₦)" }

                        div class="input-wrapper w-full"
                        {
                            input
                                name="amount"
                                id="amount"
                                type="number"
                                min="0"
                                step="0.01"
                                placeholder="0.00"
                                required
                                class=(FORM_TEXT_INPUT_STYLE);
                        }
                    }

                    div
                    {
                        label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                        select name="category" id="category" required class=(FORM_TEXT_INPUT_STYLE)
                        {
                            option value="" { "Select Category" }

                            @for kind in [TransactionKind::Income, TransactionKind::Expense] {
                                optgroup label=(kind.label())
                                {
                                    @for category in categories.iter().filter(|category| category.kind == kind) {
                                        option value=(category.name) { (category.name) }
                                    }
                                }
                            }
                        }
                    }

                    div
                    {
                        label for="date" class=(FORM_LABEL_STYLE) { "Date" }

                        input
                            name="date"
                            id="date"
                            type="date"
                            value=(today)
                            required
                            class=(FORM_TEXT_INPUT_STYLE);
                    }

                    div class="md:col-span-2"
                    {
                        label for="notes" class=(FORM_LABEL_STYLE) { "Notes" }

                        textarea name="notes" id="notes" rows="3" class=(FORM_TEXT_INPUT_STYLE) {}
                    }
                }

                div class="flex justify-end"
                {
                    button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Transaction" }
                }
            }
        }
    }
}
