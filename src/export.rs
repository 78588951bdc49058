//! Downloading every transaction as a JSON file.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};

use crate::{AppState, Error, ledger::Ledger, transaction::Transaction};

/// The name the browser saves the export as.
pub const EXPORT_FILE_NAME: &str = "finance-tracker-data.json";

/// The state needed to export transactions.
#[derive(Debug, Clone)]
pub struct ExportState {
    pub ledger: Arc<Mutex<Ledger>>,
}

impl FromRef<AppState> for ExportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            ledger: state.ledger.clone(),
        }
    }
}

/// Serialize `transactions` as pretty-printed JSON, using the same record
/// shape as storage.
///
/// # Errors
/// Returns [Error::JSONSerializationError] if serialization fails.
pub fn export_transactions(transactions: &[Transaction]) -> Result<String, Error> {
    serde_json::to_string_pretty(transactions)
        .map_err(|error| Error::JSONSerializationError(error.to_string()))
}

/// A route handler that responds with all transactions as a JSON attachment.
///
/// Categories are not included.
pub async fn get_export(State(state): State<ExportState>) -> Result<Response, Error> {
    let json = {
        let ledger = state.ledger.lock().map_err(|error| {
            tracing::error!("could not acquire ledger lock: {error}");
            Error::DatabaseLockError
        })?;

        export_transactions(ledger.transactions())?
    };

    tracing::info!("Exporting transactions as {EXPORT_FILE_NAME}");

    Ok((
        [
            (CONTENT_TYPE, "application/json".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        json,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use axum::{extract::State, http::StatusCode};
    use time::macros::date;

    use crate::{
        export::{ExportState, export_transactions, get_export},
        record_id::RecordId,
        test_utils::{get_header, get_test_ledger},
        transaction::{Transaction, TransactionKind},
    };

    #[test]
    fn exports_pretty_printed_records() {
        let transactions = [Transaction::build(
            TransactionKind::Expense,
            1500.0,
            "Food",
            date!(2024 - 01 - 12),
        )
        .notes("")
        .finalize(RecordId::new("1705017600000"))
        .unwrap()];

        let got = export_transactions(&transactions).unwrap();

        assert_eq!(
            got,
            r#"[
  {
    "id": "1705017600000",
    "type": "expense",
    "amount": 1500.0,
    "category": "Food",
    "date": "2024-01-12",
    "notes": ""
  }
]"#
        );
    }

    #[test]
    fn exports_empty_list() {
        assert_eq!(export_transactions(&[]).unwrap(), "[]");
    }

    #[tokio::test]
    async fn responds_with_attachment() {
        let ledger = get_test_ledger();
        ledger
            .lock()
            .unwrap()
            .add_transaction(Transaction::build(
                TransactionKind::Income,
                5000.0,
                "Salary",
                date!(2024 - 01 - 10),
            ))
            .unwrap();

        let response = get_export(State(ExportState { ledger })).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(get_header(&response, "content-type"), "application/json");
        assert_eq!(
            get_header(&response, "content-disposition"),
            "attachment; filename=\"finance-tracker-data.json\""
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let exported: Vec<Transaction> = serde_json::from_slice(&body).unwrap();
        assert_eq!(exported.len(), 1);
        assert_eq!(exported[0].category, "Salary");
    }
}
