//! Bulk import of transactions from a JSON payload.
//!
//! [parse_import] turns the text of an import file into a fully validated
//! transaction list. The batch is all-or-nothing: a single bad item rejects
//! the whole payload so a half-imported file can never replace the user's
//! data.

use serde_json::{Map, Value};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::{
    transaction::{Transaction, TransactionDraft},
    validation::validate_draft,
};

/// How many item-level failures an import error lists before summarising
/// the rest as a count.
pub const IMPORT_ERROR_PREVIEW_LIMIT: usize = 5;

/// The ways an import payload can be rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ImportError {
    /// The payload is not valid JSON.
    #[error("The file is not valid JSON: {0}")]
    Json(String),

    /// The payload parsed but does not hold an array of transactions.
    #[error("The file must contain a JSON array of transactions")]
    NotAnArray,

    /// The payload holds an empty array.
    #[error("The file contains no transactions")]
    Empty,

    /// One or more items failed validation, so nothing was imported.
    #[error("{}", failure_summary(.summaries, .remaining))]
    InvalidItems {
        /// Item-level failure summaries, at most
        /// [IMPORT_ERROR_PREVIEW_LIMIT] of them.
        summaries: Vec<String>,
        /// How many further items failed beyond the listed ones.
        remaining: usize,
    },
}

fn failure_summary(summaries: &[String], remaining: &usize) -> String {
    let mut text = summaries.join("; ");

    if *remaining > 0 {
        text.push_str(&format!("; and {remaining} more"));
    }

    text
}

/// Parse and validate an import payload.
///
/// The payload is either a bare JSON array of transaction objects or an
/// export envelope whose `transactions` field holds that array, so exported
/// files can be imported back without editing. Each item must carry
/// `description`, `amount` (number or numeric string), `category`, and
/// `date`; string fields are trimmed and every item runs through the full
/// field validation. Optional `id`, `createdAt`, and `updatedAt` values are
/// kept when well formed and regenerated otherwise.
///
/// # Errors
/// Returns an [ImportError] describing the first structural problem, or
/// [ImportError::InvalidItems] listing up to [IMPORT_ERROR_PREVIEW_LIMIT]
/// item failures when any item is invalid. No items are returned unless
/// every item passed.
pub fn parse_import(json: &str, current_year: i32) -> Result<Vec<Transaction>, ImportError> {
    let root: Value =
        serde_json::from_str(json).map_err(|error| ImportError::Json(error.to_string()))?;

    let items = match &root {
        Value::Array(items) => items.as_slice(),
        Value::Object(fields) => match fields.get("transactions") {
            Some(Value::Array(items)) => items.as_slice(),
            _ => return Err(ImportError::NotAnArray),
        },
        _ => return Err(ImportError::NotAnArray),
    };

    if items.is_empty() {
        return Err(ImportError::Empty);
    }

    let now = OffsetDateTime::now_utc();
    let mut transactions = Vec::with_capacity(items.len());
    let mut summaries = Vec::new();

    for (index, item) in items.iter().enumerate() {
        match parse_item(item, current_year, now) {
            Ok(transaction) => transactions.push(transaction),
            Err(reason) => summaries.push(format!("item {}: {reason}", index + 1)),
        }
    }

    if !summaries.is_empty() {
        let remaining = summaries.len().saturating_sub(IMPORT_ERROR_PREVIEW_LIMIT);
        summaries.truncate(IMPORT_ERROR_PREVIEW_LIMIT);

        return Err(ImportError::InvalidItems {
            summaries,
            remaining,
        });
    }

    Ok(transactions)
}

fn parse_item(
    item: &Value,
    current_year: i32,
    now: OffsetDateTime,
) -> Result<Transaction, String> {
    let Value::Object(fields) = item else {
        return Err("not a JSON object".to_owned());
    };

    let mut missing = Vec::new();
    let description = string_field(fields, "description", &mut missing);
    let amount = amount_field(fields, &mut missing);
    let category = string_field(fields, "category", &mut missing);
    let date = string_field(fields, "date", &mut missing);

    let (Some(description), Some(amount), Some(category), Some(date)) =
        (description, amount, category, date)
    else {
        return Err(format!("missing {}", missing.join(", ")));
    };

    let draft = TransactionDraft {
        description,
        amount,
        category,
        date,
    };
    let validated = validate_draft(&draft, current_year).map_err(|errors| errors.to_string())?;

    let mut transaction = Transaction::from_validated(validated, now);

    if let Some(Value::String(id)) = fields.get("id") {
        let id = id.trim();

        if !id.is_empty() {
            transaction.id = id.to_owned();
        }
    }

    if let Some(created_at) = timestamp_field(fields, "createdAt") {
        transaction.created_at = created_at;
    }

    if let Some(updated_at) = timestamp_field(fields, "updatedAt") {
        transaction.updated_at = updated_at;
    }

    Ok(transaction)
}

fn string_field(
    fields: &Map<String, Value>,
    name: &'static str,
    missing: &mut Vec<&'static str>,
) -> Option<String> {
    match fields.get(name) {
        Some(Value::String(text)) => Some(text.trim().to_owned()),
        _ => {
            missing.push(name);
            None
        }
    }
}

// Amounts arrive as either JSON numbers or numeric strings; both go
// through the amount validator as text.
fn amount_field(fields: &Map<String, Value>, missing: &mut Vec<&'static str>) -> Option<String> {
    match fields.get("amount") {
        Some(Value::String(text)) => Some(text.trim().to_owned()),
        Some(Value::Number(number)) => Some(number.to_string()),
        _ => {
            missing.push("amount");
            None
        }
    }
}

fn timestamp_field(fields: &Map<String, Value>, name: &str) -> Option<OffsetDateTime> {
    match fields.get(name) {
        Some(Value::String(text)) => OffsetDateTime::parse(text, &Rfc3339).ok(),
        _ => None,
    }
}
