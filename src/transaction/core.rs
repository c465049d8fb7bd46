//! Defines the core transaction record and its wire format.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::validation::NewTransaction;

// ============================================================================
// MODELS
// ============================================================================

/// The unique identifier of a transaction.
///
/// Records created here use UUID v4 strings; imported records may carry any
/// id, which is preserved as-is.
pub type TransactionId = String;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// A single spending record.
///
/// The wire form uses camelCase keys, a `YYYY-MM-DD` date string, and
/// RFC 3339 timestamps:
///
/// ```json
/// {
///   "id": "8a9f04f6-6a2b-4f3c-9c0d-53d7a1c2ab1e",
///   "description": "Groceries at the market",
///   "amount": 42.5,
///   "category": "Food",
///   "date": "2026-03-14",
///   "createdAt": "2026-03-14T09:30:00Z",
///   "updatedAt": "2026-03-14T09:30:00Z"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The unique ID of the record.
    pub id: TransactionId,
    /// A text description of what the money was spent on.
    pub description: String,
    /// The amount spent, always non-negative.
    pub amount: f64,
    /// The category the spending belongs to.
    pub category: String,
    /// The calendar date the spending happened.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// When the record was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the record was last changed.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Transaction {
    /// Create a record from validated fields, generating a fresh id and
    /// setting both timestamps to `now`.
    pub fn from_validated(fields: NewTransaction, now: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            description: fields.description,
            amount: fields.amount,
            category: fields.category,
            date: fields.date,
            created_at: now,
            updated_at: now,
        }
    }

    /// The record's user-entered fields in form shape, ready for patching
    /// and re-validation.
    pub fn to_draft(&self) -> TransactionDraft {
        TransactionDraft {
            description: self.description.clone(),
            amount: self.amount_string(),
            category: self.category.clone(),
            date: self.date_string(),
        }
    }

    /// The amount as its plain display string, e.g. "12.5".
    ///
    /// This is the string search patterns are matched against.
    pub fn amount_string(&self) -> String {
        self.amount.to_string()
    }

    /// The date as its `YYYY-MM-DD` wire string.
    pub fn date_string(&self) -> String {
        self.date.to_string()
    }
}

/// The raw transaction form fields prior to validation.
///
/// Values are kept exactly as entered;
/// [validate_draft](crate::validation::validate_draft) turns a draft into
/// typed values or a per-field error report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionDraft {
    /// The free-text description, e.g. "Groceries at the market".
    pub description: String,
    /// The amount as entered, e.g. "12.50".
    pub amount: String,
    /// The category name, e.g. "Food".
    pub category: String,
    /// The date as entered, e.g. "2026-03-14".
    pub date: String,
}

/// A partial change to a transaction's user-entered fields.
///
/// Unset fields keep their current values. Values are raw form strings; the
/// merged whole is re-validated before anything is stored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransactionPatch {
    /// Replace the description.
    pub description: Option<String>,
    /// Replace the amount string.
    pub amount: Option<String>,
    /// Replace the category.
    pub category: Option<String>,
    /// Replace the date string.
    pub date: Option<String>,
}

impl TransactionPatch {
    /// Merge this patch over a record's current fields, producing the draft
    /// to re-validate.
    pub fn merged_over(&self, transaction: &Transaction) -> TransactionDraft {
        let mut draft = transaction.to_draft();

        if let Some(description) = &self.description {
            draft.description = description.clone();
        }

        if let Some(amount) = &self.amount {
            draft.amount = amount.clone();
        }

        if let Some(category) = &self.category {
            draft.category = category.clone();
        }

        if let Some(date) = &self.date {
            draft.date = date.clone();
        }

        draft
    }
}
