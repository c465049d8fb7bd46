//! Export of tracker data to JSON files.
//!
//! Two shapes are supported: a bare transaction array for spreadsheet-bound
//! exports, and a full envelope carrying transactions, categories, and
//! settings together with a timestamp and format version. Both shapes are
//! accepted back by [crate::import::parse_import].

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{settings::Settings, transaction::Transaction};

/// The version number written into export envelopes.
pub const EXPORT_VERSION: u32 = 1;

/// A complete snapshot of the tracker's persisted data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportEnvelope {
    /// Every transaction on record.
    pub transactions: Vec<Transaction>,
    /// The category names.
    pub categories: Vec<String>,
    /// The settings record.
    pub settings: Settings,
    /// When the export was produced.
    #[serde(with = "time::serde::rfc3339")]
    pub exported_at: OffsetDateTime,
    /// The envelope format version, currently [EXPORT_VERSION].
    pub version: u32,
}

/// Serialize transactions as a bare pretty-printed JSON array.
///
/// # Errors
/// Returns the underlying serialization error, which for these types only
/// occurs when a timestamp falls outside the RFC 3339 range.
pub fn export_transactions(transactions: &[Transaction]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(transactions)
}

/// Serialize a full export envelope as pretty-printed JSON.
///
/// # Errors
/// Returns the underlying serialization error, which for these types only
/// occurs when a timestamp falls outside the RFC 3339 range.
pub fn export_envelope(
    transactions: &[Transaction],
    categories: &[String],
    settings: &Settings,
    exported_at: OffsetDateTime,
) -> Result<String, serde_json::Error> {
    let envelope = ExportEnvelope {
        transactions: transactions.to_vec(),
        categories: categories.to_vec(),
        settings: settings.clone(),
        exported_at,
        version: EXPORT_VERSION,
    };

    serde_json::to_string_pretty(&envelope)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use time::macros::{date, datetime};

    use crate::import::parse_import;

    use super::*;

    fn create_test_transaction(description: &str, amount: f64) -> Transaction {
        Transaction {
            id: "abc-123".to_owned(),
            description: description.to_owned(),
            amount,
            category: "Food".to_owned(),
            date: date!(2026 - 03 - 14),
            created_at: datetime!(2026-03-14 09:30 UTC),
            updated_at: datetime!(2026-03-14 09:30 UTC),
        }
    }

    #[test]
    fn transactions_export_as_a_bare_array() {
        let transactions = vec![create_test_transaction("Coffee beans", 12.5)];

        let json = export_transactions(&transactions).expect("export should serialize");
        let value: Value = serde_json::from_str(&json).expect("export should be valid JSON");

        let items = value.as_array().expect("export should be an array");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["description"], "Coffee beans");
        assert_eq!(items[0]["amount"], 12.5);
        assert_eq!(items[0]["date"], "2026-03-14");
        assert_eq!(items[0]["createdAt"], "2026-03-14T09:30:00Z");
    }

    #[test]
    fn envelope_carries_every_section_and_a_version() {
        let transactions = vec![create_test_transaction("Coffee beans", 12.5)];
        let categories = vec!["Food".to_owned(), "Transport".to_owned()];
        let settings = Settings::default();

        let json = export_envelope(
            &transactions,
            &categories,
            &settings,
            datetime!(2026-03-14 09:30 UTC),
        )
        .expect("export should serialize");
        let value: Value = serde_json::from_str(&json).expect("export should be valid JSON");

        assert_eq!(value["transactions"].as_array().map(Vec::len), Some(1));
        assert_eq!(value["categories"][1], "Transport");
        assert_eq!(value["settings"]["baseCurrency"], "USD");
        assert_eq!(value["exportedAt"], "2026-03-14T09:30:00Z");
        assert_eq!(value["version"], 1);
    }

    #[test]
    fn exported_envelope_imports_back() {
        let transactions = vec![create_test_transaction("Coffee beans", 12.5)];

        let json = export_envelope(
            &transactions,
            &["Food".to_owned()],
            &Settings::default(),
            datetime!(2026-03-14 09:30 UTC),
        )
        .expect("export should serialize");

        let imported = parse_import(&json, 2026).expect("export should import back");

        assert_eq!(imported.len(), 1);
        assert_eq!(imported[0].id, "abc-123");
        assert_eq!(imported[0].description, "Coffee beans");
        assert_eq!(imported[0].created_at, datetime!(2026-03-14 09:30 UTC));
    }
}
