//! Filtering, searching, and ordering of the transaction list.

use std::cmp::Ordering;

use crate::search::SearchMatcher;

use super::core::Transaction;

/// The column the transaction list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Order by calendar date.
    #[default]
    Date,
    /// Order by description, ignoring case.
    Description,
    /// Order by amount.
    Amount,
}

/// The direction the transaction list is ordered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Sort in order of increasing value.
    Ascending,
    /// Sort in order of decreasing value.
    #[default]
    Descending,
}

/// Whether a record matches the search pattern in any user-visible field:
/// the description, the category, the amount's display string, or the
/// date's `YYYY-MM-DD` string.
pub fn matches_search(transaction: &Transaction, matcher: &SearchMatcher) -> bool {
    matcher.is_match(&transaction.description)
        || matcher.is_match(&transaction.category)
        || matcher.is_match(&transaction.amount_string())
        || matcher.is_match(&transaction.date_string())
}

/// Apply the category filter, the search filter, and the active sort.
///
/// The category filter is an exact, case-sensitive match; the search filter
/// is [matches_search]. Sorting is stable, so records that compare equal
/// keep their existing relative order, in both directions.
pub fn filter_and_sort(
    transactions: &[Transaction],
    category: Option<&str>,
    matcher: Option<&SearchMatcher>,
    field: SortField,
    direction: SortDirection,
) -> Vec<Transaction> {
    let mut visible: Vec<Transaction> = transactions
        .iter()
        .filter(|transaction| category.is_none_or(|name| transaction.category == name))
        .filter(|transaction| matcher.is_none_or(|matcher| matches_search(transaction, matcher)))
        .cloned()
        .collect();

    visible.sort_by(|a, b| compare(a, b, field, direction));

    visible
}

fn compare(
    a: &Transaction,
    b: &Transaction,
    field: SortField,
    direction: SortDirection,
) -> Ordering {
    let ordering = match field {
        SortField::Date => a.date.cmp(&b.date),
        SortField::Description => a
            .description
            .to_lowercase()
            .cmp(&b.description.to_lowercase()),
        SortField::Amount => a.amount.total_cmp(&b.amount),
    };

    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use time::{
        Date,
        macros::{date, datetime},
    };

    use crate::search::compile_pattern;

    use super::*;

    fn create_test_transaction(
        description: &str,
        amount: f64,
        category: &str,
        date: Date,
    ) -> Transaction {
        Transaction {
            id: format!("id-{description}"),
            description: description.to_owned(),
            amount,
            category: category.to_owned(),
            date,
            created_at: datetime!(2026-01-01 00:00 UTC),
            updated_at: datetime!(2026-01-01 00:00 UTC),
        }
    }

    fn sample_transactions() -> Vec<Transaction> {
        vec![
            create_test_transaction("Groceries", 42.5, "Food", date!(2026 - 03 - 10)),
            create_test_transaction("Bus ticket", 2.5, "Transport", date!(2026 - 03 - 12)),
            create_test_transaction("Cinema", 15.0, "Entertainment", date!(2026 - 03 - 11)),
            create_test_transaction("apples", 5.0, "Food", date!(2026 - 03 - 12)),
        ]
    }

    fn descriptions(transactions: &[Transaction]) -> Vec<&str> {
        transactions
            .iter()
            .map(|transaction| transaction.description.as_str())
            .collect()
    }

    #[test]
    fn no_filters_returns_every_transaction_sorted() {
        let got = filter_and_sort(
            &sample_transactions(),
            None,
            None,
            SortField::Date,
            SortDirection::Ascending,
        );

        assert_eq!(
            descriptions(&got),
            vec!["Groceries", "Cinema", "Bus ticket", "apples"]
        );
    }

    #[test]
    fn category_filter_is_exact_and_case_sensitive() {
        let transactions = sample_transactions();

        let got = filter_and_sort(
            &transactions,
            Some("Food"),
            None,
            SortField::Date,
            SortDirection::Ascending,
        );
        assert_eq!(descriptions(&got), vec!["Groceries", "apples"]);

        let got = filter_and_sort(
            &transactions,
            Some("food"),
            None,
            SortField::Date,
            SortDirection::Ascending,
        );
        assert!(got.is_empty(), "lowercase category should match nothing");
    }

    #[test]
    fn search_matches_description_category_amount_and_date() {
        let transactions = sample_transactions();

        for (pattern, want) in [
            ("cinema", vec!["Cinema"]),
            ("Transport", vec!["Bus ticket"]),
            ("42.5", vec!["Groceries"]),
            ("2026-03-12", vec!["Bus ticket", "apples"]),
        ] {
            let matcher = compile_pattern(pattern, false)
                .expect("pattern should compile")
                .expect("pattern should yield a matcher");

            let got = filter_and_sort(
                &transactions,
                None,
                Some(&matcher),
                SortField::Date,
                SortDirection::Ascending,
            );

            assert_eq!(descriptions(&got), want, "pattern {pattern:?}");
        }
    }

    #[test]
    fn category_and_search_filters_combine() {
        let transactions = sample_transactions();
        let matcher = compile_pattern("2026-03-12", false)
            .expect("pattern should compile")
            .expect("pattern should yield a matcher");

        let got = filter_and_sort(
            &transactions,
            Some("Food"),
            Some(&matcher),
            SortField::Date,
            SortDirection::Ascending,
        );

        assert_eq!(descriptions(&got), vec!["apples"]);
    }

    #[test]
    fn filtering_an_already_filtered_list_changes_nothing() {
        let matcher = compile_pattern("s", false)
            .expect("pattern should compile")
            .expect("pattern should yield a matcher");

        let once = filter_and_sort(
            &sample_transactions(),
            Some("Food"),
            Some(&matcher),
            SortField::Amount,
            SortDirection::Descending,
        );
        let twice = filter_and_sort(
            &once,
            Some("Food"),
            Some(&matcher),
            SortField::Amount,
            SortDirection::Descending,
        );

        assert_eq!(once, twice);
    }

    #[test]
    fn description_sort_ignores_case() {
        let got = filter_and_sort(
            &sample_transactions(),
            None,
            None,
            SortField::Description,
            SortDirection::Ascending,
        );

        assert_eq!(
            descriptions(&got),
            vec!["apples", "Bus ticket", "Cinema", "Groceries"]
        );
    }

    #[test]
    fn amount_sort_descending() {
        let got = filter_and_sort(
            &sample_transactions(),
            None,
            None,
            SortField::Amount,
            SortDirection::Descending,
        );

        assert_eq!(
            descriptions(&got),
            vec!["Groceries", "Cinema", "apples", "Bus ticket"]
        );
    }

    #[test]
    fn tied_records_keep_their_relative_order() {
        let transactions = sample_transactions();

        // "Bus ticket" and "apples" share 2026-03-12 and must stay in list
        // order whichever direction is used.
        let ascending = filter_and_sort(
            &transactions,
            None,
            None,
            SortField::Date,
            SortDirection::Ascending,
        );
        assert_eq!(
            descriptions(&ascending),
            vec!["Groceries", "Cinema", "Bus ticket", "apples"]
        );

        let descending = filter_and_sort(
            &transactions,
            None,
            None,
            SortField::Date,
            SortDirection::Descending,
        );
        assert_eq!(
            descriptions(&descending),
            vec!["Bus ticket", "apples", "Cinema", "Groceries"]
        );
    }
}
