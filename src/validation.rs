//! Field validation for user-entered tracker data.
//!
//! Validators are pure functions over raw input strings. Each returns a
//! typed value on success so callers never re-parse, and a [ValidationError]
//! whose display text is suitable for showing next to the offending form
//! field. [validate_draft] runs all four transaction validators and collects
//! every failure into a per-field report.

use std::{collections::BTreeMap, fmt, sync::OnceLock};

use regex::Regex;
use time::{Date, Month, OffsetDateTime};
use unicode_segmentation::UnicodeSegmentation;

use crate::transaction::TransactionDraft;

/// The minimum description length in grapheme clusters.
pub const DESCRIPTION_MIN_GRAPHEMES: usize = 2;

/// The maximum description length in grapheme clusters.
pub const DESCRIPTION_MAX_GRAPHEMES: usize = 200;

/// The minimum category name length in grapheme clusters.
pub const CATEGORY_MIN_GRAPHEMES: usize = 2;

/// The maximum category name length in grapheme clusters.
pub const CATEGORY_MAX_GRAPHEMES: usize = 50;

/// The largest amount a single transaction may carry.
pub const AMOUNT_MAX: f64 = 999_999.99;

/// The largest accepted exchange rate.
pub const RATE_MAX: f64 = 1000.0;

/// The earliest transaction year the tracker accepts.
pub const YEAR_MIN: i32 = 2000;

/// How many years past the current year a transaction date may lie.
pub const YEAR_FUTURE_ALLOWANCE: i32 = 10;

/// The form fields a validation error can attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    /// The free-text description.
    Description,
    /// The amount string.
    Amount,
    /// The category name.
    Category,
    /// The calendar date string.
    Date,
    /// The exchange rate string.
    Rate,
}

impl Field {
    /// The lowercase field name used to key error maps, e.g. "description".
    pub fn name(self) -> &'static str {
        match self {
            Field::Description => "description",
            Field::Amount => "amount",
            Field::Category => "category",
            Field::Date => "date",
            Field::Rate => "rate",
        }
    }

    /// The capitalized label used in error messages, e.g. "Description".
    pub fn label(self) -> &'static str {
        match self {
            Field::Description => "Description",
            Field::Amount => "Amount",
            Field::Category => "Category",
            Field::Date => "Date",
            Field::Rate => "Exchange rate",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The reasons a single field value can be rejected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The field was empty.
    #[error("{} is required", .0.label())]
    Required(Field),

    /// The description does not equal its own trimmed form.
    #[error("Description cannot start or end with a space")]
    EdgeWhitespace,

    /// The description contains a run of two or more whitespace characters.
    #[error("Description cannot contain consecutive spaces")]
    RepeatedWhitespace,

    /// The description is too short or too long.
    #[error(
        "Description must be between {DESCRIPTION_MIN_GRAPHEMES} and \
         {DESCRIPTION_MAX_GRAPHEMES} characters"
    )]
    DescriptionLength,

    /// The same word appears twice in a row, ignoring case.
    #[error("Description repeats the word \"{0}\"")]
    RepeatedWord(String),

    /// The description does not start and end with a letter.
    #[error("Description must start and end with a letter")]
    DescriptionShape,

    /// The amount is not zero or a non-zero-leading number with at most two
    /// decimal digits.
    #[error("Amount must be a number with up to 2 decimal places and no leading zeros")]
    AmountFormat,

    /// The amount falls outside the accepted range.
    #[error("Amount must be between 0 and {AMOUNT_MAX}")]
    AmountRange,

    /// The date does not match the YYYY-MM-DD shape.
    #[error("Date must use the YYYY-MM-DD format")]
    DateFormat,

    /// The date components do not form a real calendar date.
    #[error("Date must be a real calendar date")]
    InvalidDate,

    /// The date's year falls outside the accepted window.
    #[error("Year must be between {min} and {max}")]
    YearOutOfRange {
        /// The earliest accepted year.
        min: i32,
        /// The latest accepted year.
        max: i32,
    },

    /// The category name is too short or too long.
    #[error(
        "Category must be between {CATEGORY_MIN_GRAPHEMES} and \
         {CATEGORY_MAX_GRAPHEMES} characters"
    )]
    CategoryLength,

    /// The category name contains anything other than letters separated by
    /// single spaces or hyphens.
    #[error("Category may only contain letters separated by single spaces or hyphens")]
    CategoryFormat,

    /// The exchange rate is not a plain non-negative number.
    #[error("Exchange rate must be a number greater than 0")]
    RateFormat,

    /// The exchange rate falls outside the accepted range.
    #[error("Exchange rate must be greater than 0 and at most {RATE_MAX}")]
    RateRange,

    /// The budget cap is not a non-negative amount.
    #[error("Budget cap must be a number with up to 2 decimal places and no leading zeros")]
    BudgetCapFormat,
}

/// The typed fields of a transaction that passed validation, ready to be
/// stored as a record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The validated description.
    pub description: String,
    /// The parsed amount.
    pub amount: f64,
    /// The validated category name.
    pub category: String,
    /// The parsed calendar date.
    pub date: Date,
}

/// The validation failures for a transaction draft, keyed by field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionErrors {
    errors: BTreeMap<Field, ValidationError>,
}

impl TransactionErrors {
    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// The number of fields that failed.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// The error recorded for `field`, if any.
    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    /// Iterate the failures in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    fn insert(&mut self, field: Field, error: ValidationError) {
        self.errors.insert(field, error);
    }
}

impl fmt::Display for TransactionErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, error) in self.iter() {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{field}: {error}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for TransactionErrors {}

fn description_shape() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^[A-Za-z].*[A-Za-z]$").unwrap())
}

// The numeric shapes spell out [0-9]: a Unicode-aware \d also matches
// other scripts' decimal digits.
fn amount_shape() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^(0|[1-9][0-9]*)(\.[0-9]{1,2})?$").unwrap())
}

fn date_shape() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$").unwrap())
}

fn category_shape() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new("^[A-Za-z]+(?:[ -][A-Za-z]+)*$").unwrap())
}

fn rate_shape() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").unwrap())
}

/// Check a transaction description.
///
/// Rules, in the order they are reported: required; no leading or trailing
/// whitespace; no run of consecutive whitespace; 2 to 200 characters
/// (grapheme clusters); no word immediately repeated ignoring case; must
/// start and end with a letter.
///
/// # Errors
/// Returns the first rule the value breaks.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.is_empty() {
        return Err(ValidationError::Required(Field::Description));
    }

    if description.trim() != description {
        return Err(ValidationError::EdgeWhitespace);
    }

    if has_whitespace_run(description) {
        return Err(ValidationError::RepeatedWhitespace);
    }

    let length = description.graphemes(true).count();
    if !(DESCRIPTION_MIN_GRAPHEMES..=DESCRIPTION_MAX_GRAPHEMES).contains(&length) {
        return Err(ValidationError::DescriptionLength);
    }

    if let Some(word) = repeated_word(description) {
        return Err(ValidationError::RepeatedWord(word));
    }

    if !description_shape().is_match(description) {
        return Err(ValidationError::DescriptionShape);
    }

    Ok(())
}

fn has_whitespace_run(text: &str) -> bool {
    let mut previous_was_whitespace = false;

    for character in text.chars() {
        let is_whitespace = character.is_whitespace();

        if is_whitespace && previous_was_whitespace {
            return true;
        }

        previous_was_whitespace = is_whitespace;
    }

    false
}

fn repeated_word(text: &str) -> Option<String> {
    let mut words = text.split_whitespace();
    let mut previous = words.next()?;

    for word in words {
        if word.to_lowercase() == previous.to_lowercase() {
            return Some(word.to_owned());
        }

        previous = word;
    }

    None
}

/// Check an amount string and parse it.
///
/// Accepts zero, or an integer with no leading zero optionally followed by
/// one or two decimal digits, up to [AMOUNT_MAX].
///
/// # Errors
/// Returns [ValidationError::AmountFormat] for a malformed number and
/// [ValidationError::AmountRange] for a well-formed number that is too
/// large.
pub fn validate_amount(amount: &str) -> Result<f64, ValidationError> {
    if amount.is_empty() {
        return Err(ValidationError::Required(Field::Amount));
    }

    if !amount_shape().is_match(amount) {
        return Err(ValidationError::AmountFormat);
    }

    let value: f64 = amount.parse().map_err(|_| ValidationError::AmountFormat)?;

    if value > AMOUNT_MAX {
        return Err(ValidationError::AmountRange);
    }

    Ok(value)
}

/// Check a date string against today's UTC year.
///
/// # Errors
/// See [validate_date_in_year].
pub fn validate_date(date: &str) -> Result<Date, ValidationError> {
    validate_date_in_year(date, OffsetDateTime::now_utc().year())
}

/// Check a date string against a caller-supplied current year and parse it.
///
/// The value must use the YYYY-MM-DD shape with month 01 to 12 and day 01 to
/// 31, name a real calendar date (leap years honored), and carry a year
/// between [YEAR_MIN] and `current_year` + [YEAR_FUTURE_ALLOWANCE].
///
/// # Errors
/// Returns the first rule the value breaks, in the order above.
pub fn validate_date_in_year(date: &str, current_year: i32) -> Result<Date, ValidationError> {
    if date.is_empty() {
        return Err(ValidationError::Required(Field::Date));
    }

    if !date_shape().is_match(date) {
        return Err(ValidationError::DateFormat);
    }

    // The shape check restricts the value to ASCII, so these byte offsets
    // fall on character boundaries.
    let year: i32 = date[..4].parse().map_err(|_| ValidationError::DateFormat)?;
    let month: u8 = date[5..7].parse().map_err(|_| ValidationError::DateFormat)?;
    let day: u8 = date[8..].parse().map_err(|_| ValidationError::DateFormat)?;

    let month = Month::try_from(month).map_err(|_| ValidationError::InvalidDate)?;
    let parsed =
        Date::from_calendar_date(year, month, day).map_err(|_| ValidationError::InvalidDate)?;

    let max_year = current_year + YEAR_FUTURE_ALLOWANCE;
    if !(YEAR_MIN..=max_year).contains(&year) {
        return Err(ValidationError::YearOutOfRange {
            min: YEAR_MIN,
            max: max_year,
        });
    }

    Ok(parsed)
}

/// Check a category name.
///
/// Names are 2 to 50 characters (grapheme clusters) of letters, with single
/// spaces or hyphens between letter groups.
///
/// # Errors
/// Returns the first rule the value breaks.
pub fn validate_category(category: &str) -> Result<(), ValidationError> {
    if category.is_empty() {
        return Err(ValidationError::Required(Field::Category));
    }

    let length = category.graphemes(true).count();
    if !(CATEGORY_MIN_GRAPHEMES..=CATEGORY_MAX_GRAPHEMES).contains(&length) {
        return Err(ValidationError::CategoryLength);
    }

    if !category_shape().is_match(category) {
        return Err(ValidationError::CategoryFormat);
    }

    Ok(())
}

/// Check an exchange-rate string and parse it.
///
/// Rates are plain decimal numbers with any number of decimal digits,
/// strictly greater than 0 and at most [RATE_MAX].
///
/// # Errors
/// Returns [ValidationError::RateFormat] for a malformed number and
/// [ValidationError::RateRange] for a value outside the accepted range.
/// An empty value is reported as required.
pub fn validate_exchange_rate(rate: &str) -> Result<f64, ValidationError> {
    if rate.is_empty() {
        return Err(ValidationError::Required(Field::Rate));
    }

    if !rate_shape().is_match(rate) {
        return Err(ValidationError::RateFormat);
    }

    let value: f64 = rate.parse().map_err(|_| ValidationError::RateFormat)?;

    if value <= 0.0 || value > RATE_MAX {
        return Err(ValidationError::RateRange);
    }

    Ok(value)
}

/// Check a budget-cap string and parse it.
///
/// An empty value is valid and means no cap. A present value uses the same
/// shape as an amount and must be non-negative.
///
/// # Errors
/// Returns [ValidationError::BudgetCapFormat] for a malformed number.
pub fn validate_budget_cap(cap: &str) -> Result<Option<f64>, ValidationError> {
    if cap.is_empty() {
        return Ok(None);
    }

    if !amount_shape().is_match(cap) {
        return Err(ValidationError::BudgetCapFormat);
    }

    let value: f64 = cap.parse().map_err(|_| ValidationError::BudgetCapFormat)?;

    Ok(Some(value))
}

/// Run every field validator over a draft.
///
/// All failures are collected so a form can mark every offending field at
/// once rather than revealing one error per submission.
///
/// # Errors
/// Returns the per-field report when any validator rejects its value.
pub fn validate_draft(
    draft: &TransactionDraft,
    current_year: i32,
) -> Result<NewTransaction, TransactionErrors> {
    let mut errors = TransactionErrors::default();

    if let Err(error) = validate_description(&draft.description) {
        errors.insert(Field::Description, error);
    }

    let amount = match validate_amount(&draft.amount) {
        Ok(amount) => Some(amount),
        Err(error) => {
            errors.insert(Field::Amount, error);
            None
        }
    };

    if let Err(error) = validate_category(&draft.category) {
        errors.insert(Field::Category, error);
    }

    let date = match validate_date_in_year(&draft.date, current_year) {
        Ok(date) => Some(date),
        Err(error) => {
            errors.insert(Field::Date, error);
            None
        }
    };

    match (amount, date) {
        (Some(amount), Some(date)) if errors.is_empty() => Ok(NewTransaction {
            description: draft.description.clone(),
            amount,
            category: draft.category.clone(),
            date,
        }),
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    const CURRENT_YEAR: i32 = 2026;

    fn valid_draft() -> TransactionDraft {
        TransactionDraft {
            description: "Groceries at the market".to_owned(),
            amount: "42.50".to_owned(),
            category: "Food".to_owned(),
            date: "2026-03-14".to_owned(),
        }
    }

    #[test]
    fn accepts_well_formed_description() {
        assert_eq!(validate_description("Coffee beans"), Ok(()));
        assert_eq!(validate_description("Top-up for bus card"), Ok(()));
    }

    #[test]
    fn rejects_empty_description() {
        assert_eq!(
            validate_description(""),
            Err(ValidationError::Required(Field::Description))
        );
    }

    #[test]
    fn reports_edge_whitespace_before_shape() {
        // " 7" also fails the letter shape, but the whitespace error must win.
        assert_eq!(
            validate_description(" 7"),
            Err(ValidationError::EdgeWhitespace)
        );
        assert_eq!(
            validate_description("Coffee "),
            Err(ValidationError::EdgeWhitespace)
        );
    }

    #[test]
    fn rejects_consecutive_whitespace_in_description() {
        assert_eq!(
            validate_description("Coffee  beans"),
            Err(ValidationError::RepeatedWhitespace)
        );
    }

    #[test]
    fn rejects_description_outside_length_bounds() {
        assert_eq!(
            validate_description("a"),
            Err(ValidationError::DescriptionLength)
        );

        let too_long = "a".repeat(201);
        assert_eq!(
            validate_description(&too_long),
            Err(ValidationError::DescriptionLength)
        );

        let just_right = "a".repeat(200);
        assert_eq!(validate_description(&just_right), Ok(()));
    }

    #[test]
    fn rejects_repeated_words_ignoring_case() {
        assert_eq!(
            validate_description("the the cat"),
            Err(ValidationError::RepeatedWord("the".to_owned()))
        );
        assert_eq!(
            validate_description("Paid PAID invoice"),
            Err(ValidationError::RepeatedWord("PAID".to_owned()))
        );
        // The same word twice, but not adjacent, is fine.
        assert_eq!(validate_description("the cat and the dog"), Ok(()));
    }

    #[test]
    fn rejects_description_not_bounded_by_letters() {
        assert_eq!(
            validate_description("7-Eleven snacks"),
            Err(ValidationError::DescriptionShape)
        );
        assert_eq!(
            validate_description("Lunch 22"),
            Err(ValidationError::DescriptionShape)
        );
    }

    #[test]
    fn accepts_well_formed_amounts() {
        assert_eq!(validate_amount("0"), Ok(0.0));
        assert_eq!(validate_amount("12.5"), Ok(12.5));
        assert_eq!(validate_amount("12.50"), Ok(12.5));
        assert_eq!(validate_amount("999999.99"), Ok(999_999.99));
    }

    #[test]
    fn rejects_malformed_amounts() {
        for input in ["01", ".50", "12.999", "-5", "1,000", "1２", "five"] {
            assert_eq!(
                validate_amount(input),
                Err(ValidationError::AmountFormat),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_empty_amount() {
        assert_eq!(
            validate_amount(""),
            Err(ValidationError::Required(Field::Amount))
        );
    }

    #[test]
    fn rejects_amount_above_maximum() {
        assert_eq!(
            validate_amount("1000000"),
            Err(ValidationError::AmountRange)
        );
    }

    #[test]
    fn accepts_real_calendar_dates() {
        assert_eq!(
            validate_date_in_year("2026-03-14", CURRENT_YEAR),
            Ok(date!(2026 - 03 - 14))
        );
        // 2024 is a leap year.
        assert_eq!(
            validate_date_in_year("2024-02-29", CURRENT_YEAR),
            Ok(date!(2024 - 02 - 29))
        );
    }

    #[test]
    fn rejects_malformed_date_shapes() {
        for input in ["2026-1-5", "14-03-2026", "2026/03/14", "2026-13-01", "2026-00-10"] {
            assert_eq!(
                validate_date_in_year(input, CURRENT_YEAR),
                Err(ValidationError::DateFormat),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_dates_written_with_non_ascii_digits() {
        // Fullwidth and Devanagari digits are multi-byte, so the shape
        // check must refuse them before the components are sliced out by
        // byte offset.
        for input in ["２０２６-０３-１４", "२०२६-03-14", "2026-03-1４"] {
            assert_eq!(
                validate_date_in_year(input, CURRENT_YEAR),
                Err(ValidationError::DateFormat),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_impossible_calendar_dates() {
        assert_eq!(
            validate_date_in_year("2025-02-29", CURRENT_YEAR),
            Err(ValidationError::InvalidDate)
        );
        assert_eq!(
            validate_date_in_year("2026-04-31", CURRENT_YEAR),
            Err(ValidationError::InvalidDate)
        );
    }

    #[test]
    fn rejects_years_outside_the_accepted_window() {
        let want = Err(ValidationError::YearOutOfRange {
            min: 2000,
            max: 2036,
        });

        assert_eq!(validate_date_in_year("1999-12-31", CURRENT_YEAR), want);
        assert_eq!(validate_date_in_year("2037-01-01", CURRENT_YEAR), want);
        assert_eq!(
            validate_date_in_year("2036-12-31", CURRENT_YEAR),
            Ok(date!(2036 - 12 - 31))
        );
    }

    #[test]
    fn accepts_well_formed_categories() {
        assert_eq!(validate_category("Food"), Ok(()));
        assert_eq!(validate_category("Dining Out"), Ok(()));
        assert_eq!(validate_category("Co-working Space"), Ok(()));
    }

    #[test]
    fn rejects_malformed_categories() {
        for input in ["Food7", "Dining  Out", " Food", "Food-", "Caf!"] {
            assert_eq!(
                validate_category(input),
                Err(ValidationError::CategoryFormat),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_categories_outside_length_bounds() {
        assert_eq!(validate_category("A"), Err(ValidationError::CategoryLength));

        let too_long = "a".repeat(51);
        assert_eq!(
            validate_category(&too_long),
            Err(ValidationError::CategoryLength)
        );
    }

    #[test]
    fn rejects_empty_category() {
        assert_eq!(
            validate_category(""),
            Err(ValidationError::Required(Field::Category))
        );
    }

    #[test]
    fn accepts_exchange_rates_in_range() {
        assert_eq!(validate_exchange_rate("1.5"), Ok(1.5));
        assert_eq!(validate_exchange_rate("0.0001"), Ok(0.0001));
        assert_eq!(validate_exchange_rate("1000"), Ok(1000.0));
        // Leading zeros are tolerated for rates, unlike amounts.
        assert_eq!(validate_exchange_rate("007"), Ok(7.0));
    }

    #[test]
    fn rejects_exchange_rates_outside_range() {
        assert_eq!(validate_exchange_rate("0"), Err(ValidationError::RateRange));
        assert_eq!(
            validate_exchange_rate("1000.01"),
            Err(ValidationError::RateRange)
        );
    }

    #[test]
    fn rejects_malformed_exchange_rates() {
        for input in ["-1", ".5", "1e3", "１.5", "abc"] {
            assert_eq!(
                validate_exchange_rate(input),
                Err(ValidationError::RateFormat),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_empty_exchange_rate() {
        assert_eq!(
            validate_exchange_rate(""),
            Err(ValidationError::Required(Field::Rate))
        );
    }

    #[test]
    fn empty_budget_cap_means_no_cap() {
        assert_eq!(validate_budget_cap(""), Ok(None));
    }

    #[test]
    fn budget_cap_uses_the_amount_shape() {
        assert_eq!(validate_budget_cap("50"), Ok(Some(50.0)));
        assert_eq!(validate_budget_cap("50.25"), Ok(Some(50.25)));
        assert_eq!(
            validate_budget_cap("01"),
            Err(ValidationError::BudgetCapFormat)
        );
        assert_eq!(
            validate_budget_cap("-1"),
            Err(ValidationError::BudgetCapFormat)
        );
    }

    #[test]
    fn valid_draft_produces_typed_fields() {
        let got = validate_draft(&valid_draft(), CURRENT_YEAR).expect("draft should be valid");

        let want = NewTransaction {
            description: "Groceries at the market".to_owned(),
            amount: 42.5,
            category: "Food".to_owned(),
            date: date!(2026 - 03 - 14),
        };
        assert_eq!(got, want);
    }

    #[test]
    fn invalid_draft_collects_an_error_per_field() {
        let draft = TransactionDraft {
            description: " x".to_owned(),
            amount: "12.999".to_owned(),
            category: "F".to_owned(),
            date: "2026-02-30".to_owned(),
        };

        let errors = validate_draft(&draft, CURRENT_YEAR).expect_err("draft should be rejected");

        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.get(Field::Description),
            Some(&ValidationError::EdgeWhitespace)
        );
        assert_eq!(
            errors.get(Field::Amount),
            Some(&ValidationError::AmountFormat)
        );
        assert_eq!(
            errors.get(Field::Category),
            Some(&ValidationError::CategoryLength)
        );
        assert_eq!(errors.get(Field::Date), Some(&ValidationError::InvalidDate));
    }

    #[test]
    fn error_report_displays_field_names() {
        let draft = TransactionDraft {
            description: "Coffee beans".to_owned(),
            amount: "".to_owned(),
            category: "Food".to_owned(),
            date: "2026-03-14".to_owned(),
        };

        let errors = validate_draft(&draft, CURRENT_YEAR).expect_err("draft should be rejected");

        assert_eq!(errors.to_string(), "amount: Amount is required");
    }
}
