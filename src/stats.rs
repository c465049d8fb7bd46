//! Derived spending statistics.
//!
//! Pure functions over a transaction slice. Nothing here reads tracker
//! state or caches results; callers pass the list (and a "today" where a
//! window is involved) and always get freshly computed values.

use time::{Date, Duration, Weekday};

use crate::transaction::Transaction;

/// The budget percentage at which the status switches to a warning.
pub const BUDGET_WARNING_PERCENT: f64 = 80.0;

/// A category together with its summed spending.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// The summed amount for the category.
    pub total: f64,
}

/// One calendar day of the trailing seven-day window.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySpending {
    /// The calendar date of the bucket.
    pub date: Date,
    /// The three-letter weekday label, e.g. "Mon".
    pub label: &'static str,
    /// The summed spending on that date.
    pub total: f64,
}

/// How far spending has progressed against the configured cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLevel {
    /// Spending is comfortably below the cap.
    Under,
    /// Spending has reached [BUDGET_WARNING_PERCENT] of the cap.
    Warning,
    /// Spending has reached or passed the cap.
    Over,
}

/// The budget classification for a spending total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BudgetStatus {
    /// No spending cap is configured.
    NoCap,
    /// A cap is configured and spending is tracked against it.
    Tracked {
        /// How much of the cap is left; negative once spending passes it.
        remaining: f64,
        /// Spending as a percentage of the cap, clamped to 100.
        percentage: f64,
        /// The classification of the current spending.
        level: BudgetLevel,
    },
}

/// The derived statistics delivered with every state snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    /// The number of transactions.
    pub count: usize,
    /// The sum of all transaction amounts.
    pub total: f64,
    /// The category with the highest spending, if any transactions exist.
    pub top_category: Option<CategoryTotal>,
    /// Daily spending for the trailing seven days, oldest first.
    pub last_seven_days: Vec<DaySpending>,
    /// Spending progress against the budget cap.
    pub budget: BudgetStatus,
    /// Per-category totals, highest spending first.
    pub by_category: Vec<CategoryTotal>,
}

/// The sum of all transaction amounts.
pub fn total_spent(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| transaction.amount)
        .sum()
}

// Totals accumulate in a Vec rather than a map: the top-category tie-break
// depends on first-encounter order, which map iteration would not preserve.
fn accumulate_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions {
        match totals
            .iter_mut()
            .find(|entry| entry.category == transaction.category)
        {
            Some(entry) => entry.total += transaction.amount,
            None => totals.push(CategoryTotal {
                category: transaction.category.clone(),
                total: transaction.amount,
            }),
        }
    }

    totals
}

/// The category with the highest spending total.
///
/// Ties go to the category encountered first: a later category with an
/// equal total does not displace the current leader. Returns `None` for an
/// empty list.
pub fn top_category(transactions: &[Transaction]) -> Option<CategoryTotal> {
    let mut top: Option<CategoryTotal> = None;

    for entry in accumulate_by_category(transactions) {
        match &top {
            Some(current) if entry.total <= current.total => {}
            _ => top = Some(entry),
        }
    }

    top
}

/// Daily spending buckets for the seven days ending at `today`, oldest
/// first.
///
/// Each bucket carries its date, a three-letter weekday label, and the
/// summed spending for that calendar date. Days without spending appear
/// with a zero total. The caller resolves `today` in whatever timezone the
/// user lives in.
pub fn last_seven_days(transactions: &[Transaction], today: Date) -> Vec<DaySpending> {
    (0..7i64)
        .rev()
        .map(|offset| {
            let day = today.saturating_sub(Duration::days(offset));
            let total = transactions
                .iter()
                .filter(|transaction| transaction.date == day)
                .map(|transaction| transaction.amount)
                .sum();

            DaySpending {
                date: day,
                label: weekday_label(day.weekday()),
                total,
            }
        })
        .collect()
}

fn weekday_label(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "Mon",
        Weekday::Tuesday => "Tue",
        Weekday::Wednesday => "Wed",
        Weekday::Thursday => "Thu",
        Weekday::Friday => "Fri",
        Weekday::Saturday => "Sat",
        Weekday::Sunday => "Sun",
    }
}

/// Classify a spending total against a budget cap.
///
/// A cap of zero means no cap is configured. Otherwise the percentage is
/// clamped to 100, the level is [BudgetLevel::Over] once spending reaches
/// the cap and [BudgetLevel::Warning] from [BUDGET_WARNING_PERCENT]
/// upwards, and `remaining` goes negative once the cap is passed.
pub fn budget_status(total: f64, cap: f64) -> BudgetStatus {
    if cap <= 0.0 {
        return BudgetStatus::NoCap;
    }

    let percentage = (total / cap * 100.0).min(100.0);
    let level = if total >= cap {
        BudgetLevel::Over
    } else if percentage >= BUDGET_WARNING_PERCENT {
        BudgetLevel::Warning
    } else {
        BudgetLevel::Under
    };

    BudgetStatus::Tracked {
        remaining: cap - total,
        percentage,
        level,
    }
}

/// Per-category spending totals, highest first.
///
/// The sort is stable, so categories with equal totals stay in
/// first-encounter order.
pub fn category_totals(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals = accumulate_by_category(transactions);
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

/// Assemble the full statistics report for a transaction list.
pub fn summarize(transactions: &[Transaction], budget_cap: f64, today: Date) -> Statistics {
    let total = total_spent(transactions);

    Statistics {
        count: transactions.len(),
        total,
        top_category: top_category(transactions),
        last_seven_days: last_seven_days(transactions, today),
        budget: budget_status(total, budget_cap),
        by_category: category_totals(transactions),
    }
}
