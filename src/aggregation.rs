//! Pure aggregation of transactions into summary views.
//!
//! Provides the derived data behind the dashboard charts and the grouped
//! transaction listing: overall spending totals, week-of-month and monthly
//! buckets, per-category totals, and the most recent transactions.
//!
//! Every function here is a pure transformation over a slice of transactions
//! already held in memory. Input order matters only where tie breaking is
//! concerned: all sorts are stable, so callers that need reproducible output
//! for tied dates must supply a deterministic input order.

use std::collections::HashMap;

use time::Month;

use crate::transaction::Transaction;

/// A week-of-month bucket with its spending total.
#[derive(Debug, Clone, PartialEq)]
pub struct WeekBucket {
    /// The bucket label, e.g. "Week 2".
    pub label: String,
    /// The summed expense magnitude for the bucket.
    pub total: f64,
}

/// A calendar-month bucket with its spending total and member transactions.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    /// The month label, e.g. "Mar 2024".
    pub label: String,
    /// The summed expense magnitude for the month, rounded to cents.
    pub total: f64,
    /// The month's transactions, most recent first.
    pub transactions: Vec<Transaction>,
}

/// A category with its spending total.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    /// The category label as stored on the transactions.
    pub category: String,
    /// The summed expense magnitude for the category.
    pub total: f64,
}

/// The sum of the absolute amounts over all transactions.
///
/// Empty input yields 0.
pub fn total_magnitude(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .map(|transaction| transaction.amount.abs())
        .sum()
}

/// Group transactions into week-of-month buckets.
///
/// The bucket key is `ceil(day_of_month / 7)`, so "Week 1" covers days 1-7
/// and "Week 5" days 29-31. Buckets are keyed on the day of the month only:
/// transactions from different months land in the same bucket. That mirrors
/// the behaviour of the weekly spending chart this feeds, so it is kept
/// rather than scoping buckets to a month.
///
/// Buckets appear in the order their first transaction was encountered.
pub fn group_by_week_of_month(transactions: &[Transaction]) -> Vec<WeekBucket> {
    let mut buckets: Vec<WeekBucket> = Vec::new();

    for transaction in transactions {
        let week = u32::from(transaction.date.day()).div_ceil(7);
        let label = format!("Week {week}");

        match buckets.iter_mut().find(|bucket| bucket.label == label) {
            Some(bucket) => bucket.total += transaction.amount.abs(),
            None => buckets.push(WeekBucket {
                label,
                total: transaction.amount.abs(),
            }),
        }
    }

    buckets
}

/// Group transactions into calendar-month buckets.
///
/// Buckets are sorted ascending by `(year, month)`, not by their label text.
/// Within each bucket the transactions are sorted descending by date (stable,
/// so tied dates keep their input order) and the total is rounded to two
/// decimal places.
pub fn group_by_month(transactions: &[Transaction]) -> Vec<MonthBucket> {
    let mut by_month: HashMap<(i32, u8), Vec<Transaction>> = HashMap::new();

    for transaction in transactions {
        let key = (transaction.date.year(), u8::from(transaction.date.month()));
        by_month.entry(key).or_default().push(transaction.clone());
    }

    let mut keys: Vec<(i32, u8)> = by_month.keys().copied().collect();
    keys.sort();

    keys.into_iter()
        .map(|key| {
            let mut members = by_month.remove(&key).unwrap_or_default();
            members.sort_by(|a, b| b.date.cmp(&a.date));

            let total = members
                .iter()
                .map(|transaction| transaction.amount.abs())
                .sum::<f64>();

            let (year, month) = key;
            MonthBucket {
                label: month_label(year, month),
                total: round_to_cents(total),
                transactions: members,
            }
        })
        .collect()
}

/// Group transactions by their category label.
///
/// Categories appear in the order their first transaction was encountered,
/// not in registry order.
pub fn group_by_category(transactions: &[Transaction]) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();

    for transaction in transactions {
        match totals
            .iter_mut()
            .find(|entry| entry.category == transaction.category)
        {
            Some(entry) => entry.total += transaction.amount.abs(),
            None => totals.push(CategoryTotal {
                category: transaction.category.clone(),
                total: transaction.amount.abs(),
            }),
        }
    }

    totals
}

/// Up to `n` transactions sorted descending by date.
///
/// The sort is stable: transactions sharing a date keep their input order.
pub fn most_recent(transactions: &[Transaction], n: usize) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(n);
    sorted
}

/// Format a `(year, month)` key as a short label, e.g. "Mar 2024".
fn month_label(year: i32, month: u8) -> String {
    let abbreviation = match Month::try_from(month) {
        Ok(Month::January) => "Jan",
        Ok(Month::February) => "Feb",
        Ok(Month::March) => "Mar",
        Ok(Month::April) => "Apr",
        Ok(Month::May) => "May",
        Ok(Month::June) => "Jun",
        Ok(Month::July) => "Jul",
        Ok(Month::August) => "Aug",
        Ok(Month::September) => "Sep",
        Ok(Month::October) => "Oct",
        Ok(Month::November) => "Nov",
        Ok(Month::December) => "Dec",
        Err(_) => "???",
    };

    format!("{abbreviation} {year}")
}

fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
