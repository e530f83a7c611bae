//! Pure aggregations over an already-fetched page of transactions.
//!
//! Nothing here talks to the backend. Day and month boundaries are taken in
//! the configured time zone, never in UTC.
use std::collections::{BTreeMap, HashMap};

use api_types::transaction::Transaction;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;

/// One labelled value of a chart dataset.
#[derive(Clone, Debug, PartialEq)]
pub struct Slice {
    pub label: String,
    pub value: Decimal,
}

/// Splits into (income, expense). Zero counts as income.
pub fn partition_by_sign(transactions: &[Transaction]) -> (Vec<&Transaction>, Vec<&Transaction>) {
    transactions.iter().partition(|tx| tx.is_income())
}

/// Expense totals per category name, in order of first appearance.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<Slice> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut slices: Vec<Slice> = Vec::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        let amount = tx.amount.abs();
        match index.get(tx.category_name.as_str()) {
            Some(&i) => slices[i].value = slices[i].value.saturating_add(amount),
            None => {
                index.insert(tx.category_name.as_str(), slices.len());
                slices.push(Slice {
                    label: tx.category_name.clone(),
                    value: amount,
                });
            }
        }
    }
    slices
}

/// Expense totals per local calendar day, oldest first, labelled `dd/mm`.
pub fn expenses_by_day(transactions: &[Transaction], tz: Tz) -> Vec<Slice> {
    let mut days: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for tx in transactions.iter().filter(|tx| tx.is_expense()) {
        let day = tx.occurred_at.with_timezone(&tz).date_naive();
        let sum = days.entry(day).or_default();
        *sum = sum.saturating_add(tx.amount.abs());
    }
    days.into_iter()
        .map(|(day, value)| Slice {
            label: day.format("%d/%m").to_string(),
            value,
        })
        .collect()
}

/// Saturates at `Decimal::MAX` instead of overflowing.
pub fn total(slices: &[Slice]) -> Decimal {
    slices
        .iter()
        .fold(Decimal::ZERO, |sum, slice| sum.saturating_add(slice.value))
}

/// `value / total * 100`, or zero for an empty total.
pub fn share_percent(value: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    value / total * Decimal::ONE_HUNDRED
}

/// Each slice paired with its share of the dataset.
pub fn shares(slices: &[Slice]) -> Vec<(&Slice, Decimal)> {
    let sum = total(slices);
    slices
        .iter()
        .map(|slice| (slice, share_percent(slice.value, sum)))
        .collect()
}

/// Half-open `[start, end)` range of a calendar month in `tz`.
pub fn month_bounds(year: i32, month: u32, tz: Tz) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let start = tz
        .from_local_datetime(&first.and_hms_opt(0, 0, 0)?)
        .earliest()?;
    let end = tz
        .from_local_datetime(&next.and_hms_opt(0, 0, 0)?)
        .earliest()?;
    Some((start.with_timezone(&Utc), end.with_timezone(&Utc)))
}

/// Transactions of the month containing `now`, in `tz`.
pub fn in_month<'a>(
    transactions: &'a [Transaction],
    now: DateTime<Utc>,
    tz: Tz,
) -> Vec<&'a Transaction> {
    let local = now.with_timezone(&tz);
    let Some((start, end)) = month_bounds(local.year(), local.month(), tz) else {
        return Vec::new();
    };
    transactions
        .iter()
        .filter(|tx| tx.occurred_at >= start && tx.occurred_at < end)
        .collect()
}

/// Category with the largest expense total; earliest wins a tie.
pub fn top_category(transactions: &[Transaction]) -> Option<Slice> {
    expenses_by_category(transactions)
        .into_iter()
        .reduce(|best, slice| if slice.value > best.value { slice } else { best })
}

/// Quick figures for the dashboard header.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthlyStats {
    pub transactions_today: usize,
    /// Expense per elapsed day of the month.
    pub average_daily_expense: Decimal,
    pub top_category: Option<String>,
}

impl MonthlyStats {
    pub fn compute(transactions: &[Transaction], now: DateTime<Utc>, tz: Tz) -> Self {
        let today = now.with_timezone(&tz).date_naive();
        let month: Vec<Transaction> = in_month(transactions, now, tz).into_iter().cloned().collect();
        let transactions_today = month
            .iter()
            .filter(|tx| tx.occurred_at.with_timezone(&tz).date_naive() == today)
            .count();
        let spent = total(&expenses_by_category(&month));
        let elapsed = Decimal::from(today.day());

        Self {
            transactions_today,
            average_daily_expense: spent / elapsed,
            top_category: top_category(&month).map(|slice| slice.label),
        }
    }
}

/// Both expense charts for one month. `None` when there were no expenses,
/// which the dashboard shows as a placeholder rather than an error.
#[derive(Clone, Debug, PartialEq)]
pub struct ExpenseCharts {
    pub by_category: Vec<Slice>,
    pub by_day: Vec<Slice>,
}

impl ExpenseCharts {
    pub fn build(transactions: &[Transaction], now: DateTime<Utc>, tz: Tz) -> Option<Self> {
        let month: Vec<Transaction> = in_month(transactions, now, tz)
            .into_iter()
            .filter(|tx| tx.is_expense())
            .cloned()
            .collect();
        if month.is_empty() {
            return None;
        }
        Some(Self {
            by_category: expenses_by_category(&month),
            by_day: expenses_by_day(&month, tz),
        })
    }
}
