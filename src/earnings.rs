//! Buckets revenue into the twelve calendar months for the earnings chart.
//!
//! Months are matched on month number alone. Records from different years land in the same
//! bucket, so a history spanning more than a year is folded into a single January..December
//! series.

use crate::dates;
use crate::model::TransactionRecord;
use chrono::Month;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// One point of the earnings chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlyBucket {
    name: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    earnings: Decimal,
}

impl MonthlyBucket {
    /// The full month name, e.g. `"March"`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn earnings(&self) -> Decimal {
        self.earnings
    }
}

/// Exactly twelve buckets, January first. Serializes as an ordered array of `{name, earnings}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MonthlyEarnings([MonthlyBucket; 12]);

impl MonthlyEarnings {
    /// Twelve empty buckets.
    pub fn empty() -> Self {
        Self(MONTHS.map(|month| MonthlyBucket {
            name: month.name(),
            earnings: Decimal::ZERO,
        }))
    }

    pub fn buckets(&self) -> &[MonthlyBucket; 12] {
        &self.0
    }

    /// Returns the bucket for a zero-based month index, or `None` past December.
    pub fn get(&self, month_index: usize) -> Option<&MonthlyBucket> {
        self.0.get(month_index)
    }

    /// The sum of all buckets, saturating at the largest representable amount.
    pub fn total(&self) -> Decimal {
        self.0
            .iter()
            .fold(Decimal::ZERO, |acc, b| acc.saturating_add(b.earnings))
    }

    /// Adds `amount` to a bucket. An amount that would overflow the bucket is left out.
    fn add(&mut self, month_index: usize, amount: Decimal) {
        if let Some(bucket) = self.0.get_mut(month_index) {
            match bucket.earnings.checked_add(amount) {
                Some(sum) => bucket.earnings = sum,
                None => warn!(
                    "Earnings for {} overflowed, leaving out an amount of {amount}",
                    bucket.name
                ),
            }
        }
    }
}

impl Default for MonthlyEarnings {
    fn default() -> Self {
        Self::empty()
    }
}

/// Sums `amount` per calendar month over every record whose date parses.
///
/// Non-subscription rows are counted too: they are revenue even though the statement hides them.
/// A record with an unparsable date is skipped and never fails the batch.
pub fn aggregate_monthly(records: &[TransactionRecord]) -> MonthlyEarnings {
    let mut earnings = MonthlyEarnings::empty();
    for record in records {
        match dates::month_index_of(record.date()) {
            Ok(month) => earnings.add(month, record.amount().value()),
            Err(e) => debug!(
                "Skipping transaction '{}' in monthly earnings: {e}",
                record.transaction_id()
            ),
        }
    }
    earnings
}
