//! The user statement: searching and date-filtering an expert's transaction history.

use crate::dates::{self, DateRange};
use crate::model::TransactionRecord;
use chrono::NaiveDateTime;
use std::cmp::Ordering;
use tracing::debug;

/// The inputs of the statement view's search box and date-range picker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerQuery {
    search: String,
    range: DateRange,
}

impl LedgerQuery {
    pub fn new(search: impl Into<String>, range: DateRange) -> Self {
        Self {
            search: search.into(),
            range,
        }
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    /// Runs `filter_ledger` with this query.
    pub fn apply(&self, records: &[TransactionRecord]) -> Vec<TransactionRecord> {
        filter_ledger(records, &self.search, &self.range)
    }
}

/// Returns a copy of `records` sorted most recent first. Records whose date does not parse go
/// last, in their original order.
pub fn sort_by_date_desc(records: &[TransactionRecord]) -> Vec<TransactionRecord> {
    let mut keyed: Vec<(Option<NaiveDateTime>, &TransactionRecord)> = records
        .iter()
        .map(|r| (dates::parse_iso(r.date()).ok(), r))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => b.cmp(a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    keyed.into_iter().map(|(_, r)| r.clone()).collect()
}

/// Produces the rows of the user statement.
///
/// The result is sorted most recent first and then narrowed by:
/// - dropping non-subscription rows (see `TransactionRecord::is_subscription`),
/// - `search`, a case-sensitive substring of the user's mobile number; empty matches everything,
/// - `range`, inclusive, applied only when both ends are set.
///
/// A record whose date cannot be parsed fails an active date range.
///
/// Always call this with the full fetched snapshot, never with a previous result.
pub fn filter_ledger(
    records: &[TransactionRecord],
    search: &str,
    range: &DateRange,
) -> Vec<TransactionRecord> {
    sort_by_date_desc(records)
        .into_iter()
        .filter(TransactionRecord::is_subscription)
        .filter(|r| search.is_empty() || r.user_mobile_no().contains(search))
        .filter(|r| match range.contains(r.date()) {
            Ok(inside) => inside,
            Err(e) => {
                debug!(
                    "Dropping transaction '{}' from date-filtered statement: {e}",
                    r.transaction_id()
                );
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn record(id: &str, mobile: &str, date: &str, subscription: &str) -> TransactionRecord {
        TransactionRecord::new(
            id,
            date,
            subscription,
            "Monthly",
            mobile,
            Amount::from_str("100").unwrap(),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn ids(records: &[TransactionRecord]) -> Vec<&str> {
        records.iter().map(|r| r.transaction_id()).collect()
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            record("t1", "9998887770", "2024-01-15", "Equity"),
            record("t2", "9998887771", "2024-03-20T10:00:00", "Commodity"),
            record("t3", "8887776660", "2024-02-10", "Option"),
            record("t4", "9998887770", "2024-03-01", "No Subscrption"),
            record("t5", "9998887770", "2024-02-29T23:59:59", "Equity"),
        ]
    }

    #[test]
    fn test_no_filters_sorts_and_drops_sentinel_rows() {
        let result = filter_ledger(&sample(), "", &DateRange::unbounded());
        assert_eq!(ids(&result), vec!["t2", "t5", "t3", "t1"]);
    }

    #[test]
    fn test_scenario_single_paid_record() {
        let records = vec![
            TransactionRecord::new(
                "a",
                "2024-03-05",
                "Equity",
                "",
                "9998887770",
                Amount::from_str("100").unwrap(),
            ),
            TransactionRecord::new(
                "b",
                "2024-01-10",
                "No Subscrption",
                "",
                "9998887771",
                Amount::from_str("50").unwrap(),
            ),
        ];
        let result = filter_ledger(&records, "", &DateRange::unbounded());
        assert_eq!(result, vec![records[0].clone()]);
    }

    #[test]
    fn test_search_matches_mobile_substring_only() {
        let result = filter_ledger(&sample(), "9998887770", &DateRange::unbounded());
        assert_eq!(ids(&result), vec!["t5", "t1"]);
        assert!(result.iter().all(|r| r.user_mobile_no().contains("9998887770")));

        let result = filter_ledger(&sample(), "777", &DateRange::unbounded());
        assert_eq!(ids(&result), vec!["t2", "t5", "t3", "t1"]);

        // transaction ids and plan names are not searched
        assert!(filter_ledger(&sample(), "t1", &DateRange::unbounded()).is_empty());
        assert!(filter_ledger(&sample(), "Monthly", &DateRange::unbounded()).is_empty());
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange::between(date(2024, 2, 10), date(2024, 2, 29));
        let result = filter_ledger(&sample(), "", &range);
        assert_eq!(ids(&result), vec!["t5", "t3"]);
    }

    #[test]
    fn test_partial_range_does_not_filter() {
        let range = DateRange::new(Some(date(2030, 1, 1)), None);
        assert_eq!(filter_ledger(&sample(), "", &range).len(), 4);
    }

    #[test]
    fn test_search_and_range_combine() {
        let range = DateRange::between(date(2024, 1, 1), date(2024, 1, 31));
        let result = filter_ledger(&sample(), "9998887770", &range);
        assert_eq!(ids(&result), vec!["t1"]);
    }

    #[test]
    fn test_unparsable_dates_sort_last_and_fail_active_ranges() {
        let mut records = sample();
        records.insert(0, record("bad", "9998887770", "someday", "Equity"));
        let all = filter_ledger(&records, "", &DateRange::unbounded());
        assert_eq!(ids(&all).last(), Some(&"bad"));

        let range = DateRange::between(date(2000, 1, 1), date(2100, 1, 1));
        let ranged = filter_ledger(&records, "", &range);
        assert!(!ids(&ranged).contains(&"bad"));
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let range = DateRange::between(date(2024, 2, 1), date(2024, 3, 31));
        let once = filter_ledger(&sample(), "999", &range);
        let twice = filter_ledger(&once, "999", &range);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let records = sample();
        let before = records.clone();
        let _ = filter_ledger(&records, "999", &DateRange::unbounded());
        assert_eq!(records, before);
    }

    #[test]
    fn test_query_apply() {
        let query = LedgerQuery::new("8887776", DateRange::unbounded());
        assert_eq!(ids(&query.apply(&sample())), vec!["t3"]);
        assert!(LedgerQuery::default().apply(&[]).is_empty());
    }
}
