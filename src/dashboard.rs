//! The wallet dashboard: one snapshot of everything fetched for an expert and the views derived
//! from it.

use crate::api::{Backend, Page, UserType};
use crate::dates;
use crate::earnings::{aggregate_monthly, MonthlyEarnings};
use crate::ledger::LedgerQuery;
use crate::model::{
    Amount, ExpertId, Fetched, TransactionRecord, WalletBalance, WithdrawalRequest,
};
use crate::withdrawals::{partition_withdrawals, WithdrawalPartition};
use serde::Serialize;
use tracing::debug;

/// The three collections behind the wallet screen. Each one loads or fails on its own; a failed
/// collection reads as empty.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    balance: Fetched<WalletBalance>,
    transactions: Fetched<Vec<TransactionRecord>>,
    withdrawals: Fetched<Vec<WithdrawalRequest>>,
}

impl Dashboard {
    pub fn new(
        balance: Fetched<WalletBalance>,
        transactions: Fetched<Vec<TransactionRecord>>,
        withdrawals: Fetched<Vec<WithdrawalRequest>>,
    ) -> Self {
        Self {
            balance,
            transactions,
            withdrawals,
        }
    }

    /// Fetches the balance, the transactions and the withdrawal requests concurrently.
    pub async fn fetch(backend: &dyn Backend, expert: &ExpertId, page: Page) -> Self {
        debug!("Fetching the dashboard for {expert}");
        let (balance, transactions, withdrawals) = tokio::join!(
            backend.wallet_balance(expert),
            backend.transactions(expert, page),
            backend.withdrawal_requests(expert, UserType::ResearchAnalyst, page),
        );
        Self::new(
            Fetched::logged("the wallet balance", balance),
            Fetched::logged("the transactions", transactions),
            Fetched::logged("the withdrawal requests", withdrawals),
        )
    }

    pub fn balance(&self) -> &Fetched<WalletBalance> {
        &self.balance
    }

    pub fn transactions(&self) -> &Fetched<Vec<TransactionRecord>> {
        &self.transactions
    }

    pub fn withdrawal_requests(&self) -> &Fetched<Vec<WithdrawalRequest>> {
        &self.withdrawals
    }

    /// `None` when the balance could not be fetched.
    pub fn withdrawal_balance(&self) -> Option<Amount> {
        self.balance.loaded().map(|b| b.withdrawal_balance())
    }

    pub fn monthly_earnings(&self) -> MonthlyEarnings {
        aggregate_monthly(self.transactions.rows())
    }

    /// The user statement rows for `query`. Always computed from the full fetched snapshot.
    pub fn statement(&self, query: &LedgerQuery) -> Vec<StatementRow> {
        query
            .apply(self.transactions.rows())
            .iter()
            .map(StatementRow::from)
            .collect()
    }

    pub fn withdrawals(&self) -> WithdrawalPartition {
        partition_withdrawals(self.withdrawals.rows())
    }
}

/// Renders a backend timestamp as `DD-MM-YYYY`, or as-is when it does not parse.
fn display_date(s: &str) -> String {
    dates::format_display(s).unwrap_or_else(|_| s.to_string())
}

/// A row of the user statement table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRow {
    pub transaction_id: String,
    pub date: String,
    pub subscription: String,
    pub plan_type: String,
    pub user_mobile_no: String,
    pub amount: Amount,
}

impl From<&TransactionRecord> for StatementRow {
    fn from(r: &TransactionRecord) -> Self {
        Self {
            transaction_id: r.transaction_id().to_string(),
            date: display_date(r.date()),
            subscription: r.subscription().trim().to_string(),
            plan_type: r.plan_type().to_string(),
            user_mobile_no: r.user_mobile_no().to_string(),
            amount: r.amount().with_default_format(),
        }
    }
}

/// A row of the settled payouts table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayoutRow {
    pub transaction_id: String,
    pub date: String,
    pub payment_mode: String,
    pub destination: String,
    pub amount: Amount,
}

impl From<&WithdrawalRequest> for PayoutRow {
    fn from(r: &WithdrawalRequest) -> Self {
        Self {
            transaction_id: r.transaction_id().to_string(),
            date: display_date(r.request_date()),
            payment_mode: r.payment_mode().to_string(),
            destination: r.destination().to_string(),
            amount: r.amount().with_default_format(),
        }
    }
}

/// A row of the pending and rejected requests table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestRow {
    #[serde(flatten)]
    pub payout: PayoutRow,
    pub status: String,
    /// Whether the row can be opened for details.
    pub selectable: bool,
}

impl From<&WithdrawalRequest> for RequestRow {
    fn from(r: &WithdrawalRequest) -> Self {
        Self {
            payout: PayoutRow::from(r),
            status: r.status_text(),
            selectable: r.is_selectable(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Resource, TestBackend};
    use crate::dates::DateRange;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn expert() -> ExpertId {
        ExpertId::new("expert-1").unwrap()
    }

    async fn seeded() -> Dashboard {
        Dashboard::fetch(&TestBackend::default(), &expert(), Page::first(100)).await
    }

    #[tokio::test]
    async fn test_fetch_loads_everything() {
        let dashboard = seeded().await;
        assert_eq!(
            dashboard.withdrawal_balance().unwrap().value(),
            Decimal::from_str("18450.5").unwrap()
        );
        assert_eq!(dashboard.transactions().rows().len(), 8);
        assert_eq!(dashboard.withdrawal_requests().rows().len(), 4);
    }

    #[tokio::test]
    async fn test_failed_collection_reads_as_empty() {
        let backend = TestBackend::default()
            .failing(Resource::Transactions)
            .failing(Resource::WalletBalance);
        let dashboard = Dashboard::fetch(&backend, &expert(), Page::default()).await;

        assert!(dashboard.transactions().is_failed());
        assert!(dashboard.withdrawal_balance().is_none());
        assert_eq!(dashboard.monthly_earnings().total(), Decimal::ZERO);
        assert!(dashboard.statement(&LedgerQuery::default()).is_empty());
        // withdrawals are unaffected
        assert_eq!(dashboard.withdrawals().len(), 4);
    }

    #[tokio::test]
    async fn test_monthly_earnings_from_transactions() {
        let earnings = seeded().await.monthly_earnings();
        // 999 + 50 (the non-subscription row still counts)
        assert_eq!(earnings.get(0).unwrap().earnings(), Decimal::from(1049));
        assert_eq!(earnings.get(1).unwrap().earnings(), Decimal::from(2499));
        assert_eq!(
            earnings.get(2).unwrap().earnings(),
            Decimal::from_str("12498.5").unwrap()
        );
        // null amount counts as zero, broken date is skipped
        assert_eq!(earnings.get(3).unwrap().earnings(), Decimal::ZERO);
        assert_eq!(earnings.get(4).unwrap().earnings(), Decimal::from(899));
    }

    #[tokio::test]
    async fn test_statement_rows() {
        let dashboard = seeded().await;
        let rows = dashboard.statement(&LedgerQuery::default());
        let ids: Vec<&str> = rows.iter().map(|r| r.transaction_id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "TXN-240401-06",
                "TXN-240322-05",
                "TXN-240305-04",
                "TXN-240214-03",
                "TXN-240105-01",
                "TXN-230519-08",
                "TXN-BROKEN-07",
            ]
        );
        assert_eq!(rows[0].date, "01-04-2024");
        assert_eq!(rows[0].subscription, "Option");
        assert_eq!(rows[6].date, "31/04/2024");
    }

    #[tokio::test]
    async fn test_statement_query() {
        let dashboard = seeded().await;
        let march = DateRange::between(
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        );
        let rows = dashboard.statement(&LedgerQuery::new("999888", march));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].transaction_id, "TXN-240305-04");
        assert_eq!(rows[0].amount.to_string(), "₹7,999.00");

        // the snapshot is untouched, so a wider query finds more again
        let rows = dashboard.statement(&LedgerQuery::new("999888", DateRange::unbounded()));
        assert_eq!(rows.len(), 3);
    }

    #[tokio::test]
    async fn test_withdrawal_rows() {
        let partition = seeded().await.withdrawals();
        let settled: Vec<PayoutRow> = partition.settled().iter().map(PayoutRow::from).collect();
        assert_eq!(settled.len(), 2);
        assert_eq!(settled[0].destination, "50100234567891");
        assert_eq!(settled[0].date, "01-02-2024");
        assert_eq!(settled[1].destination, "expert@okhdfc");

        let requests: Vec<RequestRow> = partition
            .pending_or_rejected()
            .iter()
            .map(RequestRow::from)
            .collect();
        assert_eq!(requests[0].payout.transaction_id, "WD-1002");
        assert_eq!(requests[0].status, "Rejected");
        assert!(requests[0].selectable);
        assert_eq!(requests[1].status, "P");
        assert!(!requests[1].selectable);
    }

    #[tokio::test]
    async fn test_dashboard_serializes_failures() {
        let backend = TestBackend::default().failing(Resource::WithdrawalRequests);
        let dashboard = Dashboard::fetch(&backend, &expert(), Page::default()).await;
        let json = serde_json::to_value(&dashboard).unwrap();
        assert!(json["withdrawals"]["failed"].is_string());
        assert!(json["balance"]["loaded"].is_object());
    }
}
