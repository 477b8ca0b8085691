use crate::api::{self, Mode};
use crate::commands::Out;
use crate::dashboard::{Dashboard, PayoutRow, RequestRow, StatementRow};
use crate::earnings::MonthlyEarnings;
use crate::ledger::LedgerQuery;
use crate::model::Amount;
use crate::{Config, Result};
use serde::Serialize;

/// Everything the wallet screen shows, computed from one concurrent fetch.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardOut {
    pub withdrawal_balance: Option<Amount>,
    pub earnings: MonthlyEarnings,
    pub statement: Vec<StatementRow>,
    pub settled: Vec<PayoutRow>,
    pub requests: Vec<RequestRow>,
    /// One message per collection that failed to load.
    pub failures: Vec<String>,
}

/// Fetches the balance, transactions and withdrawal requests at once and summarizes every view.
pub async fn dashboard(config: Config, mode: Mode) -> Result<Out<DashboardOut>> {
    let backend = api::backend(&config, mode)?;
    let dashboard = Dashboard::fetch(backend.as_ref(), config.expert_id(), config.page()).await;

    let partition = dashboard.withdrawals();
    let out = DashboardOut {
        withdrawal_balance: dashboard.withdrawal_balance(),
        earnings: dashboard.monthly_earnings(),
        statement: dashboard.statement(&LedgerQuery::default()),
        settled: partition.settled().iter().map(PayoutRow::from).collect(),
        requests: partition
            .pending_or_rejected()
            .iter()
            .map(RequestRow::from)
            .collect(),
        failures: [
            dashboard.balance().error(),
            dashboard.transactions().error(),
            dashboard.withdrawal_requests().error(),
        ]
        .into_iter()
        .flatten()
        .map(String::from)
        .collect(),
    };

    let balance = out
        .withdrawal_balance
        .map(|b| b.with_default_format().to_string())
        .unwrap_or_else(|| "unavailable".to_string());
    let mut message = format!(
        "Dashboard for {}\n\
         Withdrawal balance: {balance}\n\
         Total earnings: {}\n\
         Statement rows: {}\n\
         Settled withdrawals: {}\n\
         Open withdrawal requests: {}",
        config.expert_id(),
        Amount::new(out.earnings.total()),
        out.statement.len(),
        out.settled.len(),
        out.requests.len(),
    );
    if !out.failures.is_empty() {
        message.push_str(&format!("\n{} collection(s) failed to load", out.failures.len()));
    }
    Ok(Out::new(message, out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_dashboard() {
        let env = TestEnv::new().await;
        let out = dashboard(env.config(), Mode::Test).await.unwrap();
        let summary = out.structure().unwrap();
        assert!(summary.withdrawal_balance.is_some());
        assert_eq!(summary.statement.len(), 7);
        assert_eq!(summary.settled.len(), 2);
        assert_eq!(summary.requests.len(), 2);
        assert!(summary.failures.is_empty());
        assert!(out.message().contains("Withdrawal balance: ₹18,450.50"));
        assert!(out.message().contains("Open withdrawal requests: 2"));
    }
}
