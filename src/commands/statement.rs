use crate::api::{self, Mode};
use crate::args::StatementArgs;
use crate::commands::{Out, Rows};
use crate::dashboard::StatementRow;
use crate::dates::DateRange;
use crate::ledger::LedgerQuery;
use crate::model::Fetched;
use crate::{Config, Result};
use tracing::warn;

const HEADERS: [&str; 6] = [
    "Transaction ID",
    "Date",
    "Subscription",
    "Plan Type",
    "Mobile",
    "Amount",
];

/// Shows the user statement: subscription sales, most recent first, narrowed by an optional
/// mobile number search and an optional inclusive date range.
pub async fn statement(config: Config, mode: Mode, args: StatementArgs) -> Result<Out<Rows>> {
    let backend = api::backend(&config, mode)?;
    let transactions = Fetched::logged(
        "the transactions",
        backend
            .transactions(config.expert_id(), config.page())
            .await,
    );

    let range = DateRange::new(args.from(), args.to());
    if !range.is_bounded() && (args.from().is_some() || args.to().is_some()) {
        warn!("Both --from and --to are needed to filter by date, ignoring the date range");
    }
    let query = LedgerQuery::new(args.search().unwrap_or_default(), range);

    let rows: Vec<StatementRow> = query
        .apply(transactions.rows())
        .iter()
        .map(StatementRow::from)
        .collect();
    let rendered = Rows::render(args.format(), &HEADERS, &rows, |r| {
        vec![
            r.transaction_id.clone(),
            r.date.clone(),
            r.subscription.clone(),
            r.plan_type.clone(),
            r.user_mobile_no.clone(),
            r.amount.to_string(),
        ]
    })?;

    let message = format!("{} statement row(s)\n\n{rendered}", rows.len());
    Ok(Out::new(message, rendered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::OutputFormat;
    use crate::test::TestEnv;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_statement_table() {
        let env = TestEnv::new().await;
        let out = statement(env.config(), Mode::Test, StatementArgs::default())
            .await
            .unwrap();
        assert!(out.message().starts_with("7 statement row(s)"));
        // the non-subscription row is hidden
        assert!(!out.message().contains("TXN-240110-02"));
        let expected = "| TXN-240305-04 | 05-03-2024 | Equity | Yearly | 9998887770 | ₹7,999.00 |";
        assert!(out.message().contains(expected));
    }

    #[tokio::test]
    async fn test_statement_search_and_range_csv() {
        let env = TestEnv::new().await;
        let args = StatementArgs::new(
            Some("9998887770".to_string()),
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 1, 31),
            OutputFormat::Csv,
        );
        let out = statement(env.config(), Mode::Test, args).await.unwrap();
        match out.structure().unwrap() {
            Rows::Csv(csv) => assert_eq!(
                csv,
                "Transaction ID,Date,Subscription,Plan Type,Mobile,Amount\n\
                 TXN-240105-01,05-01-2024,Equity,Monthly,9998887770,₹999.00\n"
            ),
            other => panic!("expected csv, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_statement_half_open_range_is_ignored() {
        let env = TestEnv::new().await;
        let args = StatementArgs::new(
            None,
            NaiveDate::from_ymd_opt(2024, 3, 1),
            None,
            OutputFormat::Json,
        );
        let out = statement(env.config(), Mode::Test, args).await.unwrap();
        match out.structure().unwrap() {
            Rows::Json(v) => assert_eq!(v.as_array().unwrap().len(), 7),
            other => panic!("expected json, got {other:?}"),
        }
    }
}
