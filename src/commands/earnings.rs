use crate::api::{self, Mode};
use crate::args::{EarningsArgs, EarningsSource};
use crate::commands::Out;
use crate::earnings::{aggregate_monthly, MonthlyEarnings};
use crate::model::{Amount, Fetched};
use crate::{Config, Result};

/// Shows earnings per calendar month, January through December.
///
/// The series is built from the revenue history by default, or from the subscription listing
/// when `--source subscriptions` is given. A failed fetch yields twelve empty months.
pub async fn earnings(
    config: Config,
    mode: Mode,
    args: EarningsArgs,
) -> Result<Out<MonthlyEarnings>> {
    let backend = api::backend(&config, mode)?;
    let expert = config.expert_id();
    let records = match args.source() {
        EarningsSource::Transactions => Fetched::logged(
            "the transactions",
            backend.transactions(expert, config.page()).await,
        ),
        EarningsSource::Subscriptions => Fetched::logged(
            "the subscriptions",
            backend.subscriptions(expert).await,
        ),
    };

    let monthly = aggregate_monthly(records.rows());
    let mut message = format!("Monthly earnings ({}):\n", args.source());
    for bucket in monthly.buckets() {
        message.push_str(&format!(
            "{:<10} {}\n",
            bucket.name(),
            Amount::new(bucket.earnings())
        ));
    }
    message.push_str(&format!("{:<10} {}", "Total", Amount::new(monthly.total())));
    Ok(Out::new(message, monthly))
}
