use crate::api::{self, Backend, Mode, UserType};
use crate::args::{WithdrawalView, WithdrawalsArgs};
use crate::commands::{Out, Rows};
use crate::dashboard::{PayoutRow, RequestRow};
use crate::model::{Fetched, PENDING_STATUS};
use crate::withdrawals::{partition_withdrawals, select_request};
use crate::{Config, Result};
use anyhow::bail;
use serde::Serialize;
use tracing::debug;

const PAYOUT_HEADERS: [&str; 5] = ["Transaction ID", "Date", "Mode", "Destination", "Amount"];
const REQUEST_HEADERS: [&str; 6] = [
    "Transaction ID",
    "Date",
    "Mode",
    "Destination",
    "Amount",
    "Status",
];

/// The structured output of the `withdrawals` command.
#[derive(Debug, Clone, Serialize)]
pub struct WithdrawalsOut {
    /// The rendered table for the requested view.
    pub rows: Rows,
    /// The rejected request opened with `--select`, if any.
    pub rejection: Option<RequestRow>,
}

/// Shows either the settled payouts or the open request list.
///
/// With `--bank-id` the rows come from the bank and UPI lookup in place of the expert's request
/// history. With `--select` the named request is opened: rejected requests show their details,
/// anything else reports that there is nothing to show.
pub async fn withdrawals(
    config: Config,
    mode: Mode,
    args: WithdrawalsArgs,
) -> Result<Out<WithdrawalsOut>> {
    let backend = api::backend(&config, mode)?;
    withdrawals_with(backend.as_ref(), config, args).await
}

async fn withdrawals_with(
    backend: &dyn Backend,
    config: Config,
    args: WithdrawalsArgs,
) -> Result<Out<WithdrawalsOut>> {
    let requests = match args.bank_id() {
        Some(bank_id) => Fetched::logged(
            "the bank and UPI details",
            backend.bank_upi(bank_id).await,
        ),
        None => Fetched::logged(
            "the withdrawal requests",
            backend
                .withdrawal_requests(config.expert_id(), UserType::ResearchAnalyst, config.page())
                .await,
        ),
    };
    let partition = partition_withdrawals(requests.rows());
    debug!(
        "{} settled and {} open withdrawal request(s)",
        partition.settled().len(),
        partition.pending_or_rejected().len()
    );

    let (title, rows) = match args.view() {
        WithdrawalView::Settled => {
            let rows: Vec<PayoutRow> = partition.settled().iter().map(PayoutRow::from).collect();
            let rendered = Rows::render(args.format(), &PAYOUT_HEADERS, &rows, payout_cells)?;
            (format!("{} settled withdrawal(s)", rows.len()), rendered)
        }
        WithdrawalView::Requests => {
            let rows: Vec<RequestRow> = partition
                .pending_or_rejected()
                .iter()
                .map(RequestRow::from)
                .collect();
            let rendered = Rows::render(args.format(), &REQUEST_HEADERS, &rows, |r| {
                let mut cells = payout_cells(&r.payout);
                cells.push(r.status.clone());
                cells
            })?;
            (format!("{} withdrawal request(s)", rows.len()), rendered)
        }
    };
    let mut message = format!("{title}\n\n{rows}");

    let mut rejection = None;
    if let Some(id) = args.select() {
        let Some(request) = requests.rows().iter().find(|r| r.transaction_id() == id) else {
            bail!("There is no withdrawal request with the transaction id '{id}'");
        };
        match select_request(request) {
            Some(detail) => {
                let row = RequestRow::from(detail.request());
                message.push_str(&format!(
                    "\nRejected request {}: {} to {} via {} on {}",
                    row.payout.transaction_id,
                    row.payout.amount,
                    row.payout.destination,
                    row.payout.payment_mode,
                    row.payout.date,
                ));
                rejection = Some(row);
            }
            None if !request.is_selectable() => message.push_str(&format!(
                "\nRequest {id} is still {PENDING_STATUS} and cannot be opened"
            )),
            None => message.push_str(&format!(
                "\nRequest {id} is {} and has no rejection details",
                request.label()
            )),
        }
    }

    Ok(Out::new(message, WithdrawalsOut { rows, rejection }))
}

fn payout_cells(r: &PayoutRow) -> Vec<String> {
    vec![
        r.transaction_id.clone(),
        r.date.clone(),
        r.payment_mode.clone(),
        r.destination.clone(),
        r.amount.to_string(),
    ]
}
