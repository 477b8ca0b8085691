use crate::api::{self, Mode};
use crate::commands::Out;
use crate::model::{Fetched, WalletBalance};
use crate::{Config, Result};

/// Shows the amount the expert can currently withdraw.
///
/// A failed fetch is reported and the balance shown as unavailable; it does not fail the command.
pub async fn balance(config: Config, mode: Mode) -> Result<Out<Fetched<WalletBalance>>> {
    let backend = api::backend(&config, mode)?;
    let fetched = Fetched::logged(
        "the wallet balance",
        backend.wallet_balance(config.expert_id()).await,
    );
    let message = match fetched.loaded() {
        Some(wallet) => format!(
            "Withdrawal balance: {}",
            wallet.withdrawal_balance().with_default_format()
        ),
        None => "Withdrawal balance: unavailable".to_string(),
    };
    Ok(Out::new(message, fetched))
}
