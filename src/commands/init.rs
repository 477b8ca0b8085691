use crate::commands::Out;
use crate::config::Endpoints;
use crate::model::ExpertId;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the data directory and writes an initial `config.json` into it.
///
/// # Arguments
/// - `wallet_home` - The directory that will be the root of data directory, e.g.
///   `$HOME/expert-wallet`
/// - `expert_id` - The expert whose wallet every later command shows.
/// - `endpoints` - Base URLs of the subscription, dashboard and wallet services.
/// - `page_size` - Rows requested per page from list endpoints.
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(
    wallet_home: &Path,
    expert_id: ExpertId,
    endpoints: Endpoints,
    page_size: u32,
) -> Result<Out<()>> {
    let config = Config::create(wallet_home, expert_id, endpoints, page_size)
        .await
        .context("Unable to create the data directory and configs")?;
    Ok(format!(
        "Successfully created the wallet directory and config at {}",
        config.root().display()
    )
    .into())
}
