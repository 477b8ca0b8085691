//! Implements the `Backend` trait by calling the REST endpoints with `reqwest`.

use crate::api::{
    ApiResponse, Backend, Page, UserType, BANK_UPI_PATH, SUBSCRIPTIONS_PATH, TRANSACTIONS_PATH,
    WALLET_BALANCE_PATH, WITHDRAWALS_PATH,
};
use crate::config::Endpoints;
use crate::model::{ExpertId, TransactionRecord, WalletBalance, WithdrawalRequest};
use crate::Result;
use anyhow::{anyhow, bail, Context};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::trace;
use url::Url;

const TIMEOUT: Duration = Duration::from_secs(30);

pub(super) struct HttpBackend {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl HttpBackend {
    pub(super) fn new(endpoints: Endpoints) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(TIMEOUT)
            .build()
            .context("Unable to create the HTTP client")?;
        Ok(Self { client, endpoints })
    }

    async fn get<T>(&self, url: Url) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        trace!("GET {url}");
        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to send request to {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());
            bail!("GET {url} failed with status {status}: {body}");
        }

        response
            .json()
            .await
            .with_context(|| format!("Failed to parse the response from {url}"))
    }
}

#[async_trait::async_trait]
impl Backend for HttpBackend {
    async fn wallet_balance(&self, expert: &ExpertId) -> Result<WalletBalance> {
        let url = endpoint(
            &self.endpoints.wallet,
            WALLET_BALANCE_PATH,
            expert.as_str(),
            &[("userType", UserType::ResearchAnalyst.to_string())],
        )?;
        self.get::<WalletBalance>(url)
            .await?
            .into_data("the wallet balance")
    }

    async fn transactions(&self, expert: &ExpertId, page: Page) -> Result<Vec<TransactionRecord>> {
        let url = endpoint(
            &self.endpoints.dashboard,
            TRANSACTIONS_PATH,
            expert.as_str(),
            &paging(page),
        )?;
        self.get::<Vec<Value>>(url)
            .await?
            .into_records("transactions")
    }

    async fn subscriptions(&self, expert: &ExpertId) -> Result<Vec<TransactionRecord>> {
        let url = endpoint(
            &self.endpoints.subscription,
            SUBSCRIPTIONS_PATH,
            expert.as_str(),
            &[],
        )?;
        self.get::<Vec<Value>>(url)
            .await?
            .into_records("subscriptions")
    }

    async fn withdrawal_requests(
        &self,
        expert: &ExpertId,
        user_type: UserType,
        page: Page,
    ) -> Result<Vec<WithdrawalRequest>> {
        let mut query = vec![("userType", user_type.to_string())];
        query.extend(paging(page));
        let url = endpoint(
            &self.endpoints.wallet,
            WITHDRAWALS_PATH,
            expert.as_str(),
            &query,
        )?;
        self.get::<Vec<Value>>(url)
            .await?
            .into_records("withdrawal requests")
    }

    async fn bank_upi(&self, bank_id: &str) -> Result<Vec<WithdrawalRequest>> {
        let url = endpoint(&self.endpoints.wallet, BANK_UPI_PATH, bank_id, &[])?;
        self.get::<Vec<Value>>(url)
            .await?
            .into_records("bank and UPI details")
    }
}

fn paging(page: Page) -> Vec<(&'static str, String)> {
    vec![
        ("page", page.number().to_string()),
        ("pageSize", page.size().to_string()),
    ]
}

/// Builds `{base}/{path}/{id}?{query}`, escaping `id` as a single path segment.
fn endpoint(base: &Url, path: &str, id: &str, query: &[(&str, String)]) -> Result<Url> {
    let mut url = base
        .join(path)
        .with_context(|| format!("Unable to join '{path}' onto '{base}'"))?;
    url.path_segments_mut()
        .map_err(|_| anyhow!("The base URL '{base}' cannot have a path"))?
        .push(id);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
    }
    Ok(url)
}
