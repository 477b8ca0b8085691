//! Implements the `Backend` trait using in-memory responses for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without reaching the real backend.

use crate::api::{ApiResponse, Backend, Page, UserType};
use crate::model::{ExpertId, TransactionRecord, WalletBalance, WithdrawalRequest};
use crate::Result;
use anyhow::Context;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::trace;

/// The endpoints that `TestBackend` can answer for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    WalletBalance,
    Transactions,
    Subscriptions,
    WithdrawalRequests,
    BankUpi,
}

/// An implementation of the `Backend` trait that holds one raw JSON response body per resource.
/// By default it is seeded with the data in this module. A resource without a response fails, the
/// way an unreachable endpoint would.
#[derive(Debug, Clone)]
pub struct TestBackend {
    responses: HashMap<Resource, String>,
}

impl TestBackend {
    /// A backend with no responses at all.
    pub fn empty() -> Self {
        Self {
            responses: HashMap::new(),
        }
    }

    /// Replaces the response body served for `resource`.
    pub fn with_response(mut self, resource: Resource, body: impl Into<String>) -> Self {
        self.responses.insert(resource, body.into());
        self
    }

    /// Makes requests for `resource` fail.
    pub fn failing(mut self, resource: Resource) -> Self {
        self.responses.remove(&resource);
        self
    }

    fn respond<T>(&self, resource: Resource) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        trace!("Serving {resource:?} from memory");
        let body = self
            .responses
            .get(&resource)
            .with_context(|| format!("No response is available for {resource:?}"))?;
        serde_json::from_str(body)
            .with_context(|| format!("Failed to parse the {resource:?} response"))
    }

    fn rows<T>(&self, resource: Resource, what: &str, page: Option<Page>) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let rows: Vec<T> = self.respond::<Vec<Value>>(resource)?.into_records(what)?;
        Ok(match page {
            Some(page) => {
                let skip = (page.number() as usize - 1) * page.size() as usize;
                rows.into_iter().skip(skip).take(page.size() as usize).collect()
            }
            None => rows,
        })
    }
}

impl Default for TestBackend {
    /// Loads seed data from this module.
    fn default() -> Self {
        Self::empty()
            .with_response(Resource::WalletBalance, WALLET_BALANCE_DATA)
            .with_response(Resource::Transactions, TRANSACTION_DATA)
            .with_response(Resource::Subscriptions, SUBSCRIPTION_DATA)
            .with_response(Resource::WithdrawalRequests, WITHDRAWAL_DATA)
            .with_response(Resource::BankUpi, BANK_UPI_DATA)
    }
}

#[async_trait::async_trait]
impl Backend for TestBackend {
    async fn wallet_balance(&self, expert: &ExpertId) -> Result<WalletBalance> {
        trace!("wallet_balance for {expert}");
        self.respond::<WalletBalance>(Resource::WalletBalance)?
            .into_data("the wallet balance")
    }

    async fn transactions(&self, expert: &ExpertId, page: Page) -> Result<Vec<TransactionRecord>> {
        trace!("transactions for {expert}");
        self.rows(Resource::Transactions, "transactions", Some(page))
    }

    async fn subscriptions(&self, expert: &ExpertId) -> Result<Vec<TransactionRecord>> {
        trace!("subscriptions for {expert}");
        self.rows(Resource::Subscriptions, "subscriptions", None)
    }

    async fn withdrawal_requests(
        &self,
        expert: &ExpertId,
        user_type: UserType,
        page: Page,
    ) -> Result<Vec<WithdrawalRequest>> {
        trace!("withdrawal_requests for {expert} as {user_type}");
        self.rows(Resource::WithdrawalRequests, "withdrawal requests", Some(page))
    }

    async fn bank_upi(&self, bank_id: &str) -> Result<Vec<WithdrawalRequest>> {
        trace!("bank_upi for {bank_id}");
        self.rows(Resource::BankUpi, "bank and UPI details", None)
    }
}

/// Seed wallet balance.
const WALLET_BALANCE_DATA: &str = r#"{
  "data": { "withdrawalBalance": 18450.5, "walletBalance": 21950.5 },
  "isSuccess": true,
  "displayMessage": "Wallet balance retrieved"
}"#;

/// Seed revenue history. Includes a non-subscription row and a row with a broken date.
const TRANSACTION_DATA: &str = r#"{
  "data": [
    { "transactionId": "TXN-240105-01", "date": "2024-01-05T09:14:22.31", "subscription": "Equity", "planType": "Monthly", "userMobileNo": "9998887770", "amount": 999 },
    { "transactionId": "TXN-240110-02", "date": "2024-01-10T18:40:00", "subscription": "No Subscrption", "planType": "", "userMobileNo": "9998887771", "amount": 50 },
    { "transactionId": "TXN-240214-03", "date": "2024-02-14T11:02:45", "subscription": "Commodity", "planType": "Quarterly", "userMobileNo": "9123456780", "amount": 2499 },
    { "transactionId": "TXN-240305-04", "date": "2024-03-05T07:30:00", "subscription": "Equity", "planType": "Yearly", "userMobileNo": "9998887770", "amount": 7999 },
    { "transactionId": "TXN-240322-05", "date": "2024-03-22T16:55:10", "subscription": "Option", "planType": "Half-Yearly", "userMobileNo": "9876543210", "amount": 4499.5 },
    { "transactionId": "TXN-240401-06", "date": "2024-04-01T00:00:00", "subscription": "Option ", "planType": "Monthly", "userMobileNo": "9123456780", "amount": null },
    { "transactionId": "TXN-BROKEN-07", "date": "31/04/2024", "subscription": "Equity", "planType": "Monthly", "userMobileNo": "9998887770", "amount": 120 },
    { "transactionId": "TXN-230519-08", "date": "2023-05-19T13:20:00", "subscription": "Equity", "planType": "Monthly", "userMobileNo": "9000000001", "amount": 899 }
  ],
  "isSuccess": true,
  "displayMessage": ""
}"#;

/// Seed subscription listing, which names its timestamp `createdOn`.
const SUBSCRIPTION_DATA: &str = r#"{
  "data": [
    { "id": "SUB-1", "createdOn": "2024-01-05T09:14:22.31", "amount": 999, "planType": "Monthly", "serviceType": "Equity" },
    { "id": "SUB-2", "createdOn": "2024-03-05T07:30:00", "amount": 7999, "planType": "Yearly", "serviceType": "Equity" },
    { "id": "SUB-3", "createdOn": "2024-06-18T12:00:00", "amount": 2499, "planType": "Quarterly", "serviceType": "Commodity" }
  ],
  "isSuccess": true,
  "displayMessage": ""
}"#;

/// Seed withdrawal requests covering every action code.
const WITHDRAWAL_DATA: &str = r#"{
  "data": [
    { "transcationId": "WD-1001", "withdrawalRequestDate": "2024-02-01T10:00:00", "paymentMode": "Bank", "accountNumber": "50100234567891", "upI_ID": null, "amount": 5000, "requestAction": "A", "status": "Approved" },
    { "transcationId": "WD-1002", "withdrawalRequestDate": "2024-03-01T10:00:00", "paymentMode": "UPI", "accountNumber": null, "upI_ID": "expert@okhdfc", "amount": 1500, "requestAction": "R", "status": "Rejected" },
    { "transcationId": "WD-1003", "withdrawalRequestDate": "2024-04-02T08:30:00", "paymentMode": "Bank", "accountNumber": "50100234567891", "upI_ID": null, "amount": 3000, "requestAction": "P", "status": "Pending" },
    { "transcationId": "WD-1004", "withdrawalRequestDate": "2024-04-09T12:45:00", "paymentMode": "UPI", "accountNumber": null, "upI_ID": "expert@okhdfc", "amount": 2200, "requestAction": "A", "status": "Approved" }
  ],
  "isSuccess": true,
  "displayMessage": ""
}"#;

/// Seed bank and UPI lookup.
const BANK_UPI_DATA: &str = r#"{
  "data": [
    { "transcationId": "WD-1001", "withdrawalRequestDate": "2024-02-01T10:00:00", "paymentMode": "Bank", "accountNumber": "50100234567891", "amount": 5000, "requestAction": "A", "status": "Approved" }
  ],
  "isSuccess": true,
  "displayMessage": ""
}"#;
