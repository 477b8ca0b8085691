//! The fetch layer: the `Backend` trait and its HTTP and in-memory implementations.

mod envelope;
mod http;
mod test_backend;

use crate::model::{ExpertId, TransactionRecord, WalletBalance, WithdrawalRequest};
use crate::{Config, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

pub(crate) use envelope::ApiResponse;
pub use test_backend::{Resource, TestBackend};

/// The environment variable that switches the app to the in-memory backend.
pub const TEST_MODE_ENV: &str = "EXPERT_WALLET_IN_TEST_MODE";

pub(crate) const WALLET_BALANCE_PATH: &str = "Wallet/GetWalletWithdrawalBalance";
pub(crate) const TRANSACTIONS_PATH: &str = "RADashboard/GetDashboardRAListingData";
pub(crate) const WITHDRAWALS_PATH: &str = "Withdrawal/GetWithdrawalByUserId";
pub(crate) const BANK_UPI_PATH: &str = "Withdrawal/GetBankUPIById";
pub(crate) const SUBSCRIPTIONS_PATH: &str = "Subscription/GetByExpertsId";

/// The four read-only resources that back the wallet views.
///
/// Each call is independent of the others; callers may issue them concurrently.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    /// The expert's withdrawable balance.
    async fn wallet_balance(&self, expert: &ExpertId) -> Result<WalletBalance>;

    /// One page of the expert's revenue history.
    async fn transactions(&self, expert: &ExpertId, page: Page) -> Result<Vec<TransactionRecord>>;

    /// Every subscription sold by the expert. The rows carry `createdOn` in place of `date`.
    async fn subscriptions(&self, expert: &ExpertId) -> Result<Vec<TransactionRecord>>;

    /// One page of the expert's withdrawal requests.
    async fn withdrawal_requests(
        &self,
        expert: &ExpertId,
        user_type: UserType,
        page: Page,
    ) -> Result<Vec<WithdrawalRequest>>;

    /// The withdrawal requests associated with a bank or UPI record.
    async fn bank_upi(&self, bank_id: &str) -> Result<Vec<WithdrawalRequest>>;
}

/// Whether to talk to the real backend or to the seeded in-memory one.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Http,
    Test,
}

impl Mode {
    /// `Mode::Test` when `EXPERT_WALLET_IN_TEST_MODE` is set and non-empty, else `Mode::Http`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Test,
            _ => Mode::Http,
        }
    }
}

/// The role the wallet belongs to, sent as the `userType` query parameter.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    /// A research analyst, i.e. an expert.
    #[default]
    #[serde(rename = "RA")]
    ResearchAnalyst,
}

serde_plain::derive_display_from_serialize!(UserType);

/// Paging parameters for list endpoints. Pages are numbered from 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    number: u32,
    size: u32,
}

impl Page {
    pub const DEFAULT_SIZE: u32 = 10;

    pub fn new(number: u32, size: u32) -> Self {
        Self {
            number: number.max(1),
            size: size.max(1),
        }
    }

    pub fn first(size: u32) -> Self {
        Self::new(1, size)
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::first(Self::DEFAULT_SIZE)
    }
}

/// Creates the backend selected by `mode`.
pub fn backend(config: &Config, mode: Mode) -> Result<Box<dyn Backend>> {
    debug!("Using the {mode:?} backend");
    Ok(match mode {
        Mode::Http => Box::new(http::HttpBackend::new(config.endpoints().clone())?),
        Mode::Test => Box::new(TestBackend::default()),
    })
}
