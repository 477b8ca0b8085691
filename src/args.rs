//! These structs provide the CLI interface for the wallet CLI.

use crate::commands::OutputFormat;
use crate::config::{DEFAULT_DASHBOARD_URL, DEFAULT_SUBSCRIPTION_URL, DEFAULT_WALLET_URL};
use crate::model::ExpertId;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// wallet: A command-line view of an expert's earnings and withdrawals.
///
/// Research analysts sell subscriptions and withdraw what they earn. This program fetches an
/// expert's wallet balance, revenue history and withdrawal requests and shows them as a monthly
/// earnings series, a searchable statement and the settled and open withdrawal tables.
///
/// Run `wallet init --expert-id <ID>` first.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. The expert id is the stakeholder id the backend
    /// knows the expert by. The service URLs default to the production endpoints and only need
    /// to be given when pointing at another deployment.
    Init(InitArgs),
    /// Show the amount available for withdrawal.
    Balance,
    /// Show earnings per calendar month.
    Earnings(EarningsArgs),
    /// Show the user statement, optionally searched by mobile number and filtered by date.
    Statement(StatementArgs),
    /// Show settled withdrawals or open withdrawal requests.
    Withdrawals(WithdrawalsArgs),
    /// Fetch everything at once and summarize every view.
    Dashboard,
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG. See the tracing-subscriber crate for instructions.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where the wallet configuration is held. Defaults to ~/expert-wallet
    #[arg(long, env = "WALLET_HOME", default_value_t = default_wallet_home())]
    wallet_home: DisplayPath,

    /// View this expert in place of the one in config.json. Nothing is written to disk.
    #[arg(long, env = "EXPERT_ID")]
    expert_id: Option<ExpertId>,
}

impl Common {
    pub fn new(log_level: LevelFilter, wallet_home: PathBuf, expert_id: Option<ExpertId>) -> Self {
        Self {
            log_level,
            wallet_home: wallet_home.into(),
            expert_id,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn wallet_home(&self) -> &DisplayPath {
        &self.wallet_home
    }

    pub fn expert_id(&self) -> Option<&ExpertId> {
        self.expert_id.as_ref()
    }
}

/// (Not shown): Args for the `wallet init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// The stakeholder id of the expert whose wallet you want to see.
    #[arg(long)]
    expert_id: ExpertId,

    /// Base URL of the subscription service.
    #[arg(long, default_value = DEFAULT_SUBSCRIPTION_URL)]
    subscription_url: String,

    /// Base URL of the dashboard service.
    #[arg(long, default_value = DEFAULT_DASHBOARD_URL)]
    dashboard_url: String,

    /// Base URL of the wallet service.
    #[arg(long, default_value = DEFAULT_WALLET_URL)]
    wallet_url: String,

    /// How many rows to request from list endpoints.
    #[arg(long, default_value_t = 10)]
    page_size: u32,
}

impl InitArgs {
    pub fn new(expert_id: ExpertId, page_size: u32) -> Self {
        Self {
            expert_id,
            subscription_url: DEFAULT_SUBSCRIPTION_URL.to_string(),
            dashboard_url: DEFAULT_DASHBOARD_URL.to_string(),
            wallet_url: DEFAULT_WALLET_URL.to_string(),
            page_size,
        }
    }

    pub fn expert_id(&self) -> &ExpertId {
        &self.expert_id
    }

    pub fn subscription_url(&self) -> &str {
        &self.subscription_url
    }

    pub fn dashboard_url(&self) -> &str {
        &self.dashboard_url
    }

    pub fn wallet_url(&self) -> &str {
        &self.wallet_url
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }
}

/// Which collection the monthly earnings are summed from.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum EarningsSource {
    /// The revenue history that also backs the statement.
    #[default]
    Transactions,
    /// The subscription listing, dated by `createdOn`.
    Subscriptions,
}

serde_plain::derive_display_from_serialize!(EarningsSource);
serde_plain::derive_fromstr_from_deserialize!(EarningsSource);

/// (Not shown): Args for the `wallet earnings` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct EarningsArgs {
    /// Where earnings are read from: transactions or subscriptions.
    #[arg(long, value_enum, default_value_t)]
    source: EarningsSource,
}

impl EarningsArgs {
    pub fn new(source: EarningsSource) -> Self {
        Self { source }
    }

    pub fn source(&self) -> EarningsSource {
        self.source
    }
}

/// (Not shown): Args for the `wallet statement` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct StatementArgs {
    /// Only show rows whose mobile number contains this text.
    #[arg(long)]
    search: Option<String>,

    /// First day to include, as YYYY-MM-DD. Only applies together with --to.
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day to include, as YYYY-MM-DD. Only applies together with --from.
    #[arg(long)]
    to: Option<NaiveDate>,

    /// How to render the rows.
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

impl StatementArgs {
    pub fn new(
        search: Option<String>,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        format: OutputFormat,
    ) -> Self {
        Self {
            search,
            from,
            to,
            format,
        }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

/// The two withdrawal tables.
#[derive(
    Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum WithdrawalView {
    /// Approved withdrawals that have been paid out.
    #[default]
    Settled,
    /// Pending and rejected requests.
    Requests,
}

serde_plain::derive_display_from_serialize!(WithdrawalView);
serde_plain::derive_fromstr_from_deserialize!(WithdrawalView);

/// (Not shown): Args for the `wallet withdrawals` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct WithdrawalsArgs {
    /// Which table to show: settled or requests.
    #[arg(long, value_enum, default_value_t)]
    view: WithdrawalView,

    /// Open the request with this transaction id. Rejected requests show their details.
    #[arg(long)]
    select: Option<String>,

    /// List the requests attached to this bank or UPI record in place of the expert's history.
    #[arg(long)]
    bank_id: Option<String>,

    /// How to render the rows.
    #[arg(long, value_enum, default_value_t)]
    format: OutputFormat,
}

impl WithdrawalsArgs {
    pub fn new(
        view: WithdrawalView,
        select: Option<String>,
        bank_id: Option<String>,
        format: OutputFormat,
    ) -> Self {
        Self {
            view,
            select,
            bank_id,
            format,
        }
    }

    pub fn view(&self) -> WithdrawalView {
        self.view
    }

    pub fn select(&self) -> Option<&str> {
        self.select.as_deref()
    }

    pub fn bank_id(&self) -> Option<&str> {
        self.bank_id.as_deref()
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

fn default_wallet_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("expert-wallet"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --wallet-home or WALLET_HOME instead of relying on the default \
                wallet home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("expert-wallet")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}
