//! Configuration file handling for the wallet CLI.
//!
//! The configuration file is stored at `$WALLET_HOME/config.json` and holds the expert id that
//! every request is keyed by, the base URLs of the three backend services and the page size used
//! for list endpoints.

use crate::api::Page;
use crate::model::ExpertId;
use crate::{utils, Result};
use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

const APP_NAME: &str = "expert-wallet";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";

pub const DEFAULT_SUBSCRIPTION_URL: &str = "https://copartners.in:5009/api/";
pub const DEFAULT_DASHBOARD_URL: &str = "https://copartners.in:5132/api/";
pub const DEFAULT_WALLET_URL: &str = "https://copartners.in:5135/api/";

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$WALLET_HOME` and from there it loads `$WALLET_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
    expert_id: ExpertId,
    endpoints: Endpoints,
}

impl Config {
    /// Creates the data directory and writes an initial `config.json` into it.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of data directory, e.g. `$HOME/expert-wallet`
    /// - `expert_id` - The expert whose wallet is viewed.
    /// - `endpoints` - Base URLs of the backend services.
    /// - `page_size` - Rows requested per page from list endpoints.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(
        dir: impl Into<PathBuf>,
        expert_id: ExpertId,
        endpoints: Endpoints,
        page_size: u32,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the wallet home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;
        let config_path = root.join(CONFIG_JSON);

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            expert_id: expert_id.to_string(),
            endpoints: EndpointsFile::from(&endpoints),
            page_size,
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
            expert_id,
            endpoints,
        })
    }

    /// This will
    /// - validate that `wallet_home` exists and that the config file exists
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(wallet_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = wallet_home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The wallet home directory is missing, run 'wallet init' first")?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let expert_id = ExpertId::new(config_file.expert_id.as_str())
            .context("The config file does not name an expert")?;
        let endpoints = Endpoints::try_from(&config_file.endpoints)?;

        Ok(Self {
            root,
            config_path,
            config_file,
            expert_id,
            endpoints,
        })
    }

    /// Replaces the configured expert for this run only. Nothing is written to disk.
    pub fn with_expert_id(mut self, expert_id: ExpertId) -> Self {
        self.expert_id = expert_id;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn expert_id(&self) -> &ExpertId {
        &self.expert_id
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn page_size(&self) -> u32 {
        self.config_file.page_size
    }

    /// The first page of list endpoints, sized by `page_size`.
    pub fn page(&self) -> Page {
        Page::first(self.page_size())
    }
}

/// Base URLs for the three backend services.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    /// Serves the subscription listing.
    pub(crate) subscription: Url,
    /// Serves the revenue history.
    pub(crate) dashboard: Url,
    /// Serves the wallet balance, withdrawal requests and bank details.
    pub(crate) wallet: Url,
}

impl Endpoints {
    pub fn new(subscription: &str, dashboard: &str, wallet: &str) -> Result<Self> {
        Ok(Self {
            subscription: base_url(subscription)?,
            dashboard: base_url(dashboard)?,
            wallet: base_url(wallet)?,
        })
    }

    pub fn defaults() -> Result<Self> {
        Self::new(
            DEFAULT_SUBSCRIPTION_URL,
            DEFAULT_DASHBOARD_URL,
            DEFAULT_WALLET_URL,
        )
    }

    pub fn subscription(&self) -> &Url {
        &self.subscription
    }

    pub fn dashboard(&self) -> &Url {
        &self.dashboard
    }

    pub fn wallet(&self) -> &Url {
        &self.wallet
    }
}

/// Parses a base URL, adding a trailing slash so that joining a relative path appends to it.
fn base_url(s: &str) -> Result<Url> {
    let mut url = Url::parse(s.trim()).with_context(|| format!("Invalid base URL '{s}'"))?;
    if url.cannot_be_a_base() {
        bail!("The URL '{s}' cannot be used as a base URL");
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "expert-wallet",
///   "config_version": 1,
///   "expert_id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
///   "endpoints": {
///     "subscription": "https://copartners.in:5009/api/",
///     "dashboard": "https://copartners.in:5132/api/",
///     "wallet": "https://copartners.in:5135/api/"
///   },
///   "page_size": 10
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "expert-wallet"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// The expert (stakeholder) id used for every request
    expert_id: String,

    /// Base URLs of the backend services
    #[serde(default)]
    endpoints: EndpointsFile,

    /// Rows requested per page from list endpoints
    #[serde(default = "default_page_size")]
    page_size: u32,
}

fn default_page_size() -> u32 {
    Page::DEFAULT_SIZE
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct EndpointsFile {
    subscription: String,
    dashboard: String,
    wallet: String,
}

impl Default for EndpointsFile {
    fn default() -> Self {
        Self {
            subscription: DEFAULT_SUBSCRIPTION_URL.to_string(),
            dashboard: DEFAULT_DASHBOARD_URL.to_string(),
            wallet: DEFAULT_WALLET_URL.to_string(),
        }
    }
}

impl From<&Endpoints> for EndpointsFile {
    fn from(value: &Endpoints) -> Self {
        Self {
            subscription: value.subscription.to_string(),
            dashboard: value.dashboard.to_string(),
            wallet: value.wallet.to_string(),
        }
    }
}

impl TryFrom<&EndpointsFile> for Endpoints {
    type Error = anyhow::Error;

    fn try_from(value: &EndpointsFile) -> Result<Self> {
        Endpoints::new(&value.subscription, &value.dashboard, &value.wallet)
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = utils::read(path).await?;

        let config: ConfigFile = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        anyhow::ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let p = path.as_ref();
        let data = serde_json::to_string_pretty(self).context("Unable to serialize config")?;
        utils::write(p, data)
            .await
            .context("Unable to write config file")
    }
}
