//! expert-wallet: the earnings and withdrawal views of a research analyst's wallet.
//!
//! The engine modules (`model`, `dates`, `earnings`, `ledger`, `withdrawals`) are pure and
//! synchronous. `api` fetches the raw collections, `dashboard` combines them, and `commands`
//! backs the `wallet` binary.

pub mod api;
pub mod args;
pub mod commands;
mod config;
pub mod dashboard;
pub mod dates;
pub mod earnings;
mod error;
pub mod ledger;
pub mod model;
mod utils;
pub mod withdrawals;


pub use api::Mode;
pub use config::{Config, Endpoints};
pub use error::Error;
pub use error::Result;
