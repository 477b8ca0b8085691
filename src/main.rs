use clap::Parser;
use expert_wallet::args::{Args, Command};
use expert_wallet::{commands, Config, Endpoints, Mode, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().wallet_home().path();

    // This allows for testing the program without reaching the backend. When
    // EXPERT_WALLET_IN_TEST_MODE is set and non-zero in length, then the mode will be Mode::Test,
    // otherwise it will be Mode::Http.
    let mode = Mode::from_env();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => {
            let endpoints = Endpoints::new(
                init_args.subscription_url(),
                init_args.dashboard_url(),
                init_args.wallet_url(),
            )?;
            commands::init(
                home,
                init_args.expert_id().clone(),
                endpoints,
                init_args.page_size(),
            )
            .await?
            .print()
        }

        Command::Balance => commands::balance(load(&args).await?, mode).await?.print(),

        Command::Earnings(earnings_args) => {
            commands::earnings(load(&args).await?, mode, earnings_args.clone())
                .await?
                .print()
        }

        Command::Statement(statement_args) => {
            commands::statement(load(&args).await?, mode, statement_args.clone())
                .await?
                .print()
        }

        Command::Withdrawals(withdrawals_args) => {
            commands::withdrawals(load(&args).await?, mode, withdrawals_args.clone())
                .await?
                .print()
        }

        Command::Dashboard => commands::dashboard(load(&args).await?, mode).await?.print(),
    };
    Ok(())
}

/// Loads the configuration, applying the `--expert-id` override if one was given.
async fn load(args: &Args) -> Result<Config> {
    let config = Config::load(args.common().wallet_home().path()).await?;
    Ok(match args.common().expert_id() {
        Some(expert_id) => {
            debug!("Overriding the configured expert with {expert_id}");
            config.with_expert_id(expert_id.clone())
        }
        None => config,
    })
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
