//! Devise command-line converter.
//!
//! Loads rates, restores the saved currency pair, then runs one command.

mod cli;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use devise_core::currency::{
    Converter, CurrencyCatalog, DisplayPrecision, PreferencePair, Preferences, RateStore,
};
use devise_rates::{FileRateProvider, HttpRateProvider, refresh_rates};
use devise_shared::{AppConfig, AppResult, CurrencyCode};
use devise_store::JsonFilePreferenceStore;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays clean for results
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "devise=warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.error_code(), "{err}");
            eprintln!("devise: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run(cli: Cli) -> AppResult<()> {
    let config = AppConfig::load()?;
    let base = CurrencyCode::new(&config.rates.base_currency)?;

    let rates = Arc::new(RateStore::new(base.clone()));
    match &cli.offline_rates {
        Some(path) => refresh_rates(&FileRateProvider::new(path, base), &rates).await?,
        None => refresh_rates(&HttpRateProvider::new(&config.rates)?, &rates).await?,
    };

    let defaults = PreferencePair::new(
        CurrencyCode::new(&config.preferences.default_source)?,
        CurrencyCode::new(&config.preferences.default_target)?,
    );
    let store_path = cli.preferences.unwrap_or(config.preferences.path);
    let store = JsonFilePreferenceStore::new(store_path);
    info!(path = %store.path().display(), "Using preference file");
    let preferences = Preferences::load(store, defaults);

    let mut converter = Converter::new(
        rates,
        preferences,
        CurrencyCatalog::default(),
        DisplayPrecision::from(&config.display),
    );

    match cli.command.unwrap_or_default() {
        Command::Convert { amount } => {
            let snapshot = converter.snapshot(&amount.join(" "))?;
            render::snapshot(&snapshot);
        }
        Command::Select { source, target } => {
            converter.select_pair(source.as_ref(), target.as_ref())?;
            render::pair(converter.pair(), converter.catalog());
        }
        Command::Swap => {
            converter.swap();
            render::pair(converter.pair(), converter.catalog());
        }
        Command::List => {
            render::available(&converter.available(), converter.catalog(), converter.pair());
        }
    }

    Ok(())
}
