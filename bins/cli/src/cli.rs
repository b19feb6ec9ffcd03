//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, Subcommand};
use devise_shared::CurrencyCode;

/// Currency converter using the latest published exchange rates.
#[derive(Debug, Parser)]
#[command(name = "devise", version, about)]
pub struct Cli {
    /// Read rates from a saved provider response instead of the network.
    #[arg(long, global = true, value_name = "FILE")]
    pub offline_rates: Option<PathBuf>,

    /// Preference file to use instead of the configured one.
    #[arg(long, global = true, value_name = "FILE")]
    pub preferences: Option<PathBuf>,

    /// What to do (defaults to `convert` with no amount).
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert an amount from the source to the target currency.
    Convert {
        /// Amount as typed, e.g. `1 234,56`; words are joined with spaces.
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        amount: Vec<String>,
    },

    /// Change the source and/or target currency.
    #[command(group(
        ArgGroup::new("side")
            .required(true)
            .multiple(true)
            .args(["source", "target"])
    ))]
    Select {
        /// New source currency.
        #[arg(long)]
        source: Option<CurrencyCode>,
        /// New target currency.
        #[arg(long)]
        target: Option<CurrencyCode>,
    },

    /// Exchange source and target currencies.
    Swap,

    /// List currencies available with the current rates.
    List,
}

impl Default for Command {
    fn default() -> Self {
        Self::Convert { amount: Vec::new() }
    }
}
