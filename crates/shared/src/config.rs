//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Rate provider configuration.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Preference persistence configuration.
    #[serde(default)]
    pub preferences: PreferencesConfig,
    /// Display precision configuration.
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Rate provider configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RatesConfig {
    /// Endpoint prefix; the base currency code is appended as the last path segment.
    #[serde(default = "default_provider_url")]
    pub provider_url: String,
    /// Reference currency every rate is expressed against.
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_provider_url() -> String {
    "https://open.er-api.com/v6/latest".to_string()
}

fn default_base_currency() -> String {
    "EUR".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            provider_url: default_provider_url(),
            base_currency: default_base_currency(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Preference persistence configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct PreferencesConfig {
    /// JSON file holding the last selected pair.
    #[serde(default = "default_preferences_path")]
    pub path: PathBuf,
    /// Source currency used when nothing is stored.
    #[serde(default = "default_source")]
    pub default_source: String,
    /// Target currency used when nothing is stored.
    #[serde(default = "default_target")]
    pub default_target: String,
}

fn default_preferences_path() -> PathBuf {
    PathBuf::from("data/preferences.json")
}

fn default_source() -> String {
    "EUR".to_string()
}

fn default_target() -> String {
    "USD".to_string()
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            path: default_preferences_path(),
            default_source: default_source(),
            default_target: default_target(),
        }
    }
}

/// Display precision configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    /// Fixed fractional digits for converted amounts.
    #[serde(default = "default_amount_fraction_digits")]
    pub amount_fraction_digits: u32,
    /// Fixed fractional digits for the "1 X = Y Z" line.
    #[serde(default = "default_rate_fraction_digits")]
    pub rate_fraction_digits: u32,
}

fn default_amount_fraction_digits() -> u32 {
    2
}

fn default_rate_fraction_digits() -> u32 {
    4
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            amount_fraction_digits: default_amount_fraction_digits(),
            rate_fraction_digits: default_rate_fraction_digits(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, lowest priority first: `config/default`, `config/{RUN_MODE}`,
    /// then `DEVISE__SECTION__KEY` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("DEVISE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
