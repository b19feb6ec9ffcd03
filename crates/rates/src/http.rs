//! HTTP rate provider.

use std::time::Duration;

use devise_core::currency::RawRates;
use devise_shared::CurrencyCode;
use devise_shared::config::RatesConfig;
use tracing::{debug, info};

use crate::RateProvider;
use crate::error::ProviderError;
use crate::response::parse_response;

/// Fetches `{provider_url}/{BASE}` and decodes the latest-rates document.
#[derive(Debug, Clone)]
pub struct HttpRateProvider {
    client: reqwest::Client,
    url: String,
    base: CurrencyCode,
}

impl HttpRateProvider {
    /// Creates a provider from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the base currency is not a valid code or the
    /// HTTP client cannot be built.
    pub fn new(config: &RatesConfig) -> Result<Self, ProviderError> {
        let base = CurrencyCode::new(&config.base_currency)?;
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("devise/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let url = format!("{}/{}", config.provider_url.trim_end_matches('/'), base);

        Ok(Self { client, url, base })
    }

    /// Full request URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Base currency the rates are requested against.
    #[must_use]
    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }
}

impl RateProvider for HttpRateProvider {
    async fn fetch_rates(&self) -> Result<RawRates, ProviderError> {
        debug!(url = %self.url, "Fetching exchange rates");

        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let rates = parse_response(&body, &self.base)?;

        info!(url = %self.url, currencies = rates.len(), "Fetched exchange rates");
        Ok(rates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn config(url: &str, base: &str) -> RatesConfig {
        RatesConfig {
            provider_url: url.to_string(),
            base_currency: base.to_string(),
            timeout_secs: 5,
        }
    }

    #[rstest]
    #[case("https://open.er-api.com/v6/latest", "EUR", "https://open.er-api.com/v6/latest/EUR")]
    #[case("https://open.er-api.com/v6/latest/", "eur", "https://open.er-api.com/v6/latest/EUR")]
    #[case("http://localhost:8080", "USD", "http://localhost:8080/USD")]
    fn test_url_from_config(#[case] url: &str, #[case] base: &str, #[case] expected: &str) {
        let provider = HttpRateProvider::new(&config(url, base)).unwrap();
        assert_eq!(provider.url(), expected);
    }

    #[test]
    fn test_default_config() {
        let provider = HttpRateProvider::new(&RatesConfig::default()).unwrap();
        assert_eq!(provider.url(), "https://open.er-api.com/v6/latest/EUR");
        assert_eq!(provider.base().as_str(), "EUR");
    }

    #[test]
    fn test_invalid_base_rejected() {
        let err = HttpRateProvider::new(&config("http://localhost", "EURO")).unwrap_err();
        assert!(matches!(err, ProviderError::InvalidBase(_)));
    }
}
