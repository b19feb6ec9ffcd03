//! Exchange rate providers for Devise.
//!
//! A provider delivers one mapping of currency code to rate versus the base
//! currency. Validation and installation belong to
//! [`devise_core::currency::RateStore`]; providers only fetch and decode.

pub mod error;
pub mod file;
pub mod http;
pub mod response;

use std::future::Future;
use std::sync::Arc;

use devise_core::currency::{RateStore, RateTable, RawRates};
use devise_shared::AppResult;
use tracing::warn;

pub use error::ProviderError;
pub use file::FileRateProvider;
pub use http::HttpRateProvider;
pub use response::parse_response;

/// Source of raw exchange rates.
pub trait RateProvider {
    /// Fetches the latest rates versus the provider's base currency.
    fn fetch_rates(&self) -> impl Future<Output = Result<RawRates, ProviderError>> + Send;
}

/// Fetches from `provider` and installs the result in `store`.
///
/// On any failure the store keeps serving its previous table.
pub async fn refresh_rates<P: RateProvider>(
    provider: &P,
    store: &RateStore,
) -> AppResult<Arc<RateTable>> {
    let raw = provider.fetch_rates().await.inspect_err(|err| {
        warn!(error = %err, "Could not fetch exchange rates, keeping previous rates");
    })?;
    Ok(store.refresh(raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use devise_shared::{AppError, CurrencyCode};
    use rust_decimal_macros::dec;

    struct FixedProvider(Result<RawRates, String>);

    impl RateProvider for FixedProvider {
        async fn fetch_rates(&self) -> Result<RawRates, ProviderError> {
            self.0.clone().map_err(ProviderError::Unsuccessful)
        }
    }

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    fn raw(pairs: &[(&str, rust_decimal::Decimal)]) -> RawRates {
        pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[tokio::test]
    async fn test_refresh_installs_fetched_rates() {
        let store = RateStore::new(code("EUR"));
        let provider = FixedProvider(Ok(raw(&[("EUR", dec!(1)), ("USD", dec!(1.1))])));

        let table = refresh_rates(&provider, &store).await.unwrap();
        assert_eq!(table.get(&code("USD")), Some(dec!(1.1)));
        assert_eq!(store.snapshot().len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_previous_rates() {
        let store = RateStore::new(code("EUR"));
        store.refresh([("EUR", dec!(1)), ("USD", dec!(1.1))]).unwrap();
        let provider = FixedProvider(Err("quota-reached".into()));

        let err = refresh_rates(&provider, &store).await.unwrap_err();
        assert!(matches!(err, AppError::ExternalService(_)));
        assert_eq!(store.snapshot().get(&code("USD")), Some(dec!(1.1)));
    }

    #[tokio::test]
    async fn test_invalid_rates_keep_previous_rates() {
        let store = RateStore::new(code("EUR"));
        store.refresh([("EUR", dec!(1)), ("USD", dec!(1.1))]).unwrap();
        let provider = FixedProvider(Ok(raw(&[("USD", dec!(1.2))])));

        let err = refresh_rates(&provider, &store).await.unwrap_err();
        assert_eq!(err.error_code(), "EXTERNAL_SERVICE_ERROR");
        assert_eq!(store.snapshot().get(&code("USD")), Some(dec!(1.1)));
    }
}
