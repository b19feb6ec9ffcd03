//! Rate provider error types.

use devise_shared::{AppError, CurrencyCode, InvalidCurrencyCode};
use thiserror::Error;

/// Errors while fetching or decoding provider data.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Request failed or returned an error status.
    #[error("Rate request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Local rate file could not be read.
    #[error("Rate file unreadable: {0}")]
    Io(#[from] std::io::Error),

    /// Body is not the expected JSON document.
    #[error("Rate response is malformed: {0}")]
    Decode(#[from] serde_json::Error),

    /// Provider reported a failure.
    #[error("Rate provider reported failure: {0}")]
    Unsuccessful(String),

    /// Rates are quoted against another base.
    #[error("Rates are quoted against {got}, expected {expected}")]
    UnexpectedBase {
        /// Configured base.
        expected: CurrencyCode,
        /// Base reported by the provider.
        got: String,
    },

    /// Successful response without a rates object.
    #[error("Rate response has no rates")]
    MissingRates,

    /// Configured base currency is not a currency code.
    #[error(transparent)]
    InvalidBase(#[from] InvalidCurrencyCode),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::InvalidBase(_) => Self::Config(err.to_string()),
            _ => Self::ExternalService(err.to_string()),
        }
    }
}
