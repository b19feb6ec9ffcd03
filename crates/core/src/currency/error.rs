//! Currency engine error types.

use devise_shared::{AppError, CurrencyCode};
use rust_decimal::Decimal;
use thiserror::Error;

/// Reasons a batch of raw rates is rejected.
///
/// Any of these leaves the previously installed table in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RefreshError {
    /// Base currency has no self-rate in the batch.
    #[error("Rate data has no entry for base currency {base}")]
    MissingBaseRate {
        /// Base currency.
        base: CurrencyCode,
    },

    /// Base currency self-rate is not exactly one.
    #[error("Base currency {base} must have rate 1, got {rate}")]
    BaseRateNotOne {
        /// Base currency.
        base: CurrencyCode,
        /// Rate found in the batch.
        rate: Decimal,
    },

    /// Zero or negative rate.
    #[error("Rate for {code} must be positive, got {rate}")]
    NonPositiveRate {
        /// Offending currency.
        code: CurrencyCode,
        /// Rate found in the batch.
        rate: Decimal,
    },

    /// Key is not a three-letter code.
    #[error("Rate data contains invalid currency code {0:?}")]
    InvalidCode(String),
}

/// Currency engine errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FxError {
    /// Raw rate data was malformed or incomplete.
    #[error("Rate refresh failed: {0}")]
    RefreshFailed(#[from] RefreshError),

    /// Currency is absent from the current rate table.
    #[error("Unknown currency: {code}")]
    UnknownCurrency {
        /// Requested currency.
        code: CurrencyCode,
    },

    /// Result does not fit in a decimal.
    #[error("Conversion of {from} to {to} overflowed")]
    Overflow {
        /// Source currency.
        from: CurrencyCode,
        /// Target currency.
        to: CurrencyCode,
    },
}

impl FxError {
    /// Shorthand for [`FxError::UnknownCurrency`].
    #[must_use]
    pub fn unknown(code: &CurrencyCode) -> Self {
        Self::UnknownCurrency { code: code.clone() }
    }
}

/// Preference store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying storage could not be read or written.
    #[error("Preference storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be decoded or encoded.
    #[error("Preference data is corrupt: {0}")]
    Corrupt(String),

    /// Store is unusable (e.g., a poisoned lock).
    #[error("Preference store unavailable: {0}")]
    Unavailable(String),
}

impl From<FxError> for AppError {
    fn from(err: FxError) -> Self {
        match err {
            FxError::RefreshFailed(_) => Self::ExternalService(err.to_string()),
            FxError::UnknownCurrency { .. } => Self::NotFound(err.to_string()),
            FxError::Overflow { .. } => Self::Validation(err.to_string()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::Storage(err.to_string())
    }
}
