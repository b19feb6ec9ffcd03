//! Decoding of the "latest rates" JSON document.
//!
//! Expected shape:
//!
//! ```json
//! { "result": "success", "base_code": "EUR", "rates": { "EUR": 1, "USD": 1.08 } }
//! ```
//!
//! On failure the provider answers `{ "result": "error", "error-type": "..." }`.

use std::collections::HashMap;

use devise_core::currency::RawRates;
use devise_shared::CurrencyCode;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::ProviderError;

const SUCCESS: &str = "success";

#[derive(Debug, Deserialize)]
struct LatestRates {
    result: String,
    #[serde(default)]
    base_code: Option<String>,
    #[serde(default)]
    rates: Option<HashMap<String, Decimal>>,
    #[serde(default, rename = "error-type")]
    error_type: Option<String>,
}

/// Decodes a provider body into raw rates quoted against `base`.
///
/// Only the document shape is checked here; rate values are validated when
/// the table is built.
pub fn parse_response(body: &str, base: &CurrencyCode) -> Result<RawRates, ProviderError> {
    let response: LatestRates = serde_json::from_str(body)?;

    if response.result != SUCCESS {
        return Err(ProviderError::Unsuccessful(
            response.error_type.unwrap_or(response.result),
        ));
    }

    if let Some(got) = response.base_code {
        if !got.eq_ignore_ascii_case(base.as_str()) {
            return Err(ProviderError::UnexpectedBase {
                expected: base.clone(),
                got,
            });
        }
    }

    response.rates.ok_or(ProviderError::MissingRates)
}
