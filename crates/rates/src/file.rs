//! Rate provider backed by a saved provider response on disk.

use std::path::{Path, PathBuf};

use devise_core::currency::RawRates;
use devise_shared::CurrencyCode;
use tracing::info;

use crate::RateProvider;
use crate::error::ProviderError;
use crate::response::parse_response;

/// Reads a latest-rates document from a file (offline use, fixtures).
#[derive(Debug, Clone)]
pub struct FileRateProvider {
    path: PathBuf,
    base: CurrencyCode,
}

impl FileRateProvider {
    /// Creates a provider reading `path`, expecting rates against `base`.
    pub fn new(path: impl Into<PathBuf>, base: CurrencyCode) -> Self {
        Self {
            path: path.into(),
            base,
        }
    }

    /// File being read.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RateProvider for FileRateProvider {
    async fn fetch_rates(&self) -> Result<RawRates, ProviderError> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        let rates = parse_response(&body, &self.base)?;
        info!(
            path = %self.path.display(),
            currencies = rates.len(),
            "Loaded exchange rates from file"
        );
        Ok(rates)
    }
}
