//! Exchange rates versus a single base currency.

use std::collections::HashMap;

use devise_shared::CurrencyCode;
use rust_decimal::Decimal;

use super::error::{FxError, RefreshError};

/// Raw rate mapping as delivered by a rate provider.
pub type RawRates = HashMap<String, Decimal>;

/// Rates for one refresh, keyed by currency code.
///
/// Each rate is the number of units of that currency worth one unit of the
/// base currency. The base always maps to exactly one. A table is never
/// mutated after construction; a refresh builds a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    base: CurrencyCode,
    rates: HashMap<CurrencyCode, Decimal>,
}

impl RateTable {
    /// Creates a table with no rates at all (before the first refresh).
    #[must_use]
    pub fn empty(base: CurrencyCode) -> Self {
        Self {
            base,
            rates: HashMap::new(),
        }
    }

    /// Builds a table from raw provider data.
    ///
    /// # Errors
    ///
    /// Rejects the whole batch if a key is not a currency code, a rate is
    /// zero or negative, or the base is missing or not exactly one.
    pub fn from_raw<I, K>(base: CurrencyCode, raw: I) -> Result<Self, RefreshError>
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: AsRef<str>,
    {
        let mut rates = HashMap::new();
        for (key, rate) in raw {
            let key = key.as_ref();
            let code =
                CurrencyCode::new(key).map_err(|_| RefreshError::InvalidCode(key.to_string()))?;
            if rate <= Decimal::ZERO {
                return Err(RefreshError::NonPositiveRate { code, rate });
            }
            rates.insert(code, rate);
        }

        match rates.get_mut(&base) {
            None => return Err(RefreshError::MissingBaseRate { base }),
            Some(rate) if *rate != Decimal::ONE => {
                return Err(RefreshError::BaseRateNotOne { base, rate: *rate });
            }
            // Drop any scale (1.0000) so the self-rate is the canonical one.
            Some(rate) => *rate = Decimal::ONE,
        }

        Ok(Self { base, rates })
    }

    /// Builds a replacement table with the same base.
    ///
    /// `self` is untouched whether or not the batch is accepted.
    pub fn refresh<I, K>(&self, raw: I) -> Result<Self, RefreshError>
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: AsRef<str>,
    {
        Self::from_raw(self.base.clone(), raw)
    }

    /// Base currency.
    #[must_use]
    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    /// Rate for `code`, or `None` when the table has no entry.
    #[must_use]
    pub fn get(&self, code: &CurrencyCode) -> Option<Decimal> {
        self.rates.get(code).copied()
    }

    /// Rate for `code`, failing with [`FxError::UnknownCurrency`].
    pub fn require(&self, code: &CurrencyCode) -> Result<Decimal, FxError> {
        self.get(code).ok_or_else(|| FxError::unknown(code))
    }

    /// Returns true if the table has a rate for `code`.
    #[must_use]
    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.rates.contains_key(code)
    }

    /// Number of currencies in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true before the first successful refresh.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    /// All codes in the table, sorted.
    #[must_use]
    pub fn codes(&self) -> Vec<CurrencyCode> {
        let mut codes: Vec<_> = self.rates.keys().cloned().collect();
        codes.sort();
        codes
    }

    /// Filters `candidates` down to codes present in the table, keeping
    /// candidate order.
    pub fn list_available<'a, I>(&self, candidates: I) -> Vec<CurrencyCode>
    where
        I: IntoIterator<Item = &'a CurrencyCode>,
    {
        candidates
            .into_iter()
            .filter(|code| self.contains(code))
            .cloned()
            .collect()
    }
}
