//! Conversion session: recomputes everything the screen shows on demand.
//!
//! Nothing here reacts to changes by itself. The host calls
//! [`Converter::snapshot`] after every keystroke, selection, swap or
//! refresh, and renders the returned data.

use std::sync::Arc;

use devise_shared::CurrencyCode;
use devise_shared::config::DisplayConfig;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::catalog::CurrencyCatalog;
use super::conversion::ConversionCalculator;
use super::error::FxError;
use super::number_text::{DisplayAmount, NumberText};
use super::preference::{PreferencePair, PreferenceStore, Preferences, Role};
use super::rate_store::RateStore;
use super::rate_table::RateTable;

/// Fixed fractional digits used on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayPrecision {
    /// Digits for the converted amount.
    pub amount_digits: u32,
    /// Digits for the unit-rate line.
    pub rate_digits: u32,
}

impl Default for DisplayPrecision {
    fn default() -> Self {
        Self {
            amount_digits: 2,
            rate_digits: 4,
        }
    }
}

impl From<&DisplayConfig> for DisplayPrecision {
    fn from(config: &DisplayConfig) -> Self {
        Self {
            amount_digits: config.amount_fraction_digits,
            rate_digits: config.rate_fraction_digits,
        }
    }
}

/// Everything the display surface needs for one input tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplaySnapshot {
    /// Pair the values were computed for.
    pub pair: PreferencePair,
    /// Amount as typed.
    pub source: DisplayAmount,
    /// Converted amount at the fixed amount precision.
    pub converted: DisplayAmount,
    /// Unrounded value of one source unit in the target currency.
    pub unit_rate: Decimal,
    /// `1 EUR = 1,1000 USD`; absent when source and target are the same.
    pub unit_rate_line: Option<String>,
    /// Symbol for the source currency.
    pub source_symbol: String,
    /// Symbol for the target currency.
    pub target_symbol: String,
    /// Catalog currencies present in the rate table, in picker order.
    pub available: Vec<CurrencyCode>,
}

/// Ties rates, preferences and formatting together.
pub struct Converter<S> {
    rates: Arc<RateStore>,
    preferences: Preferences<S>,
    catalog: CurrencyCatalog,
    precision: DisplayPrecision,
}

impl<S: PreferenceStore> Converter<S> {
    /// Creates a session.
    pub fn new(
        rates: Arc<RateStore>,
        preferences: Preferences<S>,
        catalog: CurrencyCatalog,
        precision: DisplayPrecision,
    ) -> Self {
        Self {
            rates,
            preferences,
            catalog,
            precision,
        }
    }

    /// Current pair.
    #[must_use]
    pub fn pair(&self) -> &PreferencePair {
        self.preferences.pair()
    }

    /// Shared rate store.
    #[must_use]
    pub fn rates(&self) -> &Arc<RateStore> {
        &self.rates
    }

    /// Reference catalog.
    #[must_use]
    pub fn catalog(&self) -> &CurrencyCatalog {
        &self.catalog
    }

    /// Preference holder (and through it, the store).
    #[must_use]
    pub fn preferences(&self) -> &Preferences<S> {
        &self.preferences
    }

    /// Catalog currencies usable with the current rates.
    #[must_use]
    pub fn available(&self) -> Vec<CurrencyCode> {
        self.rates.snapshot().list_available(&self.catalog.codes())
    }

    /// Computes the display data for `raw_input`.
    ///
    /// Uses one rate table snapshot for every value, so a concurrent
    /// refresh cannot mix two tables in one result.
    ///
    /// # Errors
    ///
    /// [`FxError::UnknownCurrency`] if either side of the pair is missing
    /// from the current rates.
    pub fn snapshot(&self, raw_input: &str) -> Result<DisplaySnapshot, FxError> {
        let table = self.rates.snapshot();
        self.snapshot_with(&table, raw_input)
    }

    fn snapshot_with(&self, table: &RateTable, raw_input: &str) -> Result<DisplaySnapshot, FxError> {
        let pair = self.preferences.pair().clone();
        let source = DisplayAmount::from_input(raw_input);

        let converted =
            ConversionCalculator::convert(source.value, pair.source(), pair.target(), table)?;
        let unit_rate = ConversionCalculator::unit_rate(pair.source(), pair.target(), table)?;

        debug!(
            from = %pair.source(),
            to = %pair.target(),
            amount = %source.canonical,
            result = %converted,
            "Converted amount"
        );

        let unit_rate_line = (pair.source() != pair.target()).then(|| {
            format!(
                "1 {} = {} {}",
                pair.source(),
                NumberText::format(unit_rate, Some(self.precision.rate_digits)),
                pair.target()
            )
        });

        Ok(DisplaySnapshot {
            converted: DisplayAmount::from_value(converted, Some(self.precision.amount_digits)),
            unit_rate,
            unit_rate_line,
            source_symbol: self.catalog.symbol_or_code(pair.source()).to_string(),
            target_symbol: self.catalog.symbol_or_code(pair.target()).to_string(),
            available: table.list_available(&self.catalog.codes()),
            source,
            pair,
        })
    }

    /// Selects the source currency.
    pub fn select_source(&mut self, code: &CurrencyCode) -> Result<&PreferencePair, FxError> {
        self.select(Role::Source, code)
    }

    /// Selects the target currency.
    pub fn select_target(&mut self, code: &CurrencyCode) -> Result<&PreferencePair, FxError> {
        self.select(Role::Target, code)
    }

    /// Selects `code` for `role`, validated against the current rates.
    ///
    /// # Errors
    ///
    /// [`FxError::UnknownCurrency`] if `code` has no current rate.
    pub fn select(&mut self, role: Role, code: &CurrencyCode) -> Result<&PreferencePair, FxError> {
        let table = self.rates.snapshot();
        self.preferences.select(role, code, &table)
    }

    /// Selects source and/or target in one step, validated against the
    /// current rates. Nothing changes unless every code is known.
    ///
    /// # Errors
    ///
    /// [`FxError::UnknownCurrency`] for the first code with no current rate.
    pub fn select_pair(
        &mut self,
        source: Option<&CurrencyCode>,
        target: Option<&CurrencyCode>,
    ) -> Result<&PreferencePair, FxError> {
        let table = self.rates.snapshot();
        self.preferences.select_pair(source, target, &table)
    }

    /// Swaps source and target.
    pub fn swap(&mut self) -> &PreferencePair {
        self.preferences.swap()
    }

    /// Installs new raw rates; on failure the previous rates stay active.
    ///
    /// # Errors
    ///
    /// [`FxError::RefreshFailed`] if the rates are rejected.
    pub fn refresh<I, K>(&self, raw: I) -> Result<Arc<RateTable>, FxError>
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: AsRef<str>,
    {
        self.rates.refresh(raw)
    }
}
