//! Multi-currency handling: rates, conversion, number text and preferences.

pub mod catalog;
pub mod conversion;
pub mod converter;
pub mod error;
pub mod number_text;
pub mod preference;
pub mod rate_store;
pub mod rate_table;

#[cfg(test)]
mod props;

pub use catalog::{CurrencyCatalog, CurrencyInfo, DEFAULT_CURRENCIES};
pub use conversion::ConversionCalculator;
pub use converter::{Converter, DisplayPrecision, DisplaySnapshot};
pub use error::{FxError, RefreshError, StoreError};
pub use number_text::{DisplayAmount, NumberText};
pub use preference::{
    MemoryPreferenceStore, PreferencePair, PreferenceStore, Preferences, Role, SOURCE_KEY,
    StoredPreferences, TARGET_KEY,
};
pub use rate_store::RateStore;
pub use rate_table::{RateTable, RawRates};
