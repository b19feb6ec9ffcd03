//! Active currency pair and its persistence seam.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use devise_shared::CurrencyCode;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{FxError, StoreError};
use super::rate_table::RateTable;

/// Store key for the source currency.
pub const SOURCE_KEY: &str = "fromCurrency";

/// Store key for the target currency.
pub const TARGET_KEY: &str = "toCurrency";

/// Which side of the pair a selection applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Currency the user types an amount in.
    Source,
    /// Currency the amount is converted into.
    Target,
}

/// Source and target currency currently selected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreferencePair {
    source: CurrencyCode,
    target: CurrencyCode,
}

impl PreferencePair {
    /// Creates a pair. Codes are checked against rates on selection and
    /// conversion, not here.
    #[must_use]
    pub const fn new(source: CurrencyCode, target: CurrencyCode) -> Self {
        Self { source, target }
    }

    /// Source currency.
    #[must_use]
    pub fn source(&self) -> &CurrencyCode {
        &self.source
    }

    /// Target currency.
    #[must_use]
    pub fn target(&self) -> &CurrencyCode {
        &self.target
    }

    /// Currency for `role`.
    #[must_use]
    pub fn get(&self, role: Role) -> &CurrencyCode {
        match role {
            Role::Source => &self.source,
            Role::Target => &self.target,
        }
    }

    /// Returns a pair with `role` set to `code`; the other role is kept.
    ///
    /// Selecting the same code for both roles is allowed.
    ///
    /// # Errors
    ///
    /// [`FxError::UnknownCurrency`] if `rates` has no entry for `code`.
    pub fn select(
        &self,
        role: Role,
        code: &CurrencyCode,
        rates: &RateTable,
    ) -> Result<Self, FxError> {
        if !rates.contains(code) {
            return Err(FxError::unknown(code));
        }
        let mut next = self.clone();
        match role {
            Role::Source => next.source = code.clone(),
            Role::Target => next.target = code.clone(),
        }
        Ok(next)
    }

    /// Returns the pair with source and target exchanged.
    #[must_use]
    pub fn swap(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

/// Raw entries read back from a preference store.
///
/// Values are kept as stored; they are parsed when loaded into
/// [`Preferences`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoredPreferences {
    /// Value under [`SOURCE_KEY`].
    pub source: Option<String>,
    /// Value under [`TARGET_KEY`].
    pub target: Option<String>,
}

/// Persistence for the selected pair.
pub trait PreferenceStore: Send + Sync {
    /// Reads the stored entries. Missing entries are `None`.
    fn load(&self) -> Result<StoredPreferences, StoreError>;

    /// Writes both entries.
    fn save(&self, pair: &PreferencePair) -> Result<(), StoreError>;
}

/// In-memory store, for tests and hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: Mutex<StoredPreferences>,
    saves: AtomicUsize,
}

impl MemoryPreferenceStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-filled with entries.
    #[must_use]
    pub fn with_entries(entries: StoredPreferences) -> Self {
        Self {
            entries: Mutex::new(entries),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful `save` calls.
    #[must_use]
    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn load(&self) -> Result<StoredPreferences, StoreError> {
        let entries = self
            .entries
            .lock()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        Ok(entries.clone())
    }

    fn save(&self, pair: &PreferencePair) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;
        entries.source = Some(pair.source().to_string());
        entries.target = Some(pair.target().to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// The selected pair plus the store it is mirrored to.
///
/// Every successful `select` or `swap` calls [`PreferenceStore::save`]
/// exactly once. A failed save is logged and the in-memory pair is kept.
#[derive(Debug)]
pub struct Preferences<S> {
    pair: PreferencePair,
    store: S,
}

impl<S: PreferenceStore> Preferences<S> {
    /// Restores the pair from `store`, falling back to `defaults` per role
    /// for missing or malformed entries.
    pub fn load(store: S, defaults: PreferencePair) -> Self {
        let stored = store.load().unwrap_or_else(|err| {
            warn!(error = %err, "Could not read saved currencies, using defaults");
            StoredPreferences::default()
        });

        let source = restore(stored.source.as_deref(), SOURCE_KEY)
            .unwrap_or_else(|| defaults.source.clone());
        let target = restore(stored.target.as_deref(), TARGET_KEY)
            .unwrap_or_else(|| defaults.target.clone());

        Self {
            pair: PreferencePair::new(source, target),
            store,
        }
    }

    /// Current pair.
    #[must_use]
    pub fn pair(&self) -> &PreferencePair {
        &self.pair
    }

    /// Underlying store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Selects `code` for `role` and persists the result.
    ///
    /// # Errors
    ///
    /// [`FxError::UnknownCurrency`] if `code` is not in `rates`; the pair and
    /// the store are left untouched.
    pub fn select(
        &mut self,
        role: Role,
        code: &CurrencyCode,
        rates: &RateTable,
    ) -> Result<&PreferencePair, FxError> {
        let next = self.pair.select(role, code, rates)?;
        Ok(self.commit(next))
    }

    /// Selects new codes for one or both roles and persists the result once.
    ///
    /// Either every requested code is applied or none is.
    ///
    /// # Errors
    ///
    /// [`FxError::UnknownCurrency`] for the first code not in `rates`; the
    /// pair and the store are left untouched.
    pub fn select_pair(
        &mut self,
        source: Option<&CurrencyCode>,
        target: Option<&CurrencyCode>,
        rates: &RateTable,
    ) -> Result<&PreferencePair, FxError> {
        let mut next = self.pair.clone();
        if let Some(code) = source {
            next = next.select(Role::Source, code, rates)?;
        }
        if let Some(code) = target {
            next = next.select(Role::Target, code, rates)?;
        }
        Ok(self.commit(next))
    }

    /// Swaps source and target and persists the result.
    pub fn swap(&mut self) -> &PreferencePair {
        let next = self.pair.swap();
        self.commit(next)
    }

    fn commit(&mut self, next: PreferencePair) -> &PreferencePair {
        self.pair = next;
        if let Err(err) = self.store.save(&self.pair) {
            warn!(
                error = %err,
                source = %self.pair.source,
                target = %self.pair.target,
                "Could not save selected currencies"
            );
        }
        &self.pair
    }
}

fn restore(value: Option<&str>, key: &str) -> Option<CurrencyCode> {
    let value = value?;
    match CurrencyCode::new(value) {
        Ok(code) => Some(code),
        Err(err) => {
            warn!(key, error = %err, "Ignoring malformed saved currency");
            None
        }
    }
}
