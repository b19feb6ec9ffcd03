//! Atomic holder for the current rate table.
//!
//! Readers take an `Arc` snapshot and never block on a refresh in flight.
//! A refresh validates outside the lock and only swaps the pointer inside
//! it, so no reader can observe a half-built table.

use std::sync::{Arc, RwLock};

use devise_shared::CurrencyCode;
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::error::FxError;
use super::rate_table::RateTable;

/// Copy-on-write cell for the current [`RateTable`].
#[derive(Debug)]
pub struct RateStore {
    current: RwLock<Arc<RateTable>>,
}

impl RateStore {
    /// Creates a store holding an empty table for `base`.
    #[must_use]
    pub fn new(base: CurrencyCode) -> Self {
        Self::with_table(RateTable::empty(base))
    }

    /// Creates a store holding `table`.
    #[must_use]
    pub fn with_table(table: RateTable) -> Self {
        Self {
            current: RwLock::new(Arc::new(table)),
        }
    }

    /// Returns the table installed right now.
    ///
    /// The snapshot stays valid and unchanged even if a refresh installs a
    /// newer table afterwards.
    #[must_use]
    pub fn snapshot(&self) -> Arc<RateTable> {
        // The lock only ever guards a pointer swap, so a poisoned guard
        // still holds a complete table.
        let guard = self
            .current
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    /// Validates raw rates and installs them as the new table.
    ///
    /// # Errors
    ///
    /// Returns [`FxError::RefreshFailed`] and keeps the current table if the
    /// batch is rejected.
    pub fn refresh<I, K>(&self, raw: I) -> Result<Arc<RateTable>, FxError>
    where
        I: IntoIterator<Item = (K, Decimal)>,
        K: AsRef<str>,
    {
        let current = self.snapshot();
        match current.refresh(raw) {
            Ok(table) => {
                let table = Arc::new(table);
                self.swap(Arc::clone(&table));
                info!(
                    base = %table.base(),
                    currencies = table.len(),
                    "Exchange rates refreshed"
                );
                Ok(table)
            }
            Err(err) => {
                warn!(
                    error = %err,
                    kept = current.len(),
                    "Rejected exchange rate refresh, keeping previous rates"
                );
                Err(err.into())
            }
        }
    }

    /// Installs an already validated table.
    pub fn install(&self, table: RateTable) {
        self.swap(Arc::new(table));
    }

    fn swap(&self, table: Arc<RateTable>) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = table;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::error::RefreshError;
    use rust_decimal_macros::dec;
    use std::thread;

    fn code(s: &str) -> CurrencyCode {
        CurrencyCode::new(s).unwrap()
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = RateStore::new(code("EUR"));
        assert!(store.snapshot().is_empty());
        assert_eq!(store.snapshot().base(), &code("EUR"));
    }

    #[test]
    fn test_refresh_installs_table() {
        let store = RateStore::new(code("EUR"));
        let table = store.refresh([("EUR", dec!(1)), ("USD", dec!(1.1))]).unwrap();
        assert_eq!(table.get(&code("USD")), Some(dec!(1.1)));
        assert_eq!(store.snapshot().get(&code("USD")), Some(dec!(1.1)));
        assert_eq!(store.snapshot().get(&code("EUR")), Some(Decimal::ONE));
    }

    #[test]
    fn test_invalid_refresh_keeps_previous_table() {
        let store = RateStore::new(code("EUR"));
        store.refresh([("EUR", dec!(1)), ("USD", dec!(1.1))]).unwrap();

        let err = store
            .refresh([("EUR", dec!(1)), ("USD", dec!(-3))])
            .unwrap_err();
        assert_eq!(
            err,
            FxError::RefreshFailed(RefreshError::NonPositiveRate {
                code: code("USD"),
                rate: dec!(-3),
            })
        );
        assert_eq!(store.snapshot().get(&code("USD")), Some(dec!(1.1)));
    }

    #[test]
    fn test_snapshot_survives_later_refresh() {
        let store = RateStore::new(code("EUR"));
        store.refresh([("EUR", dec!(1)), ("USD", dec!(1.1))]).unwrap();
        let old = store.snapshot();

        store.refresh([("EUR", dec!(1)), ("USD", dec!(1.2))]).unwrap();

        assert_eq!(old.get(&code("USD")), Some(dec!(1.1)));
        assert_eq!(store.snapshot().get(&code("USD")), Some(dec!(1.2)));
    }

    #[test]
    fn test_concurrent_readers_never_see_torn_table() {
        let store = Arc::new(RateStore::new(code("EUR")));
        store
            .refresh([("EUR", dec!(1)), ("USD", dec!(1)), ("GBP", dec!(1))])
            .unwrap();

        let writer = {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                for i in 1..200i64 {
                    let rate = Decimal::new(i, 2);
                    store
                        .refresh([("EUR", dec!(1)), ("USD", rate), ("GBP", rate)])
                        .unwrap();
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for _ in 0..500 {
                        let table = store.snapshot();
                        // Every table sets USD and GBP together.
                        assert_eq!(table.get(&code("USD")), table.get(&code("GBP")));
                        assert_eq!(table.len(), 3);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn test_install() {
        let store = RateStore::new(code("EUR"));
        let table = RateTable::from_raw(code("EUR"), [("EUR", dec!(1)), ("CHF", dec!(0.94))]).unwrap();
        store.install(table.clone());
        assert_eq!(*store.snapshot(), table);
    }
}
