//! # Transaction State
//!
//! Holds the open transaction's ledger for a register.
//!
//! ## Thread Safety
//! `ItemList` itself is single-threaded. A host with concurrent handlers
//! (scanner events, keypad, display refresh) shares one `TransactionState`,
//! which wraps the ledger in `Arc<Mutex<T>>` so only one handler touches it
//! at a time.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Register Operations                                  │
//! │                                                                         │
//! │  Scan item ─────────► add() ────────────► list.add(item)               │
//! │  "+1" key ──────────► inc_last() ───────► list.inc_last()              │
//! │  Void key ──────────► cancel() ─────────► list.cancel(..)              │
//! │  Display refresh ───► totals() ─────────► (read only)                  │
//! │  Pay ───────────────► finish() ─────────► closed ItemList handed back, │
//! │                                           fresh ledger opened          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use kupah_core::{Item, ItemList};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::RegisterConfig;
use crate::error::RegisterResult;

/// Totals summary for display refreshes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerTotals {
    pub transaction_id: Uuid,
    /// Ledger lines, administrative entries included.
    pub entries: usize,
    /// Active units, weighed lines counting one each.
    pub units: usize,
    pub subtotal_minor: i128,
}

impl From<&ItemList> for LedgerTotals {
    fn from(list: &ItemList) -> Self {
        LedgerTotals {
            transaction_id: list.id(),
            entries: list.entries(),
            units: list.len(),
            subtotal_minor: list.subtotal().minor(),
        }
    }
}

/// The open transaction of one register.
#[derive(Debug, Clone)]
pub struct TransactionState {
    register_id: String,
    list: Arc<Mutex<ItemList>>,
}

impl TransactionState {
    /// Creates the state with an empty open transaction.
    pub fn new(config: &RegisterConfig) -> Self {
        TransactionState {
            register_id: config.register_id().to_string(),
            list: Arc::new(Mutex::new(ItemList::new())),
        }
    }

    /// Executes a function with read access to the ledger.
    pub fn with_list<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ItemList) -> R,
    {
        let list = self.list.lock().expect("Ledger mutex poisoned");
        f(&list)
    }

    /// Executes a function with write access to the ledger.
    pub fn with_list_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ItemList) -> R,
    {
        let mut list = self.list.lock().expect("Ledger mutex poisoned");
        f(&mut list)
    }

    pub fn register_id(&self) -> &str {
        &self.register_id
    }

    /// Appends a line to the open transaction.
    pub fn add(&self, item: Item) {
        self.with_list_mut(|list| list.add(item));
    }

    /// See [`ItemList::cancel`].
    pub fn cancel(&self, index: Option<usize>, code: Option<&str>, amount: i64) -> RegisterResult<()> {
        self.with_list_mut(|list| list.cancel(index, code, amount))?;
        Ok(())
    }

    /// See [`ItemList::inc_last`].
    pub fn inc_last(&self) -> RegisterResult<Option<i64>> {
        Ok(self.with_list_mut(ItemList::inc_last)?)
    }

    pub fn totals(&self) -> LedgerTotals {
        self.with_list(|list| LedgerTotals::from(list))
    }

    /// Discards the open transaction and starts a new one.
    pub fn begin(&self) -> Uuid {
        self.with_list_mut(|list| {
            if list.entries() > 0 {
                warn!(
                    register = %self.register_id,
                    transaction = %list.id(),
                    entries = list.entries(),
                    "Discarding open transaction"
                );
            }
            *list = ItemList::new();
            list.id()
        })
    }

    /// Closes the open transaction, returning its ledger, and opens a new one.
    pub fn finish(&self) -> ItemList {
        let closed = self.with_list_mut(|list| std::mem::take(list));
        info!(
            register = %self.register_id,
            transaction = %closed.id(),
            units = closed.len(),
            subtotal = %closed.subtotal(),
            "Transaction finished"
        );
        closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegisterError;
    use kupah_core::{CoreError, Tag};

    const MILK: &str = "7290000474021";

    fn state() -> TransactionState {
        let mut config = RegisterConfig::default();
        config.register.id = "register-01".to_string();
        TransactionState::new(&config)
    }

    fn milk(amount: i64) -> Item {
        Item::new(MILK, "Tara Milk 3% 1L Bag", 450, amount, false, Tag::Reduced).unwrap()
    }

    #[test]
    fn test_totals() {
        let state = state();
        state.add(milk(6));
        state.add(milk(3));
        state.cancel(None, Some(MILK), 4).unwrap();

        let totals = state.totals();
        assert_eq!(totals.units, 5);
        assert_eq!(totals.entries, 4);
        assert_eq!(totals.subtotal_minor, 2250);
    }

    #[test]
    fn test_totals_serialize_camel_case() {
        let state = state();
        state.add(milk(1));

        let json = serde_json::to_value(state.totals()).unwrap();
        assert_eq!(json["subtotalMinor"], 450);
        assert_eq!(json["units"], 1);
    }

    #[test]
    fn test_errors_surface_as_core_errors() {
        let state = state();
        let err = state.cancel(None, None, 1).unwrap_err();
        assert!(matches!(err, RegisterError::Core(CoreError::MissingSelector)));

        assert_eq!(state.inc_last().unwrap(), None);
    }

    #[test]
    fn test_finish_opens_new_transaction() {
        let state = state();
        state.add(milk(2));
        let first = state.totals().transaction_id;

        let closed = state.finish();
        assert_eq!(closed.id(), first);
        assert_eq!(closed.count(MILK), 2);

        let totals = state.totals();
        assert_ne!(totals.transaction_id, first);
        assert_eq!(totals.entries, 0);
    }

    #[test]
    fn test_begin_discards_open_lines() {
        let state = state();
        state.add(milk(2));

        let id = state.begin();
        assert_eq!(state.totals().transaction_id, id);
        assert!(state.with_list(ItemList::is_empty));
    }

    #[test]
    fn test_shared_across_threads() {
        let state = state();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let state = state.clone();
                std::thread::spawn(move || state.add(milk(1)))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(state.with_list(|list| list.count(MILK)), 4);
        assert_eq!(state.register_id(), "register-01");
    }
}
