//! # Item List
//!
//! The line-item ledger for one transaction.
//!
//! ## Ledger, Not a Set
//! Lines are only ever appended. Cancelling never removes anything: the
//! voided line is tagged `Canceled` and a `Cancelation` entry with a negated
//! price is appended, so the subtotal nets out while the full history stays
//! on the receipt.
//!
//! ## Split Cancellation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cancel(code = X, amount = 4)                                           │
//! │                                                                         │
//! │  before   #0 X ×6 reduced        #1 X ×3 reduced                        │
//! │                                                                         │
//! │  walk newest → oldest:                                                  │
//! │    #1 ×3 ≤ 4 remaining  → canceled, 1 remaining                         │
//! │    #0 ×6 > 1 remaining  → split: #0 keeps ×5, #2 X ×1 canceled          │
//! │                                                                         │
//! │  after    #0 X ×5 reduced        #1 X ×3 canceled                       │
//! │           #2 X ×1 canceled       #3 X ×4 cancelation (price -450)       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::item::{Item, Tag};
use crate::money::Money;
use crate::validation::validate_amount;
use crate::MAX_AMOUNT;

/// An ordered ledger of [`Item`]s for a single transaction.
///
/// The list exclusively owns its lines. Readers get shared borrows or a
/// cloned snapshot from [`ItemList::items`]; nothing outside the list can
/// mutate a line once it has been added.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemList {
    id: Uuid,
    opened_at: DateTime<Utc>,
    items: Vec<Item>,
}

impl ItemList {
    /// Opens an empty ledger with a fresh transaction id.
    pub fn new() -> Self {
        ItemList {
            id: Uuid::new_v4(),
            opened_at: Utc::now(),
            items: Vec::new(),
        }
    }

    /// Transaction id of this ledger.
    #[inline]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// When this ledger was opened.
    #[inline]
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Independent copy of every line, administrative entries included.
    pub fn items(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Iterates over every line in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    /// The line at `index`, whatever its tag.
    pub fn get(&self, index: usize) -> Option<&Item> {
        self.items.get(index)
    }

    /// Number of ledger lines, including canceled lines and cancelation
    /// entries. See [`ItemList::len`] for the number of units bought.
    pub fn entries(&self) -> usize {
        self.items.len()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Appends a line to the end of the ledger.
    pub fn add(&mut self, item: Item) {
        debug!(
            transaction = %self.id,
            code = item.code(),
            amount = item.amount(),
            by_weight = item.by_weight(),
            tag = ?item.tag(),
            "Line added"
        );
        self.items.push(item);
    }

    /// Cancels `amount` units of a line.
    ///
    /// ## Selection
    /// - `index: Some(i)` selects the line at position `i` (0 included)
    /// - otherwise `code: Some(c)` selects the newest active line with code `c`
    ///
    /// ## Behavior
    /// - Weighed line: the whole line is voided, whatever `amount` says.
    /// - Unit line: up to `amount` units are voided across the active lines
    ///   sharing its code, newest first. A line larger than what is left to
    ///   cancel is split and only the split-off part is voided.
    /// - Either way a `Cancelation` entry copying the selected line, with its
    ///   price negated and `amount` as requested, is appended.
    ///
    /// ## Errors
    /// - `InvalidAmount` if `amount` is outside `1..=MAX_AMOUNT`
    /// - `MissingSelector` if neither `index` nor `code` is given
    /// - `ItemNotFound` if the selector matches no active line
    ///
    /// All checks run before the ledger is modified.
    pub fn cancel(
        &mut self,
        index: Option<usize>,
        code: Option<&str>,
        amount: i64,
    ) -> CoreResult<()> {
        if !(1..=MAX_AMOUNT).contains(&amount) {
            return Err(CoreError::InvalidAmount(amount));
        }

        let target = match (index, code) {
            (Some(index), _) => self
                .items
                .get(index)
                .filter(|item| item.tag().is_standard())
                .map(|_| index)
                .ok_or_else(|| CoreError::ItemNotFound(format!("no active line at index {index}")))?,
            (None, Some(code)) => self
                .last_position(code, &Tag::STANDARD)
                .ok_or_else(|| CoreError::ItemNotFound(format!("no active line with code {code}")))?,
            (None, None) => return Err(CoreError::MissingSelector),
        };

        let original = self.items[target].clone();
        let entry = original.cancelation_entry(amount);

        if original.by_weight() {
            self.items[target].cancel();
        } else {
            self.cancel_units(original.code(), amount);
        }

        info!(
            transaction = %self.id,
            code = original.code(),
            amount,
            by_weight = original.by_weight(),
            "Line canceled"
        );
        self.items.push(entry);

        Ok(())
    }

    /// Voids up to `amount` units of code `code`, newest lines first.
    fn cancel_units(&mut self, code: &str, amount: i64) {
        let candidates: Vec<usize> = self
            .positions(code, &Tag::STANDARD)
            .filter(|&i| !self.items[i].by_weight())
            .collect();

        let mut remaining = amount;
        for i in candidates.into_iter().rev() {
            let line_amount = self.items[i].amount();

            if line_amount <= remaining {
                self.items[i].cancel();
                remaining -= line_amount;
            } else {
                let mut split = self.items[i].clone();
                split.set_amount(remaining);
                split.cancel();
                self.items[i].set_amount(line_amount - remaining);
                debug!(
                    transaction = %self.id,
                    code,
                    kept = line_amount - remaining,
                    voided = remaining,
                    "Line split"
                );
                self.items.push(split);
                remaining = 0;
            }

            if remaining == 0 {
                break;
            }
        }

        if remaining > 0 {
            warn!(
                transaction = %self.id,
                code,
                requested = amount,
                uncovered = remaining,
                "Cancellation exceeds active units"
            );
        }
    }

    /// Adds one unit to the newest active line.
    ///
    /// ## Returns
    /// - `Ok(Some(amount))` with the new amount
    /// - `Ok(None)` if there is no active line (nothing changes)
    ///
    /// ## Errors
    /// - `InvalidOperation` if the newest active line is sold by weight
    /// - `Validation` if the line already holds `MAX_AMOUNT` units
    pub fn inc_last(&mut self) -> CoreResult<Option<i64>> {
        let transaction = self.id;
        let Some(last) = self
            .items
            .iter_mut()
            .rev()
            .find(|item| item.tag().is_standard())
        else {
            return Ok(None);
        };

        if last.by_weight() {
            return Err(CoreError::InvalidOperation(format!(
                "cannot increment weighed line {}",
                last.code()
            )));
        }

        let amount = last.amount() + 1;
        validate_amount(amount)?;
        last.set_amount(amount);
        debug!(%transaction, code = last.code(), amount, "Last line incremented");

        Ok(Some(amount))
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// All active lines with `code`, in insertion order.
    pub fn find_all(&self, code: &str) -> Vec<&Item> {
        self.find_all_tagged(code, false, &Tag::STANDARD)
    }

    /// All lines with `code` whose tag is in `tags` (plus `Canceled` when
    /// `include_canceled`), in insertion order.
    pub fn find_all_tagged(&self, code: &str, include_canceled: bool, tags: &[Tag]) -> Vec<&Item> {
        let tags = effective_tags(include_canceled, tags);
        self.positions(code, &tags)
            .map(|i| &self.items[i])
            .collect()
    }

    /// The newest active line with `code`.
    pub fn find(&self, code: &str) -> Option<&Item> {
        self.find_tagged(code, false, &Tag::STANDARD)
    }

    /// The newest line with `code` whose tag is in `tags` (plus `Canceled`
    /// when `include_canceled`).
    pub fn find_tagged(&self, code: &str, include_canceled: bool, tags: &[Tag]) -> Option<&Item> {
        let tags = effective_tags(include_canceled, tags);
        self.last_position(code, &tags).map(|i| &self.items[i])
    }

    fn positions<'a>(&'a self, code: &'a str, tags: &'a [Tag]) -> impl Iterator<Item = usize> + 'a {
        self.items
            .iter()
            .enumerate()
            .filter(move |(_, item)| item.code() == code && tags.contains(&item.tag()))
            .map(|(i, _)| i)
    }

    fn last_position(&self, code: &str, tags: &[Tag]) -> Option<usize> {
        self.items
            .iter()
            .rposition(|item| item.code() == code && tags.contains(&item.tag()))
    }

    // =========================================================================
    // Aggregates
    // =========================================================================

    /// Active units (or grams, for weighed lines) bought under `code`.
    pub fn count(&self, code: &str) -> i64 {
        self.find_all(code).iter().map(|item| item.amount()).sum()
    }

    /// Sum of every line's cost, canceled lines and cancelation entries
    /// included, so cancellations net out against the lines they void.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(Item::cost).sum()
    }

    /// Active units on the ledger; each weighed line counts as one.
    pub fn len(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.tag().is_standard())
            .map(|item| {
                if item.by_weight() {
                    1
                } else {
                    item.amount() as usize
                }
            })
            .sum()
    }

    /// True when no active units remain.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ItemList {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a ItemList {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

fn effective_tags(include_canceled: bool, tags: &[Tag]) -> Vec<Tag> {
    let mut tags = tags.to_vec();
    if include_canceled && !tags.contains(&Tag::Canceled) {
        tags.push(Tag::Canceled);
    }
    tags
}

// =============================================================================
// Unit Tests
// =============================================================================
