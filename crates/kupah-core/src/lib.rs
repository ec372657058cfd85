//! # kupah-core: Pure Ledger Logic for Kupah
//!
//! This crate is the **heart** of Kupah. It holds the line-item ledger a
//! checkout keeps while a customer's purchase is being rung up, with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Kupah Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         Checkout front end (scanner, keypad, display)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │           kupah-register (config, logging, sessions)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ kupah-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   item    │  │ item_list │  │   money   │  │ validation│  │   │
//! │  │   │ Item, Tag │  │ ItemList  │  │   Money   │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`] - A single priced line and its tag
//! - [`item_list`] - The ledger: add, find, cancel, count, subtotal
//! - [`money`] - Integer minor-unit money
//! - [`error`] - Domain error types
//! - [`validation`] - Line validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use kupah_core::{Item, ItemList, Tag};
//!
//! let mut list = ItemList::new();
//! list.add(Item::new("7290000474021", "Tara Milk 3% 1L Bag", 450, 6, false, Tag::Reduced)?);
//! list.add(Item::new("7290000474021", "Tara Milk 3% 1L Bag", 450, 3, false, Tag::Reduced)?);
//!
//! list.cancel(None, Some("7290000474021"), 4)?;
//!
//! assert_eq!(list.count("7290000474021"), 5);
//! assert_eq!(list.subtotal().minor(), 2250);
//! # Ok::<(), kupah_core::CoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod item;
pub mod item_list;
pub mod money;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use item::{Item, Tag};
pub use item_list::ItemList;
pub use money::Money;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a line's display name, in characters.
///
/// Longer names are cut silently; the receipt column is this wide.
pub const MAX_NAME_LENGTH: usize = 32;

/// Grams in a kilogram; weighed lines are priced per kilogram.
pub const GRAMS_PER_KILOGRAM: i64 = 1000;

/// Highest accepted price in minor units (1,000,000.00), per unit or per
/// kilogram.
pub const MAX_PRICE: i64 = 100_000_000;

/// Highest accepted amount on one line: units, or grams (one tonne) for
/// weighed lines. Also caps a single cancellation and `inc_last`.
pub const MAX_AMOUNT: i64 = 1_000_000;
