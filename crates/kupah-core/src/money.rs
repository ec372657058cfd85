//! # Money Module
//!
//! Provides the `Money` type used for line costs and subtotals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Minor Units (agorot, cents, ...)                 │
//! │    Prices are i64 minor units, weighed lines are priced per 1000 grams │
//! │    with integer division, and costs are carried in an i128.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kupah_core::money::Money;
//!
//! let price = Money::from_minor(450);
//! let line = price.multiply_quantity(6);
//! assert_eq!(line.minor(), 2700);
//!
//! // 1.2 kg at 29.90 per kg
//! let fish = Money::from_minor(2990).per_kilogram(1200);
//! assert_eq!(fish.minor(), 3588);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use ts_rs::TS;

use crate::GRAMS_PER_KILOGRAM;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit.
///
/// ## Design Decisions
/// - **Signed**: cancelation entries carry negative costs
/// - **i128**: a line cost is at most `MAX_PRICE * MAX_AMOUNT` (below 2^47)
///   and a ledger holds fewer than 2^63 lines, so neither a cost nor a
///   subtotal can overflow
/// - **No currency**: locale and currency handling belong to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i128);

impl Money {
    /// Creates a Money value from minor units.
    ///
    /// ## Example
    /// ```rust
    /// use kupah_core::money::Money;
    ///
    /// let price = Money::from_minor(1099);
    /// assert_eq!(price.minor(), 1099);
    /// ```
    #[inline]
    pub const fn from_minor(minor: i64) -> Self {
        Money(minor as i128)
    }

    /// Returns the value in minor units.
    #[inline]
    pub const fn minor(&self) -> i128 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i128 {
        self.0 / 100
    }

    /// Returns the minor unit remainder (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i128 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Multiplies a unit price by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use kupah_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(450).multiply_quantity(3).minor(), 1350);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty as i128)
    }

    /// Prices `grams` of a good sold at `self` per kilogram.
    ///
    /// ## Rounding
    /// Integer division truncating toward zero. A negated price over the same
    /// weight yields exactly the negated cost, so a cancelation entry offsets
    /// the line it voids to the minor unit.
    ///
    /// ```rust
    /// use kupah_core::money::Money;
    ///
    /// assert_eq!(Money::from_minor(2990).per_kilogram(1234).minor(), 3689);
    /// assert_eq!(Money::from_minor(-2990).per_kilogram(1234).minor(), -3689);
    /// ```
    #[inline]
    pub const fn per_kilogram(&self, grams: i64) -> Self {
        Money(self.0 * grams as i128 / GRAMS_PER_KILOGRAM as i128)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain `major.minor` rendering for logs; receipts format currency themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
