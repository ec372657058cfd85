//! # Ledger Lines
//!
//! The `Item` record and its `Tag`.
//!
//! ## Line Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Item                                                                   │
//! │  ─────────────────────────────────────────────────────────────────────  │
//! │  code       "7290000474021"   digits only, not unique within a list     │
//! │  name       "Tara Milk 3% 1L"  at most 32 characters                    │
//! │  price      450               per unit, or per kg when by_weight        │
//! │  amount     6                 units, or grams when by_weight            │
//! │  by_weight  false                                                       │
//! │  tag        Reduced           Normal | Reduced | Canceled | Cancelation │
//! │                                                                         │
//! │  cost = amount × price            (unit)                                │
//! │  cost = amount × price / 1000     (weighed, truncated toward zero)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_amount, validate_code, validate_price};
use crate::MAX_NAME_LENGTH;

// =============================================================================
// Tag
// =============================================================================

/// The state of a ledger line.
///
/// `Normal` and `Reduced` are the standard tags: lines a customer is actually
/// buying. `Canceled` and `Cancelation` are administrative markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Tag {
    /// Regular line.
    #[default]
    Normal,
    /// Discounted line.
    Reduced,
    /// Line that has been voided.
    Canceled,
    /// Negative adjustment entry recording a cancellation.
    Cancelation,
}

impl Tag {
    /// Tags matched by default lookups.
    pub const STANDARD: [Tag; 2] = [Tag::Normal, Tag::Reduced];

    /// Returns true for `Normal` and `Reduced`.
    #[inline]
    pub const fn is_standard(&self) -> bool {
        matches!(self, Tag::Normal | Tag::Reduced)
    }
}

// =============================================================================
// Item
// =============================================================================

/// One priced line on an item list or receipt.
///
/// `amount` is a unit count when `by_weight` is false and a weight in grams
/// otherwise. Keeping it integral means fractions of grams are never priced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct Item {
    code: String,
    name: String,
    price: i64,
    amount: i64,
    by_weight: bool,
    tag: Tag,
}

impl Item {
    /// Creates a validated line.
    ///
    /// ## Errors
    /// - `InvalidCode` if `code` is not a non-empty string of ASCII digits
    /// - `Validation` if `price` is outside `0..=MAX_PRICE` or `amount` is
    ///   outside `1..=MAX_AMOUNT`
    ///
    /// `name` is truncated to [`MAX_NAME_LENGTH`] characters without error.
    ///
    /// ## Example
    /// ```rust
    /// use kupah_core::{Item, Tag};
    ///
    /// let milk = Item::new("7290000474021", "Tara Milk 3% 1L Bag", 450, 6, false, Tag::Reduced)
    ///     .unwrap();
    /// assert_eq!(milk.cost().minor(), 2700);
    ///
    /// assert!(Item::new("-1", "Bad", 100, 1, false, Tag::Normal).is_err());
    /// ```
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        price: i64,
        amount: i64,
        by_weight: bool,
        tag: Tag,
    ) -> CoreResult<Self> {
        let code = code.into();
        validate_code(&code).map_err(|_| CoreError::InvalidCode(code.clone()))?;
        validate_price(price)?;
        validate_amount(amount)?;

        Ok(Item {
            code,
            name: truncate_name(name.into()),
            price,
            amount,
            by_weight,
            tag,
        })
    }

    /// Creates a regular line sold by unit.
    pub fn unit(
        code: impl Into<String>,
        name: impl Into<String>,
        price: i64,
        amount: i64,
    ) -> CoreResult<Self> {
        Self::new(code, name, price, amount, false, Tag::Normal)
    }

    /// Creates a regular line sold by weight.
    pub fn weighed(
        code: impl Into<String>,
        name: impl Into<String>,
        price_per_kg: i64,
        grams: i64,
    ) -> CoreResult<Self> {
        Self::new(code, name, price_per_kg, grams, true, Tag::Normal)
    }

    /// Returns the line with `tag` replaced.
    pub fn with_tag(mut self, tag: Tag) -> Self {
        self.tag = tag;
        self
    }

    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the display name, truncating it like the constructor does.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = truncate_name(name.into());
    }

    /// Unit price, or price per kilogram for weighed lines.
    #[inline]
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Units, or grams for weighed lines.
    #[inline]
    pub fn amount(&self) -> i64 {
        self.amount
    }

    #[inline]
    pub fn by_weight(&self) -> bool {
        self.by_weight
    }

    #[inline]
    pub fn tag(&self) -> Tag {
        self.tag
    }

    /// The line cost, derived from price and amount on every call.
    pub fn cost(&self) -> Money {
        let price = Money::from_minor(self.price);
        if self.by_weight {
            price.per_kilogram(self.amount)
        } else {
            price.multiply_quantity(self.amount)
        }
    }

    /// Returns true if this line has been voided.
    #[inline]
    pub fn canceled(&self) -> bool {
        self.tag == Tag::Canceled
    }

    /// Voids this line.
    #[inline]
    pub fn cancel(&mut self) {
        self.tag = Tag::Canceled;
    }

    #[inline]
    pub(crate) fn set_amount(&mut self, amount: i64) {
        self.amount = amount;
    }

    /// Builds the negative adjustment entry recording that `amount` of this
    /// line was canceled.
    pub(crate) fn cancelation_entry(&self, amount: i64) -> Item {
        Item {
            price: -self.price,
            amount,
            tag: Tag::Cancelation,
            ..self.clone()
        }
    }
}

fn truncate_name(name: String) -> String {
    match name.char_indices().nth(MAX_NAME_LENGTH) {
        Some((cut, _)) => name[..cut].to_string(),
        None => name,
    }
}

// =============================================================================
// Deserialization
// =============================================================================

/// Wire shape of an `Item`; checked by `Item::try_from` before use.
#[derive(Deserialize)]
struct ItemRecord {
    code: String,
    name: String,
    price: i64,
    amount: i64,
    #[serde(default)]
    by_weight: bool,
    #[serde(default)]
    tag: Tag,
}

impl TryFrom<ItemRecord> for Item {
    type Error = CoreError;

    fn try_from(record: ItemRecord) -> CoreResult<Self> {
        // Cancelation entries legitimately carry a negated price.
        if record.tag == Tag::Cancelation {
            validate_code(&record.code)
                .map_err(|_| CoreError::InvalidCode(record.code.clone()))?;
            validate_price(record.price.saturating_neg())?;
            validate_amount(record.amount)?;
            return Ok(Item {
                code: record.code,
                name: truncate_name(record.name),
                price: record.price,
                amount: record.amount,
                by_weight: record.by_weight,
                tag: record.tag,
            });
        }

        Item::new(
            record.code,
            record.name,
            record.price,
            record.amount,
            record.by_weight,
            record.tag,
        )
    }
}

impl<'de> Deserialize<'de> for Item {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let record = ItemRecord::deserialize(deserializer)?;
        Item::try_from(record).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::{MAX_AMOUNT, MAX_PRICE};
    use proptest::prelude::*;

    const MILK: &str = "7290000474021";

    #[test]
    fn test_unit_cost() {
        let item = Item::unit(MILK, "Tara Milk 3% 1L Bag", 450, 6).unwrap();
        assert_eq!(item.cost().minor(), 2700);
        assert!(!item.by_weight());
        assert_eq!(item.tag(), Tag::Normal);
    }

    #[test]
    fn test_weighed_cost() {
        // 1200 g at 29.90/kg
        let fish = Item::weighed("7290004645434", "Fish", 2990, 1200).unwrap();
        assert_eq!(fish.cost().minor(), 3588);

        let odd = Item::weighed("7290004645434", "Fish", 2990, 1234).unwrap();
        assert_eq!(odd.cost().minor(), 3689);
    }

    #[test]
    fn test_invalid_code() {
        for code in ["", "-5", "12a", "7.5", " 1"] {
            let err = Item::unit(code, "X", 100, 1).unwrap_err();
            assert!(matches!(err, CoreError::InvalidCode(ref c) if c == code));
        }
    }

    #[test]
    fn test_strict_price_and_amount() {
        assert!(matches!(
            Item::unit(MILK, "Milk", -1, 1),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            Item::unit(MILK, "Milk", 450, 0),
            Err(CoreError::Validation(_))
        ));
        assert!(Item::unit(MILK, "Free sample", 0, 1).is_ok());
    }

    #[test]
    fn test_price_and_amount_bounds() {
        let big = Item::unit("1", "Big", MAX_PRICE, MAX_AMOUNT).unwrap();
        assert_eq!(big.cost().minor(), MAX_PRICE as i128 * MAX_AMOUNT as i128);

        let heavy = Item::weighed("1", "Heavy", MAX_PRICE, MAX_AMOUNT).unwrap();
        assert_eq!(heavy.cost().minor(), MAX_PRICE as i128 * 1000);

        assert!(matches!(
            Item::unit("1", "Big", i64::MAX / 2, 3),
            Err(CoreError::Validation(ValidationError::OutOfRange { max: MAX_PRICE, .. }))
        ));
        assert!(matches!(
            Item::unit("1", "Big", MAX_PRICE + 1, 1),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
        assert!(matches!(
            Item::weighed("1", "Heavy", 100, MAX_AMOUNT + 1),
            Err(CoreError::Validation(ValidationError::OutOfRange { max: MAX_AMOUNT, .. }))
        ));
    }

    #[test]
    fn test_name_truncated() {
        let long = "A".repeat(50);
        let item = Item::unit(MILK, long, 450, 1).unwrap();
        assert_eq!(item.name().chars().count(), MAX_NAME_LENGTH);

        // Counts characters, not bytes
        let hebrew = "חלב".repeat(20);
        let mut item = Item::unit(MILK, hebrew, 450, 1).unwrap();
        assert_eq!(item.name().chars().count(), MAX_NAME_LENGTH);

        item.set_name("Short");
        assert_eq!(item.name(), "Short");
    }

    #[test]
    fn test_cancel() {
        let mut item = Item::unit(MILK, "Milk", 450, 1)
            .unwrap()
            .with_tag(Tag::Reduced);
        assert!(!item.canceled());

        item.cancel();
        assert!(item.canceled());
        assert_eq!(item.tag(), Tag::Canceled);
    }

    #[test]
    fn test_cancelation_entry_negates_cost() {
        let item = Item::unit(MILK, "Milk", 450, 6).unwrap();
        let entry = item.cancelation_entry(6);

        assert_eq!(entry.tag(), Tag::Cancelation);
        assert_eq!(entry.price(), -450);
        assert_eq!(entry.code(), MILK);
        assert_eq!((item.cost() + entry.cost()).minor(), 0);
    }

    #[test]
    fn test_standard_tags() {
        assert!(Tag::Normal.is_standard());
        assert!(Tag::Reduced.is_standard());
        assert!(!Tag::Canceled.is_standard());
        assert!(!Tag::Cancelation.is_standard());
        assert!(Tag::STANDARD.iter().all(Tag::is_standard));
    }

    #[test]
    fn test_json_roundtrip_validates() {
        let item = Item::unit(MILK, "Milk", 450, 2)
            .unwrap()
            .with_tag(Tag::Reduced);
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"tag\":\"reduced\""));
        let back: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(back, item);

        let bad = r#"{"code":"12x","name":"Milk","price":450,"amount":1}"#;
        assert!(serde_json::from_str::<Item>(bad).is_err());

        let entry = r#"{"code":"12","name":"Milk","price":-450,"amount":1,"tag":"cancelation"}"#;
        let entry: Item = serde_json::from_str(entry).unwrap();
        assert_eq!(entry.cost().minor(), -450);
    }

    #[test]
    fn test_json_rejects_out_of_range_lines() {
        let price = format!(r#"{{"code":"1","name":"Big","price":{},"amount":3}}"#, i64::MAX / 2);
        assert!(serde_json::from_str::<Item>(&price).is_err());

        let amount = format!(r#"{{"code":"1","name":"Big","price":1,"amount":{}}}"#, i64::MAX);
        assert!(serde_json::from_str::<Item>(&amount).is_err());

        let entry = format!(
            r#"{{"code":"1","name":"Big","price":{},"amount":1,"tag":"cancelation"}}"#,
            i64::MIN
        );
        assert!(serde_json::from_str::<Item>(&entry).is_err());
    }

    proptest! {
        #[test]
        fn digit_codes_build_items(code in "[0-9]{1,18}") {
            let item = Item::unit(code.as_str(), "Item", 100, 1).unwrap();
            prop_assert_eq!(item.code(), code.as_str());
        }

        #[test]
        fn codes_with_a_non_digit_fail_with_invalid_code(
            prefix in "[0-9]{0,6}",
            bad in "[^0-9]",
            suffix in "[0-9]{0,6}",
        ) {
            let code = format!("{prefix}{bad}{suffix}");
            let err = Item::unit(code.as_str(), "Item", 100, 1).unwrap_err();
            prop_assert!(matches!(err, CoreError::InvalidCode(ref c) if *c == code));
        }
    }
}
