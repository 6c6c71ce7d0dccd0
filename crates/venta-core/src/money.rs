//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing catalog prices as doubles:                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A running total recomputed on every tap drifts the same way.           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Catalog 10.99 ──► 1099 cents ──► exact sums ──► 10.99 on the wire    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Representation
//! The catalog and the sale endpoint both speak decimal numbers in major
//! units (`"precio": 10.99`). `Money` serializes to and from that shape, and
//! converts to cents exactly once at the boundary.
//!
//! ## Usage
//! ```rust
//! use venta_core::money::Money;
//!
//! let price = Money::from_cents(1099);       // $10.99
//! let total = price + Money::from_major(5);  // $15.99
//! assert_eq!(total.cents(), 1599);
//!
//! let parsed = Money::from_decimal(10.99).unwrap();
//! assert_eq!(parsed, price);
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays closed under subtraction; catalog
///   validation rejects negative prices separately
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Custom serde**: decimal major units on the wire, cents in memory
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Device.base_price ──┐                                                  │
/// │  Option.additional ──┼──► base_plus_customizations ──┐                  │
/// │                      │                               ├──► total_price   │
/// │  AddOn.price ────────┴──► promotion check ───────────┘        │         │
/// │                                                               ▼         │
/// │                                          SaleRequest.precioFinal        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole major units.
    ///
    /// ```rust
    /// use venta_core::money::Money;
    ///
    /// assert_eq!(Money::from_major(100).cents(), 10_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major * 100)
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Largest amount accepted from the wire: one trillion major units.
    ///
    /// Every value up to this bound, in cents, is exactly representable as
    /// an `f64`, and validated catalogs keep their worst-case total under it
    /// so pricing sums never overflow.
    pub const MAX_AMOUNT: Money = Money(100_000_000_000_000);

    /// Converts a decimal amount in major units to cents.
    ///
    /// The amount must be a whole number of cents: `0.004` is refused rather
    /// than silently becoming `0.00`. Binary noise from the decimal encoding
    /// (`0.1 + 0.2`) is tolerated. Returns `None` for NaN, infinities,
    /// fractional cents and magnitudes above [`Money::MAX_AMOUNT`].
    ///
    /// ```rust
    /// use venta_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(110.5), Some(Money::from_cents(11050)));
    /// assert_eq!(Money::from_decimal(0.1 + 0.2), Some(Money::from_cents(30)));
    /// assert_eq!(Money::from_decimal(0.004), None);
    /// assert_eq!(Money::from_decimal(f64::NAN), None);
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        if !amount.is_finite() {
            return None;
        }

        let scaled = amount * 100.0;
        let cents = scaled.round();
        if cents.abs() > Self::MAX_AMOUNT.0 as f64 {
            return None;
        }

        let tolerance = (scaled.abs() * 4.0 * f64::EPSILON).max(1e-6);
        if (scaled - cents).abs() > tolerance {
            return None;
        }

        Some(Money(cents as i64))
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub const fn checked_add(self, other: Money) -> Option<Money> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns the amount as a decimal number of major units.
    ///
    /// Only for the wire and for display; never feed this back into sums.
    #[inline]
    pub fn to_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows two decimals with a dollar sign.
///
/// ## Note
/// This is for logs and debugging. Locale-aware formatting belongs to the
/// presentation layer.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.minor())
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

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Serde (decimal major units on the wire)
// =============================================================================

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::from_decimal(amount).ok_or_else(|| invalid_amount(amount))
    }
}

/// Deserialization error for a wire amount [`Money::from_decimal`] refuses.
pub(crate) fn invalid_amount<E: de::Error>(amount: f64) -> E {
    E::custom(format!(
        "amount {} is not a whole number of cents within {}",
        amount,
        Money::MAX_AMOUNT
    ))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.major(), 10);
        assert_eq!(money.minor(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::zero()), "$0.00");
    }

    #[test]
    fn test_from_decimal_requires_whole_cents() {
        assert_eq!(Money::from_decimal(10.99), Some(Money::from_cents(1099)));
        assert_eq!(Money::from_decimal(-1.0), Some(Money::from_cents(-100)));
        assert_eq!(Money::from_decimal(123_456_789.99), Some(Money::from_cents(12_345_678_999)));
        assert_eq!(Money::from_decimal(0.004), None);
        assert_eq!(Money::from_decimal(0.125), None);
        assert_eq!(Money::from_decimal(100.004), None);
        assert_eq!(Money::from_decimal(f64::INFINITY), None);
    }

    #[test]
    fn test_from_decimal_rejects_out_of_range() {
        assert_eq!(Money::from_decimal(1e12), Some(Money::MAX_AMOUNT));
        assert_eq!(Money::from_decimal(-1e12), Some(Money::from_cents(-Money::MAX_AMOUNT.cents())));
        assert_eq!(Money::from_decimal(6.0e16), None);
        assert_eq!(Money::from_decimal(1e300), None);
    }

    #[test]
    fn test_checked_add() {
        assert_eq!(
            Money::from_cents(1).checked_add(Money::from_cents(2)),
            Some(Money::from_cents(3))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_sub_cent_amounts_are_refused_on_the_wire() {
        assert!(serde_json::from_str::<Money>("0.004").is_err());
        let err = serde_json::from_str::<Money>("6.0e16").unwrap_err();
        assert!(err.to_string().contains("whole number of cents"));
    }

    #[test]
    fn test_decimal_sum_has_no_drift() {
        let total: Money = [0.1, 0.2, 0.3]
            .iter()
            .filter_map(|v| Money::from_decimal(*v))
            .sum();
        assert_eq!(total, Money::from_cents(60));
        assert_eq!(total.to_decimal(), 0.6);
    }

    #[test]
    fn test_serde_uses_major_units() {
        let json = serde_json::to_string(&Money::from_cents(11050)).unwrap();
        assert_eq!(json, "110.5");

        let parsed: Money = serde_json::from_str("15").unwrap();
        assert_eq!(parsed, Money::from_major(15));

        let parsed: Money = serde_json::from_str("10.99").unwrap();
        assert_eq!(parsed.cents(), 1099);
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);

        let mut c = a;
        c += b;
        assert_eq!(c.cents(), 1500);
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(!Money::zero().is_negative());
        assert!(Money::from_cents(-1).is_negative());
        assert_eq!(Money::default(), Money::zero());
    }
}
