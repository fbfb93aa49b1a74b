//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Stacked discounts make it worse: each percentage step compounds        │
//! │  the drift, and a checkout total that is off by one cent is a           │
//! │  customer-support ticket.                                               │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    All discount math happens in i64 cents. Major-unit decimals          │
//! │    exist only at the input/output boundary of the engine.               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use promo_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1099); // $10.99
//!
//! // Or from a major-unit decimal at the input boundary
//! let same = Money::from_major_units(10.99);
//! assert_eq!(price, same);
//!
//! // Arithmetic operations
//! let doubled = price * 2;                     // $21.98
//! let total = price + Money::from_cents(500);  // $15.99
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: subtraction of a too-large discount must be
///   representable so it can be clamped, not wrapped
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// CartLineItem.unit_price ──► line subtotal ──► cart subtotal (cents)
///                                                     │
///                              eligible subtotal ◄────┤
///                                                     │
///                              discount per coupon ◄──┘
///
/// EVERY monetary value inside the pricing engine flows through this type.
/// Conversion back to major units happens once, when PricingResult is built.
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use promo_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from a major-unit decimal (e.g., dollars),
    /// rounding half-up to the nearest cent.
    ///
    /// This is the ONLY place floating point enters the engine: cart line
    /// prices and shipping fees arrive as decimals from the storefront and
    /// are converted to cents here, before any discount math runs.
    ///
    /// ## Example
    /// ```rust
    /// use promo_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_units(10.99).cents(), 1099);
    /// assert_eq!(Money::from_major_units(0.125).cents(), 13); // half-up
    /// ```
    #[inline]
    pub fn from_major_units(amount: f64) -> Self {
        Money((amount * 100.0).round() as i64)
    }

    /// Converts back to a major-unit decimal for the output boundary.
    ///
    /// ## Example
    /// ```rust
    /// use promo_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(330).to_major_units(), 3.30);
    /// ```
    #[inline]
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use promo_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.cents(), 897); // $8.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Computes a percentage of this amount, rounding DOWN (floor) to the
    /// nearest cent. The percentage is clamped to `[0, 100]`.
    ///
    /// ## Why Floor, Not Half-Up?
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  FLOOR ROUNDING FOR DISCOUNTS                                       │
    /// │                                                                     │
    /// │  A discount is money the merchant gives away. Rounding the          │
    /// │  give-away UP hands out fractional cents that were never offered:  │
    /// │    33% of $10.00 = $3.30 exactly?  No: 1000 × 33 / 100 = 330.0     │
    /// │    33% of $10.01 = 330.33 cents → 330, never 331                   │
    /// │                                                                     │
    /// │  Floor biases in the merchant's favor by at most one cent per       │
    /// │  coupon, and keeps stacked passes reproducible.                     │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Example
    /// ```rust
    /// use promo_core::money::Money;
    ///
    /// let eligible = Money::from_cents(1000); // $10.00
    /// assert_eq!(eligible.percent_floor(33).cents(), 330);
    /// assert_eq!(eligible.percent_floor(150).cents(), 1000); // clamped to 100%
    /// ```
    pub fn percent_floor(&self, pct: u32) -> Money {
        let pct = pct.min(100);
        // Use i128 to prevent overflow on large amounts.
        // Integer division truncates, which is floor for non-negative cents.
        let discount = (self.0 as i128 * pct as i128) / 100;
        Money::from_cents(discount as i64)
    }

    /// Returns the smaller of two amounts. Used to cap discounts at what
    /// is actually available to discount.
    #[inline]
    pub fn min(self, other: Money) -> Money {
        Money(self.0.min(other.0))
    }

    /// Clamps the value to the range `[0, upper]`.
    ///
    /// Every applied discount passes through this: a discount can never be
    /// negative and can never exceed the running subtotal it is taken from.
    #[inline]
    pub fn clamp_to(self, upper: Money) -> Money {
        Money(self.0.clamp(0, upper.0.max(0)))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and log output. The storefront frontend formats
/// amounts itself to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i32) -> Self {
        Money(self.0 * qty as i64)
    }
}

/// Multiplication by i64.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
