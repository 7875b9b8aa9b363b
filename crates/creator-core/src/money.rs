//! # Money Module
//!
//! Provides the `Money` and `Rate` types used by every settlement
//! calculation in Core Creator.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In a marketplace that splits every sale three ways (buyer total,      │
//! │  platform fee, seller net), a drifting cent is a support ticket and    │
//! │  a mismatched payout.                                                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents + Basis Points                             │
//! │    $100.00 at 2.9% = (10000 × 290 + 5000) / 10000 = 290 cents          │
//! │    Rounding is half-up on the cent, per field, every time              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding Policy (Settlement-Critical)
//! Every derived monetary field is rounded **independently** via
//! [`Money::apply_rate`]. Totals are then assembled from the rounded
//! components. This per-field policy means `seller_receives` is NOT
//! guaranteed to equal an end-to-end rounded ideal in every case; it is
//! preserved deliberately so new computations reproduce existing
//! financial records to the cent.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Rate Type
// =============================================================================

/// A percentage rate in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1200 bps = 12% platform commission; 290 bps = 2.9% processing fee.
///
/// Commission, processing and tax rates all share this type so the
/// half-up rounding in [`Money::apply_rate`] is the single source of
/// truth for percentage math.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Creates a rate from a percentage (for convenience).
    ///
    /// ## Example
    /// ```rust
    /// use creator_core::money::Rate;
    ///
    /// assert_eq!(Rate::from_percentage(2.9).bps(), 290);
    /// ```
    pub fn from_percentage(pct: f64) -> Self {
        Rate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for variant downcharges
///   and shortfall arithmetic
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money Flows
/// ```text
/// Product.price ──► PriceBreakdown.subtotal ──► SellerLineItem.gross
///                                                      │
///                     EarningsSummary ◄── aggregate ◄──┘
///                           │
///                           ▼
///                     Payout snapshot (gross / fees / net)
/// ```
/// Currency is single-currency per computation call; the surrounding
/// system guarantees all amounts share a currency before calling in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use creator_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Applies a percentage rate with half-up rounding on the cent.
    ///
    /// This is THE rounding primitive of the settlement engine: platform
    /// commission, processing fee and tax are each computed by one
    /// independent call on the same subtotal (never off each other,
    /// never compounded).
    ///
    /// ## Implementation
    /// Integer math: `(cents * bps + 5000) / 10000`.
    /// The +5000 provides half-up rounding (5000/10000 = 0.5 cents).
    /// i128 intermediate prevents overflow on large catalogs.
    ///
    /// ## Example
    /// ```rust
    /// use creator_core::money::{Money, Rate};
    ///
    /// let subtotal = Money::from_cents(10000);        // $100.00
    /// let fee = subtotal.apply_rate(Rate::from_bps(290)); // 2.9%
    /// assert_eq!(fee.cents(), 290); // $2.90 exactly
    ///
    /// // Fractional cents round half-up:
    /// // $10.19 × 2.9% = 29.551 cents → $0.30
    /// let fee = Money::from_cents(1019).apply_rate(Rate::from_bps(290));
    /// assert_eq!(fee.cents(), 30);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(cents as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use creator_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2999); // $29.99
    /// let subtotal = unit_price.multiply_quantity(3);
    /// assert_eq!(subtotal.cents(), 8997); // $89.97
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Saturating subtraction clamped at zero.
    ///
    /// Used for shortfall math where a negative result has no meaning
    /// (a seller over the threshold has a shortfall of exactly $0.00).
    #[inline]
    pub const fn saturating_sub_zero(&self, other: Money) -> Money {
        let diff = self.0 - other.0;
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// Used in payout rejection messages shown to sellers, e.g.
/// "Minimum payout is $500.00; current is $320.14". Localized display
/// is the frontend's job.
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

/// Addition assignment (+=), used by the aggregation folds.
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

/// Summing an iterator of Money values (earnings folds).
impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
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
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!(a.multiply_quantity(3).cents(), 3000);
    }

    #[test]
    fn test_apply_rate_commission() {
        // $100.00 at 12% = $12.00
        let subtotal = Money::from_cents(10000);
        let fee = subtotal.apply_rate(Rate::from_bps(1200));
        assert_eq!(fee.cents(), 1200);
    }

    #[test]
    fn test_apply_rate_half_up_rounding() {
        // $10.01 at 2.9% = 29.029 cents → 29 cents
        let fee = Money::from_cents(1001).apply_rate(Rate::from_bps(290));
        assert_eq!(fee.cents(), 29);

        // $10.19 at 2.9% = 29.551 cents → 30 cents (half-up)
        let fee = Money::from_cents(1019).apply_rate(Rate::from_bps(290));
        assert_eq!(fee.cents(), 30);

        // Exactly half a cent rounds up: $2.50 at 1% = 2.5 cents → 3 cents
        let fee = Money::from_cents(250).apply_rate(Rate::from_bps(100));
        assert_eq!(fee.cents(), 3);
    }

    #[test]
    fn test_apply_rate_zero() {
        let subtotal = Money::from_cents(10000);
        assert_eq!(subtotal.apply_rate(Rate::zero()).cents(), 0);
        assert_eq!(Money::zero().apply_rate(Rate::from_bps(1200)).cents(), 0);
    }

    #[test]
    fn test_saturating_sub_zero() {
        let minimum = Money::from_cents(50000);
        let net = Money::from_cents(32014);

        assert_eq!(minimum.saturating_sub_zero(net).cents(), 17986);
        assert_eq!(net.saturating_sub_zero(minimum).cents(), 0);
    }

    #[test]
    fn test_sum() {
        let total: Money = [100, 250, 75]
            .iter()
            .map(|c| Money::from_cents(*c))
            .sum();
        assert_eq!(total.cents(), 425);
    }

    #[test]
    fn test_rate_conversions() {
        let rate = Rate::from_bps(1200);
        assert_eq!(rate.bps(), 1200);
        assert!((rate.percentage() - 12.0).abs() < 0.001);

        assert_eq!(Rate::from_percentage(2.9).bps(), 290);
        assert_eq!(Rate::from_percentage(12.0).bps(), 1200);
    }
}
