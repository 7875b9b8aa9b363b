//! # Price Breakdown Calculator
//!
//! Computes the fully itemized breakdown for a single catalog item at
//! the point of sale: what the buyer pays, what the platform keeps and
//! what the seller will eventually net.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Checkout Price Breakdown                           │
//! │                                                                         │
//! │  base price ($100.00)                                                  │
//! │  variant price ($120.00)        variant modifier = +$20.00             │
//! │  customization modifiers        (per unit)                             │
//! │  add-on prices                  (per unit)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  unit price × quantity = SUBTOTAL                                      │
//! │       │                                                                 │
//! │       ├──► platform fee   = subtotal × commission%   (independent)     │
//! │       ├──► processing fee = subtotal × processing%   (independent)     │
//! │       └──► tax            = subtotal × tax%          (independent)     │
//! │                                                                         │
//! │  total buyer pays = subtotal + tax                                     │
//! │  seller receives  = subtotal − platform fee − processing fee           │
//! │                     (tax is buyer-side, never a seller deduction)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rounding (Settlement-Critical)
//! Each fee field is rounded half-up on the cent independently off the
//! same subtotal - fees are never computed off each other and never
//! compounded. `total_buyer_pays` and `seller_receives` ARE assembled
//! from the already-rounded components. This exact policy must hold for
//! reproducibility with existing financial records.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::FeeConfiguration;
use crate::validation::{validate_amount_cents, validate_quantity};

// =============================================================================
// Breakdown Request
// =============================================================================

/// Inputs to a price breakdown computation.
///
/// ## Example
/// ```rust
/// use creator_core::money::Money;
/// use creator_core::pricing::BreakdownRequest;
///
/// let request = BreakdownRequest::new(Money::from_cents(10000))
///     .variant_price(Money::from_cents(12000))
///     .add_on(Money::from_cents(500))
///     .quantity(2);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BreakdownRequest {
    /// Catalog base price per unit.
    pub base_price: Money,

    /// Price of the selected variant, when one is selected. Used as the
    /// effective per-unit price instead of `base_price`.
    pub variant_price: Option<Money>,

    /// Per-unit customization modifiers (engraving, resizing, ...).
    /// Each entry is added once per unit, not as a flat one-time fee.
    /// Modifiers may be negative (a customization that removes a part).
    pub customization_modifiers: Vec<Money>,

    /// Per-unit add-on prices (gift wrap, extended warranty, ...).
    pub add_on_prices: Vec<Money>,

    /// Number of units. Must be at least 1.
    pub quantity: i64,
}

impl BreakdownRequest {
    /// Creates a request for a single unit at the base price with no
    /// variant, customizations or add-ons.
    pub fn new(base_price: Money) -> Self {
        BreakdownRequest {
            base_price,
            variant_price: None,
            customization_modifiers: Vec::new(),
            add_on_prices: Vec::new(),
            quantity: 1,
        }
    }

    /// Sets the selected variant price.
    pub fn variant_price(mut self, price: Money) -> Self {
        self.variant_price = Some(price);
        self
    }

    /// Appends a per-unit customization modifier.
    pub fn customization(mut self, modifier: Money) -> Self {
        self.customization_modifiers.push(modifier);
        self
    }

    /// Appends a per-unit add-on price.
    pub fn add_on(mut self, price: Money) -> Self {
        self.add_on_prices.push(price);
        self
    }

    /// Sets the quantity.
    pub fn quantity(mut self, qty: i64) -> Self {
        self.quantity = qty;
        self
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// Fully itemized result of a breakdown computation. Immutable; the
/// checkout flow persists these values alongside the order, and the
/// earnings aggregator later sums what was persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceBreakdown {
    // ---- Inputs echoed -----------------------------------------------------
    /// Catalog base price per unit.
    pub base_price: Money,
    /// `variant_price − base_price` when a variant was selected, else
    /// zero. Shows the upcharge/downcharge separately on the receipt.
    pub variant_modifier: Money,
    /// Sum of per-unit customization modifiers.
    pub customization_fees: Money,
    /// Sum of per-unit add-on prices.
    pub add_ons_fees: Money,
    /// Number of units.
    pub quantity: i64,

    // ---- Derived -----------------------------------------------------------
    /// Effective unit price × quantity.
    pub subtotal: Money,
    /// Platform commission off the subtotal, rounded independently.
    pub platform_fee: Money,
    /// Gateway fee off the subtotal, rounded independently.
    pub processing_fee: Money,
    /// Tax off the subtotal (zero when the tax policy is absent or
    /// disabled), rounded independently.
    pub tax: Money,
    /// `subtotal + tax` (assembled from rounded components).
    pub total_buyer_pays: Money,
    /// `subtotal − platform_fee − processing_fee` (assembled from
    /// rounded components). Tax never reduces this.
    pub seller_receives: Money,
}

impl PriceBreakdown {
    /// Combined platform + processing fee. This is the value the order
    /// subsystem stores as the line item's fee snapshot.
    #[inline]
    pub fn total_fees(&self) -> Money {
        self.platform_fee + self.processing_fee
    }
}

// =============================================================================
// Computation
// =============================================================================

/// Computes the itemized price breakdown for one catalog item.
///
/// ## Fee Computation Order (fixed)
/// 1. Effective unit price = (variant price or base price)
///    + customization modifiers + add-on prices
/// 2. `subtotal` = unit price × quantity
/// 3. `platform_fee`, `processing_fee`, `tax`: each independently off
///    the subtotal (never off each other, never off subtotal + fees)
/// 4. Totals assembled from the rounded components
///
/// ## Errors
/// Returns a [`ValidationError`](crate::error::ValidationError) wrapped
/// in `CoreError` when `quantity < 1` or when `base_price` /
/// `variant_price` is negative. For valid inputs the function is total:
/// zero prices, zero rates and empty modifier lists all produce a
/// consistent breakdown.
///
/// ## Example
/// ```rust
/// use creator_core::money::Money;
/// use creator_core::pricing::{compute_breakdown, BreakdownRequest};
/// use creator_core::types::FeeConfiguration;
///
/// let request = BreakdownRequest::new(Money::from_cents(10000));
/// let breakdown = compute_breakdown(&request, &FeeConfiguration::default()).unwrap();
///
/// assert_eq!(breakdown.platform_fee.cents(), 1200);  // 12%
/// assert_eq!(breakdown.processing_fee.cents(), 290); // 2.9%
/// assert_eq!(breakdown.seller_receives.cents(), 8510);
/// ```
pub fn compute_breakdown(
    request: &BreakdownRequest,
    config: &FeeConfiguration,
) -> CoreResult<PriceBreakdown> {
    validate_quantity(request.quantity)?;
    validate_amount_cents("base_price", request.base_price.cents())?;
    if let Some(variant_price) = request.variant_price {
        validate_amount_cents("variant_price", variant_price.cents())?;
    }

    // Variant selection replaces the base price as the effective unit
    // price; the modifier is reported separately for display.
    let effective_price = request.variant_price.unwrap_or(request.base_price);
    let variant_modifier = match request.variant_price {
        Some(variant_price) => variant_price - request.base_price,
        None => Money::zero(),
    };

    let customization_fees: Money = request.customization_modifiers.iter().copied().sum();
    let add_ons_fees: Money = request.add_on_prices.iter().copied().sum();

    let unit_price = effective_price + customization_fees + add_ons_fees;
    let subtotal = unit_price.multiply_quantity(request.quantity);

    let platform_fee = subtotal.apply_rate(config.platform_commission);
    let processing_fee = subtotal.apply_rate(config.payment_processing_fee);
    let tax = subtotal.apply_rate(config.effective_tax_rate());

    Ok(PriceBreakdown {
        base_price: request.base_price,
        variant_modifier,
        customization_fees,
        add_ons_fees,
        quantity: request.quantity,
        subtotal,
        platform_fee,
        processing_fee,
        tax,
        total_buyer_pays: subtotal + tax,
        seller_receives: subtotal - platform_fee - processing_fee,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Rate;
    use crate::types::TaxPolicy;

    fn config() -> FeeConfiguration {
        // 12% commission, 2.9% processing, no tax
        FeeConfiguration {
            platform_commission: Rate::from_bps(1200),
            payment_processing_fee: Rate::from_bps(290),
            minimum_payout_cents: 50000,
            tax_policy: None,
        }
    }

    fn taxed_config(rate_bps: u32) -> FeeConfiguration {
        FeeConfiguration {
            tax_policy: Some(TaxPolicy {
                enabled: true,
                rate: Rate::from_bps(rate_bps),
            }),
            ..config()
        }
    }

    #[test]
    fn test_single_unit_breakdown() {
        // $100.00 at 12% + 2.9%, no tax
        let request = BreakdownRequest::new(Money::from_cents(10000));
        let breakdown = compute_breakdown(&request, &config()).unwrap();

        assert_eq!(breakdown.subtotal.cents(), 10000);
        assert_eq!(breakdown.platform_fee.cents(), 1200);
        assert_eq!(breakdown.processing_fee.cents(), 290);
        assert_eq!(breakdown.tax.cents(), 0);
        assert_eq!(breakdown.total_buyer_pays.cents(), 10000);
        assert_eq!(breakdown.seller_receives.cents(), 8510);
    }

    #[test]
    fn test_quantity_three_breakdown() {
        // Same item, quantity 3
        let request = BreakdownRequest::new(Money::from_cents(10000)).quantity(3);
        let breakdown = compute_breakdown(&request, &config()).unwrap();

        assert_eq!(breakdown.subtotal.cents(), 30000);
        assert_eq!(breakdown.platform_fee.cents(), 3600);
        assert_eq!(breakdown.processing_fee.cents(), 870);
        assert_eq!(breakdown.total_buyer_pays.cents(), 30000);
        assert_eq!(breakdown.seller_receives.cents(), 25530);
    }

    #[test]
    fn test_subtotal_scales_linearly_with_quantity() {
        let base = BreakdownRequest::new(Money::from_cents(3337))
            .customization(Money::from_cents(125))
            .add_on(Money::from_cents(499));

        let one = compute_breakdown(&base.clone().quantity(1), &config()).unwrap();
        let two = compute_breakdown(&base.quantity(2), &config()).unwrap();

        assert_eq!(two.subtotal.cents(), one.subtotal.cents() * 2);
    }

    #[test]
    fn test_buyer_total_minus_tax_equals_subtotal() {
        // Holds for any input: total_buyer_pays is subtotal + rounded tax
        let request = BreakdownRequest::new(Money::from_cents(4242))
            .variant_price(Money::from_cents(4999))
            .customization(Money::from_cents(33))
            .quantity(7);
        let breakdown = compute_breakdown(&request, &taxed_config(825)).unwrap();

        assert_eq!(
            (breakdown.total_buyer_pays - breakdown.tax).cents(),
            breakdown.subtotal.cents()
        );
    }

    #[test]
    fn test_tax_policy_never_changes_fees_or_seller_net() {
        let request = BreakdownRequest::new(Money::from_cents(12345)).quantity(2);

        let untaxed = compute_breakdown(&request, &config()).unwrap();
        let taxed = compute_breakdown(&request, &taxed_config(800)).unwrap();

        assert_eq!(untaxed.platform_fee, taxed.platform_fee);
        assert_eq!(untaxed.processing_fee, taxed.processing_fee);
        assert_eq!(untaxed.seller_receives, taxed.seller_receives);

        // Only the buyer side moves
        assert!(taxed.tax.cents() > 0);
        assert_eq!(
            taxed.total_buyer_pays.cents(),
            untaxed.total_buyer_pays.cents() + taxed.tax.cents()
        );
    }

    #[test]
    fn test_disabled_tax_policy_behaves_like_none() {
        let request = BreakdownRequest::new(Money::from_cents(10000));
        let disabled = FeeConfiguration {
            tax_policy: Some(TaxPolicy {
                enabled: false,
                rate: Rate::from_bps(800),
            }),
            ..config()
        };

        let breakdown = compute_breakdown(&request, &disabled).unwrap();
        assert_eq!(breakdown.tax.cents(), 0);
        assert_eq!(breakdown.total_buyer_pays, breakdown.subtotal);
    }

    #[test]
    fn test_variant_modifier_upcharge_and_downcharge() {
        // Variant above base: +$20.00 modifier, variant price drives subtotal
        let up = BreakdownRequest::new(Money::from_cents(10000))
            .variant_price(Money::from_cents(12000));
        let breakdown = compute_breakdown(&up, &config()).unwrap();
        assert_eq!(breakdown.variant_modifier.cents(), 2000);
        assert_eq!(breakdown.subtotal.cents(), 12000);

        // Variant below base: negative modifier
        let down = BreakdownRequest::new(Money::from_cents(10000))
            .variant_price(Money::from_cents(9000));
        let breakdown = compute_breakdown(&down, &config()).unwrap();
        assert_eq!(breakdown.variant_modifier.cents(), -1000);
        assert_eq!(breakdown.subtotal.cents(), 9000);
    }

    #[test]
    fn test_modifiers_are_per_unit() {
        // $50.00 base + $2.50 engraving + $5.00 gift wrap, × 4 units
        let request = BreakdownRequest::new(Money::from_cents(5000))
            .customization(Money::from_cents(250))
            .add_on(Money::from_cents(500))
            .quantity(4);
        let breakdown = compute_breakdown(&request, &config()).unwrap();

        // (5000 + 250 + 500) × 4, not 5000 × 4 + 250 + 500
        assert_eq!(breakdown.subtotal.cents(), 23000);
        assert_eq!(breakdown.customization_fees.cents(), 250);
        assert_eq!(breakdown.add_ons_fees.cents(), 500);
    }

    #[test]
    fn test_fees_computed_off_subtotal_not_compounded() {
        // At an awkward subtotal both fees still derive from the same base
        let request = BreakdownRequest::new(Money::from_cents(1019));
        let breakdown = compute_breakdown(&request, &config()).unwrap();

        assert_eq!(
            breakdown.platform_fee,
            breakdown.subtotal.apply_rate(Rate::from_bps(1200))
        );
        assert_eq!(
            breakdown.processing_fee,
            breakdown.subtotal.apply_rate(Rate::from_bps(290))
        );
        assert_eq!(
            breakdown.seller_receives,
            breakdown.subtotal - breakdown.platform_fee - breakdown.processing_fee
        );
    }

    #[test]
    fn test_zero_price_item_is_valid() {
        let request = BreakdownRequest::new(Money::zero());
        let breakdown = compute_breakdown(&request, &config()).unwrap();

        assert_eq!(breakdown.subtotal.cents(), 0);
        assert_eq!(breakdown.total_buyer_pays.cents(), 0);
        assert_eq!(breakdown.seller_receives.cents(), 0);
    }

    #[test]
    fn test_invalid_inputs_rejected() {
        let bad_qty = BreakdownRequest::new(Money::from_cents(10000)).quantity(0);
        assert!(compute_breakdown(&bad_qty, &config()).is_err());

        let negative_qty = BreakdownRequest::new(Money::from_cents(10000)).quantity(-2);
        assert!(compute_breakdown(&negative_qty, &config()).is_err());

        let negative_base = BreakdownRequest::new(Money::from_cents(-100));
        assert!(compute_breakdown(&negative_base, &config()).is_err());

        let negative_variant = BreakdownRequest::new(Money::from_cents(10000))
            .variant_price(Money::from_cents(-500));
        assert!(compute_breakdown(&negative_variant, &config()).is_err());
    }

    #[test]
    fn test_total_fees_snapshot() {
        let request = BreakdownRequest::new(Money::from_cents(10000));
        let breakdown = compute_breakdown(&request, &config()).unwrap();
        assert_eq!(breakdown.total_fees().cents(), 1490); // 1200 + 290
    }
}
