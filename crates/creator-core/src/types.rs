//! # Domain Types
//!
//! Core domain types for the pricing and payout engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐  ┌──────────────────┐      │
//! │  │ FeeConfiguration │  │  SellerLineItem  │  │     Payout       │      │
//! │  │  ──────────────  │  │  ──────────────  │  │  ──────────────  │      │
//! │  │  commission bps  │  │  seller_id       │  │  gross / fees    │      │
//! │  │  processing bps  │  │  gross_cents     │  │  net snapshot    │      │
//! │  │  minimum payout  │  │  payout_status   │  │  order_ids       │      │
//! │  │  tax policy      │  │  payout_id (FK)  │  │  status          │      │
//! │  └──────────────────┘  └──────────────────┘  └──────────────────┘      │
//! │                                                                         │
//! │  ┌──────────────────┐  ┌──────────────────┐                            │
//! │  │  LineItemStatus  │  │  PayoutStatus    │                            │
//! │  │  ──────────────  │  │  ──────────────  │                            │
//! │  │  Pending         │  │  Pending         │                            │
//! │  │  Included        │  │  Processing      │                            │
//! │  │  Refunded        │  │  Completed       │                            │
//! │  └──────────────────┘  │  Failed          │                            │
//! │                        └──────────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Every persisted entity has:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business references: (`seller_id`, `order_id`) - owned by the
//!   order-management subsystem outside this engine

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{Money, Rate};

// =============================================================================
// Fee Configuration
// =============================================================================

/// Tax settings attached to a [`FeeConfiguration`].
///
/// Tax is a buyer-side addition computed off the subtotal. It never
/// reduces what the seller receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxPolicy {
    /// Whether tax is charged at all. A disabled policy behaves exactly
    /// like no policy.
    pub enabled: bool,

    /// Tax rate in basis points (800 = 8%).
    pub rate: Rate,
}

/// Platform fee configuration, supplied by the configuration store and
/// consumed immutably by every calculation call.
///
/// ## Documented Precondition (not enforced here)
/// `platform_commission + payment_processing_fee` should not exceed
/// 100% (10000 bps combined). The calculator stays total over its
/// numeric domain; enforcing the combined bound is the configuration
/// store's responsibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FeeConfiguration {
    /// Share taken by the platform, in basis points (1200 = 12%).
    pub platform_commission: Rate,

    /// Gateway cost passed through, in basis points (290 = 2.9%).
    pub payment_processing_fee: Rate,

    /// Floor below which a payout cannot be requested, in cents.
    pub minimum_payout_cents: i64,

    /// Optional buyer-side tax settings.
    pub tax_policy: Option<TaxPolicy>,
}

impl FeeConfiguration {
    /// Returns the minimum payout threshold as Money.
    #[inline]
    pub fn minimum_payout(&self) -> Money {
        Money::from_cents(self.minimum_payout_cents)
    }

    /// Returns the effective tax rate: the policy rate when present and
    /// enabled, zero otherwise.
    pub fn effective_tax_rate(&self) -> Rate {
        match self.tax_policy {
            Some(policy) if policy.enabled => policy.rate,
            _ => Rate::zero(),
        }
    }
}

impl Default for FeeConfiguration {
    /// Returns the platform's launch defaults: 12% commission, 2.9%
    /// processing, $500.00 minimum payout, no tax.
    fn default() -> Self {
        FeeConfiguration {
            platform_commission: Rate::from_bps(1200),
            payment_processing_fee: Rate::from_bps(290),
            minimum_payout_cents: 50000,
            tax_policy: None,
        }
    }
}

// =============================================================================
// Line Item Status
// =============================================================================

/// Payout lifecycle status of a single seller line item.
///
/// ## Lifecycle
/// ```text
/// order paid ──► Pending ──► Included   (swept into a payout, final)
///                   │
///                   └──────► Refunded   (excluded from all aggregation, final)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum LineItemStatus {
    /// Created when the order is paid; counts toward pending payout.
    Pending,
    /// Swept into a payout; never counted as pending again.
    Included,
    /// Order/item was refunded; excluded from all future aggregation.
    Refunded,
}

impl Default for LineItemStatus {
    fn default() -> Self {
        LineItemStatus::Pending
    }
}

// =============================================================================
// Seller Line Item
// =============================================================================

/// One order line belonging to a seller, as recorded by the order
/// subsystem at the moment the order is paid.
///
/// Uses the snapshot pattern: `gross_amount_cents` and the optional
/// `fee_snapshot_cents` are frozen at sale time and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SellerLineItem {
    pub id: String,
    /// Seller (studio) this revenue belongs to.
    pub seller_id: String,
    /// Order this line came from; payouts snapshot these references.
    pub order_id: String,
    /// Gross amount (price × quantity) at time of sale, in cents.
    pub gross_amount_cents: i64,
    /// Combined platform + processing fee at time of sale, in cents.
    ///
    /// Optional: older records predate fee snapshotting. Aggregation in
    /// [`FeeBasis::StoredSnapshot`](crate::earnings::FeeBasis) mode uses
    /// this where present and recomputes where absent.
    pub fee_snapshot_cents: Option<i64>,
    /// Payout lifecycle status.
    pub payout_status: LineItemStatus,
    /// Payout this item was swept into, once `Included`.
    pub payout_id: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl SellerLineItem {
    /// Returns the gross amount as Money.
    #[inline]
    pub fn gross_amount(&self) -> Money {
        Money::from_cents(self.gross_amount_cents)
    }

    /// Whether this item still counts toward a future payout.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.payout_status == LineItemStatus::Pending
    }
}

// =============================================================================
// Payout Status
// =============================================================================

/// Status of a payout record. Transitions are driven externally by the
/// bank-transfer workflow; the engine only guards their legality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    /// Created, waiting to be picked up by the transfer workflow.
    Pending,
    /// Transfer in flight.
    Processing,
    /// Transfer confirmed. Terminal.
    Completed,
    /// Transfer failed. Terminal.
    Failed,
}

impl Default for PayoutStatus {
    fn default() -> Self {
        PayoutStatus::Pending
    }
}

impl PayoutStatus {
    /// Whether the lifecycle allows moving from `self` to `next`.
    ///
    /// ## Allowed Transitions
    /// ```text
    /// Pending ──► Processing ──► Completed
    ///                   └──────► Failed
    /// ```
    pub fn can_transition_to(&self, next: PayoutStatus) -> bool {
        matches!(
            (self, next),
            (PayoutStatus::Pending, PayoutStatus::Processing)
                | (PayoutStatus::Processing, PayoutStatus::Completed)
                | (PayoutStatus::Processing, PayoutStatus::Failed)
        )
    }

    /// Lowercase database/API representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Processing => "processing",
            PayoutStatus::Completed => "completed",
            PayoutStatus::Failed => "failed",
        }
    }
}

// =============================================================================
// Payout
// =============================================================================

/// A payout record: an immutable snapshot of the seller's swept
/// earnings, created only when the seller was eligible at creation
/// time. Only `status` changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Payout {
    pub id: String,
    pub seller_id: String,
    /// Gross earnings swept into this payout, in cents.
    pub gross_earnings_cents: i64,
    /// Platform commission deducted, in cents.
    pub platform_fees_cents: i64,
    /// Processing fees deducted, in cents.
    pub processing_fees_cents: i64,
    /// Net amount to transfer, in cents.
    pub net_earnings_cents: i64,
    pub status: PayoutStatus,
    /// Distinct order references contributing to this payout.
    pub order_ids: Vec<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Payout {
    /// Returns the net transfer amount as Money.
    #[inline]
    pub fn net_earnings(&self) -> Money {
        Money::from_cents(self.net_earnings_cents)
    }
}

// =============================================================================
// Earnings Summary
// =============================================================================

/// Per-seller earnings totals for a query window.
///
/// Invariants maintained by the aggregator:
/// - `net_earnings = total_sales − total_fees`
/// - `can_request_payout = pending_payout ≥ minimum threshold` (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EarningsSummary {
    /// Gross sales over all non-refunded items, in cents.
    pub total_sales_cents: i64,
    /// Platform + processing fees, in cents.
    pub total_fees_cents: i64,
    /// `total_sales − total_fees`, in cents.
    pub net_earnings_cents: i64,
    /// Gross amount of items still awaiting a payout, in cents.
    pub pending_payout_cents: i64,
    /// Whether the seller may request a payout right now.
    pub can_request_payout: bool,
}

impl EarningsSummary {
    /// A zero-valued summary (empty input window).
    pub fn empty() -> Self {
        EarningsSummary {
            total_sales_cents: 0,
            total_fees_cents: 0,
            net_earnings_cents: 0,
            pending_payout_cents: 0,
            can_request_payout: false,
        }
    }

    /// Returns the pending payout amount as Money.
    #[inline]
    pub fn pending_payout(&self) -> Money {
        Money::from_cents(self.pending_payout_cents)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_tax_rate() {
        let mut config = FeeConfiguration::default();
        assert!(config.effective_tax_rate().is_zero());

        config.tax_policy = Some(TaxPolicy {
            enabled: false,
            rate: Rate::from_bps(800),
        });
        assert!(config.effective_tax_rate().is_zero());

        config.tax_policy = Some(TaxPolicy {
            enabled: true,
            rate: Rate::from_bps(800),
        });
        assert_eq!(config.effective_tax_rate().bps(), 800);
    }

    #[test]
    fn test_line_item_status_default() {
        assert_eq!(LineItemStatus::default(), LineItemStatus::Pending);
    }

    #[test]
    fn test_payout_transitions() {
        use PayoutStatus::*;

        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Completed));
        assert!(Processing.can_transition_to(Failed));

        // Terminal states and skips are rejected
        assert!(!Pending.can_transition_to(Completed));
        assert!(!Completed.can_transition_to(Processing));
        assert!(!Failed.can_transition_to(Pending));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_empty_summary() {
        let summary = EarningsSummary::empty();
        assert_eq!(summary.total_sales_cents, 0);
        assert_eq!(summary.pending_payout_cents, 0);
        assert!(!summary.can_request_payout);
    }
}
