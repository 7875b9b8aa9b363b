//! # Seller Earnings & Payout Eligibility
//!
//! Folds a seller's line items into earnings totals and decides whether
//! a payout can be requested.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Earnings & Payout Pipeline                           │
//! │                                                                         │
//! │  SellerLineItem[] (from order subsystem)                               │
//! │       │                                                                 │
//! │       ├── refunded items dropped first (never counted anywhere)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  aggregate() ──► EarningsSummary (read-only, no side effects)          │
//! │       │              total_sales / total_fees / net / pending          │
//! │       │              can_request_payout (inclusive threshold)          │
//! │       ▼                                                                 │
//! │  evaluate_payout() ──► PayoutDraft    (eligible: snapshot of          │
//! │       │                                gross/fees/net + order refs)    │
//! │       └──────────────► PayoutRejection (NoPendingItems |               │
//! │                                         BelowMinimum + shortfall)      │
//! │                                                                         │
//! │  The draft is handed to creator-db, which commits the payout row       │
//! │  and sweeps the drafted items atomically.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::PayoutRejection;
use crate::money::Money;
use crate::types::{EarningsSummary, FeeConfiguration, SellerLineItem};

// =============================================================================
// Fee Basis
// =============================================================================

/// Which fee figures an earnings aggregation reports.
///
/// ## The Historical Recomputation Caveat
/// `CurrentConfiguration` recomputes `total_fees` from the *current*
/// commission and processing rates rather than the rates in force at
/// each sale. A later rate change therefore changes the *reported*
/// historical fee split, even though each sale's actual breakdown was
/// settled at the old rates. This matches the platform's original
/// reporting behavior and is kept as the default for continuity.
///
/// `StoredSnapshot` sums the per-line fee snapshots frozen at sale time
/// instead, which is what financial correctness demands. Lines that
/// predate snapshotting fall back to recomputation so mixed histories
/// still produce a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeeBasis {
    /// Derive fees from the current [`FeeConfiguration`] rates.
    #[default]
    CurrentConfiguration,
    /// Sum `fee_snapshot_cents` recorded at sale time where present.
    StoredSnapshot,
}

// =============================================================================
// Aggregation
// =============================================================================

/// Aggregates a seller's line items into an [`EarningsSummary`] using
/// the default [`FeeBasis::CurrentConfiguration`].
///
/// Read-only: no line item is mutated and no payout is created.
///
/// ## Rules
/// - Refunded items are dropped before any summing
/// - `total_sales` = Σ gross over the remaining (pending + included) items
/// - `pending_payout` sums pending items only (included items are
///   presumed already swept into an existing payout)
/// - `can_request_payout` = `pending_payout ≥ minimum` - inclusive, so a
///   seller sitting exactly on the threshold is eligible
/// - An empty input yields a zero summary with `can_request_payout = false`
pub fn aggregate(items: &[SellerLineItem], config: &FeeConfiguration) -> EarningsSummary {
    aggregate_with_basis(items, config, FeeBasis::default())
}

/// Aggregates with an explicit [`FeeBasis`]. See [`aggregate`].
pub fn aggregate_with_basis(
    items: &[SellerLineItem],
    config: &FeeConfiguration,
    basis: FeeBasis,
) -> EarningsSummary {
    if items.is_empty() {
        return EarningsSummary::empty();
    }

    let retained: Vec<&SellerLineItem> = items
        .iter()
        .filter(|item| item.payout_status != crate::types::LineItemStatus::Refunded)
        .collect();

    let total_sales: Money = retained.iter().map(|item| item.gross_amount()).sum();

    let total_fees = match basis {
        FeeBasis::CurrentConfiguration => fees_for(total_sales, config),
        FeeBasis::StoredSnapshot => retained
            .iter()
            .map(|item| match item.fee_snapshot_cents {
                Some(cents) => Money::from_cents(cents),
                // No snapshot recorded at sale time: recompute per line
                None => fees_for(item.gross_amount(), config),
            })
            .sum(),
    };

    let pending_payout: Money = retained
        .iter()
        .filter(|item| item.is_pending())
        .map(|item| item.gross_amount())
        .sum();

    EarningsSummary {
        total_sales_cents: total_sales.cents(),
        total_fees_cents: total_fees.cents(),
        net_earnings_cents: (total_sales - total_fees).cents(),
        pending_payout_cents: pending_payout.cents(),
        can_request_payout: pending_payout >= config.minimum_payout(),
    }
}

/// Platform + processing fee for a gross amount, each rounded
/// independently off the same base.
fn fees_for(gross: Money, config: &FeeConfiguration) -> Money {
    gross.apply_rate(config.platform_commission) + gross.apply_rate(config.payment_processing_fee)
}

// =============================================================================
// Payout Eligibility
// =============================================================================

/// Everything the persistence layer needs to commit a payout: the
/// financial snapshot plus the exact set of line items identified at
/// computation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutDraft {
    /// Gross pending earnings swept by this payout.
    pub gross_earnings: Money,
    /// Platform commission on the swept gross.
    pub platform_fees: Money,
    /// Processing fees on the swept gross.
    pub processing_fees: Money,
    /// `gross − platform − processing`; the amount to transfer.
    pub net_earnings: Money,
    /// IDs of the pending line items this draft covers. The commit must
    /// sweep exactly this set or nothing.
    pub item_ids: Vec<String>,
    /// Distinct order references contributing to the payout, in first-seen
    /// order.
    pub order_ids: Vec<String>,
}

/// Decides payout eligibility for a seller's line items.
///
/// Non-pending items (included, refunded) are ignored; callers may pass
/// either a pre-filtered pending set or the seller's full history.
///
/// ## Outcomes
/// - `Err(NoPendingItems)` - zero pending line items
/// - `Err(BelowMinimum)` - net pending earnings under the configured
///   minimum; carries the computed shortfall for user-facing display
/// - `Ok(PayoutDraft)` - eligible; snapshot of gross/fees/net plus the
///   contributing item and order IDs
///
/// ## Example
/// ```rust
/// use creator_core::earnings::evaluate_payout;
/// use creator_core::error::PayoutRejection;
/// use creator_core::types::FeeConfiguration;
///
/// let rejection = evaluate_payout(&[], &FeeConfiguration::default()).unwrap_err();
/// assert_eq!(rejection, PayoutRejection::NoPendingItems);
/// ```
pub fn evaluate_payout(
    items: &[SellerLineItem],
    config: &FeeConfiguration,
) -> Result<PayoutDraft, PayoutRejection> {
    let pending: Vec<&SellerLineItem> = items.iter().filter(|item| item.is_pending()).collect();

    if pending.is_empty() {
        return Err(PayoutRejection::NoPendingItems);
    }

    let gross: Money = pending.iter().map(|item| item.gross_amount()).sum();
    let platform_fees = gross.apply_rate(config.platform_commission);
    let processing_fees = gross.apply_rate(config.payment_processing_fee);
    let net = gross - platform_fees - processing_fees;

    let minimum = config.minimum_payout();
    if net < minimum {
        return Err(PayoutRejection::BelowMinimum {
            minimum,
            net,
            shortfall: minimum.saturating_sub_zero(net),
        });
    }

    let item_ids: Vec<String> = pending.iter().map(|item| item.id.clone()).collect();

    // Distinct order references, first-seen order
    let mut order_ids: Vec<String> = Vec::new();
    for item in &pending {
        if !order_ids.contains(&item.order_id) {
            order_ids.push(item.order_id.clone());
        }
    }

    Ok(PayoutDraft {
        gross_earnings: gross,
        platform_fees,
        processing_fees,
        net_earnings: net,
        item_ids,
        order_ids,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Rate;
    use crate::types::LineItemStatus;
    use chrono::Utc;

    fn config() -> FeeConfiguration {
        // 12% + 2.9%, $500.00 minimum payout
        FeeConfiguration {
            platform_commission: Rate::from_bps(1200),
            payment_processing_fee: Rate::from_bps(290),
            minimum_payout_cents: 50000,
            tax_policy: None,
        }
    }

    fn item(id: &str, order_id: &str, gross_cents: i64, status: LineItemStatus) -> SellerLineItem {
        let now = Utc::now();
        SellerLineItem {
            id: id.to_string(),
            seller_id: "studio-1".to_string(),
            order_id: order_id.to_string(),
            gross_amount_cents: gross_cents,
            fee_snapshot_cents: None,
            payout_status: status,
            payout_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_aggregate_mixed_statuses() {
        // pending $1000, refunded $500, included $200
        let items = vec![
            item("a", "o-1", 100000, LineItemStatus::Pending),
            item("b", "o-2", 50000, LineItemStatus::Refunded),
            item("c", "o-3", 20000, LineItemStatus::Included),
        ];

        let summary = aggregate(&items, &config());

        // Refunded excluded everywhere; included counts as sales but not
        // as pending payout
        assert_eq!(summary.total_sales_cents, 120000);
        assert_eq!(summary.pending_payout_cents, 100000);
        assert!(summary.can_request_payout);

        // Fees recomputed from current config off total sales:
        // 120000 × 12% + 120000 × 2.9% = 14400 + 3480
        assert_eq!(summary.total_fees_cents, 17880);
        assert_eq!(summary.net_earnings_cents, 120000 - 17880);
    }

    #[test]
    fn test_aggregate_empty_is_zero_and_ineligible() {
        let summary = aggregate(&[], &config());
        assert_eq!(summary, EarningsSummary::empty());
        assert!(!summary.can_request_payout);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // pending exactly equal to the $500.00 minimum
        let items = vec![item("a", "o-1", 50000, LineItemStatus::Pending)];
        let summary = aggregate(&items, &config());

        assert_eq!(summary.pending_payout_cents, 50000);
        assert!(summary.can_request_payout);

        // one cent under
        let items = vec![item("a", "o-1", 49999, LineItemStatus::Pending)];
        assert!(!aggregate(&items, &config()).can_request_payout);
    }

    #[test]
    fn test_refund_never_increases_totals() {
        let before = vec![
            item("a", "o-1", 60000, LineItemStatus::Pending),
            item("b", "o-2", 30000, LineItemStatus::Pending),
        ];
        let mut after = before.clone();
        after[1].payout_status = LineItemStatus::Refunded;

        let s_before = aggregate(&before, &config());
        let s_after = aggregate(&after, &config());

        assert!(s_after.total_sales_cents <= s_before.total_sales_cents);
        assert!(s_after.pending_payout_cents <= s_before.pending_payout_cents);
        // Eligibility can only go from true toward false, never the reverse
        assert!(s_before.can_request_payout || !s_after.can_request_payout);
    }

    #[test]
    fn test_fee_recomputation_tracks_current_config() {
        // The documented reporting caveat: raising the commission changes
        // the reported fee split for already-settled sales.
        let items = vec![item("a", "o-1", 100000, LineItemStatus::Included)];

        let at_12 = aggregate(&items, &config());
        let mut raised = config();
        raised.platform_commission = Rate::from_bps(1500);
        let at_15 = aggregate(&items, &raised);

        assert_eq!(at_12.total_fees_cents, 14900); // 12000 + 2900
        assert_eq!(at_15.total_fees_cents, 17900); // 15000 + 2900
    }

    #[test]
    fn test_stored_snapshot_basis_freezes_fees() {
        let mut a = item("a", "o-1", 100000, LineItemStatus::Included);
        a.fee_snapshot_cents = Some(10000); // settled at older, lower rates
        let items = vec![a];

        let mut raised = config();
        raised.platform_commission = Rate::from_bps(1500);

        let snapshot = aggregate_with_basis(&items, &raised, FeeBasis::StoredSnapshot);
        assert_eq!(snapshot.total_fees_cents, 10000);
        assert_eq!(snapshot.net_earnings_cents, 90000);

        // Lines without a snapshot fall back to recomputation
        let items = vec![item("b", "o-2", 100000, LineItemStatus::Included)];
        let fallback = aggregate_with_basis(&items, &raised, FeeBasis::StoredSnapshot);
        assert_eq!(fallback.total_fees_cents, 17900);
    }

    #[test]
    fn test_evaluate_payout_no_pending_items() {
        assert_eq!(
            evaluate_payout(&[], &config()).unwrap_err(),
            PayoutRejection::NoPendingItems
        );

        // Included/refunded-only history is equally ineligible
        let items = vec![
            item("a", "o-1", 100000, LineItemStatus::Included),
            item("b", "o-2", 100000, LineItemStatus::Refunded),
        ];
        assert_eq!(
            evaluate_payout(&items, &config()).unwrap_err(),
            PayoutRejection::NoPendingItems
        );
    }

    #[test]
    fn test_evaluate_payout_below_minimum_reports_shortfall() {
        // $376.00 gross → net 376.00 − 45.12 − 10.90 = 319.98, short of $500.00
        let items = vec![item("a", "o-1", 37600, LineItemStatus::Pending)];

        match evaluate_payout(&items, &config()).unwrap_err() {
            PayoutRejection::BelowMinimum {
                minimum,
                net,
                shortfall,
            } => {
                assert_eq!(minimum.cents(), 50000);
                assert_eq!(net.cents(), 31998);
                assert_eq!(shortfall.cents(), 18002);
            }
            other => panic!("expected BelowMinimum, got {other:?}"),
        }
    }

    #[test]
    fn test_evaluate_payout_success_snapshot() {
        let items = vec![
            item("a", "o-1", 60000, LineItemStatus::Pending),
            item("b", "o-1", 20000, LineItemStatus::Pending),
            item("c", "o-2", 30000, LineItemStatus::Pending),
            item("d", "o-3", 99999, LineItemStatus::Refunded),
        ];

        let draft = evaluate_payout(&items, &config()).unwrap();

        assert_eq!(draft.gross_earnings.cents(), 110000);
        assert_eq!(draft.platform_fees.cents(), 13200); // 12%
        assert_eq!(draft.processing_fees.cents(), 3190); // 2.9%
        assert_eq!(draft.net_earnings.cents(), 110000 - 13200 - 3190);

        assert_eq!(draft.item_ids, vec!["a", "b", "c"]);
        // Order references deduplicated, first-seen order
        assert_eq!(draft.order_ids, vec!["o-1", "o-2"]);
    }
}
