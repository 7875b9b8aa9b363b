//! # Payout Repository
//!
//! Creates payout records from eligibility drafts and drives their
//! status lifecycle.
//!
//! ## The Payout Race
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Two Concurrent Requests, Same Seller                       │
//! │                                                                         │
//! │  Request A: read pending snapshot {x, y, z}                            │
//! │  Request B: read pending snapshot {x, y, z}      (overlaps!)           │
//! │       │                                                                 │
//! │  A: INSERT payout + sweep WHERE id IN (x,y,z)                          │
//! │     AND payout_status = 'pending'      → 3 rows, commit ✓             │
//! │       │                                                                 │
//! │  B: INSERT payout + sweep WHERE id IN (x,y,z)                          │
//! │     AND payout_status = 'pending'      → 0 rows ≠ 3                   │
//! │     → ROLLBACK, DbError::Conflict                                      │
//! │                                                                         │
//! │  No line item is ever counted into two payouts. Different sellers      │
//! │  touch disjoint rows and never block each other.                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The sweep is a single conditional update scoped to the IDs captured
//! at eligibility-computation time. A concurrent refund or competing
//! payout shrinks the matched set; any shortfall aborts the whole
//! transaction, so a partial payout is never observable.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::line_item::LineItemRepository;
use creator_core::earnings::{evaluate_payout, PayoutDraft};
use creator_core::{CoreError, FeeConfiguration, Payout, PayoutRejection, PayoutStatus};

// =============================================================================
// Outcome Type
// =============================================================================

/// Result of a payout request: the created record, or a typed
/// rejection for the requester's dashboard.
///
/// Rejections are expected outcomes, not errors - storage failures and
/// lost races surface separately as [`DbError`].
#[derive(Debug)]
pub enum PayoutOutcome {
    /// The payout was created and its line items swept.
    Created(Payout),
    /// The seller is not eligible; nothing was written.
    Rejected(PayoutRejection),
}

// =============================================================================
// Row Mapping
// =============================================================================

/// Raw payout row; `order_ids` is a JSON text column.
#[derive(Debug, sqlx::FromRow)]
struct PayoutRow {
    id: String,
    seller_id: String,
    gross_earnings_cents: i64,
    platform_fees_cents: i64,
    processing_fees_cents: i64,
    net_earnings_cents: i64,
    status: PayoutStatus,
    order_ids: String,
    created_at: chrono::DateTime<Utc>,
    updated_at: chrono::DateTime<Utc>,
}

impl PayoutRow {
    fn into_payout(self) -> DbResult<Payout> {
        let order_ids: Vec<String> = serde_json::from_str(&self.order_ids)
            .map_err(|e| DbError::Internal(format!("corrupt order_ids column: {e}")))?;

        Ok(Payout {
            id: self.id,
            seller_id: self.seller_id,
            gross_earnings_cents: self.gross_earnings_cents,
            platform_fees_cents: self.platform_fees_cents,
            processing_fees_cents: self.processing_fees_cents,
            net_earnings_cents: self.net_earnings_cents,
            status: self.status,
            order_ids,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

const PAYOUT_COLUMNS: &str = "id, seller_id, gross_earnings_cents, platform_fees_cents, \
     processing_fees_cents, net_earnings_cents, status, order_ids, created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for payout database operations.
#[derive(Debug, Clone)]
pub struct PayoutRepository {
    pool: SqlitePool,
}

impl PayoutRepository {
    /// Creates a new PayoutRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PayoutRepository { pool }
    }

    /// Attempts to create a payout for a seller.
    ///
    /// ## What This Does
    /// 1. Reads the seller's pending line items (the snapshot)
    /// 2. Evaluates eligibility in creator-core (pure)
    /// 3. On eligibility: commits the payout row and sweeps exactly the
    ///    snapshotted items from `pending` to `included` in one
    ///    transaction
    ///
    /// ## Returns
    /// * `Ok(PayoutOutcome::Created)` - payout committed
    /// * `Ok(PayoutOutcome::Rejected)` - no pending items or below the
    ///   minimum; nothing written
    /// * `Err(DbError::Conflict)` - a concurrent refund or payout
    ///   changed the snapshot between read and commit; rolled back in
    ///   full, safe to recompute and retry
    pub async fn try_create_payout(
        &self,
        seller_id: &str,
        config: &FeeConfiguration,
    ) -> DbResult<PayoutOutcome> {
        let pending = LineItemRepository::new(self.pool.clone())
            .list_pending_by_seller(seller_id)
            .await?;

        let draft = match evaluate_payout(&pending, config) {
            Ok(draft) => draft,
            Err(rejection) => {
                debug!(seller_id = %seller_id, %rejection, "Payout request rejected");
                return Ok(PayoutOutcome::Rejected(rejection));
            }
        };

        let payout = self.commit_draft(seller_id, &draft).await?;
        Ok(PayoutOutcome::Created(payout))
    }

    /// Commits an eligibility draft: inserts the payout row and sweeps
    /// the drafted line items, all-or-nothing.
    ///
    /// The sweep re-checks `payout_status = 'pending'` per row. If any
    /// drafted item is no longer pending the affected-row count falls
    /// short, the transaction rolls back and the commit reports a
    /// conflict.
    pub(crate) async fn commit_draft(
        &self,
        seller_id: &str,
        draft: &PayoutDraft,
    ) -> DbResult<Payout> {
        let now = Utc::now();
        let payout = Payout {
            id: Uuid::new_v4().to_string(),
            seller_id: seller_id.to_string(),
            gross_earnings_cents: draft.gross_earnings.cents(),
            platform_fees_cents: draft.platform_fees.cents(),
            processing_fees_cents: draft.processing_fees.cents(),
            net_earnings_cents: draft.net_earnings.cents(),
            status: PayoutStatus::Pending,
            order_ids: draft.order_ids.clone(),
            created_at: now,
            updated_at: now,
        };

        let order_ids_json = serde_json::to_string(&payout.order_ids)
            .map_err(|e| DbError::Internal(format!("order_ids serialization: {e}")))?;

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO payouts (
                id, seller_id,
                gross_earnings_cents, platform_fees_cents,
                processing_fees_cents, net_earnings_cents,
                status, order_ids, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(&payout.id)
        .bind(&payout.seller_id)
        .bind(payout.gross_earnings_cents)
        .bind(payout.platform_fees_cents)
        .bind(payout.processing_fees_cents)
        .bind(payout.net_earnings_cents)
        .bind(payout.status)
        .bind(&order_ids_json)
        .bind(payout.created_at)
        .bind(payout.updated_at)
        .execute(&mut *tx)
        .await?;

        // Conditional sweep: only items still pending, only drafted IDs
        let mut builder = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
            "UPDATE seller_line_items SET payout_status = 'included', payout_id = ",
        );
        builder.push_bind(&payout.id);
        builder.push(", updated_at = ");
        builder.push_bind(now);
        builder.push(" WHERE payout_status = 'pending' AND id IN (");
        let mut separated = builder.separated(", ");
        for item_id in &draft.item_ids {
            separated.push_bind(item_id);
        }
        builder.push(")");

        let swept = builder.build().execute(&mut *tx).await?.rows_affected();

        if swept != draft.item_ids.len() as u64 {
            tx.rollback().await?;
            return Err(DbError::conflict(format!(
                "payout sweep for seller {seller_id} matched {swept} of {} items",
                draft.item_ids.len()
            )));
        }

        tx.commit().await?;

        info!(
            payout_id = %payout.id,
            seller_id = %seller_id,
            net_cents = payout.net_earnings_cents,
            items = draft.item_ids.len(),
            "Payout created"
        );

        Ok(payout)
    }

    /// Gets a payout by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Payout>> {
        let row = sqlx::query_as::<_, PayoutRow>(&format!(
            "SELECT {PAYOUT_COLUMNS} FROM payouts WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(PayoutRow::into_payout).transpose()
    }

    /// Lists a seller's payouts, newest first.
    pub async fn list_by_seller(&self, seller_id: &str) -> DbResult<Vec<Payout>> {
        let rows = sqlx::query_as::<_, PayoutRow>(&format!(
            "SELECT {PAYOUT_COLUMNS} FROM payouts WHERE seller_id = ?1 ORDER BY created_at DESC, id"
        ))
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(PayoutRow::into_payout).collect()
    }

    /// Transitions a payout's status.
    ///
    /// Driven by the external transfer workflow (bank transfer
    /// completion or failure). The transition is checked against the
    /// lifecycle and applied with a guard on the current status, so a
    /// concurrent transition loses cleanly instead of overwriting.
    pub async fn update_status(&self, payout_id: &str, next: PayoutStatus) -> DbResult<Payout> {
        let current = self
            .get_by_id(payout_id)
            .await?
            .ok_or_else(|| DbError::not_found("Payout", payout_id))?;

        if !current.status.can_transition_to(next) {
            return Err(DbError::Domain(CoreError::InvalidPayoutTransition {
                payout_id: payout_id.to_string(),
                current_status: current.status.as_str().to_string(),
                requested_status: next.as_str().to_string(),
            }));
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE payouts SET status = ?2, updated_at = ?3
            WHERE id = ?1 AND status = ?4
            "#,
        )
        .bind(payout_id)
        .bind(next)
        .bind(now)
        .bind(current.status)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::conflict(format!(
                "payout {payout_id} left {} concurrently",
                current.status.as_str()
            )));
        }

        debug!(payout_id = %payout_id, status = next.as_str(), "Payout status updated");

        Ok(Payout {
            status: next,
            updated_at: now,
            ..current
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
