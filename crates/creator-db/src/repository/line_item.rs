//! # Seller Line-Item Repository
//!
//! Database operations for seller line items - the per-order revenue
//! records the earnings aggregator folds and the payout sweep consumes.
//!
//! ## Lifecycle Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  order paid ──► create()          status = pending                     │
//! │                                                                         │
//! │  refund     ──► mark_refunded()   guarded: only pending items refund   │
//! │                                                                         │
//! │  payout     ──► (PayoutRepository sweep)  pending → included           │
//! │                                                                         │
//! │  Guarded updates use `WHERE ... AND payout_status = 'pending'` and     │
//! │  check rows_affected, so a lost race surfaces instead of silently      │
//! │  double-spending a line item.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use creator_core::{LineItemStatus, SellerLineItem};

/// Repository for seller line-item database operations.
#[derive(Debug, Clone)]
pub struct LineItemRepository {
    pool: SqlitePool,
}

impl LineItemRepository {
    /// Creates a new LineItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LineItemRepository { pool }
    }

    /// Records a new pending line item at order-payment time.
    ///
    /// ## Snapshot Pattern
    /// `gross_amount_cents` and `fee_snapshot_cents` are frozen here;
    /// later fee-rate changes never rewrite them.
    pub async fn create(
        &self,
        seller_id: &str,
        order_id: &str,
        gross_amount_cents: i64,
        fee_snapshot_cents: Option<i64>,
    ) -> DbResult<SellerLineItem> {
        let now = Utc::now();
        let item = SellerLineItem {
            id: Uuid::new_v4().to_string(),
            seller_id: seller_id.to_string(),
            order_id: order_id.to_string(),
            gross_amount_cents,
            fee_snapshot_cents,
            payout_status: LineItemStatus::Pending,
            payout_id: None,
            created_at: now,
            updated_at: now,
        };

        debug!(id = %item.id, seller_id = %seller_id, order_id = %order_id, "Inserting line item");

        sqlx::query(
            r#"
            INSERT INTO seller_line_items (
                id, seller_id, order_id,
                gross_amount_cents, fee_snapshot_cents,
                payout_status, payout_id,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&item.id)
        .bind(&item.seller_id)
        .bind(&item.order_id)
        .bind(item.gross_amount_cents)
        .bind(item.fee_snapshot_cents)
        .bind(item.payout_status)
        .bind(&item.payout_id)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets a line item by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<SellerLineItem>> {
        let item = sqlx::query_as::<_, SellerLineItem>(
            r#"
            SELECT id, seller_id, order_id,
                   gross_amount_cents, fee_snapshot_cents,
                   payout_status, payout_id,
                   created_at, updated_at
            FROM seller_line_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists all line items for a seller, oldest first.
    ///
    /// This is the input the earnings aggregator folds.
    pub async fn list_by_seller(&self, seller_id: &str) -> DbResult<Vec<SellerLineItem>> {
        let items = sqlx::query_as::<_, SellerLineItem>(
            r#"
            SELECT id, seller_id, order_id,
                   gross_amount_cents, fee_snapshot_cents,
                   payout_status, payout_id,
                   created_at, updated_at
            FROM seller_line_items
            WHERE seller_id = ?1
            ORDER BY created_at, id
            "#,
        )
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists a seller's line items in one lifecycle status.
    pub async fn list_by_seller_and_status(
        &self,
        seller_id: &str,
        status: LineItemStatus,
    ) -> DbResult<Vec<SellerLineItem>> {
        let items = sqlx::query_as::<_, SellerLineItem>(
            r#"
            SELECT id, seller_id, order_id,
                   gross_amount_cents, fee_snapshot_cents,
                   payout_status, payout_id,
                   created_at, updated_at
            FROM seller_line_items
            WHERE seller_id = ?1 AND payout_status = ?2
            ORDER BY created_at, id
            "#,
        )
        .bind(seller_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Lists a seller's pending line items - the payout sweep snapshot.
    pub async fn list_pending_by_seller(&self, seller_id: &str) -> DbResult<Vec<SellerLineItem>> {
        self.list_by_seller_and_status(seller_id, LineItemStatus::Pending)
            .await
    }

    /// Marks a line item refunded.
    ///
    /// Guarded: only a `pending` item can transition to `refunded`. An
    /// item already swept into a payout keeps its money with the payout
    /// (refund reconciliation against a paid-out item is a ledger
    /// adjustment, not a status flip).
    pub async fn mark_refunded(&self, id: &str) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE seller_line_items SET
                payout_status = 'refunded',
                updated_at = ?2
            WHERE id = ?1 AND payout_status = 'pending'
            "#,
        )
        .bind(id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Line item (pending)", id));
        }

        debug!(id = %id, "Line item refunded");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_and_fetch() {
        let db = db().await;
        let repo = db.line_items();

        let created = repo
            .create("studio-1", "order-1", 100000, Some(14900))
            .await
            .unwrap();
        assert_eq!(created.payout_status, LineItemStatus::Pending);

        let fetched = repo.get_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.seller_id, "studio-1");
        assert_eq!(fetched.gross_amount_cents, 100000);
        assert_eq!(fetched.fee_snapshot_cents, Some(14900));
        assert!(fetched.payout_id.is_none());
    }

    #[tokio::test]
    async fn test_list_filters_by_seller_and_status() {
        let db = db().await;
        let repo = db.line_items();

        repo.create("studio-1", "order-1", 1000, None).await.unwrap();
        repo.create("studio-1", "order-2", 2000, None).await.unwrap();
        repo.create("studio-2", "order-3", 3000, None).await.unwrap();

        let all = repo.list_by_seller("studio-1").await.unwrap();
        assert_eq!(all.len(), 2);

        let pending = repo.list_pending_by_seller("studio-1").await.unwrap();
        assert_eq!(pending.len(), 2);

        let refunded = repo
            .list_by_seller_and_status("studio-1", LineItemStatus::Refunded)
            .await
            .unwrap();
        assert!(refunded.is_empty());
    }

    #[tokio::test]
    async fn test_mark_refunded_only_from_pending() {
        let db = db().await;
        let repo = db.line_items();

        let item = repo.create("studio-1", "order-1", 1000, None).await.unwrap();
        repo.mark_refunded(&item.id).await.unwrap();

        let refunded = repo.get_by_id(&item.id).await.unwrap().unwrap();
        assert_eq!(refunded.payout_status, LineItemStatus::Refunded);

        // Second refund finds no pending row
        assert!(repo.mark_refunded(&item.id).await.is_err());
    }
}
