//! # creator-db: Database Layer for Core Creator
//!
//! SQLite persistence for the settlement engine: seller line items,
//! payout records and the cached fee configuration. All business rules
//! live in creator-core; this crate owns the SQL, the transactions and
//! the concurrency guards around them.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        creator-db Layout                                │
//! │                                                                         │
//! │  Database (pool.rs)                                                    │
//! │       │                                                                 │
//! │       ├──► LineItemRepository   create / list / mark_refunded          │
//! │       │                                                                 │
//! │       ├──► PayoutRepository     try_create_payout (conditional sweep)  │
//! │       │                         update_status (guarded transitions)    │
//! │       │                                                                 │
//! │       └──► SettingsRepository   load / store                           │
//! │                 └── SettingsCache (TTL + invalidate)                   │
//! │                                                                         │
//! │  migrations.rs ── embedded SQL migrations (sqlx::migrate!)             │
//! │  error.rs      ── DbError: sqlx mapping + optimistic Conflict          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use creator_db::{Database, DbConfig, PayoutOutcome};
//!
//! let db = Database::new(DbConfig::new("creator.db")).await?;
//! let settings = creator_db::SettingsCache::new(db.settings());
//!
//! let config = settings.get().await?;
//! match db.payouts().try_create_payout("studio-1", &config).await? {
//!     PayoutOutcome::Created(payout) => println!("payout {} created", payout.id),
//!     PayoutOutcome::Rejected(reason) => println!("{reason}"),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod settings;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::{LineItemRepository, PayoutOutcome, PayoutRepository};
pub use settings::{Clock, SettingsCache, SettingsRepository, SystemClock};
