//! # Fee Settings
//!
//! Persistence and caching for the platform-wide fee configuration.
//!
//! ## Read Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Settings Read Path                                 │
//! │                                                                         │
//! │  price/earnings request ──► SettingsCache::get()                        │
//! │                                  │                                      │
//! │                 fresh? ──yes──► cached FeeConfiguration (no query)      │
//! │                   │                                                     │
//! │                   no (stale or never loaded)                            │
//! │                   ▼                                                     │
//! │            SettingsRepository::load() ──► fee_settings row             │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │            cache + timestamp, serve                                     │
//! │                                                                         │
//! │  admin saves settings ──► store() + invalidate()                        │
//! │  (next read reloads; remote admin edits surface within the TTL)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cache is time-bounded rather than write-through because settings
//! may be edited by an admin process that doesn't share this cache
//! instance. Staleness is capped at [`SETTINGS_CACHE_TTL_SECS`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use sqlx::SqlitePool;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::DbResult;
use creator_core::{FeeConfiguration, Rate, TaxPolicy, SETTINGS_CACHE_TTL_SECS};

// =============================================================================
// Clock
// =============================================================================

/// Time source for cache-freshness decisions.
///
/// Production uses [`SystemClock`]; tests inject a manual clock to
/// exercise expiry without sleeping.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the single-row fee-settings table.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Loads the current fee configuration.
    ///
    /// The row is seeded by migrations, so a missing row is a schema
    /// problem and surfaces as NotFound rather than a silent default.
    pub async fn load(&self) -> DbResult<FeeConfiguration> {
        let (commission_bps, processing_bps, minimum_cents, tax_enabled, tax_bps): (
            i64,
            i64,
            i64,
            bool,
            i64,
        ) = sqlx::query_as(
            r#"
            SELECT platform_commission_bps, payment_processing_fee_bps,
                   minimum_payout_cents, tax_enabled, tax_rate_bps
            FROM fee_settings
            WHERE id = 1
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        let tax_policy = if tax_enabled {
            Some(TaxPolicy {
                enabled: true,
                rate: Rate::from_bps(tax_bps as u32),
            })
        } else {
            None
        };

        Ok(FeeConfiguration {
            platform_commission: Rate::from_bps(commission_bps as u32),
            payment_processing_fee: Rate::from_bps(processing_bps as u32),
            minimum_payout_cents: minimum_cents,
            tax_policy,
        })
    }

    /// Stores a new fee configuration.
    ///
    /// Callers holding a [`SettingsCache`] should invalidate it after a
    /// successful store.
    pub async fn store(&self, config: &FeeConfiguration) -> DbResult<()> {
        let (tax_enabled, tax_bps) = match &config.tax_policy {
            Some(policy) => (policy.enabled, policy.rate.bps() as i64),
            None => (false, 0),
        };

        sqlx::query(
            r#"
            UPDATE fee_settings SET
                platform_commission_bps = ?1,
                payment_processing_fee_bps = ?2,
                minimum_payout_cents = ?3,
                tax_enabled = ?4,
                tax_rate_bps = ?5,
                updated_at = ?6
            WHERE id = 1
            "#,
        )
        .bind(config.platform_commission.bps() as i64)
        .bind(config.payment_processing_fee.bps() as i64)
        .bind(config.minimum_payout_cents)
        .bind(tax_enabled)
        .bind(tax_bps)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        info!(
            commission_bps = config.platform_commission.bps(),
            processing_bps = config.payment_processing_fee.bps(),
            minimum_cents = config.minimum_payout_cents,
            "Fee settings updated"
        );

        Ok(())
    }
}

// =============================================================================
// Cache
// =============================================================================

/// Time-bounded cache over [`SettingsRepository`].
///
/// ## Example
/// ```rust,ignore
/// let cache = SettingsCache::new(db.settings());
/// let config = cache.get().await?;   // query on first call
/// let config = cache.get().await?;   // served from cache
/// ```
#[derive(Debug, Clone)]
pub struct SettingsCache {
    repo: SettingsRepository,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    cached: Arc<RwLock<Option<(FeeConfiguration, Instant)>>>,
}

impl SettingsCache {
    /// Creates a cache with the default TTL and system clock.
    pub fn new(repo: SettingsRepository) -> Self {
        SettingsCache {
            repo,
            ttl: Duration::from_secs(SETTINGS_CACHE_TTL_SECS),
            clock: Arc::new(SystemClock),
            cached: Arc::new(RwLock::new(None)),
        }
    }

    /// Overrides the freshness window.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Injects a time source (for tests).
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the fee configuration, querying only when the cached
    /// copy is missing or older than the TTL.
    pub async fn get(&self) -> DbResult<FeeConfiguration> {
        let now = self.clock.now();

        {
            let guard = self.cached.read().await;
            if let Some((config, loaded_at)) = guard.as_ref() {
                if now.duration_since(*loaded_at) < self.ttl {
                    return Ok(config.clone());
                }
            }
        }

        // Stale or cold: reload under the write lock. A concurrent
        // refresh may have landed while we waited; the extra query is
        // harmless and the newest row wins.
        let mut guard = self.cached.write().await;
        let config = self.repo.load().await?;
        *guard = Some((config.clone(), now));

        debug!("Fee settings cache refreshed");
        Ok(config)
    }

    /// Drops the cached copy; the next `get()` reloads.
    pub async fn invalidate(&self) {
        let mut guard = self.cached.write().await;
        *guard = None;
        debug!("Fee settings cache invalidated");
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use std::sync::Mutex;

    /// Test clock: a fixed origin plus an advanceable offset.
    #[derive(Debug)]
    struct ManualClock {
        origin: Instant,
        offset: Mutex<Duration>,
    }

    impl ManualClock {
        fn new() -> Self {
            ManualClock {
                origin: Instant::now(),
                offset: Mutex::new(Duration::ZERO),
            }
        }

        fn advance(&self, by: Duration) {
            *self.offset.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            self.origin + *self.offset.lock().unwrap()
        }
    }

    async fn db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn custom_config() -> FeeConfiguration {
        FeeConfiguration {
            platform_commission: Rate::from_bps(1500),
            payment_processing_fee: Rate::from_bps(300),
            minimum_payout_cents: 25000,
            tax_policy: Some(TaxPolicy {
                enabled: true,
                rate: Rate::from_bps(825),
            }),
        }
    }

    #[tokio::test]
    async fn test_store_and_load_round_trip() {
        let db = db().await;
        let repo = db.settings();

        repo.store(&custom_config()).await.unwrap();
        let loaded = repo.load().await.unwrap();

        assert_eq!(loaded.platform_commission.bps(), 1500);
        assert_eq!(loaded.payment_processing_fee.bps(), 300);
        assert_eq!(loaded.minimum_payout_cents, 25000);
        assert_eq!(loaded.tax_policy.unwrap().rate.bps(), 825);
    }

    #[tokio::test]
    async fn test_cache_serves_stale_copy_within_ttl() {
        let db = db().await;
        let clock = Arc::new(ManualClock::new());
        let cache = SettingsCache::new(db.settings()).with_clock(clock.clone());

        let first = cache.get().await.unwrap();
        assert_eq!(first.platform_commission.bps(), 1200);

        // Write behind the cache's back; within the TTL the old copy
        // is still served
        db.settings().store(&custom_config()).await.unwrap();
        clock.advance(Duration::from_secs(SETTINGS_CACHE_TTL_SECS - 1));
        let cached = cache.get().await.unwrap();
        assert_eq!(cached.platform_commission.bps(), 1200);
    }

    #[tokio::test]
    async fn test_cache_reloads_after_ttl() {
        let db = db().await;
        let clock = Arc::new(ManualClock::new());
        let cache = SettingsCache::new(db.settings()).with_clock(clock.clone());

        cache.get().await.unwrap();
        db.settings().store(&custom_config()).await.unwrap();

        clock.advance(Duration::from_secs(SETTINGS_CACHE_TTL_SECS));
        let reloaded = cache.get().await.unwrap();
        assert_eq!(reloaded.platform_commission.bps(), 1500);
    }

    #[tokio::test]
    async fn test_invalidate_forces_reload() {
        let db = db().await;
        let cache = SettingsCache::new(db.settings());

        cache.get().await.unwrap();
        db.settings().store(&custom_config()).await.unwrap();

        cache.invalidate().await;
        let reloaded = cache.get().await.unwrap();
        assert_eq!(reloaded.minimum_payout_cents, 25000);
    }
}
