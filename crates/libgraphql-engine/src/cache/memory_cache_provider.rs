use crate::cache::QueryPlanCacheProvider;
use crate::plan::QueryExecutionPlan;
use moka::Expiry;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

const DEFAULT_SLIDING_EXPIRATION: Duration = Duration::from_secs(15 * 60);

#[derive(Clone, Debug)]
struct CachedPlan {
    absolute_expiration: Option<Instant>,
    plan: Arc<QueryExecutionPlan>,
    sliding_expiration: Duration,
}
impl CachedPlan {
    /// Time left before the entry expires, counted from `now`.
    fn time_to_live(&self, now: Instant) -> Duration {
        match self.absolute_expiration {
            Some(expires_at) => self.sliding_expiration
                .min(expires_at.saturating_duration_since(now)),
            None => self.sliding_expiration,
        }
    }
}

/// Restarts an entry's sliding window on every read and write, capped by its
/// absolute expiration.
struct PlanExpiry;
impl Expiry<String, CachedPlan> for PlanExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedPlan,
        created_at: Instant,
    ) -> Option<Duration> {
        Some(value.time_to_live(created_at))
    }

    fn expire_after_read(
        &self,
        _key: &String,
        value: &CachedPlan,
        read_at: Instant,
        _duration_until_expiry: Option<Duration>,
        _last_modified_at: Instant,
    ) -> Option<Duration> {
        Some(value.time_to_live(read_at))
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedPlan,
        updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.time_to_live(updated_at))
    }
}

/// An in-process [`QueryPlanCacheProvider`] backed by a `moka` cache, which
/// reclaims expired entries in the background of ordinary reads and writes.
#[derive(Debug)]
pub struct MemoryPlanCacheProvider {
    default_sliding_expiration: Duration,
    entries: Cache<String, CachedPlan>,
}
impl MemoryPlanCacheProvider {
    pub fn new() -> Self {
        Self::with_sliding_expiration(DEFAULT_SLIDING_EXPIRATION)
    }

    /// Use `sliding_expiration` for entries stored without one.
    pub fn with_sliding_expiration(sliding_expiration: Duration) -> Self {
        Self {
            default_sliding_expiration: sliding_expiration,
            entries: Cache::builder()
                .expire_after(PlanExpiry)
                .build(),
        }
    }

    /// The number of live entries, after expired ones have been reclaimed.
    pub async fn len(&self) -> usize {
        self.entries.run_pending_tasks().await;
        self.entries.entry_count() as usize
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
impl Default for MemoryPlanCacheProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl QueryPlanCacheProvider for MemoryPlanCacheProvider {
    async fn try_get_plan(&self, key: &str) -> Option<Arc<QueryExecutionPlan>> {
        let cached = self.entries.get(key).await;
        if cached.is_none() {
            tracing::trace!(key, "plan cache entry not found");
        }
        cached.map(|entry| entry.plan)
    }

    async fn try_cache_plan(
        &self,
        key: &str,
        plan: Arc<QueryExecutionPlan>,
        absolute_expiration: Option<Instant>,
        sliding_expiration: Option<Duration>,
    ) -> bool {
        if absolute_expiration.is_some_and(|expires_at| expires_at <= Instant::now()) {
            return false;
        }
        self.entries.insert(key.to_string(), CachedPlan {
            absolute_expiration,
            plan,
            sliding_expiration: sliding_expiration.unwrap_or(self.default_sliding_expiration),
        }).await;
        true
    }

    async fn evict(&self, key: &str) -> bool {
        self.entries.remove(key).await.is_some()
    }
}
