use crate::plan::QueryExecutionPlan;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

/// Storage for query execution plans, shared by concurrent requests.
///
/// Implementations must tolerate concurrent reads, writes and evictions. A
/// write replaces whatever plan was stored under the key.
#[async_trait::async_trait]
pub trait QueryPlanCacheProvider: Send + Sync {
    async fn try_get_plan(&self, key: &str) -> Option<Arc<QueryExecutionPlan>>;

    /// Store `plan` under `key`. An entry expires at `absolute_expiration`
    /// or once it has gone unread for `sliding_expiration`, whichever comes
    /// first. Returns `false` when the plan was not stored.
    async fn try_cache_plan(
        &self,
        key: &str,
        plan: Arc<QueryExecutionPlan>,
        absolute_expiration: Option<Instant>,
        sliding_expiration: Option<Duration>,
    ) -> bool;

    /// Returns `true` when an entry was removed.
    async fn evict(&self, key: &str) -> bool;
}
