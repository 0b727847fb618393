use crate::cache::MemoryPlanCacheProvider;
use crate::cache::QueryPlanCacheProvider;
use crate::plan::QueryExecutionPlan;
use rayon::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

#[tokio::test]
async fn cached_plan_round_trips_as_the_same_instance() {
    let cache = MemoryPlanCacheProvider::new();
    let plan = Arc::new(QueryExecutionPlan::default());

    assert!(cache.try_cache_plan("k", plan.clone(), None, None).await);
    let cached = cache.try_get_plan("k").await.expect("plan is cached");
    assert!(Arc::ptr_eq(&plan, &cached));
}

#[tokio::test]
async fn evicted_plans_are_not_found() {
    let cache = MemoryPlanCacheProvider::new();
    cache.try_cache_plan("k", Arc::new(QueryExecutionPlan::default()), None, None).await;

    assert!(cache.evict("k").await);
    assert!(cache.try_get_plan("k").await.is_none());
    assert!(!cache.evict("k").await);
}

#[tokio::test]
async fn last_writer_wins() {
    let cache = MemoryPlanCacheProvider::new();
    let first = Arc::new(QueryExecutionPlan::default());
    let second = Arc::new(QueryExecutionPlan::default());

    cache.try_cache_plan("k", first, None, None).await;
    cache.try_cache_plan("k", second.clone(), None, None).await;
    let cached = cache.try_get_plan("k").await.expect("plan is cached");
    assert!(Arc::ptr_eq(&second, &cached));
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn sliding_expiration_drops_idle_entries() {
    let cache = MemoryPlanCacheProvider::new();
    cache.try_cache_plan("k", Arc::new(QueryExecutionPlan::default()), None, Some(Duration::ZERO)).await;

    assert!(cache.try_get_plan("k").await.is_none());
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn default_sliding_expiration_applies() {
    let cache = MemoryPlanCacheProvider::with_sliding_expiration(Duration::ZERO);
    cache.try_cache_plan("k", Arc::new(QueryExecutionPlan::default()), None, None).await;
    assert!(cache.try_get_plan("k").await.is_none());
}

#[tokio::test]
async fn already_expired_plans_are_not_stored() {
    let cache = MemoryPlanCacheProvider::new();
    let stored = cache.try_cache_plan(
        "k",
        Arc::new(QueryExecutionPlan::default()),
        Some(Instant::now()),
        None,
    ).await;

    assert!(!stored);
    assert!(cache.is_empty().await);
}

#[tokio::test]
async fn expired_entries_are_reclaimed_without_being_read() {
    let cache = MemoryPlanCacheProvider::new();
    for idx in 0..10_000 {
        let key = format!("idle{idx}");
        let plan = Arc::new(QueryExecutionPlan::default());
        cache.try_cache_plan(&key, plan, None, Some(Duration::from_millis(5))).await;
    }
    cache.try_cache_plan(
        "short-lived",
        Arc::new(QueryExecutionPlan::default()),
        Some(Instant::now() + Duration::from_millis(5)),
        None,
    ).await;
    cache.try_cache_plan("live", Arc::new(QueryExecutionPlan::default()), None, None).await;

    tokio::time::sleep(Duration::from_millis(50)).await;

    assert!(cache.try_get_plan("live").await.is_some());
    assert_eq!(cache.len().await, 1);
}

#[tokio::test]
async fn reads_extend_the_sliding_window() {
    let cache = MemoryPlanCacheProvider::new();
    let plan = Arc::new(QueryExecutionPlan::default());
    cache.try_cache_plan("k", plan, None, Some(Duration::from_millis(200))).await;

    for _ in 0..4 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(cache.try_get_plan("k").await.is_some());
    }
}

#[test]
fn concurrent_access_keeps_entries_intact() {
    let cache = MemoryPlanCacheProvider::new();
    let plans: Vec<_> = (0..16).map(|_| Arc::new(QueryExecutionPlan::default())).collect();

    (0..2_000usize).into_par_iter().for_each(|idx| {
        let key = format!("k{}", idx % plans.len());
        let plan = plans[idx % plans.len()].clone();
        futures::executor::block_on(async {
            match idx % 3 {
                0 => {
                    cache.try_cache_plan(&key, plan, None, None).await;
                },
                1 => {
                    if let Some(cached) = cache.try_get_plan(&key).await {
                        assert!(Arc::ptr_eq(&cached, &plans[idx % plans.len()]));
                    }
                },
                _ => {
                    cache.evict(&key).await;
                },
            }
        });
    });

    for (idx, plan) in plans.iter().enumerate() {
        let key = format!("k{idx}");
        futures::executor::block_on(cache.try_cache_plan(&key, plan.clone(), None, None));
        let cached = futures::executor::block_on(cache.try_get_plan(&key)).expect("plan is cached");
        assert!(Arc::ptr_eq(&cached, plan));
    }
}
