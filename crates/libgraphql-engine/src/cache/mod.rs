//! Caching of query execution plans across requests.

mod cache_provider;
mod key_manager;
mod memory_cache_provider;

pub use cache_provider::QueryPlanCacheProvider;
pub use key_manager::DefaultQueryPlanCacheKeyManager;
pub use key_manager::QueryPlanCacheKeyManager;
pub use memory_cache_provider::MemoryPlanCacheProvider;

#[cfg(test)]
mod tests;
