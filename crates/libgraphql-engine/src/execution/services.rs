use dashmap::DashMap;
use indexmap::IndexMap;
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;

type SharedService = Arc<dyn Any + Send + Sync>;

/// Named, request-scoped services that field resolvers may ask to have
/// injected.
#[derive(Clone, Default)]
pub struct ServiceProvider {
    services: IndexMap<String, SharedService>,
}
impl ServiceProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_service<T: Any + Send + Sync>(
        mut self,
        name: impl Into<String>,
        service: Arc<T>,
    ) -> Self {
        self.services.insert(name.into(), service);
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.services.contains_key(name)
    }

    /// Fetch a service by name, downcasting it to the requested type.
    /// Returns `None` when no service with that name exists or when it is of
    /// some other type.
    pub fn get<T: Any + Send + Sync>(&self, name: &str) -> Option<Arc<T>> {
        self.get_any(name)?.downcast::<T>().ok()
    }

    pub(crate) fn get_any(&self, name: &str) -> Option<SharedService> {
        self.services.get(name).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }
}
impl std::fmt::Debug for ServiceProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceProvider")
            .field("services", &self.services.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// The services injected into a single field resolution, keyed by the names
/// the field declared.
#[derive(Clone, Default)]
pub(crate) struct InjectedServices(pub(crate) IndexMap<String, SharedService>);
impl std::fmt::Debug for InjectedServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.keys()).finish()
    }
}

/// A key/value bag shared by every resolver and directive of one request.
/// Cloning yields another handle onto the same bag.
#[derive(Clone, Debug, Default)]
pub struct SessionData {
    entries: Arc<DashMap<String, Value>>,
}
impl SessionData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    pub fn insert(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.entries.remove(key).map(|(_, value)| value)
    }
}
