use crate::execution::BatchResolutionContext;
use crate::execution::FieldResolutionContext;
use serde_json::Value;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

/// Resolves one field for a single source item.
#[async_trait::async_trait]
pub trait FieldResolver: Send + Sync {
    async fn resolve(
        &self,
        context: FieldResolutionContext,
    ) -> Result<Value, ResolverError>;
}

/// Resolves one field for every sibling source item in a single call.
#[async_trait::async_trait]
pub trait BatchFieldResolver: Send + Sync {
    async fn resolve_batch(
        &self,
        context: BatchResolutionContext,
    ) -> Result<BatchResults, ResolverError>;
}

/// Maps a resolved value of an abstract type (interface or union) to the name
/// of its concrete object type.
pub trait TypeResolver: Send + Sync {
    fn resolve_type(&self, value: &Value) -> Option<String>;
}
impl<F> TypeResolver for F
where
    F: Fn(&Value) -> Option<String> + Send + Sync,
{
    fn resolve_type(&self, value: &Value) -> Option<String> {
        self(value)
    }
}

/// The resolver attached to a field. The variant determines the field's
/// [`FieldResolutionMode`](crate::schema::FieldResolutionMode).
#[derive(Clone)]
pub enum FieldResolverKind {
    Batch(Arc<dyn BatchFieldResolver>),
    PerSourceItem(Arc<dyn FieldResolver>),
}
impl std::fmt::Debug for FieldResolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Batch(_) => f.write_str("FieldResolverKind::Batch(..)"),
            Self::PerSourceItem(_) => f.write_str("FieldResolverKind::PerSourceItem(..)"),
        }
    }
}

/// The values produced by a [`BatchFieldResolver`], keyed by the index of the
/// source item (within the batch) each value belongs to. Source items with no
/// entry resolve to `null`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchResults {
    values: HashMap<usize, Value>,
}
impl BatchResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, source_index: usize, value: Value) -> Option<Value> {
        self.values.insert(source_index, value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn take(&mut self, source_index: usize) -> Value {
        self.values.remove(&source_index).unwrap_or(Value::Null)
    }
}
impl std::iter::FromIterator<(usize, Value)> for BatchResults {
    fn from_iter<I: IntoIterator<Item = (usize, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ResolverError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),

    #[error("the resolver panicked: {0}")]
    Panicked(String),

    #[error("service `{0}` was requested but is not registered for this request")]
    ServiceNotRegistered(String),
}
impl ResolverError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

struct FnResolver<F>(F);

#[async_trait::async_trait]
impl<F, Fut> FieldResolver for FnResolver<F>
where
    F: Fn(FieldResolutionContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ResolverError>> + Send + 'static,
{
    async fn resolve(
        &self,
        context: FieldResolutionContext,
    ) -> Result<Value, ResolverError> {
        (self.0)(context).await
    }
}

struct FnBatchResolver<F>(F);

#[async_trait::async_trait]
impl<F, Fut> BatchFieldResolver for FnBatchResolver<F>
where
    F: Fn(BatchResolutionContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<BatchResults, ResolverError>> + Send + 'static,
{
    async fn resolve_batch(
        &self,
        context: BatchResolutionContext,
    ) -> Result<BatchResults, ResolverError> {
        (self.0)(context).await
    }
}

/// Wraps an async closure as a per-source-item [`FieldResolver`].
pub fn resolver_fn<F, Fut>(f: F) -> Arc<dyn FieldResolver>
where
    F: Fn(FieldResolutionContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Value, ResolverError>> + Send + 'static,
{
    Arc::new(FnResolver(f))
}

/// Wraps an async closure as a [`BatchFieldResolver`].
pub fn batch_resolver_fn<F, Fut>(f: F) -> Arc<dyn BatchFieldResolver>
where
    F: Fn(BatchResolutionContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<BatchResults, ResolverError>> + Send + 'static,
{
    Arc::new(FnBatchResolver(f))
}
