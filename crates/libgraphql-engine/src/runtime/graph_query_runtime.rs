use crate::cache::DefaultQueryPlanCacheKeyManager;
use crate::cache::MemoryPlanCacheProvider;
use crate::cache::QueryPlanCacheKeyManager;
use crate::cache::QueryPlanCacheProvider;
use crate::execution::FieldAuthorizer;
use crate::execution::FieldExecutionEngine;
use crate::execution::GraphQueryExecutionContext;
use crate::execution::QueryEvent;
use crate::execution::QueryEventListener;
use crate::execution::QueryExecutionResult;
use crate::execution::QueryMetrics;
use crate::execution::TracingEventListener;
use crate::messages::GraphMessage;
use crate::messages::codes;
use crate::plan::DefaultQueryPlanGenerator;
use crate::plan::QueryExecutionPlan;
use crate::runtime::variable_coercion::coerce_variables;
use crate::schema::Schema;
use std::sync::Arc;
use std::time::Instant;

/// Runs requests against one schema: looks up (or generates and caches) the
/// request's plan, picks the operation to run, coerces the request's
/// variables and executes the operation.
#[derive(Clone)]
pub struct GraphQueryRuntime {
    cache: Arc<dyn QueryPlanCacheProvider>,
    engine: FieldExecutionEngine,
    key_manager: Arc<dyn QueryPlanCacheKeyManager>,
    listener: Arc<dyn QueryEventListener>,
    plan_generator: DefaultQueryPlanGenerator,
    schema: Arc<Schema>,
}
impl GraphQueryRuntime {
    pub fn new(schema: Arc<Schema>) -> Self {
        let sliding_expiration = schema.options().plan_cache_sliding_expiration;
        Self {
            cache: Arc::new(MemoryPlanCacheProvider::with_sliding_expiration(sliding_expiration)),
            engine: FieldExecutionEngine::new(),
            key_manager: Arc::new(DefaultQueryPlanCacheKeyManager::new()),
            listener: Arc::new(TracingEventListener),
            plan_generator: DefaultQueryPlanGenerator::new(),
            schema,
        }
    }

    pub fn with_authorizer(mut self, authorizer: Arc<dyn FieldAuthorizer>) -> Self {
        self.engine = self.engine.with_authorizer(authorizer);
        self
    }

    pub fn with_cache(mut self, cache: Arc<dyn QueryPlanCacheProvider>) -> Self {
        self.cache = cache;
        self
    }

    pub fn with_key_manager(mut self, key_manager: Arc<dyn QueryPlanCacheKeyManager>) -> Self {
        self.key_manager = key_manager;
        self
    }

    pub fn with_listener(mut self, listener: Arc<dyn QueryEventListener>) -> Self {
        self.listener = listener;
        self
    }

    pub fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    pub async fn execute(&self, context: GraphQueryExecutionContext) -> QueryExecutionResult {
        let metrics = context.metrics.clone();
        if context.cancellation_token.is_cancelled() {
            return QueryExecutionResult::empty(metrics);
        }

        let listener = context.listener.as_deref().unwrap_or(self.listener.as_ref());
        let request = &context.request;
        let query_hash = self.key_manager.create_key(self.schema.name(), &request.query);
        listener.record(&QueryEvent::RequestReceived { query_hash: query_hash.clone() });

        let plan = self.plan_for(&request.query, &query_hash, listener, metrics.as_deref()).await;
        if !plan.is_valid() {
            return QueryExecutionResult::with_messages(plan.messages().clone(), metrics);
        }

        let mut messages = plan.messages().clone();
        let Some(operation) = plan.operation(request.operation_name.as_deref()) else {
            messages.add(GraphMessage::critical(
                codes::INVALID_DOCUMENT,
                match &request.operation_name {
                    Some(name) => format!("The document does not contain an operation named `{name}`"),
                    None => "An operation name is required when a document contains more than \
                        one operation".to_string(),
                },
            ));
            return QueryExecutionResult::with_messages(messages, metrics);
        };
        if !operation.is_valid() {
            messages.add_range(operation.messages().iter().cloned());
            return QueryExecutionResult::with_messages(messages, metrics);
        }

        let started = Instant::now();
        let variables = match coerce_variables(operation, &request.variables, &self.schema) {
            Ok(variables) => variables,
            Err(errors) => {
                messages.add_range(errors);
                return QueryExecutionResult::with_messages(messages, metrics);
            },
        };
        if let Some(metrics) = &metrics {
            metrics.record_phase(QueryMetrics::PHASE_VARIABLES, started.elapsed());
        }

        let mut result = self.engine
            .execute(operation, &self.schema, &context, &variables, listener, &query_hash)
            .await;
        if !messages.is_empty() {
            messages.add_range(std::mem::take(&mut result.messages));
            result.messages = messages;
        }
        result
    }

    /// The plan for `query_text`, from the cache when possible. Only valid
    /// plans are cached.
    async fn plan_for(
        &self,
        query_text: &str,
        query_hash: &str,
        listener: &dyn QueryEventListener,
        metrics: Option<&QueryMetrics>,
    ) -> Arc<QueryExecutionPlan> {
        let started = Instant::now();
        let cached = self.cache.try_get_plan(query_hash).await;
        if let Some(metrics) = metrics {
            metrics.record_phase(QueryMetrics::PHASE_PLAN_LOOKUP, started.elapsed());
        }
        if let Some(plan) = cached {
            listener.record(&QueryEvent::PlanCacheHit { query_hash: query_hash.to_string() });
            return plan;
        }
        listener.record(&QueryEvent::PlanCacheMiss { query_hash: query_hash.to_string() });

        let started = Instant::now();
        let plan = Arc::new(self.plan_generator.generate_from_text(query_text, &self.schema));
        if let Some(metrics) = metrics {
            metrics.record_phase(QueryMetrics::PHASE_PLANNING, started.elapsed());
        }
        listener.record(&QueryEvent::PlanGenerated {
            query_hash: query_hash.to_string(),
            valid: plan.is_valid(),
        });

        if plan.is_valid() {
            let cached = self.cache.try_cache_plan(
                query_hash,
                Arc::clone(&plan),
                None,
                Some(self.schema.options().plan_cache_sliding_expiration),
            ).await;
            if !cached {
                tracing::debug!(%query_hash, "plan was not cached");
            }
        }
        plan
    }
}
impl std::fmt::Debug for GraphQueryRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQueryRuntime")
            .field("engine", &self.engine)
            .field("plan_generator", &self.plan_generator)
            .field("schema", &self.schema.name())
            .finish_non_exhaustive()
    }
}
