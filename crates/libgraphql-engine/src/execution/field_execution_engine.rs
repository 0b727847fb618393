use crate::OperationType;
use crate::execution::AuthorizationResult;
use crate::execution::BatchResolutionContext;
use crate::execution::FieldAuthorizer;
use crate::execution::FieldResolutionContext;
use crate::execution::GraphQueryExecutionContext;
use crate::execution::QueryCancellationMonitor;
use crate::execution::QueryEvent;
use crate::execution::QueryEventListener;
use crate::execution::QueryExecutionResult;
use crate::execution::QueryMetrics;
use crate::execution::UserPrincipal;
use crate::execution::argument_resolver::ResolvedArguments;
use crate::execution::argument_resolver::resolve_field_arguments;
use crate::execution::cancellation_monitor::MonitorState;
use crate::execution::directive_processor::DirectiveProcessor;
use crate::execution::directive_processor::DirectiveTarget;
use crate::execution::directive_processor::DirectiveVerdict;
use crate::execution::value_completion::Bubble;
use crate::execution::value_completion::Completed;
use crate::execution::value_completion::ParentItem;
use crate::execution::value_completion::ShapeBuilder;
use crate::execution::value_completion::assemble;
use crate::execution::value_completion::merge_response_value;
use crate::execution::value_completion::null_for;
use crate::messages::GraphMessage;
use crate::messages::GraphMessageCollection;
use crate::messages::ResponsePath;
use crate::messages::codes;
use crate::plan::ExecutableOperation;
use crate::plan::FieldInvocationContext;
use crate::schema::FieldDefinition;
use crate::schema::FieldResolver;
use crate::schema::FieldResolverKind;
use crate::schema::ResolverError;
use crate::schema::Schema;
use futures::FutureExt;
use futures::future::BoxFuture;
use futures::future::join_all;
use serde_json::Map;
use serde_json::Value;
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::time::Instant;

/// Resolves the field contexts of an [`ExecutableOperation`] into a response
/// tree.
///
/// Field contexts at each level run in two partitions: contexts whose field
/// is isolated (explicitly or through the schema's isolation policy) run one
/// at a time first, then the remaining contexts run concurrently. A field's
/// sub-selection is resolved once for every value the field produced across
/// all of its source items, which is what lets batch resolvers see every
/// sibling at once. Response keys always follow document order.
#[derive(Clone, Default)]
pub struct FieldExecutionEngine {
    authorizer: Option<Arc<dyn FieldAuthorizer>>,
}
impl FieldExecutionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_authorizer(mut self, authorizer: Arc<dyn FieldAuthorizer>) -> Self {
        self.authorizer = Some(authorizer);
        self
    }

    /// Execute one operation under a [`QueryCancellationMonitor`].
    ///
    /// A request whose cancellation token fired before execution begins
    /// yields no data, no messages and no events. Cancellation during
    /// execution discards any partial data and records OPERATION_CANCELED;
    /// exceeding the schema's query timeout records OPERATION_TIMEOUT.
    pub async fn execute(
        &self,
        operation: &ExecutableOperation,
        schema: &Schema,
        context: &GraphQueryExecutionContext,
        variables: &Map<String, Value>,
        listener: &dyn QueryEventListener,
        query_hash: &str,
    ) -> QueryExecutionResult {
        let metrics = context.metrics.clone();
        if context.cancellation_token.is_cancelled() {
            tracing::debug!(%query_hash, "request was cancelled before execution started");
            return QueryExecutionResult::empty(metrics);
        }

        let started = Instant::now();
        let monitor = QueryCancellationMonitor::new(
            context.cancellation_token.clone(),
            schema.options().query_timeout(),
        );
        monitor.start();

        let run = ExecutionRun {
            authorizer: self.authorizer.as_deref(),
            context,
            listener,
            messages: Mutex::new(GraphMessageCollection::new()),
            metrics: metrics.as_deref(),
            schema,
            variables,
        };
        let outcome = tokio::select! {
            biased;
            data = run.execute_operation(operation) => {
                monitor.complete();
                // Resolvers that return early on cancellation still cancel.
                if context.cancellation_token.is_cancelled() {
                    Err(MonitorState::Cancelled)
                } else {
                    Ok(data)
                }
            },
            state = monitor.wait() => Err(state),
        };

        let elapsed = started.elapsed();
        if let Some(metrics) = &metrics {
            metrics.record_phase(QueryMetrics::PHASE_EXECUTION, elapsed);
        }

        let query_hash = query_hash.to_string();
        match outcome {
            Ok(data) => {
                listener.record(&QueryEvent::RequestCompleted { elapsed, query_hash });
                QueryExecutionResult {
                    data,
                    messages: run.into_messages(),
                    metrics,
                }
            },

            Err(MonitorState::TimedOut) => {
                let timeout = monitor.timeout().unwrap_or(elapsed);
                listener.record(&QueryEvent::RequestTimedOut {
                    query_hash: query_hash.clone(),
                    timeout,
                });
                listener.record(&QueryEvent::RequestCompleted { elapsed, query_hash });
                QueryExecutionResult::failed(
                    GraphMessage::critical(
                        codes::OPERATION_TIMEOUT,
                        format!("The operation timed out after {}ms", timeout.as_millis()),
                    ),
                    metrics,
                )
            },

            Err(_) => {
                listener.record(&QueryEvent::RequestCancelled { query_hash });
                QueryExecutionResult::failed(
                    GraphMessage::critical(codes::OPERATION_CANCELED, "The operation was canceled"),
                    metrics,
                )
            },
        }
    }
}
impl std::fmt::Debug for FieldExecutionEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldExecutionEngine")
            .field("authorizer", &self.authorizer.is_some())
            .finish()
    }
}

/// Every source item one field context resolves against that maps to the
/// same concrete field definition.
struct FieldTask<'b> {
    context: &'b FieldInvocationContext,
    context_index: usize,
    field: Arc<FieldDefinition>,
    items: Vec<usize>,
}

/// A source item that passed its field's directives and authorization
/// challenge and is ready to be resolved.
struct PendingItem {
    index: usize,
    path: ResponsePath,
    user: Option<UserPrincipal>,
}

enum Preparation {
    Failed(GraphMessage),
    Ready(Option<UserPrincipal>),
    Skip,
}

/// The state of a single operation's execution.
struct ExecutionRun<'a> {
    authorizer: Option<&'a dyn FieldAuthorizer>,
    context: &'a GraphQueryExecutionContext,
    listener: &'a dyn QueryEventListener,
    messages: Mutex<GraphMessageCollection>,
    metrics: Option<&'a QueryMetrics>,
    schema: &'a Schema,
    variables: &'a Map<String, Value>,
}
impl<'a> ExecutionRun<'a> {
    async fn execute_operation(&self, operation: &ExecutableOperation) -> Option<Value> {
        let Some(root_type) = operation.root_type() else {
            self.report(GraphMessage::critical(
                codes::INVALID_DOCUMENT,
                format!("The schema does not support {} operations", operation.operation_type()),
            ));
            return None;
        };

        let root = [ParentItem {
            object_type: root_type.to_string(),
            path: ResponsePath::root(),
            value: self.context.root_value.clone(),
        }];
        let serial = operation.operation_type() == OperationType::Mutation;
        let mut objects = self.resolve_selection(operation.fields(), &root, serial).await;
        match objects.pop() {
            Some(Ok(object)) => Some(Value::Object(object)),
            _ => None,
        }
    }

    fn into_messages(self) -> GraphMessageCollection {
        self.messages.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn report(&self, message: GraphMessage) {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add(message);
    }

    fn report_all(&self, messages: Vec<GraphMessage>) {
        if messages.is_empty() {
            return;
        }
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .add_range(messages);
    }

    fn is_isolated(&self, field: &FieldDefinition) -> bool {
        field.is_isolated()
            || self.schema.options().resolver_isolation.applies_to(field.source())
    }

    fn directive_processor(&self) -> DirectiveProcessor<'_> {
        DirectiveProcessor {
            listener: self.listener,
            schema: self.schema,
            variables: self.variables,
        }
    }

    /// Resolve `contexts` against every item in `items`, producing one
    /// response object per item. An item whose object had to be nulled
    /// (because a non-null field failed) yields [`Bubble`].
    fn resolve_selection<'b>(
        &'b self,
        contexts: &'b [FieldInvocationContext],
        items: &'b [ParentItem],
        serial: bool,
    ) -> BoxFuture<'b, Vec<Result<Map<String, Value>, Bubble>>> {
        async move {
            let mut isolated = vec![];
            let mut parallel = vec![];
            for (context_index, context) in contexts.iter().enumerate() {
                for task in self.field_tasks(context_index, context, items) {
                    if serial || self.is_isolated(&task.field) {
                        isolated.push(task);
                    } else {
                        parallel.push(task);
                    }
                }
            }

            let mut outcomes: Vec<Vec<Option<Completed>>> =
                vec![vec![None; items.len()]; contexts.len()];
            for task in &isolated {
                for (item_idx, outcome) in self.resolve_field(task, items).await {
                    outcomes[task.context_index][item_idx] = outcome;
                }
            }
            let resolved = join_all(parallel.iter().map(|task| self.resolve_field(task, items))).await;
            for (task, results) in parallel.iter().zip(resolved) {
                for (item_idx, outcome) in results {
                    outcomes[task.context_index][item_idx] = outcome;
                }
            }

            (0..items.len())
                .map(|item_idx| {
                    let mut object = Map::new();
                    for (context_index, context) in contexts.iter().enumerate() {
                        match outcomes[context_index][item_idx].take() {
                            Some(Ok(value)) =>
                                merge_response_value(&mut object, context.response_name(), value),
                            Some(Err(bubble)) => return Err(bubble),
                            None => (),
                        }
                    }
                    Ok(object)
                })
                .collect()
        }.boxed()
    }

    /// Group the items a context applies to by the concrete field definition
    /// each item's object type provides.
    fn field_tasks<'b>(
        &self,
        context_index: usize,
        context: &'b FieldInvocationContext,
        items: &[ParentItem],
    ) -> Vec<FieldTask<'b>> {
        let mut tasks: Vec<FieldTask<'b>> = vec![];
        for (item_idx, item) in items.iter().enumerate() {
            if !context.applies_to(&item.object_type) {
                continue;
            }
            let field = self.schema
                .field(&item.object_type, context.field().name())
                .cloned()
                .unwrap_or_else(|| Arc::clone(context.field()));
            match tasks.iter_mut().find(|task| Arc::ptr_eq(&task.field, &field)) {
                Some(task) => task.items.push(item_idx),
                None => tasks.push(FieldTask {
                    context,
                    context_index,
                    field,
                    items: vec![item_idx],
                }),
            }
        }
        tasks
    }

    /// Resolve and complete one field for every item of `task`. Items the
    /// field was skipped for yield `None`.
    async fn resolve_field(
        &self,
        task: &FieldTask<'_>,
        items: &[ParentItem],
    ) -> Vec<(usize, Option<Completed>)> {
        let context = task.context;
        let field = &task.field;
        let annot = field.type_annotation();

        let mut outcomes = Vec::with_capacity(task.items.len());
        let mut pending = vec![];
        for &item_idx in &task.items {
            let item = &items[item_idx];
            let path = item.path.with_field(context.response_name());
            match self.prepare(context, field, item, &path).await {
                Preparation::Failed(message) => {
                    self.report(message);
                    outcomes.push((item_idx, Some(null_for(annot))));
                },
                Preparation::Ready(user) => pending.push(PendingItem {
                    index: item_idx,
                    path,
                    user,
                }),
                Preparation::Skip => outcomes.push((item_idx, None)),
            }
        }
        if pending.is_empty() {
            return outcomes;
        }

        let arguments = match resolve_field_arguments(
            field,
            context.arguments(),
            self.variables,
            &self.context.services,
            self.schema,
        ) {
            Ok(arguments) => arguments,
            Err(err) => {
                let err = Arc::new(err);
                for item in pending {
                    self.report(
                        GraphMessage::critical(codes::INVALID_ARGUMENT, err.to_string())
                            .with_location(context.location())
                            .with_path(item.path)
                            .with_exception(err.clone()),
                    );
                    outcomes.push((item.index, Some(null_for(annot))));
                }
                return outcomes;
            },
        };

        let resolved = self.invoke_resolver(field, &arguments, &pending, items).await;

        let mut builder = ShapeBuilder::new(field, context.location(), self.schema);
        let mut shapes = vec![];
        for (item, result) in pending.into_iter().zip(resolved) {
            let mut value = match result {
                Ok(value) => value,
                Err(err) => {
                    self.report_resolver_failure(context, &item.path, err);
                    outcomes.push((item.index, Some(null_for(annot))));
                    continue;
                },
            };

            if !context.directives().is_empty() {
                let target = DirectiveTarget {
                    field,
                    path: &item.path,
                    session: &self.context.session,
                    source: &items[item.index].value,
                    user: item.user.as_ref(),
                };
                match self.directive_processor()
                    .after_resolution(context.directives(), &target, &mut value)
                    .await
                {
                    DirectiveVerdict::Continue => (),
                    DirectiveVerdict::Halt(message) => {
                        self.report(message);
                        outcomes.push((item.index, Some(null_for(annot))));
                        continue;
                    },
                    DirectiveVerdict::Skip => {
                        outcomes.push((item.index, None));
                        continue;
                    },
                }
            }

            shapes.push((item.index, builder.shape(annot, value, &item.path)));
        }

        let ShapeBuilder { children, messages, .. } = builder;
        self.report_all(messages);

        let mut resolved_children: Vec<Option<Result<Map<String, Value>, Bubble>>> =
            if children.is_empty() {
                vec![]
            } else {
                self.resolve_selection(context.children(), &children, false)
                    .await
                    .into_iter()
                    .map(Some)
                    .collect()
            };
        for (item_idx, shape) in shapes {
            outcomes.push((item_idx, Some(assemble(shape, annot, &mut resolved_children))));
        }
        outcomes
    }

    /// Run the field's directives ahead of resolution and challenge the
    /// field if it declares authorization policies.
    async fn prepare(
        &self,
        context: &FieldInvocationContext,
        field: &Arc<FieldDefinition>,
        item: &ParentItem,
        path: &ResponsePath,
    ) -> Preparation {
        let security_context = &self.context.security_context;
        if !context.directives().is_empty() {
            let target = DirectiveTarget {
                field,
                path,
                session: &self.context.session,
                source: &item.value,
                user: security_context.user(),
            };
            match self.directive_processor()
                .before_resolution(context.directives(), &target)
                .await
            {
                DirectiveVerdict::Continue => (),
                DirectiveVerdict::Halt(message) => return Preparation::Failed(message),
                DirectiveVerdict::Skip => return Preparation::Skip,
            }
        }

        let policies = field.authorization_policies();
        if policies.is_empty() {
            return Preparation::Ready(security_context.user.clone());
        }
        let result = match self.authorizer {
            Some(authorizer) => authorizer.authorize(security_context, field, path, policies).await,
            None => AuthorizationResult::deny(),
        };
        if !result.passed {
            tracing::debug!(%path, field = field.name(), "authorization challenge failed");
            return Preparation::Failed(
                GraphMessage::critical(
                    codes::ACCESS_DENIED,
                    format!("Access to `{}.{}` was denied", field.owner_type(), field.name()),
                )
                .with_location(context.location())
                .with_path(path.clone()),
            );
        }
        Preparation::Ready(result.user.or_else(|| security_context.user.clone()))
    }

    /// Produce the raw value of `field` for every pending item, in order.
    async fn invoke_resolver(
        &self,
        field: &Arc<FieldDefinition>,
        arguments: &ResolvedArguments,
        pending: &[PendingItem],
        items: &[ParentItem],
    ) -> Vec<Result<Value, ResolverError>> {
        if let Some(metrics) = self.metrics {
            metrics.add_fields_resolved(pending.len());
        }
        for item in pending {
            self.listener.record(&QueryEvent::FieldResolutionStarted { path: item.path.clone() });
        }

        let results: Vec<Result<Value, ResolverError>> = if field.is_typename() {
            pending.iter()
                .map(|item| Ok(Value::String(items[item.index].object_type.clone())))
                .collect()
        } else {
            match field.resolver() {
                None => pending.iter()
                    .map(|item| {
                        Ok(items[item.index].value
                            .get(field.name())
                            .cloned()
                            .unwrap_or(Value::Null))
                    })
                    .collect(),

                Some(FieldResolverKind::PerSourceItem(resolver)) => {
                    if self.is_isolated(field) {
                        let mut results = Vec::with_capacity(pending.len());
                        for item in pending {
                            results.push(
                                self.resolve_item(resolver.as_ref(), field, arguments, item, items).await,
                            );
                        }
                        results
                    } else {
                        join_all(pending.iter().map(|item| {
                            self.resolve_item(resolver.as_ref(), field, arguments, item, items)
                        }))
                        .await
                    }
                },

                Some(FieldResolverKind::Batch(resolver)) => {
                    if let Some(metrics) = self.metrics {
                        metrics.add_resolver_invocation();
                    }
                    let batch = BatchResolutionContext {
                        arguments: arguments.values.clone(),
                        cancellation_token: self.context.cancellation_token.clone(),
                        field: Arc::clone(field),
                        paths: pending.iter().map(|item| item.path.clone()).collect(),
                        services: arguments.services.clone(),
                        session: self.context.session.clone(),
                        sources: pending.iter()
                            .map(|item| items[item.index].value.clone())
                            .collect(),
                        user: self.context.security_context.user.clone(),
                    };
                    match guarded(resolver.resolve_batch(batch)).await {
                        Ok(mut batch_results) => (0..pending.len())
                            .map(|idx| Ok(batch_results.take(idx)))
                            .collect(),
                        Err(err) => {
                            let message = err.to_string();
                            pending.iter()
                                .map(|_| Err(ResolverError::Message(message.clone())))
                                .collect()
                        },
                    }
                },
            }
        };

        for (item, result) in pending.iter().zip(&results) {
            self.listener.record(&QueryEvent::FieldResolutionCompleted {
                path: item.path.clone(),
                succeeded: result.is_ok(),
            });
        }
        results
    }

    async fn resolve_item(
        &self,
        resolver: &dyn FieldResolver,
        field: &Arc<FieldDefinition>,
        arguments: &ResolvedArguments,
        item: &PendingItem,
        items: &[ParentItem],
    ) -> Result<Value, ResolverError> {
        if let Some(metrics) = self.metrics {
            metrics.add_resolver_invocation();
        }
        let context = FieldResolutionContext {
            arguments: arguments.values.clone(),
            cancellation_token: self.context.cancellation_token.clone(),
            field: Arc::clone(field),
            path: item.path.clone(),
            services: arguments.services.clone(),
            session: self.context.session.clone(),
            source: items[item.index].value.clone(),
            user: item.user.clone(),
        };
        guarded(resolver.resolve(context)).await
    }

    fn report_resolver_failure(
        &self,
        context: &FieldInvocationContext,
        path: &ResponsePath,
        err: ResolverError,
    ) {
        let error = err.to_string();
        tracing::debug!(%path, %error, "field resolver failed");
        self.listener.record(&QueryEvent::UnhandledException {
            error: error.clone(),
            path: path.clone(),
        });
        self.report(
            GraphMessage::critical(
                codes::UNHANDLED_EXCEPTION,
                format!("An unhandled error occurred while resolving `{path}`: {error}"),
            )
            .with_location(context.location())
            .with_path(path.clone())
            .with_exception(Arc::new(err)),
        );
    }
}

/// Await a resolver, turning a panic into a [`ResolverError`].
async fn guarded<T>(
    future: impl Future<Output = Result<T, ResolverError>>,
) -> Result<T, ResolverError> {
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(result) => result,
        Err(payload) => Err(ResolverError::Panicked(panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
