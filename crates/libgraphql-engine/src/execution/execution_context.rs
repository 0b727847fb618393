use crate::execution::QueryEventListener;
use crate::execution::QueryMetrics;
use crate::execution::SecurityContext;
use crate::execution::ServiceProvider;
use crate::execution::SessionData;
use crate::execution::UserPrincipal;
use crate::execution::services::InjectedServices;
use crate::messages::ResponsePath;
use crate::schema::FieldDefinition;
use crate::schema::ResolverError;
use serde_json::Map;
use serde_json::Value;
use std::any::Any;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// The query text, operation name and variables of a single request.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphQueryRequest {
    pub operation_name: Option<String>,
    pub query: String,
    pub variables: Map<String, Value>,
}
impl GraphQueryRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            operation_name: None,
            query: query.into(),
            variables: Map::new(),
        }
    }

    pub fn with_operation_name(mut self, operation_name: impl Into<String>) -> Self {
        self.operation_name = Some(operation_name.into());
        self
    }

    pub fn with_variables(mut self, variables: Map<String, Value>) -> Self {
        self.variables = variables;
        self
    }
}

/// Everything mutable or caller-supplied about one request. Never shared
/// between requests.
#[derive(Clone)]
pub struct GraphQueryExecutionContext {
    pub(crate) cancellation_token: CancellationToken,
    pub(crate) listener: Option<Arc<dyn QueryEventListener>>,
    pub(crate) metrics: Option<Arc<QueryMetrics>>,
    pub(crate) request: GraphQueryRequest,
    pub(crate) root_value: Value,
    pub(crate) security_context: SecurityContext,
    pub(crate) services: ServiceProvider,
    pub(crate) session: SessionData,
}
impl GraphQueryExecutionContext {
    pub fn new(request: GraphQueryRequest) -> Self {
        Self {
            cancellation_token: CancellationToken::new(),
            listener: None,
            metrics: None,
            request,
            root_value: Value::Object(Map::new()),
            security_context: SecurityContext::default(),
            services: ServiceProvider::default(),
            session: SessionData::default(),
        }
    }

    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = token;
        self
    }

    /// Send this request's events to `listener` instead of the runtime's.
    pub fn with_listener(mut self, listener: Arc<dyn QueryEventListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    pub fn with_metrics(mut self) -> Self {
        self.metrics = Some(Arc::new(QueryMetrics::new()));
        self
    }

    /// The source value the root operation type's fields are resolved
    /// against.
    pub fn with_root_value(mut self, root_value: Value) -> Self {
        self.root_value = root_value;
        self
    }

    pub fn with_security_context(mut self, security_context: SecurityContext) -> Self {
        self.security_context = security_context;
        self
    }

    pub fn with_services(mut self, services: ServiceProvider) -> Self {
        self.services = services;
        self
    }

    pub fn with_session(mut self, session: SessionData) -> Self {
        self.session = session;
        self
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    pub fn metrics(&self) -> Option<&Arc<QueryMetrics>> {
        self.metrics.as_ref()
    }

    pub fn request(&self) -> &GraphQueryRequest {
        &self.request
    }

    pub fn root_value(&self) -> &Value {
        &self.root_value
    }

    pub fn security_context(&self) -> &SecurityContext {
        &self.security_context
    }

    pub fn services(&self) -> &ServiceProvider {
        &self.services
    }

    pub fn session(&self) -> &SessionData {
        &self.session
    }
}
impl std::fmt::Debug for GraphQueryExecutionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphQueryExecutionContext")
            .field("cancellation_token", &self.cancellation_token)
            .field("metrics", &self.metrics)
            .field("request", &self.request)
            .field("root_value", &self.root_value)
            .field("security_context", &self.security_context)
            .field("services", &self.services)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

fn injected_service<T: Any + Send + Sync>(
    services: &InjectedServices,
    name: &str,
) -> Result<Arc<T>, ResolverError> {
    services.0
        .get(name)
        .cloned()
        .and_then(|service| service.downcast::<T>().ok())
        .ok_or_else(|| ResolverError::ServiceNotRegistered(name.to_string()))
}

/// What a per-source-item resolver is handed for one field of one source
/// item.
#[derive(Clone, Debug)]
pub struct FieldResolutionContext {
    pub(crate) arguments: Map<String, Value>,
    pub(crate) cancellation_token: CancellationToken,
    pub(crate) field: Arc<FieldDefinition>,
    pub(crate) path: ResponsePath,
    pub(crate) services: InjectedServices,
    pub(crate) session: SessionData,
    pub(crate) source: Value,
    pub(crate) user: Option<UserPrincipal>,
}
impl FieldResolutionContext {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// The field's coerced arguments. Arguments with neither a supplied
    /// value nor a default are absent.
    pub fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    pub fn field(&self) -> &FieldDefinition {
        &self.field
    }

    pub fn path(&self) -> &ResponsePath {
        &self.path
    }

    /// One of the services the field declared, downcast to `T`.
    pub fn service<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>, ResolverError> {
        injected_service(&self.services, name)
    }

    pub fn session(&self) -> &SessionData {
        &self.session
    }

    /// The parent value this field is being resolved on.
    pub fn source(&self) -> &Value {
        &self.source
    }

    pub fn user(&self) -> Option<&UserPrincipal> {
        self.user.as_ref()
    }
}

/// What a batch resolver is handed: every sibling source item the field is
/// being resolved for, in response order.
#[derive(Clone, Debug)]
pub struct BatchResolutionContext {
    pub(crate) arguments: Map<String, Value>,
    pub(crate) cancellation_token: CancellationToken,
    pub(crate) field: Arc<FieldDefinition>,
    pub(crate) paths: Vec<ResponsePath>,
    pub(crate) services: InjectedServices,
    pub(crate) session: SessionData,
    pub(crate) sources: Vec<Value>,
    pub(crate) user: Option<UserPrincipal>,
}
impl BatchResolutionContext {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    pub fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation_token
    }

    pub fn field(&self) -> &FieldDefinition {
        &self.field
    }

    pub fn paths(&self) -> &[ResponsePath] {
        self.paths.as_slice()
    }

    pub fn service<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>, ResolverError> {
        injected_service(&self.services, name)
    }

    pub fn session(&self) -> &SessionData {
        &self.session
    }

    /// The parent values, indexed the same way the returned
    /// [`BatchResults`](crate::schema::BatchResults) must be.
    pub fn sources(&self) -> &[Value] {
        self.sources.as_slice()
    }

    pub fn user(&self) -> Option<&UserPrincipal> {
        self.user.as_ref()
    }
}
