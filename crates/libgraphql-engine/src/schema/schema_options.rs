use crate::schema::FieldSource;
use std::time::Duration;

const DEFAULT_PLAN_CACHE_SLIDING_EXPIRATION: Duration = Duration::from_secs(15 * 60);

/// Which kinds of field resolvers must run one at a time rather than
/// concurrently with their siblings.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(default)]
pub struct ResolverIsolation {
    pub actions: bool,
    pub methods: bool,
    pub properties: bool,
}
impl ResolverIsolation {
    pub fn all() -> Self {
        Self {
            actions: true,
            methods: true,
            properties: true,
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn applies_to(&self, source: FieldSource) -> bool {
        match source {
            FieldSource::Action => self.actions,
            FieldSource::Method => self.methods,
            FieldSource::Property => self.properties,
        }
    }
}

/// Schema-wide limits and execution settings.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SchemaOptions {
    /// Plans whose estimated complexity exceeds this value are rejected.
    pub max_query_complexity: Option<f64>,

    /// Documents whose maximum field depth exceeds this value are rejected.
    pub max_query_depth: Option<usize>,

    pub plan_cache_sliding_expiration: Duration,

    /// The time a single request is allowed to spend executing before it is
    /// abandoned with an OPERATION_TIMEOUT message.
    pub query_timeout_ms: Option<u64>,

    pub resolver_isolation: ResolverIsolation,
}
impl SchemaOptions {
    pub fn query_timeout(&self) -> Option<Duration> {
        self.query_timeout_ms.map(Duration::from_millis)
    }
}
impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            max_query_complexity: None,
            max_query_depth: None,
            plan_cache_sliding_expiration: DEFAULT_PLAN_CACHE_SLIDING_EXPIRATION,
            query_timeout_ms: None,
            resolver_isolation: ResolverIsolation::none(),
        }
    }
}
