use crate::execution::DirectivePhase;
use crate::messages::ResponsePath;
use std::time::Duration;

/// A lifecycle event emitted while planning or executing a request.
///
/// `query_hash` is the plan cache key of the request, which identifies the
/// query text and schema it ran against.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryEvent {
    DirectiveApplied {
        directive: String,
        path: ResponsePath,
        phase: DirectivePhase,
    },
    FieldResolutionCompleted {
        path: ResponsePath,
        succeeded: bool,
    },
    FieldResolutionStarted {
        path: ResponsePath,
    },
    PlanCacheHit {
        query_hash: String,
    },
    PlanCacheMiss {
        query_hash: String,
    },
    PlanGenerated {
        query_hash: String,
        valid: bool,
    },
    RequestCancelled {
        query_hash: String,
    },
    RequestCompleted {
        elapsed: Duration,
        query_hash: String,
    },
    RequestReceived {
        query_hash: String,
    },
    RequestTimedOut {
        query_hash: String,
        timeout: Duration,
    },
    UnhandledException {
        error: String,
        path: ResponsePath,
    },
}
impl QueryEvent {
    /// A stable, human-readable name for the kind of event.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DirectiveApplied { .. } => "directive_applied",
            Self::FieldResolutionCompleted { .. } => "field_resolution_completed",
            Self::FieldResolutionStarted { .. } => "field_resolution_started",
            Self::PlanCacheHit { .. } => "plan_cache_hit",
            Self::PlanCacheMiss { .. } => "plan_cache_miss",
            Self::PlanGenerated { .. } => "plan_generated",
            Self::RequestCancelled { .. } => "request_cancelled",
            Self::RequestCompleted { .. } => "request_completed",
            Self::RequestReceived { .. } => "request_received",
            Self::RequestTimedOut { .. } => "request_timed_out",
            Self::UnhandledException { .. } => "unhandled_exception",
        }
    }
}

/// Receives the engine's lifecycle events. The engine does not format or
/// persist events itself.
pub trait QueryEventListener: Send + Sync {
    fn record(&self, _event: &QueryEvent) {}
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullEventListener;
impl QueryEventListener for NullEventListener {}

/// Forwards every event to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventListener;
impl QueryEventListener for TracingEventListener {
    fn record(&self, event: &QueryEvent) {
        let name = event.name();
        match event {
            QueryEvent::DirectiveApplied { directive, path, phase } =>
                tracing::trace!(event = name, %directive, %path, ?phase),
            QueryEvent::FieldResolutionCompleted { path, succeeded } =>
                tracing::trace!(event = name, %path, succeeded),
            QueryEvent::FieldResolutionStarted { path } =>
                tracing::trace!(event = name, %path),
            QueryEvent::PlanCacheHit { query_hash }
            | QueryEvent::PlanCacheMiss { query_hash }
            | QueryEvent::RequestReceived { query_hash } =>
                tracing::debug!(event = name, %query_hash),
            QueryEvent::PlanGenerated { query_hash, valid } =>
                tracing::debug!(event = name, %query_hash, valid),
            QueryEvent::RequestCancelled { query_hash } =>
                tracing::info!(event = name, %query_hash),
            QueryEvent::RequestCompleted { elapsed, query_hash } =>
                tracing::info!(event = name, %query_hash, elapsed_ms = elapsed.as_millis() as u64),
            QueryEvent::RequestTimedOut { query_hash, timeout } =>
                tracing::warn!(event = name, %query_hash, timeout_ms = timeout.as_millis() as u64),
            QueryEvent::UnhandledException { error, path } =>
                tracing::error!(event = name, %path, %error),
        }
    }
}
