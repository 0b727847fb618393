//! Field execution: resolving an executable operation's field contexts
//! against request data, along with the request-scoped collaborators
//! (services, session, security, events, metrics) resolvers can reach.

mod argument_resolver;
mod cancellation_monitor;
mod directive_processor;
mod events;
mod execution_context;
mod field_execution_engine;
mod metrics;
mod query_execution_result;
mod security;
mod services;
mod value_completion;

pub use argument_resolver::ArgumentResolutionError;
pub use cancellation_monitor::MonitorState;
pub use cancellation_monitor::QueryCancellationMonitor;
pub use directive_processor::DirectiveError;
pub use directive_processor::DirectiveOutcome;
pub use directive_processor::DirectivePhase;
pub use directive_processor::DirectiveProcessingError;
pub use directive_processor::DirectiveResolutionContext;
pub use directive_processor::DirectiveResolver;
pub use directive_processor::IncludeDirective;
pub use directive_processor::SchemaConfigurationError;
pub use directive_processor::SkipDirective;
pub use events::NullEventListener;
pub use events::QueryEvent;
pub use events::QueryEventListener;
pub use events::TracingEventListener;
pub use execution_context::BatchResolutionContext;
pub use execution_context::FieldResolutionContext;
pub use execution_context::GraphQueryExecutionContext;
pub use execution_context::GraphQueryRequest;
pub use field_execution_engine::FieldExecutionEngine;
pub use metrics::QueryMetrics;
pub use query_execution_result::QueryExecutionResult;
pub use security::AuthorizationResult;
pub use security::FieldAuthorizer;
pub use security::RoleAuthorizer;
pub use security::SecurityContext;
pub use security::UserPrincipal;
pub use services::ServiceProvider;
pub use services::SessionData;

#[cfg(test)]
mod tests;
