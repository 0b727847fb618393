use crate::execution::QueryEvent;
use crate::execution::QueryEventListener;
use crate::execution::SessionData;
use crate::execution::UserPrincipal;
use crate::execution::argument_resolver::resolve_directive_arguments;
use crate::loc::SourceLocation;
use crate::messages::GraphMessage;
use crate::messages::ResponsePath;
use crate::messages::codes;
use crate::plan::ExecutionDirective;
use crate::schema::FieldDefinition;
use crate::schema::Schema;
use serde_json::Map;
use serde_json::Value;
use std::error::Error;
use std::sync::Arc;
use thiserror::Error;

/// What a directive resolver decided about the field it is attached to.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DirectiveOutcome {
    /// Carry on resolving (or completing) the field.
    Continue,

    /// Leave the field out of the response entirely.
    Skip,

    /// Stop resolving the field's subtree and record the reason as a
    /// REQUEST_ABORTED message. The field is nulled.
    Abort(String),
}

/// Everything a [`DirectiveResolver`] sees about the field it is applied to.
#[derive(Clone, Debug)]
pub struct DirectiveResolutionContext {
    pub(crate) arguments: Map<String, Value>,
    pub(crate) field: Arc<FieldDefinition>,
    pub(crate) location: SourceLocation,
    pub(crate) name: String,
    pub(crate) path: ResponsePath,
    pub(crate) session: SessionData,
    pub(crate) source: Value,
    pub(crate) user: Option<UserPrincipal>,
}
impl DirectiveResolutionContext {
    pub fn argument(&self, name: &str) -> Option<&Value> {
        self.arguments.get(name)
    }

    /// The directive's arguments with variables substituted and definition
    /// defaults applied.
    pub fn arguments(&self) -> &Map<String, Value> {
        &self.arguments
    }

    pub fn directive_name(&self) -> &str {
        self.name.as_str()
    }

    pub fn field(&self) -> &FieldDefinition {
        &self.field
    }

    /// Where the directive was written in the query document.
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn path(&self) -> &ResponsePath {
        &self.path
    }

    pub fn session(&self) -> &SessionData {
        &self.session
    }

    pub fn source(&self) -> &Value {
        &self.source
    }

    pub fn user(&self) -> Option<&UserPrincipal> {
        self.user.as_ref()
    }
}

/// Execution-phase behaviour bound to an executable directive.
#[async_trait::async_trait]
pub trait DirectiveResolver: Send + Sync {
    /// Runs before the field's resolver.
    async fn before_field_resolution(
        &self,
        _context: &DirectiveResolutionContext,
    ) -> Result<DirectiveOutcome, DirectiveError> {
        Ok(DirectiveOutcome::Continue)
    }

    /// Runs once the field's resolver produced `value`, before the value is
    /// completed against the field's type. `value` may be rewritten in place.
    async fn after_field_resolution(
        &self,
        _context: &DirectiveResolutionContext,
        _value: &mut Value,
    ) -> Result<DirectiveOutcome, DirectiveError> {
        Ok(DirectiveOutcome::Continue)
    }
}

#[derive(Debug, Error)]
pub enum DirectiveError {
    #[error("{0}")]
    Message(String),

    #[error(transparent)]
    Other(Box<dyn Error + Send + Sync>),

    /// Validation messages the directive recorded before giving up.
    #[error(transparent)]
    Validation(#[from] DirectiveProcessingError),
}
impl DirectiveError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// A chain of messages recorded while processing a directive. The first
/// message is outermost and each later message is nested as the source of
/// the one before it.
#[derive(Debug)]
pub struct DirectiveProcessingError {
    inner: Option<Box<DirectiveProcessingError>>,
    message: String,
}
impl DirectiveProcessingError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            inner: None,
            message: message.into(),
        }
    }

    /// Build a chain from messages in the order they were recorded. Returns
    /// `None` when there are no messages.
    pub fn from_messages<S: Into<String>>(messages: impl IntoIterator<Item = S>) -> Option<Self> {
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        messages.into_iter().rev().fold(None, |inner, message| {
            Some(Self {
                inner: inner.map(Box::new),
                message,
            })
        })
    }

    pub fn inner(&self) -> Option<&DirectiveProcessingError> {
        self.inner.as_deref()
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Every message in the chain, outermost first.
    pub fn messages(&self) -> Vec<&str> {
        let mut messages = vec![self.message.as_str()];
        let mut current = self.inner.as_deref();
        while let Some(link) = current {
            messages.push(link.message.as_str());
            current = link.inner.as_deref();
        }
        messages
    }
}
impl std::fmt::Display for DirectiveProcessingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message.as_str())
    }
}
impl Error for DirectiveProcessingError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.inner.as_deref().map(|inner| inner as &(dyn Error + 'static))
    }
}

/// Wraps a failure raised by a directive resolver. The resolver's error is
/// preserved as the source.
#[derive(Debug, Error)]
#[error("directive `@{directive}` failed while resolving `{path}`")]
pub struct SchemaConfigurationError {
    directive: String,
    path: ResponsePath,
    #[source]
    source: DirectiveError,
}
impl SchemaConfigurationError {
    pub fn directive(&self) -> &str {
        self.directive.as_str()
    }

    pub fn path(&self) -> &ResponsePath {
        &self.path
    }
}

/// The built-in `@skip(if:)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SkipDirective;

#[async_trait::async_trait]
impl DirectiveResolver for SkipDirective {
    async fn before_field_resolution(
        &self,
        context: &DirectiveResolutionContext,
    ) -> Result<DirectiveOutcome, DirectiveError> {
        Ok(match condition(context)? {
            true => DirectiveOutcome::Skip,
            false => DirectiveOutcome::Continue,
        })
    }
}

/// The built-in `@include(if:)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IncludeDirective;

#[async_trait::async_trait]
impl DirectiveResolver for IncludeDirective {
    async fn before_field_resolution(
        &self,
        context: &DirectiveResolutionContext,
    ) -> Result<DirectiveOutcome, DirectiveError> {
        Ok(match condition(context)? {
            true => DirectiveOutcome::Continue,
            false => DirectiveOutcome::Skip,
        })
    }
}

fn condition(context: &DirectiveResolutionContext) -> Result<bool, DirectiveError> {
    context.argument("if")
        .and_then(Value::as_bool)
        .ok_or_else(|| DirectiveError::msg(format!(
            "@{} requires a Boolean `if` argument",
            context.directive_name(),
        )))
}

static INCLUDE_DIRECTIVE: IncludeDirective = IncludeDirective;
static SKIP_DIRECTIVE: SkipDirective = SkipDirective;

/// The result of running a field's directives for one phase.
#[derive(Debug)]
pub(crate) enum DirectiveVerdict {
    Continue,
    Halt(GraphMessage),
    Skip,
}

/// When a directive runs relative to its field's resolver.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum DirectivePhase {
    After,
    Before,
}

/// The field position a set of directives is being applied at.
pub(crate) struct DirectiveTarget<'a> {
    pub(crate) field: &'a Arc<FieldDefinition>,
    pub(crate) path: &'a ResponsePath,
    pub(crate) session: &'a SessionData,
    pub(crate) source: &'a Value,
    pub(crate) user: Option<&'a UserPrincipal>,
}

/// Runs the directives attached to a field context in order. The first
/// directive to skip, abort or fail decides the verdict and later
/// directives are not run.
pub(crate) struct DirectiveProcessor<'a> {
    pub(crate) listener: &'a dyn QueryEventListener,
    pub(crate) schema: &'a Schema,
    pub(crate) variables: &'a Map<String, Value>,
}
impl<'a> DirectiveProcessor<'a> {
    fn resolver(&self, name: &str) -> Option<&'a dyn DirectiveResolver> {
        if let Some(resolver) = self.schema.directive_resolver(name) {
            return Some(resolver.as_ref());
        }
        match name {
            "include" => Some(&INCLUDE_DIRECTIVE),
            "skip" => Some(&SKIP_DIRECTIVE),
            _ => None,
        }
    }

    pub(crate) async fn before_resolution(
        &self,
        directives: &[ExecutionDirective],
        target: &DirectiveTarget<'_>,
    ) -> DirectiveVerdict {
        let mut unused = Value::Null;
        self.run(DirectivePhase::Before, directives, target, &mut unused).await
    }

    pub(crate) async fn after_resolution(
        &self,
        directives: &[ExecutionDirective],
        target: &DirectiveTarget<'_>,
        value: &mut Value,
    ) -> DirectiveVerdict {
        self.run(DirectivePhase::After, directives, target, value).await
    }

    async fn run(
        &self,
        phase: DirectivePhase,
        directives: &[ExecutionDirective],
        target: &DirectiveTarget<'_>,
        value: &mut Value,
    ) -> DirectiveVerdict {
        for directive in directives {
            let Some(resolver) = self.resolver(directive.name()) else {
                continue;
            };

            let arguments = match resolve_directive_arguments(directive, self.variables, self.schema) {
                Ok(arguments) => arguments,
                Err(err) => return DirectiveVerdict::Halt(
                    GraphMessage::critical(codes::INVALID_ARGUMENT, err.to_string())
                        .with_location(directive.location())
                        .with_path(target.path.clone())
                        .with_exception(Arc::new(err)),
                ),
            };
            let context = DirectiveResolutionContext {
                arguments,
                field: Arc::clone(target.field),
                location: directive.location(),
                name: directive.name().to_string(),
                path: target.path.clone(),
                session: target.session.clone(),
                source: target.source.clone(),
                user: target.user.cloned(),
            };

            let outcome = match phase {
                DirectivePhase::Before => resolver.before_field_resolution(&context).await,
                DirectivePhase::After => resolver.after_field_resolution(&context, value).await,
            };
            self.listener.record(&QueryEvent::DirectiveApplied {
                directive: directive.name().to_string(),
                path: target.path.clone(),
                phase,
            });

            match outcome {
                Ok(DirectiveOutcome::Continue) => (),
                Ok(DirectiveOutcome::Skip) => return DirectiveVerdict::Skip,
                Ok(DirectiveOutcome::Abort(reason)) => return DirectiveVerdict::Halt(
                    GraphMessage::critical(codes::REQUEST_ABORTED, reason)
                        .with_location(directive.location())
                        .with_path(target.path.clone()),
                ),
                Err(source) => {
                    let err = SchemaConfigurationError {
                        directive: directive.name().to_string(),
                        path: target.path.clone(),
                        source,
                    };
                    tracing::debug!(directive = directive.name(), path = %target.path, "directive failed: {err}");
                    return DirectiveVerdict::Halt(
                        GraphMessage::critical(codes::EXECUTION_ERROR, err.to_string())
                            .with_location(directive.location())
                            .with_path(target.path.clone())
                            .with_exception(Arc::new(err)),
                    );
                },
            }
        }
        DirectiveVerdict::Continue
    }
}
