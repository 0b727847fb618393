use crate::loc::SourceLocation;
use crate::messages::GraphMessageSeverity;
use crate::messages::ResponsePath;
use std::error::Error;
use std::sync::Arc;

/// A structured diagnostic produced anywhere along the pipeline: while
/// constructing or validating a document, while generating a plan, or while
/// executing fields.
///
/// User-query problems are always reported as `GraphMessage`s rather than as
/// Rust errors so they can be accumulated, cached along with a plan, and
/// surfaced to the client next to whatever data did resolve.
#[derive(Clone, Debug)]
pub struct GraphMessage {
    pub(crate) code: String,
    pub(crate) exception: Option<Arc<dyn Error + Send + Sync>>,
    pub(crate) location: Option<SourceLocation>,
    pub(crate) message: String,
    pub(crate) path: Option<ResponsePath>,
    pub(crate) rule_reference: Option<String>,
    pub(crate) severity: GraphMessageSeverity,
}
impl GraphMessage {
    pub fn new(
        severity: GraphMessageSeverity,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            exception: None,
            location: None,
            message: message.into(),
            path: None,
            rule_reference: None,
            severity,
        }
    }

    pub fn critical(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(GraphMessageSeverity::Critical, code, message)
    }

    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(GraphMessageSeverity::Warning, code, message)
    }

    pub fn with_exception(mut self, exception: Arc<dyn Error + Send + Sync>) -> Self {
        self.exception = Some(exception);
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_path(mut self, path: ResponsePath) -> Self {
        self.path = Some(path);
        self
    }

    /// Attach the number of the GraphQL specification rule that this message
    /// reports a violation of (e.g. `"5.3.1"`).
    pub fn with_rule(mut self, rule_reference: impl Into<String>) -> Self {
        self.rule_reference = Some(rule_reference.into());
        self
    }

    pub fn code(&self) -> &str {
        self.code.as_str()
    }

    pub fn exception(&self) -> Option<&Arc<dyn Error + Send + Sync>> {
        self.exception.as_ref()
    }

    pub fn is_critical(&self) -> bool {
        self.severity.is_critical()
    }

    pub fn location(&self) -> Option<SourceLocation> {
        self.location
    }

    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    pub fn path(&self) -> Option<&ResponsePath> {
        self.path.as_ref()
    }

    pub fn rule_reference(&self) -> Option<&str> {
        self.rule_reference.as_deref()
    }

    pub fn severity(&self) -> GraphMessageSeverity {
        self.severity
    }
}
impl std::fmt::Display for GraphMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}: {}", self.severity, self.code, self.message)?;
        if let Some(rule) = &self.rule_reference {
            write!(f, " (rule {rule})")?;
        }
        if let Some(location) = &self.location {
            write!(f, " at {location}")?;
        }
        if let Some(path) = &self.path {
            write!(f, " [path: {path}]")?;
        }
        Ok(())
    }
}
