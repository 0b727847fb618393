use crate::InputValue;
use crate::loc::SourceLocation;
use crate::plan::ExecutionDirective;
use crate::schema::FieldDefinition;
use crate::schema::FieldResolutionMode;
use indexmap::IndexMap;
use indexmap::IndexSet;
use std::sync::Arc;

/// One field to resolve, computed once at plan time and shared (read-only) by
/// every request executing the plan.
#[derive(Clone, Debug)]
pub struct FieldInvocationContext {
    pub(crate) arguments: IndexMap<String, InputValue>,
    pub(crate) children: Vec<FieldInvocationContext>,
    pub(crate) directives: Vec<ExecutionDirective>,
    pub(crate) field: Arc<FieldDefinition>,
    pub(crate) location: SourceLocation,
    pub(crate) response_name: String,
    pub(crate) type_restriction: Option<IndexSet<String>>,
}
impl FieldInvocationContext {
    /// Whether this context should be resolved for a source value whose
    /// concrete object type is `object_type`.
    pub fn applies_to(&self, object_type: &str) -> bool {
        self.type_restriction
            .as_ref()
            .is_none_or(|types| types.contains(object_type))
    }

    /// Arguments as written in the document (variables unresolved).
    pub fn arguments(&self) -> &IndexMap<String, InputValue> {
        &self.arguments
    }

    pub fn children(&self) -> &[FieldInvocationContext] {
        self.children.as_slice()
    }

    /// Directives contributed by enclosing fragments come first, followed by
    /// the field's own.
    pub fn directives(&self) -> &[ExecutionDirective] {
        self.directives.as_slice()
    }

    pub fn field(&self) -> &Arc<FieldDefinition> {
        &self.field
    }

    pub fn is_list(&self) -> bool {
        self.field.type_annotation().is_list()
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn mode(&self) -> FieldResolutionMode {
        self.field.mode()
    }

    pub fn response_name(&self) -> &str {
        self.response_name.as_str()
    }

    /// The concrete object types this context is limited to by the type
    /// conditions of enclosing fragments. `None` when unrestricted.
    pub fn type_restriction(&self) -> Option<&IndexSet<String>> {
        self.type_restriction.as_ref()
    }

    /// Two contexts selecting the same field under the same response name for
    /// the same types are resolved once, with their selections combined.
    /// Contexts carrying directives are kept apart since each may be skipped
    /// independently.
    pub(crate) fn can_merge_with(&self, other: &FieldInvocationContext) -> bool {
        self.response_name == other.response_name
            && self.field.name() == other.field.name()
            && self.type_restriction == other.type_restriction
            && self.arguments == other.arguments
            && self.directives.is_empty()
            && other.directives.is_empty()
    }
}
