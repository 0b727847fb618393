use crate::OperationType;
use crate::ast;
use crate::loc::SourceLocation;
use crate::schema::DirectiveLocation;
use crate::schema::FieldDefinition;
use crate::schema::TypeAnnotation;
use std::sync::Arc;

/// The stable index of a [`DocumentPart`] within its
/// [`QueryDocument`](crate::document::QueryDocument).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct PartId(pub(crate) usize);
impl PartId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One node of a constructed query document. The kind-specific data lives in
/// [`DocumentPartKind`]; tree structure and validity are tracked here.
#[derive(Clone, Debug)]
pub struct DocumentPart {
    pub(crate) children: Vec<PartId>,
    pub(crate) invalid: bool,
    pub(crate) kind: DocumentPartKind,
    pub(crate) location: SourceLocation,
    pub(crate) parent: Option<PartId>,
}
impl DocumentPart {
    pub fn children(&self) -> &[PartId] {
        self.children.as_slice()
    }

    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub fn kind(&self) -> &DocumentPartKind {
        &self.kind
    }

    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn parent(&self) -> Option<PartId> {
        self.parent
    }
}

#[derive(Clone, Debug)]
pub enum DocumentPartKind {
    Directive(DirectivePart),
    Field(FieldPart),
    FragmentSpread(FragmentSpreadPart),
    InlineFragment(InlineFragmentPart),
    NamedFragment(NamedFragmentPart),
    Operation(OperationPart),
    SelectionSet(SelectionSetPart),
    VariableDefinition(VariableDefinitionPart),
}
impl DocumentPartKind {
    pub fn as_field(&self) -> Option<&FieldPart> {
        if let Self::Field(field) = self { Some(field) } else { None }
    }

    pub fn as_fragment_spread(&self) -> Option<&FragmentSpreadPart> {
        if let Self::FragmentSpread(spread) = self { Some(spread) } else { None }
    }

    pub fn as_named_fragment(&self) -> Option<&NamedFragmentPart> {
        if let Self::NamedFragment(fragment) = self { Some(fragment) } else { None }
    }

    pub fn as_operation(&self) -> Option<&OperationPart> {
        if let Self::Operation(op) = self { Some(op) } else { None }
    }

    pub fn as_selection_set(&self) -> Option<&SelectionSetPart> {
        if let Self::SelectionSet(sel_set) = self { Some(sel_set) } else { None }
    }

    pub fn as_variable_definition(&self) -> Option<&VariableDefinitionPart> {
        if let Self::VariableDefinition(var_def) = self { Some(var_def) } else { None }
    }

    /// The location value a directive attached to a part of this kind is
    /// applied at.
    pub fn directive_location(&self) -> Option<DirectiveLocation> {
        match self {
            Self::Field(_) => Some(DirectiveLocation::Field),
            Self::FragmentSpread(_) => Some(DirectiveLocation::FragmentSpread),
            Self::InlineFragment(_) => Some(DirectiveLocation::InlineFragment),
            Self::NamedFragment(_) => Some(DirectiveLocation::FragmentDefinition),
            Self::Operation(op) => Some(match op.operation_type {
                OperationType::Mutation => DirectiveLocation::Mutation,
                OperationType::Query => DirectiveLocation::Query,
                OperationType::Subscription => DirectiveLocation::Subscription,
            }),
            Self::VariableDefinition(_) => Some(DirectiveLocation::VariableDefinition),
            Self::Directive(_) | Self::SelectionSet(_) => None,
        }
    }
}

/// An argument supplied to a field or directive. Duplicates are preserved
/// so they can be reported.
#[derive(Clone, Debug)]
pub struct ArgumentPart {
    pub(crate) location: SourceLocation,
    pub(crate) name: String,
    pub(crate) value: ast::Value,
}
impl ArgumentPart {
    pub fn location(&self) -> SourceLocation {
        self.location
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn value(&self) -> &ast::Value {
        &self.value
    }
}

#[derive(Clone, Debug)]
pub struct DirectivePart {
    pub(crate) arguments: Vec<ArgumentPart>,
    pub(crate) directive_location: Option<DirectiveLocation>,
    pub(crate) name: String,
}
impl DirectivePart {
    pub fn argument(&self, name: &str) -> Option<&ArgumentPart> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    pub fn arguments(&self) -> &[ArgumentPart] {
        self.arguments.as_slice()
    }

    pub fn directive_location(&self) -> Option<DirectiveLocation> {
        self.directive_location
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Clone, Debug)]
pub struct FieldPart {
    pub(crate) alias: Option<String>,
    pub(crate) arguments: Vec<ArgumentPart>,
    pub(crate) depth: usize,
    pub(crate) directives: Vec<PartId>,
    pub(crate) field: Option<Arc<FieldDefinition>>,
    pub(crate) name: String,
    pub(crate) owner_type: Option<String>,
    pub(crate) selection_set: Option<PartId>,
}
impl FieldPart {
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentPart> {
        self.arguments.iter().find(|arg| arg.name == name)
    }

    pub fn arguments(&self) -> &[ArgumentPart] {
        self.arguments.as_slice()
    }

    /// How many fields deep this field is nested, counting itself, within
    /// its operation or fragment.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn directives(&self) -> &[PartId] {
        self.directives.as_slice()
    }

    /// The schema field this selection refers to, when one exists on the
    /// enclosing type.
    pub fn field(&self) -> Option<&Arc<FieldDefinition>> {
        self.field.as_ref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The type this field was selected against.
    pub fn owner_type(&self) -> Option<&str> {
        self.owner_type.as_deref()
    }

    /// The key this field's value is written under in the response.
    pub fn response_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.name.as_str())
    }

    pub fn selection_set(&self) -> Option<PartId> {
        self.selection_set
    }
}

#[derive(Clone, Debug)]
pub struct FragmentSpreadPart {
    pub(crate) directives: Vec<PartId>,
    pub(crate) fragment: Option<PartId>,
    pub(crate) name: String,
}
impl FragmentSpreadPart {
    pub fn directives(&self) -> &[PartId] {
        self.directives.as_slice()
    }

    /// The named fragment this spread refers to. Assigned while linking.
    pub fn fragment(&self) -> Option<PartId> {
        self.fragment
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

#[derive(Clone, Debug)]
pub struct InlineFragmentPart {
    pub(crate) directives: Vec<PartId>,
    pub(crate) selection_set: Option<PartId>,
    pub(crate) type_condition: Option<String>,
}
impl InlineFragmentPart {
    pub fn directives(&self) -> &[PartId] {
        self.directives.as_slice()
    }

    pub fn selection_set(&self) -> Option<PartId> {
        self.selection_set
    }

    pub fn type_condition(&self) -> Option<&str> {
        self.type_condition.as_deref()
    }
}

#[derive(Clone, Debug)]
pub struct NamedFragmentPart {
    pub(crate) directives: Vec<PartId>,
    pub(crate) name: String,
    pub(crate) referenced: bool,
    pub(crate) selection_set: Option<PartId>,
    pub(crate) type_condition: String,
}
impl NamedFragmentPart {
    pub fn directives(&self) -> &[PartId] {
        self.directives.as_slice()
    }

    pub fn is_referenced(&self) -> bool {
        self.referenced
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn selection_set(&self) -> Option<PartId> {
        self.selection_set
    }

    pub fn type_condition(&self) -> &str {
        self.type_condition.as_str()
    }
}

#[derive(Clone, Debug)]
pub struct OperationPart {
    pub(crate) directives: Vec<PartId>,
    pub(crate) name: Option<String>,
    pub(crate) operation_type: OperationType,
    pub(crate) root_type: Option<String>,
    pub(crate) selection_set: Option<PartId>,
    pub(crate) variables: Vec<PartId>,
}
impl OperationPart {
    pub fn directives(&self) -> &[PartId] {
        self.directives.as_slice()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    /// The schema's root type for this kind of operation, if it defines one.
    pub fn root_type(&self) -> Option<&str> {
        self.root_type.as_deref()
    }

    pub fn selection_set(&self) -> Option<PartId> {
        self.selection_set
    }

    pub fn variables(&self) -> &[PartId] {
        self.variables.as_slice()
    }
}

/// A `{ ... }` block. `scope_type` is the type its selections are evaluated
/// against; it is unknown when an enclosing selection could not be bound to
/// the schema.
#[derive(Clone, Debug)]
pub struct SelectionSetPart {
    pub(crate) scope_type: Option<String>,
}
impl SelectionSetPart {
    pub fn scope_type(&self) -> Option<&str> {
        self.scope_type.as_deref()
    }
}

#[derive(Clone, Debug)]
pub struct VariableDefinitionPart {
    pub(crate) default_value: Option<ast::Value>,
    pub(crate) name: String,
    pub(crate) type_annotation: TypeAnnotation,
}
impl VariableDefinitionPart {
    pub fn default_value(&self) -> Option<&ast::Value> {
        self.default_value.as_ref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}
