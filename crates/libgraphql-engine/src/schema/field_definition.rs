use crate::ast;
use crate::schema::FieldResolverKind;
use crate::schema::TypeAnnotation;
use indexmap::IndexMap;

pub(crate) const TYPENAME_FIELD: &str = "__typename";

/// Where the value of a field comes from. Used to weight a field's cost and to
/// decide which fields an isolation policy applies to.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
pub enum FieldSource {
    /// A controller-style action, typically a root field backed by a service
    /// call.
    Action,

    /// A resolver function attached to an object type.
    Method,

    /// A value read directly off of the parent's source object.
    Property,
}

/// How a field's resolver is invoked for a set of sibling source items.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
pub enum FieldResolutionMode {
    /// One resolver call services every source item at once.
    Batch,

    /// The resolver is invoked once per source item.
    PerSourceItem,
}

/// An argument of a field or directive, or a field of an input object.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDefinition {
    pub(crate) default_value: Option<ast::Value>,
    pub(crate) name: String,
    pub(crate) type_annotation: TypeAnnotation,
}
impl InputValueDefinition {
    pub(crate) fn from_ast(ast_input: &ast::schema::InputValue) -> Self {
        Self {
            default_value: ast_input.default_value.clone(),
            name: ast_input.name.to_string(),
            type_annotation: TypeAnnotation::from_ast_type(&ast_input.value_type),
        }
    }

    pub fn default_value(&self) -> Option<&ast::Value> {
        self.default_value.as_ref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }

    /// A non-null argument with no default must be supplied.
    pub fn is_required(&self) -> bool {
        !self.type_annotation.nullable() && self.default_value.is_none()
    }
}

/// A field defined on an object or interface type, together with everything
/// the engine needs to resolve it.
#[derive(Clone, Debug)]
pub struct FieldDefinition {
    pub(crate) arguments: IndexMap<String, InputValueDefinition>,
    pub(crate) authorization_policies: Vec<String>,
    pub(crate) complexity: Option<f64>,
    pub(crate) isolated: bool,
    pub(crate) mode: FieldResolutionMode,
    pub(crate) name: String,
    pub(crate) owner_type: String,
    pub(crate) resolver: Option<FieldResolverKind>,
    pub(crate) services: Vec<String>,
    pub(crate) source: FieldSource,
    pub(crate) type_annotation: TypeAnnotation,
}
impl FieldDefinition {
    pub(crate) fn from_ast(owner_type: &str, ast_field: &ast::schema::Field) -> Self {
        Self {
            arguments: ast_field.arguments.iter()
                .map(|arg| (arg.name.to_string(), InputValueDefinition::from_ast(arg)))
                .collect(),
            authorization_policies: vec![],
            complexity: None,
            isolated: false,
            mode: FieldResolutionMode::PerSourceItem,
            name: ast_field.name.to_string(),
            owner_type: owner_type.to_string(),
            resolver: None,
            services: vec![],
            source: FieldSource::Property,
            type_annotation: TypeAnnotation::from_ast_type(&ast_field.field_type),
        }
    }

    pub(crate) fn typename() -> Self {
        Self {
            arguments: IndexMap::new(),
            authorization_policies: vec![],
            complexity: None,
            isolated: false,
            mode: FieldResolutionMode::PerSourceItem,
            name: TYPENAME_FIELD.to_string(),
            owner_type: String::new(),
            resolver: None,
            services: vec![],
            source: FieldSource::Property,
            type_annotation: TypeAnnotation::named("String", false),
        }
    }

    pub fn arguments(&self) -> &IndexMap<String, InputValueDefinition> {
        &self.arguments
    }

    pub fn authorization_policies(&self) -> &[String] {
        self.authorization_policies.as_slice()
    }

    /// The declared complexity weight of this field, if one was configured.
    pub fn complexity(&self) -> Option<f64> {
        self.complexity
    }

    /// Whether this field was explicitly marked as requiring isolated
    /// (one-at-a-time) resolution.
    pub fn is_isolated(&self) -> bool {
        self.isolated
    }

    pub fn is_typename(&self) -> bool {
        self.name == TYPENAME_FIELD
    }

    pub fn mode(&self) -> FieldResolutionMode {
        self.mode
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The name of the object or interface type this field is defined on.
    pub fn owner_type(&self) -> &str {
        self.owner_type.as_str()
    }

    pub fn resolver(&self) -> Option<&FieldResolverKind> {
        self.resolver.as_ref()
    }

    /// Names of request-scoped services injected into this field's resolver.
    pub fn services(&self) -> &[String] {
        self.services.as_slice()
    }

    pub fn source(&self) -> FieldSource {
        self.source
    }

    pub fn type_annotation(&self) -> &TypeAnnotation {
        &self.type_annotation
    }
}
