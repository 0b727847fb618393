use crate::ast;
use crate::schema::InputValueDefinition;
use indexmap::IndexMap;

/// The places within a document (or a schema) where a directive may be
/// applied.
///
/// https://spec.graphql.org/October2021/#DirectiveLocations
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DirectiveLocation {
    ArgumentDefinition,
    Enum,
    EnumValue,
    Field,
    FieldDefinition,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    InputFieldDefinition,
    InputObject,
    Interface,
    Mutation,
    Object,
    Query,
    Scalar,
    Schema,
    Subscription,
    Union,
    VariableDefinition,
}
impl DirectiveLocation {
    /// Whether this location is part of an executable document rather than a
    /// type system document.
    pub fn is_executable(&self) -> bool {
        matches!(
            self,
            Self::Field
                | Self::FragmentDefinition
                | Self::FragmentSpread
                | Self::InlineFragment
                | Self::Mutation
                | Self::Query
                | Self::Subscription
                | Self::VariableDefinition
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ArgumentDefinition => "ARGUMENT_DEFINITION",
            Self::Enum => "ENUM",
            Self::EnumValue => "ENUM_VALUE",
            Self::Field => "FIELD",
            Self::FieldDefinition => "FIELD_DEFINITION",
            Self::FragmentDefinition => "FRAGMENT_DEFINITION",
            Self::FragmentSpread => "FRAGMENT_SPREAD",
            Self::InlineFragment => "INLINE_FRAGMENT",
            Self::InputFieldDefinition => "INPUT_FIELD_DEFINITION",
            Self::InputObject => "INPUT_OBJECT",
            Self::Interface => "INTERFACE",
            Self::Mutation => "MUTATION",
            Self::Object => "OBJECT",
            Self::Query => "QUERY",
            Self::Scalar => "SCALAR",
            Self::Schema => "SCHEMA",
            Self::Subscription => "SUBSCRIPTION",
            Self::Union => "UNION",
            Self::VariableDefinition => "VARIABLE_DEFINITION",
        }
    }
}
impl std::convert::From<&ast::schema::DirectiveLocation> for DirectiveLocation {
    fn from(ast_loc: &ast::schema::DirectiveLocation) -> Self {
        use ast::schema::DirectiveLocation as AstLoc;
        match ast_loc {
            AstLoc::ArgumentDefinition => Self::ArgumentDefinition,
            AstLoc::Enum => Self::Enum,
            AstLoc::EnumValue => Self::EnumValue,
            AstLoc::Field => Self::Field,
            AstLoc::FieldDefinition => Self::FieldDefinition,
            AstLoc::FragmentDefinition => Self::FragmentDefinition,
            AstLoc::FragmentSpread => Self::FragmentSpread,
            AstLoc::InlineFragment => Self::InlineFragment,
            AstLoc::InputFieldDefinition => Self::InputFieldDefinition,
            AstLoc::InputObject => Self::InputObject,
            AstLoc::Interface => Self::Interface,
            AstLoc::Mutation => Self::Mutation,
            AstLoc::Object => Self::Object,
            AstLoc::Query => Self::Query,
            AstLoc::Scalar => Self::Scalar,
            AstLoc::Schema => Self::Schema,
            AstLoc::Subscription => Self::Subscription,
            AstLoc::Union => Self::Union,
            AstLoc::VariableDefinition => Self::VariableDefinition,
        }
    }
}
impl std::fmt::Display for DirectiveLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug)]
pub struct DirectiveDefinition {
    pub(crate) arguments: IndexMap<String, InputValueDefinition>,
    pub(crate) builtin: bool,
    pub(crate) locations: Vec<DirectiveLocation>,
    pub(crate) name: String,
    pub(crate) repeatable: bool,
}
impl DirectiveDefinition {
    pub(crate) fn from_ast(ast_def: &ast::schema::DirectiveDefinition) -> Self {
        Self {
            arguments: ast_def.arguments.iter()
                .map(|arg| (arg.name.to_string(), InputValueDefinition::from_ast(arg)))
                .collect(),
            builtin: false,
            locations: ast_def.locations.iter().map(DirectiveLocation::from).collect(),
            name: ast_def.name.to_string(),
            repeatable: ast_def.repeatable,
        }
    }

    pub fn arguments(&self) -> &IndexMap<String, InputValueDefinition> {
        &self.arguments
    }

    pub fn is_builtin(&self) -> bool {
        self.builtin
    }

    pub fn is_executable(&self) -> bool {
        self.locations.iter().any(DirectiveLocation::is_executable)
    }

    pub fn is_repeatable(&self) -> bool {
        self.repeatable
    }

    pub fn is_valid_at(&self, location: DirectiveLocation) -> bool {
        self.locations.contains(&location)
    }

    pub fn locations(&self) -> &[DirectiveLocation] {
        self.locations.as_slice()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}
