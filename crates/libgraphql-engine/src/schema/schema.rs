use crate::execution::DirectiveResolver;
use crate::operation_type::OperationType;
use crate::schema::DirectiveDefinition;
use crate::schema::FieldDefinition;
use crate::schema::GraphType;
use crate::schema::ObjectType;
use crate::schema::SchemaOptions;
use crate::schema::TypeResolver;
use crate::schema::TYPENAME_FIELD;
use indexmap::IndexMap;
use indexmap::IndexSet;
use serde_json::Value;
use std::sync::Arc;

/// A fully built, immutable GraphQL schema along with the resolvers and
/// execution settings bound to it. Built by
/// [`SchemaBuilder`](crate::schema::SchemaBuilder) and shared as an
/// `Arc<Schema>`.
pub struct Schema {
    pub(crate) directive_resolvers: IndexMap<String, Arc<dyn DirectiveResolver>>,
    pub(crate) directives: IndexMap<String, DirectiveDefinition>,
    pub(crate) mutation_type: Option<String>,
    pub(crate) name: String,
    pub(crate) options: SchemaOptions,
    pub(crate) query_type: String,
    pub(crate) subscription_type: Option<String>,
    pub(crate) type_resolvers: IndexMap<String, Arc<dyn TypeResolver>>,
    pub(crate) typename_field: Arc<FieldDefinition>,
    pub(crate) types: IndexMap<String, GraphType>,
}
impl Schema {
    pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives.get(name)
    }

    pub fn directive_resolver(&self, name: &str) -> Option<&Arc<dyn DirectiveResolver>> {
        self.directive_resolvers.get(name)
    }

    pub fn directives(&self) -> &IndexMap<String, DirectiveDefinition> {
        &self.directives
    }

    /// Look up a field selectable on the given composite type. `__typename`
    /// is selectable on every composite type.
    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&Arc<FieldDefinition>> {
        let graph_type = self.types.get(type_name)?;
        if field_name == TYPENAME_FIELD && graph_type.is_composite() {
            return Some(&self.typename_field);
        }
        graph_type.field(field_name)
    }

    /// The identity of this schema, used to keep cached plans of different
    /// schemas apart.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    pub fn options(&self) -> &SchemaOptions {
        &self.options
    }

    /// The object types a value of the named type may be at runtime: the
    /// type itself for object types, the implementing object types for
    /// interfaces and the member types for unions.
    pub fn possible_types(&self, type_name: &str) -> IndexSet<String> {
        match self.types.get(type_name) {
            Some(GraphType::Object(obj)) => IndexSet::from([obj.name.to_string()]),
            Some(GraphType::Interface(iface)) => self.types.values()
                .filter_map(GraphType::as_object)
                .filter(|obj| obj.interfaces.iter().any(|name| *name == iface.name))
                .map(|obj| obj.name.to_string())
                .collect(),
            Some(GraphType::Union(union_type)) => union_type.members.iter().cloned().collect(),
            _ => IndexSet::new(),
        }
    }

    /// Whether a fragment with the given type condition applies to values of
    /// the given concrete object type.
    pub fn fragment_applies_to(&self, type_condition: &str, object_type: &str) -> bool {
        type_condition == object_type
            || self.possible_types(type_condition).contains(object_type)
    }

    /// Whether the two (possibly abstract) types share at least one possible
    /// concrete type.
    pub fn types_overlap(&self, type_a: &str, type_b: &str) -> bool {
        if type_a == type_b {
            return true;
        }
        let possible_b = self.possible_types(type_b);
        self.possible_types(type_a)
            .iter()
            .any(|name| possible_b.contains(name))
    }

    /// Determine the concrete object type of a value resolved for a field of
    /// the given type. Abstract types consult a registered [`TypeResolver`]
    /// and otherwise fall back to the value's `__typename` key. Returns `None`
    /// when no valid concrete type can be determined.
    pub fn resolve_concrete_type(&self, type_name: &str, value: &Value) -> Option<String> {
        match self.types.get(type_name)? {
            GraphType::Object(obj) => Some(obj.name.to_string()),
            GraphType::Interface(_) | GraphType::Union(_) => {
                let concrete_name = match self.type_resolvers.get(type_name) {
                    Some(type_resolver) => type_resolver.resolve_type(value)?,
                    None => value.get(TYPENAME_FIELD)?.as_str()?.to_string(),
                };
                if self.possible_types(type_name).contains(&concrete_name) {
                    Some(concrete_name)
                } else {
                    None
                }
            },
            _ => None,
        }
    }

    /// The root object type for the given kind of operation, if the schema
    /// defines one.
    pub fn root_type(&self, operation_type: OperationType) -> Option<&ObjectType> {
        let type_name = match operation_type {
            OperationType::Mutation => self.mutation_type.as_deref()?,
            OperationType::Query => self.query_type.as_str(),
            OperationType::Subscription => self.subscription_type.as_deref()?,
        };
        self.types.get(type_name).and_then(GraphType::as_object)
    }

    pub fn lookup_type(&self, name: &str) -> Option<&GraphType> {
        self.types.get(name)
    }

    pub fn types(&self) -> &IndexMap<String, GraphType> {
        &self.types
    }
}
impl std::fmt::Debug for Schema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schema")
            .field("directives", &self.directives.keys().collect::<Vec<_>>())
            .field("mutation_type", &self.mutation_type)
            .field("name", &self.name)
            .field("options", &self.options)
            .field("query_type", &self.query_type)
            .field("subscription_type", &self.subscription_type)
            .field("types", &self.types.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}
