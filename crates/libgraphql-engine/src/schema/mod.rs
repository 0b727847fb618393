mod directive_definition;
mod field_definition;
mod graph_type;
mod resolvers;
#[allow(clippy::module_inception)]
mod schema;
mod schema_builder;
mod schema_options;
mod type_annotation;

pub use directive_definition::DirectiveDefinition;
pub use directive_definition::DirectiveLocation;
pub use field_definition::FieldDefinition;
pub use field_definition::FieldResolutionMode;
pub use field_definition::FieldSource;
pub use field_definition::InputValueDefinition;
pub(crate) use field_definition::TYPENAME_FIELD;
pub use graph_type::EnumType;
pub use graph_type::GraphType;
pub use graph_type::GraphTypeKind;
pub use graph_type::InputObjectType;
pub use graph_type::InterfaceType;
pub use graph_type::ObjectType;
pub use graph_type::ScalarType;
pub use graph_type::UnionType;
pub use resolvers::BatchFieldResolver;
pub use resolvers::BatchResults;
pub use resolvers::FieldResolver;
pub use resolvers::FieldResolverKind;
pub use resolvers::ResolverError;
pub use resolvers::TypeResolver;
pub use resolvers::batch_resolver_fn;
pub use resolvers::resolver_fn;
pub use schema::Schema;
pub use schema_builder::SchemaBuildError;
pub use schema_builder::SchemaBuilder;
pub use schema_options::ResolverIsolation;
pub use schema_options::SchemaOptions;
pub use type_annotation::ListTypeAnnotation;
pub use type_annotation::NamedTypeAnnotation;
pub use type_annotation::TypeAnnotation;

#[cfg(test)]
mod tests;
