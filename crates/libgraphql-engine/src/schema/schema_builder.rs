use crate::ast;
use crate::execution::DirectiveResolver;
use crate::file_reader;
use crate::schema::BatchFieldResolver;
use crate::schema::DirectiveDefinition;
use crate::schema::EnumType;
use crate::schema::FieldDefinition;
use crate::schema::FieldResolutionMode;
use crate::schema::FieldResolver;
use crate::schema::FieldResolverKind;
use crate::schema::FieldSource;
use crate::schema::GraphType;
use crate::schema::InputObjectType;
use crate::schema::InputValueDefinition;
use crate::schema::InterfaceType;
use crate::schema::ObjectType;
use crate::schema::ScalarType;
use crate::schema::Schema;
use crate::schema::SchemaOptions;
use crate::schema::TypeAnnotation;
use crate::schema::TypeResolver;
use crate::schema::UnionType;
use indexmap::IndexMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const BUILTIN_SCALARS: [&str; 5] = ["Boolean", "Float", "ID", "Int", "String"];

const BUILTIN_DIRECTIVES_SDL: &str = r#"
directive @skip(if: Boolean!) on FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT
directive @include(if: Boolean!) on FIELD | FRAGMENT_SPREAD | INLINE_FRAGMENT
directive @deprecated(
  reason: String = "No longer supported"
) on FIELD_DEFINITION | ARGUMENT_DEFINITION | INPUT_FIELD_DEFINITION | ENUM_VALUE
"#;

#[derive(Default)]
struct FieldConfig {
    complexity: Option<f64>,
    isolated: bool,
    policies: Vec<String>,
    resolver: Option<FieldResolverKind>,
    services: Vec<String>,
    source: Option<FieldSource>,
}

/// Utility for building a [`Schema`] from SDL and binding resolvers and
/// execution metadata to its fields.
pub struct SchemaBuilder {
    directive_resolvers: IndexMap<String, Arc<dyn DirectiveResolver>>,
    directives: IndexMap<String, DirectiveDefinition>,
    field_configs: IndexMap<(String, String), FieldConfig>,
    mutation_type: Option<String>,
    name: String,
    options: SchemaOptions,
    pending_extensions: Vec<ast::schema::TypeExtension>,
    query_type: Option<String>,
    subscription_type: Option<String>,
    type_resolvers: IndexMap<String, Arc<dyn TypeResolver>>,
    types: IndexMap<String, GraphType>,
}
impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            directive_resolvers: IndexMap::new(),
            directives: IndexMap::new(),
            field_configs: IndexMap::new(),
            mutation_type: None,
            name: name.into(),
            options: SchemaOptions::default(),
            pending_extensions: vec![],
            query_type: None,
            subscription_type: None,
            type_resolvers: IndexMap::new(),
            types: IndexMap::new(),
        }
    }

    pub fn from_file(name: impl Into<String>, file_path: impl AsRef<Path>) -> Result<Self> {
        Self::new(name).load_file(file_path)
    }

    pub fn from_str(name: impl Into<String>, sdl: &str) -> Result<Self> {
        Self::new(name).load_str(sdl)
    }

    pub fn load_file(self, file_path: impl AsRef<Path>) -> Result<Self> {
        let content = file_reader::read_content(file_path)?;
        self.load_str(content.as_str())
    }

    pub fn load_str(mut self, sdl: &str) -> Result<Self> {
        let ast_doc = ast::schema::parse(sdl)
            .map_err(|err| SchemaBuildError::ParseError(err.to_string()))?;

        for def in ast_doc.definitions {
            match def {
                ast::schema::Definition::DirectiveDefinition(directive_def) =>
                    self.visit_directive_def(&directive_def)?,

                ast::schema::Definition::SchemaDefinition(schema_def) =>
                    self.visit_schema_def(schema_def)?,

                ast::schema::Definition::TypeDefinition(type_def) =>
                    self.visit_type_def(type_def)?,

                ast::schema::Definition::TypeExtension(ext) =>
                    self.pending_extensions.push(ext),
            }
        }

        Ok(self)
    }

    pub fn with_options(mut self, options: SchemaOptions) -> Self {
        self.options = options;
        self
    }

    /// Attach a resolver invoked once per source item.
    pub fn field_resolver(
        mut self,
        type_name: &str,
        field_name: &str,
        resolver: Arc<dyn FieldResolver>,
    ) -> Self {
        self.field_config(type_name, field_name).resolver =
            Some(FieldResolverKind::PerSourceItem(resolver));
        self
    }

    /// Attach a resolver invoked once for all sibling source items.
    pub fn batch_field_resolver(
        mut self,
        type_name: &str,
        field_name: &str,
        resolver: Arc<dyn BatchFieldResolver>,
    ) -> Self {
        self.field_config(type_name, field_name).resolver =
            Some(FieldResolverKind::Batch(resolver));
        self
    }

    pub fn field_complexity(mut self, type_name: &str, field_name: &str, complexity: f64) -> Self {
        self.field_config(type_name, field_name).complexity = Some(complexity);
        self
    }

    pub fn field_source(mut self, type_name: &str, field_name: &str, source: FieldSource) -> Self {
        self.field_config(type_name, field_name).source = Some(source);
        self
    }

    /// Require this field's resolver to run exclusively of its siblings.
    pub fn isolate_field(mut self, type_name: &str, field_name: &str) -> Self {
        self.field_config(type_name, field_name).isolated = true;
        self
    }

    pub fn authorize_field(
        mut self,
        type_name: &str,
        field_name: &str,
        policy: impl Into<String>,
    ) -> Self {
        self.field_config(type_name, field_name).policies.push(policy.into());
        self
    }

    /// Make the named request-scoped service available to this field's
    /// resolver.
    pub fn inject_service(
        mut self,
        type_name: &str,
        field_name: &str,
        service_name: impl Into<String>,
    ) -> Self {
        self.field_config(type_name, field_name).services.push(service_name.into());
        self
    }

    pub fn directive_resolver(
        mut self,
        directive_name: impl Into<String>,
        resolver: Arc<dyn DirectiveResolver>,
    ) -> Self {
        self.directive_resolvers.insert(directive_name.into(), resolver);
        self
    }

    pub fn type_resolver(
        mut self,
        type_name: impl Into<String>,
        resolver: Arc<dyn TypeResolver>,
    ) -> Self {
        self.type_resolvers.insert(type_name.into(), resolver);
        self
    }

    pub fn build(mut self) -> Result<Schema> {
        for ext in std::mem::take(&mut self.pending_extensions) {
            self.apply_type_extension(ext)?;
        }
        self.inject_missing_builtins()?;

        let query_type = self.resolve_root_type(self.query_type.clone(), "Query")?
            .ok_or(SchemaBuildError::NoQueryOperationTypeDefined)?;
        let mutation_type = self.resolve_root_type(self.mutation_type.clone(), "Mutation")?;
        let subscription_type =
            self.resolve_root_type(self.subscription_type.clone(), "Subscription")?;

        self.check_type_references()?;
        self.apply_field_configs()?;

        for directive_name in self.directive_resolvers.keys() {
            match self.directives.get(directive_name) {
                Some(def) if def.is_executable() => (),
                _ => return Err(SchemaBuildError::UndefinedDirectiveResolverTarget {
                    directive_name: directive_name.to_string(),
                }),
            }
        }

        for type_name in self.type_resolvers.keys() {
            match self.types.get(type_name) {
                Some(graph_type) if graph_type.is_abstract() => (),
                _ => return Err(SchemaBuildError::InvalidTypeResolverTarget {
                    type_name: type_name.to_string(),
                }),
            }
        }

        Ok(Schema {
            directive_resolvers: self.directive_resolvers,
            directives: self.directives,
            mutation_type,
            name: self.name,
            options: self.options,
            query_type,
            subscription_type,
            type_resolvers: self.type_resolvers,
            typename_field: Arc::new(FieldDefinition::typename()),
            types: self.types,
        })
    }

    fn field_config(&mut self, type_name: &str, field_name: &str) -> &mut FieldConfig {
        self.field_configs
            .entry((type_name.to_string(), field_name.to_string()))
            .or_default()
    }

    fn apply_field_configs(&mut self) -> Result<()> {
        for ((type_name, field_name), config) in std::mem::take(&mut self.field_configs) {
            let fields = match self.types.get_mut(&type_name) {
                Some(GraphType::Interface(iface)) => &mut iface.fields,
                Some(GraphType::Object(obj)) => &mut obj.fields,
                _ => return Err(SchemaBuildError::UnknownFieldConfigured {
                    type_name,
                    field_name,
                }),
            };
            let Some(field) = fields.get_mut(&field_name) else {
                return Err(SchemaBuildError::UnknownFieldConfigured {
                    type_name,
                    field_name,
                });
            };

            let field = Arc::make_mut(field);
            field.authorization_policies.extend(config.policies);
            field.complexity = config.complexity.or(field.complexity);
            field.isolated |= config.isolated;
            field.services.extend(config.services);
            if let Some(source) = config.source {
                field.source = source;
            }
            if let Some(resolver) = config.resolver {
                field.mode = match &resolver {
                    FieldResolverKind::Batch(_) => FieldResolutionMode::Batch,
                    FieldResolverKind::PerSourceItem(_) => FieldResolutionMode::PerSourceItem,
                };
                // A field with a dedicated resolver is at least a method.
                if config.source.is_none() {
                    field.source = FieldSource::Method;
                }
                field.resolver = Some(resolver);
            }
        }
        Ok(())
    }

    fn apply_type_extension(&mut self, ext: ast::schema::TypeExtension) -> Result<()> {
        use ast::schema::TypeExtension;

        let type_name = match &ext {
            TypeExtension::Enum(ext) => ext.name.to_string(),
            TypeExtension::InputObject(ext) => ext.name.to_string(),
            TypeExtension::Interface(ext) => ext.name.to_string(),
            TypeExtension::Object(ext) => ext.name.to_string(),
            TypeExtension::Scalar(ext) => ext.name.to_string(),
            TypeExtension::Union(ext) => ext.name.to_string(),
        };

        match (self.types.get_mut(&type_name), ext) {
            (Some(GraphType::Enum(enum_type)), TypeExtension::Enum(ext)) => {
                enum_type.values.extend(ext.values.iter().map(|v| v.name.to_string()));
            },

            (Some(GraphType::InputObject(inputobj)), TypeExtension::InputObject(ext)) => {
                for field in &ext.fields {
                    inputobj.fields.insert(
                        field.name.to_string(),
                        InputValueDefinition::from_ast(field),
                    );
                }
            },

            (Some(GraphType::Interface(iface)), TypeExtension::Interface(ext)) => {
                merge_fields(&type_name, &mut iface.fields, &ext.fields)?;
                iface.interfaces.extend(ext.implements_interfaces.iter().cloned());
            },

            (Some(GraphType::Object(obj)), TypeExtension::Object(ext)) => {
                merge_fields(&type_name, &mut obj.fields, &ext.fields)?;
                obj.interfaces.extend(ext.implements_interfaces.iter().cloned());
            },

            (Some(GraphType::Scalar(_)), TypeExtension::Scalar(_)) => (),

            (Some(GraphType::Union(union_type)), TypeExtension::Union(ext)) => {
                union_type.members.extend(ext.types.iter().cloned());
            },

            (None, _) => return Err(SchemaBuildError::ExtensionOfUndefinedType { type_name }),
            (Some(_), _) => return Err(SchemaBuildError::InvalidExtensionType { type_name }),
        }

        Ok(())
    }

    fn check_type_references(&self) -> Result<()> {
        let check_output = |referencing: String, annot: &TypeAnnotation| -> Result<()> {
            match self.types.get(annot.innermost_type_name()) {
                None => Err(SchemaBuildError::UndefinedTypeReference {
                    referenced_type: annot.innermost_type_name().to_string(),
                    referencing,
                }),
                Some(GraphType::InputObject(_)) => Err(SchemaBuildError::InvalidOutputType {
                    referenced_type: annot.innermost_type_name().to_string(),
                    referencing,
                }),
                Some(_) => Ok(()),
            }
        };
        let check_input = |referencing: String, annot: &TypeAnnotation| -> Result<()> {
            match self.types.get(annot.innermost_type_name()) {
                None => Err(SchemaBuildError::UndefinedTypeReference {
                    referenced_type: annot.innermost_type_name().to_string(),
                    referencing,
                }),
                Some(graph_type) if !graph_type.is_input_type() =>
                    Err(SchemaBuildError::InvalidInputType {
                        referenced_type: annot.innermost_type_name().to_string(),
                        referencing,
                    }),
                Some(_) => Ok(()),
            }
        };

        for graph_type in self.types.values() {
            if let Some(fields) = graph_type.fields() {
                for field in fields.values() {
                    let field_ref = format!("{}.{}", graph_type.name(), field.name);
                    check_output(field_ref.clone(), &field.type_annotation)?;
                    for arg in field.arguments.values() {
                        check_input(format!("{field_ref}({}:)", arg.name), &arg.type_annotation)?;
                    }
                }
            }

            let interfaces: &[String] = match graph_type {
                GraphType::Interface(iface) => iface.interfaces.as_slice(),
                GraphType::Object(obj) => obj.interfaces.as_slice(),
                _ => &[],
            };
            for iface_name in interfaces {
                if !matches!(self.types.get(iface_name), Some(GraphType::Interface(_))) {
                    return Err(SchemaBuildError::InvalidInterfaceReference {
                        interface_name: iface_name.to_string(),
                        type_name: graph_type.name().to_string(),
                    });
                }
            }

            match graph_type {
                GraphType::InputObject(inputobj) => {
                    for field in inputobj.fields.values() {
                        check_input(
                            format!("{}.{}", inputobj.name, field.name),
                            &field.type_annotation,
                        )?;
                    }
                },

                GraphType::Union(union_type) => {
                    for member in &union_type.members {
                        if !matches!(self.types.get(member), Some(GraphType::Object(_))) {
                            return Err(SchemaBuildError::InvalidUnionMember {
                                member_name: member.to_string(),
                                union_name: union_type.name.to_string(),
                            });
                        }
                    }
                },

                _ => (),
            }
        }

        for directive in self.directives.values() {
            for arg in directive.arguments.values() {
                check_input(format!("@{}({}:)", directive.name, arg.name), &arg.type_annotation)?;
            }
        }

        Ok(())
    }

    fn inject_missing_builtins(&mut self) -> Result<()> {
        for scalar_name in BUILTIN_SCALARS {
            if !self.types.contains_key(scalar_name) {
                self.types.insert(scalar_name.to_string(), GraphType::Scalar(ScalarType {
                    builtin: true,
                    name: scalar_name.to_string(),
                }));
            }
        }

        let builtin_doc = ast::schema::parse(BUILTIN_DIRECTIVES_SDL)
            .map_err(|err| SchemaBuildError::ParseError(err.to_string()))?;
        for def in &builtin_doc.definitions {
            if let ast::schema::Definition::DirectiveDefinition(directive_def) = def
                && !self.directives.contains_key(&directive_def.name) {
                let mut directive = DirectiveDefinition::from_ast(directive_def);
                directive.builtin = true;
                self.directives.insert(directive.name.to_string(), directive);
            }
        }

        Ok(())
    }

    fn resolve_root_type(
        &self,
        explicit: Option<String>,
        default_name: &str,
    ) -> Result<Option<String>> {
        match explicit {
            Some(type_name) => match self.types.get(&type_name) {
                Some(GraphType::Object(_)) => Ok(Some(type_name)),
                _ => Err(SchemaBuildError::InvalidRootOperationType { type_name }),
            },
            None => match self.types.get(default_name) {
                Some(GraphType::Object(_)) => Ok(Some(default_name.to_string())),
                _ => Ok(None),
            },
        }
    }

    fn visit_directive_def(&mut self, directive_def: &ast::schema::DirectiveDefinition) -> Result<()> {
        if self.directives.contains_key(&directive_def.name) {
            return Err(SchemaBuildError::DuplicateDirectiveDefinition {
                directive_name: directive_def.name.to_string(),
            });
        }
        self.directives.insert(
            directive_def.name.to_string(),
            DirectiveDefinition::from_ast(directive_def),
        );
        Ok(())
    }

    fn visit_schema_def(&mut self, schema_def: ast::schema::SchemaDefinition) -> Result<()> {
        if self.query_type.is_some()
            || self.mutation_type.is_some()
            || self.subscription_type.is_some() {
            return Err(SchemaBuildError::DuplicateSchemaDefinition);
        }
        self.query_type = schema_def.query;
        self.mutation_type = schema_def.mutation;
        self.subscription_type = schema_def.subscription;
        Ok(())
    }

    fn visit_type_def(&mut self, type_def: ast::schema::TypeDefinition) -> Result<()> {
        use ast::schema::TypeDefinition;

        let graph_type = match type_def {
            TypeDefinition::Enum(def) => GraphType::Enum(EnumType {
                name: def.name.to_string(),
                values: def.values.iter().map(|v| v.name.to_string()).collect(),
            }),

            TypeDefinition::InputObject(def) => GraphType::InputObject(InputObjectType {
                fields: def.fields.iter()
                    .map(|f| (f.name.to_string(), InputValueDefinition::from_ast(f)))
                    .collect(),
                name: def.name.to_string(),
            }),

            TypeDefinition::Interface(def) => {
                let mut fields = IndexMap::new();
                merge_fields(&def.name, &mut fields, &def.fields)?;
                GraphType::Interface(InterfaceType {
                    fields,
                    interfaces: def.implements_interfaces,
                    name: def.name.to_string(),
                })
            },

            TypeDefinition::Object(def) => {
                let mut fields = IndexMap::new();
                merge_fields(&def.name, &mut fields, &def.fields)?;
                GraphType::Object(ObjectType {
                    fields,
                    interfaces: def.implements_interfaces,
                    name: def.name.to_string(),
                })
            },

            TypeDefinition::Scalar(def) => GraphType::Scalar(ScalarType {
                builtin: false,
                name: def.name.to_string(),
            }),

            TypeDefinition::Union(def) => GraphType::Union(UnionType {
                members: def.types,
                name: def.name.to_string(),
            }),
        };

        let type_name = graph_type.name().to_string();
        if self.types.contains_key(&type_name) {
            return Err(SchemaBuildError::DuplicateTypeDefinition { type_name });
        }
        self.types.insert(type_name, graph_type);
        Ok(())
    }
}

fn merge_fields(
    type_name: &str,
    fields: &mut IndexMap<String, Arc<FieldDefinition>>,
    ast_fields: &[ast::schema::Field],
) -> Result<()> {
    for ast_field in ast_fields {
        if fields.contains_key(&ast_field.name) {
            return Err(SchemaBuildError::DuplicateFieldDefinition {
                field_name: ast_field.name.to_string(),
                type_name: type_name.to_string(),
            });
        }
        fields.insert(
            ast_field.name.to_string(),
            Arc::new(FieldDefinition::from_ast(type_name, ast_field)),
        );
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum SchemaBuildError {
    #[error("Multiple directives were defined with the name `@{directive_name}`")]
    DuplicateDirectiveDefinition {
        directive_name: String,
    },

    #[error("The `{type_name}` type defines the `{field_name}` field more than once")]
    DuplicateFieldDefinition {
        field_name: String,
        type_name: String,
    },

    #[error("The schema definition (`schema {{ ... }}`) was specified more than once")]
    DuplicateSchemaDefinition,

    #[error("Multiple GraphQL types with the name `{type_name}` were defined")]
    DuplicateTypeDefinition {
        type_name: String,
    },

    #[error("Attempted to extend the `{type_name}` type, but it is never defined")]
    ExtensionOfUndefinedType {
        type_name: String,
    },

    #[error("The extension of `{type_name}` does not match the kind of its definition")]
    InvalidExtensionType {
        type_name: String,
    },

    #[error("`{referencing}` must be an input type, but `{referenced_type}` is not")]
    InvalidInputType {
        referenced_type: String,
        referencing: String,
    },

    #[error("`{type_name}` implements `{interface_name}`, which is not an interface type")]
    InvalidInterfaceReference {
        interface_name: String,
        type_name: String,
    },

    #[error("`{referencing}` must be an output type, but `{referenced_type}` is an input type")]
    InvalidOutputType {
        referenced_type: String,
        referencing: String,
    },

    #[error("Root operation type `{type_name}` is not a defined object type")]
    InvalidRootOperationType {
        type_name: String,
    },

    #[error("A type resolver was registered for `{type_name}`, which is not an interface or union")]
    InvalidTypeResolverTarget {
        type_name: String,
    },

    #[error("Union `{union_name}` lists `{member_name}`, which is not an object type")]
    InvalidUnionMember {
        member_name: String,
        union_name: String,
    },

    #[error("No query type was defined for the schema")]
    NoQueryOperationTypeDefined,

    #[error("Error parsing schema document: {0}")]
    ParseError(String),

    #[error(transparent)]
    ReadContentError(#[from] file_reader::ReadContentError),

    #[error("A resolver was registered for `@{directive_name}`, which is not a defined executable directive")]
    UndefinedDirectiveResolverTarget {
        directive_name: String,
    },

    #[error("`{referencing}` references the type `{referenced_type}`, which is never defined")]
    UndefinedTypeReference {
        referenced_type: String,
        referencing: String,
    },

    #[error("Configuration was supplied for `{type_name}.{field_name}`, which is not a defined field")]
    UnknownFieldConfigured {
        field_name: String,
        type_name: String,
    },
}
