use crate::OperationType;
use crate::schema::DirectiveLocation;
use crate::schema::FieldResolutionMode;
use crate::schema::FieldSource;
use crate::schema::GraphTypeKind;
use crate::schema::SchemaBuildError;
use crate::schema::SchemaBuilder;
use crate::schema::BatchResults;
use crate::schema::batch_resolver_fn;
use crate::schema::resolver_fn;
use crate::test_utils::test_schema;
use crate::test_utils::test_schema_builder;
use serde_json::json;
use std::sync::Arc;

type Result<T> = std::result::Result<T, SchemaBuildError>;

mod basics {
    use super::*;

    #[test]
    fn build_without_query_type() {
        let result = SchemaBuilder::from_str("s", "type Foo { a: Int }")
            .and_then(|builder| builder.build());

        assert!(matches!(result, Err(SchemaBuildError::NoQueryOperationTypeDefined)));
    }

    #[test]
    fn builtins_are_injected() -> Result<()> {
        let schema = SchemaBuilder::from_str("s", "type Query { a: Int }")?.build()?;

        for scalar in ["Boolean", "Float", "ID", "Int", "String"] {
            let scalar_type = schema.lookup_type(scalar).expect("builtin scalar exists");
            assert_eq!(scalar_type.kind(), GraphTypeKind::Scalar);
        }
        let skip = schema.directive("skip").expect("@skip is injected");
        assert!(skip.is_builtin());
        assert!(skip.is_valid_at(DirectiveLocation::Field));
        assert!(skip.arguments()["if"].is_required());
        assert!(schema.directive("include").is_some());
        assert!(!schema.directive("deprecated").expect("@deprecated is injected").is_executable());

        Ok(())
    }

    #[test]
    fn root_types_default_by_name() {
        let schema = test_schema();

        assert_eq!(schema.name(), "test");
        assert_eq!(schema.root_type(OperationType::Query).map(|t| t.name()), Some("Query"));
        assert_eq!(schema.root_type(OperationType::Mutation).map(|t| t.name()), Some("Mutation"));
        assert_eq!(
            schema.root_type(OperationType::Subscription).map(|t| t.name()),
            Some("Subscription"),
        );
    }

    #[test]
    fn schema_definition_overrides_root_types() -> Result<()> {
        let schema = SchemaBuilder::from_str("s", concat!(
            "schema { query: Root }\n",
            "type Root { a: Int }\n",
        ))?.build()?;

        assert_eq!(schema.root_type(OperationType::Query).map(|t| t.name()), Some("Root"));
        assert!(schema.root_type(OperationType::Mutation).is_none());

        Ok(())
    }

    #[test]
    fn typename_is_selectable_on_composite_types_only() {
        let schema = test_schema();

        assert!(schema.field("User", "__typename").is_some());
        assert!(schema.field("SearchResult", "__typename").is_some());
        assert!(schema.field("Role", "__typename").is_none());
    }

    #[test]
    fn type_extensions_are_merged() -> Result<()> {
        let schema = SchemaBuilder::from_str("s", concat!(
            "type Query { a: Int }\n",
            "extend type Query { b: String }\n",
        ))?.build()?;

        assert!(schema.field("Query", "a").is_some());
        assert!(schema.field("Query", "b").is_some());

        Ok(())
    }
}

mod errors {
    use super::*;

    #[test]
    fn duplicate_type_definition() {
        let result = SchemaBuilder::from_str("s", "type Query { a: Int }\ntype Query { b: Int }");
        assert!(matches!(
            result,
            Err(SchemaBuildError::DuplicateTypeDefinition { type_name }) if type_name == "Query",
        ));
    }

    #[test]
    fn undefined_field_type() -> Result<()> {
        let result = SchemaBuilder::from_str("s", "type Query { a: Missing }")?.build();
        assert!(matches!(
            result,
            Err(SchemaBuildError::UndefinedTypeReference { referenced_type, .. })
                if referenced_type == "Missing",
        ));
        Ok(())
    }

    #[test]
    fn union_member_must_be_object() -> Result<()> {
        let result = SchemaBuilder::from_str("s", concat!(
            "type Query { a: U }\n",
            "union U = Int\n",
        ))?.build();
        assert!(matches!(result, Err(SchemaBuildError::InvalidUnionMember { .. })));
        Ok(())
    }

    #[test]
    fn configuring_an_unknown_field() {
        let result = test_schema_builder()
            .field_complexity("Query", "doesNotExist", 2.0)
            .build();
        assert!(matches!(
            result,
            Err(SchemaBuildError::UnknownFieldConfigured { field_name, .. })
                if field_name == "doesNotExist",
        ));
    }

    #[test]
    fn type_resolver_on_object_type() {
        let result = test_schema_builder()
            .type_resolver("User", Arc::new(|_: &serde_json::Value| -> Option<String> { None }))
            .build();
        assert!(matches!(result, Err(SchemaBuildError::InvalidTypeResolverTarget { .. })));
    }

    #[test]
    fn parse_error() {
        let result = SchemaBuilder::from_str("s", "type Query {");
        assert!(matches!(result, Err(SchemaBuildError::ParseError(_))));
    }
}

mod field_metadata {
    use super::*;

    #[test]
    fn defaults() {
        let schema = test_schema();
        let field = schema.field("User", "name").expect("field exists");

        assert_eq!(field.complexity(), None);
        assert!(!field.is_isolated());
        assert_eq!(field.mode(), FieldResolutionMode::PerSourceItem);
        assert_eq!(field.owner_type(), "User");
        assert!(field.resolver().is_none());
        assert_eq!(field.source(), FieldSource::Property);
    }

    #[test]
    fn resolvers_set_mode_and_source() -> Result<()> {
        let schema = test_schema_builder()
            .field_resolver("Query", "hello", resolver_fn(|_ctx| async { Ok(json!("hi")) }))
            .batch_field_resolver(
                "User",
                "posts",
                batch_resolver_fn(|_ctx| async { Ok(BatchResults::new()) }),
            )
            .field_source("Mutation", "renameUser", FieldSource::Action)
            .field_complexity("User", "friends", 4.0)
            .isolate_field("Mutation", "renameUser")
            .authorize_field("User", "role", "admins")
            .build()?;

        let hello = schema.field("Query", "hello").expect("field exists");
        assert_eq!(hello.mode(), FieldResolutionMode::PerSourceItem);
        assert_eq!(hello.source(), FieldSource::Method);
        assert!(hello.resolver().is_some());

        let posts = schema.field("User", "posts").expect("field exists");
        assert_eq!(posts.mode(), FieldResolutionMode::Batch);

        let rename = schema.field("Mutation", "renameUser").expect("field exists");
        assert_eq!(rename.source(), FieldSource::Action);
        assert!(rename.is_isolated());

        assert_eq!(schema.field("User", "friends").and_then(|f| f.complexity()), Some(4.0));
        assert_eq!(
            schema.field("User", "role").expect("field exists").authorization_policies(),
            &["admins".to_string()],
        );

        Ok(())
    }
}

mod abstract_types {
    use super::*;

    #[test]
    fn possible_types() {
        let schema = test_schema();

        let node_types = schema.possible_types("Node");
        assert!(node_types.contains("User"));
        assert!(node_types.contains("Post"));
        assert_eq!(node_types.len(), 2);

        assert_eq!(schema.possible_types("SearchResult").len(), 2);
        assert_eq!(schema.possible_types("User").len(), 1);
        assert!(schema.possible_types("Role").is_empty());
    }

    #[test]
    fn fragment_applicability() {
        let schema = test_schema();

        assert!(schema.fragment_applies_to("Node", "Post"));
        assert!(schema.fragment_applies_to("User", "User"));
        assert!(!schema.fragment_applies_to("Named", "Post"));
        assert!(schema.types_overlap("Named", "SearchResult"));
        assert!(!schema.types_overlap("Post", "Named"));
    }

    #[test]
    fn concrete_type_from_typename() {
        let schema = test_schema();

        assert_eq!(
            schema.resolve_concrete_type("Node", &json!({"__typename": "Post"})),
            Some("Post".to_string()),
        );
        assert_eq!(schema.resolve_concrete_type("Node", &json!({"id": "1"})), None);
        // Defined, but not a possible type of the union.
        assert_eq!(
            schema.resolve_concrete_type("SearchResult", &json!({"__typename": "Query"})),
            None,
        );
    }

    #[test]
    fn concrete_type_from_registered_resolver() -> Result<()> {
        let schema = test_schema_builder()
            .type_resolver("SearchResult", Arc::new(|value: &serde_json::Value| {
                value.get("title").map(|_| "Post".to_string())
            }))
            .build()?;

        assert_eq!(
            schema.resolve_concrete_type("SearchResult", &json!({"title": "t"})),
            Some("Post".to_string()),
        );

        Ok(())
    }
}
