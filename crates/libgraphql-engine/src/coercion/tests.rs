use crate::ast;
use crate::coercion::CoercionError;
use crate::coercion::check_literal;
use crate::coercion::coerce_value;
use crate::schema::TypeAnnotation;
use crate::test_utils::test_schema;
use serde_json::json;

/// Parse `{ f(arg: <literal>) }` and return the literal.
fn literal(src: &str) -> ast::Value {
    let doc = ast::operation::parse(format!("{{ f(arg: {src}) }}").as_str())
        .expect("literal parses");
    let Some(ast::operation::Definition::Operation(
        ast::operation::OperationDefinition::SelectionSet(sel_set),
    )) = doc.definitions.into_iter().next() else {
        panic!("expected a shorthand query");
    };
    let Some(ast::operation::Selection::Field(mut field)) = sel_set.items.into_iter().next() else {
        panic!("expected a field");
    };
    field.arguments.remove(0).1
}

fn filter_type(nullable: bool) -> TypeAnnotation {
    TypeAnnotation::named("UserFilter", nullable)
}

mod literals {
    use super::*;

    #[test]
    fn scalars() {
        let schema = test_schema();
        let int = TypeAnnotation::named("Int", true);

        assert!(check_literal(&literal("5"), &int, &schema).is_ok());
        assert!(check_literal(&literal("\"5\""), &int, &schema).is_err());
        assert!(check_literal(&literal("5000000000"), &int, &schema).is_err());
        assert!(check_literal(&literal("5"), &TypeAnnotation::named("Float", true), &schema).is_ok());
        assert!(check_literal(&literal("5"), &TypeAnnotation::named("ID", true), &schema).is_ok());
        assert!(check_literal(&literal("$var"), &int, &schema).is_ok());
    }

    #[test]
    fn null_for_non_null() {
        let schema = test_schema();
        let err = check_literal(&literal("null"), &TypeAnnotation::named("Int", false), &schema)
            .unwrap_err();

        assert!(matches!(err, CoercionError::NullForNonNull { .. }));
        assert_eq!(err.rule_reference(), "5.6.1");
    }

    #[test]
    fn enums_require_enum_literals() {
        let schema = test_schema();
        let role = TypeAnnotation::named("Role", true);

        assert!(check_literal(&literal("ADMIN"), &role, &schema).is_ok());
        assert!(check_literal(&literal("\"ADMIN\""), &role, &schema).is_err());
        assert!(matches!(
            check_literal(&literal("OWNER"), &role, &schema),
            Err(CoercionError::UnknownEnumValue { .. }),
        ));
    }

    #[test]
    fn input_objects() {
        let schema = test_schema();

        assert!(check_literal(&literal("{ role: ADMIN }"), &filter_type(true), &schema).is_ok());

        let unknown = check_literal(&literal("{ role: ADMIN, bogus: 1 }"), &filter_type(true), &schema)
            .unwrap_err();
        assert_eq!(unknown.rule_reference(), "5.6.2");

        let missing = check_literal(&literal("{ limit: 1 }"), &filter_type(true), &schema)
            .unwrap_err();
        assert_eq!(missing.rule_reference(), "5.6.4");
    }

    #[test]
    fn single_value_for_list() {
        let schema = test_schema();
        let ids = TypeAnnotation::list(TypeAnnotation::named("ID", false), true);

        assert!(check_literal(&literal("[\"a\", 2]"), &ids, &schema).is_ok());
        assert!(check_literal(&literal("\"a\""), &ids, &schema).is_ok());
        assert!(check_literal(&literal("[true]"), &ids, &schema).is_err());
    }
}

mod runtime_values {
    use super::*;

    #[test]
    fn applies_input_object_defaults() {
        let schema = test_schema();
        let coerced = coerce_value(&json!({"role": "ADMIN"}), &filter_type(false), &schema);

        assert_eq!(coerced, Ok(json!({"role": "ADMIN", "limit": 5})));
    }

    #[test]
    fn ids_accept_integers() {
        let schema = test_schema();
        let coerced = coerce_value(&json!(7), &TypeAnnotation::named("ID", false), &schema);

        assert_eq!(coerced, Ok(json!("7")));
    }

    #[test]
    fn wraps_single_values_in_lists() {
        let schema = test_schema();
        let ints = TypeAnnotation::list(TypeAnnotation::named("Int", false), false);

        assert_eq!(coerce_value(&json!(3), &ints, &schema), Ok(json!([3])));
        assert!(coerce_value(&json!([1, null]), &ints, &schema).is_err());
    }

    #[test]
    fn rejects_wrong_types() {
        let schema = test_schema();

        assert!(matches!(
            coerce_value(&json!("x"), &TypeAnnotation::named("Int", true), &schema),
            Err(CoercionError::TypeMismatch { .. }),
        ));
        assert!(matches!(
            coerce_value(&json!({"role": "ADMIN", "x": 1}), &filter_type(true), &schema),
            Err(CoercionError::UnknownInputField { .. }),
        ));
        assert!(matches!(
            coerce_value(&json!(null), &filter_type(false), &schema),
            Err(CoercionError::NullForNonNull { .. }),
        ));
    }
}
