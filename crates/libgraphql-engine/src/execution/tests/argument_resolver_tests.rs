use crate::InputValue;
use crate::execution::ServiceProvider;
use crate::execution::argument_resolver::ArgumentResolutionError;
use crate::execution::argument_resolver::resolve_field_arguments;
use crate::schema::FieldDefinition;
use crate::schema::Schema;
use crate::test_utils::test_schema;
use crate::test_utils::test_schema_builder;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use std::sync::Arc;

fn field(schema: &Schema, type_name: &str, field_name: &str) -> Arc<FieldDefinition> {
    Arc::clone(schema.field(type_name, field_name).expect("field exists"))
}

fn supplied(args: &[(&str, InputValue)]) -> IndexMap<String, InputValue> {
    args.iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

fn variables(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

#[test]
fn query_values_take_precedence_over_defaults() {
    let schema = test_schema();
    let friends = field(&schema, "User", "friends");

    let resolved = resolve_field_arguments(
        &friends,
        &supplied(&[("first", InputValue::Literal(json!(3)))]),
        &Map::new(),
        &ServiceProvider::new(),
        &schema,
    ).unwrap();

    assert_eq!(resolved.values.get("first"), Some(&json!(3)));
}

#[test]
fn defaults_fill_unsupplied_arguments() {
    let schema = test_schema();
    let friends = field(&schema, "User", "friends");

    let resolved = resolve_field_arguments(
        &friends,
        &IndexMap::new(),
        &Map::new(),
        &ServiceProvider::new(),
        &schema,
    ).unwrap();

    assert_eq!(resolved.values.get("first"), Some(&json!(10)));
}

#[test]
fn unsupplied_variables_fall_back_to_the_default() {
    let schema = test_schema();
    let friends = field(&schema, "User", "friends");

    let resolved = resolve_field_arguments(
        &friends,
        &supplied(&[("first", InputValue::Variable("count".to_string()))]),
        &Map::new(),
        &ServiceProvider::new(),
        &schema,
    ).unwrap();
    assert_eq!(resolved.values.get("first"), Some(&json!(10)));

    let resolved = resolve_field_arguments(
        &friends,
        &supplied(&[("first", InputValue::Variable("count".to_string()))]),
        &variables(json!({ "count": 2 })),
        &ServiceProvider::new(),
        &schema,
    ).unwrap();
    assert_eq!(resolved.values.get("first"), Some(&json!(2)));
}

#[test]
fn nullable_arguments_without_values_are_left_out() {
    let schema = test_schema();
    let users = field(&schema, "Query", "users");

    let resolved = resolve_field_arguments(
        &users,
        &IndexMap::new(),
        &Map::new(),
        &ServiceProvider::new(),
        &schema,
    ).unwrap();

    assert!(resolved.values.is_empty());
}

#[test]
fn input_object_arguments_are_coerced_with_field_defaults() {
    let schema = test_schema();
    let users = field(&schema, "Query", "users");
    let filter = InputValue::Object(
        [("role".to_string(), InputValue::Variable("role".to_string()))]
            .into_iter()
            .collect(),
    );

    let resolved = resolve_field_arguments(
        &users,
        &supplied(&[("filter", filter)]),
        &variables(json!({ "role": "ADMIN" })),
        &ServiceProvider::new(),
        &schema,
    ).unwrap();

    assert_eq!(resolved.values.get("filter"), Some(&json!({ "role": "ADMIN", "limit": 5 })));
}

#[test]
fn missing_required_arguments_are_rejected() {
    let schema = test_schema();
    let user = field(&schema, "Query", "user");

    let err = resolve_field_arguments(
        &user,
        &IndexMap::new(),
        &Map::new(),
        &ServiceProvider::new(),
        &schema,
    ).unwrap_err();

    assert!(matches!(
        err,
        ArgumentResolutionError::MissingRequiredArgument { ref argument, ref owner }
            if argument == "id" && owner == "Query.user"
    ));
}

#[test]
fn values_that_fail_coercion_are_rejected() {
    let schema = test_schema();
    let friends = field(&schema, "User", "friends");

    let err = resolve_field_arguments(
        &friends,
        &supplied(&[("first", InputValue::Variable("count".to_string()))]),
        &variables(json!({ "count": "many" })),
        &ServiceProvider::new(),
        &schema,
    ).unwrap_err();

    assert!(matches!(err, ArgumentResolutionError::InvalidValue { ref argument, .. } if argument == "first"));
    assert!(err.to_string().contains("User.friends"));
}

#[test]
fn services_shadow_arguments_of_the_same_name() {
    struct Clock;

    let schema = test_schema_builder()
        .inject_service("User", "friends", "first")
        .build()
        .unwrap();
    let friends = field(&schema, "User", "friends");
    let services = ServiceProvider::new().with_service("first", Arc::new(Clock));

    let resolved = resolve_field_arguments(
        &friends,
        &supplied(&[("first", InputValue::Literal(json!(3)))]),
        &Map::new(),
        &services,
        &schema,
    ).unwrap();

    assert!(resolved.values.get("first").is_none());
    assert!(resolved.services.0.contains_key("first"));
}

#[test]
fn unregistered_services_are_rejected() {
    let schema = test_schema_builder()
        .inject_service("Query", "hello", "clock")
        .build()
        .unwrap();
    let hello = field(&schema, "Query", "hello");

    let err = resolve_field_arguments(
        &hello,
        &IndexMap::new(),
        &Map::new(),
        &ServiceProvider::new(),
        &schema,
    ).unwrap_err();

    assert!(matches!(
        err,
        ArgumentResolutionError::ServiceNotRegistered { ref field, ref service }
            if field == "Query.hello" && service == "clock"
    ));
}
