use crate::execution::DirectiveError;
use crate::execution::DirectiveOutcome;
use crate::execution::DirectivePhase;
use crate::execution::DirectiveProcessingError;
use crate::execution::DirectiveResolutionContext;
use crate::execution::DirectiveResolver;
use crate::execution::GraphQueryExecutionContext;
use crate::execution::GraphQueryRequest;
use crate::execution::QueryEvent;
use crate::execution::SchemaConfigurationError;
use crate::execution::tests::data;
use crate::execution::tests::execute;
use crate::execution::tests::execute_with;
use crate::execution::tests::message_codes;
use crate::messages::codes;
use crate::schema::Schema;
use crate::test_utils::test_schema;
use crate::test_utils::test_schema_builder;
use serde_json::Value;
use serde_json::json;
use std::error::Error;
use std::sync::Arc;

struct UpperDirective;

#[async_trait::async_trait]
impl DirectiveResolver for UpperDirective {
    async fn after_field_resolution(
        &self,
        _context: &DirectiveResolutionContext,
        value: &mut Value,
    ) -> Result<DirectiveOutcome, DirectiveError> {
        if let Some(text) = value.as_str() {
            *value = Value::String(text.to_uppercase());
        }
        Ok(DirectiveOutcome::Continue)
    }
}

/// Aborts fields tagged `blocked`, omits fields tagged `hidden` once they
/// resolve, and fails fields tagged `broken`.
struct TagDirective;

#[async_trait::async_trait]
impl DirectiveResolver for TagDirective {
    async fn before_field_resolution(
        &self,
        context: &DirectiveResolutionContext,
    ) -> Result<DirectiveOutcome, DirectiveError> {
        match context.argument("name").and_then(Value::as_str) {
            Some("blocked") => Ok(DirectiveOutcome::Abort(format!(
                "`{}` is blocked",
                context.field().name(),
            ))),
            Some("broken") => Err(DirectiveError::from(
                DirectiveProcessingError::from_messages(["first", "second", "third"])
                    .ok_or_else(|| DirectiveError::msg("no messages"))?,
            )),
            _ => Ok(DirectiveOutcome::Continue),
        }
    }

    async fn after_field_resolution(
        &self,
        context: &DirectiveResolutionContext,
        _value: &mut Value,
    ) -> Result<DirectiveOutcome, DirectiveError> {
        Ok(match context.argument("name").and_then(Value::as_str) {
            Some("hidden") => DirectiveOutcome::Skip,
            _ => DirectiveOutcome::Continue,
        })
    }
}

fn directive_schema() -> Arc<Schema> {
    Arc::new(
        test_schema_builder()
            .directive_resolver("upper", Arc::new(UpperDirective))
            .directive_resolver("tag", Arc::new(TagDirective))
            .build()
            .unwrap(),
    )
}

fn root_value() -> Value {
    json!({ "hello": "hi", "user": { "id": "1", "name": "Ann" } })
}

#[tokio::test]
async fn skip_and_include_follow_their_condition() {
    let query = "query Q($flag: Boolean!) { hello @skip(if: $flag) user(id: 1) @include(if: $flag) { id } }";
    for (flag, expected) in [
        (true, json!({ "user": { "id": "1" } })),
        (false, json!({ "hello": "hi" })),
    ] {
        let context = GraphQueryExecutionContext::new(
            GraphQueryRequest::new(query)
                .with_variables(json!({ "flag": flag }).as_object().cloned().unwrap_or_default()),
        ).with_root_value(root_value());

        let (result, _) = execute_with(test_schema(), context).await;

        assert!(result.messages().is_empty(), "{:?}", result.messages());
        assert_eq!(data(&result), &expected);
    }
}

#[tokio::test]
async fn fragment_directives_apply_to_every_field_they_contain() {
    let result = execute(
        test_schema(),
        "{ user(id: 1) { id ... @skip(if: true) { name } ...Extra @include(if: false) } } \
         fragment Extra on User { role }",
        json!({ "user": { "id": "1", "name": "Ann", "role": "ADMIN" } }),
    ).await;

    assert_eq!(data(&result), &json!({ "user": { "id": "1" } }));
}

#[tokio::test]
async fn after_directives_transform_resolved_values() {
    let context = GraphQueryExecutionContext::new(GraphQueryRequest::new("{ hello @upper user(id: 1) { name } }"))
        .with_root_value(root_value());

    let (result, listener) = execute_with(directive_schema(), context).await;

    assert_eq!(data(&result), &json!({ "hello": "HI", "user": { "name": "Ann" } }));
    // Once before resolution and once for the transform.
    assert_eq!(listener.count("directive_applied"), 2);
}

#[tokio::test]
async fn directives_without_a_resolver_are_ignored() {
    let result = execute(test_schema(), "{ hello @tag(name: \"blocked\") @upper }", root_value()).await;

    assert!(result.messages().is_empty());
    assert_eq!(data(&result), &json!({ "hello": "hi" }));
}

#[tokio::test]
async fn aborting_directives_null_the_field() {
    let result = execute(
        directive_schema(),
        "{ user(id: 1) { name @tag(name: \"blocked\") id } }",
        root_value(),
    ).await;

    assert_eq!(data(&result), &json!({ "user": { "name": null, "id": "1" } }));
    assert_eq!(message_codes(&result), vec![codes::REQUEST_ABORTED]);
    let message = result.messages().iter().next().unwrap();
    assert_eq!(message.message(), "`name` is blocked");
    assert_eq!(message.path().map(ToString::to_string).as_deref(), Some("user.name"));
    assert!(message.location().is_some());
}

#[tokio::test]
async fn after_directives_can_omit_the_field() {
    let result = execute(
        directive_schema(),
        "{ hello @tag(name: \"hidden\") user(id: 1) { id } }",
        root_value(),
    ).await;

    assert_eq!(data(&result), &json!({ "user": { "id": "1" } }));
}

#[tokio::test]
async fn directive_failures_keep_the_full_error_chain() {
    let result = execute(
        directive_schema(),
        "{ hello @tag(name: \"broken\") }",
        root_value(),
    ).await;

    assert_eq!(data(&result), &json!({ "hello": null }));
    assert_eq!(message_codes(&result), vec![codes::EXECUTION_ERROR]);

    let message = result.messages().iter().next().unwrap();
    let exception = message.exception().expect("directive failures carry their error");
    let config_err = exception
        .downcast_ref::<SchemaConfigurationError>()
        .expect("wrapped in a SchemaConfigurationError");
    assert_eq!(config_err.directive(), "tag");
    assert_eq!(config_err.path().to_string(), "hello");

    let mut chain = vec![];
    let mut current = config_err.source();
    while let Some(err) = current {
        chain.push(err.to_string());
        current = err.source();
    }
    assert_eq!(chain, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn directive_events_record_the_field_path() {
    let context = GraphQueryExecutionContext::new(GraphQueryRequest::new(
        "{ user(id: 1) { name @tag(name: \"ok\") } }",
    )).with_root_value(root_value());

    let (_, listener) = execute_with(directive_schema(), context).await;

    let applied: Vec<_> = listener.events()
        .into_iter()
        .filter_map(|event| match event {
            QueryEvent::DirectiveApplied { directive, path, phase } =>
                Some((directive, path.to_string(), phase)),
            _ => None,
        })
        .collect();
    assert_eq!(applied, vec![
        ("tag".to_string(), "user.name".to_string(), DirectivePhase::Before),
        ("tag".to_string(), "user.name".to_string(), DirectivePhase::After),
    ]);
}

#[test]
fn processing_errors_nest_later_messages() {
    assert!(DirectiveProcessingError::from_messages(Vec::<String>::new()).is_none());

    let err = DirectiveProcessingError::from_messages(["first", "second", "third"]).unwrap();
    assert_eq!(err.message(), "first");
    assert_eq!(err.inner().map(DirectiveProcessingError::message), Some("second"));
    assert_eq!(err.messages(), vec!["first", "second", "third"]);
    assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("second"));
}
