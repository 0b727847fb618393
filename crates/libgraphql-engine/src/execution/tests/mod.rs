mod argument_resolver_tests;
mod authorization_tests;
mod cancellation_tests;
mod directive_tests;

use crate::execution::GraphQueryExecutionContext;
use crate::execution::GraphQueryRequest;
use crate::execution::QueryExecutionResult;
use crate::runtime::GraphQueryRuntime;
use crate::schema::Schema;
use crate::test_utils::RecordingListener;
use serde_json::Value;
use std::sync::Arc;

pub(super) async fn execute_with(
    schema: Arc<Schema>,
    context: GraphQueryExecutionContext,
) -> (QueryExecutionResult, Arc<RecordingListener>) {
    let listener = RecordingListener::new();
    let result = GraphQueryRuntime::new(schema)
        .with_listener(listener.clone())
        .execute(context)
        .await;
    (result, listener)
}

pub(super) async fn execute(
    schema: Arc<Schema>,
    query: &str,
    root_value: Value,
) -> QueryExecutionResult {
    let context = GraphQueryExecutionContext::new(GraphQueryRequest::new(query))
        .with_root_value(root_value);
    execute_with(schema, context).await.0
}

pub(super) fn message_codes(result: &QueryExecutionResult) -> Vec<&str> {
    result.messages().iter().map(|message| message.code()).collect()
}

pub(super) fn data(result: &QueryExecutionResult) -> &Value {
    result.data().expect("result has data")
}

pub(super) fn response_keys(value: &Value) -> Vec<&str> {
    value.as_object()
        .map(|object| object.keys().map(String::as_str).collect())
        .unwrap_or_default()
}
