use libgraphql_engine::execution::QueryExecutionResult;
use libgraphql_engine::messages::GraphMessage;
use libgraphql_engine::messages::GraphMessageCollection;
use serde_json::Value;
use serde_json::json;

pub(crate) const GREEN_CHECK: &str = "✅";
pub(crate) const RED_X: &str = "❌";

/// One indented bullet line per message.
pub(crate) fn message_lines(messages: &GraphMessageCollection, indent: &str) -> String {
    messages.iter()
        .map(|message| format!("{indent}- {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn message_json(message: &GraphMessage) -> Value {
    let mut entry = json!({
        "message": message.message(),
        "code": message.code(),
        "severity": format!("{:?}", message.severity()),
    });
    if let Some(location) = message.location() {
        entry["locations"] = json!([{ "line": location.line, "column": location.column }]);
    }
    if let Some(path) = message.path() {
        entry["path"] = json!(path.to_string());
    }
    if let Some(rule) = message.rule_reference() {
        entry["rule"] = json!(rule);
    }
    entry
}

/// The response document printed by `execute`: `data` followed by every
/// message under `errors`.
pub(crate) fn response_json(result: &QueryExecutionResult) -> Value {
    let mut response = json!({ "data": result.data().cloned().unwrap_or(Value::Null) });
    if !result.messages().is_empty() {
        response["errors"] = Value::Array(result.messages().iter().map(message_json).collect());
    }
    if let Some(metrics) = result.metrics() {
        response["extensions"] = json!({
            "fieldsResolved": metrics.fields_resolved(),
            "resolverInvocations": metrics.resolver_invocations(),
            "phasesMs": metrics.phases()
                .into_iter()
                .map(|(phase, elapsed)| (phase.to_string(), json!(elapsed.as_secs_f64() * 1000.0)))
                .collect::<serde_json::Map<_, _>>(),
        });
    }
    response
}
