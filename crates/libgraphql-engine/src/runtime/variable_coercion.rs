use crate::InputValue;
use crate::coercion::coerce_value;
use crate::messages::GraphMessage;
use crate::messages::GraphMessageCollection;
use crate::messages::codes;
use crate::plan::ExecutableOperation;
use crate::schema::Schema;
use serde_json::Map;
use serde_json::Value;

/// Coerce the variables a request supplied against the operation's variable
/// definitions. Variables the request left out take their declared default,
/// if any. Every problem is reported rather than only the first.
pub(crate) fn coerce_variables(
    operation: &ExecutableOperation,
    provided: &Map<String, Value>,
    schema: &Schema,
) -> Result<Map<String, Value>, GraphMessageCollection> {
    let mut coerced = Map::new();
    let mut messages = GraphMessageCollection::new();
    for definition in operation.variables() {
        let name = definition.name();
        let annot = definition.type_annotation();
        let value = match provided.get(name) {
            Some(value) => value.clone(),
            None => match definition.default_value() {
                Some(default) => InputValue::from_ast(default)
                    .resolve(&Map::new())
                    .unwrap_or(Value::Null),
                None if !annot.nullable() => {
                    messages.add(GraphMessage::critical(
                        codes::INVALID_VARIABLE_VALUE,
                        format!("Variable `${name}` of required type `{annot}` was not provided"),
                    ));
                    continue;
                },
                None => continue,
            },
        };
        match coerce_value(&value, annot, schema) {
            Ok(value) => {
                coerced.insert(name.to_string(), value);
            },
            Err(err) => messages.add(GraphMessage::critical(
                codes::INVALID_VARIABLE_VALUE,
                format!("Variable `${name}` got an invalid value: {err}"),
            )),
        }
    }

    if messages.is_empty() {
        Ok(coerced)
    } else {
        Err(messages)
    }
}
