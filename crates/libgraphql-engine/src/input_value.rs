use crate::ast;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;

/// An argument value captured from a query document at plan time. Literal
/// parts are converted eagerly; variable references are kept symbolic and are
/// only substituted once a request supplies its variables.
#[derive(Clone, Debug, PartialEq)]
pub enum InputValue {
    List(Vec<InputValue>),
    Literal(Value),
    Object(IndexMap<String, InputValue>),
    Variable(String),
}
impl InputValue {
    pub(crate) fn from_ast(ast_value: &ast::Value) -> Self {
        match ast_value {
            ast::Value::Boolean(b) => Self::Literal(Value::Bool(*b)),
            ast::Value::Enum(name) => Self::Literal(Value::String(name.to_string())),
            ast::Value::Float(f) => Self::Literal(
                serde_json::Number::from_f64(*f)
                    .map(Value::Number)
                    .unwrap_or(Value::Null),
            ),
            ast::Value::Int(num) => Self::Literal(
                num.as_i64().map(Value::from).unwrap_or(Value::Null),
            ),
            ast::Value::List(items) => Self::List(items.iter().map(Self::from_ast).collect()),
            ast::Value::Null => Self::Literal(Value::Null),
            ast::Value::Object(fields) => Self::Object(
                fields.iter()
                    .map(|(name, value)| (name.to_string(), Self::from_ast(value)))
                    .collect(),
            ),
            ast::Value::String(s) => Self::Literal(Value::String(s.to_string())),
            ast::Value::Variable(name) => Self::Variable(name.to_string()),
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Substitute variables and produce a concrete value. A top-level
    /// reference to a variable the request did not supply yields `None` so
    /// the caller can fall back to a default; nested references to missing
    /// variables become `null` inside lists and are omitted from objects.
    pub fn resolve(&self, variables: &Map<String, Value>) -> Option<Value> {
        match self {
            Self::List(items) => Some(Value::Array(
                items.iter()
                    .map(|item| item.resolve(variables).unwrap_or(Value::Null))
                    .collect(),
            )),
            Self::Literal(value) => Some(value.clone()),
            Self::Object(fields) => Some(Value::Object(
                fields.iter()
                    .filter_map(|(name, value)| {
                        value.resolve(variables).map(|value| (name.to_string(), value))
                    })
                    .collect(),
            )),
            Self::Variable(name) => variables.get(name).cloned(),
        }
    }
}
