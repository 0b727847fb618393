//! Input coercion: checking argument literals written in a document and
//! coercing runtime JSON values (variables, resolved arguments) against the
//! input types declared by a schema.

use crate::InputValue;
use crate::ast;
use crate::schema::GraphType;
use crate::schema::InputObjectType;
use crate::schema::Schema;
use crate::schema::TypeAnnotation;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

type Result<T> = std::result::Result<T, CoercionError>;

/// Check a literal argument value written in a query document against the
/// type it is provided for. Variable references are accepted here; their
/// usage is checked separately against the variable's declared type.
pub fn check_literal(value: &ast::Value, annot: &TypeAnnotation, schema: &Schema) -> Result<()> {
    if let ast::Value::Variable(_) = value {
        return Ok(());
    }
    if let ast::Value::Null = value {
        return if annot.nullable() {
            Ok(())
        } else {
            Err(CoercionError::NullForNonNull { expected: annot.to_string() })
        };
    }

    match annot {
        TypeAnnotation::List(list) => match value {
            ast::Value::List(items) => {
                for item in items {
                    check_literal(item, list.inner_type_annotation(), schema)?;
                }
                Ok(())
            },
            single => check_literal(single, list.inner_type_annotation(), schema),
        },

        TypeAnnotation::Named(named) => {
            let type_name = named.graphql_type_name();
            let mismatch = || CoercionError::TypeMismatch {
                expected: annot.to_string(),
                found: describe_literal(value),
            };
            match schema.lookup_type(type_name) {
                Some(GraphType::Scalar(scalar)) => {
                    let valid = match (scalar.name(), value) {
                        ("Boolean", ast::Value::Boolean(_)) => true,
                        ("Float", ast::Value::Float(_) | ast::Value::Int(_)) => true,
                        ("ID", ast::Value::Int(_) | ast::Value::String(_)) => true,
                        ("Int", ast::Value::Int(num)) => num.as_i64().is_some_and(fits_in_i32),
                        ("String", ast::Value::String(_)) => true,
                        ("Boolean" | "Float" | "ID" | "Int" | "String", _) => false,
                        _ => true,
                    };
                    if valid { Ok(()) } else { Err(mismatch()) }
                },

                Some(GraphType::Enum(enum_type)) => match value {
                    ast::Value::Enum(name) if enum_type.values().contains(name) => Ok(()),
                    ast::Value::Enum(name) => Err(CoercionError::UnknownEnumValue {
                        enum_name: enum_type.name().to_string(),
                        value: name.to_string(),
                    }),
                    _ => Err(mismatch()),
                },

                Some(GraphType::InputObject(inputobj)) => match value {
                    ast::Value::Object(fields) => {
                        for field_name in fields.keys() {
                            if !inputobj.fields().contains_key(field_name) {
                                return Err(CoercionError::UnknownInputField {
                                    field_name: field_name.to_string(),
                                    type_name: inputobj.name().to_string(),
                                });
                            }
                        }
                        for (field_name, field_def) in inputobj.fields() {
                            match fields.get(field_name) {
                                Some(field_value) =>
                                    check_literal(field_value, field_def.type_annotation(), schema)?,
                                None if field_def.is_required() =>
                                    return Err(CoercionError::MissingInputField {
                                        field_name: field_name.to_string(),
                                        type_name: inputobj.name().to_string(),
                                    }),
                                None => (),
                            }
                        }
                        Ok(())
                    },
                    _ => Err(mismatch()),
                },

                Some(_) | None => Err(CoercionError::NotAnInputType(type_name.to_string())),
            }
        },
    }
}

/// Coerce a runtime JSON value to the given input type, applying input
/// object field defaults along the way.
pub fn coerce_value(value: &Value, annot: &TypeAnnotation, schema: &Schema) -> Result<Value> {
    if value.is_null() {
        return if annot.nullable() {
            Ok(Value::Null)
        } else {
            Err(CoercionError::NullForNonNull { expected: annot.to_string() })
        };
    }

    match annot {
        TypeAnnotation::List(list) => match value {
            Value::Array(items) => items.iter()
                .map(|item| coerce_value(item, list.inner_type_annotation(), schema))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            single => Ok(Value::Array(vec![
                coerce_value(single, list.inner_type_annotation(), schema)?,
            ])),
        },

        TypeAnnotation::Named(named) => {
            let type_name = named.graphql_type_name();
            let mismatch = || CoercionError::TypeMismatch {
                expected: annot.to_string(),
                found: describe_json(value),
            };
            match schema.lookup_type(type_name) {
                Some(GraphType::Scalar(scalar)) => match (scalar.name(), value) {
                    ("Boolean", Value::Bool(_)) => Ok(value.clone()),
                    ("Float", Value::Number(_)) => Ok(value.clone()),
                    ("ID", Value::String(_)) => Ok(value.clone()),
                    ("ID", Value::Number(num)) if num.is_i64() || num.is_u64() =>
                        Ok(Value::String(num.to_string())),
                    ("Int", Value::Number(num)) if num.as_i64().is_some_and(fits_in_i32) =>
                        Ok(value.clone()),
                    ("String", Value::String(_)) => Ok(value.clone()),
                    ("Boolean" | "Float" | "ID" | "Int" | "String", _) => Err(mismatch()),
                    _ => Ok(value.clone()),
                },

                Some(GraphType::Enum(enum_type)) => match value {
                    Value::String(name) if enum_type.values().contains(name) => Ok(value.clone()),
                    Value::String(name) => Err(CoercionError::UnknownEnumValue {
                        enum_name: enum_type.name().to_string(),
                        value: name.to_string(),
                    }),
                    _ => Err(mismatch()),
                },

                Some(GraphType::InputObject(inputobj)) => match value {
                    Value::Object(fields) => coerce_input_object(fields, inputobj, schema),
                    _ => Err(mismatch()),
                },

                Some(_) | None => Err(CoercionError::NotAnInputType(type_name.to_string())),
            }
        },
    }
}

fn coerce_input_object(
    fields: &Map<String, Value>,
    inputobj: &InputObjectType,
    schema: &Schema,
) -> Result<Value> {
    if let Some(unknown) = fields.keys().find(|name| !inputobj.fields().contains_key(*name)) {
        return Err(CoercionError::UnknownInputField {
            field_name: unknown.to_string(),
            type_name: inputobj.name().to_string(),
        });
    }

    let mut coerced = Map::new();
    for (field_name, field_def) in inputobj.fields() {
        let value = match fields.get(field_name) {
            Some(value) => value.clone(),
            None => match field_def.default_value() {
                Some(default) => InputValue::from_ast(default)
                    .resolve(&Map::new())
                    .unwrap_or(Value::Null),
                None if field_def.is_required() => return Err(CoercionError::MissingInputField {
                    field_name: field_name.to_string(),
                    type_name: inputobj.name().to_string(),
                }),
                None => continue,
            },
        };
        coerced.insert(
            field_name.to_string(),
            coerce_value(&value, field_def.type_annotation(), schema)?,
        );
    }
    Ok(Value::Object(coerced))
}

fn fits_in_i32(num: i64) -> bool {
    i32::try_from(num).is_ok()
}

fn describe_json(value: &Value) -> String {
    match value {
        Value::Array(_) => "a list".to_string(),
        Value::Bool(b) => format!("`{b}`"),
        Value::Null => "null".to_string(),
        Value::Number(num) => format!("`{num}`"),
        Value::Object(_) => "an object".to_string(),
        Value::String(s) => format!("\"{s}\""),
    }
}

fn describe_literal(value: &ast::Value) -> String {
    match value {
        ast::Value::Boolean(b) => format!("`{b}`"),
        ast::Value::Enum(name) => format!("enum value `{name}`"),
        ast::Value::Float(f) => format!("`{f}`"),
        ast::Value::Int(num) => num.as_i64()
            .map(|n| format!("`{n}`"))
            .unwrap_or_else(|| "an integer".to_string()),
        ast::Value::List(_) => "a list".to_string(),
        ast::Value::Null => "null".to_string(),
        ast::Value::Object(_) => "an object".to_string(),
        ast::Value::String(s) => format!("\"{s}\""),
        ast::Value::Variable(name) => format!("${name}"),
    }
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CoercionError {
    #[error("`{field_name}` is required by input type `{type_name}` but was not provided")]
    MissingInputField {
        field_name: String,
        type_name: String,
    },

    #[error("`{0}` is not an input type")]
    NotAnInputType(String),

    #[error("null was provided where a value of type `{expected}` is required")]
    NullForNonNull {
        expected: String,
    },

    #[error("expected a value of type `{expected}`, found {found}")]
    TypeMismatch {
        expected: String,
        found: String,
    },

    #[error("`{value}` is not a value of enum `{enum_name}`")]
    UnknownEnumValue {
        enum_name: String,
        value: String,
    },

    #[error("input type `{type_name}` has no field named `{field_name}`")]
    UnknownInputField {
        field_name: String,
        type_name: String,
    },
}
impl CoercionError {
    /// The validation rule a literal with this problem violates.
    pub fn rule_reference(&self) -> &'static str {
        match self {
            Self::MissingInputField { .. } => "5.6.4",
            Self::UnknownInputField { .. } => "5.6.2",
            _ => "5.6.1",
        }
    }
}

#[cfg(test)]
mod tests;
