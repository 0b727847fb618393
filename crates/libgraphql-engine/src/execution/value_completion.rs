use crate::loc::SourceLocation;
use crate::messages::GraphMessage;
use crate::messages::ResponsePath;
use crate::messages::codes;
use crate::schema::FieldDefinition;
use crate::schema::GraphType;
use crate::schema::Schema;
use crate::schema::TypeAnnotation;
use serde_json::Map;
use serde_json::Number;
use serde_json::Value;

const VALUE_COMPLETION_RULE: &str = "6.4.3";

/// A null reached a position that may not hold one. The message explaining
/// why has already been recorded; the nearest nullable ancestor absorbs it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bubble;

pub(crate) type Completed = Result<Value, Bubble>;

/// A source value some selection set is resolved against.
#[derive(Clone, Debug)]
pub(crate) struct ParentItem {
    pub(crate) object_type: String,
    pub(crate) path: ResponsePath,
    pub(crate) value: Value,
}

/// A resolved value checked against its field's type, with every composite
/// value replaced by the index of the [`ParentItem`] its sub-selection will
/// be resolved from.
#[derive(Debug)]
pub(crate) enum Shape {
    Failed,
    Leaf(Value),
    List(Vec<Shape>),
    Null,
    Object(usize),
}

/// The value a field takes when it cannot be resolved.
pub(crate) fn null_for(annot: &TypeAnnotation) -> Completed {
    if annot.nullable() { Ok(Value::Null) } else { Err(Bubble) }
}

pub(crate) struct ShapeBuilder<'a> {
    pub(crate) children: Vec<ParentItem>,
    pub(crate) field: &'a FieldDefinition,
    pub(crate) location: SourceLocation,
    pub(crate) messages: Vec<GraphMessage>,
    pub(crate) schema: &'a Schema,
}
impl<'a> ShapeBuilder<'a> {
    pub(crate) fn new(field: &'a FieldDefinition, location: SourceLocation, schema: &'a Schema) -> Self {
        Self {
            children: vec![],
            field,
            location,
            messages: vec![],
            schema,
        }
    }

    pub(crate) fn shape(&mut self, annot: &TypeAnnotation, value: Value, path: &ResponsePath) -> Shape {
        if value.is_null() {
            if !annot.nullable() {
                self.invalid(path, format!(
                    "Cannot return null for non-nullable field `{}.{}`",
                    self.field.owner_type(),
                    self.field.name(),
                ));
            }
            return Shape::Null;
        }

        let named = match annot {
            TypeAnnotation::List(list) => return match value {
                Value::Array(items) => Shape::List(
                    items.into_iter()
                        .enumerate()
                        .map(|(idx, item)| {
                            self.shape(list.inner_type_annotation(), item, &path.with_index(idx))
                        })
                        .collect(),
                ),
                _ => {
                    self.invalid(path, format!(
                        "Expected a list for field `{}.{}` of type `{annot}`",
                        self.field.owner_type(),
                        self.field.name(),
                    ));
                    Shape::Failed
                },
            },
            TypeAnnotation::Named(named) => named,
        };

        let type_name = named.graphql_type_name();
        match self.schema.lookup_type(type_name) {
            Some(graph_type) if graph_type.is_leaf() => match serialize_leaf(graph_type, value) {
                Ok(value) => Shape::Leaf(value),
                Err(found) => {
                    self.invalid(path, format!(
                        "`{found}` is not a valid `{type_name}` value for field `{}.{}`",
                        self.field.owner_type(),
                        self.field.name(),
                    ));
                    Shape::Failed
                },
            },

            Some(graph_type) if graph_type.is_composite() => {
                match self.schema.resolve_concrete_type(type_name, &value) {
                    Some(object_type) => {
                        self.children.push(ParentItem {
                            object_type,
                            path: path.clone(),
                            value,
                        });
                        Shape::Object(self.children.len() - 1)
                    },
                    None => {
                        self.invalid(path, format!(
                            "Could not determine which `{type_name}` member type the value of \
                            `{}.{}` is",
                            self.field.owner_type(),
                            self.field.name(),
                        ));
                        Shape::Failed
                    },
                }
            },

            _ => {
                self.invalid(path, format!("`{type_name}` is not an output type"));
                Shape::Failed
            },
        }
    }

    fn invalid(&mut self, path: &ResponsePath, message: String) {
        self.messages.push(
            GraphMessage::critical(codes::INVALID_RESULT, message)
                .with_location(self.location)
                .with_path(path.clone())
                .with_rule(VALUE_COMPLETION_RULE),
        );
    }
}

/// Turn a shape back into a response value, taking each composite value's
/// resolved sub-selection out of `children`. A null in a non-null position
/// becomes a [`Bubble`] which the nearest nullable position turns into null.
pub(crate) fn assemble(
    shape: Shape,
    annot: &TypeAnnotation,
    children: &mut [Option<Result<Map<String, Value>, Bubble>>],
) -> Completed {
    let completed = match shape {
        Shape::Failed => Err(Bubble),
        Shape::Leaf(value) => Ok(value),
        Shape::List(items) => {
            let inner = match annot {
                TypeAnnotation::List(list) => list.inner_type_annotation(),
                named => named,
            };
            items.into_iter()
                .map(|item| assemble(item, inner, children))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        },
        Shape::Null => Ok(Value::Null),
        Shape::Object(idx) => children.get_mut(idx)
            .and_then(Option::take)
            .unwrap_or(Err(Bubble))
            .map(Value::Object),
    };
    match completed {
        Ok(Value::Null) if !annot.nullable() => Err(Bubble),
        Err(Bubble) if annot.nullable() => Ok(Value::Null),
        other => other,
    }
}

/// Write a field's value under its response name, combining it with a
/// value already written there by another selection of the same field.
pub(crate) fn merge_response_value(object: &mut Map<String, Value>, key: &str, value: Value) {
    let Some(existing) = object.get_mut(key) else {
        object.insert(key.to_string(), value);
        return;
    };
    merge_values(existing, value);
}

fn merge_values(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (name, value) in incoming {
                merge_response_value(existing, &name, value);
            }
        },
        (Value::Array(existing), Value::Array(incoming)) if existing.len() == incoming.len() => {
            for (slot, value) in existing.iter_mut().zip(incoming) {
                merge_values(slot, value);
            }
        },
        (existing, incoming) => *existing = incoming,
    }
}

/// Serialize a resolved value as the given scalar or enum type. Returns the
/// offending value's text on failure.
pub(crate) fn serialize_leaf(graph_type: &GraphType, value: Value) -> Result<Value, String> {
    let serialized = match graph_type {
        GraphType::Enum(enum_type) => match &value {
            Value::String(name) if enum_type.values().contains(name) => Some(value.clone()),
            _ => None,
        },
        GraphType::Scalar(scalar) => match (scalar.name(), &value) {
            ("Boolean", Value::Bool(_)) => Some(value.clone()),
            ("Float", Value::Number(num)) => num.as_f64()
                .and_then(Number::from_f64)
                .map(Value::Number),
            ("ID", Value::String(_)) => Some(value.clone()),
            ("ID", Value::Number(num)) if num.is_i64() || num.is_u64() =>
                Some(Value::String(num.to_string())),
            ("Int", Value::Number(num)) => as_i32(num).map(Value::from),
            ("String", Value::String(_)) => Some(value.clone()),
            ("String", Value::Bool(b)) => Some(Value::String(b.to_string())),
            ("String", Value::Number(num)) => Some(Value::String(num.to_string())),
            ("Boolean" | "Float" | "ID" | "Int" | "String", _) => None,
            _ => Some(value.clone()),
        },
        _ => None,
    };
    serialized.ok_or_else(|| value.to_string())
}

fn as_i32(num: &Number) -> Option<i32> {
    if let Some(int) = num.as_i64() {
        return i32::try_from(int).ok();
    }
    let float = num.as_f64()?;
    if float.fract() == 0.0 && float >= f64::from(i32::MIN) && float <= f64::from(i32::MAX) {
        Some(float as i32)
    } else {
        None
    }
}
