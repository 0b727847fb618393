use crate::InputValue;
use crate::coercion::CoercionError;
use crate::coercion::coerce_value;
use crate::execution::ServiceProvider;
use crate::execution::services::InjectedServices;
use crate::plan::ExecutionDirective;
use crate::schema::FieldDefinition;
use crate::schema::InputValueDefinition;
use crate::schema::Schema;
use indexmap::IndexMap;
use serde_json::Map;
use serde_json::Value;
use thiserror::Error;

type Result<T> = std::result::Result<T, ArgumentResolutionError>;

/// The values bound to a field's resolver parameters for one request.
#[derive(Clone, Debug, Default)]
pub(crate) struct ResolvedArguments {
    pub(crate) services: InjectedServices,
    pub(crate) values: Map<String, Value>,
}

/// Bind a field's parameters. Each parameter takes the first of: a service
/// registered under its name, the value supplied in the query (variables
/// substituted), the schema-declared default. A non-null parameter left
/// without a value is an error.
pub(crate) fn resolve_field_arguments(
    field: &FieldDefinition,
    supplied: &IndexMap<String, InputValue>,
    variables: &Map<String, Value>,
    services: &ServiceProvider,
    schema: &Schema,
) -> Result<ResolvedArguments> {
    let mut injected = InjectedServices::default();
    for service_name in field.services() {
        let service = services.get_any(service_name).ok_or_else(|| {
            ArgumentResolutionError::ServiceNotRegistered {
                field: qualified_name(field),
                service: service_name.to_string(),
            }
        })?;
        injected.0.insert(service_name.to_string(), service);
    }

    let values = resolve_input_values(
        &qualified_name(field),
        field.arguments(),
        supplied,
        variables,
        schema,
        |name| injected.0.contains_key(name),
    )?;

    Ok(ResolvedArguments {
        services: injected,
        values,
    })
}

/// Bind a directive's arguments, falling back to the directive definition's
/// defaults.
pub(crate) fn resolve_directive_arguments(
    directive: &ExecutionDirective,
    variables: &Map<String, Value>,
    schema: &Schema,
) -> Result<Map<String, Value>> {
    match schema.directive(directive.name()) {
        Some(definition) => resolve_input_values(
            &format!("@{}", directive.name()),
            definition.arguments(),
            directive.arguments(),
            variables,
            schema,
            |_| false,
        ),
        None => Ok(directive.resolve_arguments(variables)),
    }
}

fn resolve_input_values(
    owner: &str,
    definitions: &IndexMap<String, InputValueDefinition>,
    supplied: &IndexMap<String, InputValue>,
    variables: &Map<String, Value>,
    schema: &Schema,
    is_injected: impl Fn(&str) -> bool,
) -> Result<Map<String, Value>> {
    let mut values = Map::new();
    for (name, definition) in definitions {
        if is_injected(name) {
            continue;
        }
        let value = supplied.get(name)
            .and_then(|input| input.resolve(variables))
            .or_else(|| {
                definition.default_value()
                    .and_then(|default| InputValue::from_ast(default).resolve(&Map::new()))
            });
        match value {
            Some(value) => {
                let coerced = coerce_value(&value, definition.type_annotation(), schema)
                    .map_err(|source| ArgumentResolutionError::InvalidValue {
                        argument: name.to_string(),
                        owner: owner.to_string(),
                        source,
                    })?;
                values.insert(name.to_string(), coerced);
            },
            None if !definition.type_annotation().nullable() =>
                return Err(ArgumentResolutionError::MissingRequiredArgument {
                    argument: name.to_string(),
                    owner: owner.to_string(),
                }),
            None => (),
        }
    }
    Ok(values)
}

fn qualified_name(field: &FieldDefinition) -> String {
    format!("{}.{}", field.owner_type(), field.name())
}

#[derive(Debug, Error)]
pub enum ArgumentResolutionError {
    #[error("argument `{argument}` of `{owner}` has an invalid value: {source}")]
    InvalidValue {
        argument: String,
        owner: String,
        #[source]
        source: CoercionError,
    },

    #[error("argument `{argument}` of `{owner}` is required but no value was provided")]
    MissingRequiredArgument {
        argument: String,
        owner: String,
    },

    #[error("`{field}` requires the `{service}` service but none is registered")]
    ServiceNotRegistered {
        field: String,
        service: String,
    },
}
