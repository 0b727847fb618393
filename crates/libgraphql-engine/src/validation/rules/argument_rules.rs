use crate::coercion::check_literal;
use crate::document::ArgumentPart;
use crate::document::DocumentPartKind;
use crate::loc::SourceLocation;
use crate::rules::RuleStep;
use crate::schema::InputValueDefinition;
use crate::validation::ValidationContext;
use indexmap::IndexMap;
use std::collections::HashSet;

/// The arguments supplied to the current field or directive, alongside the
/// definitions they are supplied for (when the field or directive is known).
struct ArgumentScope<'a> {
    definitions: Option<&'a IndexMap<String, InputValueDefinition>>,
    description: String,
    location: SourceLocation,
    supplied: &'a [ArgumentPart],
}

fn argument_scope<'a>(ctx: &ValidationContext<'a>) -> Option<ArgumentScope<'a>> {
    let (_, part) = ctx.current()?;
    let schema = ctx.schema;
    match part.kind() {
        DocumentPartKind::Directive(directive) => Some(ArgumentScope {
            definitions: schema.directive(directive.name()).map(|def| def.arguments()),
            description: format!("directive `@{}`", directive.name()),
            location: part.location(),
            supplied: directive.arguments(),
        }),
        DocumentPartKind::Field(field) => Some(ArgumentScope {
            definitions: field.field().map(|def| def.arguments()),
            description: format!("field `{}`", field.name()),
            location: part.location(),
            supplied: field.arguments(),
        }),
        _ => None,
    }
}

/// https://spec.graphql.org/October2021/#sec-Argument-Names
pub(crate) struct ArgumentNames;
impl<'a> RuleStep<ValidationContext<'a>> for ArgumentNames {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some(scope) = argument_scope(ctx) else {
            return true;
        };
        let Some(definitions) = scope.definitions else {
            return true;
        };
        let mut passed = true;
        for arg in scope.supplied {
            if !definitions.contains_key(arg.name()) {
                passed = ctx.fail(
                    "5.4.1",
                    arg.location(),
                    format!("Unknown argument `{}` on {}.", arg.name(), scope.description),
                );
            }
        }
        passed
    }
}

/// https://spec.graphql.org/October2021/#sec-Argument-Uniqueness
pub(crate) struct ArgumentUniqueness;
impl<'a> RuleStep<ValidationContext<'a>> for ArgumentUniqueness {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some(scope) = argument_scope(ctx) else {
            return true;
        };
        let mut seen = HashSet::new();
        let mut passed = true;
        for arg in scope.supplied {
            if !seen.insert(arg.name()) {
                passed = ctx.fail(
                    "5.4.2",
                    arg.location(),
                    format!("Argument `{}` is supplied more than once to {}.", arg.name(), scope.description),
                );
            }
        }
        passed
    }
}

/// https://spec.graphql.org/October2021/#sec-Required-Arguments
pub(crate) struct RequiredArguments;
impl<'a> RuleStep<ValidationContext<'a>> for RequiredArguments {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some(scope) = argument_scope(ctx) else {
            return true;
        };
        let Some(definitions) = scope.definitions else {
            return true;
        };
        let mut passed = true;
        for (name, def) in definitions {
            if !def.is_required() {
                continue;
            }
            let supplied = scope.supplied.iter().find(|arg| arg.name() == name);
            let missing = match supplied {
                None => true,
                Some(arg) => matches!(arg.value(), crate::ast::Value::Null),
            };
            if missing {
                passed = ctx.fail(
                    "5.4.2.1",
                    scope.location,
                    format!(
                        "Argument `{name}` of type `{}` is required on {}.",
                        def.type_annotation(),
                        scope.description,
                    ),
                );
            }
        }
        passed
    }
}

/// https://spec.graphql.org/October2021/#sec-Values-of-Correct-Type
/// (along with input object field names and required input object fields)
pub(crate) struct ArgumentValues;
impl<'a> RuleStep<ValidationContext<'a>> for ArgumentValues {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some(scope) = argument_scope(ctx) else {
            return true;
        };
        let Some(definitions) = scope.definitions else {
            return true;
        };
        let schema = ctx.schema;
        let mut passed = true;
        for arg in scope.supplied {
            let Some(def) = definitions.get(arg.name()) else {
                continue;
            };
            // A missing required value is reported by RequiredArguments.
            if def.is_required() && matches!(arg.value(), crate::ast::Value::Null) {
                continue;
            }
            if let Err(err) = check_literal(arg.value(), def.type_annotation(), schema) {
                passed = ctx.fail(
                    err.rule_reference(),
                    arg.location(),
                    format!("Invalid value for argument `{}` of {}: {err}.", arg.name(), scope.description),
                );
            }
        }
        passed
    }
}
