use crate::ast;
use crate::coercion::check_literal;
use crate::document::DocumentPartKind;
use crate::document::OperationPart;
use crate::document::PartId;
use crate::document::QueryDocument;
use crate::document::VariableDefinitionPart;
use crate::loc::SourceLocation;
use crate::rules::RuleStep;
use crate::schema::GraphType;
use crate::schema::InputValueDefinition;
use crate::schema::Schema;
use crate::schema::TypeAnnotation;
use crate::validation::ValidationContext;
use crate::validation::document_walk::reachable_parts;
use indexmap::IndexMap;
use std::collections::HashSet;

/// One reference to a variable from an argument value.
struct VariableUsage {
    expected_type: Option<TypeAnnotation>,
    location: SourceLocation,
    location_has_default: bool,
    name: String,
}

/// Every variable usage within an operation (including the fragments it
/// spreads), paired with the input type expected where it appears.
fn collect_usages(document: &QueryDocument, schema: &Schema, op_id: PartId) -> Vec<VariableUsage> {
    let mut usages = vec![];
    for id in reachable_parts(document, op_id) {
        let part = document.part(id);
        let (arguments, definitions) = match part.kind() {
            DocumentPartKind::Directive(directive) => (
                directive.arguments(),
                schema.directive(directive.name()).map(|def| def.arguments()),
            ),
            DocumentPartKind::Field(field) => (
                field.arguments(),
                field.field().map(|def| def.arguments()),
            ),
            _ => continue,
        };
        for arg in arguments {
            let definition = definitions.and_then(|defs| defs.get(arg.name()));
            collect_value_usages(arg.value(), definition, arg.location(), schema, &mut usages);
        }
    }
    usages
}

fn collect_value_usages(
    value: &ast::Value,
    definition: Option<&InputValueDefinition>,
    location: SourceLocation,
    schema: &Schema,
    usages: &mut Vec<VariableUsage>,
) {
    collect_nested_usages(
        value,
        definition.map(|def| def.type_annotation()),
        definition.is_some_and(|def| def.default_value().is_some()),
        location,
        schema,
        usages,
    );
}

fn collect_nested_usages(
    value: &ast::Value,
    expected_type: Option<&TypeAnnotation>,
    location_has_default: bool,
    location: SourceLocation,
    schema: &Schema,
    usages: &mut Vec<VariableUsage>,
) {
    match value {
        ast::Value::Variable(name) => usages.push(VariableUsage {
            expected_type: expected_type.cloned(),
            location,
            location_has_default,
            name: name.to_string(),
        }),

        ast::Value::List(items) => {
            let item_type = expected_type
                .and_then(|annot| annot.as_list_annotation())
                .map(|list| list.inner_type_annotation())
                // A single value may stand in for a list of one.
                .or(expected_type);
            for item in items {
                collect_nested_usages(item, item_type, false, location, schema, usages);
            }
        },

        ast::Value::Object(fields) => {
            let input_fields = expected_type
                .and_then(|annot| schema.lookup_type(annot.innermost_type_name()))
                .and_then(|graph_type| match graph_type {
                    GraphType::InputObject(inputobj) => Some(inputobj.fields()),
                    _ => None,
                });
            for (field_name, field_value) in fields {
                let field_def = input_fields.and_then(|defs| defs.get(field_name));
                collect_value_usages(field_value, field_def, location, schema, usages);
            }
        },

        _ => (),
    }
}

fn variable_definitions<'a>(
    document: &'a QueryDocument,
    op: &OperationPart,
) -> IndexMap<&'a str, &'a VariableDefinitionPart> {
    let mut definitions = IndexMap::new();
    for var_id in op.variables() {
        if let Some(var_def) = document.part(*var_id).kind().as_variable_definition() {
            definitions.entry(var_def.name()).or_insert(var_def);
        }
    }
    definitions
}

fn current_operation<'a>(ctx: &ValidationContext<'a>) -> Option<(PartId, &'a OperationPart)> {
    let (id, part) = ctx.current()?;
    part.kind().as_operation().map(|op| (id, op))
}

fn operation_label(op: &OperationPart) -> String {
    match op.name() {
        Some(name) => format!("operation `{name}`"),
        None => "the anonymous operation".to_string(),
    }
}

/// https://spec.graphql.org/October2021/#sec-Variable-Uniqueness
pub(crate) struct VariableUniqueness;
impl<'a> RuleStep<ValidationContext<'a>> for VariableUniqueness {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((_, op)) = current_operation(ctx) else {
            return true;
        };
        let document = ctx.document;
        let mut seen = HashSet::new();
        let mut passed = true;
        for var_id in op.variables() {
            let part = document.part(*var_id);
            if let Some(var_def) = part.kind().as_variable_definition()
                && !seen.insert(var_def.name()) {
                passed = ctx.fail(
                    "5.8.1",
                    part.location(),
                    format!("Variable `${}` is defined more than once.", var_def.name()),
                );
            }
        }
        passed
    }
}

/// https://spec.graphql.org/October2021/#sec-Variables-Are-Input-Types
pub(crate) struct VariablesAreInputTypes;
impl<'a> RuleStep<ValidationContext<'a>> for VariablesAreInputTypes {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((_, part)) = ctx.current() else {
            return true;
        };
        let Some(var_def) = part.kind().as_variable_definition() else {
            return true;
        };
        let type_name = var_def.type_annotation().innermost_type_name();
        if ctx.schema.lookup_type(type_name).is_some_and(GraphType::is_input_type) {
            return true;
        }
        ctx.fail(
            "5.8.2",
            part.location(),
            format!(
                "Variable `${}` cannot be of non-input type `{}`.",
                var_def.name(),
                var_def.type_annotation(),
            ),
        )
    }
}

/// Default values declared on variables must be valid for the variable's
/// type.
///
/// https://spec.graphql.org/October2021/#sec-Values-of-Correct-Type
pub(crate) struct VariableDefaultValues;
impl<'a> RuleStep<ValidationContext<'a>> for VariableDefaultValues {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((_, part)) = ctx.current() else {
            return true;
        };
        let Some(var_def) = part.kind().as_variable_definition() else {
            return true;
        };
        let Some(default_value) = var_def.default_value() else {
            return true;
        };
        match check_literal(default_value, var_def.type_annotation(), ctx.schema) {
            Ok(()) => true,
            Err(err) => ctx.fail(
                err.rule_reference(),
                part.location(),
                format!("Invalid default value for variable `${}`: {err}.", var_def.name()),
            ),
        }
    }
}

/// https://spec.graphql.org/October2021/#sec-All-Variable-Uses-Defined
pub(crate) struct AllVariableUsesDefined;
impl<'a> RuleStep<ValidationContext<'a>> for AllVariableUsesDefined {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((op_id, op)) = current_operation(ctx) else {
            return true;
        };
        let document = ctx.document;
        let definitions = variable_definitions(document, op);
        let mut reported = HashSet::new();
        let mut passed = true;
        for usage in collect_usages(document, ctx.schema, op_id) {
            if definitions.contains_key(usage.name.as_str()) || !reported.insert(usage.name.clone()) {
                continue;
            }
            passed = ctx.fail(
                "5.8.3",
                usage.location,
                format!("Variable `${}` is not defined by {}.", usage.name, operation_label(op)),
            );
        }
        passed
    }
}

/// https://spec.graphql.org/October2021/#sec-All-Variables-Used
pub(crate) struct AllVariablesUsed;
impl<'a> RuleStep<ValidationContext<'a>> for AllVariablesUsed {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((op_id, op)) = current_operation(ctx) else {
            return true;
        };
        let document = ctx.document;
        let used: HashSet<String> = collect_usages(document, ctx.schema, op_id)
            .into_iter()
            .map(|usage| usage.name)
            .collect();
        let mut passed = true;
        for var_id in op.variables() {
            let part = document.part(*var_id);
            if let Some(var_def) = part.kind().as_variable_definition()
                && !used.contains(var_def.name()) {
                passed = ctx.fail(
                    "5.8.4",
                    part.location(),
                    format!("Variable `${}` is never used in {}.", var_def.name(), operation_label(op)),
                );
            }
        }
        passed
    }
}

/// https://spec.graphql.org/October2021/#sec-All-Variable-Usages-are-Allowed
pub(crate) struct AllVariableUsagesAllowed;
impl<'a> RuleStep<ValidationContext<'a>> for AllVariableUsagesAllowed {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((op_id, op)) = current_operation(ctx) else {
            return true;
        };
        let document = ctx.document;
        let definitions = variable_definitions(document, op);
        let mut passed = true;
        for usage in collect_usages(document, ctx.schema, op_id) {
            let (Some(var_def), Some(location_type)) = (
                definitions.get(usage.name.as_str()),
                usage.expected_type.as_ref(),
            ) else {
                continue;
            };
            let var_type = var_def.type_annotation();
            let has_non_null_default = var_def.default_value()
                .is_some_and(|value| !matches!(value, ast::Value::Null));
            let allowed = if !location_type.nullable() && var_type.nullable() {
                (has_non_null_default || usage.location_has_default)
                    && var_type.is_compatible_with(&location_type.as_nullable())
            } else {
                var_type.is_compatible_with(location_type)
            };
            if !allowed {
                passed = ctx.fail(
                    "5.8.5",
                    usage.location,
                    format!(
                        "Variable `${}` of type `{var_type}` cannot be used where \
                        `{location_type}` is expected.",
                        usage.name,
                    ),
                );
            }
        }
        passed
    }
}
