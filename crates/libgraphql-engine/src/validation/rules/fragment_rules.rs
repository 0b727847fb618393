use crate::document::DocumentPartKind;
use crate::rules::RuleStep;
use crate::validation::ValidationContext;

/// The type condition named by the current inline fragment or named
/// fragment, if it has one.
fn type_condition<'a>(ctx: &ValidationContext<'a>) -> Option<&'a str> {
    let (_, part) = ctx.current()?;
    match part.kind() {
        DocumentPartKind::InlineFragment(inline) => inline.type_condition(),
        DocumentPartKind::NamedFragment(fragment) => Some(fragment.type_condition()),
        _ => None,
    }
}

/// https://spec.graphql.org/October2021/#sec-Fragment-Spread-Type-Existence
pub(crate) struct FragmentTypeExists;
impl<'a> RuleStep<ValidationContext<'a>> for FragmentTypeExists {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some(type_name) = type_condition(ctx) else {
            return true;
        };
        if ctx.schema.lookup_type(type_name).is_some() {
            return true;
        }
        let Some((_, part)) = ctx.current() else {
            return true;
        };
        ctx.fail(
            "5.5.1.2",
            part.location(),
            format!("Fragment type condition `{type_name}` is not defined by the schema."),
        )
    }
}

/// https://spec.graphql.org/October2021/#sec-Fragments-On-Composite-Types
pub(crate) struct FragmentOnCompositeType;
impl<'a> RuleStep<ValidationContext<'a>> for FragmentOnCompositeType {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some(type_name) = type_condition(ctx) else {
            return true;
        };
        let Some(graph_type) = ctx.schema.lookup_type(type_name) else {
            return true;
        };
        if graph_type.is_composite() {
            return true;
        }
        let Some((_, part)) = ctx.current() else {
            return true;
        };
        ctx.fail(
            "5.5.1.3",
            part.location(),
            format!(
                "Fragments may only be declared on object, interface or union types, but \
                `{type_name}` is a {}.",
                graph_type.kind(),
            ),
        )
    }
}

/// https://spec.graphql.org/October2021/#sec-Fragment-spread-is-possible
pub(crate) struct FragmentSpreadIsPossible;
impl<'a> RuleStep<ValidationContext<'a>> for FragmentSpreadIsPossible {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((part_id, part)) = ctx.current() else {
            return true;
        };
        let document = ctx.document;
        let (fragment_type, description) = match part.kind() {
            DocumentPartKind::InlineFragment(inline) => match inline.type_condition() {
                Some(type_name) => (type_name, "Inline fragment".to_string()),
                None => return true,
            },
            DocumentPartKind::FragmentSpread(spread) => {
                let Some(fragment) = spread.fragment()
                    .and_then(|id| document.part(id).kind().as_named_fragment()) else {
                    return true;
                };
                (fragment.type_condition(), format!("Fragment `{}`", spread.name()))
            },
            _ => return true,
        };
        let Some(parent_type) = document.enclosing_scope_type(part_id) else {
            return true;
        };
        let schema = ctx.schema;
        if schema.lookup_type(fragment_type).is_none()
            || schema.lookup_type(parent_type).is_none()
            || schema.types_overlap(parent_type, fragment_type) {
            return true;
        }
        ctx.fail(
            "5.5.2.3",
            part.location(),
            format!(
                "{description} on type `{fragment_type}` can never be spread within \
                type `{parent_type}`.",
            ),
        )
    }
}
