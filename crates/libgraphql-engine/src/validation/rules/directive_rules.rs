use crate::document::DirectivePart;
use crate::document::DocumentPartKind;
use crate::document::PartId;
use crate::rules::RuleStep;
use crate::validation::ValidationContext;

fn current_directive<'a>(ctx: &ValidationContext<'a>) -> Option<(PartId, &'a DirectivePart)> {
    let (id, part) = ctx.current()?;
    match part.kind() {
        DocumentPartKind::Directive(directive) => Some((id, directive)),
        _ => None,
    }
}

/// https://spec.graphql.org/October2021/#sec-Directives-Are-Defined
pub(crate) struct DirectivesAreDefined;
impl<'a> RuleStep<ValidationContext<'a>> for DirectivesAreDefined {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((id, directive)) = current_directive(ctx) else {
            return true;
        };
        if ctx.schema.directive(directive.name()).is_some() {
            return true;
        }
        ctx.fail(
            "5.7.1",
            ctx.document.part(id).location(),
            format!("Unknown directive `@{}`.", directive.name()),
        )
    }
}

/// https://spec.graphql.org/October2021/#sec-Directives-Are-In-Valid-Locations
pub(crate) struct DirectivesInValidLocations;
impl<'a> RuleStep<ValidationContext<'a>> for DirectivesInValidLocations {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((id, directive)) = current_directive(ctx) else {
            return true;
        };
        let (Some(definition), Some(location)) = (
            ctx.schema.directive(directive.name()),
            directive.directive_location(),
        ) else {
            return true;
        };
        if definition.is_valid_at(location) {
            return true;
        }
        ctx.fail(
            "5.7.2",
            ctx.document.part(id).location(),
            format!("Directive `@{}` may not be used on {location}.", directive.name()),
        )
    }
}

/// https://spec.graphql.org/October2021/#sec-Directives-Are-Unique-Per-Location
///
/// Only the second and later occurrences of a non-repeatable directive are
/// reported.
pub(crate) struct DirectivesUniquePerLocation;
impl<'a> RuleStep<ValidationContext<'a>> for DirectivesUniquePerLocation {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((id, directive)) = current_directive(ctx) else {
            return true;
        };
        let Some(definition) = ctx.schema.directive(directive.name()) else {
            return true;
        };
        if definition.is_repeatable() {
            return true;
        }
        let document = ctx.document;
        let Some(parent) = document.part(id).parent() else {
            return true;
        };
        let duplicated = document.part(parent).children().iter()
            .take_while(|sibling| **sibling != id)
            .filter_map(|sibling| match document.part(*sibling).kind() {
                DocumentPartKind::Directive(other) => Some(other),
                _ => None,
            })
            .any(|other| other.name() == directive.name());
        if !duplicated {
            return true;
        }
        ctx.fail(
            "5.7.3",
            document.part(id).location(),
            format!("The directive `@{}` can only be used once at this location.", directive.name()),
        )
    }
}
