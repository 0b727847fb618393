use crate::rules::RuleStep;
use crate::validation::ValidationContext;
use crate::validation::document_walk::reachable_fragments;
use std::collections::HashSet;

/// https://spec.graphql.org/October2021/#sec-Operation-Name-Uniqueness
pub(crate) struct OperationNameUniqueness;
impl<'a> RuleStep<ValidationContext<'a>> for OperationNameUniqueness {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let document = ctx.document;
        let mut seen = HashSet::new();
        let mut passed = true;
        for (op_id, op) in document.operations() {
            if let Some(name) = op.name()
                && !seen.insert(name) {
                passed = ctx.fail(
                    "5.2.1.1",
                    document.part(op_id).location(),
                    format!("Multiple operations are named `{name}`."),
                );
            }
        }
        passed
    }
}

/// https://spec.graphql.org/October2021/#sec-Lone-Anonymous-Operation
pub(crate) struct LoneAnonymousOperation;
impl<'a> RuleStep<ValidationContext<'a>> for LoneAnonymousOperation {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let document = ctx.document;
        if document.operation_ids().len() < 2 {
            return true;
        }
        let mut passed = true;
        for (op_id, op) in document.operations() {
            if op.name().is_none() {
                passed = ctx.fail(
                    "5.2.2.1",
                    document.part(op_id).location(),
                    "An anonymous operation must be the only operation in its document.",
                );
            }
        }
        passed
    }
}

/// https://spec.graphql.org/October2021/#sec-Fragment-Name-Uniqueness
pub(crate) struct FragmentNameUniqueness;
impl<'a> RuleStep<ValidationContext<'a>> for FragmentNameUniqueness {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let document = ctx.document;
        let mut seen = HashSet::new();
        let mut passed = true;
        for fragment_id in document.fragment_definitions() {
            let part = document.part(*fragment_id);
            if let Some(fragment) = part.kind().as_named_fragment()
                && !seen.insert(fragment.name()) {
                passed = ctx.fail(
                    "5.5.1.1",
                    part.location(),
                    format!("Multiple fragments are named `{}`.", fragment.name()),
                );
            }
        }
        passed
    }
}

/// https://spec.graphql.org/October2021/#sec-Fragments-Must-Be-Used
pub(crate) struct FragmentsMustBeUsed;
impl<'a> RuleStep<ValidationContext<'a>> for FragmentsMustBeUsed {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let document = ctx.document;
        let used: HashSet<_> = document.operation_ids().iter()
            .flat_map(|op_id| reachable_fragments(document, *op_id))
            .collect();

        let mut passed = true;
        for (name, fragment_id) in document.named_fragments() {
            if !used.contains(fragment_id) {
                passed = ctx.fail(
                    "5.5.1.4",
                    document.part(*fragment_id).location(),
                    format!("The fragment `{name}` is never used."),
                );
            }
        }
        passed
    }
}

/// https://spec.graphql.org/October2021/#sec-Fragment-spreads-must-not-form-cycles
pub(crate) struct FragmentSpreadsMustNotFormCycles;
impl<'a> RuleStep<ValidationContext<'a>> for FragmentSpreadsMustNotFormCycles {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let document = ctx.document;
        let mut passed = true;
        for (name, fragment_id) in document.named_fragments() {
            if reachable_fragments(document, *fragment_id).contains(fragment_id) {
                passed = ctx.fail(
                    "5.5.2.2",
                    document.part(*fragment_id).location(),
                    format!("The fragment `{name}` spreads itself, directly or indirectly."),
                );
            }
        }
        passed
    }
}
