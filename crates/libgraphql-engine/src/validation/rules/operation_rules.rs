use crate::OperationType;
use crate::document::DocumentPartKind;
use crate::rules::RuleStep;
use crate::validation::ValidationContext;
use crate::validation::document_walk::flatten_fields;

/// https://spec.graphql.org/October2021/#sec-Single-root-field
pub(crate) struct SubscriptionSingleRootField;
impl<'a> RuleStep<ValidationContext<'a>> for SubscriptionSingleRootField {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((op_id, part)) = ctx.current() else {
            return true;
        };
        let DocumentPartKind::Operation(op) = part.kind() else {
            return true;
        };
        if op.operation_type() != OperationType::Subscription {
            return true;
        }
        let Some(sel_set) = op.selection_set() else {
            return true;
        };

        let root_fields = flatten_fields(ctx.document, sel_set).len();
        if root_fields != 1 {
            return ctx.fail(
                "5.2.3.1",
                ctx.document.part(op_id).location(),
                format!(
                    "A subscription must select exactly one root field, but {} were selected.",
                    root_fields,
                ),
            );
        }
        true
    }
}
