use crate::document::DocumentPartKind;
use crate::document::PartId;
use crate::document::QueryDocument;
use crate::rules::RuleProcessor;
use crate::schema::Schema;
use crate::validation::ValidationContext;
use crate::validation::rules::*;

/// Runs the schema-aware validation rules over a constructed
/// [`QueryDocument`].
///
/// Every rule is attempted so that as many errors as possible surface in a
/// single pass. A part that fails one of its own rules is marked invalid and,
/// unless it is an operation, the parts beneath it are not validated.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentValidationEngine;
impl DocumentValidationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` when no rule failed. Failures are appended to the
    /// document's messages.
    pub fn validate(&self, document: &mut QueryDocument, schema: &Schema) -> bool {
        let mut invalid_parts = vec![];
        let (passed, messages) = {
            let processors = ValidationProcessors::new();
            let mut ctx = ValidationContext::new(document, schema);
            let mut passed = processors.document.execute(&mut ctx);
            let readonly_document = ctx.document;
            let roots = readonly_document.operation_ids().iter()
                .chain(readonly_document.fragment_definitions())
                .copied();
            for root in roots {
                passed &= visit(&processors, &mut ctx, root, &mut invalid_parts);
            }
            (passed, ctx.messages)
        };

        if !passed {
            tracing::debug!(
                failures = messages.len(),
                invalid_parts = invalid_parts.len(),
                "document failed validation",
            );
        }
        for id in invalid_parts {
            document.part_mut(id).invalid = true;
        }
        document.messages.add_range(messages);
        passed
    }
}

struct ValidationProcessors<'a> {
    directive: RuleProcessor<ValidationContext<'a>>,
    document: RuleProcessor<ValidationContext<'a>>,
    field: RuleProcessor<ValidationContext<'a>>,
    fragment_spread: RuleProcessor<ValidationContext<'a>>,
    inline_fragment: RuleProcessor<ValidationContext<'a>>,
    named_fragment: RuleProcessor<ValidationContext<'a>>,
    operation: RuleProcessor<ValidationContext<'a>>,
    selection_set: RuleProcessor<ValidationContext<'a>>,
    variable_definition: RuleProcessor<ValidationContext<'a>>,
}
impl<'a> ValidationProcessors<'a> {
    fn new() -> Self {
        Self {
            directive: RuleProcessor::new()
                .with_chain(vec![
                    Box::new(DirectivesAreDefined),
                    Box::new(DirectivesInValidLocations),
                    Box::new(DirectivesUniquePerLocation),
                ])
                .with_step(ArgumentNames)
                .with_step(ArgumentUniqueness)
                .with_step(RequiredArguments)
                .with_step(ArgumentValues),

            document: RuleProcessor::new()
                .with_step(OperationNameUniqueness)
                .with_step(LoneAnonymousOperation)
                .with_step(FragmentNameUniqueness)
                .with_step(FragmentsMustBeUsed)
                .with_step(FragmentSpreadsMustNotFormCycles),

            field: RuleProcessor::new()
                .with_chain(vec![
                    Box::new(FieldSelectionsOnType),
                    Box::new(LeafFieldSelections),
                ])
                .with_step(ArgumentNames)
                .with_step(ArgumentUniqueness)
                .with_step(RequiredArguments)
                .with_step(ArgumentValues),

            fragment_spread: RuleProcessor::new()
                .with_step(FragmentSpreadIsPossible),

            inline_fragment: RuleProcessor::new()
                .with_chain(vec![
                    Box::new(FragmentTypeExists),
                    Box::new(FragmentOnCompositeType),
                    Box::new(FragmentSpreadIsPossible),
                ]),

            named_fragment: RuleProcessor::new()
                .with_chain(vec![
                    Box::new(FragmentTypeExists),
                    Box::new(FragmentOnCompositeType),
                ]),

            operation: RuleProcessor::new()
                .with_step(SubscriptionSingleRootField)
                .with_step(VariableUniqueness)
                .with_step(AllVariableUsesDefined)
                .with_step(AllVariablesUsed)
                .with_step(AllVariableUsagesAllowed),

            selection_set: RuleProcessor::new()
                .with_step(FieldSelectionMerging),

            variable_definition: RuleProcessor::new()
                .with_chain(vec![
                    Box::new(VariablesAreInputTypes),
                    Box::new(VariableDefaultValues),
                ]),
        }
    }

    fn for_kind(&self, kind: &DocumentPartKind) -> &RuleProcessor<ValidationContext<'a>> {
        match kind {
            DocumentPartKind::Directive(_) => &self.directive,
            DocumentPartKind::Field(_) => &self.field,
            DocumentPartKind::FragmentSpread(_) => &self.fragment_spread,
            DocumentPartKind::InlineFragment(_) => &self.inline_fragment,
            DocumentPartKind::NamedFragment(_) => &self.named_fragment,
            DocumentPartKind::Operation(_) => &self.operation,
            DocumentPartKind::SelectionSet(_) => &self.selection_set,
            DocumentPartKind::VariableDefinition(_) => &self.variable_definition,
        }
    }
}

fn visit<'a>(
    processors: &ValidationProcessors<'a>,
    ctx: &mut ValidationContext<'a>,
    id: PartId,
    invalid_parts: &mut Vec<PartId>,
) -> bool {
    let document = ctx.document;
    let part = document.part(id);
    if part.is_invalid() {
        return false;
    }

    ctx.part = Some(id);
    let mut passed = processors.for_kind(part.kind()).execute(ctx);
    if !passed {
        invalid_parts.push(id);
        // Operation-level failures leave its selections intact.
        if part.kind().as_operation().is_none() {
            return false;
        }
    }

    for child in part.children() {
        passed &= visit(processors, ctx, *child, invalid_parts);
    }
    passed
}
