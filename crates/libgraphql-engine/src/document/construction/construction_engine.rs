use crate::ast;
use crate::document::PartId;
use crate::document::QueryDocument;
use crate::document::construction::ConstructionContext;
use crate::document::construction::SyntaxNode;
use crate::document::construction::SyntaxNodeKind;
use crate::document::construction::construction_rules::*;
use crate::rules::RuleProcessor;
use crate::schema::Schema;
use std::collections::HashMap;

/// Walks a parsed query document once, pre-order, building the
/// [`QueryDocument`]'s parts by running the construction rules registered for
/// each kind of syntax node.
#[derive(Clone, Copy, Debug, Default)]
pub struct DocumentConstructionEngine;
impl DocumentConstructionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Returns `true` when every node was constructed. On failure the partial
    /// document and its messages are retained.
    pub fn construct(
        &self,
        syntax_tree: &ast::operation::Document,
        document: &mut QueryDocument,
        schema: &Schema,
    ) -> bool {
        let processors = construction_processors();
        let mut ctx = ConstructionContext::new(document, schema);
        for def in &syntax_tree.definitions {
            if !visit(&processors, &mut ctx, SyntaxNode::from_definition(def), None) {
                tracing::debug!(
                    messages = ctx.document.messages.len(),
                    "document construction aborted",
                );
                return false;
            }
        }
        true
    }
}

fn construction_processors<'a>()
    -> HashMap<SyntaxNodeKind, RuleProcessor<ConstructionContext<'a>>>
{
    HashMap::from([
        (SyntaxNodeKind::Directive, RuleProcessor::new().with_step(CreateDirective)),
        (SyntaxNodeKind::Field, RuleProcessor::new().with_step(CreateField)),
        (SyntaxNodeKind::FragmentDefinition, RuleProcessor::new().with_chain(vec![
            Box::new(CreateNamedFragment),
            Box::new(RegisterNamedFragment),
        ])),
        (SyntaxNodeKind::FragmentSpread, RuleProcessor::new().with_chain(vec![
            Box::new(CreateFragmentSpread),
            Box::new(RecordFragmentSpread),
        ])),
        (SyntaxNodeKind::InlineFragment, RuleProcessor::new().with_step(CreateInlineFragment)),
        (SyntaxNodeKind::Operation, RuleProcessor::new().with_step(CreateOperation)),
        (SyntaxNodeKind::SelectionSet, RuleProcessor::new().with_step(CreateSelectionSet)),
        (
            SyntaxNodeKind::VariableDefinition,
            RuleProcessor::new().with_step(CreateVariableDefinition),
        ),
    ])
}

fn visit<'a>(
    processors: &HashMap<SyntaxNodeKind, RuleProcessor<ConstructionContext<'a>>>,
    ctx: &mut ConstructionContext<'a>,
    node: SyntaxNode<'a>,
    parent: Option<PartId>,
) -> bool {
    ctx.created = None;
    ctx.node = Some(node);
    ctx.parent = parent;

    if let Some(processor) = processors.get(&node.kind())
        && !processor.execute(ctx) {
        return false;
    }

    let created = ctx.created.or(parent);
    node.children()
        .into_iter()
        .all(|child| visit(processors, ctx, child, created))
}
