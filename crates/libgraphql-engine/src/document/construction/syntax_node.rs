use crate::ast;
use crate::loc::SourceLocation;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum SyntaxNodeKind {
    Directive,
    Field,
    FragmentDefinition,
    FragmentSpread,
    InlineFragment,
    Operation,
    SelectionSet,
    VariableDefinition,
}

/// A borrowed view of one node of a parsed query document.
#[derive(Clone, Copy, Debug)]
pub(crate) enum SyntaxNode<'a> {
    Directive(&'a ast::operation::Directive),
    Field(&'a ast::operation::Field),
    FragmentDefinition(&'a ast::operation::FragmentDefinition),
    FragmentSpread(&'a ast::operation::FragmentSpread),
    InlineFragment(&'a ast::operation::InlineFragment),
    Operation(&'a ast::operation::OperationDefinition),
    SelectionSet(&'a ast::operation::SelectionSet),
    VariableDefinition(&'a ast::operation::VariableDefinition),
}
impl<'a> SyntaxNode<'a> {
    pub(crate) fn from_definition(def: &'a ast::operation::Definition) -> Self {
        match def {
            ast::operation::Definition::Fragment(frag_def) => Self::FragmentDefinition(frag_def),
            ast::operation::Definition::Operation(op_def) => Self::Operation(op_def),
        }
    }

    pub(crate) fn kind(&self) -> SyntaxNodeKind {
        match self {
            Self::Directive(_) => SyntaxNodeKind::Directive,
            Self::Field(_) => SyntaxNodeKind::Field,
            Self::FragmentDefinition(_) => SyntaxNodeKind::FragmentDefinition,
            Self::FragmentSpread(_) => SyntaxNodeKind::FragmentSpread,
            Self::InlineFragment(_) => SyntaxNodeKind::InlineFragment,
            Self::Operation(_) => SyntaxNodeKind::Operation,
            Self::SelectionSet(_) => SyntaxNodeKind::SelectionSet,
            Self::VariableDefinition(_) => SyntaxNodeKind::VariableDefinition,
        }
    }

    pub(crate) fn location(&self) -> SourceLocation {
        let pos = match self {
            Self::Directive(directive) => &directive.position,
            Self::Field(field) => &field.position,
            Self::FragmentDefinition(frag_def) => &frag_def.position,
            Self::FragmentSpread(spread) => &spread.position,
            Self::InlineFragment(inline) => &inline.position,
            Self::Operation(op_def) => match op_def {
                ast::operation::OperationDefinition::Mutation(m) => &m.position,
                ast::operation::OperationDefinition::Query(q) => &q.position,
                ast::operation::OperationDefinition::SelectionSet(s) => &s.span.0,
                ast::operation::OperationDefinition::Subscription(s) => &s.position,
            },
            Self::SelectionSet(sel_set) => &sel_set.span.0,
            Self::VariableDefinition(var_def) => &var_def.position,
        };
        SourceLocation::from_ast_pos(pos)
    }

    /// The child nodes to visit beneath this node, in document order.
    pub(crate) fn children(&self) -> Vec<SyntaxNode<'a>> {
        let mut children = vec![];
        match *self {
            Self::Directive(_) | Self::VariableDefinition(_) => (),

            Self::Field(field) => {
                children.extend(field.directives.iter().map(Self::Directive));
                if !field.selection_set.items.is_empty() {
                    children.push(Self::SelectionSet(&field.selection_set));
                }
            },

            Self::FragmentDefinition(frag_def) => {
                children.extend(frag_def.directives.iter().map(Self::Directive));
                children.push(Self::SelectionSet(&frag_def.selection_set));
            },

            Self::FragmentSpread(spread) =>
                children.extend(spread.directives.iter().map(Self::Directive)),

            Self::InlineFragment(inline) => {
                children.extend(inline.directives.iter().map(Self::Directive));
                children.push(Self::SelectionSet(&inline.selection_set));
            },

            Self::Operation(op_def) => {
                let (var_defs, directives, sel_set) = match op_def {
                    ast::operation::OperationDefinition::Mutation(m) =>
                        (m.variable_definitions.as_slice(), m.directives.as_slice(), &m.selection_set),
                    ast::operation::OperationDefinition::Query(q) =>
                        (q.variable_definitions.as_slice(), q.directives.as_slice(), &q.selection_set),
                    ast::operation::OperationDefinition::SelectionSet(s) =>
                        (&[][..], &[][..], s),
                    ast::operation::OperationDefinition::Subscription(s) =>
                        (s.variable_definitions.as_slice(), s.directives.as_slice(), &s.selection_set),
                };
                children.extend(var_defs.iter().map(Self::VariableDefinition));
                children.extend(directives.iter().map(Self::Directive));
                children.push(Self::SelectionSet(sel_set));
            },

            Self::SelectionSet(sel_set) => {
                for selection in &sel_set.items {
                    children.push(match selection {
                        ast::operation::Selection::Field(field) => Self::Field(field),
                        ast::operation::Selection::FragmentSpread(spread) =>
                            Self::FragmentSpread(spread),
                        ast::operation::Selection::InlineFragment(inline) =>
                            Self::InlineFragment(inline),
                    });
                }
            },
        }
        children
    }
}
