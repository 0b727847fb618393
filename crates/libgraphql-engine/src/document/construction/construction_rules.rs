use crate::OperationType;
use crate::ast;
use crate::document::ArgumentPart;
use crate::document::DirectivePart;
use crate::document::DocumentPartKind;
use crate::document::FieldPart;
use crate::document::FragmentSpreadPart;
use crate::document::InlineFragmentPart;
use crate::document::NamedFragmentPart;
use crate::document::OperationPart;
use crate::document::SelectionSetPart;
use crate::document::VariableDefinitionPart;
use crate::document::construction::ConstructionContext;
use crate::document::construction::SyntaxNode;
use crate::loc::SourceLocation;
use crate::messages::GraphMessage;
use crate::messages::codes;
use crate::rules::RuleStep;
use crate::schema::TypeAnnotation;

fn argument_parts(
    arguments: &[(String, ast::Value)],
    location: SourceLocation,
) -> Vec<ArgumentPart> {
    arguments.iter()
        .map(|(name, value)| ArgumentPart {
            location,
            name: name.to_string(),
            value: value.clone(),
        })
        .collect()
}

fn type_condition_name(type_condition: &ast::operation::TypeCondition) -> String {
    let ast::operation::TypeCondition::On(type_name) = type_condition;
    type_name.to_string()
}

pub(crate) struct CreateOperation;
impl<'a> RuleStep<ConstructionContext<'a>> for CreateOperation {
    fn execute(&self, ctx: &mut ConstructionContext<'a>) -> bool {
        let Some(SyntaxNode::Operation(op_def)) = ctx.node else {
            return false;
        };
        let (name, operation_type) = match op_def {
            ast::operation::OperationDefinition::Mutation(m) =>
                (m.name.clone(), OperationType::Mutation),
            ast::operation::OperationDefinition::Query(q) =>
                (q.name.clone(), OperationType::Query),
            ast::operation::OperationDefinition::SelectionSet(_) =>
                (None, OperationType::Query),
            ast::operation::OperationDefinition::Subscription(s) =>
                (s.name.clone(), OperationType::Subscription),
        };
        let root_type = ctx.schema.root_type(operation_type)
            .map(|root| root.name().to_string());
        let unsupported = root_type.is_none();

        let id = ctx.create_part(DocumentPartKind::Operation(OperationPart {
            directives: vec![],
            name,
            operation_type,
            root_type,
            selection_set: None,
            variables: vec![],
        }));
        ctx.document.operations.push(id);

        if unsupported {
            return ctx.fail(GraphMessage::critical(
                codes::INVALID_DOCUMENT,
                format!("The target schema does not support {operation_type} operations."),
            ));
        }
        true
    }
}

pub(crate) struct CreateVariableDefinition;
impl<'a> RuleStep<ConstructionContext<'a>> for CreateVariableDefinition {
    fn execute(&self, ctx: &mut ConstructionContext<'a>) -> bool {
        let Some(SyntaxNode::VariableDefinition(var_def)) = ctx.node else {
            return false;
        };
        let id = ctx.create_part(DocumentPartKind::VariableDefinition(VariableDefinitionPart {
            default_value: var_def.default_value.clone(),
            name: var_def.name.to_string(),
            type_annotation: TypeAnnotation::from_ast_type(&var_def.var_type),
        }));
        if let Some(parent) = ctx.parent
            && let DocumentPartKind::Operation(op) = &mut ctx.document.part_mut(parent).kind {
            op.variables.push(id);
        }
        true
    }
}

pub(crate) struct CreateDirective;
impl<'a> RuleStep<ConstructionContext<'a>> for CreateDirective {
    fn execute(&self, ctx: &mut ConstructionContext<'a>) -> bool {
        let (Some(SyntaxNode::Directive(directive)), Some(parent)) = (ctx.node, ctx.parent) else {
            return false;
        };
        let location = SourceLocation::from_ast_pos(&directive.position);
        let directive_location = ctx.document.part(parent).kind.directive_location();
        let id = ctx.create_part(DocumentPartKind::Directive(DirectivePart {
            arguments: argument_parts(&directive.arguments, location),
            directive_location,
            name: directive.name.to_string(),
        }));

        match &mut ctx.document.part_mut(parent).kind {
            DocumentPartKind::Field(field) => field.directives.push(id),
            DocumentPartKind::FragmentSpread(spread) => spread.directives.push(id),
            DocumentPartKind::InlineFragment(inline) => inline.directives.push(id),
            DocumentPartKind::NamedFragment(fragment) => fragment.directives.push(id),
            DocumentPartKind::Operation(op) => op.directives.push(id),
            _ => (),
        }
        true
    }
}

pub(crate) struct CreateSelectionSet;
impl<'a> RuleStep<ConstructionContext<'a>> for CreateSelectionSet {
    fn execute(&self, ctx: &mut ConstructionContext<'a>) -> bool {
        let Some(parent) = ctx.parent else {
            return false;
        };
        let scope_type = match &ctx.document.part(parent).kind {
            DocumentPartKind::Field(field) => field.field
                .as_ref()
                .map(|def| def.type_annotation().innermost_type_name().to_string()),
            DocumentPartKind::InlineFragment(inline) => match &inline.type_condition {
                Some(type_name) => Some(type_name.to_string()),
                None => ctx.document.enclosing_scope_type(parent).map(str::to_string),
            },
            DocumentPartKind::NamedFragment(fragment) => Some(fragment.type_condition.to_string()),
            DocumentPartKind::Operation(op) => op.root_type.clone(),
            _ => None,
        };

        let id = ctx.create_part(DocumentPartKind::SelectionSet(SelectionSetPart {
            scope_type,
        }));
        match &mut ctx.document.part_mut(parent).kind {
            DocumentPartKind::Field(field) => field.selection_set = Some(id),
            DocumentPartKind::InlineFragment(inline) => inline.selection_set = Some(id),
            DocumentPartKind::NamedFragment(fragment) => fragment.selection_set = Some(id),
            DocumentPartKind::Operation(op) => op.selection_set = Some(id),
            _ => (),
        }
        true
    }
}

pub(crate) struct CreateField;
impl<'a> RuleStep<ConstructionContext<'a>> for CreateField {
    fn execute(&self, ctx: &mut ConstructionContext<'a>) -> bool {
        let (Some(SyntaxNode::Field(ast_field)), Some(parent)) = (ctx.node, ctx.parent) else {
            return false;
        };
        let owner_type = ctx.document.part(parent).kind
            .as_selection_set()
            .and_then(|sel_set| sel_set.scope_type.clone());
        let field = owner_type.as_deref()
            .and_then(|owner| ctx.schema.field(owner, &ast_field.name))
            .cloned();
        let depth = ctx.enclosing_field_depth() + 1;

        let id = ctx.create_part(DocumentPartKind::Field(FieldPart {
            alias: ast_field.alias.clone(),
            arguments: argument_parts(
                &ast_field.arguments,
                SourceLocation::from_ast_pos(&ast_field.position),
            ),
            depth,
            directives: vec![],
            field,
            name: ast_field.name.to_string(),
            owner_type,
            selection_set: None,
        }));

        let root = ctx.document.root_of(id);
        if ctx.document.part(root).kind.as_operation().is_some() {
            ctx.document.max_depth = ctx.document.max_depth.max(depth);
        }
        true
    }
}

pub(crate) struct CreateInlineFragment;
impl<'a> RuleStep<ConstructionContext<'a>> for CreateInlineFragment {
    fn execute(&self, ctx: &mut ConstructionContext<'a>) -> bool {
        let Some(SyntaxNode::InlineFragment(inline)) = ctx.node else {
            return false;
        };
        ctx.create_part(DocumentPartKind::InlineFragment(InlineFragmentPart {
            directives: vec![],
            selection_set: None,
            type_condition: inline.type_condition.as_ref().map(type_condition_name),
        }));
        true
    }
}

pub(crate) struct CreateFragmentSpread;
impl<'a> RuleStep<ConstructionContext<'a>> for CreateFragmentSpread {
    fn execute(&self, ctx: &mut ConstructionContext<'a>) -> bool {
        let Some(SyntaxNode::FragmentSpread(spread)) = ctx.node else {
            return false;
        };
        ctx.create_part(DocumentPartKind::FragmentSpread(FragmentSpreadPart {
            directives: vec![],
            fragment: None,
            name: spread.fragment_name.to_string(),
        }));
        true
    }
}

/// Spreads are linked to their fragments only once the whole document has
/// been constructed, since a fragment may be declared after its use.
pub(crate) struct RecordFragmentSpread;
impl<'a> RuleStep<ConstructionContext<'a>> for RecordFragmentSpread {
    fn execute(&self, ctx: &mut ConstructionContext<'a>) -> bool {
        let Some(spread_id) = ctx.created else {
            return false;
        };
        ctx.document.spreads.push(spread_id);
        true
    }
}

pub(crate) struct CreateNamedFragment;
impl<'a> RuleStep<ConstructionContext<'a>> for CreateNamedFragment {
    fn execute(&self, ctx: &mut ConstructionContext<'a>) -> bool {
        let Some(SyntaxNode::FragmentDefinition(frag_def)) = ctx.node else {
            return false;
        };
        let id = ctx.create_part(DocumentPartKind::NamedFragment(NamedFragmentPart {
            directives: vec![],
            name: frag_def.name.to_string(),
            referenced: false,
            selection_set: None,
            type_condition: type_condition_name(&frag_def.type_condition),
        }));
        ctx.document.fragment_definitions.push(id);
        true
    }
}

/// The first definition of a name wins; later duplicates are reported during
/// validation.
pub(crate) struct RegisterNamedFragment;
impl<'a> RuleStep<ConstructionContext<'a>> for RegisterNamedFragment {
    fn execute(&self, ctx: &mut ConstructionContext<'a>) -> bool {
        let Some(id) = ctx.created else {
            return false;
        };
        let Some(name) = ctx.document.part(id).kind.as_named_fragment().map(|f| f.name.to_string()) else {
            return false;
        };
        ctx.document.named_fragments.entry(name).or_insert(id);
        true
    }
}
