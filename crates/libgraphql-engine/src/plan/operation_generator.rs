use crate::InputValue;
use crate::OperationType;
use crate::document::DocumentPartKind;
use crate::document::PartId;
use crate::document::QueryDocument;
use crate::messages::GraphMessage;
use crate::messages::GraphMessageCollection;
use crate::messages::codes;
use crate::plan::ExecutableOperation;
use crate::plan::ExecutionDirective;
use crate::plan::FieldInvocationContext;
use crate::schema::Schema;
use indexmap::IndexSet;
use std::collections::HashMap;
use std::collections::HashSet;

/// Converts an operation of a validated [`QueryDocument`] into an
/// [`ExecutableOperation`]: a tree of [`FieldInvocationContext`]s with
/// fragments expanded in place.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExecutableOperationGenerator;
impl ExecutableOperationGenerator {
    pub fn new() -> Self {
        Self
    }

    pub fn generate(
        &self,
        document: &QueryDocument,
        operation_id: PartId,
        schema: &Schema,
    ) -> ExecutableOperation {
        let part = document.part(operation_id);
        let mut messages = GraphMessageCollection::new();
        let Some(op) = part.kind().as_operation() else {
            messages.add(
                GraphMessage::critical(codes::INVALID_DOCUMENT, "The part is not an operation.")
                    .with_location(part.location()),
            );
            return ExecutableOperation {
                estimated_complexity: 0.0,
                fields: vec![],
                messages,
                name: None,
                operation_type: OperationType::Query,
                root_type: None,
                variables: vec![],
            };
        };

        let variables = op.variables()
            .iter()
            .filter_map(|id| document.part(*id).kind().as_variable_definition())
            .cloned()
            .collect();
        let mut generated = ExecutableOperation {
            estimated_complexity: 0.0,
            fields: vec![],
            messages,
            name: op.name().map(str::to_string),
            operation_type: op.operation_type(),
            root_type: op.root_type().map(str::to_string),
            variables,
        };

        if part.is_invalid() || op.root_type().is_none() {
            generated.messages.add(
                GraphMessage::critical(
                    codes::INVALID_DOCUMENT,
                    format!(
                        "Operation `{}` is not valid and cannot be executed.",
                        op.name().unwrap_or("<anonymous>"),
                    ),
                ).with_location(part.location()),
            );
            return generated;
        }

        if let (Some(sel_set), Some(root_type)) = (op.selection_set(), op.root_type()) {
            let scope = schema.possible_types(root_type);
            let mut generator = Generator {
                document,
                expanded_fragments: HashMap::new(),
                messages: &mut generated.messages,
                schema,
                spreads_walking: HashSet::new(),
            };
            generator.collect(sel_set, &scope, None, &[], &mut generated.fields);
        }
        tracing::trace!(
            operation = generated.name.as_deref().unwrap_or("<anonymous>"),
            fields = generated.fields.len(),
            "generated executable operation",
        );
        generated
    }
}

/// A named fragment expanded against a particular scope and type
/// restriction. Both are kept in schema order.
#[derive(Eq, Hash, PartialEq)]
struct FragmentExpansionKey {
    fragment: PartId,
    restriction: Option<Vec<String>>,
    scope: Vec<String>,
}

struct Generator<'a> {
    document: &'a QueryDocument,
    /// The contexts each fragment expanded to, before the directives of the
    /// spread that reached it are applied.
    expanded_fragments: HashMap<FragmentExpansionKey, Vec<FieldInvocationContext>>,
    messages: &'a mut GraphMessageCollection,
    schema: &'a Schema,
    spreads_walking: HashSet<PartId>,
}
impl Generator<'_> {
    /// Collect the field contexts produced by a selection set into `out`,
    /// expanding inline fragments and spreads at their position. `scope`
    /// holds the object types the enclosing field may resolve to.
    fn collect(
        &mut self,
        sel_set_id: PartId,
        scope: &IndexSet<String>,
        type_restriction: Option<&IndexSet<String>>,
        inherited_directives: &[ExecutionDirective],
        out: &mut Vec<FieldInvocationContext>,
    ) {
        let document = self.document;
        for child_id in document.part(sel_set_id).children() {
            let child = document.part(*child_id);
            match child.kind() {
                DocumentPartKind::Field(field) => {
                    let Some(field_def) = field.field() else {
                        self.messages.add(
                            GraphMessage::critical(
                                codes::INVALID_DOCUMENT,
                                format!(
                                    "Field `{}` is not defined on type `{}`.",
                                    field.name(),
                                    field.owner_type().unwrap_or("<unknown>"),
                                ),
                            ).with_location(child.location()),
                        );
                        continue;
                    };

                    let mut directives = inherited_directives.to_vec();
                    directives.extend(self.directives(field.directives()));
                    let mut children = vec![];
                    if let Some(nested) = field.selection_set() {
                        let nested_scope = self.schema.possible_types(
                            field_def.type_annotation().innermost_type_name(),
                        );
                        self.collect(nested, &nested_scope, None, &[], &mut children);
                    }

                    push_context(out, FieldInvocationContext {
                        arguments: field.arguments()
                            .iter()
                            .map(|arg| (arg.name().to_string(), InputValue::from_ast(arg.value())))
                            .collect(),
                        children,
                        directives,
                        field: field_def.clone(),
                        location: child.location(),
                        response_name: field.response_name().to_string(),
                        type_restriction: type_restriction.cloned(),
                    });
                },

                DocumentPartKind::InlineFragment(inline) => {
                    let Some(nested) = inline.selection_set() else {
                        continue;
                    };
                    let restriction = match inline.type_condition() {
                        Some(type_name) => self.restrict(scope, type_restriction, type_name),
                        None => type_restriction.cloned(),
                    };
                    let mut directives = inherited_directives.to_vec();
                    directives.extend(self.directives(inline.directives()));
                    self.collect(nested, scope, restriction.as_ref(), &directives, out);
                },

                DocumentPartKind::FragmentSpread(spread) => {
                    let Some(fragment_id) = spread.fragment() else {
                        continue;
                    };
                    let Some(fragment) = document.part(fragment_id).kind().as_named_fragment() else {
                        continue;
                    };
                    let Some(nested) = fragment.selection_set() else {
                        continue;
                    };
                    let restriction = self.restrict(scope, type_restriction, fragment.type_condition());
                    let key = FragmentExpansionKey {
                        fragment: fragment_id,
                        restriction: restriction.as_ref().map(|types| types.iter().cloned().collect()),
                        scope: scope.iter().cloned().collect(),
                    };
                    let expanded = match self.expanded_fragments.get(&key) {
                        Some(contexts) => contexts.clone(),
                        None => {
                            if !self.spreads_walking.insert(fragment_id) {
                                continue;
                            }
                            let mut contexts = vec![];
                            self.collect(nested, scope, restriction.as_ref(), &[], &mut contexts);
                            self.spreads_walking.remove(&fragment_id);
                            self.expanded_fragments.insert(key, contexts.clone());
                            contexts
                        },
                    };

                    let mut directives = inherited_directives.to_vec();
                    directives.extend(self.directives(spread.directives()));
                    directives.extend(self.directives(fragment.directives()));
                    for mut context in expanded {
                        if !directives.is_empty() {
                            let own = std::mem::take(&mut context.directives);
                            context.directives = directives.iter().cloned().chain(own).collect();
                        }
                        push_context(out, context);
                    }
                },

                _ => (),
            }
        }
    }

    fn directives(&self, directive_ids: &[PartId]) -> Vec<ExecutionDirective> {
        directive_ids.iter()
            .filter_map(|id| {
                let part = self.document.part(*id);
                match part.kind() {
                    DocumentPartKind::Directive(directive) =>
                        Some(ExecutionDirective::from_part(directive, part.location())),
                    _ => None,
                }
            })
            .collect()
    }

    /// Narrow `current` to the object types a fragment on `type_condition`
    /// applies to. A restriction covering the whole scope is dropped.
    fn restrict(
        &self,
        scope: &IndexSet<String>,
        current: Option<&IndexSet<String>>,
        type_condition: &str,
    ) -> Option<IndexSet<String>> {
        let possible = self.schema.possible_types(type_condition);
        let restricted: IndexSet<String> = match current {
            Some(current) => current.intersection(&possible).cloned().collect(),
            None => possible,
        };
        if scope.is_subset(&restricted) {
            None
        } else {
            Some(restricted)
        }
    }
}

fn push_context(out: &mut Vec<FieldInvocationContext>, context: FieldInvocationContext) {
    match out.iter_mut().find(|existing| existing.can_merge_with(&context)) {
        Some(existing) => {
            for child in context.children {
                push_context(&mut existing.children, child);
            }
        },
        None => out.push(context),
    }
}
