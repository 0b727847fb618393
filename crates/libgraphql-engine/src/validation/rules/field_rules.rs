use crate::ast;
use crate::document::DocumentPartKind;
use crate::document::FieldPart;
use crate::document::PartId;
use crate::rules::RuleStep;
use crate::schema::GraphType;
use crate::schema::Schema;
use crate::schema::TypeAnnotation;
use crate::validation::ValidationContext;
use crate::validation::document_walk::flatten_fields;
use indexmap::IndexMap;

/// https://spec.graphql.org/October2021/#sec-Field-Selections
pub(crate) struct FieldSelectionsOnType;
impl<'a> RuleStep<ValidationContext<'a>> for FieldSelectionsOnType {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((_, part)) = ctx.current() else {
            return true;
        };
        let DocumentPartKind::Field(field) = part.kind() else {
            return true;
        };
        if field.field().is_some() {
            return true;
        }
        let owner = field.owner_type().unwrap_or("<unknown>");
        ctx.fail(
            "5.3.1",
            part.location(),
            format!("Cannot query field `{}` on type `{owner}`.", field.name()),
        )
    }
}

/// https://spec.graphql.org/October2021/#sec-Leaf-Field-Selections
pub(crate) struct LeafFieldSelections;
impl<'a> RuleStep<ValidationContext<'a>> for LeafFieldSelections {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((_, part)) = ctx.current() else {
            return true;
        };
        let Some(field) = part.kind().as_field() else {
            return true;
        };
        let Some(field_def) = field.field() else {
            return true;
        };
        let type_name = field_def.type_annotation().innermost_type_name();
        let Some(field_type) = ctx.schema.lookup_type(type_name) else {
            return true;
        };

        match (field_type.is_leaf(), field.selection_set().is_some()) {
            (true, true) => ctx.fail(
                "5.3.3",
                part.location(),
                format!(
                    "Field `{}` returns the leaf type `{type_name}` and must not have a \
                    selection set.",
                    field.name(),
                ),
            ),
            (false, false) => ctx.fail(
                "5.3.3",
                part.location(),
                format!(
                    "Field `{}` returns the composite type `{type_name}` and must have a \
                    selection set.",
                    field.name(),
                ),
            ),
            _ => true,
        }
    }
}

/// https://spec.graphql.org/October2021/#sec-Field-Selection-Merging
///
/// Fields sharing a response name within one selection set (including those
/// contributed by fragments) must select the same field with the same
/// arguments when they could apply to the same object, and must always
/// produce compatible response shapes.
pub(crate) struct FieldSelectionMerging;
impl<'a> RuleStep<ValidationContext<'a>> for FieldSelectionMerging {
    fn execute(&self, ctx: &mut ValidationContext<'a>) -> bool {
        let Some((sel_set_id, part)) = ctx.current() else {
            return true;
        };
        if part.kind().as_selection_set().is_none() {
            return true;
        }

        let document = ctx.document;
        let mut by_response_name: IndexMap<&str, Vec<(PartId, &FieldPart)>> = IndexMap::new();
        for field_id in flatten_fields(document, sel_set_id) {
            if let Some(field) = document.part(field_id).kind().as_field() {
                by_response_name.entry(field.response_name())
                    .or_default()
                    .push((field_id, field));
            }
        }

        let mut passed = true;
        for (response_name, fields) in &by_response_name {
            let Some(((_, first), rest)) = fields.split_first() else {
                continue;
            };
            for (field_id, other) in rest {
                if let Some(reason) = conflict_reason(ctx.schema, first, other) {
                    passed = ctx.fail(
                        "5.3.2",
                        document.part(*field_id).location(),
                        format!("Fields `{response_name}` conflict because {reason}."),
                    );
                }
            }
        }
        passed
    }
}

fn conflict_reason(schema: &Schema, a: &FieldPart, b: &FieldPart) -> Option<String> {
    let is_object = |owner: Option<&str>| {
        owner.is_some_and(|name| matches!(schema.lookup_type(name), Some(GraphType::Object(_))))
    };
    let may_share_object = a.owner_type() == b.owner_type()
        || !is_object(a.owner_type())
        || !is_object(b.owner_type());

    if may_share_object {
        if a.name() != b.name() {
            return Some(format!(
                "`{}` and `{}` are different fields",
                a.name(),
                b.name(),
            ));
        }
        if !same_arguments(a, b) {
            return Some("they have differing arguments".to_string());
        }
    }

    if let (Some(def_a), Some(def_b)) = (a.field(), b.field())
        && !same_response_shape(schema, def_a.type_annotation(), def_b.type_annotation()) {
        return Some(format!(
            "they return conflicting types `{}` and `{}`",
            def_a.type_annotation(),
            def_b.type_annotation(),
        ));
    }
    None
}

fn same_arguments(a: &FieldPart, b: &FieldPart) -> bool {
    let values_a: IndexMap<&str, &ast::Value> = a.arguments().iter()
        .map(|arg| (arg.name(), arg.value()))
        .collect();
    let values_b: IndexMap<&str, &ast::Value> = b.arguments().iter()
        .map(|arg| (arg.name(), arg.value()))
        .collect();
    values_a == values_b
}

fn same_response_shape(schema: &Schema, a: &TypeAnnotation, b: &TypeAnnotation) -> bool {
    if a.nullable() != b.nullable() {
        return false;
    }
    match (a, b) {
        (TypeAnnotation::List(list_a), TypeAnnotation::List(list_b)) => same_response_shape(
            schema,
            list_a.inner_type_annotation(),
            list_b.inner_type_annotation(),
        ),
        (TypeAnnotation::Named(named_a), TypeAnnotation::Named(named_b)) => {
            let is_leaf = |name: &str| schema.lookup_type(name).is_some_and(GraphType::is_leaf);
            let name_a = named_a.graphql_type_name();
            let name_b = named_b.graphql_type_name();
            if is_leaf(name_a) || is_leaf(name_b) {
                name_a == name_b
            } else {
                true
            }
        },
        _ => false,
    }
}
