//! Traversals over a constructed document that expand fragment spreads in
//! place, visiting each named fragment at most once per traversal.

use crate::document::DocumentPartKind;
use crate::document::PartId;
use crate::document::QueryDocument;
use std::collections::HashSet;

/// The fields selected directly by a selection set, including those
/// contributed by inline fragments and fragment spreads.
pub(crate) fn flatten_fields(document: &QueryDocument, sel_set_id: PartId) -> Vec<PartId> {
    let mut fields = vec![];
    let mut visited = HashSet::new();
    flatten_fields_impl(document, sel_set_id, &mut visited, &mut fields);
    fields
}

fn flatten_fields_impl(
    document: &QueryDocument,
    sel_set_id: PartId,
    visited: &mut HashSet<PartId>,
    fields: &mut Vec<PartId>,
) {
    for child in document.part(sel_set_id).children() {
        match &document.part(*child).kind {
            DocumentPartKind::Field(_) => fields.push(*child),

            DocumentPartKind::InlineFragment(inline) => {
                if let Some(nested) = inline.selection_set {
                    flatten_fields_impl(document, nested, visited, fields);
                }
            },

            DocumentPartKind::FragmentSpread(spread) => {
                if let Some(fragment_id) = spread.fragment
                    && visited.insert(fragment_id)
                    && let Some(nested) = document.part(fragment_id).kind
                        .as_named_fragment()
                        .and_then(|fragment| fragment.selection_set) {
                    flatten_fields_impl(document, nested, visited, fields);
                }
            },

            _ => (),
        }
    }
}

/// Every part beneath `root` (excluding `root` itself), descending into the
/// named fragments reached through spreads.
pub(crate) fn reachable_parts(document: &QueryDocument, root: PartId) -> Vec<PartId> {
    let mut parts = vec![];
    let mut visited = HashSet::new();
    let mut stack = vec![root];
    while let Some(id) = stack.pop() {
        for child in document.part(id).children().iter().rev() {
            parts.push(*child);
            stack.push(*child);
        }
        if let DocumentPartKind::FragmentSpread(spread) = &document.part(id).kind
            && let Some(fragment_id) = spread.fragment
            && visited.insert(fragment_id) {
            stack.push(fragment_id);
        }
    }
    parts
}

/// The named fragments reachable from `root` through spreads, transitively.
pub(crate) fn reachable_fragments(document: &QueryDocument, root: PartId) -> HashSet<PartId> {
    reachable_parts(document, root)
        .into_iter()
        .filter_map(|id| document.part(id).kind.as_fragment_spread()?.fragment)
        .collect()
}
