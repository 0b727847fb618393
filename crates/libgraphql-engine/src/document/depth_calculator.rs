use crate::document::DocumentPartKind;
use crate::document::PartId;
use crate::document::QueryDocument;
use std::collections::HashMap;
use std::collections::HashSet;

/// Recompute the document's max depth for operations whose depth can be
/// altered by fragment spreads. The document's depth is only ever raised by
/// this pass.
pub fn calculate_max_depth(document: &mut QueryDocument) {
    if document.named_fragments.is_empty() {
        return;
    }

    let ops_with_spreads: HashSet<PartId> = document.spreads.iter()
        .map(|spread_id| document.root_of(*spread_id))
        .collect();

    let mut walk = DepthWalk::default();
    let mut max_depth = document.max_depth;
    for (op_id, op) in document.operations() {
        if !ops_with_spreads.contains(&op_id) {
            continue;
        }
        if let Some(sel_set) = op.selection_set {
            max_depth = max_depth.max(selection_set_depth(document, sel_set, &mut walk));
        }
    }
    document.max_depth = max_depth;
}

/// Fragments currently on the walk stack, plus the depth of every fragment
/// already walked. Each fragment's selection set is walked at most once.
#[derive(Default)]
struct DepthWalk {
    fragment_depths: HashMap<PartId, usize>,
    walking: HashSet<PartId>,
}

fn selection_set_depth(
    document: &QueryDocument,
    sel_set_id: PartId,
    walk: &mut DepthWalk,
) -> usize {
    document.part(sel_set_id).children.iter()
        .map(|child| selection_depth(document, *child, walk))
        .max()
        .unwrap_or(0)
}

fn selection_depth(
    document: &QueryDocument,
    id: PartId,
    walk: &mut DepthWalk,
) -> usize {
    match &document.part(id).kind {
        DocumentPartKind::Field(field) => 1 + field.selection_set
            .map(|sel_set| selection_set_depth(document, sel_set, walk))
            .unwrap_or(0),

        DocumentPartKind::InlineFragment(inline) => inline.selection_set
            .map(|sel_set| selection_set_depth(document, sel_set, walk))
            .unwrap_or(0),

        DocumentPartKind::FragmentSpread(spread) => {
            let Some(fragment_id) = spread.fragment else {
                return 0;
            };
            if let Some(depth) = walk.fragment_depths.get(&fragment_id) {
                return *depth;
            }
            // A spread back into a fragment currently being walked is a cycle.
            if !walk.walking.insert(fragment_id) {
                return 0;
            }
            let depth = document.part(fragment_id).kind
                .as_named_fragment()
                .and_then(|fragment| fragment.selection_set)
                .map(|sel_set| selection_set_depth(document, sel_set, walk))
                .unwrap_or(0);
            walk.walking.remove(&fragment_id);
            walk.fragment_depths.insert(fragment_id, depth);
            depth
        },

        _ => 0,
    }
}
