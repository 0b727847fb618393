use crate::document::DocumentPartKind;
use crate::document::QueryDocument;
use crate::messages::GraphMessage;
use crate::messages::codes;

/// Resolves every recorded fragment spread to its named fragment.
///
/// Returns `false` when any spread names a fragment the document never
/// defines; each such spread is marked invalid and reported.
pub fn link_fragments(document: &mut QueryDocument) -> bool {
    let mut all_linked = true;

    for spread_id in document.spreads.clone() {
        let (assigned, name) = match &document.part(spread_id).kind {
            DocumentPartKind::FragmentSpread(spread) => (spread.fragment, spread.name.to_string()),
            _ => continue,
        };

        let target = assigned.or_else(|| document.named_fragments.get(&name).copied());
        let Some(fragment_id) = target else {
            let spread_part = document.part_mut(spread_id);
            spread_part.invalid = true;
            let location = spread_part.location;
            document.messages.add(
                GraphMessage::critical(
                    codes::INVALID_DOCUMENT,
                    format!("The fragment `{name}` is spread but never defined."),
                )
                .with_rule("5.5.2.1")
                .with_location(location),
            );
            all_linked = false;
            continue;
        };

        if let DocumentPartKind::FragmentSpread(spread) = &mut document.part_mut(spread_id).kind {
            spread.fragment = Some(fragment_id);
        }
        if let DocumentPartKind::NamedFragment(fragment) = &mut document.part_mut(fragment_id).kind {
            fragment.referenced = true;
        }
    }

    all_linked
}
