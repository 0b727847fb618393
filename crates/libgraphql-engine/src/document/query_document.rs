use crate::document::DocumentPart;
use crate::document::DocumentPartKind;
use crate::document::NamedFragmentPart;
use crate::document::OperationPart;
use crate::document::PartId;
use crate::loc::SourceLocation;
use crate::messages::GraphMessageCollection;
use indexmap::IndexMap;

/// The schema-bound representation of a parsed query document.
///
/// Every part lives in a single arena and refers to its parent, children and
/// (for fragment spreads) its target fragment by [`PartId`].
#[derive(Clone, Debug, Default)]
pub struct QueryDocument {
    pub(crate) constructed: bool,
    pub(crate) fragment_definitions: Vec<PartId>,
    pub(crate) max_depth: usize,
    pub(crate) messages: GraphMessageCollection,
    pub(crate) named_fragments: IndexMap<String, PartId>,
    pub(crate) operations: Vec<PartId>,
    pub(crate) parts: Vec<DocumentPart>,
    pub(crate) spreads: Vec<PartId>,
}
impl QueryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn add_part(
        &mut self,
        parent: Option<PartId>,
        location: SourceLocation,
        kind: DocumentPartKind,
    ) -> PartId {
        let id = PartId(self.parts.len());
        self.parts.push(DocumentPart {
            children: vec![],
            invalid: false,
            kind,
            location,
            parent,
        });
        if let Some(parent_id) = parent {
            self.parts[parent_id.0].children.push(id);
        }
        id
    }

    pub(crate) fn part_mut(&mut self, id: PartId) -> &mut DocumentPart {
        &mut self.parts[id.0]
    }

    /// Every named fragment definition in declaration order, including
    /// definitions whose name duplicates an earlier one.
    pub fn fragment_definitions(&self) -> &[PartId] {
        self.fragment_definitions.as_slice()
    }

    /// The deepest field nesting found in any operation, counting through
    /// fragment spreads.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn messages(&self) -> &GraphMessageCollection {
        &self.messages
    }

    pub fn named_fragment(&self, name: &str) -> Option<(PartId, &NamedFragmentPart)> {
        let id = *self.named_fragments.get(name)?;
        self.part(id).kind.as_named_fragment().map(|fragment| (id, fragment))
    }

    pub fn named_fragments(&self) -> &IndexMap<String, PartId> {
        &self.named_fragments
    }

    /// Find an operation by name; `None` selects the anonymous operation.
    pub fn operation(&self, name: Option<&str>) -> Option<(PartId, &OperationPart)> {
        self.operations()
            .find(|(_, op)| op.name() == name)
    }

    pub fn operations(&self) -> impl Iterator<Item = (PartId, &OperationPart)> {
        self.operations.iter().filter_map(|id| {
            self.part(*id).kind.as_operation().map(|op| (*id, op))
        })
    }

    pub fn operation_ids(&self) -> &[PartId] {
        self.operations.as_slice()
    }

    pub fn part(&self, id: PartId) -> &DocumentPart {
        &self.parts[id.0]
    }

    pub fn parts(&self) -> &[DocumentPart] {
        self.parts.as_slice()
    }

    /// Every fragment spread encountered while constructing the document.
    pub fn spreads(&self) -> &[PartId] {
        self.spreads.as_slice()
    }

    /// The scope type of the selection set enclosing `id` (walking up
    /// through its ancestors).
    pub fn enclosing_scope_type(&self, id: PartId) -> Option<&str> {
        let mut current = self.part(id).parent;
        while let Some(ancestor) = current {
            let part = self.part(ancestor);
            if let DocumentPartKind::SelectionSet(sel_set) = &part.kind {
                return sel_set.scope_type();
            }
            current = part.parent;
        }
        None
    }

    /// The operation or named fragment at the root of the tree containing
    /// `id`.
    pub fn root_of(&self, id: PartId) -> PartId {
        let mut current = id;
        while let Some(parent) = self.part(current).parent {
            current = parent;
        }
        current
    }

    /// `false` when construction stopped early, leaving only part of the
    /// syntax tree in the document.
    pub fn is_fully_constructed(&self) -> bool {
        self.constructed
    }

    /// `true` when no critical message has been recorded.
    pub fn is_valid(&self) -> bool {
        self.messages.is_successful()
    }
}
