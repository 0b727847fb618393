use crate::document::DocumentPartKind;
use crate::document::PartId;
use crate::document::QueryDocument;
use crate::document::construction::SyntaxNode;
use crate::messages::GraphMessage;
use crate::schema::Schema;

/// The state shared by construction rule steps while a syntax tree is walked.
/// `node` and `parent` are updated by the engine before each node's steps
/// run; a step that creates a part records it in `created` so the node's
/// children are attached beneath it.
pub(crate) struct ConstructionContext<'a> {
    pub(crate) created: Option<PartId>,
    pub(crate) document: &'a mut QueryDocument,
    pub(crate) node: Option<SyntaxNode<'a>>,
    pub(crate) parent: Option<PartId>,
    pub(crate) schema: &'a Schema,
}
impl<'a> ConstructionContext<'a> {
    pub(crate) fn new(document: &'a mut QueryDocument, schema: &'a Schema) -> Self {
        Self {
            created: None,
            document,
            node: None,
            parent: None,
            schema,
        }
    }

    pub(crate) fn create_part(&mut self, kind: DocumentPartKind) -> PartId {
        let location = self.node
            .map(|node| node.location())
            .unwrap_or_default();
        let id = self.document.add_part(self.parent, location, kind);
        self.created = Some(id);
        id
    }

    pub(crate) fn fail(&mut self, message: GraphMessage) -> bool {
        let message = match self.node {
            Some(node) => message.with_location(node.location()),
            None => message,
        };
        self.document.messages.add(message);
        false
    }

    /// The depth of the nearest field above the part being created, or 0
    /// when there is none.
    pub(crate) fn enclosing_field_depth(&self) -> usize {
        let mut current = self.parent;
        while let Some(id) = current {
            let part = self.document.part(id);
            if let DocumentPartKind::Field(field) = &part.kind {
                return field.depth;
            }
            current = part.parent;
        }
        0
    }
}
