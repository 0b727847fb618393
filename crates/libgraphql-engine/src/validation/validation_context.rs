use crate::document::DocumentPart;
use crate::document::PartId;
use crate::document::QueryDocument;
use crate::loc::SourceLocation;
use crate::messages::GraphMessage;
use crate::messages::GraphMessageCollection;
use crate::messages::codes;
use crate::schema::Schema;

/// The state shared by validation rule steps. The document is read-only;
/// failures are gathered here and applied to the document once the pass is
/// over.
pub(crate) struct ValidationContext<'a> {
    pub(crate) document: &'a QueryDocument,
    pub(crate) messages: GraphMessageCollection,
    pub(crate) part: Option<PartId>,
    pub(crate) schema: &'a Schema,
}
impl<'a> ValidationContext<'a> {
    pub(crate) fn new(document: &'a QueryDocument, schema: &'a Schema) -> Self {
        Self {
            document,
            messages: GraphMessageCollection::new(),
            part: None,
            schema,
        }
    }

    /// The part currently being validated. Only `None` while document-level
    /// rules run.
    pub(crate) fn current(&self) -> Option<(PartId, &'a DocumentPart)> {
        let document = self.document;
        self.part.map(|id| (id, document.part(id)))
    }

    /// Record a rule violation and report the step as failed.
    pub(crate) fn fail(
        &mut self,
        rule: &str,
        location: SourceLocation,
        message: impl Into<String>,
    ) -> bool {
        self.messages.add(
            GraphMessage::critical(codes::INVALID_DOCUMENT, message)
                .with_location(location)
                .with_rule(rule),
        );
        false
    }
}
