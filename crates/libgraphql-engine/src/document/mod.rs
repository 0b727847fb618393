//! Construction of a schema-bound [`QueryDocument`] from a parsed syntax
//! tree, followed by fragment linking and depth calculation.

pub mod construction;
mod depth_calculator;
mod document_part;
mod fragment_linker;
mod query_document;

pub use construction::DocumentConstructionEngine;
pub use depth_calculator::calculate_max_depth;
pub use document_part::ArgumentPart;
pub use document_part::DirectivePart;
pub use document_part::DocumentPart;
pub use document_part::DocumentPartKind;
pub use document_part::FieldPart;
pub use document_part::FragmentSpreadPart;
pub use document_part::InlineFragmentPart;
pub use document_part::NamedFragmentPart;
pub use document_part::OperationPart;
pub use document_part::PartId;
pub use document_part::SelectionSetPart;
pub use document_part::VariableDefinitionPart;
pub use fragment_linker::link_fragments;
pub use query_document::QueryDocument;

use crate::ast;
use crate::schema::Schema;

/// Construct a document, link its fragments and compute its max depth.
/// Linking only happens when construction completed, and depth calculation
/// only when linking succeeded.
pub fn build_document(syntax_tree: &ast::operation::Document, schema: &Schema) -> QueryDocument {
    let mut document = QueryDocument::new();
    let constructed = DocumentConstructionEngine::new()
        .construct(syntax_tree, &mut document, schema);
    document.constructed = constructed;
    if constructed && link_fragments(&mut document) {
        calculate_max_depth(&mut document);
    }
    document
}

#[cfg(test)]
mod tests;
