mod depth_calculator_tests;

use crate::ast;
use crate::document::QueryDocument;
use crate::document::build_document;
use crate::test_utils::test_schema;

pub(super) fn build(query: &str) -> QueryDocument {
    let syntax_tree = ast::operation::parse(query).expect("query parses");
    build_document(&syntax_tree, &test_schema())
}
