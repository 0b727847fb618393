mod document_rule_tests;
mod field_rule_tests;
mod fragment_rule_tests;
mod variable_rule_tests;

use crate::ast;
use crate::document::QueryDocument;
use crate::document::build_document;
use crate::test_utils::test_schema;
use crate::validation::DocumentValidationEngine;

pub(super) struct Validated {
    pub(super) document: QueryDocument,
    pub(super) passed: bool,
}
impl Validated {
    /// The rule reference of every recorded message, in order.
    pub(super) fn rules(&self) -> Vec<&str> {
        self.document.messages()
            .iter()
            .filter_map(|message| message.rule_reference())
            .collect()
    }
}

pub(super) fn validate(query: &str) -> Validated {
    let schema = test_schema();
    let syntax_tree = ast::operation::parse(query).expect("query parses");
    let mut document = build_document(&syntax_tree, &schema);
    let passed = DocumentValidationEngine::new().validate(&mut document, &schema);
    Validated { document, passed }
}

pub(super) fn assert_valid(query: &str) {
    let validated = validate(query);
    assert_eq!(validated.rules(), Vec::<&str>::new());
    assert!(validated.passed);
    assert!(validated.document.is_valid());
}
