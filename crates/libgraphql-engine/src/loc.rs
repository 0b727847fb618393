use crate::ast;

/// A line/column position within a query document or schema definition.
///
/// Very similar to graphql_parser's [Pos](graphql_parser::Pos), but
/// serializable and comparable so it can ride along on messages that are
/// cached as part of a plan.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct SourceLocation {
    pub column: usize,
    pub line: usize,
}
impl SourceLocation {
    pub(crate) fn from_ast_pos(pos: &ast::AstPos) -> Self {
        Self {
            column: pos.column,
            line: pos.line,
        }
    }
}
impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
