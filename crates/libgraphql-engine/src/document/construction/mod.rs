mod construction_context;
mod construction_engine;
mod construction_rules;
mod syntax_node;

pub(crate) use construction_context::ConstructionContext;
pub use construction_engine::DocumentConstructionEngine;
pub(crate) use syntax_node::SyntaxNode;
pub(crate) use syntax_node::SyntaxNodeKind;
