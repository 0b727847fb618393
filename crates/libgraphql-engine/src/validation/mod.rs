//! Schema-aware validation of a constructed [`QueryDocument`].
//!
//! Each failure is recorded as a critical `INVALID_DOCUMENT` message carrying
//! the number of the GraphQL specification rule that was violated.
//!
//! [`QueryDocument`]: crate::document::QueryDocument

mod document_walk;
mod rules;
mod validation_context;
mod validation_engine;

pub(crate) use validation_context::ValidationContext;
pub use validation_engine::DocumentValidationEngine;

#[cfg(test)]
mod tests;
