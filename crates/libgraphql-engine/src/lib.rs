pub mod ast;
pub mod cache;
pub mod coercion;
pub mod document;
pub mod execution;
pub mod file_reader;
mod input_value;
pub mod loc;
pub mod messages;
mod operation_type;
pub mod plan;
pub mod rules;
pub mod runtime;
pub mod schema;
pub mod validation;

pub use input_value::InputValue;
pub use operation_type::OperationType;

#[cfg(test)]
mod test_utils;
