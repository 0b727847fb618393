//! The per-request entry point tying planning, caching and execution
//! together.

mod graph_query_runtime;
mod variable_coercion;

pub use graph_query_runtime::GraphQueryRuntime;
