//! Compilation of query documents into cacheable execution plans.

mod complexity_calculator;
mod executable_operation;
mod execution_directive;
mod field_invocation_context;
mod operation_generator;
mod plan_generator;
mod query_execution_plan;

pub use complexity_calculator::ComplexityCalculator;
pub use executable_operation::ExecutableOperation;
pub use execution_directive::ExecutionDirective;
pub use field_invocation_context::FieldInvocationContext;
pub use operation_generator::ExecutableOperationGenerator;
pub use plan_generator::DefaultQueryPlanGenerator;
pub use query_execution_plan::QueryExecutionPlan;

#[cfg(test)]
mod tests;
