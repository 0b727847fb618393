use crate::messages::GraphMessageCollection;
use crate::plan::ExecutableOperation;
use std::sync::Arc;

/// The cacheable result of planning a query document: its executable
/// operations and the messages produced while building them.
///
/// A plan is immutable once built and is shared by every request that
/// executes the same query text against the same schema.
#[derive(Clone, Debug, Default)]
pub struct QueryExecutionPlan {
    pub(crate) estimated_complexity: f64,
    pub(crate) max_depth: usize,
    pub(crate) messages: GraphMessageCollection,
    pub(crate) operations: Vec<Arc<ExecutableOperation>>,
}
impl QueryExecutionPlan {
    /// The highest complexity estimate among the plan's operations.
    pub fn estimated_complexity(&self) -> f64 {
        self.estimated_complexity
    }

    /// `true` when no critical message has been recorded against the plan.
    /// Individual operations may still be invalid.
    pub fn is_valid(&self) -> bool {
        self.messages.is_successful()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn messages(&self) -> &GraphMessageCollection {
        &self.messages
    }

    pub fn operations(&self) -> &[Arc<ExecutableOperation>] {
        self.operations.as_slice()
    }

    /// Select the operation to execute: the one named `name`, or the only
    /// operation when no name is given.
    pub fn operation(&self, name: Option<&str>) -> Option<&Arc<ExecutableOperation>> {
        match name {
            Some(name) => self.operations.iter().find(|op| op.name() == Some(name)),
            None if self.operations.len() == 1 => self.operations.first(),
            None => None,
        }
    }
}
