use crate::OperationType;
use crate::document::VariableDefinitionPart;
use crate::messages::GraphMessageCollection;
use crate::plan::FieldInvocationContext;

/// The executable form of a single operation within a plan.
///
/// An operation that failed to generate still appears in its plan, carrying
/// the messages describing why, but is never executed.
#[derive(Clone, Debug)]
pub struct ExecutableOperation {
    pub(crate) estimated_complexity: f64,
    pub(crate) fields: Vec<FieldInvocationContext>,
    pub(crate) messages: GraphMessageCollection,
    pub(crate) name: Option<String>,
    pub(crate) operation_type: OperationType,
    pub(crate) root_type: Option<String>,
    pub(crate) variables: Vec<VariableDefinitionPart>,
}
impl ExecutableOperation {
    pub fn estimated_complexity(&self) -> f64 {
        self.estimated_complexity
    }

    /// The top-level field contexts, in document order.
    pub fn fields(&self) -> &[FieldInvocationContext] {
        self.fields.as_slice()
    }

    pub fn is_valid(&self) -> bool {
        self.messages.is_successful()
    }

    pub fn messages(&self) -> &GraphMessageCollection {
        &self.messages
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn operation_type(&self) -> OperationType {
        self.operation_type
    }

    pub fn root_type(&self) -> Option<&str> {
        self.root_type.as_deref()
    }

    pub fn variables(&self) -> &[VariableDefinitionPart] {
        self.variables.as_slice()
    }
}
