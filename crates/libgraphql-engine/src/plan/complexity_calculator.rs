use crate::OperationType;
use crate::plan::ExecutableOperation;
use crate::plan::FieldInvocationContext;
use crate::schema::FieldResolutionMode;
use crate::schema::FieldSource;

const LIST_MULTIPLIER: f64 = 3.0;
const SINGLE_MULTIPLIER: f64 = 1.0;

/// Estimates the cost of executing an [`ExecutableOperation`].
///
/// Each field weighs its declared complexity (1 when undeclared) scaled by how
/// it is resolved. Its children contribute `1 + sum(child weights)`, tripled
/// when the field returns a list, and the two are multiplied together. The
/// operation's estimate is the sum of its top-level field weights scaled by
/// the kind of operation.
#[derive(Clone, Copy, Debug, Default)]
pub struct ComplexityCalculator;
impl ComplexityCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(&self, operation: &ExecutableOperation) -> f64 {
        let total: f64 = operation.fields()
            .iter()
            .map(field_weight)
            .sum();
        total * operation_multiplier(operation.operation_type())
    }
}

fn field_weight(context: &FieldInvocationContext) -> f64 {
    let field = context.field();
    let own_weight = field.complexity().unwrap_or(1.0).max(0.0)
        * mode_multiplier(field.mode())
        * source_multiplier(field.source());

    let children: f64 = context.children()
        .iter()
        .map(field_weight)
        .sum();
    let shape_multiplier = if context.is_list() { LIST_MULTIPLIER } else { SINGLE_MULTIPLIER };
    (1.0 + children) * shape_multiplier * own_weight
}

fn mode_multiplier(mode: FieldResolutionMode) -> f64 {
    match mode {
        FieldResolutionMode::Batch => 1.0,
        FieldResolutionMode::PerSourceItem => 1.5,
    }
}

fn source_multiplier(source: FieldSource) -> f64 {
    match source {
        FieldSource::Action => 2.0,
        FieldSource::Method => 1.2,
        FieldSource::Property => 1.0,
    }
}

fn operation_multiplier(operation_type: OperationType) -> f64 {
    match operation_type {
        OperationType::Mutation | OperationType::Subscription => 2.0,
        OperationType::Query => 1.0,
    }
}
