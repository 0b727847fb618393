mod operation_generator_tests;

use crate::ast;
use crate::plan::DefaultQueryPlanGenerator;
use crate::plan::FieldInvocationContext;
use crate::plan::QueryExecutionPlan;
use crate::schema::Schema;

pub(super) fn plan(query: &str, schema: &Schema) -> QueryExecutionPlan {
    let syntax_tree = ast::operation::parse(query).expect("query parses");
    DefaultQueryPlanGenerator::new().generate(&syntax_tree, schema)
}

pub(super) fn response_names(contexts: &[FieldInvocationContext]) -> Vec<&str> {
    contexts.iter()
        .map(|context| context.response_name())
        .collect()
}
