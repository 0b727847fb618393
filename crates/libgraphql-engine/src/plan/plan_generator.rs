use crate::ast;
use crate::document::build_document;
use crate::loc::SourceLocation;
use crate::messages::GraphMessage;
use crate::messages::codes;
use crate::plan::ComplexityCalculator;
use crate::plan::ExecutableOperationGenerator;
use crate::plan::QueryExecutionPlan;
use crate::schema::Schema;
use crate::validation::DocumentValidationEngine;
use std::sync::Arc;

/// Builds a [`QueryExecutionPlan`] from a parsed query document.
///
/// The steps run in order and never retry:
///
/// 1. Construct the document, link its fragments and compute its depth.
/// 2. Reject documents deeper than the schema allows.
/// 3. Validate the document; stop if it is invalid.
/// 4. Generate an executable operation for every operation in the document.
/// 5. Estimate each valid operation's complexity, keeping the highest.
/// 6. Reject plans more complex than the schema allows.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultQueryPlanGenerator {
    complexity_calculator: ComplexityCalculator,
    operation_generator: ExecutableOperationGenerator,
    validation_engine: DocumentValidationEngine,
}
impl DefaultQueryPlanGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(
        &self,
        syntax_tree: &ast::operation::Document,
        schema: &Schema,
    ) -> QueryExecutionPlan {
        let mut document = build_document(syntax_tree, schema);
        let mut plan = QueryExecutionPlan {
            max_depth: document.max_depth(),
            ..Default::default()
        };

        if let Some(max_depth) = schema.options().max_query_depth
            && document.max_depth() > max_depth {
            tracing::debug!(
                depth = document.max_depth(),
                max_depth,
                "rejecting query that exceeds the maximum depth",
            );
            plan.messages.add_range(document.messages().iter().cloned());
            plan.messages.add(GraphMessage::critical(
                codes::REQUEST_ABORTED,
                format!(
                    "The query has a depth of {}, which exceeds the maximum allowed depth of \
                    {max_depth}.",
                    document.max_depth(),
                ),
            ));
            return plan;
        }

        // A partial document would fail rules for parts it never received.
        if document.is_fully_constructed() {
            self.validation_engine.validate(&mut document, schema);
        }
        plan.messages.add_range(document.messages().iter().cloned());
        if !document.is_valid() {
            return plan;
        }

        for operation_id in document.operation_ids() {
            let mut operation = self.operation_generator.generate(&document, *operation_id, schema);
            if operation.is_valid() {
                operation.estimated_complexity = self.complexity_calculator.calculate(&operation);
                plan.estimated_complexity = plan.estimated_complexity
                    .max(operation.estimated_complexity);
            }
            plan.operations.push(Arc::new(operation));
        }

        if let Some(max_complexity) = schema.options().max_query_complexity
            && plan.estimated_complexity > max_complexity {
            tracing::debug!(
                complexity = plan.estimated_complexity,
                max_complexity,
                "rejecting query that exceeds the maximum complexity",
            );
            plan.messages.add(GraphMessage::critical(
                codes::REQUEST_ABORTED,
                format!(
                    "The query has an estimated complexity of {}, which exceeds the maximum \
                    allowed complexity of {max_complexity}.",
                    plan.estimated_complexity,
                ),
            ));
        }
        plan
    }

    /// Parse `query_text` and generate its plan. Text that fails to parse
    /// yields an invalid plan carrying a single SYNTAX_ERROR message.
    pub fn generate_from_text(&self, query_text: &str, schema: &Schema) -> QueryExecutionPlan {
        match ast::operation::parse(query_text) {
            Ok(syntax_tree) => self.generate(&syntax_tree, schema),
            Err(err) => {
                let mut plan = QueryExecutionPlan::default();
                plan.messages.add(syntax_error(&err));
                plan
            },
        }
    }
}

/// graphql-parser only reports where parsing failed inside its message
/// text (`... Parse error at 3:7 ...`).
fn syntax_error(err: &ast::operation::ParseError) -> GraphMessage {
    let text = err.to_string();
    let message = GraphMessage::critical(codes::SYNTAX_ERROR, text.trim().to_string());
    match parse_error_location(&text) {
        Some(location) => message.with_location(location),
        None => message,
    }
}

fn parse_error_location(text: &str) -> Option<SourceLocation> {
    let (_, rest) = text.split_once(" at ")?;
    let position = rest.split_whitespace().next()?;
    let (line, column) = position.split_once(':')?;
    Some(SourceLocation {
        column: column.parse().ok()?,
        line: line.parse().ok()?,
    })
}
