use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::schema_args::SchemaArgs;
use crate::output_utils;
use anyhow::Context;
use libgraphql_engine::execution::GraphQueryExecutionContext;
use libgraphql_engine::execution::GraphQueryRequest;
use libgraphql_engine::runtime::GraphQueryRuntime;
use serde_json::Map;
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct ExecuteCmd {
    #[command(flatten)]
    schema: SchemaArgs,

    #[arg(
        help="Path to the query document to execute.",
        long,
    )]
    query: PathBuf,

    #[arg(
        help="Name of the operation to run when the document has several.",
        long="operation",
    )]
    operation_name: Option<String>,

    #[arg(
        default_value="{}",
        help="JSON object that root fields are resolved from.",
        long,
    )]
    root_value: String,

    #[arg(
        default_value="{}",
        help="JSON object of variable values.",
        long,
    )]
    variables: String,

    #[arg(
        help="Include per-phase timings and resolver counts in the output.",
        long,
    )]
    metrics: bool,
}
impl ExecuteCmd {
    fn build_context(&self) -> anyhow::Result<GraphQueryExecutionContext> {
        let query = std::fs::read_to_string(&self.query)
            .with_context(|| format!("could not read {}", self.query.display()))?;
        let variables: Map<String, Value> = serde_json::from_str(&self.variables)
            .context("--variables must be a JSON object")?;
        let root_value: Value = serde_json::from_str(&self.root_value)
            .context("--root-value must be valid JSON")?;

        let mut request = GraphQueryRequest::new(query).with_variables(variables);
        if let Some(name) = &self.operation_name {
            request = request.with_operation_name(name);
        }
        let context = GraphQueryExecutionContext::new(request).with_root_value(root_value);
        Ok(if self.metrics { context.with_metrics() } else { context })
    }
}

#[inherent::inherent]
impl RunnableCommand for ExecuteCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let schema = match self.schema.load_schema() {
            Ok(schema) => schema,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} Could not load the schema: {e:#}",
                output_utils::RED_X,
            )),
        };
        let context = match self.build_context() {
            Ok(context) => context,
            Err(e) => return CommandResult::stderr(format_args!("{} {e:#}", output_utils::RED_X)),
        };

        let result = GraphQueryRuntime::new(schema).execute(context).await;
        let response = output_utils::response_json(&result);
        let rendered = match serde_json::to_string_pretty(&response) {
            Ok(rendered) => rendered,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} Could not render the response: {e}",
                output_utils::RED_X,
            )),
        };

        if result.is_successful() {
            CommandResult::stdout(format_args!("{rendered}"))
        } else {
            CommandResult::stdout(format_args!("{rendered}")).failed()
        }
    }
}
