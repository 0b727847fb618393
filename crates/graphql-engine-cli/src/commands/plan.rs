use crate::Cli;
use crate::CommandResult;
use crate::RunnableCommand;
use crate::commands::schema_args::SchemaArgs;
use crate::commands::schema_args::find_graphql_files;
use crate::output_utils;
use libgraphql_engine::plan::DefaultQueryPlanGenerator;
use libgraphql_engine::plan::QueryExecutionPlan;
use std::fmt::Write;
use std::path::Path;
use std::path::PathBuf;

#[derive(Debug, clap::Args)]
pub(crate) struct PlanCmd {
    #[command(flatten)]
    schema: SchemaArgs,

    #[arg(
        default_values_t=[
            "graphql".to_string(),
            "gql".to_string(),
        ],
        help="Set of file extensions to filter to when searching for files \
             within a directory.",
        long,
        value_delimiter = ',',
    )]
    graphql_file_exts: Vec<String>,

    #[arg(
        help="Paths to one or more query documents or directories containing \
             query documents to plan.",
        name="FILE_OR_DIR_PATHS",
        required=true,
    )]
    file_or_dir_paths: Vec<PathBuf>,
}

#[inherent::inherent]
impl RunnableCommand for PlanCmd {
    pub async fn run(self, _cli: Cli) -> CommandResult {
        let schema = match self.schema.load_schema() {
            Ok(schema) => schema,
            Err(e) => return CommandResult::stderr(format_args!(
                "{} Could not load the schema: {e:#}",
                output_utils::RED_X,
            )),
        };

        let (file_paths, errors) = find_graphql_files(&self.file_or_dir_paths, &self.graphql_file_exts);
        if !errors.is_empty() {
            return CommandResult::stderr(format_args!(
                "{} Errors while scanning for query documents: {errors:#?}",
                output_utils::RED_X,
            ));
        }
        log::debug!("Found {} query documents to plan.", file_paths.len());

        let generator = DefaultQueryPlanGenerator::new();
        let mut report = String::new();
        let mut num_invalid = 0;
        for path in &file_paths {
            let query_text = match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(e) => return CommandResult::stderr(format_args!(
                    "{} Could not read {}: {e}",
                    output_utils::RED_X,
                    path.display(),
                )),
            };
            let plan = generator.generate_from_text(&query_text, &schema);
            if !plan.is_valid() {
                num_invalid += 1;
            }
            describe_plan(&mut report, path, &plan);
        }

        let summary = format!(
            "Planned {} documents ({num_invalid} invalid).",
            file_paths.len(),
        );
        if num_invalid > 0 {
            CommandResult::stdout(format_args!("{report}{} {summary}", output_utils::RED_X)).failed()
        } else {
            CommandResult::stdout(format_args!("{report}{} {summary}", output_utils::GREEN_CHECK))
        }
    }
}

fn describe_plan(out: &mut String, path: &Path, plan: &QueryExecutionPlan) {
    let mark = if plan.is_valid() { output_utils::GREEN_CHECK } else { output_utils::RED_X };
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{mark} {}", path.display());
    let _ = writeln!(out, "  * Max depth: {}", plan.max_depth());
    let _ = writeln!(out, "  * Estimated complexity: {}", plan.estimated_complexity());
    for operation in plan.operations() {
        let _ = writeln!(
            out,
            "  * {} `{}`: {} root fields{}",
            operation.operation_type(),
            operation.name().unwrap_or("<anonymous>"),
            operation.fields().len(),
            if operation.is_valid() { "" } else { " (invalid)" },
        );
        if !operation.messages().is_empty() {
            let _ = writeln!(out, "{}", output_utils::message_lines(operation.messages(), "    "));
        }
    }
    if !plan.messages().is_empty() {
        let _ = writeln!(out, "  * Messages:");
        let _ = writeln!(out, "{}", output_utils::message_lines(plan.messages(), "    "));
    }
}
