mod execute;
mod plan;
mod schema_args;

use crate::Cli;
use crate::CommandResult;
use execute::ExecuteCmd;
use plan::PlanCmd;

#[derive(Debug, clap::Parser)]
#[command(name = "graphql-engine")]
pub(crate) enum CommandEnum {
    /// Execute a query against a JSON root value.
    Execute(Box<ExecuteCmd>),

    /// Validate query documents and report their execution plans.
    Plan(Box<PlanCmd>),
}
impl CommandEnum {
    pub(crate) async fn run(self, cli: Cli) -> CommandResult {
        match self {
            Self::Execute(cmd) => cmd.run(cli).await,
            Self::Plan(cmd) => cmd.run(cli).await,
        }
    }
}
