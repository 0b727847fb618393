mod cli;
mod command;
mod command_result;
mod commands;
mod output_utils;

use clap::Parser;
pub(crate) use cli::Cli;
pub(crate) use command::RunnableCommand;
pub(crate) use command_result::CommandResult;

const DEFAULT_LOG_LEVEL: tracing::Level = tracing::Level::INFO;

#[tokio::main(flavor = "multi_thread", worker_threads = 10)]
async fn main() -> std::process::ExitCode {
    let mut cli = Cli::parse();
    setup_logger(&cli);

    if let Some(command) = cli.cmd.take() {
        let result = command.run(cli).await;
        if let Some(stdout) = result.stdout {
            println!("{stdout}");
        }
        if let Some(stderr) = result.stderr {
            eprintln!("{stderr}")
        }
        result.exit_code
    } else if let Err(err) = cli.run_default().await {
        eprintln!("{err:#}");
        std::process::ExitCode::FAILURE
    } else {
        std::process::ExitCode::SUCCESS
    }
}

fn setup_logger(cli: &Cli) {
    let (log_level, warning) = log_level(cli.verbose, std::env::var("LOG_LEVEL").ok());

    // stdout is reserved for command output.
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();
    log::trace!("Initial logging level set to `{log_level}`.");

    if let Some(warning) = warning {
        log::warn!("{warning}");
    }
}

/// `--verbose` wins over `LOG_LEVEL`, which accepts any `tracing` level name
/// plus `verbose`.
fn log_level(verbose: bool, env_val: Option<String>) -> (tracing::Level, Option<String>) {
    if verbose {
        return (tracing::Level::DEBUG, None);
    }
    let Some(env_val) = env_val else {
        return (DEFAULT_LOG_LEVEL, None);
    };
    match env_val.trim() {
        "VERBOSE" | "verbose" => (tracing::Level::DEBUG, None),
        other => match other.parse::<tracing::Level>() {
            Ok(level) => (level, None),
            Err(_) => (
                DEFAULT_LOG_LEVEL,
                Some(format!("Invalid `LOG_LEVEL` environment variable value: `{other}`")),
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::log_level;

    #[test]
    fn verbose_flag_overrides_the_environment() {
        assert_eq!(log_level(true, Some("error".to_string())), (tracing::Level::DEBUG, None));
    }

    #[test]
    fn environment_levels_are_parsed() {
        assert_eq!(log_level(false, Some(" TRACE ".to_string())).0, tracing::Level::TRACE);
        assert_eq!(log_level(false, Some("warn".to_string())).0, tracing::Level::WARN);
        assert_eq!(log_level(false, Some("verbose".to_string())).0, tracing::Level::DEBUG);
        assert_eq!(log_level(false, None), (tracing::Level::INFO, None));
    }

    #[test]
    fn unknown_levels_fall_back_with_a_warning() {
        let (level, warning) = log_level(false, Some("loud".to_string()));
        assert_eq!(level, tracing::Level::INFO);
        assert!(warning.is_some_and(|warning| warning.contains("`loud`")));
    }
}
