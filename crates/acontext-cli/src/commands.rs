use super::args::{Cli, Commands, CreateCommand};
use super::handlers;
use crate::VERSION;
use crate::presentation;
use acontext_telemetry::{
    CommandTree, Dispatcher, FailedInvocation, InvocationContext, Lifecycle,
};
use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, FromArgMatches};

/// Leading tokens that suppress the logo banner.
const LOGO_SKIP: [&str; 2] = ["--help", "-h"];

/// Run one invocation and return the process exit code.
///
/// `argv` includes the program name. Help and version output from the
/// parser exit the process directly and are not tracked.
pub async fn run(argv: Vec<String>, dispatcher: Dispatcher) -> i32 {
    let command = Cli::command();
    let lifecycle = Lifecycle::new(CommandTree::from_command(&command), dispatcher);
    let user_args = argv.get(1..).unwrap_or_default();

    if let Some(first) = user_args.first()
        && !LOGO_SKIP.contains(&first.as_str())
    {
        presentation::print_logo();
    }

    let matches = match command.try_get_matches_from(&argv) {
        Ok(matches) => matches,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => err.exit(),
            _ => {
                let message = parse_error_message(&err);
                return lifecycle
                    .on_failure(FailedInvocation::Unparsed(user_args), &message)
                    .await;
            }
        },
    };

    let cli = match Cli::from_arg_matches(&matches) {
        Ok(cli) => cli,
        Err(err) => {
            let message = parse_error_message(&err);
            return lifecycle
                .on_failure(FailedInvocation::Unparsed(user_args), &message)
                .await;
        }
    };

    let mut ctx = InvocationContext::from_matches(lifecycle.tree(), &matches);
    lifecycle.on_start(&mut ctx);

    match execute(cli) {
        Ok(()) => {
            let outcome = lifecycle.on_success(ctx).await;
            tracing::trace!(?outcome, "invocation finished");
            0
        }
        Err(err) => {
            let message = format!("{:#}", err);
            lifecycle
                .on_failure(FailedInvocation::Parsed(ctx), &message)
                .await
        }
    }
}

/// Build the runtime, run one invocation on it and tear it down without
/// waiting for leftover work.
///
/// A telemetry send abandoned at the ceiling may still occupy a blocking
/// pool thread (reqwest resolves DNS there). Dropping the runtime would wait
/// for it, so the runtime is shut down in the background instead.
pub fn run_blocking<F>(argv: Vec<String>, dispatcher: F) -> std::io::Result<i32>
where
    F: FnOnce() -> Dispatcher,
{
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let code = runtime.block_on(async { run(argv, dispatcher()).await });
    runtime.shutdown_background();

    Ok(code)
}

fn execute(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        return handlers::welcome::handle();
    };

    match command {
        Commands::Version => handlers::version::handle(VERSION),

        Commands::Create { command } => match command {
            CreateCommand::Project {
                name,
                template,
                dir,
            } => handlers::create::handle(&name, template, &dir),
        },

        Commands::Docker { command } => handlers::docker::handle(command),
    }
}

/// First line of a clap error without its `error: ` prefix.
fn parse_error_message(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or_default().trim();
    let message = first.strip_prefix("error:").unwrap_or(first).trim();
    if message.is_empty() {
        err.kind().to_string()
    } else {
        message.to_string()
    }
}
