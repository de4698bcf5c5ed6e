//! Command definitions and argv helpers shared by integration tests.

use clap::{Arg, ArgAction, Command};

/// A command tree shaped like the `acontext` CLI.
///
/// `create project` disables its help flag and collects trailing values
/// verbatim, so help tokens typed after the project name reach the parsed
/// positionals instead of short-circuiting into help output.
pub fn acontext_command() -> Command {
    Command::new("acontext")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .default_value("~/.acontext"),
        )
        .subcommand(Command::new("version"))
        .subcommand(
            Command::new("create").subcommand(
                Command::new("project")
                    .disable_help_flag(true)
                    .arg(
                        Arg::new("template")
                            .long("template")
                            .short('t')
                            .default_value("python"),
                    )
                    .arg(Arg::new("dir").long("dir").default_value("."))
                    .arg(
                        Arg::new("args")
                            .num_args(1..)
                            .trailing_var_arg(true)
                            .allow_hyphen_values(true),
                    ),
            ),
        )
        .subcommand(
            Command::new("docker")
                .subcommand(Command::new("up"))
                .subcommand(Command::new("down"))
                .subcommand(
                    Command::new("logs")
                        .arg(Arg::new("service"))
                        .arg(Arg::new("follow").long("follow").short('f').action(ArgAction::SetTrue)),
                ),
        )
}

/// Owned argv tokens.
pub fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}
