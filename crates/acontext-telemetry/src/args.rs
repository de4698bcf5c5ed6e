use crate::tree::CommandNode;
use clap::ArgMatches;
use clap::parser::ValueSource;
use std::collections::HashSet;

const HELP_TOKENS: [&str; 3] = ["--help", "-h", "help"];

/// Drop help tokens, keeping everything else in order.
pub fn filter_args(args: &[String]) -> Vec<String> {
    args.iter()
        .filter(|arg| !HELP_TOKENS.contains(&arg.as_str()))
        .cloned()
        .collect()
}

/// Raw positional values the invoker typed for `node`, in declaration order.
pub fn positional_args(node: &CommandNode, matches: &ArgMatches) -> Vec<String> {
    let present: HashSet<&str> = matches.ids().map(|id| id.as_str()).collect();

    node.positionals
        .iter()
        .filter(|id| present.contains(id.as_str()))
        .filter(|id| matches.value_source(id.as_str()) == Some(ValueSource::CommandLine))
        .filter_map(|id| matches.try_get_raw(id.as_str()).ok().flatten())
        .flat_map(|raw| raw.map(|v| v.to_string_lossy().into_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::CommandTree;
    use clap::{Arg, Command};

    fn strings(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_filter_removes_help_tokens() {
        let filtered = filter_args(&strings(&["a", "--help", "b", "-h", "help", "c"]));
        assert_eq!(filtered, strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let inputs = [
            strings(&[]),
            strings(&["help"]),
            strings(&["myapp", "--helpful", "-hh", "HELP"]),
            strings(&["x", "-h", "y", "--help", "help", "z"]),
        ];

        for input in inputs {
            let once = filter_args(&input);
            assert_eq!(filter_args(&once), once);
        }
    }

    #[test]
    fn test_filter_keeps_lookalikes() {
        let filtered = filter_args(&strings(&["--helpful", "-hh", "HELP", "helper"]));
        assert_eq!(filtered, strings(&["--helpful", "-hh", "HELP", "helper"]));
    }

    #[test]
    fn test_positional_args_in_declaration_order() {
        let command = Command::new("acontext").subcommand(
            Command::new("copy")
                .arg(Arg::new("source"))
                .arg(Arg::new("dest"))
                .arg(Arg::new("mode").default_value("fast"))
                .arg(Arg::new("verbose").long("verbose")),
        );
        let tree = CommandTree::from_command(&command);
        let matches = command
            .try_get_matches_from(["acontext", "copy", "--verbose", "yes", "a.txt", "b.txt"])
            .unwrap();

        let (id, leaf) = tree.resolve(&matches);
        assert_eq!(
            positional_args(tree.node(id), leaf),
            strings(&["a.txt", "b.txt"])
        );
    }
}
