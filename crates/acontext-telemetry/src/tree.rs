// NOTE: Why an arena instead of walking clap::Command directly?
//
// - clap's Command owns its subcommands but has no parent pointer
// - The path resolver needs to walk upward, the failure path needs to walk
//   downward from raw argv, so both directions have to be cheap
// - Nodes refer to their parent by index; the tree owns every node and is
//   never mutated after construction, so it can be shared without locking

use clap::{Arg, ArgAction, ArgMatches, Command};

/// Path reported when the invocation is the root command itself.
pub const ROOT_PATH: &str = "root";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);
}

/// A flag declared on a command (or inherited from a global ancestor flag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    /// clap argument id, used to query `ArgMatches`
    pub id: String,
    /// Name reported in telemetry: the long name when there is one
    pub name: String,
    pub short: Option<char>,
    pub default: Option<String>,
    pub help: Option<String>,
    pub takes_value: bool,
}

impl FlagSpec {
    fn from_arg(arg: &Arg) -> Self {
        let id = arg.get_id().as_str().to_string();
        let name = arg.get_long().map(str::to_string).unwrap_or_else(|| id.clone());

        let defaults: Vec<String> = arg
            .get_default_values()
            .iter()
            .map(|v| v.to_string_lossy().into_owned())
            .collect();

        Self {
            id,
            name,
            short: arg.get_short(),
            default: (!defaults.is_empty()).then(|| defaults.join(",")),
            help: arg.get_help().map(|h| h.to_string()),
            takes_value: arg.get_action().takes_values(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandNode {
    pub name: String,
    pub aliases: Vec<String>,
    pub about: Option<String>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub flags: Vec<FlagSpec>,
    /// Positional argument ids in declaration order
    pub positionals: Vec<String>,
}

impl CommandNode {
    pub fn flag(&self, id: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| f.id == id)
    }

    fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|a| a == name)
    }

    fn long_flag(&self, long: &str) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| f.name == long)
    }

    fn short_flag(&self, short: char) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| f.short == Some(short))
    }
}

/// Static, read-only view of the invokable command hierarchy.
#[derive(Debug, Clone)]
pub struct CommandTree {
    nodes: Vec<CommandNode>,
}

impl CommandTree {
    /// Build the tree from the host's command definition. Global flags are
    /// copied down to every descendant, the same way clap propagates them
    /// into subcommand matches.
    pub fn from_command(command: &Command) -> Self {
        let mut tree = Self { nodes: Vec::new() };
        tree.insert(command, None, &[]);
        tree
    }

    fn insert(&mut self, command: &Command, parent: Option<NodeId>, inherited: &[FlagSpec]) -> NodeId {
        let id = NodeId(self.nodes.len());

        let mut flags = inherited.to_vec();
        let mut globals = inherited.to_vec();
        let mut positionals = Vec::new();

        for arg in command.get_arguments().filter(|a| !is_builtin(a)) {
            if arg.is_positional() {
                positionals.push(arg.get_id().as_str().to_string());
                continue;
            }

            let spec = FlagSpec::from_arg(arg);
            flags.retain(|f| f.id != spec.id);
            if arg.is_global_set() {
                globals.retain(|f| f.id != spec.id);
                globals.push(spec.clone());
            }
            flags.push(spec);
        }

        self.nodes.push(CommandNode {
            name: command.get_name().to_string(),
            aliases: command.get_all_aliases().map(str::to_string).collect(),
            about: command.get_about().map(|a| a.to_string()),
            parent,
            children: Vec::new(),
            flags,
            positionals,
        });

        for sub in command.get_subcommands() {
            let child = self.insert(sub, Some(id), &globals);
            self.nodes[id.0].children.push(child);
        }

        id
    }

    pub fn root(&self) -> &CommandNode {
        self.node(NodeId::ROOT)
    }

    /// Ids are only handed out by this tree, so indexing cannot miss.
    pub fn node(&self, id: NodeId) -> &CommandNode {
        &self.nodes[id.0]
    }

    pub fn child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.node(parent)
            .children
            .iter()
            .copied()
            .find(|&c| self.node(c).answers_to(name))
    }

    /// Follow a chain of subcommand names from the root.
    pub fn lookup(&self, names: &[&str]) -> Option<NodeId> {
        names
            .iter()
            .try_fold(NodeId::ROOT, |current, name| self.child(current, name))
    }

    /// Dotted path of `id` with the root's own name left out, e.g.
    /// `docker.up`. The root itself resolves to [`ROOT_PATH`].
    pub fn path(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = self.node(id);

        while let Some(parent) = current.parent {
            segments.push(current.name.as_str());
            current = self.node(parent);
        }

        if segments.is_empty() {
            return ROOT_PATH.to_string();
        }

        segments.reverse();
        segments.join(".")
    }

    /// Follow the parsed subcommand chain down to the command that runs.
    pub fn resolve<'m>(&self, matches: &'m ArgMatches) -> (NodeId, &'m ArgMatches) {
        let mut current = NodeId::ROOT;
        let mut leaf = matches;

        while let Some((name, sub)) = leaf.subcommand() {
            let Some(next) = self.child(current, name) else {
                break;
            };
            current = next;
            leaf = sub;
        }

        (current, leaf)
    }

    /// Resolve the executed command from raw argv tokens (program name
    /// excluded) without a successful parse. Flags are skipped, together
    /// with their separate value token when the flag takes one; the walk
    /// stops at the first positional that is not a subcommand. Anything
    /// unresolvable lands on the root.
    pub fn find(&self, args: &[String]) -> NodeId {
        let mut current = NodeId::ROOT;
        let mut tokens = args.iter();

        while let Some(token) = tokens.next() {
            if token == "--" {
                break;
            }

            if let Some(long) = token.strip_prefix("--") {
                if !long.contains('=')
                    && self
                        .node(current)
                        .long_flag(long)
                        .is_some_and(|f| f.takes_value)
                {
                    tokens.next();
                }
                continue;
            }

            if let Some(shorts) = token.strip_prefix('-')
                && !shorts.is_empty()
            {
                let mut chars = shorts.chars();
                if let (Some(short), None) = (chars.next(), chars.next())
                    && self
                        .node(current)
                        .short_flag(short)
                        .is_some_and(|f| f.takes_value)
                {
                    tokens.next();
                }
                continue;
            }

            match self.child(current, token) {
                Some(next) => current = next,
                None => break,
            }
        }

        current
    }
}

fn is_builtin(arg: &Arg) -> bool {
    matches!(
        arg.get_action(),
        ArgAction::Help | ArgAction::HelpShort | ArgAction::HelpLong | ArgAction::Version
    )
}
