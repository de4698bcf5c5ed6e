use crate::args::{filter_args, positional_args};
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::event::{Outcome, Report};
use crate::flags::explicit_flags;
use crate::tree::{CommandTree, NodeId};
use clap::ArgMatches;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// Exit status the host terminates with after a failed invocation.
pub const FAILURE_EXIT_CODE: i32 = 1;

/// Per-invocation record threaded from the pre-run hook to whichever
/// terminal hook ends the invocation. The terminal hooks take it by value,
/// so an invocation can only be reported once.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    node: NodeId,
    args: Vec<String>,
    flags: BTreeMap<String, String>,
    started_at: Option<Instant>,
}

impl InvocationContext {
    pub fn new(node: NodeId, args: Vec<String>, flags: BTreeMap<String, String>) -> Self {
        Self {
            node,
            args,
            flags,
            started_at: None,
        }
    }

    /// Capture the executed command, its positionals and its explicitly set
    /// flags from a successful parse.
    pub fn from_matches(tree: &CommandTree, matches: &ArgMatches) -> Self {
        let (node, leaf) = tree.resolve(matches);
        let command = tree.node(node);
        Self::new(
            node,
            positional_args(command, leaf),
            explicit_flags(command, leaf),
        )
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn flags(&self) -> &BTreeMap<String, String> {
        &self.flags
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }
}

/// A failed invocation, as far as the host got before the error.
#[derive(Debug, Clone)]
pub enum FailedInvocation<'a> {
    /// Parsing succeeded and the command's action returned an error
    Parsed(InvocationContext),
    /// Parsing itself failed; only the raw argv (program name excluded) is known
    Unparsed(&'a [String]),
}

/// The three hook points around a command's execution.
pub struct Lifecycle {
    tree: CommandTree,
    dispatcher: Dispatcher,
}

impl Lifecycle {
    pub fn new(tree: CommandTree, dispatcher: Dispatcher) -> Self {
        Self { tree, dispatcher }
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Pre-run: remember when the command started.
    pub fn on_start(&self, ctx: &mut InvocationContext) {
        ctx.started_at = Some(Instant::now());
        tracing::trace!(command = %self.tree.path(ctx.node), "invocation started");
    }

    /// Post-run after the action returned `Ok`. A missing start time
    /// reports a zero duration rather than failing the command.
    pub async fn on_success(&self, ctx: InvocationContext) -> DispatchOutcome {
        let duration = ctx
            .started_at
            .map(|started| started.elapsed())
            .unwrap_or(Duration::ZERO);

        let report = Report {
            command: self.tree.path(ctx.node),
            args: filter_args(&ctx.args),
            flags: ctx.flags,
            outcome: Outcome::Succeeded { duration },
        };

        self.dispatcher.dispatch(report).await
    }

    /// Top-level error boundary. The error is printed to stderr before any
    /// telemetry work starts; the returned status is what the host must
    /// exit with once this returns.
    pub async fn on_failure(
        &self,
        invocation: FailedInvocation<'_>,
        error: &(dyn fmt::Display + Sync),
    ) -> i32 {
        eprintln!("Error: {}", error);

        let (node, args, flags) = match invocation {
            FailedInvocation::Parsed(ctx) => (ctx.node, ctx.args, ctx.flags),
            FailedInvocation::Unparsed(argv) => {
                (self.tree.find(argv), argv.to_vec(), BTreeMap::new())
            }
        };

        let report = Report {
            command: self.tree.path(node),
            args: filter_args(&args),
            flags,
            outcome: Outcome::failed(error),
        };

        let outcome = self.dispatcher.dispatch(report).await;
        tracing::trace!(?outcome, "failure reported");

        FAILURE_EXIT_CODE
    }
}
