// NOTE: acontext-telemetry design rationale
//
// Why best-effort only?
// - The CLI must never hang or fail because a collector is down
// - One attempt per invocation, no retries, no local persistence
// - The host waits at most WAIT_CEILING, then carries on; a send still in
//   flight is left to finish (or die with the process)
//
// Why report only explicitly-set flags and filtered positionals?
// - Defaults say nothing about what the user did
// - Help tokens are noise, not usage
//
// Why a version sentinel instead of a runtime switch?
// - Development builds ("dev") must never emit anything
// - The decision is made at build time and injected into the Dispatcher, so
//   tests can build suppressed and unsuppressed dispatchers side by side

pub mod args;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod flags;
pub mod lifecycle;
pub mod logging;
pub mod transport;
pub mod tree;

pub use args::{filter_args, positional_args};
pub use config::{Config, TelemetrySettings};
pub use dispatch::{DEV_VERSION, DispatchOutcome, Dispatcher, DispatcherConfig, WAIT_CEILING};
pub use error::{Error, Result};
pub use event::{Outcome, Report, TelemetryEvent};
pub use flags::explicit_flags;
pub use lifecycle::{FAILURE_EXIT_CODE, FailedInvocation, InvocationContext, Lifecycle};
pub use logging::init_tracing;
pub use transport::{HttpTransport, Transport};
pub use tree::{CommandNode, CommandTree, FlagSpec, NodeId, ROOT_PATH};
