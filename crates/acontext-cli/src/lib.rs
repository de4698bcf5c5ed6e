// NOTE: acontext CLI structure
//
// Every invocation goes through the telemetry lifecycle in `commands::run`:
// parse → pre-run (start time) → handler → post-run (success event), or the
// failure hook on any error, which also owns the `Error: ...` line and the
// exit code. Handlers only do their work and return `anyhow::Result`.

mod args;
mod commands;
mod handlers;
pub mod presentation;
pub mod telemetry;
pub mod types;

pub use acontext_telemetry::DEV_VERSION;
pub use args::{Cli, Commands, CreateCommand, DockerCommand};
pub use commands::{run, run_blocking};

/// Version baked in at build time through `ACONTEXT_VERSION`.
/// Builds without it report `dev` and never send telemetry.
pub const VERSION: &str = match option_env!("ACONTEXT_VERSION") {
    Some(version) => version,
    None => DEV_VERSION,
};
