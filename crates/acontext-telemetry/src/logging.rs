//! Diagnostic logging.
//!
//! Telemetry problems must stay invisible to the user, so nothing is logged
//! unless `ACONTEXT_LOG` is set, e.g. `ACONTEXT_LOG=acontext_telemetry=debug`.

use std::sync::Once;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_ENV: &str = "ACONTEXT_LOG";

static INIT: Once = Once::new();

/// Install the stderr subscriber. Idempotent; a subscriber installed by
/// someone else first is left in place.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));

        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .with(filter)
            .try_init();
    });
}
