// NOTE: Dispatch contract
//
// - One spawned task per tracked invocation, one delivery attempt per task
// - The caller waits on a oneshot for at most `ceiling`, then walks away
// - Walking away drops the JoinHandle; the task is detached, never aborted
// - Whatever happens inside the task (error, panic, stall) stays inside it

use crate::event::{Report, TelemetryEvent};
use crate::transport::Transport;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;

/// Version string of local/development builds. Telemetry is inert for it.
pub const DEV_VERSION: &str = "dev";

/// Longest the host command waits for a send to finish.
pub const WAIT_CEILING: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    pub version: String,
    pub ceiling: Duration,
}

impl DispatcherConfig {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            ceiling: WAIT_CEILING,
        }
    }

    pub fn is_suppressed(&self) -> bool {
        self.version == DEV_VERSION
    }
}

/// What the caller observed. None of these is an error for the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Development build, nothing was built or sent
    Suppressed,
    /// The transport reported success within the ceiling
    Delivered,
    /// The transport failed (or its task died) within the ceiling
    Failed,
    /// The ceiling elapsed first; the send continues unobserved
    TimedOut,
}

pub struct Dispatcher {
    transport: Arc<dyn Transport>,
    config: DispatcherConfig,
}

impl Dispatcher {
    pub fn new(transport: Arc<dyn Transport>, config: DispatcherConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Send `report` in the background and wait for it, bounded by the
    /// configured ceiling. Always returns; never reports an error.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn dispatch(&self, report: Report) -> DispatchOutcome {
        if self.config.is_suppressed() {
            tracing::debug!(command = %report.command, "telemetry suppressed for development build");
            return DispatchOutcome::Suppressed;
        }

        let event = TelemetryEvent::new(report, &self.config.version);
        let transport = Arc::clone(&self.transport);
        let (done_tx, done_rx) = oneshot::channel::<bool>();

        // The handle is dropped on purpose: the task is never joined or aborted.
        let _detached = tokio::spawn(async move {
            let delivered = match transport.send(&event).await {
                Ok(()) => {
                    tracing::debug!(command = %event.command, "telemetry event delivered");
                    true
                }
                Err(err) => {
                    tracing::debug!(command = %event.command, error = %err, "telemetry send failed");
                    false
                }
            };
            // The receiver is gone when the caller already hit the ceiling.
            let _ = done_tx.send(delivered);
        });

        match tokio::time::timeout(self.config.ceiling, done_rx).await {
            Ok(Ok(true)) => DispatchOutcome::Delivered,
            Ok(Ok(false)) => DispatchOutcome::Failed,
            Ok(Err(_)) => {
                tracing::debug!("telemetry task ended without signalling completion");
                DispatchOutcome::Failed
            }
            Err(_) => {
                tracing::debug!(
                    ceiling_ms = self.config.ceiling.as_millis() as u64,
                    "telemetry wait ceiling reached, continuing without it"
                );
                DispatchOutcome::TimedOut
            }
        }
    }
}
