use acontext_telemetry::{
    Config, Dispatcher, DispatcherConfig, HttpTransport, Result, TelemetryEvent, Transport,
};
use futures::future::{BoxFuture, FutureExt};
use std::sync::Arc;

/// Stands in when the HTTP client cannot be built. Drops every event.
struct UnavailableTransport;

impl Transport for UnavailableTransport {
    fn send<'a>(&'a self, event: &'a TelemetryEvent) -> BoxFuture<'a, Result<()>> {
        tracing::debug!(command = %event.command, "telemetry transport unavailable, event dropped");
        futures::future::ready(Ok(())).boxed()
    }
}

/// Build the dispatcher for this binary's version from the loaded config.
pub fn dispatcher(config: &Config, version: &str) -> Dispatcher {
    let settings = &config.telemetry;
    let transport: Arc<dyn Transport> =
        match HttpTransport::new(settings.endpoint.clone(), settings.request_timeout()) {
            Ok(http) => Arc::new(http),
            Err(e) => {
                tracing::debug!(error = %e, "failed to build telemetry client");
                Arc::new(UnavailableTransport)
            }
        };

    Dispatcher::new(transport, DispatcherConfig::new(version))
}
