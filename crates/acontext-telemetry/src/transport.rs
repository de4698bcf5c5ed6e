use crate::error::{Error, Result};
use crate::event::TelemetryEvent;
use futures::future::{BoxFuture, FutureExt};
use std::time::Duration;

/// Delivers one event to the collector.
///
/// Implementations may fail in any way they like; the dispatcher swallows
/// the error. They must not retry on their own.
pub trait Transport: Send + Sync + 'static {
    fn send<'a>(&'a self, event: &'a TelemetryEvent) -> BoxFuture<'a, Result<()>>;
}

/// Posts the event as a JSON body to the collector endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>, request_timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!("acontext-telemetry/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Transport for HttpTransport {
    fn send<'a>(&'a self, event: &'a TelemetryEvent) -> BoxFuture<'a, Result<()>> {
        async move {
            let response = self.client.post(&self.endpoint).json(event).send().await?;

            let status = response.status();
            if !status.is_success() {
                return Err(Error::Rejected(status.as_u16()));
            }
            Ok(())
        }
        .boxed()
    }
}
