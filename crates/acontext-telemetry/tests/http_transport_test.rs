use acontext_telemetry::{
    DispatchOutcome, Dispatcher, DispatcherConfig, Error, HttpTransport, Outcome, Report,
    TelemetryEvent, Transport,
};
use acontext_testing::LocalCollector;
use acontext_testing::collector::unreachable_endpoint;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

fn failed_report() -> Report {
    Report {
        command: "create.project".to_string(),
        args: vec!["myapp".to_string()],
        flags: BTreeMap::from([("template".to_string(), "python".to_string())]),
        outcome: Outcome::failed(&"directory already exists"),
    }
}

fn transport(endpoint: &str) -> Arc<HttpTransport> {
    Arc::new(HttpTransport::new(endpoint, Duration::from_secs(2)).expect("client builds"))
}

#[tokio::test]
async fn test_event_posted_as_json() {
    let collector = LocalCollector::start(204).expect("collector starts");
    let dispatcher = Dispatcher::new(
        transport(&collector.endpoint()),
        DispatcherConfig::new("0.3.1"),
    );

    let outcome = dispatcher.dispatch(failed_report()).await;

    assert_eq!(outcome, DispatchOutcome::Delivered);
    let events = collector.events();
    assert_eq!(events.len(), 1);

    let body = &events[0];
    assert_eq!(body["command"], "create.project");
    assert_eq!(body["args"], serde_json::json!(["myapp"]));
    assert_eq!(body["flags"]["template"], "python");
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "directory already exists");
    assert_eq!(body["version"], "0.3.1");
    assert!(body.get("duration_ms").is_none());
}

#[tokio::test]
async fn test_rejected_status_is_an_error() {
    let collector = LocalCollector::start(500).expect("collector starts");
    let http = transport(&collector.endpoint());
    let event = TelemetryEvent::new(failed_report(), "0.3.1");

    let result = http.send(&event).await;

    assert!(matches!(result, Err(Error::Rejected(500))), "{:?}", result);
    assert_eq!(collector.request_count(), 1);
}

#[tokio::test]
async fn test_rejected_status_is_swallowed_by_dispatcher() {
    let collector = LocalCollector::start(500).expect("collector starts");
    let dispatcher = Dispatcher::new(
        transport(&collector.endpoint()),
        DispatcherConfig::new("0.3.1"),
    );

    assert_eq!(
        dispatcher.dispatch(failed_report()).await,
        DispatchOutcome::Failed
    );
    assert_eq!(collector.request_count(), 1);
}

#[tokio::test]
async fn test_unreachable_collector_is_swallowed() {
    let endpoint = unreachable_endpoint().expect("probe binds");
    let http = transport(&endpoint);

    let event = TelemetryEvent::new(failed_report(), "0.3.1");
    assert!(matches!(http.send(&event).await, Err(Error::Transport(_))));

    let dispatcher = Dispatcher::new(http, DispatcherConfig::new("0.3.1"));
    assert_eq!(
        dispatcher.dispatch(failed_report()).await,
        DispatchOutcome::Failed
    );
}

#[tokio::test]
async fn test_dev_build_makes_no_request() {
    let collector = LocalCollector::start(204).expect("collector starts");
    let dispatcher = Dispatcher::new(
        transport(&collector.endpoint()),
        DispatcherConfig::new("dev"),
    );

    assert_eq!(
        dispatcher.dispatch(failed_report()).await,
        DispatchOutcome::Suppressed
    );
    assert!(!collector.wait_for(1, Duration::from_millis(200)));
}
