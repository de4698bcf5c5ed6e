use acontext_telemetry::{
    CommandTree, DispatchOutcome, Dispatcher, DispatcherConfig, FAILURE_EXIT_CODE,
    FailedInvocation, InvocationContext, Lifecycle, NodeId,
};
use acontext_testing::RecordingTransport;
use acontext_testing::fixtures::{acontext_command, argv};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

fn lifecycle(version: &str) -> (Lifecycle, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new();
    let tree = CommandTree::from_command(&acontext_command());
    let dispatcher = Dispatcher::new(transport.clone(), DispatcherConfig::new(version));
    (Lifecycle::new(tree, dispatcher), transport)
}

fn parse(lifecycle: &Lifecycle, tokens: &[&str]) -> InvocationContext {
    let matches = acontext_command()
        .try_get_matches_from(tokens)
        .expect("argv parses");
    InvocationContext::from_matches(lifecycle.tree(), &matches)
}

#[tokio::test]
async fn test_create_project_success_event() {
    let (lifecycle, transport) = lifecycle("0.3.1");

    let mut ctx = parse(
        &lifecycle,
        &[
            "acontext", "create", "project", "--template", "python", "myapp", "--help",
        ],
    );
    assert_eq!(ctx.args(), argv(&["myapp", "--help"]).as_slice());

    lifecycle.on_start(&mut ctx);
    assert!(ctx.started_at().is_some());

    let outcome = lifecycle.on_success(ctx).await;
    assert_eq!(outcome, DispatchOutcome::Delivered);

    let event = transport.single();
    assert_eq!(event.command, "create.project");
    assert_eq!(event.args, argv(&["myapp"]));
    assert_eq!(
        event.flags,
        BTreeMap::from([("template".to_string(), "python".to_string())])
    );
    assert!(event.success);
    assert!(event.duration_ms.is_some());
    assert_eq!(event.error, None);
}

#[tokio::test]
async fn test_untouched_defaults_are_not_reported() {
    let (lifecycle, transport) = lifecycle("0.3.1");

    let mut ctx = parse(&lifecycle, &["acontext", "create", "project", "myapp"]);
    lifecycle.on_start(&mut ctx);
    lifecycle.on_success(ctx).await;

    let event = transport.single();
    assert!(event.flags.is_empty(), "flags: {:?}", event.flags);
}

#[tokio::test]
async fn test_global_flag_reported_on_subcommand() {
    let (lifecycle, transport) = lifecycle("0.3.1");

    let mut ctx = parse(
        &lifecycle,
        &["acontext", "--config", "/etc/acontext", "docker", "logs", "-f", "api"],
    );
    lifecycle.on_start(&mut ctx);
    lifecycle.on_success(ctx).await;

    let event = transport.single();
    assert_eq!(event.command, "docker.logs");
    assert_eq!(event.args, argv(&["api"]));
    assert_eq!(
        event.flags,
        BTreeMap::from([
            ("config".to_string(), "/etc/acontext".to_string()),
            ("follow".to_string(), "true".to_string()),
        ])
    );
}

#[tokio::test]
async fn test_root_invocation_reports_root() {
    let (lifecycle, transport) = lifecycle("0.3.1");

    let mut ctx = parse(&lifecycle, &["acontext"]);
    assert_eq!(ctx.node(), NodeId::ROOT);
    lifecycle.on_start(&mut ctx);
    lifecycle.on_success(ctx).await;

    assert_eq!(transport.single().command, "root");
}

#[tokio::test]
async fn test_missing_start_time_reports_zero_duration() {
    let (lifecycle, transport) = lifecycle("0.3.1");

    let ctx = parse(&lifecycle, &["acontext", "version"]);
    assert!(ctx.started_at().is_none());

    lifecycle.on_success(ctx).await;

    let event = transport.single();
    assert!(event.success);
    assert_eq!(event.duration_ms, Some(0));
}

#[tokio::test(start_paused = true)]
async fn test_duration_spans_pre_run_to_post_run() {
    let (lifecycle, transport) = lifecycle("0.3.1");

    let mut ctx = parse(&lifecycle, &["acontext", "docker", "up"]);
    lifecycle.on_start(&mut ctx);
    tokio::time::sleep(Duration::from_millis(1500)).await;
    lifecycle.on_success(ctx).await;

    let duration_ms = transport.single().duration_ms.expect("success has duration");
    assert!(duration_ms >= 1500, "duration_ms = {}", duration_ms);
}

#[tokio::test]
async fn test_command_error_yields_failure_event_and_exit_one() {
    let (lifecycle, transport) = lifecycle("0.3.1");

    let mut ctx = parse(&lifecycle, &["acontext", "docker", "up"]);
    lifecycle.on_start(&mut ctx);

    let code = lifecycle
        .on_failure(FailedInvocation::Parsed(ctx), &"disk full")
        .await;

    assert_eq!(code, FAILURE_EXIT_CODE);
    assert_eq!(code, 1);

    let event = transport.single();
    assert_eq!(event.command, "docker.up");
    assert!(!event.success);
    assert_eq!(event.error.as_deref(), Some("disk full"));
    assert_eq!(event.duration_ms, None);
}

#[tokio::test]
async fn test_unparsed_failure_resolves_from_argv() {
    let (lifecycle, transport) = lifecycle("0.3.1");
    let raw = argv(&["docker", "logs", "--bogus", "-h"]);

    let code = lifecycle
        .on_failure(
            FailedInvocation::Unparsed(&raw),
            &"unexpected argument '--bogus' found",
        )
        .await;

    assert_eq!(code, 1);
    let event = transport.single();
    assert_eq!(event.command, "docker.logs");
    assert_eq!(event.args, argv(&["docker", "logs", "--bogus"]));
    assert!(event.flags.is_empty());
    assert_eq!(event.duration_ms, None);
}

#[tokio::test]
async fn test_unresolvable_failure_falls_back_to_root() {
    let (lifecycle, transport) = lifecycle("0.3.1");
    let raw = argv(&["deploy", "now"]);

    lifecycle
        .on_failure(
            FailedInvocation::Unparsed(&raw),
            &"unrecognized subcommand 'deploy'",
        )
        .await;

    assert_eq!(transport.single().command, "root");
}

#[tokio::test]
async fn test_dev_build_failure_still_exits_one() {
    let (lifecycle, transport) = lifecycle("dev");

    let ctx = parse(&lifecycle, &["acontext", "version"]);
    let code = lifecycle
        .on_failure(FailedInvocation::Parsed(ctx), &"disk full")
        .await;

    assert_eq!(code, 1);
    assert_eq!(transport.attempts(), 0);
}
