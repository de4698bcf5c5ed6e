use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// How a tracked invocation ended.
///
/// Each variant carries exactly the data its event is allowed to report:
/// a success always has a duration, a failure never does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Succeeded { duration: Duration },
    Failed { error: String },
}

impl Outcome {
    /// Failure with the error's display text; an empty text still yields a
    /// non-empty description.
    pub fn failed(error: &dyn fmt::Display) -> Self {
        let error = error.to_string();
        let error = if error.trim().is_empty() {
            "unknown error".to_string()
        } else {
            error
        };
        Outcome::Failed { error }
    }
}

/// Everything the hooks know about an invocation, before the dispatcher
/// stamps the version onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub command: String,
    pub args: Vec<String>,
    pub flags: BTreeMap<String, String>,
    pub outcome: Outcome,
}

/// The record sent to the collector for one tracked invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TelemetryEvent {
    pub command: String,
    pub args: Vec<String>,
    pub flags: BTreeMap<String, String>,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    pub version: String,
}

impl TelemetryEvent {
    pub fn new(report: Report, version: &str) -> Self {
        let (success, error, duration_ms) = match report.outcome {
            Outcome::Succeeded { duration } => (
                true,
                None,
                Some(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)),
            ),
            Outcome::Failed { error } => (false, Some(error), None),
        };

        Self {
            command: report.command,
            args: report.args,
            flags: report.flags,
            success,
            error,
            duration_ms,
            version: version.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(outcome: Outcome) -> Report {
        Report {
            command: "create.project".to_string(),
            args: vec!["myapp".to_string()],
            flags: BTreeMap::from([("template".to_string(), "python".to_string())]),
            outcome,
        }
    }

    #[test]
    fn test_success_event_carries_duration_only() {
        let event = TelemetryEvent::new(
            report(Outcome::Succeeded {
                duration: Duration::from_millis(1250),
            }),
            "0.3.1",
        );

        assert!(event.success);
        assert_eq!(event.duration_ms, Some(1250));
        assert_eq!(event.error, None);
        assert_eq!(event.version, "0.3.1");
    }

    #[test]
    fn test_failure_event_carries_error_only() {
        let event = TelemetryEvent::new(report(Outcome::failed(&"disk full")), "0.3.1");

        assert!(!event.success);
        assert_eq!(event.error.as_deref(), Some("disk full"));
        assert_eq!(event.duration_ms, None);
    }

    #[test]
    fn test_blank_error_text_is_replaced() {
        assert_eq!(
            Outcome::failed(&"  "),
            Outcome::Failed {
                error: "unknown error".to_string()
            }
        );
    }

    #[test]
    fn test_failure_wire_shape_omits_duration() {
        let event = TelemetryEvent::new(report(Outcome::failed(&"disk full")), "0.3.1");

        insta::assert_json_snapshot!(event, @r#"
        {
          "command": "create.project",
          "args": [
            "myapp"
          ],
          "flags": {
            "template": "python"
          },
          "success": false,
          "error": "disk full",
          "version": "0.3.1"
        }
        "#);
    }

    #[test]
    fn test_success_wire_shape_omits_error() {
        let event = TelemetryEvent::new(
            report(Outcome::Succeeded {
                duration: Duration::ZERO,
            }),
            "0.3.1",
        );

        insta::assert_json_snapshot!(event, @r#"
        {
          "command": "create.project",
          "args": [
            "myapp"
          ],
          "flags": {
            "template": "python"
          },
          "success": true,
          "duration_ms": 0,
          "version": "0.3.1"
        }
        "#);
    }
}
