//! Watch events for NDJSON output

use std::sync::Arc;

/// Callback receiving events from supervisor and scheduler threads
pub type EventSink = Arc<dyn Fn(WatchEvent) + Send + Sync>;

/// An event sink that drops everything
pub fn discard_events() -> EventSink {
    Arc::new(|_| {})
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    /// Supervisor started
    WatchStarted { targets: Vec<String> },
    /// A target's root is missing; it is not watched
    TargetSkipped { target: String, reason: String },
    /// A coalesced batch passed the ignore rules
    ChangesDetected { target: String, paths: Vec<String> },
    /// A job started for a batch
    JobStarted { target: String },
    /// A running job was cancelled in favour of a newer batch
    JobSuperseded { target: String },
    /// A job ran to completion
    SyncComplete {
        target: String,
        succeeded: usize,
        failed: usize,
    },
    /// Error occurred
    Error { target: String, message: String },
    /// Supervisor stopped
    Shutdown,
}

impl WatchEvent {
    /// Convert to JSON string with "command": "watch" field included
    pub fn to_json(&self) -> String {
        let mut value =
            serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!("watch"));
        }
        serde_json::to_string(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_tagged_snake_case() {
        let event = WatchEvent::JobSuperseded {
            target: "/work/jcr_root".to_string(),
        };
        assert_eq!(
            event.to_json(),
            r#"{"event":"job_superseded","target":"/work/jcr_root","command":"watch"}"#
        );
    }

    #[test]
    fn unit_variant_has_only_tag() {
        assert_eq!(
            WatchEvent::Shutdown.to_json(),
            r#"{"event":"shutdown","command":"watch"}"#
        );
    }
}
