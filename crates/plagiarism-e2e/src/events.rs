// crates/plagiarism-e2e/src/events.rs
// ============================================================================
// Module: Harness Events
// Description: Structured JSON-lines events for requests and scenarios.
// Purpose: Emit machine-readable run records without touching stdout.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! Every HTTP exchange and every scenario transition produces one event. Sinks
//! serialize events as one JSON object per line. Human-readable progress is a
//! separate channel owned by the orchestrator.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::config::EventLogTarget;
use crate::scenarios::Scenario;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One HTTP exchange with a service under test.
#[derive(Debug, Clone, Serialize)]
pub struct RequestEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u64,
    /// Request method.
    pub method: String,
    /// Request URL.
    pub url: String,
    /// Response status, absent on transport failure.
    pub status: Option<u16>,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Wall-clock latency in milliseconds.
    pub elapsed_ms: u64,
    /// Transport error text, when the exchange failed.
    pub error: Option<String>,
}

/// Inputs required to construct a request event.
pub struct RequestEventParams {
    /// Request method.
    pub method: String,
    /// Request URL.
    pub url: String,
    /// Response status, absent on transport failure.
    pub status: Option<u16>,
    /// Response body size in bytes.
    pub response_bytes: usize,
    /// Wall-clock latency in milliseconds.
    pub elapsed_ms: u64,
    /// Transport error text, when the exchange failed.
    pub error: Option<String>,
}

impl RequestEvent {
    /// Creates a request event stamped with the current time.
    #[must_use]
    pub fn new(params: RequestEventParams) -> Self {
        Self {
            event: "http_request",
            timestamp_ms: now_millis(),
            method: params.method,
            url: params.url,
            status: params.status,
            response_bytes: params.response_bytes,
            elapsed_ms: params.elapsed_ms,
            error: params.error,
        }
    }
}

/// Scenario lifecycle transition.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioEvent {
    /// Event identifier (`scenario_started` or `scenario_finished`).
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u64,
    /// Scenario label.
    pub scenario: Scenario,
    /// Outcome label for finished scenarios.
    pub outcome: Option<&'static str>,
    /// Failure detail for failed scenarios.
    pub detail: Option<String>,
}

impl ScenarioEvent {
    /// Creates a `scenario_started` event.
    #[must_use]
    pub fn started(scenario: Scenario) -> Self {
        Self {
            event: "scenario_started",
            timestamp_ms: now_millis(),
            scenario,
            outcome: None,
            detail: None,
        }
    }

    /// Creates a `scenario_finished` event.
    #[must_use]
    pub fn finished(scenario: Scenario, outcome: &'static str, detail: Option<String>) -> Self {
        Self {
            event: "scenario_finished",
            timestamp_ms: now_millis(),
            scenario,
            outcome: Some(outcome),
            detail,
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for harness events.
pub trait EventSink: Send + Sync {
    /// Records an HTTP exchange.
    fn record_request(&self, event: &RequestEvent);

    /// Records a scenario transition.
    fn record_scenario(&self, _event: &ScenarioEvent) {}
}

/// Discards every event.
pub struct NoopEventSink;

impl EventSink for NoopEventSink {
    fn record_request(&self, _event: &RequestEvent) {}
}

/// Writes JSON lines to stderr.
pub struct StderrEventSink;

impl EventSink for StderrEventSink {
    fn record_request(&self, event: &RequestEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }

    fn record_scenario(&self, event: &ScenarioEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(io::stderr(), "{payload}");
        }
    }
}

/// Appends JSON lines to a file.
pub struct FileEventSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileEventSink {
    /// Opens the event log in append mode, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }

    /// Serializes and appends one record.
    fn append<T: Serialize>(&self, event: &T) {
        let Ok(payload) = serde_json::to_string(event) else {
            return;
        };
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "{payload}");
        }
    }
}

impl EventSink for FileEventSink {
    fn record_request(&self, event: &RequestEvent) {
        self.append(event);
    }

    fn record_scenario(&self, event: &ScenarioEvent) {
        self.append(event);
    }
}

/// Builds the sink selected by configuration.
///
/// # Errors
///
/// Returns an error when a file target cannot be opened.
pub fn sink_for(target: Option<&EventLogTarget>) -> io::Result<Arc<dyn EventSink>> {
    Ok(match target {
        None => Arc::new(NoopEventSink),
        Some(EventLogTarget::Stderr) => Arc::new(StderrEventSink),
        Some(EventLogTarget::File(path)) => Arc::new(FileEventSink::new(path)?),
    })
}

/// Milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> u64 {
    duration_millis(SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default())
}

/// Whole milliseconds of `duration`, saturating at `u64::MAX`.
#[must_use]
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(
        clippy::expect_used,
        clippy::unwrap_used,
        reason = "Test-only assertions favor direct unwrap/expect for clarity."
    )]

    use std::fs;

    use serde_json::Value;

    use super::EventSink;
    use super::FileEventSink;
    use super::RequestEvent;
    use super::RequestEventParams;
    use super::ScenarioEvent;
    use crate::scenarios::Scenario;

    #[test]
    fn file_sink_appends_one_json_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let sink = FileEventSink::new(&path).unwrap();

        sink.record_scenario(&ScenarioEvent::started(Scenario::HealthCheck));
        sink.record_request(&RequestEvent::new(RequestEventParams {
            method: "GET".to_string(),
            url: "http://localhost:5020/status".to_string(),
            status: Some(200),
            response_bytes: 13,
            elapsed_ms: 2,
            error: None,
        }));
        sink.record_scenario(&ScenarioEvent::finished(Scenario::HealthCheck, "passed", None));

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<Value> =
            content.lines().map(|line| serde_json::from_str(line).unwrap()).collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["event"], "scenario_started");
        assert_eq!(lines[0]["scenario"], "health_check");
        assert_eq!(lines[1]["event"], "http_request");
        assert_eq!(lines[1]["status"], 200);
        assert_eq!(lines[2]["outcome"], "passed");
    }
}
