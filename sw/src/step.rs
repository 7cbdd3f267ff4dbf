//! ExecutionStep domain type
//!
//! One unit of tracked work. The caller (an LLM) does the actual work; the
//! step only records what the caller reports. Every transition appends to
//! an append-only event log.

use chrono::{DateTime, Utc};
use modelkit::StepDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;
use uuid::Uuid;

/// Status of an execution step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// Not yet started
    #[default]
    Pending,
    /// Started, awaiting the caller's report
    InProgress,
    /// Caller reported success
    Completed,
    /// Caller reported failure; blocks forward progress until retry or skip
    Failed,
    /// Caller chose to skip; reason stored in the error field
    Skipped,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::InProgress => write!(f, "in_progress"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Skipped => write!(f, "skipped"),
        }
    }
}

/// One entry in a step's append-only event log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepEvent {
    pub event_type: String,
    pub timestamp: DateTime<Utc>,
    pub data: Value,
}

/// A single tracked unit of work
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStep {
    /// Unique identifier, assigned when the step enters an engine
    pub id: String,

    /// Short display name
    pub name: String,

    /// What the caller should do in this step
    pub description: String,

    /// Step kind from the generating template
    pub kind: String,

    /// Expected output, if the template declares one
    pub expected_output: Option<String>,

    /// Step ids that must finish first (carried for the contract; no
    /// built-in provider emits dependencies today)
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Current status
    pub status: StepStatus,

    /// Caller-reported result; set only when status is Completed
    pub result: Option<Value>,

    /// Error message (Failed) or skip reason (Skipped)
    pub error: Option<String>,

    /// When the step was last started
    pub started_at: Option<DateTime<Utc>>,

    /// When the step reached Completed/Failed/Skipped
    pub completed_at: Option<DateTime<Utc>>,

    /// Append-only transition history
    pub event_log: Vec<StepEvent>,
}

impl ExecutionStep {
    /// Create a Pending step from a descriptor, assigning an id
    pub fn from_descriptor(index: usize, descriptor: StepDescriptor) -> Self {
        let id = generate_step_id(index);
        debug!(%id, name = %descriptor.name, "ExecutionStep::from_descriptor: called");
        Self {
            id,
            name: descriptor.name,
            description: descriptor.description,
            kind: descriptor.kind,
            expected_output: descriptor.expected_output,
            dependencies: Vec::new(),
            status: StepStatus::Pending,
            result: None,
            error: None,
            started_at: None,
            completed_at: None,
            event_log: Vec::new(),
        }
    }

    /// Pending -> InProgress
    pub fn start(&mut self) {
        debug!(id = %self.id, "ExecutionStep::start: called");
        self.status = StepStatus::InProgress;
        let now = Utc::now();
        self.started_at = Some(now);
        self.log_event("step_started", json!({ "timestamp": now.to_rfc3339() }));
    }

    /// -> Completed, storing the caller's result
    ///
    /// Clears any error from an earlier failure: error is only meaningful
    /// while the step is Failed or Skipped.
    pub fn complete(&mut self, result: Value) {
        debug!(id = %self.id, "ExecutionStep::complete: called");
        self.status = StepStatus::Completed;
        self.result = Some(result.clone());
        self.error = None;
        let now = Utc::now();
        self.completed_at = Some(now);
        self.log_event(
            "step_completed",
            json!({ "result": result, "timestamp": now.to_rfc3339() }),
        );
    }

    /// -> Failed, storing the caller's error
    pub fn fail(&mut self, error: &str) {
        debug!(id = %self.id, %error, "ExecutionStep::fail: called");
        self.status = StepStatus::Failed;
        self.error = Some(error.to_string());
        let now = Utc::now();
        self.completed_at = Some(now);
        self.log_event(
            "step_failed",
            json!({ "error": error, "timestamp": now.to_rfc3339() }),
        );
    }

    /// -> Skipped; the reason lands in the error field
    pub fn skip(&mut self, reason: &str) {
        debug!(id = %self.id, %reason, "ExecutionStep::skip: called");
        self.status = StepStatus::Skipped;
        self.error = Some(reason.to_string());
        let now = Utc::now();
        self.completed_at = Some(now);
        self.log_event(
            "step_skipped",
            json!({ "reason": reason, "timestamp": now.to_rfc3339() }),
        );
    }

    /// Failed -> Pending, clearing result and error for a retry
    ///
    /// The caller (engine) is responsible for checking the step is actually
    /// Failed before resetting.
    pub fn reset_for_retry(&mut self) {
        debug!(id = %self.id, "ExecutionStep::reset_for_retry: called");
        self.status = StepStatus::Pending;
        self.result = None;
        self.error = None;
        self.completed_at = None;
        self.log_event("step_retried", json!({}));
    }

    /// True once the step will not change again without a retry
    pub fn is_terminal(&self) -> bool {
        matches!(
            self.status,
            StepStatus::Completed | StepStatus::Failed | StepStatus::Skipped
        )
    }

    fn log_event(&mut self, event_type: &str, data: Value) {
        self.event_log.push(StepEvent {
            event_type: event_type.to_string(),
            timestamp: Utc::now(),
            data,
        });
    }
}

/// Generate a step id: positional prefix plus a uuid fragment
fn generate_step_id(index: usize) -> String {
    let uuid = Uuid::now_v7().simple().to_string();
    format!("step_{}_{}", index, &uuid[..8])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> StepDescriptor {
        StepDescriptor {
            kind: "analysis".to_string(),
            name: "Analyze".to_string(),
            description: "Look at the thing".to_string(),
            expected_output: Some("Notes".to_string()),
        }
    }

    #[test]
    fn test_new_step_is_pending() {
        let step = ExecutionStep::from_descriptor(0, descriptor());
        assert_eq!(step.status, StepStatus::Pending);
        assert!(step.id.starts_with("step_0_"));
        assert!(step.result.is_none());
        assert!(step.event_log.is_empty());
    }

    #[test]
    fn test_start_stamps_and_logs() {
        let mut step = ExecutionStep::from_descriptor(0, descriptor());
        step.start();

        assert_eq!(step.status, StepStatus::InProgress);
        assert!(step.started_at.is_some());
        assert_eq!(step.event_log.len(), 1);
        assert_eq!(step.event_log[0].event_type, "step_started");
    }

    #[test]
    fn test_complete_sets_result_and_completed_at() {
        let mut step = ExecutionStep::from_descriptor(0, descriptor());
        step.start();
        step.complete(json!({"ok": true}));

        assert_eq!(step.status, StepStatus::Completed);
        assert_eq!(step.result, Some(json!({"ok": true})));
        assert!(step.completed_at.is_some());
        assert!(step.error.is_none());
    }

    #[test]
    fn test_fail_sets_error_not_result() {
        let mut step = ExecutionStep::from_descriptor(0, descriptor());
        step.start();
        step.fail("timeout");

        assert_eq!(step.status, StepStatus::Failed);
        assert_eq!(step.error.as_deref(), Some("timeout"));
        assert!(step.result.is_none());
        assert!(step.completed_at.is_some());
    }

    #[test]
    fn test_complete_after_fail_clears_stale_error() {
        let mut step = ExecutionStep::from_descriptor(0, descriptor());
        step.start();
        step.fail("boom");
        step.complete(json!({"ok": true}));

        assert_eq!(step.status, StepStatus::Completed);
        assert!(step.error.is_none());
        assert_eq!(step.result, Some(json!({"ok": true})));
    }

    #[test]
    fn test_skip_stores_reason_in_error() {
        let mut step = ExecutionStep::from_descriptor(0, descriptor());
        step.skip("not applicable");

        assert_eq!(step.status, StepStatus::Skipped);
        assert_eq!(step.error.as_deref(), Some("not applicable"));
    }

    #[test]
    fn test_retry_clears_result_and_error() {
        let mut step = ExecutionStep::from_descriptor(0, descriptor());
        step.start();
        step.fail("boom");
        step.reset_for_retry();

        assert_eq!(step.status, StepStatus::Pending);
        assert!(step.error.is_none());
        assert!(step.result.is_none());
        assert!(step.completed_at.is_none());
    }

    #[test]
    fn test_event_log_is_append_only() {
        let mut step = ExecutionStep::from_descriptor(0, descriptor());
        step.start();
        let after_start = step.event_log.len();
        step.fail("boom");
        let after_fail = step.event_log.len();
        step.reset_for_retry();
        step.start();
        let after_retry = step.event_log.len();

        assert!(after_fail > after_start);
        assert!(after_retry > after_fail);
        assert_eq!(step.event_log[0].event_type, "step_started");
    }

    #[test]
    fn test_status_serde_snake_case() {
        let json = serde_json::to_string(&StepStatus::InProgress).unwrap();
        assert_eq!(json, r#""in_progress""#);
        let parsed: StepStatus = serde_json::from_str(r#""skipped""#).unwrap();
        assert_eq!(parsed, StepStatus::Skipped);
    }
}
