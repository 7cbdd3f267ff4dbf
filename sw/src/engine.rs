//! TaskExecutionEngine - per-session step sequence and cursor
//!
//! The engine is bookkeeping only: it owns an ordered step sequence, moves
//! a cursor forward as the caller reports progress, and never decides
//! anything itself. Steps execute strictly in insertion order; there is no
//! reordering, no priorities, and no parallel execution within a session.
//!
//! Forward-progress contract:
//! - complete and skip advance the cursor (and auto-start the next step)
//! - fail never advances; the caller must retry or skip to move on
//! - retry is only valid while the current step is Failed

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::step::{ExecutionStep, StepStatus};

use modelkit::StepDescriptor;

/// State errors from engine operations
///
/// All of these are recoverable: the caller picks a different action.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("No steps to execute")]
    NoSteps,

    #[error("No current step to {action}")]
    NoCurrentStep { action: &'static str },

    #[error("Current step is not in failed state")]
    NotFailed,
}

/// Result of `start_execution`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartOutcome {
    pub current_step: ExecutionStep,
    pub current_step_index: usize,
    pub total_steps: usize,
}

/// Result of completing or skipping the current step
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// Cursor moved; the next step was started
    StepAdvanced {
        finished: ExecutionStep,
        next: ExecutionStep,
        current_step_index: usize,
        total_steps: usize,
    },
    /// That was the last step; the engine is done
    ExecutionCompleted {
        finished: ExecutionStep,
        total_steps: usize,
        summary: ExecutionSummary,
    },
}

/// Result of failing the current step (cursor does not move)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailOutcome {
    pub failed: ExecutionStep,
    pub current_step_index: usize,
    pub total_steps: usize,
    pub can_retry: bool,
    pub can_skip: bool,
}

/// Result of retrying the current failed step
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryOutcome {
    pub current_step: ExecutionStep,
    pub current_step_index: usize,
    pub total_steps: usize,
}

/// Point-in-time execution status snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionStatus {
    pub session_id: String,
    pub execution_started: bool,
    pub execution_completed: bool,
    pub current_step_index: usize,
    pub total_steps: usize,
    pub current_step: Option<ExecutionStep>,
    pub progress_percentage: f64,
}

/// One row of the execution summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepSummaryRow {
    pub id: String,
    pub name: String,
    pub status: StepStatus,
    pub result: Option<Value>,
    pub error: Option<String>,
}

/// Full execution summary: every step in order plus status counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionSummary {
    pub session_id: String,
    pub total_steps: usize,
    pub status_counts: BTreeMap<String, usize>,
    pub steps: Vec<StepSummaryRow>,
    pub execution_completed: bool,
}

/// Per-session step sequence, cursor, and lifecycle flags
///
/// Invariant: `current_step_index` points at the Pending/InProgress step,
/// or equals `step_order.len()` once execution has completed.
#[derive(Debug)]
pub struct TaskExecutionEngine {
    session_id: String,
    steps: HashMap<String, ExecutionStep>,
    step_order: Vec<String>,
    current_step_index: usize,
    execution_started: bool,
    execution_completed: bool,
}

impl TaskExecutionEngine {
    /// Create an empty engine for a session
    pub fn new(session_id: impl Into<String>) -> Self {
        let session_id = session_id.into();
        debug!(%session_id, "TaskExecutionEngine::new: called");
        Self {
            session_id,
            steps: HashMap::new(),
            step_order: Vec::new(),
            current_step_index: 0,
            execution_started: false,
            execution_completed: false,
        }
    }

    /// Append descriptors as new Pending steps at the end of the sequence
    pub fn add_steps(&mut self, descriptors: Vec<StepDescriptor>) {
        debug!(session_id = %self.session_id, count = descriptors.len(), "TaskExecutionEngine::add_steps: called");
        for descriptor in descriptors {
            let step = ExecutionStep::from_descriptor(self.step_order.len(), descriptor);
            self.step_order.push(step.id.clone());
            // Steps appended after completion re-open the sequence
            if self.execution_completed {
                self.execution_completed = false;
            }
            self.steps.insert(step.id.clone(), step);
        }
    }

    /// The step at the cursor, if any
    pub fn current_step(&self) -> Option<&ExecutionStep> {
        let id = self.step_order.get(self.current_step_index)?;
        self.steps.get(id)
    }

    fn current_step_mut(&mut self) -> Option<&mut ExecutionStep> {
        let id = self.step_order.get(self.current_step_index)?;
        self.steps.get_mut(id)
    }

    /// Look up any step by id
    pub fn step(&self, id: &str) -> Option<&ExecutionStep> {
        self.steps.get(id)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn total_steps(&self) -> usize {
        self.step_order.len()
    }

    pub fn is_started(&self) -> bool {
        self.execution_started
    }

    pub fn is_completed(&self) -> bool {
        self.execution_completed
    }

    /// Start execution: mark started and start the step at the cursor
    pub fn start_execution(&mut self) -> Result<StartOutcome, EngineError> {
        debug!(session_id = %self.session_id, "TaskExecutionEngine::start_execution: called");
        if self.step_order.is_empty() {
            return Err(EngineError::NoSteps);
        }
        self.execution_started = true;

        let index = self.current_step_index;
        let total = self.step_order.len();
        let step = self.current_step_mut().ok_or(EngineError::NoSteps)?;
        step.start();

        Ok(StartOutcome {
            current_step: step.clone(),
            current_step_index: index,
            total_steps: total,
        })
    }

    /// Complete the current step and advance (or finish the execution)
    pub fn complete_current_step(&mut self, result: Value) -> Result<AdvanceOutcome, EngineError> {
        debug!(session_id = %self.session_id, "TaskExecutionEngine::complete_current_step: called");
        let step = self
            .current_step_mut()
            .ok_or(EngineError::NoCurrentStep { action: "complete" })?;
        step.complete(result);
        let finished = step.clone();

        Ok(self.advance_from(finished))
    }

    /// Fail the current step; the cursor stays put
    ///
    /// Failures block forward progress until the caller retries or skips.
    pub fn fail_current_step(&mut self, error: &str) -> Result<FailOutcome, EngineError> {
        debug!(session_id = %self.session_id, %error, "TaskExecutionEngine::fail_current_step: called");
        let index = self.current_step_index;
        let total = self.step_order.len();
        let step = self
            .current_step_mut()
            .ok_or(EngineError::NoCurrentStep { action: "fail" })?;
        step.fail(error);

        Ok(FailOutcome {
            failed: step.clone(),
            current_step_index: index,
            total_steps: total,
            can_retry: true,
            can_skip: true,
        })
    }

    /// Skip the current step; advances exactly like complete
    pub fn skip_current_step(&mut self, reason: &str) -> Result<AdvanceOutcome, EngineError> {
        debug!(session_id = %self.session_id, %reason, "TaskExecutionEngine::skip_current_step: called");
        let step = self
            .current_step_mut()
            .ok_or(EngineError::NoCurrentStep { action: "skip" })?;
        step.skip(reason);
        let finished = step.clone();

        Ok(self.advance_from(finished))
    }

    /// Retry the current step; only valid while it is Failed
    pub fn retry_current_step(&mut self) -> Result<RetryOutcome, EngineError> {
        debug!(session_id = %self.session_id, "TaskExecutionEngine::retry_current_step: called");
        let index = self.current_step_index;
        let total = self.step_order.len();
        let step = self
            .current_step_mut()
            .ok_or(EngineError::NoCurrentStep { action: "retry" })?;
        if step.status != StepStatus::Failed {
            return Err(EngineError::NotFailed);
        }

        step.reset_for_retry();
        step.start();

        Ok(RetryOutcome {
            current_step: step.clone(),
            current_step_index: index,
            total_steps: total,
        })
    }

    /// Status snapshot; progress is cursor position over total step count
    pub fn execution_status(&self) -> ExecutionStatus {
        let total = self.step_order.len();
        let progress = if total == 0 {
            0.0
        } else {
            (self.current_step_index as f64 / total as f64) * 100.0
        };

        ExecutionStatus {
            session_id: self.session_id.clone(),
            execution_started: self.execution_started,
            execution_completed: self.execution_completed,
            current_step_index: self.current_step_index,
            total_steps: total,
            current_step: self.current_step().cloned(),
            progress_percentage: progress,
        }
    }

    /// Summary of every step in sequence order plus per-status counts
    pub fn execution_summary(&self) -> ExecutionSummary {
        let mut status_counts: BTreeMap<String, usize> = BTreeMap::new();
        let mut rows = Vec::with_capacity(self.step_order.len());

        for id in &self.step_order {
            if let Some(step) = self.steps.get(id) {
                *status_counts.entry(step.status.to_string()).or_insert(0) += 1;
                rows.push(StepSummaryRow {
                    id: step.id.clone(),
                    name: step.name.clone(),
                    status: step.status,
                    result: step.result.clone(),
                    error: step.error.clone(),
                });
            }
        }

        ExecutionSummary {
            session_id: self.session_id.clone(),
            total_steps: self.step_order.len(),
            status_counts,
            steps: rows,
            execution_completed: self.execution_completed,
        }
    }

    /// Move the cursor past a finished step; start the next step or close
    /// out the execution if that was the last one
    fn advance_from(&mut self, finished: ExecutionStep) -> AdvanceOutcome {
        let total = self.step_order.len();
        self.current_step_index += 1;

        if self.current_step_index >= total {
            self.current_step_index = total;
            self.execution_completed = true;
            return AdvanceOutcome::ExecutionCompleted {
                finished,
                total_steps: total,
                summary: self.execution_summary(),
            };
        }

        let index = self.current_step_index;
        // Index is in bounds after the check above
        let next = match self.current_step_mut() {
            Some(step) => {
                step.start();
                step.clone()
            }
            None => unreachable!("cursor within bounds but step missing"),
        };

        AdvanceOutcome::StepAdvanced {
            finished,
            next,
            current_step_index: index,
            total_steps: total,
        }
    }
}
