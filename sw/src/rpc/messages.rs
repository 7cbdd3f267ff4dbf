//! RPC message types
//!
//! Tagged JSON enums, one line per message. Requests carry free text and
//! arbitrary context, so the size limit lives in the transport layer, not
//! here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::engine::{AdvanceOutcome, ExecutionStatus, ExecutionSummary, FailOutcome, RetryOutcome};
use crate::enhance::EnhanceResponse;
use crate::session::SessionInfo;

/// Which provider registry a request addresses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFamily {
    Mental,
    Audit,
}

impl std::fmt::Display for ProviderFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mental => write!(f, "mental"),
            Self::Audit => write!(f, "audit"),
        }
    }
}

/// Name and description of one registered provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub name: String,
    pub description: String,
}

fn default_context() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Requests from the CLI (or any socket client) to the daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    /// Create an empty session up front
    CreateSession { name: Option<String> },

    /// Generate plan steps from mental model templates
    Plan {
        session_id: Option<String>,
        task: String,
        #[serde(default)]
        templates: Vec<String>,
        #[serde(default = "default_context")]
        context: Value,
    },

    /// Generate audit steps from audit frameworks
    Audit {
        session_id: Option<String>,
        task: String,
        #[serde(default)]
        frameworks: Vec<String>,
        #[serde(default = "default_context")]
        context: Value,
    },

    /// Complete the current step and move to the next
    Advance {
        session_id: String,
        result: Option<Value>,
    },

    /// Act on the current step: complete, fail, skip, retry, status
    StepAction {
        session_id: String,
        action: String,
        payload: Option<Value>,
    },

    /// Execution status snapshot
    Status { session_id: String },

    /// Full per-step summary
    Summary { session_id: String },

    /// List registered providers of one family
    Providers { family: ProviderFamily },

    /// Check the daemon is alive
    Ping,

    /// Stop the daemon gracefully
    Shutdown,
}

/// Responses from the daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Response {
    /// Acknowledgment with no payload
    Ok,

    SessionCreated(SessionInfo),

    Enhanced(EnhanceResponse),

    /// Cursor moved, or execution finished
    Advanced(AdvanceOutcome),

    /// Current step failed; cursor did not move
    Failed(FailOutcome),

    /// Current step reset and restarted
    Retrying(RetryOutcome),

    Status(ExecutionStatus),

    Summary(ExecutionSummary),

    Providers { providers: Vec<ProviderInfo> },

    Pong { version: String },

    /// Error response; message is safe to show the caller
    Error { message: String },
}
