//! stepwise - step-tracked plan and audit sessions for LLM callers
//!
//! The caller describes a task; stepwise generates a structured step
//! sequence from mental model templates or audit frameworks (via the
//! `modelkit` crate), then tracks the caller's progress through it: one
//! cursor per session, explicit complete/fail/skip/retry transitions, and
//! an append-only event log per step. The daemon serves all of this over a
//! newline-framed JSON RPC socket.
//!
//! stepwise never executes the steps. The caller does the work and reports
//! back; the engine only guards the lifecycle.

pub mod cli;
pub mod config;
pub mod engine;
pub mod enhance;
pub mod rpc;
pub mod server;
pub mod session;
pub mod step;
pub mod suggest;

pub use config::Config;
pub use engine::{EngineError, TaskExecutionEngine};
pub use enhance::{EnhanceError, EnhanceResponse, Enhancer};
pub use server::Daemon;
pub use session::{SessionInfo, SessionStore};
pub use step::{ExecutionStep, StepStatus};
pub use suggest::{Suggestion, suggest};
