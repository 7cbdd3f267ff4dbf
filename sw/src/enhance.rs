//! Orchestration facade - plan/audit enhancement over one session store
//!
//! An `Enhancer` ties together provider resolution, step generation, and
//! engine lifecycle for one provider family. The daemon runs two of them
//! (plan templates, audit frameworks) over a shared session store, so a
//! session started by either tool is addressable by the family-agnostic
//! advance/step/status operations.
//!
//! Every failure here is local to one call and comes back as a structured
//! error for the calling LLM to act on; nothing is fatal to the process.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{debug, warn};

use modelkit::{Provider, ProviderRegistry};

use crate::engine::{
    AdvanceOutcome, EngineError, ExecutionStatus, ExecutionSummary, FailOutcome, RetryOutcome,
    TaskExecutionEngine,
};
use crate::session::{SessionInfo, SessionStore};
use crate::step::{ExecutionStep, StepStatus};
use crate::suggest::suggest;

/// Facade-level errors
///
/// Validation errors (unknown session/provider/action, missing parameter),
/// state errors bubbled up from the engine, and provider execution
/// failures. All recoverable by the caller.
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("Invalid session ID: {0}")]
    UnknownSession(String),

    #[error("Unknown provider: {name} (available: {available:?})")]
    UnknownProvider { name: String, available: Vec<String> },

    #[error("No provider matched the text; choose one explicitly (available: {available:?})")]
    NoProviderMatched { available: Vec<String> },

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Unknown step action: {0} (available: complete, fail, skip, retry, status)")]
    UnknownAction(String),

    #[error("No execution engine for session {0}; run plan or audit first")]
    NoEngine(String),

    #[error("Provider {name} failed: {message}")]
    ProviderFailed { name: String, message: String },

    #[error(transparent)]
    Engine(#[from] EngineError),
}

/// What `start_execution` did during an enhance call
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StartReport {
    /// Execution (re)started at the cursor
    Started {
        current_step_index: usize,
        total_steps: usize,
    },
    /// The session's current step was already in flight; nothing restarted
    AlreadyRunning,
}

/// Response to a plan/audit enhancement call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnhanceResponse {
    pub session_id: String,
    /// Resolved provider names, in generation order
    pub providers: Vec<String>,
    /// True when the suggestion engine picked the provider
    pub suggested: bool,
    pub total_steps: usize,
    pub current_step: Option<ExecutionStep>,
    pub execution: StartReport,
}

/// Result of a step action
///
/// Internal to the facade; the daemon maps each variant onto its own
/// tagged wire response.
#[derive(Debug, Clone)]
pub enum StepActionOutcome {
    Advance(AdvanceOutcome),
    Failed(FailOutcome),
    Retrying(RetryOutcome),
    Status(ExecutionStatus),
}

/// Plan or audit enhancement front over a provider registry
pub struct Enhancer {
    store: Arc<SessionStore>,
    registry: Arc<ProviderRegistry>,
}

impl Enhancer {
    pub fn new(store: Arc<SessionStore>, registry: Arc<ProviderRegistry>) -> Self {
        Self { store, registry }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    /// Create a fresh session with a generated id
    pub async fn create_session(&self, name: Option<String>) -> SessionInfo {
        self.store.create(name).await
    }

    /// The core operation: resolve providers, generate steps, feed the
    /// session's engine, start execution
    ///
    /// Provider resolution and generation happen before any session or
    /// engine mutation, so an unknown provider or a generation failure
    /// leaves existing state untouched.
    pub async fn enhance(
        &self,
        session_id: Option<&str>,
        task: &str,
        provider_names: &[String],
        context: &Value,
    ) -> Result<EnhanceResponse, EnhanceError> {
        debug!(?session_id, providers = ?provider_names, "Enhancer::enhance: called");
        if task.trim().is_empty() {
            return Err(EnhanceError::MissingParameter("task"));
        }

        let (providers, suggested) = self.resolve_providers(task, provider_names)?;

        let mut descriptors = Vec::new();
        for provider in &providers {
            let steps = provider.generate(task, context).map_err(|e| {
                warn!(provider = %provider.name(), error = %e, "Enhancer::enhance: provider generation failed");
                EnhanceError::ProviderFailed {
                    name: provider.name().to_string(),
                    message: e.to_string(),
                }
            })?;
            descriptors.extend(steps);
        }
        let names: Vec<String> = providers.iter().map(|p| p.name().to_string()).collect();

        let handle = match session_id {
            Some(id) => self.store.get_or_create(id).await,
            None => {
                let info = self.store.create(None).await;
                self.store.get_or_create(&info.session_id).await
            }
        };
        let mut session = handle.lock().await;
        session.touch();

        let sid = session.session_id.clone();
        let engine = session
            .engine
            .get_or_insert_with(|| TaskExecutionEngine::new(sid.clone()));
        engine.add_steps(descriptors);

        // Start only when the cursor sits on a Pending step (first call, or
        // new steps appended after completion). Never restart an InProgress
        // or Failed step.
        let needs_start = engine
            .current_step()
            .map(|s| s.status == StepStatus::Pending)
            .unwrap_or(!engine.is_started());
        let execution = if needs_start {
            let outcome = engine.start_execution()?;
            StartReport::Started {
                current_step_index: outcome.current_step_index,
                total_steps: outcome.total_steps,
            }
        } else {
            StartReport::AlreadyRunning
        };

        Ok(EnhanceResponse {
            session_id: sid,
            providers: names,
            suggested,
            total_steps: engine.total_steps(),
            current_step: engine.current_step().cloned(),
            execution,
        })
    }

    /// Complete the current step and move on (default result if omitted)
    pub async fn advance(
        &self,
        session_id: &str,
        result: Option<Value>,
    ) -> Result<AdvanceOutcome, EnhanceError> {
        debug!(%session_id, "Enhancer::advance: called");
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| EnhanceError::UnknownSession(session_id.to_string()))?;
        let mut session = handle.lock().await;
        session.touch();

        let engine = session
            .engine
            .as_mut()
            .ok_or_else(|| EnhanceError::NoEngine(session_id.to_string()))?;
        let result = result.unwrap_or_else(|| json!({ "status": "completed" }));
        Ok(engine.complete_current_step(result)?)
    }

    /// Dispatch a named action against the current step
    pub async fn step_action(
        &self,
        session_id: &str,
        action: &str,
        payload: Option<Value>,
    ) -> Result<StepActionOutcome, EnhanceError> {
        debug!(%session_id, %action, "Enhancer::step_action: called");
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| EnhanceError::UnknownSession(session_id.to_string()))?;
        let mut session = handle.lock().await;
        session.touch();

        if action == "status" {
            return Ok(StepActionOutcome::Status(status_of(&session)));
        }

        let sid = session.session_id.clone();
        let engine = session
            .engine
            .as_mut()
            .ok_or(EnhanceError::NoEngine(sid))?;

        match action {
            "complete" => {
                let result = payload.unwrap_or_else(|| json!({ "status": "completed" }));
                Ok(StepActionOutcome::Advance(engine.complete_current_step(result)?))
            }
            "fail" => {
                let error = payload_text(payload, &["error", "message"])
                    .ok_or(EnhanceError::MissingParameter("error"))?;
                Ok(StepActionOutcome::Failed(engine.fail_current_step(&error)?))
            }
            "skip" => {
                let reason = payload_text(payload, &["reason", "message"])
                    .ok_or(EnhanceError::MissingParameter("reason"))?;
                Ok(StepActionOutcome::Advance(engine.skip_current_step(&reason)?))
            }
            "retry" => Ok(StepActionOutcome::Retrying(engine.retry_current_step()?)),
            other => Err(EnhanceError::UnknownAction(other.to_string())),
        }
    }

    /// Execution status snapshot for a session
    pub async fn status(&self, session_id: &str) -> Result<ExecutionStatus, EnhanceError> {
        debug!(%session_id, "Enhancer::status: called");
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| EnhanceError::UnknownSession(session_id.to_string()))?;
        let mut session = handle.lock().await;
        session.touch();
        Ok(status_of(&session))
    }

    /// Execution summary for a session
    pub async fn summary(&self, session_id: &str) -> Result<ExecutionSummary, EnhanceError> {
        debug!(%session_id, "Enhancer::summary: called");
        let handle = self
            .store
            .get(session_id)
            .await
            .ok_or_else(|| EnhanceError::UnknownSession(session_id.to_string()))?;
        let mut session = handle.lock().await;
        session.touch();

        let sid = session.session_id.clone();
        let engine = session
            .engine
            .as_ref()
            .ok_or(EnhanceError::NoEngine(sid))?;
        Ok(engine.execution_summary())
    }

    /// Resolve named providers, or ask the suggester when none are named.
    /// Fails fast before any state is touched.
    fn resolve_providers(
        &self,
        task: &str,
        provider_names: &[String],
    ) -> Result<(Vec<Arc<dyn Provider>>, bool), EnhanceError> {
        if provider_names.is_empty() {
            let ranked = suggest(&self.registry, task);
            let top = ranked.into_iter().next().ok_or_else(|| EnhanceError::NoProviderMatched {
                available: self.registry.list(),
            })?;
            debug!(provider = %top.name, score = top.score, "Enhancer::resolve_providers: suggester picked provider");
            let provider = self
                .registry
                .get(&top.name)
                .ok_or_else(|| EnhanceError::UnknownProvider {
                    name: top.name.clone(),
                    available: self.registry.list(),
                })?;
            return Ok((vec![provider], true));
        }

        let mut providers = Vec::with_capacity(provider_names.len());
        for name in provider_names {
            let provider = self
                .registry
                .get(name)
                .ok_or_else(|| EnhanceError::UnknownProvider {
                    name: name.clone(),
                    available: self.registry.list(),
                })?;
            providers.push(provider);
        }
        Ok((providers, false))
    }
}

/// Status for a session, synthesizing an empty snapshot before the first
/// generate call creates an engine
fn status_of(session: &crate::session::Session) -> ExecutionStatus {
    match &session.engine {
        Some(engine) => engine.execution_status(),
        None => ExecutionStatus {
            session_id: session.session_id.clone(),
            execution_started: false,
            execution_completed: false,
            current_step_index: 0,
            total_steps: 0,
            current_step: None,
            progress_percentage: 0.0,
        },
    }
}

/// Pull a human-readable string out of an action payload: either a bare
/// string or an object with one of the given keys
fn payload_text(payload: Option<Value>, keys: &[&str]) -> Option<String> {
    match payload? {
        Value::String(s) => Some(s),
        Value::Object(map) => keys
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str).map(str::to_string)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DEFAULT_SESSION_TTL;
    use modelkit::StepDescriptor;
    use std::time::Duration;

    fn plan_enhancer() -> Enhancer {
        let store = Arc::new(SessionStore::new(DEFAULT_SESSION_TTL));
        let registry = Arc::new(ProviderRegistry::with_providers(modelkit::mental::all()));
        Enhancer::new(store, registry)
    }

    /// A provider whose generation always fails, for the error path
    struct BrokenProvider;

    impl Provider for BrokenProvider {
        fn name(&self) -> &str {
            "broken"
        }

        fn description(&self) -> &str {
            "generation always fails"
        }

        fn keywords(&self) -> &[regex::Regex] {
            &[]
        }

        fn generate(&self, _task: &str, _context: &Value) -> eyre::Result<Vec<StepDescriptor>> {
            Err(eyre::eyre!("generation backend unavailable"))
        }
    }

    fn enhancer_with_broken_provider() -> Enhancer {
        let store = Arc::new(SessionStore::new(DEFAULT_SESSION_TTL));
        let mut providers = modelkit::mental::all();
        providers.push(Arc::new(BrokenProvider));
        let registry = Arc::new(ProviderRegistry::with_providers(providers));
        Enhancer::new(store, registry)
    }

    fn audit_enhancer_sharing(store: Arc<SessionStore>) -> Enhancer {
        let registry = Arc::new(ProviderRegistry::with_providers(modelkit::audit::all()));
        Enhancer::new(store, registry)
    }

    #[tokio::test]
    async fn test_enhance_with_explicit_provider() {
        let enhancer = plan_enhancer();
        let response = enhancer
            .enhance(
                None,
                "design a microservices architecture",
                &["first_principles".to_string()],
                &json!({}),
            )
            .await
            .unwrap();

        assert_eq!(response.providers, vec!["first_principles"]);
        assert!(!response.suggested);
        assert_eq!(response.total_steps, 3);
        let current = response.current_step.unwrap();
        assert_eq!(current.status, StepStatus::InProgress);
        assert!(matches!(response.execution, StartReport::Started { .. }));
    }

    #[tokio::test]
    async fn test_enhance_concatenates_providers_in_order() {
        let enhancer = plan_enhancer();
        let response = enhancer
            .enhance(
                None,
                "plan the migration",
                &["first_principles".to_string(), "critical_path".to_string()],
                &json!({}),
            )
            .await
            .unwrap();

        // 3 first_principles steps then 6 critical_path steps
        assert_eq!(response.total_steps, 9);
        let summary = enhancer.summary(&response.session_id).await.unwrap();
        assert_eq!(summary.steps[0].name, "Break Down Problem");
        assert_eq!(summary.steps[3].name, "Break Down Tasks");
    }

    #[tokio::test]
    async fn test_unknown_provider_fails_before_mutation() {
        let enhancer = plan_enhancer();
        let info = enhancer.create_session(None).await;

        let err = enhancer
            .enhance(
                Some(&info.session_id),
                "anything",
                &["first_principles".to_string(), "nonexistent".to_string()],
                &json!({}),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, EnhanceError::UnknownProvider { .. }));
        // Session untouched: still no engine
        let status = enhancer.status(&info.session_id).await.unwrap();
        assert!(!status.execution_started);
        assert_eq!(status.total_steps, 0);
    }

    #[tokio::test]
    async fn test_provider_failure_is_reported_without_touching_state() {
        let enhancer = enhancer_with_broken_provider();
        let sid = enhancer
            .enhance(None, "x", &["default".to_string()], &json!({}))
            .await
            .unwrap()
            .session_id;
        let before = enhancer.status(&sid).await.unwrap();

        let err = enhancer
            .enhance(Some(&sid), "more work", &["broken".to_string()], &json!({}))
            .await
            .unwrap_err();
        match err {
            EnhanceError::ProviderFailed { name, message } => {
                assert_eq!(name, "broken");
                assert!(message.contains("generation backend unavailable"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        // The session's engine is exactly as it was
        let after = enhancer.status(&sid).await.unwrap();
        assert_eq!(after.total_steps, before.total_steps);
        assert_eq!(after.current_step_index, before.current_step_index);
        assert_eq!(
            after.current_step.unwrap().status,
            StepStatus::InProgress
        );
    }

    #[tokio::test]
    async fn test_provider_failure_in_a_batch_generates_nothing() {
        let enhancer = enhancer_with_broken_provider();
        let info = enhancer.create_session(None).await;

        // A good provider listed before the broken one must not leak steps in
        let err = enhancer
            .enhance(
                Some(&info.session_id),
                "x",
                &["default".to_string(), "broken".to_string()],
                &json!({}),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, EnhanceError::ProviderFailed { .. }));

        let status = enhancer.status(&info.session_id).await.unwrap();
        assert_eq!(status.total_steps, 0);
        assert!(!status.execution_started);
    }

    #[tokio::test]
    async fn test_enhance_without_name_uses_suggestion() {
        let enhancer = plan_enhancer();
        let response = enhancer
            .enhance(
                None,
                "map the system components and their feedback loops",
                &[],
                &json!({}),
            )
            .await
            .unwrap();

        assert!(response.suggested);
        assert_eq!(response.providers, vec!["systems_thinking"]);
    }

    #[tokio::test]
    async fn test_no_suggestion_is_a_validation_error() {
        let enhancer = plan_enhancer();
        let err = enhancer
            .enhance(None, "zzz qqq xyzzy", &[], &json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, EnhanceError::NoProviderMatched { .. }));
    }

    #[tokio::test]
    async fn test_advance_through_full_sequence() {
        let enhancer = plan_enhancer();
        let response = enhancer
            .enhance(None, "x", &["first_principles".to_string()], &json!({}))
            .await
            .unwrap();
        let sid = response.session_id;

        enhancer.advance(&sid, Some(json!({"out": 1}))).await.unwrap();
        enhancer.advance(&sid, None).await.unwrap();
        let last = enhancer.advance(&sid, None).await.unwrap();

        assert!(matches!(last, AdvanceOutcome::ExecutionCompleted { .. }));
        let status = enhancer.status(&sid).await.unwrap();
        assert!(status.execution_completed);
        assert_eq!(status.progress_percentage, 100.0);
    }

    #[tokio::test]
    async fn test_step_action_fail_retry_complete() {
        let enhancer = plan_enhancer();
        let sid = enhancer
            .enhance(None, "x", &["first_principles".to_string()], &json!({}))
            .await
            .unwrap()
            .session_id;

        let failed = enhancer
            .step_action(&sid, "fail", Some(json!("timeout")))
            .await
            .unwrap();
        assert!(matches!(failed, StepActionOutcome::Failed(_)));

        // Retry on non-failed is rejected later; here it must succeed
        let retrying = enhancer.step_action(&sid, "retry", None).await.unwrap();
        assert!(matches!(retrying, StepActionOutcome::Retrying(_)));

        let err = enhancer.step_action(&sid, "retry", None).await.unwrap_err();
        assert!(matches!(err, EnhanceError::Engine(EngineError::NotFailed)));
    }

    #[tokio::test]
    async fn test_step_action_skip_requires_reason() {
        let enhancer = plan_enhancer();
        let sid = enhancer
            .enhance(None, "x", &["default".to_string()], &json!({}))
            .await
            .unwrap()
            .session_id;

        let err = enhancer.step_action(&sid, "skip", None).await.unwrap_err();
        assert!(matches!(err, EnhanceError::MissingParameter("reason")));

        let skipped = enhancer
            .step_action(&sid, "skip", Some(json!({"reason": "covered"})))
            .await
            .unwrap();
        assert!(matches!(skipped, StepActionOutcome::Advance(_)));
    }

    #[tokio::test]
    async fn test_unknown_action_is_rejected() {
        let enhancer = plan_enhancer();
        let sid = enhancer
            .enhance(None, "x", &["default".to_string()], &json!({}))
            .await
            .unwrap()
            .session_id;

        let err = enhancer.step_action(&sid, "explode", None).await.unwrap_err();
        assert!(matches!(err, EnhanceError::UnknownAction(_)));
    }

    #[tokio::test]
    async fn test_unknown_session_is_rejected() {
        let enhancer = plan_enhancer();
        let err = enhancer.advance("missing", None).await.unwrap_err();
        assert!(matches!(err, EnhanceError::UnknownSession(_)));
    }

    #[tokio::test]
    async fn test_plan_and_audit_share_the_session_space() {
        let store = Arc::new(SessionStore::new(DEFAULT_SESSION_TTL));
        let plan = Enhancer::new(
            store.clone(),
            Arc::new(ProviderRegistry::with_providers(modelkit::mental::all())),
        );
        let audit = audit_enhancer_sharing(store);

        let sid = plan
            .enhance(None, "x", &["default".to_string()], &json!({}))
            .await
            .unwrap()
            .session_id;

        // The audit front can advance a plan session: sessions are family-agnostic
        let outcome = audit.advance(&sid, None).await.unwrap();
        assert!(matches!(outcome, AdvanceOutcome::StepAdvanced { .. }));
    }

    #[tokio::test]
    async fn test_two_sessions_do_not_cross_contaminate() {
        let enhancer = plan_enhancer();
        let a = enhancer
            .enhance(None, "a", &["default".to_string()], &json!({}))
            .await
            .unwrap()
            .session_id;
        let b = enhancer
            .enhance(None, "b", &["first_principles".to_string()], &json!({}))
            .await
            .unwrap()
            .session_id;

        enhancer.advance(&a, None).await.unwrap();

        let status_a = enhancer.status(&a).await.unwrap();
        let status_b = enhancer.status(&b).await.unwrap();
        assert_eq!(status_a.current_step_index, 1);
        assert_eq!(status_b.current_step_index, 0);
        assert_eq!(status_a.total_steps, 4);
        assert_eq!(status_b.total_steps, 3);
    }

    #[tokio::test]
    async fn test_concurrent_sessions_mutate_independently() {
        let enhancer = Arc::new(plan_enhancer());
        let mut ids = Vec::new();
        for _ in 0..4 {
            let sid = enhancer
                .enhance(None, "x", &["default".to_string()], &json!({}))
                .await
                .unwrap()
                .session_id;
            ids.push(sid);
        }

        let mut handles = Vec::new();
        for sid in ids.clone() {
            let enhancer = enhancer.clone();
            handles.push(tokio::spawn(async move {
                enhancer.advance(&sid, None).await.unwrap();
                enhancer.advance(&sid, None).await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for sid in ids {
            let status = enhancer.status(&sid).await.unwrap();
            assert_eq!(status.current_step_index, 2);
        }
    }

    #[tokio::test]
    async fn test_enhance_after_completion_appends_and_restarts() {
        let enhancer = plan_enhancer();
        let sid = enhancer
            .enhance(None, "x", &["first_principles".to_string()], &json!({}))
            .await
            .unwrap()
            .session_id;
        for _ in 0..3 {
            enhancer.advance(&sid, None).await.unwrap();
        }
        assert!(enhancer.status(&sid).await.unwrap().execution_completed);

        let response = enhancer
            .enhance(Some(&sid), "follow-up", &["default".to_string()], &json!({}))
            .await
            .unwrap();
        assert_eq!(response.total_steps, 7);
        assert!(matches!(response.execution, StartReport::Started { .. }));
        assert!(!enhancer.status(&sid).await.unwrap().execution_completed);
    }

    #[tokio::test]
    async fn test_enhance_while_running_does_not_restart_current_step() {
        let enhancer = plan_enhancer();
        let sid = enhancer
            .enhance(None, "x", &["default".to_string()], &json!({}))
            .await
            .unwrap()
            .session_id;

        let response = enhancer
            .enhance(Some(&sid), "more work", &["first_principles".to_string()], &json!({}))
            .await
            .unwrap();
        assert!(matches!(response.execution, StartReport::AlreadyRunning));
        assert_eq!(response.total_steps, 7);
        assert_eq!(
            response.current_step.unwrap().status,
            StepStatus::InProgress
        );
    }

    // Idle eviction with a tiny TTL, exercised through the facade
    #[tokio::test]
    async fn test_expired_session_becomes_unknown() {
        let store = Arc::new(SessionStore::new(Duration::from_millis(10)));
        let enhancer = Enhancer::new(
            store,
            Arc::new(ProviderRegistry::with_providers(modelkit::mental::all())),
        );
        let sid = enhancer
            .enhance(None, "x", &["default".to_string()], &json!({}))
            .await
            .unwrap()
            .session_id;

        tokio::time::sleep(Duration::from_millis(50)).await;
        let err = enhancer.advance(&sid, None).await.unwrap_err();
        assert!(matches!(err, EnhanceError::UnknownSession(_)));
    }
}
