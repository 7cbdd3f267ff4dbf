//! The stepwise daemon
//!
//! Owns the session store and the two enhancement fronts (plan templates,
//! audit frameworks), and serves them over the RPC socket. One request per
//! connection, handled inline; every operation is a short in-memory state
//! transition, so there is no per-connection task fan-out.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use eyre::Result;
use modelkit::ProviderRegistry;
use tokio::net::UnixStream;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::enhance::{Enhancer, StepActionOutcome};
use crate::rpc::listener::{cleanup_socket, create_listener, read_request, send_response};
use crate::rpc::messages::{ProviderFamily, ProviderInfo, Request, Response};
use crate::session::SessionStore;

/// How long one connection may take to deliver its request
const REQUEST_READ_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Daemon {
    plan: Enhancer,
    audit: Enhancer,
    store: Arc<SessionStore>,
    socket_path: PathBuf,
    sweep_interval: Duration,
}

impl Daemon {
    pub fn new(config: &Config) -> Self {
        let store = Arc::new(SessionStore::new(config.session_ttl()));
        let plan = Enhancer::new(
            store.clone(),
            Arc::new(ProviderRegistry::with_providers(modelkit::mental::all())),
        );
        let audit = Enhancer::new(
            store.clone(),
            Arc::new(ProviderRegistry::with_providers(modelkit::audit::all())),
        );
        Self {
            plan,
            audit,
            store,
            socket_path: config.socket_path.clone(),
            sweep_interval: config.sweep_interval(),
        }
    }

    /// Serve requests until a Shutdown request or ctrl-c
    pub async fn run(self) -> Result<()> {
        let (listener, socket_path) = create_listener(&self.socket_path)?;
        info!(?socket_path, "Daemon::run: listening");

        let mut sweep = tokio::time::interval(self.sweep_interval);
        // The first tick fires immediately; skip it
        sweep.tick().await;

        loop {
            tokio::select! {
                accept_result = listener.accept() => {
                    match accept_result {
                        Ok((stream, _addr)) => {
                            debug!("Daemon::run: connection accepted");
                            if self.serve_connection(stream).await {
                                info!("Daemon::run: shutdown requested");
                                break;
                            }
                        }
                        Err(e) => {
                            warn!(error = %e, "Daemon::run: accept error");
                        }
                    }
                }
                _ = sweep.tick() => {
                    let evicted = self.store.evict_idle().await;
                    debug!(evicted, "Daemon::run: idle sweep done");
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("Daemon::run: ctrl-c received");
                    break;
                }
            }
        }

        cleanup_socket(&socket_path);
        info!("Daemon::run: stopped");
        Ok(())
    }

    /// Handle one connection; returns true when the client asked us to stop
    async fn serve_connection(&self, mut stream: UnixStream) -> bool {
        let request =
            match tokio::time::timeout(REQUEST_READ_TIMEOUT, read_request(&mut stream)).await {
                Ok(Ok(request)) => request,
                Ok(Err(e)) => {
                    warn!(error = %e, "Daemon::serve_connection: bad request");
                    let response = Response::Error {
                        message: format!("Bad request: {e}"),
                    };
                    if let Err(e) = send_response(&mut stream, response).await {
                        debug!(error = %e, "Daemon::serve_connection: failed to send error");
                    }
                    return false;
                }
                Err(_) => {
                    warn!("Daemon::serve_connection: request read timed out");
                    return false;
                }
            };

        let shutdown = matches!(request, Request::Shutdown);
        let response = self.handle(request).await;
        if let Err(e) = send_response(&mut stream, response).await {
            warn!(error = %e, "Daemon::serve_connection: failed to send response");
        }
        shutdown
    }

    /// Dispatch one request
    ///
    /// Facade errors become `Response::Error`; they are caller mistakes or
    /// recoverable state conflicts, never daemon failures.
    pub async fn handle(&self, request: Request) -> Response {
        match request {
            Request::CreateSession { name } => {
                Response::SessionCreated(self.plan.create_session(name).await)
            }
            Request::Plan {
                session_id,
                task,
                templates,
                context,
            } => {
                match self
                    .plan
                    .enhance(session_id.as_deref(), &task, &templates, &context)
                    .await
                {
                    Ok(response) => Response::Enhanced(response),
                    Err(e) => error_response(e),
                }
            }
            Request::Audit {
                session_id,
                task,
                frameworks,
                context,
            } => {
                match self
                    .audit
                    .enhance(session_id.as_deref(), &task, &frameworks, &context)
                    .await
                {
                    Ok(response) => Response::Enhanced(response),
                    Err(e) => error_response(e),
                }
            }
            Request::Advance { session_id, result } => {
                match self.plan.advance(&session_id, result).await {
                    Ok(outcome) => Response::Advanced(outcome),
                    Err(e) => error_response(e),
                }
            }
            Request::StepAction {
                session_id,
                action,
                payload,
            } => match self.plan.step_action(&session_id, &action, payload).await {
                Ok(StepActionOutcome::Advance(outcome)) => Response::Advanced(outcome),
                Ok(StepActionOutcome::Failed(outcome)) => Response::Failed(outcome),
                Ok(StepActionOutcome::Retrying(outcome)) => Response::Retrying(outcome),
                Ok(StepActionOutcome::Status(status)) => Response::Status(status),
                Err(e) => error_response(e),
            },
            Request::Status { session_id } => match self.plan.status(&session_id).await {
                Ok(status) => Response::Status(status),
                Err(e) => error_response(e),
            },
            Request::Summary { session_id } => match self.plan.summary(&session_id).await {
                Ok(summary) => Response::Summary(summary),
                Err(e) => error_response(e),
            },
            Request::Providers { family } => {
                let registry = match family {
                    ProviderFamily::Mental => self.plan.registry(),
                    ProviderFamily::Audit => self.audit.registry(),
                };
                let providers = registry
                    .iter()
                    .map(|p| ProviderInfo {
                        name: p.name().to_string(),
                        description: p.description().to_string(),
                    })
                    .collect();
                Response::Providers { providers }
            }
            Request::Ping => Response::Pong {
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            Request::Shutdown => Response::Ok,
        }
    }
}

fn error_response(e: crate::enhance::EnhanceError) -> Response {
    Response::Error {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn daemon() -> Daemon {
        Daemon::new(&Config::default())
    }

    #[tokio::test]
    async fn test_ping_reports_version() {
        let response = daemon().handle(Request::Ping).await;
        match response {
            Response::Pong { version } => assert_eq!(version, env!("CARGO_PKG_VERSION")),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_providers_lists_both_families() {
        let daemon = daemon();

        let mental = daemon
            .handle(Request::Providers {
                family: ProviderFamily::Mental,
            })
            .await;
        match mental {
            Response::Providers { providers } => {
                assert_eq!(providers.len(), 9);
                assert_eq!(providers[0].name, "default");
            }
            other => panic!("unexpected response: {other:?}"),
        }

        let audit = daemon
            .handle(Request::Providers {
                family: ProviderFamily::Audit,
            })
            .await;
        match audit {
            Response::Providers { providers } => {
                assert_eq!(providers.len(), 6);
                assert!(providers.iter().any(|p| p.name == "security_audit"));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_plan_then_advance_through_daemon() {
        let daemon = daemon();

        let session_id = match daemon
            .handle(Request::Plan {
                session_id: None,
                task: "x".to_string(),
                templates: vec!["first_principles".to_string()],
                context: json!({}),
            })
            .await
        {
            Response::Enhanced(response) => response.session_id,
            other => panic!("unexpected response: {other:?}"),
        };

        for _ in 0..2 {
            let response = daemon
                .handle(Request::Advance {
                    session_id: session_id.clone(),
                    result: None,
                })
                .await;
            assert!(matches!(response, Response::Advanced(_)));
        }

        let response = daemon
            .handle(Request::Status {
                session_id: session_id.clone(),
            })
            .await;
        match response {
            Response::Status(status) => {
                assert_eq!(status.current_step_index, 2);
                assert!(!status.execution_completed);
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_audit_session_is_reachable_via_generic_operations() {
        let daemon = daemon();

        let session_id = match daemon
            .handle(Request::Audit {
                session_id: None,
                task: "review access controls".to_string(),
                frameworks: vec!["security_audit".to_string()],
                context: json!({}),
            })
            .await
        {
            Response::Enhanced(response) => {
                assert_eq!(response.total_steps, 4);
                response.session_id
            }
            other => panic!("unexpected response: {other:?}"),
        };

        let response = daemon
            .handle(Request::StepAction {
                session_id,
                action: "complete".to_string(),
                payload: Some(json!({"findings": []})),
            })
            .await;
        assert!(matches!(response, Response::Advanced(_)));
    }

    #[tokio::test]
    async fn test_facade_errors_become_error_responses() {
        let daemon = daemon();
        let response = daemon
            .handle(Request::Advance {
                session_id: "missing".to_string(),
                result: None,
            })
            .await;
        match response {
            Response::Error { message } => assert!(message.contains("Invalid session ID")),
            other => panic!("unexpected response: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_template_reports_available() {
        let daemon = daemon();
        let response = daemon
            .handle(Request::Plan {
                session_id: None,
                task: "x".to_string(),
                templates: vec!["nonexistent".to_string()],
                context: json!({}),
            })
            .await;
        match response {
            Response::Error { message } => {
                assert!(message.contains("Unknown provider: nonexistent"));
                assert!(message.contains("default"));
            }
            other => panic!("unexpected response: {other:?}"),
        }
    }
}
