//! RPC client for talking to the daemon
//!
//! One request per connection: connect, write a line, read a line. The CLI
//! builds on the typed helpers; anything speaking newline-framed JSON over
//! the socket works too.

use std::path::PathBuf;
use std::time::Duration;

use eyre::{Context, Result};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::UnixStream;
use tracing::debug;

use super::listener::MAX_MESSAGE_SIZE;
use super::messages::{ProviderFamily, ProviderInfo, Request, Response};
use crate::engine::{ExecutionStatus, ExecutionSummary};
use crate::enhance::EnhanceResponse;
use crate::session::SessionInfo;

/// Default timeout for RPC operations
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for the daemon's RPC socket
#[derive(Debug, Clone)]
pub struct RpcClient {
    socket_path: PathBuf,
    timeout: Duration,
}

impl RpcClient {
    pub fn new(socket_path: PathBuf) -> Self {
        Self {
            socket_path,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check if the daemon socket exists
    pub fn socket_exists(&self) -> bool {
        self.socket_path.exists()
    }

    pub async fn create_session(&self, name: Option<String>) -> Result<SessionInfo> {
        match self.request(Request::CreateSession { name }).await? {
            Response::SessionCreated(info) => Ok(info),
            other => Err(unexpected(other)),
        }
    }

    pub async fn plan(
        &self,
        session_id: Option<String>,
        task: String,
        templates: Vec<String>,
        context: Value,
    ) -> Result<EnhanceResponse> {
        let request = Request::Plan {
            session_id,
            task,
            templates,
            context,
        };
        match self.request(request).await? {
            Response::Enhanced(response) => Ok(response),
            other => Err(unexpected(other)),
        }
    }

    pub async fn audit(
        &self,
        session_id: Option<String>,
        task: String,
        frameworks: Vec<String>,
        context: Value,
    ) -> Result<EnhanceResponse> {
        let request = Request::Audit {
            session_id,
            task,
            frameworks,
            context,
        };
        match self.request(request).await? {
            Response::Enhanced(response) => Ok(response),
            other => Err(unexpected(other)),
        }
    }

    pub async fn advance(&self, session_id: String, result: Option<Value>) -> Result<Response> {
        self.request(Request::Advance { session_id, result }).await
    }

    pub async fn step_action(
        &self,
        session_id: String,
        action: String,
        payload: Option<Value>,
    ) -> Result<Response> {
        self.request(Request::StepAction {
            session_id,
            action,
            payload,
        })
        .await
    }

    pub async fn status(&self, session_id: String) -> Result<ExecutionStatus> {
        match self.request(Request::Status { session_id }).await? {
            Response::Status(status) => Ok(status),
            other => Err(unexpected(other)),
        }
    }

    pub async fn summary(&self, session_id: String) -> Result<ExecutionSummary> {
        match self.request(Request::Summary { session_id }).await? {
            Response::Summary(summary) => Ok(summary),
            other => Err(unexpected(other)),
        }
    }

    pub async fn providers(&self, family: ProviderFamily) -> Result<Vec<ProviderInfo>> {
        match self.request(Request::Providers { family }).await? {
            Response::Providers { providers } => Ok(providers),
            other => Err(unexpected(other)),
        }
    }

    /// Check the daemon is alive and get its version
    pub async fn ping(&self) -> Result<String> {
        match self.request(Request::Ping).await? {
            Response::Pong { version } => Ok(version),
            other => Err(unexpected(other)),
        }
    }

    /// Ask the daemon to stop gracefully
    pub async fn shutdown(&self) -> Result<()> {
        match self.request(Request::Shutdown).await? {
            Response::Ok => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Send one request and wait for the response
    ///
    /// Daemon-side `Error` responses become Err here, so callers only see
    /// success payloads.
    pub async fn request(&self, request: Request) -> Result<Response> {
        debug!(?self.socket_path, ?request, "RpcClient::request: sending");

        let stream = tokio::time::timeout(self.timeout, UnixStream::connect(&self.socket_path))
            .await
            .context("Connection timeout")?
            .context("Failed to connect to daemon socket")?;

        let response = self.send_on_stream(stream, request).await?;
        match response {
            Response::Error { message } => Err(eyre::eyre!("Daemon error: {}", message)),
            other => Ok(other),
        }
    }

    async fn send_on_stream(&self, mut stream: UnixStream, request: Request) -> Result<Response> {
        let request_json = serde_json::to_string(&request).context("Failed to serialize request")?;

        if request_json.len() > MAX_MESSAGE_SIZE {
            return Err(eyre::eyre!("Request too large: {} bytes", request_json.len()));
        }

        tokio::time::timeout(self.timeout, async {
            stream
                .write_all(request_json.as_bytes())
                .await
                .context("Failed to write request")?;
            stream.write_all(b"\n").await.context("Failed to write newline")?;
            stream.flush().await.context("Failed to flush stream")?;
            Ok::<_, eyre::Error>(())
        })
        .await
        .context("Write timeout")??;

        let mut reader = BufReader::new(&mut stream);
        let mut response_line = String::new();

        tokio::time::timeout(self.timeout, async {
            let bytes_read = reader
                .read_line(&mut response_line)
                .await
                .context("Failed to read response")?;

            if bytes_read > MAX_MESSAGE_SIZE {
                return Err(eyre::eyre!("Response too large: {} bytes", bytes_read));
            }

            Ok::<_, eyre::Error>(())
        })
        .await
        .context("Read timeout")??;

        let response: Response =
            serde_json::from_str(response_line.trim()).context("Failed to parse daemon response")?;

        debug!("RpcClient::request: received response");
        Ok(response)
    }
}

fn unexpected(response: Response) -> eyre::Report {
    eyre::eyre!("Unexpected response: {:?}", response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_client_with_custom_path() {
        let path = PathBuf::from("/custom/path/daemon.sock");
        let client = RpcClient::new(path.clone());
        assert_eq!(client.socket_path, path);
    }

    #[test]
    fn test_client_with_timeout() {
        let client =
            RpcClient::new(PathBuf::from("/tmp/x.sock")).with_timeout(Duration::from_secs(10));
        assert_eq!(client.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_socket_exists_false() {
        let temp = TempDir::new().unwrap();
        let client = RpcClient::new(temp.path().join("nonexistent.sock"));
        assert!(!client.socket_exists());
    }
}
