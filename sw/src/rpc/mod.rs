//! JSON-over-newline RPC between the CLI and the daemon
//!
//! Each request and response is a single line of JSON followed by `\n`,
//! carried over a Unix Domain Socket. One request per connection.

use std::path::PathBuf;

pub mod client;
pub mod listener;
pub mod messages;

pub use client::RpcClient;
pub use messages::{ProviderFamily, ProviderInfo, Request, Response};

/// Default socket path for the daemon
pub fn default_socket_path() -> PathBuf {
    dirs::runtime_dir()
        .or_else(dirs::data_local_dir)
        .unwrap_or_else(|| PathBuf::from("/tmp"))
        .join("stepwise")
        .join("daemon.sock")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_socket_path_ends_with_daemon_sock() {
        let path = default_socket_path();
        assert!(path.ends_with("stepwise/daemon.sock"));
    }
}
