//! CLI argument parsing for stepwise

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::rpc::ProviderFamily;

#[derive(Parser, Debug)]
#[command(name = "sw")]
#[command(author, version, about = "Step-tracked plan and audit sessions", long_about = None)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Override the daemon socket path
    #[arg(long, global = true)]
    pub socket: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Family {
    Mental,
    Audit,
}

impl From<Family> for ProviderFamily {
    fn from(family: Family) -> Self {
        match family {
            Family::Mental => ProviderFamily::Mental,
            Family::Audit => ProviderFamily::Audit,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the daemon in the foreground
    Serve,

    /// Check the daemon is alive
    Ping,

    /// Ask the daemon to stop gracefully
    Stop,

    /// List registered providers
    Providers {
        /// Provider family to list
        #[arg(short, long, value_enum, default_value = "mental")]
        family: Family,
    },

    /// Create an empty session
    Session {
        /// Optional display name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Generate plan steps from mental model templates
    Plan {
        /// The task to plan
        #[arg(required = true)]
        task: String,

        /// Existing session to extend
        #[arg(short, long)]
        session: Option<String>,

        /// Template names; omitted means suggest from the task text
        #[arg(short, long = "template")]
        templates: Vec<String>,

        /// Extra context as a JSON object
        #[arg(long)]
        context: Option<String>,
    },

    /// Generate audit steps from audit frameworks
    Audit {
        /// The subject to audit
        #[arg(required = true)]
        task: String,

        /// Existing session to extend
        #[arg(short, long)]
        session: Option<String>,

        /// Framework names; omitted means suggest from the task text
        #[arg(short, long = "framework")]
        frameworks: Vec<String>,

        /// Extra context as a JSON object
        #[arg(long)]
        context: Option<String>,
    },

    /// Complete the current step and move to the next
    Advance {
        /// Session ID
        #[arg(required = true)]
        session_id: String,

        /// Step result as JSON
        #[arg(short, long)]
        result: Option<String>,
    },

    /// Act on the current step: complete, fail, skip, retry, status
    Step {
        /// Session ID
        #[arg(required = true)]
        session_id: String,

        /// Action name
        #[arg(required = true)]
        action: String,

        /// Action payload: a string, or JSON with an error/reason field
        #[arg(short, long)]
        payload: Option<String>,
    },

    /// Show execution status for a session
    Status {
        /// Session ID
        #[arg(required = true)]
        session_id: String,
    },

    /// Show the per-step summary for a session
    Summary {
        /// Session ID
        #[arg(required = true)]
        session_id: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parses_repeated_templates() {
        let cli = Cli::try_parse_from([
            "sw",
            "plan",
            "migrate the database",
            "--template",
            "first_principles",
            "--template",
            "critical_path",
        ])
        .unwrap();

        match cli.command {
            Command::Plan { task, templates, .. } => {
                assert_eq!(task, "migrate the database");
                assert_eq!(templates, vec!["first_principles", "critical_path"]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_step_requires_action() {
        assert!(Cli::try_parse_from(["sw", "step", "session-1"]).is_err());
    }

    #[test]
    fn test_providers_family_defaults_to_mental() {
        let cli = Cli::try_parse_from(["sw", "providers"]).unwrap();
        match cli.command {
            Command::Providers { family } => assert_eq!(family, Family::Mental),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_socket_flag() {
        let cli = Cli::try_parse_from(["sw", "ping", "--socket", "/tmp/x.sock"]).unwrap();
        assert_eq!(cli.socket, Some(PathBuf::from("/tmp/x.sock")));
    }
}
