//! stepwise - step-tracked plan and audit sessions
//!
//! CLI entry point: runs the daemon in the foreground, or talks to a
//! running daemon over its RPC socket.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use serde_json::Value;
use tracing::{debug, info};

use stepwise::cli::{Cli, Command};
use stepwise::config::Config;
use stepwise::engine::{AdvanceOutcome, ExecutionStatus, ExecutionSummary};
use stepwise::enhance::EnhanceResponse;
use stepwise::rpc::{Response, RpcClient};
use stepwise::server::Daemon;
use stepwise::step::StepStatus;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("stepwise")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file =
        fs::File::create(log_dir.join("stepwise.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(socket) = &cli.socket {
        config.socket_path = socket.clone();
    }

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref())
        .context("Failed to setup logging")?;

    debug!(command = ?cli.command, "main: dispatching command");
    let client = RpcClient::new(config.socket_path.clone());

    match cli.command {
        Command::Serve => {
            let daemon = Daemon::new(&config);
            daemon.run().await
        }
        Command::Ping => {
            let version = client.ping().await?;
            println!("{} (version {})", "daemon is running".green(), version);
            Ok(())
        }
        Command::Stop => {
            client.shutdown().await?;
            println!("{}", "daemon stopped".green());
            Ok(())
        }
        Command::Providers { family } => {
            let providers = client.providers(family.into()).await?;
            for provider in providers {
                println!("{}  {}", provider.name.cyan(), provider.description.dimmed());
            }
            Ok(())
        }
        Command::Session { name } => {
            let info = client.create_session(name).await?;
            println!("{}", info.session_id);
            Ok(())
        }
        Command::Plan {
            task,
            session,
            templates,
            context,
        } => {
            let context = parse_context(context.as_deref())?;
            let response = client.plan(session, task, templates, context).await?;
            print_enhanced(&response);
            Ok(())
        }
        Command::Audit {
            task,
            session,
            frameworks,
            context,
        } => {
            let context = parse_context(context.as_deref())?;
            let response = client.audit(session, task, frameworks, context).await?;
            print_enhanced(&response);
            Ok(())
        }
        Command::Advance { session_id, result } => {
            let result = result
                .as_deref()
                .map(serde_json::from_str::<Value>)
                .transpose()
                .context("--result must be valid JSON")?;
            let response = client.advance(session_id, result).await?;
            print_response(&response);
            Ok(())
        }
        Command::Step {
            session_id,
            action,
            payload,
        } => {
            // Bare strings are the common case; fall back to a JSON string
            let payload = payload.map(|p| {
                serde_json::from_str::<Value>(&p).unwrap_or(Value::String(p))
            });
            let response = client.step_action(session_id, action, payload).await?;
            print_response(&response);
            Ok(())
        }
        Command::Status { session_id } => {
            let status = client.status(session_id).await?;
            print_status(&status);
            Ok(())
        }
        Command::Summary { session_id } => {
            let summary = client.summary(session_id).await?;
            print_summary(&summary);
            Ok(())
        }
    }
}

fn parse_context(context: Option<&str>) -> Result<Value> {
    match context {
        Some(raw) => serde_json::from_str(raw).context("--context must be valid JSON"),
        None => Ok(serde_json::json!({})),
    }
}

fn status_color(status: StepStatus) -> ColoredString {
    let text = status.to_string();
    match status {
        StepStatus::Pending => text.dimmed(),
        StepStatus::InProgress => text.yellow(),
        StepStatus::Completed => text.green(),
        StepStatus::Failed => text.red(),
        StepStatus::Skipped => text.blue(),
    }
}

fn print_enhanced(response: &EnhanceResponse) {
    let source = if response.suggested { " (suggested)" } else { "" };
    println!(
        "session {}  providers: {}{}",
        response.session_id.cyan(),
        response.providers.join(", ").green(),
        source.dimmed()
    );
    println!("{} steps total", response.total_steps);
    if let Some(step) = &response.current_step {
        println!(
            "current: {} {}",
            step.name.bold(),
            status_color(step.status)
        );
    }
}

fn print_response(response: &Response) {
    match response {
        Response::Advanced(AdvanceOutcome::StepAdvanced {
            finished,
            next,
            current_step_index,
            total_steps,
        }) => {
            println!(
                "{} {} ({}/{})",
                finished.name.bold(),
                status_color(finished.status),
                current_step_index,
                total_steps
            );
            println!("next: {} {}", next.name.bold(), status_color(next.status));
        }
        Response::Advanced(AdvanceOutcome::ExecutionCompleted { summary, .. }) => {
            println!("{}", "execution completed".green().bold());
            print_summary(summary);
        }
        Response::Failed(outcome) => {
            println!(
                "{} {}",
                outcome.failed.name.bold(),
                status_color(outcome.failed.status)
            );
            if let Some(error) = &outcome.failed.error {
                println!("error: {}", error.red());
            }
            println!("retry or skip to continue");
        }
        Response::Retrying(outcome) => {
            println!(
                "retrying: {} ({}/{})",
                outcome.current_step.name.bold(),
                outcome.current_step_index,
                outcome.total_steps
            );
        }
        Response::Status(status) => print_status(status),
        other => println!("{other:?}"),
    }
}

fn print_status(status: &ExecutionStatus) {
    println!(
        "session {}  {:.0}% ({}/{})",
        status.session_id.cyan(),
        status.progress_percentage,
        status.current_step_index,
        status.total_steps
    );
    if status.execution_completed {
        println!("{}", "completed".green());
    } else if let Some(step) = &status.current_step {
        println!(
            "current: {} {}",
            step.name.bold(),
            status_color(step.status)
        );
    } else if !status.execution_started {
        println!("{}", "not started".dimmed());
    }
}

fn print_summary(summary: &ExecutionSummary) {
    for (i, row) in summary.steps.iter().enumerate() {
        println!(
            "{} {} {}",
            format!("{:>2}.", i + 1).dimmed(),
            row.name,
            status_color(row.status)
        );
        if let Some(error) = &row.error {
            println!("    {}", error.red());
        }
    }
    let counts: Vec<String> = summary
        .status_counts
        .iter()
        .map(|(status, count)| format!("{status}: {count}"))
        .collect();
    println!("{}", counts.join("  ").dimmed());
}
