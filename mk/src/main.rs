use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use log::info;

use modelkit::cli::{Cli, Command, Family};
use modelkit::{ProviderRegistry, audit, mental};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn registry_for(family: Family) -> ProviderRegistry {
    match family {
        Family::Mental => ProviderRegistry::with_providers(mental::all()),
        Family::Audit => ProviderRegistry::with_providers(audit::all()),
    }
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    info!("modelkit starting");

    match cli.command {
        Command::List { family } => {
            let registry = registry_for(family);
            for provider in registry.iter() {
                println!("{}  {}", provider.name().cyan(), provider.description().dimmed());
            }
        }
        Command::Show { name, family, task } => {
            let registry = registry_for(family);
            let provider = registry
                .get(&name)
                .ok_or_else(|| eyre!("Unknown template: {} (try `mk list`)", name))?;

            println!("{} - {}", provider.name().cyan().bold(), provider.description());
            let steps = provider
                .generate(&task, &serde_json::Value::Null)
                .context("Template generation failed")?;
            for (i, step) in steps.iter().enumerate() {
                println!(
                    "{} {} {}",
                    format!("{:>2}.", i + 1).dimmed(),
                    step.name.green(),
                    format!("[{}]", step.kind).yellow()
                );
                println!("    {}", step.description);
                if let Some(expected) = &step.expected_output {
                    println!("    {} {}", "->".dimmed(), expected.dimmed());
                }
            }
        }
    }

    Ok(())
}
