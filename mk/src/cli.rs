//! CLI argument parsing for modelkit

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "mk")]
#[command(author, version, about = "Mental model and audit framework template library", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Which template family to operate on
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Family {
    /// Mental models (planning)
    #[default]
    Mental,
    /// Audit frameworks
    Audit,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registered templates
    List {
        /// Template family
        #[arg(short, long, value_enum, default_value_t = Family::Mental)]
        family: Family,
    },

    /// Show one template's generated steps for a sample task
    Show {
        /// Template name
        #[arg(required = true)]
        name: String,

        /// Template family
        #[arg(short, long, value_enum, default_value_t = Family::Mental)]
        family: Family,

        /// Task text to interpolate into the steps
        #[arg(short, long, default_value = "example task")]
        task: String,
    },
}
