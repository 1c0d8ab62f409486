//! CLI module - argument parsing and command dispatch

pub mod config;
pub mod quiz;
pub mod run;
pub mod workpieces;

use clap::{Parser, Subcommand};

/// Virtual contact profilometer lab
#[derive(Parser, Debug)]
#[command(name = "profilometer-lab")]
#[command(about = "Measure virtual surface roughness and check your understanding", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a full measurement: select, zero, scan and report Ra/Rz
    Run(run::RunArgs),

    /// List the workpieces available on the bench
    Workpieces(workpieces::WorkpiecesArgs),

    /// Score a quiz answer file
    Quiz(quiz::QuizArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(config::ConfigCommands),
}
