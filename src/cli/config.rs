//! `profilometer-lab config` - write or inspect the configuration file

use anyhow::{bail, Context, Result};
use clap::Subcommand;
use profilometer_settings::{default_config_path, Config};
use std::path::PathBuf;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write a configuration file with default values
    Init {
        /// Target file (.toml or .json); defaults to the platform config dir
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show {
        /// File to read; defaults to the platform config dir
        path: Option<PathBuf>,
    },
}

/// Run the config command
pub fn run(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Init { path, force } => run_init(path, force),
        ConfigCommands::Show { path } => run_show(path),
    }
}

fn resolve(path: Option<PathBuf>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(path),
        None => Ok(default_config_path()?),
    }
}

fn run_init(path: Option<PathBuf>, force: bool) -> Result<()> {
    let path = resolve(path)?;
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    Config::default()
        .save_to_file(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn run_show(path: Option<PathBuf>) -> Result<()> {
    let config = Config::load_or_default(path.as_deref())?;
    print!("{}", config.to_toml()?);
    Ok(())
}
