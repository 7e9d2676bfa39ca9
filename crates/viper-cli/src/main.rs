mod commands;
mod watcher;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::env;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use viper::ViperConfig;
use viper_router::RouterTarget;

#[derive(Parser)]
#[command(name = "viper")]
#[command(version, about = "Viper CLI - file-based routes for Laravel + Vue/React", long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(short, long, global = true, default_value = "viper.toml")]
    config: PathBuf,

    /// Show debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover pages, then write the router module and manifest
    Build,

    /// Print the route table in registration order
    Routes {
        /// Router whose path syntax to print
        #[arg(short, long, default_value = "laravel")]
        target: Target,
    },

    /// Print the resolved configuration
    Config,

    /// Build, then rebuild whenever pages, layouts or server files change
    Watch,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Target {
    /// Laravel route definitions
    Laravel,
    /// Vue Router
    Vue,
    /// React Router
    React,
}

impl From<Target> for RouterTarget {
    fn from(target: Target) -> Self {
        match target {
            Target::Laravel => RouterTarget::Laravel,
            Target::Vue => RouterTarget::Vue,
            Target::React => RouterTarget::React,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Loads the config, anchoring relative paths at the config file's directory
fn load_config(path: &Path) -> Result<ViperConfig> {
    let config = ViperConfig::load(path)?;
    let root = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent.to_path_buf(),
        None => env::current_dir().context("Failed to read current directory")?,
    };
    Ok(config.with_root(root))
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli.config)?;

    // Execute command
    match cli.command {
        Commands::Build => {
            commands::build::execute(&config)?;
        }
        Commands::Routes { target } => {
            commands::routes::execute(&config, target.into())?;
        }
        Commands::Config => {
            commands::config::execute(&config)?;
        }
        Commands::Watch => {
            commands::watch::execute(&config)?;
        }
    }

    Ok(())
}
