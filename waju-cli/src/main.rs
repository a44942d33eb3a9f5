//! # waju CLI
//!
//! Command-line interface for the waju blog build's CSS purge step.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use waju_types::BuildMode;

#[derive(Parser)]
#[command(name = "waju")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "waju.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the candidate class-name tokens of source files
    Extract {
        /// Files to scan
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Decide which stylesheet classes survive dead-code elimination
    Purge {
        /// Compiled stylesheet (relative paths resolve against the config file)
        #[arg(long)]
        stylesheet: PathBuf,

        /// Build mode (production/prod or development/dev); elimination only runs in production
        #[arg(long, env = "WAJU_BUILD_MODE", default_value = "development", value_parser = parse_build_mode)]
        mode: BuildMode,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Load and validate the configuration
    Check {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print a config value by dotted key, or the whole config
    Config {
        /// Dotted key (e.g. site.name)
        key: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout stays machine readable
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Extract { files, json } => commands::extract_files(&files, json),
        Commands::Purge {
            stylesheet,
            mode,
            json,
        } => commands::purge_stylesheet(&cli.config, &stylesheet, mode, json),
        Commands::Check { json } => commands::check_config(&cli.config, json),
        Commands::Config { key } => commands::show_config(&cli.config, key.as_deref()),
    }
}

fn parse_build_mode(s: &str) -> Result<BuildMode, String> {
    BuildMode::from_str(s).ok_or_else(|| {
        format!(
            "unknown build mode '{}' (expected production, prod, development or dev)",
            s
        )
    })
}
