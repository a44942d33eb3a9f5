//! Purge command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use waju_core::{Config, Purger};
use waju_types::BuildMode;

/// Plan dead-code elimination for a compiled stylesheet
pub fn purge_stylesheet(
    config_path: &Path,
    stylesheet: &Path,
    mode: BuildMode,
    json: bool,
) -> Result<()> {
    tracing::info!("Loading config from {:?}", config_path);
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let purger = Purger::from_config(&config).context("Failed to set up purge")?;
    let report = purger
        .run_file(mode, stylesheet)
        .context("Failed to plan purge")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !report.enabled {
        println!(
            "Purge disabled in {} mode: keeping all {} classes",
            report.mode.as_str(),
            report.defined
        );
        return Ok(());
    }

    println!(
        "Scanned {} files ({} candidates): {} of {} classes retained, {} eliminated",
        report.files_scanned,
        report.candidates,
        report.retained.len(),
        report.defined,
        report.eliminated.len()
    );
    for name in &report.whitelisted {
        println!("  kept (whitelist): {}", name);
    }
    for name in &report.eliminated {
        println!("  removed: {}", name);
    }

    Ok(())
}
