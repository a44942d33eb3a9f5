//! Print configuration values.

use anyhow::{bail, Context, Result};
use std::path::Path;
use waju_core::Config;

pub fn show_config(config_path: &Path, key: Option<&str>) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;

    match key {
        Some(key) => match config.get(key) {
            Some(value) => println!("{}", value),
            None => bail!("Unknown or unset config key: {}", key),
        },
        None => print!("{}", serde_yaml::to_string(&config)?),
    }

    Ok(())
}
