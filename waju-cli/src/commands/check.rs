//! Validate the configuration and summarize what it wires up.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use waju_core::Config;

#[derive(Serialize)]
struct ConfigSummary<'a> {
    site: &'a str,
    sources: Vec<&'a str>,
    remark_plugins: Vec<&'a str>,
    analytics: bool,
    sitemap: bool,
    feed: Option<String>,
    css_pipeline: &'a [String],
    purge_content: &'a [String],
    whitelist_patterns: &'a [String],
}

pub fn check_config(config_path: &Path, json: bool) -> Result<()> {
    let config = Config::from_file(config_path).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    let summary = ConfigSummary {
        site: &config.site.name,
        sources: config.sources.iter().map(|s| s.type_name.as_str()).collect(),
        remark_plugins: config
            .transformers
            .remark
            .plugins
            .iter()
            .map(|p| p.name.as_str())
            .collect(),
        analytics: config.analytics.is_some(),
        sitemap: config.sitemap.is_some(),
        feed: config
            .feed
            .as_ref()
            .map(|f| f.output_path().to_string_lossy().into_owned()),
        css_pipeline: &config.css.pipeline,
        purge_content: &config.css.purge.content,
        whitelist_patterns: &config.css.purge.whitelist_patterns,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    println!("Configuration OK: {}", summary.site);
    println!("- sources: {}", summary.sources.join(", "));
    println!("- remark plugins: {}", summary.remark_plugins.join(", "));
    println!(
        "- analytics: {}, sitemap: {}",
        on_off(summary.analytics),
        on_off(summary.sitemap)
    );
    if let Some(feed) = &summary.feed {
        println!("- feed: {}", feed);
    }
    println!("- css pipeline: {}", summary.css_pipeline.join(" -> "));
    println!("- purge content: {}", summary.purge_content.join(", "));

    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
