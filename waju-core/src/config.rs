//! Configuration parsing and management.

use crate::purge::Whitelist;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Placeholder replaced by the page title in `site.title_template`
pub const TITLE_PLACEHOLDER: &str = "%s";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),

    #[error("Invalid whitelist pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration struct matching the waju.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub site: SiteConfig,

    #[serde(default)]
    pub transformers: TransformersConfig,

    #[serde(default)]
    pub sources: Vec<SourceConfig>,

    #[serde(default)]
    pub analytics: Option<AnalyticsConfig>,

    #[serde(default)]
    pub sitemap: Option<SitemapConfig>,

    #[serde(default)]
    pub feed: Option<FeedConfig>,

    #[serde(default)]
    pub css: CssConfig,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    pub name: String,
    pub description: String,
    pub url: String,

    #[serde(default = "default_title_template")]
    pub title_template: String,

    #[serde(default)]
    pub icon: Option<PathBuf>,
}

fn default_title_template() -> String {
    TITLE_PLACEHOLDER.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformersConfig {
    #[serde(default)]
    pub remark: RemarkConfig,
}

/// Options handed to the markdown transformer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemarkConfig {
    #[serde(default)]
    pub external_links_target: Option<String>,

    #[serde(default)]
    pub external_links_rel: Vec<String>,

    #[serde(default)]
    pub plugins: Vec<PluginConfig>,
}

/// A named plugin with free-form options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    pub name: String,

    #[serde(default)]
    pub options: BTreeMap<String, serde_yaml::Value>,
}

/// A filesystem content source (e.g. markdown posts)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
    pub type_name: String,

    #[serde(default)]
    pub route: Option<String>,

    #[serde(default)]
    pub refs: BTreeMap<String, RefConfig>,
}

/// A field of a content node that references another node type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefConfig {
    pub type_name: String,

    #[serde(default)]
    pub route: Option<String>,

    #[serde(default)]
    pub create: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitemapConfig {
    #[serde(default = "default_cache_time_ms")]
    pub cache_time_ms: u64,
}

fn default_cache_time_ms() -> u64 {
    600_000
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            cache_time_ms: default_cache_time_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    pub content_type: String,
    pub title: String,
    pub feed_url: String,
    pub site_url: String,

    #[serde(default)]
    pub output: FeedOutput,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedOutput {
    #[serde(default = "default_feed_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_feed_name")]
    pub name: String,
}

fn default_feed_dir() -> PathBuf {
    PathBuf::from("./static")
}

fn default_feed_name() -> String {
    String::from("feed.xml")
}

impl Default for FeedOutput {
    fn default() -> Self {
        Self {
            dir: default_feed_dir(),
            name: default_feed_name(),
        }
    }
}

impl FeedConfig {
    /// Absolute URL of a feed item for the given slug
    pub fn item_url(&self, slug: &str) -> String {
        format!(
            "{}/{}",
            self.site_url.trim_end_matches('/'),
            slug.trim_start_matches('/')
        )
    }

    /// Where the feed document is written, relative to the project root
    pub fn output_path(&self) -> PathBuf {
        self.output.dir.join(&self.output.name)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CssConfig {
    /// PostCSS plugins run ahead of the purge step, in order
    #[serde(default)]
    pub pipeline: Vec<String>,

    #[serde(default)]
    pub purge: PurgeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurgeConfig {
    /// Globs (relative to the project root) of files scanned for tokens
    #[serde(default = "default_purge_content")]
    pub content: Vec<String>,

    #[serde(default = "default_extractors")]
    pub extractors: Vec<ExtractorConfig>,

    /// Class names matching any of these regexes are never eliminated
    #[serde(default)]
    pub whitelist_patterns: Vec<String>,
}

fn default_purge_content() -> Vec<String> {
    vec![
        "src/assets/**/*.css".to_string(),
        "src/**/*.vue".to_string(),
        "src/**/*.js".to_string(),
    ]
}

fn default_extractors() -> Vec<ExtractorConfig> {
    vec![ExtractorConfig {
        extractor: ExtractorKind::Tailwind,
        extensions: vec!["css".into(), "vue".into(), "js".into()],
    }]
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            content: default_purge_content(),
            extractors: default_extractors(),
            whitelist_patterns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    pub extractor: ExtractorKind,
    pub extensions: Vec<String>,
}

/// Extractors that can be named from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractorKind {
    Tailwind,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::from_yaml(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parse configuration from YAML text; relative paths resolve against the cwd
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Check cross-field constraints serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.site.title_template.contains(TITLE_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "site.title_template '{}' has no {} placeholder",
                self.site.title_template, TITLE_PLACEHOLDER
            )));
        }

        let purge = &self.css.purge;
        if purge.content.is_empty() {
            return Err(ConfigError::Invalid(
                "css.purge.content must list at least one glob".into(),
            ));
        }
        for extractor in &purge.extractors {
            if extractor.extensions.is_empty() {
                return Err(ConfigError::Invalid(format!(
                    "extractor {:?} lists no extensions",
                    extractor.extractor
                )));
            }
        }
        Whitelist::compile(&purge.whitelist_patterns)?;

        if let Some(feed) = &self.feed {
            if !self.sources.iter().any(|s| s.type_name == feed.content_type) {
                return Err(ConfigError::Invalid(format!(
                    "feed.content_type '{}' does not name a declared source",
                    feed.content_type
                )));
            }
        }

        Ok(())
    }

    /// Apply the site title template to a page title
    pub fn page_title(&self, title: &str) -> String {
        self.site.title_template.replace(TITLE_PLACEHOLDER, title)
    }

    /// Directory containing the config file (cwd-relative "." when unknown)
    pub fn root_dir(&self) -> PathBuf {
        self.config_path
            .as_ref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Resolve an arbitrary path relative to the config file location
    pub fn resolve_relative(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root_dir().join(path)
        }
    }

    /// Get a nested config value using dotted path (e.g., "site.name")
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();
        match parts.as_slice() {
            ["site", "name"] => Some(self.site.name.clone()),
            ["site", "description"] => Some(self.site.description.clone()),
            ["site", "url"] => Some(self.site.url.clone()),
            ["site", "title_template"] => Some(self.site.title_template.clone()),
            ["site", "icon"] => self
                .site
                .icon
                .as_ref()
                .map(|p| p.to_string_lossy().into_owned()),
            ["analytics", "id"] => self.analytics.as_ref().map(|a| a.id.clone()),
            ["sitemap", "cache_time_ms"] => {
                self.sitemap.as_ref().map(|s| s.cache_time_ms.to_string())
            }
            ["feed", "content_type"] => self.feed.as_ref().map(|f| f.content_type.clone()),
            ["feed", "title"] => self.feed.as_ref().map(|f| f.title.clone()),
            ["feed", "feed_url"] => self.feed.as_ref().map(|f| f.feed_url.clone()),
            ["feed", "site_url"] => self.feed.as_ref().map(|f| f.site_url.clone()),
            ["feed", "output"] => self
                .feed
                .as_ref()
                .map(|f| f.output_path().to_string_lossy().into_owned()),
            _ => None,
        }
    }
}
