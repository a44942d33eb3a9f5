//! Shared types for waju
//!
//! This crate provides the value types passed between the purge step and
//! its callers: source chunks tagged with a category, and the build mode.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Coarse category of a scanned source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceCategory {
    Stylesheet,
    Markup,
    Script,
    Other,
}

impl SourceCategory {
    /// Categorize a file extension (without the leading dot, any case)
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "css" | "pcss" | "scss" => SourceCategory::Stylesheet,
            "vue" | "html" | "htm" | "md" => SourceCategory::Markup,
            "js" | "jsx" | "ts" | "tsx" | "mjs" | "cjs" => SourceCategory::Script,
            _ => SourceCategory::Other,
        }
    }

    /// Categorize a path by its extension
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(Self::from_extension)
            .unwrap_or(SourceCategory::Other)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceCategory::Stylesheet => "stylesheet",
            SourceCategory::Markup => "markup",
            SourceCategory::Script => "script",
            SourceCategory::Other => "other",
        }
    }
}

/// Contents of one input file, tagged for routing
///
/// The category is carried for callers; extraction never looks at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceChunk {
    category: SourceCategory,
    path: Option<PathBuf>,
    content: String,
}

impl SourceChunk {
    pub fn new(category: SourceCategory, content: impl Into<String>) -> Self {
        Self {
            category,
            path: None,
            content: content.into(),
        }
    }

    /// Build a chunk for a file, categorized by its extension
    pub fn from_file_contents(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let path = path.into();
        Self {
            category: SourceCategory::from_path(&path),
            path: Some(path),
            content: content.into(),
        }
    }

    pub fn category(&self) -> SourceCategory {
        self.category
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// Build mode gating the CSS dead-code elimination pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Production,
    #[default]
    Development,
}

impl BuildMode {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Some(BuildMode::Production),
            "development" | "dev" => Some(BuildMode::Development),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildMode::Production => "production",
            BuildMode::Development => "development",
        }
    }

    /// Whether unused stylesheet classes are eliminated in this mode
    pub fn purges(&self) -> bool {
        matches!(self, BuildMode::Production)
    }
}
