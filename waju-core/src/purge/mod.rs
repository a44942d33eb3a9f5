//! CSS dead-code elimination planning.
//!
//! Flow: content globs → files → candidate tokens
//!                                    ↓
//!       compiled stylesheet → defined classes → retained / eliminated
//!
//! The pass only runs for [`BuildMode::Production`]; in any other mode every
//! defined class is retained and no content is scanned.

pub mod scan;
pub mod stylesheet;
pub mod whitelist;

use crate::config::{Config, ConfigError};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use waju_types::BuildMode;

pub use scan::{
    collect_candidates, collect_from_chunks, discover_content, CandidateSet, ExtractorRegistry,
};
pub use stylesheet::stylesheet_classes;
pub use whitelist::Whitelist;

#[derive(Error, Debug)]
pub enum PurgeError {
    #[error("Failed to read stylesheet {path:?}: {source}")]
    Stylesheet {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Outcome of the retention decision for one stylesheet
#[derive(Debug, Clone, Serialize)]
pub struct PurgeReport {
    pub mode: BuildMode,
    /// False when the build mode disables elimination
    pub enabled: bool,
    pub files_scanned: usize,
    pub candidates: usize,
    pub defined: usize,
    pub retained: BTreeSet<String>,
    pub eliminated: BTreeSet<String>,
    /// Retained only because a whitelist pattern matched
    pub whitelisted: BTreeSet<String>,
}

/// Decide which defined classes survive
pub fn plan(
    mode: BuildMode,
    defined: &BTreeSet<String>,
    candidates: &CandidateSet,
    whitelist: &Whitelist,
) -> PurgeReport {
    if !mode.purges() {
        return PurgeReport {
            mode,
            enabled: false,
            files_scanned: candidates.files_scanned,
            candidates: candidates.len(),
            defined: defined.len(),
            retained: defined.clone(),
            eliminated: BTreeSet::new(),
            whitelisted: BTreeSet::new(),
        };
    }

    let mut retained = BTreeSet::new();
    let mut eliminated = BTreeSet::new();
    let mut whitelisted = BTreeSet::new();

    for name in defined {
        if candidates.contains(name) {
            retained.insert(name.clone());
        } else if whitelist.is_whitelisted(name) {
            retained.insert(name.clone());
            whitelisted.insert(name.clone());
        } else {
            eliminated.insert(name.clone());
        }
    }

    PurgeReport {
        mode,
        enabled: true,
        files_scanned: candidates.files_scanned,
        candidates: candidates.len(),
        defined: defined.len(),
        retained,
        eliminated,
        whitelisted,
    }
}

/// Purge pass wired from a loaded [`Config`]
pub struct Purger {
    root: PathBuf,
    content: Vec<String>,
    registry: ExtractorRegistry,
    whitelist: Whitelist,
}

impl Purger {
    pub fn from_config(config: &Config) -> Result<Self, PurgeError> {
        let purge = &config.css.purge;
        Ok(Self {
            root: config.root_dir(),
            content: purge.content.clone(),
            registry: ExtractorRegistry::from_config(purge),
            whitelist: Whitelist::compile(&purge.whitelist_patterns)?,
        })
    }

    /// Discover the configured content and collect candidate tokens
    pub fn scan(&self) -> CandidateSet {
        let files = discover_content(&self.root, &self.content);
        tracing::info!("Scanning {} content files", files.len());
        collect_candidates(&files, &self.registry)
    }

    /// Plan elimination for a compiled stylesheet's text
    pub fn run(&self, mode: BuildMode, stylesheet_css: &str) -> PurgeReport {
        let defined = stylesheet_classes(stylesheet_css);
        let candidates = if mode.purges() {
            self.scan()
        } else {
            tracing::info!("Build mode is {}; skipping purge", mode.as_str());
            CandidateSet::default()
        };

        let report = plan(mode, &defined, &candidates, &self.whitelist);
        tracing::info!(
            "Retained {} of {} classes ({} eliminated)",
            report.retained.len(),
            report.defined,
            report.eliminated.len()
        );
        report
    }

    /// Read a stylesheet from disk (relative to the config root) and plan it
    pub fn run_file(&self, mode: BuildMode, path: &Path) -> Result<PurgeReport, PurgeError> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        let css = std::fs::read_to_string(&path).map_err(|source| PurgeError::Stylesheet {
            path: path.clone(),
            source,
        })?;
        Ok(self.run(mode, &css))
    }
}
