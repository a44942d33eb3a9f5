//! Content discovery and candidate collection.

use crate::config::PurgeConfig;
use crate::extractor::{Extractor, TokenExtractor};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use waju_types::SourceChunk;
use walkdir::WalkDir;

/// Discover files under `root` whose root-relative path matches any glob
///
/// Results are sorted and de-duplicated. Only the static prefix of each glob
/// is walked, so `src/**/*.vue` never descends into `node_modules/`.
pub fn discover_content(root: &Path, globs: &[String]) -> Vec<PathBuf> {
    let globs: Vec<&str> = globs
        .iter()
        .map(|g| g.trim_start_matches("./"))
        .collect();
    let mut files = BTreeSet::new();

    for glob in &globs {
        let base = root.join(glob_base(glob));
        if !base.exists() {
            tracing::debug!("Skipping glob {}: {:?} does not exist", glob, base);
            continue;
        }

        for entry in WalkDir::new(&base)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let rel = relative_slash_path(root, entry.path());
            if glob_match::glob_match(glob, &rel) {
                files.insert(entry.path().to_path_buf());
            }
        }
    }

    files.into_iter().collect()
}

/// Leading path components of a glob that contain no wildcard
fn glob_base(glob: &str) -> PathBuf {
    glob.split('/')
        .take_while(|part| !part.contains(['*', '?', '[', '{']))
        .collect()
}

fn relative_slash_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Extension to extractor routing
#[derive(Clone)]
pub struct ExtractorRegistry {
    by_extension: HashMap<String, Arc<dyn Extractor>>,
    fallback: Arc<dyn Extractor>,
}

impl ExtractorRegistry {
    /// Registry with no extension routes; every file uses the token extractor
    pub fn new() -> Self {
        Self {
            by_extension: HashMap::new(),
            fallback: Arc::new(TokenExtractor),
        }
    }

    pub fn from_config(config: &PurgeConfig) -> Self {
        let mut registry = Self::new();
        for entry in &config.extractors {
            let extractor: Arc<dyn Extractor> = match entry.extractor {
                crate::config::ExtractorKind::Tailwind => Arc::new(TokenExtractor),
            };
            for ext in &entry.extensions {
                registry.register(ext, extractor.clone());
            }
        }
        registry
    }

    /// Route files with extension `ext` (leading dot optional) to `extractor`
    pub fn register(&mut self, ext: &str, extractor: Arc<dyn Extractor>) {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        self.by_extension.insert(ext, extractor);
    }

    /// Extractor for a path; unregistered extensions use the fallback
    pub fn for_path(&self, path: &Path) -> &dyn Extractor {
        let extractor = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| self.by_extension.get(&ext.to_ascii_lowercase()))
            .unwrap_or(&self.fallback);
        &**extractor
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Deduplicated candidate tokens gathered from the scanned sources
#[derive(Debug, Clone, Default, Serialize)]
pub struct CandidateSet {
    pub tokens: BTreeSet<String>,
    pub files_scanned: usize,
    pub tokens_seen: usize,
}

impl CandidateSet {
    pub fn contains(&self, name: &str) -> bool {
        self.tokens.contains(name)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn add_bytes(&mut self, tokens: Vec<&[u8]>) {
        self.tokens_seen += tokens.len();
        for token in tokens {
            // The token alphabet is ASCII, so this never replaces anything
            self.tokens
                .insert(String::from_utf8_lossy(token).into_owned());
        }
    }
}

/// Read each file as bytes and collect its tokens
///
/// Unreadable files are logged and skipped.
pub fn collect_candidates(files: &[PathBuf], registry: &ExtractorRegistry) -> CandidateSet {
    let mut candidates = CandidateSet::default();

    for path in files {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!("Failed to read {:?}: {}", path, err);
                continue;
            }
        };

        let extractor = registry.for_path(path);
        candidates.add_bytes(extractor.extract_bytes(&bytes));
        candidates.files_scanned += 1;
        tracing::debug!("Scanned {:?}", path);
    }

    candidates
}

/// Collect tokens from in-memory chunks; chunks without a path use the fallback
pub fn collect_from_chunks(chunks: &[SourceChunk], registry: &ExtractorRegistry) -> CandidateSet {
    let mut candidates = CandidateSet::default();

    for chunk in chunks {
        let extractor = match chunk.path() {
            Some(path) => registry.for_path(path),
            None => &*registry.fallback,
        };
        candidates.add_bytes(extractor.extract_bytes(chunk.content().as_bytes()));
        candidates.files_scanned += 1;
    }

    candidates
}
