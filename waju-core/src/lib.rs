//! # waju-core
//!
//! Core library for the waju blog build.
//!
//! This crate provides the declarative site configuration and the CSS purge
//! step: candidate token extraction from source files, class names defined
//! by the compiled stylesheet, and the production-only retention decision.

pub mod config;
pub mod extractor;
pub mod purge;

pub use config::{Config, ConfigError, ExtractorKind, PurgeConfig};
pub use extractor::{extract, extract_bytes, Extractor, TokenExtractor};
pub use purge::{plan, PurgeError, PurgeReport, Purger, Whitelist};
pub use waju_types::{BuildMode, SourceCategory, SourceChunk};
