//! Class names that survive the purge regardless of candidates.

use crate::config::ConfigError;
use regex::Regex;

/// Compiled `whitelist_patterns`
#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    patterns: Vec<Regex>,
}

impl Whitelist {
    pub fn compile(patterns: &[String]) -> Result<Self, ConfigError> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// True if any pattern matches anywhere in `class_name`
    pub fn is_whitelisted(&self, class_name: &str) -> bool {
        self.patterns.iter().any(|re| re.is_match(class_name))
    }
}
