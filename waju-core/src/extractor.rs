//! Candidate class-name extraction for CSS dead-code elimination.
//!
//! A token is a maximal run of `A-Z a-z 0-9 - _ : /`. The grammar
//! over-matches on purpose (URL pieces, hex colors, property names all come
//! through); the purge step intersects the candidates with the class names
//! the stylesheet actually defines.

use once_cell::sync::Lazy;
use regex::bytes::Regex as BytesRegex;
use regex::Regex;

/// Character class shared by the text and byte matchers
const TOKEN_PATTERN: &str = r"[A-Za-z0-9_:/-]+";

static TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(TOKEN_PATTERN).expect("token pattern is valid"));

static TOKEN_BYTES_RE: Lazy<BytesRegex> =
    Lazy::new(|| BytesRegex::new(TOKEN_PATTERN).expect("token pattern is valid"));

/// A source of candidate tokens for one kind of file
pub trait Extractor: Send + Sync {
    /// Candidate tokens of `content`, in left-to-right order
    fn extract<'a>(&self, content: &'a str) -> Vec<&'a str>;

    /// Same as [`Extractor::extract`] for input that may not be valid UTF-8
    fn extract_bytes<'a>(&self, content: &'a [u8]) -> Vec<&'a [u8]>;
}

/// Tailwind-style extractor: keeps `:` variants and `/` fractions intact
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenExtractor;

impl Extractor for TokenExtractor {
    fn extract<'a>(&self, content: &'a str) -> Vec<&'a str> {
        extract(content)
    }

    fn extract_bytes<'a>(&self, content: &'a [u8]) -> Vec<&'a [u8]> {
        extract_bytes(content)
    }
}

/// Return every maximal token of `content`, duplicates kept
///
/// # Examples
///
/// ```
/// use waju_core::extract;
///
/// assert_eq!(extract("bg-red-500 text-white"), vec!["bg-red-500", "text-white"]);
/// assert!(extract("{ } . (").is_empty());
/// ```
pub fn extract(content: &str) -> Vec<&str> {
    TOKEN_RE.find_iter(content).map(|m| m.as_str()).collect()
}

/// Byte-level [`extract`]; non-ASCII bytes always end a token
pub fn extract_bytes(content: &[u8]) -> Vec<&[u8]> {
    TOKEN_BYTES_RE
        .find_iter(content)
        .map(|m| m.as_bytes())
        .collect()
}

/// Whether `c` belongs to the token alphabet
pub fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '/')
}
