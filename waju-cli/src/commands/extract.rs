//! Print candidate tokens for individual files.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use waju_core::extract_bytes;
use waju_types::SourceCategory;

#[derive(Serialize)]
struct FileTokens {
    path: PathBuf,
    category: SourceCategory,
    tokens: Vec<String>,
}

/// Extract tokens from each file, in argument order
pub fn extract_files(files: &[PathBuf], json: bool) -> Result<()> {
    let results = files
        .iter()
        .map(|path| file_tokens(path))
        .collect::<Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    for result in &results {
        println!(
            "{} ({}): {} tokens",
            result.path.display(),
            result.category.as_str(),
            result.tokens.len()
        );
        for token in &result.tokens {
            println!("  {}", token);
        }
    }

    Ok(())
}

fn file_tokens(path: &Path) -> Result<FileTokens> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {:?}", path))?;
    let tokens = extract_bytes(&bytes)
        .into_iter()
        .map(|t| String::from_utf8_lossy(t).into_owned())
        .collect();

    tracing::debug!("Extracted tokens from {:?}", path);

    Ok(FileTokens {
        path: path.to_path_buf(),
        category: SourceCategory::from_path(path),
        tokens,
    })
}
