//! Literal placeholder substitution in fetched template files

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub const CURRENT_YEAR: &str = "CURRENT_YEAR";
pub const PROJECT_NAME: &str = "PROJECT_NAME";
pub const AUTHOR_NAME: &str = "AUTHOR_NAME";

/// Ordered token -> value pairs. Tokens are matched literally, never as patterns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    pairs: Vec<(String, String)>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// The three tokens the template repository uses
    pub fn standard(year: i32, project_name: Option<&str>, author_name: &str) -> Self {
        Self::new()
            .with(CURRENT_YEAR, year.to_string())
            .with(PROJECT_NAME, project_name.unwrap_or_default())
            .with(AUTHOR_NAME, author_name)
    }

    pub fn with(mut self, token: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((token.into(), value.into()));
        self
    }

    /// Apply every replacement to `text`, in insertion order
    pub fn apply(&self, text: &str) -> String {
        self.pairs
            .iter()
            .fold(text.to_string(), |acc, (token, value)| {
                acc.replace(token.as_str(), value)
            })
    }
}

/// Rewrite each existing file in `paths` with `replacements` applied.
/// Missing files are skipped. Returns the files that were rewritten.
pub async fn replace_placeholders(
    paths: &[PathBuf],
    replacements: &Replacements,
) -> Result<Vec<PathBuf>> {
    let mut rewritten = Vec::new();

    for path in paths {
        if !exists(path).await {
            debug!(path = %path.display(), "skipping missing file");
            continue;
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| Error::io(path, e))?;
        let replaced = replacements.apply(&content);
        fs::write(path, replaced)
            .await
            .map_err(|e| Error::io(path, e))?;

        rewritten.push(path.clone());
    }

    Ok(rewritten)
}

async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
