//! Template fetching and placeholder substitution
//!
//! This module provides:
//! - The catalog of files pulled from the template repository
//! - Template fetching from remote URLs or local directories
//! - Literal placeholder replacement in the fetched files

pub mod catalog;
pub mod fetcher;
pub mod placeholder;

use crate::error::Result;
use std::path::{Path, PathBuf};

pub use catalog::{substitution_targets, template_files, TemplateFile, DEFAULT_TEMPLATE_URL};
pub use fetcher::{fetch_to_file, Fetch, TemplateFetcher, TemplateSource, WriteMode};
pub use placeholder::{replace_placeholders, Replacements};

/// Fetch every file in `files` into `root`, one after another.
/// Stops at the first failure; files written before it stay on disk.
pub async fn fetch_all<F: Fetch>(
    fetcher: &F,
    files: &[TemplateFile],
    root: &Path,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(files.len());
    for file in files {
        let destination = root.join(file.destination);
        fetch_to_file(fetcher, &file.resource, &destination, file.mode).await?;
        written.push(destination);
    }
    Ok(written)
}
