//! Manifest loading and the `[project]` fields we read from it

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `pyproject.toml` subset needed to drive the bootstrap
#[derive(Debug, Clone, Default, Deserialize)]
struct PyProject {
    #[serde(default)]
    project: Option<ProjectTable>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ProjectTable {
    #[serde(default)]
    name: Option<String>,
}

/// A loaded manifest: the raw text (edited line-wise) plus the declared project name
#[derive(Debug, Clone)]
pub struct Manifest {
    path: PathBuf,
    text: String,
    project_name: Option<String>,
}

impl Manifest {
    /// Read and parse the manifest at `path`
    pub async fn load(path: &Path) -> Result<Self> {
        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::ManifestNotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(Error::io(path, e)),
        };
        let manifest = Self::parse(path, text)?;
        debug!(
            path = %path.display(),
            project = manifest.project_name.as_deref().unwrap_or(""),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Parse manifest text that was already read from `path`
    pub fn parse(path: &Path, text: String) -> Result<Self> {
        let parsed: PyProject = toml::from_str(&text).map_err(|source| Error::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;

        let project_name = parsed
            .project
            .and_then(|p| p.name)
            .filter(|name| !name.is_empty());

        Ok(Self {
            path: path.to_path_buf(),
            text,
            project_name,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// `[project].name`, if declared and non-empty
    pub fn project_name(&self) -> Option<&str> {
        self.project_name.as_deref()
    }

    /// Write `text` back to the manifest path
    pub async fn save(&self, text: &str) -> Result<()> {
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| Error::io(&self.path, e))
    }
}
