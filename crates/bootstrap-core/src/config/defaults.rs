//! Optional YAML defaults file

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Values used when the command line leaves them out
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileDefaults {
    #[serde(default)]
    pub author_name: Option<String>,

    #[serde(default)]
    pub author_email: Option<String>,

    /// License key, e.g. `MIT`
    #[serde(default)]
    pub license: Option<String>,

    /// Base URL of the template repository
    #[serde(default)]
    pub template_url: Option<String>,

    /// Packages for `uv add --dev`
    #[serde(default)]
    pub dev_dependencies: Option<Vec<String>>,
}

impl FileDefaults {
    /// Load defaults from `explicit` if given (must exist), otherwise from
    /// `root/<file_name>` if present, otherwise empty defaults.
    pub fn load(explicit: Option<&Path>, root: &Path, file_name: &str) -> Result<Self> {
        let path: PathBuf = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::Config {
                        path: path.to_path_buf(),
                        message: "file does not exist".to_string(),
                    });
                }
                path.to_path_buf()
            }
            None => {
                let candidate = root.join(file_name);
                if !candidate.exists() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let defaults = Self::parse(&content).map_err(|e| Error::Config {
            path: path.clone(),
            message: e.to_string(),
        })?;
        debug!(path = %path.display(), "loaded defaults file");
        Ok(defaults)
    }

    /// Parse YAML content; an empty document yields empty defaults
    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}
