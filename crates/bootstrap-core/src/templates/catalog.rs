//! The fixed set of files pulled from the template repository

use super::fetcher::WriteMode;
use crate::manifest::{License, MANIFEST_FILE};

/// Default template repository (raw file base URL)
pub const DEFAULT_TEMPLATE_URL: &str =
    "https://raw.githubusercontent.com/pmason314/pyproject-templates/main/src";

pub const PYPROJECT_STUB: &str = "pyproject_stub.toml";
pub const PRECOMMIT_FILE: &str = ".pre-commit-config.yaml";
pub const GITIGNORE_FILE: &str = ".gitignore";
pub const LICENSE_FILE: &str = "LICENSE";

/// A template resource and where it lands in the project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the template repository root
    pub resource: String,
    /// Path relative to the project root
    pub destination: &'static str,
    pub mode: WriteMode,
}

impl TemplateFile {
    fn new(resource: impl Into<String>, destination: &'static str, mode: WriteMode) -> Self {
        Self {
            resource: resource.into(),
            destination,
            mode,
        }
    }
}

/// Files to fetch, in fetch order. The license text is only included when a license is selected.
pub fn template_files(license: License) -> Vec<TemplateFile> {
    let mut files = vec![
        TemplateFile::new(PYPROJECT_STUB, MANIFEST_FILE, WriteMode::Append),
        TemplateFile::new(PRECOMMIT_FILE, PRECOMMIT_FILE, WriteMode::Overwrite),
        TemplateFile::new(GITIGNORE_FILE, GITIGNORE_FILE, WriteMode::Overwrite),
    ];

    if let Some(file) = license.license_file() {
        files.push(TemplateFile::new(
            format!("licenses/{}", file),
            LICENSE_FILE,
            WriteMode::Overwrite,
        ));
    }

    files
}

/// Project files that get placeholder substitution
pub fn substitution_targets(license: License) -> Vec<&'static str> {
    let mut targets = vec![MANIFEST_FILE, PRECOMMIT_FILE, GITIGNORE_FILE];
    if license.is_selected() {
        targets.push(LICENSE_FILE);
    }
    targets
}
