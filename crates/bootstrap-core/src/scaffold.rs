//! Package directory layout for the new project

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

pub const INIT_FILE: &str = "__init__.py";
pub const TESTS_DIR: &str = "tests";
pub const ENTRY_POINT: &str = "main.py";

/// What happened to the entry-point file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    /// `main.py` was moved from the project root into the package
    Moved,
    /// No root `main.py`; an empty one was touched inside the package
    Touched,
}

/// Paths produced by the scaffold step
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub package_dir: PathBuf,
    pub init_file: PathBuf,
    pub tests_dir: PathBuf,
    pub entry_point: PathBuf,
    pub entry_point_action: EntryPoint,
}

/// Creates `<name>/__init__.py`, `tests/` and `<name>/main.py` under a project root
#[derive(Debug, Clone)]
pub struct ScaffoldBuilder {
    root: PathBuf,
    package: String,
}

impl ScaffoldBuilder {
    pub fn new(root: impl Into<PathBuf>, project_name: Option<&str>) -> Result<Self> {
        let package = project_name
            .filter(|name| !name.trim().is_empty())
            .ok_or(Error::MissingProjectName)?;
        Ok(Self {
            root: root.into(),
            package: package.to_string(),
        })
    }

    pub fn package_dir(&self) -> PathBuf {
        self.root.join(&self.package)
    }

    /// Build the layout. Safe to repeat: nothing already present is truncated or removed.
    pub async fn build(&self) -> Result<ScaffoldReport> {
        let package_dir = self.package_dir();
        create_dir(&package_dir).await?;

        let init_file = package_dir.join(INIT_FILE);
        touch(&init_file).await?;

        let tests_dir = self.root.join(TESTS_DIR);
        create_dir(&tests_dir).await?;

        let root_entry = self.root.join(ENTRY_POINT);
        let entry_point = package_dir.join(ENTRY_POINT);
        let entry_point_action = if fs::try_exists(&root_entry).await.unwrap_or(false) {
            fs::rename(&root_entry, &entry_point)
                .await
                .map_err(|e| Error::io(&root_entry, e))?;
            EntryPoint::Moved
        } else {
            touch(&entry_point).await?;
            EntryPoint::Touched
        };

        debug!(
            package = %package_dir.display(),
            ?entry_point_action,
            "scaffold ready"
        );

        Ok(ScaffoldReport {
            package_dir,
            init_file,
            tests_dir,
            entry_point,
            entry_point_action,
        })
    }
}

async fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .map_err(|e| Error::io(path, e))
}

/// Create `path` if missing without touching existing content
async fn touch(path: &Path) -> Result<()> {
    fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map(|_| ())
        .map_err(|e| Error::io(path, e))
}
