//! The bootstrap workflow
//!
//! `ProjectSetup` runs the steps in a fixed order: edit the manifest, fetch
//! template files, substitute placeholders, build the package layout, and
//! optionally install dev dependencies. Each step is also exposed on its own
//! so a UI can report progress between them. There is no rollback: a failure
//! leaves earlier steps' output on disk.

use crate::error::Result;
use crate::manifest::{insert_metadata, Manifest, MetadataKey, ProjectMetadata, MANIFEST_FILE};
use crate::runtime::{uv_tool, ToolRunner};
use crate::scaffold::{ScaffoldBuilder, ScaffoldReport};
use crate::templates::{self, Fetch, Replacements};
use chrono::{Datelike, Utc};
use std::path::PathBuf;
use tracing::{debug, info};

/// Everything a run needs, resolved up front
#[derive(Debug, Clone)]
pub struct SetupOptions {
    /// Directory containing `pyproject.toml`
    pub root: PathBuf,
    pub metadata: ProjectMetadata,
    /// Packages for `uv add --dev`; empty skips the step
    pub dev_dependencies: Vec<String>,
}

/// Outcome of the manifest edit
#[derive(Debug, Clone)]
pub struct ManifestEdit {
    pub project_name: Option<String>,
    pub inserted: Vec<MetadataKey>,
}

/// Summary of a full run
#[derive(Debug, Clone)]
pub struct SetupReport {
    pub project_name: String,
    pub inserted: Vec<MetadataKey>,
    pub fetched: Vec<PathBuf>,
    pub substituted: Vec<PathBuf>,
    pub scaffold: ScaffoldReport,
    pub dev_dependencies_installed: bool,
}

/// Bootstrap workflow over injected fetch and process capabilities
pub struct ProjectSetup<F, R> {
    options: SetupOptions,
    fetcher: F,
    runner: R,
}

impl<F: Fetch, R: ToolRunner> ProjectSetup<F, R> {
    pub fn new(options: SetupOptions, fetcher: F, runner: R) -> Self {
        Self {
            options,
            fetcher,
            runner,
        }
    }

    pub fn options(&self) -> &SetupOptions {
        &self.options
    }

    fn manifest_path(&self) -> PathBuf {
        self.options.root.join(MANIFEST_FILE)
    }

    /// Load the manifest, insert missing metadata after the `readme` line, write it back.
    /// Nothing is written when the manifest is missing, unparsable, or has no anchor.
    pub async fn edit_manifest(&self) -> Result<ManifestEdit> {
        let manifest = Manifest::load(&self.manifest_path()).await?;
        let outcome = insert_metadata(manifest.text(), &self.options.metadata.candidates())?;

        if !outcome.changed() {
            debug!("manifest already has all metadata");
        }
        manifest.save(&outcome.text).await?;
        info!(
            path = %manifest.path().display(),
            inserted = ?outcome.inserted,
            "wrote manifest"
        );

        Ok(ManifestEdit {
            project_name: manifest.project_name().map(str::to_owned),
            inserted: outcome.inserted,
        })
    }

    /// Download the template files into the project root, in catalog order
    pub async fn fetch_templates(&self) -> Result<Vec<PathBuf>> {
        let files = templates::template_files(self.options.metadata.license);
        templates::fetch_all(&self.fetcher, &files, &self.options.root).await
    }

    /// Replace `CURRENT_YEAR`, `PROJECT_NAME` and `AUTHOR_NAME` in the fetched files
    pub async fn substitute_placeholders(
        &self,
        project_name: Option<&str>,
    ) -> Result<Vec<PathBuf>> {
        let replacements = Replacements::standard(
            Utc::now().year(),
            project_name,
            &self.options.metadata.author_name,
        );
        let paths: Vec<PathBuf> = templates::substitution_targets(self.options.metadata.license)
            .into_iter()
            .map(|file| self.options.root.join(file))
            .collect();
        templates::replace_placeholders(&paths, &replacements).await
    }

    /// Create the package directory, init file, tests directory and entry point
    pub async fn scaffold(&self, project_name: Option<&str>) -> Result<ScaffoldReport> {
        ScaffoldBuilder::new(&self.options.root, project_name)?
            .build()
            .await
    }

    /// Run `uv add --dev` when dev dependencies were requested. Returns whether it ran.
    pub async fn install_dev_dependencies(&self) -> Result<bool> {
        if self.options.dev_dependencies.is_empty() {
            return Ok(false);
        }
        uv_tool()
            .add_dev_dependencies(
                &self.runner,
                &self.options.root,
                &self.options.dev_dependencies,
            )
            .await?;
        Ok(true)
    }

    /// Run every step in order
    pub async fn run(&self) -> Result<SetupReport> {
        let edit = self.edit_manifest().await?;
        let project_name = edit.project_name.as_deref();

        let fetched = self.fetch_templates().await?;
        let substituted = self.substitute_placeholders(project_name).await?;
        let scaffold = self.scaffold(project_name).await?;
        let dev_dependencies_installed = self.install_dev_dependencies().await?;

        Ok(SetupReport {
            project_name: project_name.unwrap_or_default().to_string(),
            inserted: edit.inserted,
            fetched,
            substituted,
            scaffold,
            dev_dependencies_installed,
        })
    }
}
