//! Bootstrap Core - Shared library for configuring freshly initialized Python projects
//!
//! Takes a `pyproject.toml` straight out of `uv init` and turns the directory
//! into a ready-to-use project: author/license/classifier metadata in the
//! manifest, template config files from a template repository, placeholders
//! filled in, and a package skeleton on disk.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - manifest editing, template fetching, placeholder
//!   substitution, scaffolding, external tool invocation
//! - **Layer 2: Workflow Orchestration** - `ProductConfig` trait, `SetupArgs` resolution
//!   and `ProjectSetup` for custom UIs
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based runner (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based progress runner
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use bootstrap_core::{FileDefaults, ProjectSetup, SetupArgs, SystemToolRunner, TemplateFetcher};
//!
//! let args = SetupArgs::default();
//! let defaults = FileDefaults::default();
//! let fetcher = TemplateFetcher::from_config(&MyConfig, defaults.template_url.as_deref())?;
//! let report = ProjectSetup::new(args.resolve(&defaults), fetcher, SystemToolRunner)
//!     .run()
//!     .await?;
//! ```

pub mod config;
pub mod error;
pub mod manifest;
pub mod product;
pub mod runtime;
pub mod scaffold;
pub mod setup;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{FileDefaults, SetupArgs};
pub use error::{Error, Result};
pub use manifest::{insert_metadata, License, Manifest, MetadataKey, ProjectMetadata};
pub use product::ProductConfig;
pub use runtime::{SystemToolRunner, ToolManager, ToolRunner};
pub use scaffold::{ScaffoldBuilder, ScaffoldReport};
pub use setup::{ProjectSetup, SetupOptions, SetupReport};
pub use templates::{Fetch, Replacements, TemplateFetcher, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
