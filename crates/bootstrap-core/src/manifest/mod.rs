//! Manifest loading, license lookup, and metadata insertion
//!
//! This module provides:
//! - `Manifest`: the raw `pyproject.toml` text plus its declared project name
//! - `License`: the closed table of selectable licenses
//! - `insert_metadata`: the idempotent line editor that adds authors/license/classifiers

pub mod editor;
pub mod license;
pub mod loader;

pub use editor::{insert_metadata, EditOutcome, MetadataKey, MetadataLine, ProjectMetadata};
pub use license::License;
pub use loader::Manifest;

/// File name of the project manifest
pub const MANIFEST_FILE: &str = "pyproject.toml";
