//! Turns raw command-line values plus file defaults into setup options

use super::defaults::FileDefaults;
use crate::manifest::{License, ProjectMetadata};
use crate::setup::SetupOptions;
use std::path::PathBuf;
use tracing::warn;

/// Dev dependencies installed when neither the command line nor the defaults file names any
pub const DEFAULT_DEV_DEPENDENCIES: &[&str] = &["pre-commit", "pytest", "ruff"];

/// Arguments for a setup run, as given on the command line
#[derive(Debug, Clone, Default)]
pub struct SetupArgs {
    /// Project root (defaults to the current directory)
    pub root: Option<PathBuf>,

    /// Local directory to use for templates instead of fetching from remote
    pub template_dir: Option<PathBuf>,

    /// Explicit defaults file
    pub config: Option<PathBuf>,

    pub author_name: Option<String>,
    pub author_email: Option<String>,
    pub license: Option<String>,

    /// Run `uv add --dev` after scaffolding
    pub install_dev_deps: bool,

    /// Packages for the dev-dependency step
    pub dev_deps: Option<Vec<String>>,

    /// Prompt for values that are still missing after resolution
    pub interactive: bool,
}

impl SetupArgs {
    /// Project root, falling back to the current directory
    pub fn root_dir(&self) -> PathBuf {
        let current = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        match &self.root {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => current.join(dir),
            None => current,
        }
    }

    /// Resolve author identity and license.
    ///
    /// Positional author values are only honored as a pair, and then the
    /// license comes from the command line alone (`None` when omitted). With
    /// fewer than two the file defaults (or empty strings) are used and the
    /// positional license is ignored too.
    pub fn resolve_metadata(&self, defaults: &FileDefaults) -> ProjectMetadata {
        let (author_name, author_email, license_key) =
            match (&self.author_name, &self.author_email) {
                (Some(name), Some(email)) => (name.clone(), email.clone(), self.license.clone()),
                (lone_name, _) => {
                    if lone_name.is_some() {
                        warn!("author name given without an email; ignoring positional arguments");
                    }
                    (
                        defaults.author_name.clone().unwrap_or_default(),
                        defaults.author_email.clone().unwrap_or_default(),
                        defaults.license.clone(),
                    )
                }
            };

        let license = match license_key.as_deref() {
            Some(key) => {
                if !License::is_known_key(key) {
                    warn!(key, "unknown license key; continuing without a license");
                }
                License::from_key(key)
            }
            None => License::None,
        };

        ProjectMetadata {
            author_name,
            author_email,
            license,
        }
    }

    /// Packages for the dev-dependency step; empty when the step is disabled
    pub fn resolve_dev_dependencies(&self, defaults: &FileDefaults) -> Vec<String> {
        if !self.install_dev_deps {
            return Vec::new();
        }
        self.dev_deps
            .clone()
            .or_else(|| defaults.dev_dependencies.clone())
            .unwrap_or_else(|| {
                DEFAULT_DEV_DEPENDENCIES
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            })
    }

    /// Build the full option set for a run
    pub fn resolve(&self, defaults: &FileDefaults) -> SetupOptions {
        SetupOptions {
            root: self.root_dir(),
            metadata: self.resolve_metadata(defaults),
            dev_dependencies: self.resolve_dev_dependencies(defaults),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(name: Option<&str>, email: Option<&str>, license: Option<&str>) -> SetupArgs {
        SetupArgs {
            author_name: name.map(str::to_owned),
            author_email: email.map(str::to_owned),
            license: license.map(str::to_owned),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_arguments_defaults_to_empty() {
        let meta = args(None, None, None).resolve_metadata(&FileDefaults::default());
        assert_eq!(meta.author_name, "");
        assert_eq!(meta.author_email, "");
        assert_eq!(meta.license, License::None);
    }

    #[test]
    fn test_name_and_email_without_license() {
        let meta =
            args(Some("A. Dev"), Some("dev@example.com"), None).resolve_metadata(&FileDefaults::default());
        assert_eq!(meta.author_name, "A. Dev");
        assert_eq!(meta.author_email, "dev@example.com");
        assert_eq!(meta.license, License::None);
    }

    #[test]
    fn test_all_three_positionals() {
        let meta = args(Some("A"), Some("a@b.c"), Some("Apache-2.0"))
            .resolve_metadata(&FileDefaults::default());
        assert_eq!(meta.license, License::Apache2);
    }

    #[test]
    fn test_lone_name_is_ignored() {
        let meta = args(Some("A. Dev"), None, None).resolve_metadata(&FileDefaults::default());
        assert_eq!(meta.author_name, "");
    }

    #[test]
    fn test_file_defaults_fill_gaps() {
        let defaults = FileDefaults {
            author_name: Some("Config Author".to_string()),
            author_email: Some("config@example.com".to_string()),
            license: Some("MIT".to_string()),
            ..Default::default()
        };

        let meta = args(None, None, None).resolve_metadata(&defaults);
        assert_eq!(meta.author_name, "Config Author");
        assert_eq!(meta.license, License::Mit);

        let meta = args(Some("Cli"), Some("cli@example.com"), Some("GPLv3")).resolve_metadata(&defaults);
        assert_eq!(meta.author_name, "Cli");
        assert_eq!(meta.license, License::GplV3);
    }

    #[test]
    fn test_author_pair_ignores_defaults_file_license() {
        let defaults = FileDefaults {
            license: Some("MIT".to_string()),
            ..Default::default()
        };
        let meta = args(Some("A"), Some("a@b.c"), None).resolve_metadata(&defaults);
        assert_eq!(meta.author_name, "A");
        assert_eq!(meta.license, License::None);
    }

    #[test]
    fn test_lowercase_license_key_is_unrecognized() {
        let meta = args(Some("A"), Some("a@b.c"), Some("mit"))
            .resolve_metadata(&FileDefaults::default());
        assert_eq!(meta.license, License::None);
    }

    #[test]
    fn test_unknown_license_key_is_none() {
        let meta = args(Some("A"), Some("a@b.c"), Some("Beerware"))
            .resolve_metadata(&FileDefaults::default());
        assert_eq!(meta.license, License::None);
    }

    #[test]
    fn test_dev_dependencies_disabled_by_default() {
        let deps = args(None, None, None).resolve_dev_dependencies(&FileDefaults::default());
        assert!(deps.is_empty());
    }

    #[test]
    fn test_dev_dependency_precedence() {
        let defaults = FileDefaults {
            dev_dependencies: Some(vec!["mypy".to_string()]),
            ..Default::default()
        };
        let mut setup = SetupArgs {
            install_dev_deps: true,
            ..Default::default()
        };

        assert_eq!(
            setup.resolve_dev_dependencies(&FileDefaults::default()),
            vec!["pre-commit", "pytest", "ruff"]
        );
        assert_eq!(setup.resolve_dev_dependencies(&defaults), vec!["mypy"]);

        setup.dev_deps = Some(vec!["black".to_string()]);
        assert_eq!(setup.resolve_dev_dependencies(&defaults), vec!["black"]);
    }

    #[test]
    fn test_relative_root_is_joined_to_current_dir() {
        let setup = SetupArgs {
            root: Some(PathBuf::from("demo")),
            ..Default::default()
        };
        assert!(setup.root_dir().is_absolute());
        assert!(setup.root_dir().ends_with("demo"));
    }
}
