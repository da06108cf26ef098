//! Product configuration trait for CLI binaries
//!
//! A binary implements this trait to tell the shared workflow where its
//! templates live and how to present itself.

use std::path::Path;

/// Configuration trait for bootstrap CLI products
///
/// Each product defines:
/// - Product identity (name, display name)
/// - Template source URL and its environment override
/// - Documentation URL
/// - Post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, config file name)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default base URL for fetching template files
    fn default_template_url(&self) -> &'static str;

    /// Environment variable name for overriding template URL
    fn template_url_env(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// Generate the "next steps" instructions after setup
    fn next_steps(&self, root: &Path, project_name: &str) -> Vec<String>;

    /// Name of the optional YAML defaults file looked up in the project root
    fn defaults_file_name(&self) -> String {
        format!(".{}.yaml", self.name())
    }

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
