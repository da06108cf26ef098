//! pyproject-bootstrap - configure a Python project right after `uv init`

use anyhow::Result;
use bootstrap_core::templates::DEFAULT_TEMPLATE_URL;
use bootstrap_core::{ProductConfig, SetupArgs};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// pyproject-bootstrap product configuration
#[derive(Clone)]
pub struct PyprojectConfig;

impl ProductConfig for PyprojectConfig {
    fn name(&self) -> &'static str {
        "pyproject-bootstrap"
    }

    fn display_name(&self) -> &'static str {
        "pyproject bootstrap"
    }

    fn default_template_url(&self) -> &'static str {
        DEFAULT_TEMPLATE_URL
    }

    fn template_url_env(&self) -> &'static str {
        "PYPROJECT_TEMPLATE_URL"
    }

    fn docs_url(&self) -> &'static str {
        "https://github.com/pmason314/pyproject-templates"
    }

    fn next_steps(&self, root: &Path, project_name: &str) -> Vec<String> {
        let mut steps = Vec::new();
        let current = std::env::current_dir().ok();

        // Step 1: cd to directory if not current
        if current.as_deref() != Some(root) {
            steps.push(format!("cd {}", root.display()));
        }

        steps.push("Review the authors and license entries in pyproject.toml".to_string());
        steps.push("pre-commit install".to_string());
        steps.push(format!("uv run python -m {}.main", project_name));

        steps
    }
}

#[derive(Parser, Debug)]
#[command(name = "pyproject-bootstrap")]
#[command(about = "Configure a freshly initialized Python project")]
#[command(version)]
pub struct Args {
    /// Author name written to [project].authors
    pub author_name: Option<String>,

    /// Author email written to [project].authors
    pub author_email: Option<String>,

    /// License key: None, MIT, Apache-2.0, GPLv3 or AGPLv3
    pub license: Option<String>,

    /// Project directory containing pyproject.toml
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Local directory to use for templates instead of fetching from remote (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// YAML file with default author, license and template settings
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Add development dependencies with `uv add --dev` after setup
    #[arg(long = "install-dev-deps")]
    pub install_dev_deps: bool,

    /// Development dependencies to add (comma-separated)
    #[arg(long = "dev-deps", value_delimiter = ',')]
    pub dev_deps: Option<Vec<String>>,

    /// Prompt for author and license when they are not given
    #[arg(short, long)]
    pub interactive: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl From<Args> for SetupArgs {
    fn from(args: Args) -> Self {
        SetupArgs {
            root: args.dir,
            template_dir: args.template_dir,
            config: args.config,
            author_name: args.author_name,
            author_email: args.author_email,
            license: args.license,
            install_dev_deps: args.install_dev_deps,
            dev_deps: args.dev_deps,
            interactive: args.interactive,
        }
    }
}

/// Initialize tracing with appropriate verbosity
fn init_tracing(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if quiet {
            EnvFilter::new("error")
        } else {
            match verbose {
                0 => EnvFilter::new("warn"),
                1 => EnvFilter::new("debug"),
                _ => EnvFilter::new("trace"),
            }
        }
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    init_tracing(args.verbose, args.quiet);

    let config = PyprojectConfig;
    let result = bootstrap_core::run(&config, args.into()).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    result
}
