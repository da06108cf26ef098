//! Charm-style CLI progress and prompts using cliclack

use crate::config::{FileDefaults, SetupArgs};
use crate::manifest::{License, ProjectMetadata};
use crate::product::ProductConfig;
use crate::runtime::{uv_tool, SystemToolRunner};
use crate::setup::{ProjectSetup, SetupOptions};
use crate::templates::TemplateFetcher;
use anyhow::Result;
use std::path::{Path, PathBuf};

/// Run the setup with spinner output for each step
pub async fn run<C: ProductConfig>(config: &C, args: SetupArgs) -> Result<()> {
    cliclack::intro(config.display_name())?;

    // Step 1: Resolve configuration
    let root = args.root_dir();
    let defaults = FileDefaults::load(args.config.as_deref(), &root, &config.defaults_file_name())?;
    let mut options = args.resolve(&defaults);

    if args.interactive {
        prompt_missing(&mut options.metadata, &args)?;
    }
    log_identity(&options.metadata)?;

    // Step 2: Check uv if dev dependencies were requested
    if !options.dev_dependencies.is_empty() {
        handle_tool_check(&mut options)?;
    }

    // Step 3: Setup template fetcher
    let fetcher = setup_fetcher(config, &args.template_dir, defaults.template_url.as_deref())?;
    let setup = ProjectSetup::new(options, fetcher, SystemToolRunner);

    // Step 4: Edit manifest
    let spinner = cliclack::spinner();
    spinner.start("Updating pyproject.toml...");
    let edit = match setup.edit_manifest().await {
        Ok(edit) => edit,
        Err(e) => {
            spinner.stop("Manifest not updated");
            return Err(e.into());
        }
    };
    if edit.inserted.is_empty() {
        spinner.stop("pyproject.toml already has project metadata");
    } else {
        let keys: Vec<&str> = edit.inserted.iter().map(|k| k.as_str()).collect();
        spinner.stop(format!("Added to pyproject.toml: {}", keys.join(", ")));
    }
    let project_name = edit.project_name.as_deref();

    // Step 5: Fetch templates
    let spinner = cliclack::spinner();
    spinner.start("Fetching template files...");
    let fetched = match setup.fetch_templates().await {
        Ok(fetched) => fetched,
        Err(e) => {
            spinner.stop("Failed to fetch templates");
            return Err(e.into());
        }
    };
    spinner.stop(format!(
        "Fetched {}",
        display_names(&fetched, &setup.options().root).join(", ")
    ));

    // Step 6: Substitute placeholders
    let substituted = setup.substitute_placeholders(project_name).await?;
    cliclack::log::info(format!(
        "Filled placeholders in {} file(s)",
        substituted.len()
    ))?;

    // Step 7: Scaffold package
    let report = setup.scaffold(project_name).await?;
    cliclack::log::success(format!(
        "Created package {}/ and {}/",
        display_name(&report.package_dir, &setup.options().root),
        display_name(&report.tests_dir, &setup.options().root)
    ))?;

    // Step 8: Dev dependencies
    if !setup.options().dev_dependencies.is_empty() {
        cliclack::log::info(format!(
            "Adding dev dependencies: {}",
            setup.options().dev_dependencies.join(", ")
        ))?;
        setup.install_dev_dependencies().await?;
        cliclack::log::success("Dev dependencies installed")?;
    }

    // Step 9: Show next steps
    print_next_steps(config, &setup.options().root, project_name.unwrap_or_default())?;

    Ok(())
}

fn prompt_missing(metadata: &mut ProjectMetadata, args: &SetupArgs) -> Result<()> {
    if metadata.author_name.is_empty() {
        metadata.author_name = cliclack::input("Author name")
            .placeholder("Jane Doe")
            .required(false)
            .interact()?;
    }

    if metadata.author_email.is_empty() {
        metadata.author_email = cliclack::input("Author email")
            .placeholder("jane@example.com")
            .required(false)
            .interact()?;
    }

    if args.license.is_none() && !metadata.license.is_selected() {
        let mut select = cliclack::select("License");
        for license in License::ALL {
            let hint = license.spdx_id().unwrap_or("no license file");
            select = select.item(license, license.key(), hint);
        }
        metadata.license = select.interact()?;
    }

    Ok(())
}

fn log_identity(metadata: &ProjectMetadata) -> Result<()> {
    if metadata.author_name.is_empty() && metadata.author_email.is_empty() {
        cliclack::log::warning("No author given; authors entry will be empty")?;
    } else {
        cliclack::log::info(format!(
            "Author: {} <{}>",
            metadata.author_name, metadata.author_email
        ))?;
    }
    cliclack::log::info(format!("License: {}", metadata.license))?;
    Ok(())
}

fn handle_tool_check(options: &mut SetupOptions) -> Result<()> {
    let tool = uv_tool();

    if tool.is_installed() {
        let version = tool.get_version().unwrap_or_else(|| "unknown".to_string());
        cliclack::log::success(format!(
            "{} installed ({})",
            tool.config().display_name,
            version
        ))?;
        return Ok(());
    }

    cliclack::log::warning(format!(
        "{} is not installed; skipping dev dependencies. Install it with: {} ({})",
        tool.config().display_name,
        tool.config().install_hint,
        tool.config().docs_url
    ))?;
    options.dev_dependencies.clear();
    Ok(())
}

fn setup_fetcher<C: ProductConfig>(
    config: &C,
    template_dir: &Option<PathBuf>,
    configured_url: Option<&str>,
) -> Result<TemplateFetcher> {
    let fetcher = match template_dir {
        Some(path) => {
            cliclack::log::info(format!("Using local templates from {}", path.display()))?;
            TemplateFetcher::from_local(path.clone(), config.user_agent())
        }
        None => {
            let fetcher = TemplateFetcher::from_config(config, configured_url)?;
            cliclack::log::info(format!("Using remote templates from {}", fetcher.location("")))?;
            fetcher
        }
    };

    Ok(fetcher)
}

fn display_name(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

fn display_names(paths: &[PathBuf], root: &Path) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for path in paths {
        let name = display_name(path, root);
        if !names.contains(&name) {
            names.push(name);
        }
    }
    names
}

fn print_next_steps<C: ProductConfig>(config: &C, root: &Path, project_name: &str) -> Result<()> {
    let steps = config.next_steps(root, project_name);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    println!();
    println!("  Docs: {}", config.docs_url());

    cliclack::outro("Happy coding!")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_are_relative_and_unique() {
        let root = Path::new("/work/demo");
        let paths = vec![
            root.join("pyproject.toml"),
            root.join(".gitignore"),
            root.join("pyproject.toml"),
        ];
        assert_eq!(
            display_names(&paths, root),
            vec!["pyproject.toml", ".gitignore"]
        );
    }
}
