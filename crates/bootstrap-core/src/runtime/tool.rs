//! External tool invocation
//!
//! Process execution sits behind the `ToolRunner` trait so the workflow can be
//! driven with a fake in tests. `ToolManager` wraps one CLI tool (uv) and
//! knows how to detect it and which arguments to pass it.

use crate::error::{Error, Result};
use colored::Colorize;
use std::path::Path;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;
use tracing::debug;

/// Exit information of a finished tool process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolOutput {
    pub success: bool,
    pub code: Option<i32>,
}

/// Capability to run an external program to completion
#[allow(async_fn_in_trait)]
pub trait ToolRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ToolOutput>;
}

impl<T: ToolRunner> ToolRunner for &T {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ToolOutput> {
        (**self).run(program, args, cwd).await
    }
}

/// Runs programs on the host, streaming their output to the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemToolRunner;

impl ToolRunner for SystemToolRunner {
    async fn run(&self, program: &str, args: &[String], cwd: &Path) -> Result<ToolOutput> {
        println!();
        println!(
            "{} {} {}",
            "Running:".dimmed(),
            program.yellow(),
            args.join(" ").yellow()
        );
        println!();

        let spawn_error = |e: std::io::Error| Error::Tool {
            program: program.to_string(),
            message: e.to_string(),
        };

        let mut child = TokioCommand::new(program)
            .args(args)
            .current_dir(cwd)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(spawn_error)?;

        let stdout = child.stdout.take().ok_or_else(|| Error::Tool {
            program: program.to_string(),
            message: "failed to capture stdout".to_string(),
        })?;
        let stderr = child.stderr.take().ok_or_else(|| Error::Tool {
            program: program.to_string(),
            message: "failed to capture stderr".to_string(),
        })?;

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();
        let mut stdout_open = true;
        let mut stderr_open = true;

        while stdout_open || stderr_open {
            tokio::select! {
                line = stdout_reader.next_line(), if stdout_open => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line),
                        Ok(None) => stdout_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stdout:".red(), e);
                            stdout_open = false;
                        }
                    }
                }
                line = stderr_reader.next_line(), if stderr_open => {
                    match line {
                        Ok(Some(line)) => eprintln!("  {}", line.yellow()),
                        Ok(None) => stderr_open = false,
                        Err(e) => {
                            eprintln!("{} {}", "Error reading stderr:".red(), e);
                            stderr_open = false;
                        }
                    }
                }
            }
        }

        let status = child.wait().await.map_err(spawn_error)?;
        println!();

        debug!(program, code = ?status.code(), "tool exited");
        Ok(ToolOutput {
            success: status.success(),
            code: status.code(),
        })
    }
}

/// Configuration for a CLI tool
#[derive(Debug, Clone)]
pub struct ToolConfig {
    /// Name of the tool binary (e.g., "uv")
    pub name: &'static str,
    /// Display name for user-facing messages
    pub display_name: &'static str,
    /// Command users can run to install the tool themselves
    pub install_hint: &'static str,
    /// URL to the documentation
    pub docs_url: &'static str,
}

/// Manager for checking and driving a CLI tool
pub struct ToolManager {
    config: ToolConfig,
}

impl ToolManager {
    /// Create a new tool manager with the given configuration
    pub fn new(config: ToolConfig) -> Self {
        Self { config }
    }

    /// Get the tool configuration
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Check if the tool is installed and available in PATH
    pub fn is_installed(&self) -> bool {
        std::process::Command::new("which")
            .arg(self.config.name)
            .output()
            .map(|output| output.status.success())
            .unwrap_or(false)
    }

    /// Get the installed tool version (if available)
    pub fn get_version(&self) -> Option<String> {
        std::process::Command::new(self.config.name)
            .arg("--version")
            .output()
            .ok()
            .and_then(|output| {
                if output.status.success() {
                    String::from_utf8(output.stdout)
                        .ok()
                        .map(|s| s.trim().to_string())
                } else {
                    None
                }
            })
    }

    /// Arguments for `<tool> add --dev <packages...>`
    pub fn dev_dependency_args(packages: &[String]) -> Vec<String> {
        let mut args = vec!["add".to_string(), "--dev".to_string()];
        args.extend(packages.iter().cloned());
        args
    }

    /// Add `packages` as development dependencies of the project at `root`
    pub async fn add_dev_dependencies<R: ToolRunner>(
        &self,
        runner: &R,
        root: &Path,
        packages: &[String],
    ) -> Result<()> {
        if packages.is_empty() {
            return Ok(());
        }

        let args = Self::dev_dependency_args(packages);
        let output = runner.run(self.config.name, &args, root).await?;
        if output.success {
            Ok(())
        } else {
            Err(Error::Tool {
                program: self.config.name.to_string(),
                message: format!(
                    "exited with code {}",
                    output
                        .code
                        .map(|c| c.to_string())
                        .unwrap_or_else(|| "unknown".to_string())
                ),
            })
        }
    }
}

/// Pre-configured tool manager for uv
pub fn uv_tool() -> ToolManager {
    ToolManager::new(ToolConfig {
        name: "uv",
        display_name: "uv",
        install_hint: "curl -LsSf https://astral.sh/uv/install.sh | sh",
        docs_url: "https://docs.astral.sh/uv/",
    })
}
