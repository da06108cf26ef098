//! External tool management
//!
//! This module provides:
//! - The `ToolRunner` capability and its host implementation
//! - `ToolManager` for uv (detection, dev-dependency installation)

pub mod tool;

pub use tool::{uv_tool, SystemToolRunner, ToolManager, ToolOutput, ToolRunner};
