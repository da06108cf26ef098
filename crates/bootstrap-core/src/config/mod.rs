//! Run configuration: command-line arguments layered over an optional defaults file

pub mod defaults;
pub mod resolver;

pub use defaults::FileDefaults;
pub use resolver::{SetupArgs, DEFAULT_DEV_DEPENDENCIES};
