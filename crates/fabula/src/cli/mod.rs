//! Command-line interface module.

mod commands;
mod export;
mod tell;

pub use commands::{Cli, Commands};
pub use export::run_export;
pub use tell::{TellOptions, run_tell};
