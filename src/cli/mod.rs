//! CLI argument parsing and command handling.

mod args;
pub mod validators;

pub use args::{AnalyzeArgs, Cli, Command, ConfigAction};
