//! Menucheck CLI library.
//!
//! Offline front end over the spreadsheet importers and the code registry:
//! command definitions, command execution and output formatting.

pub mod cli;
pub mod commands;
pub mod error;
pub mod output;

pub use cli::{Cli, CliFormat, Command};
pub use error::{CliError, Result};
pub use output::Formatter;
