//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use menucheck_domain::ExportMode;
use std::path::PathBuf;

/// Menucheck CLI - Import menu spreadsheets and inspect allergen codes offline.
#[derive(Debug, Parser)]
#[command(name = "menucheck")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true, default_value = "table")]
    pub format: CliFormat,

    /// Print code labels instead of short codes
    #[arg(long, global = true)]
    pub cleartext: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Rendering mode for code lists
    pub fn export_mode(&self) -> ExportMode {
        if self.cleartext {
            ExportMode::Cleartext
        } else {
            ExportMode::Codes
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Import a CSV file with a header row
    Import(ImportArgs),

    /// Import rows copied from a spreadsheet (tab or semicolon separated)
    Paste(PasteArgs),

    /// List the allergen and additive codes
    Codes,
}

/// Arguments for the import command.
#[derive(Debug, Parser)]
pub struct ImportArgs {
    /// CSV file to import
    pub file: PathBuf,
}

/// Arguments for the paste command.
#[derive(Debug, Parser)]
pub struct PasteArgs {
    /// File holding the pasted rows (stdin when omitted or `-`)
    pub file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_command() {
        let cli = Cli::parse_from(["menucheck", "import", "menu.csv"]);
        match cli.command {
            Command::Import(args) => assert_eq!(args.file, PathBuf::from("menu.csv")),
            _ => panic!("Expected Import command"),
        }
        assert_eq!(cli.format, CliFormat::Table);
    }

    #[test]
    fn test_paste_reads_stdin_by_default() {
        let cli = Cli::parse_from(["menucheck", "paste"]);
        assert!(matches!(cli.command, Command::Paste(PasteArgs { file: None })));
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from(["menucheck", "codes", "--format", "json", "--cleartext"]);
        assert!(matches!(cli.command, Command::Codes));
        assert_eq!(cli.format, CliFormat::Json);
        assert_eq!(cli.export_mode(), ExportMode::Cleartext);
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Cli::try_parse_from(["menucheck"]).is_err());
    }
}
