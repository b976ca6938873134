//! Menucheck CLI - Import menu spreadsheets and list allergen codes.

use clap::Parser;
use menucheck_cli::commands;
use menucheck_cli::{Cli, Command, Formatter};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so JSON output stays clean
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let formatter = Formatter::new(cli.format, cli.export_mode(), !cli.no_color);

    match cli.command {
        Command::Import(args) => commands::execute_import(args, &formatter)?,
        Command::Paste(args) => commands::execute_paste(args, &formatter)?,
        Command::Codes => commands::execute_codes(&formatter)?,
    }

    Ok(())
}
