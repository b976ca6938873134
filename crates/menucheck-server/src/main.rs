//! Menucheck Server binary
//!
//! Starts the HTTP server for menu analysis and spreadsheet import.

use menucheck_server::{config::ServerConfig, start_server, ServerError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        ServerConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("No config file specified, using defaults");
        eprintln!("Usage: menucheck-server --config <path-to-config.toml>");
        eprintln!();
        ServerConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Menucheck Server - Menu allergen and additive ingestion");
    println!();
    println!("USAGE:");
    println!("    menucheck-server --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    OPENAI_API_KEY     Provider credential (AI endpoints are disabled without it)");
    println!("    RUST_LOG           Log filter (default: info)");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address, bind_port");
    println!("    - provider_endpoint, model, temperature, provider_timeout_secs");
    println!("    - [parse_menu_limit] and [suggest_limit]: max_requests, window_ms");
    println!("    - max_tracked_keys");
    println!("    - [extractor]: max_text_length, max_artifact_bytes, extraction_timeout_secs,");
    println!("      recognition_timeout_secs");
    println!();
}
