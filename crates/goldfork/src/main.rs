// SPDX-FileCopyrightText: 2026 Goldfork Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goldfork - conversational restaurant reservation agent.
//!
//! This is the binary entry point for the Goldfork server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod gateway;
mod serve;

/// Goldfork - conversational restaurant reservation agent.
#[derive(Parser, Debug)]
#[command(name = "goldfork", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Goldfork reservation agent server.
    Serve,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match goldfork_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            goldfork_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("goldfork serve failed: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml::to_string_pretty(&redacted(config)) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("failed to render config: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("goldfork: use --help for available commands");
        }
    }
}

/// Masks secret fields before printing the resolved configuration.
fn redacted(mut config: goldfork_config::GoldforkConfig) -> goldfork_config::GoldforkConfig {
    if !config.openai.api_key.is_empty() {
        config.openai.api_key = "***".to_string();
    }
    if !config.calendar.api_token.is_empty() {
        config.calendar.api_token = "***".to_string();
    }
    config
}
