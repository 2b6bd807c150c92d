// SPDX-FileCopyrightText: 2026 Sibyl Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Sibyl - a retrieval-augmented question-answering agent.
//!
//! This is the binary entry point for the Sibyl server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// Sibyl - a retrieval-augmented question-answering agent.
#[derive(Parser, Debug)]
#[command(name = "sibyl", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Sibyl agent server.
    Serve,
    /// Print the effective configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration at startup so every subcommand sees the same view.
    let config = match sibyl_config::load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("sibyl: configuration error: {e}");
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("sibyl: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => match toml_summary(&config) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("sibyl: failed to render config: {e}");
                std::process::exit(1);
            }
        },
        None => {
            println!("sibyl: use --help for available commands");
        }
    }
}

/// Renders the effective config, with the API key masked.
fn toml_summary(config: &sibyl_config::SibylConfig) -> Result<String, toml::ser::Error> {
    let mut masked = config.clone();
    if masked.groq.api_key.is_some() {
        masked.groq.api_key = Some("********".to_string());
    }
    toml::to_string_pretty(&masked)
}
