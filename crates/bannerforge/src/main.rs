//! Bannerforge CLI - turn a short idea into center-cropped banner images.
//!
//! A prompt is elaborated by a chat-completion model, sent to an image
//! generation service, and every returned image is fetched and center-cropped
//! to the banner frame.
//!
//! # Usage
//!
//! ```bash
//! # Elaborate a prompt (three variants)
//! bannerforge enhance "a lighthouse in a storm" --times 3
//!
//! # Generate banners and save them as JPEG files
//! bannerforge generate "a lighthouse in a storm" --out-dir ./banners
//!
//! # View configuration
//! bannerforge config show
//!
//! # Guided session (no subcommand, on a terminal)
//! bannerforge
//! ```

use clap::{CommandFactory, Parser, Subcommand};
use std::io::IsTerminal;

mod cli;
mod logging;

/// Bannerforge - turn a short idea into center-cropped banner images.
#[derive(Parser, Debug)]
#[command(name = "bannerforge")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Elaborate a short prompt into richer image descriptions
    Enhance(cli::enhance::EnhanceArgs),

    /// Generate banner images for a prompt
    Generate(cli::generate::GenerateArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging isn't initialized yet, so config warnings go through eprintln.
    let config = match bannerforge_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `bannerforge config path`."
            );
            bannerforge_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("Bannerforge v{}", bannerforge_core::VERSION);

    match cli.command {
        Some(Commands::Enhance(args)) => cli::enhance::execute(args, &config).await,
        Some(Commands::Generate(args)) => cli::generate::execute(args, &config).await,
        Some(Commands::Config(args)) => cli::config::execute(args).await,
        None if std::io::stdin().is_terminal() && std::io::stderr().is_terminal() => {
            cli::interactive::run(&config).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}
