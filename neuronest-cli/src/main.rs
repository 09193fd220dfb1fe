//! CLI entry point for neuronest

mod tui;
mod ui;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use neuronest_agent::ChatController;
use neuronest_core::config::{Config, ConfigLoader};
use neuronest_core::logging::init_logging;
use neuronest_core::utils::expand_tilde;
use neuronest_providers::{ApiGateway, GeminiClient};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "neuronest")]
#[command(about = "Terminal chat client for generative-language models")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration directory (defaults to ~/.neuronest)
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,
}

#[derive(Subcommand, Clone)]
enum Commands {
    /// Launch the interactive chat interface (default)
    Chat,
    /// Send one message and print the reply
    Ask {
        /// Message to send
        #[arg(short, long)]
        message: String,
    },
    /// Write a default config.json into the config directory
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
    /// Show resolved configuration
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = match cli.config_dir {
        Some(dir) => ConfigLoader::with_dir(dir),
        None => ConfigLoader::new(),
    };
    let command = cli.command.unwrap_or(Commands::Chat);

    // Runs before loading so that --force can replace a broken file
    if let Commands::Init { force } = command {
        run_init(&config_loader, force)?;
        return Ok(());
    }

    let config = config_loader.load()?;

    // The chat screen owns the terminal, so its logs only go to file
    let console_logs = !matches!(command, Commands::Chat);
    let _log_guard = init_logging(&config.logging, console_logs);

    if !config.provider.has_api_key() {
        warn!("No API key configured; set GEMINI_API_KEY or provider.api_key");
    }

    match command {
        Commands::Chat => {
            info!("Starting chat interface");
            let controller = build_controller(&config);
            tui::run_tui(controller, config.ui.user_name.clone())?;
        }
        Commands::Ask { message } => {
            info!("Running one-shot ask");
            run_ask(&config, message).await?;
        }
        Commands::Status => run_status(&config_loader, &config),
        Commands::Init { .. } => {}
    }

    Ok(())
}

fn build_controller(config: &Config) -> ChatController {
    let client = GeminiClient::from_config(&config.provider);
    ChatController::new(ApiGateway::new(Arc::new(client)))
}

/// Submit a single message and print the model turn it produces
async fn run_ask(config: &Config, message: String) -> Result<()> {
    let mut controller = build_controller(config);
    if !controller.submit(message) {
        anyhow::bail!("Message must not be empty");
    }

    println!("{}", style("Thinking...").cyan());
    match controller.settle().await {
        Some(turn) => {
            println!("\n{}", style(turn.role().label()).bold());
            println!("{}", turn.text());
        }
        None => warn!("Request settled without a reply"),
    }
    Ok(())
}

/// Save the built-in defaults; environment overrides are never written out.
///
/// Returns whether a file was written.
fn run_init(loader: &ConfigLoader, force: bool) -> Result<bool> {
    let path = loader.config_path();
    if path.exists() && !force {
        println!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
        return Ok(false);
    }

    loader.save(&Config::default())?;
    println!("{} Wrote {}", style("✓").green(), path.display());
    println!("Set provider.api_key there or export GEMINI_API_KEY.");
    Ok(true)
}

fn run_status(loader: &ConfigLoader, config: &Config) {
    let client = GeminiClient::from_config(&config.provider);

    println!("{}", style("NeuroNest Status").bold().cyan());
    println!("Version: {}\n", env!("CARGO_PKG_VERSION"));

    println!("{}", style("Configuration:").bold());
    println!("  Config file: {}", loader.config_path().display());
    println!("  Log directory: {}", expand_tilde(&config.logging.dir).display());
    println!();

    println!("{}", style("Provider:").bold());
    println!("  Model: {}", config.provider.model);
    println!("  Endpoint: {}", client.endpoint());
    let key_status = if config.provider.has_api_key() {
        style("configured").green()
    } else {
        style("not configured").red()
    };
    println!("  API key: {}", key_status);
}
