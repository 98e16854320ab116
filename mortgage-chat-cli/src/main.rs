//! CLI entry point for mortgage-chat

mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use dialoguer::{Confirm, Input, Select};
use indicatif::ProgressBar;
use mortgage_chat_agent::{ConversationController, TurnOutcome};
use mortgage_chat_client::HttpAssistantClient;
use mortgage_chat_core::config::validate::validate_config;
use mortgage_chat_core::config::{Config, ConfigLoader};
use mortgage_chat_core::logging::init_logging;
use mortgage_chat_core::protocol::PendingCalculation;
use mortgage_chat_core::session::{Role, SessionStore};
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "mortgage-chat")]
#[command(about = "Chat with the mortgage assistant")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration directory
    #[arg(short, long, global = true)]
    config_dir: Option<PathBuf>,

    /// Assistant service base URL (overrides configuration)
    #[arg(long, global = true)]
    url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive chat (default)
    Chat,
    /// Send a single message and print the reply
    Ask {
        /// Message to send
        #[arg(short, long)]
        message: String,
        /// Approve a requested simulation without prompting
        #[arg(long, conflicts_with = "deny")]
        approve: bool,
        /// Deny a requested simulation without prompting
        #[arg(long)]
        deny: bool,
    },
    /// Show configuration status
    Status,
    /// Write a configuration file
    Onboard,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_loader = if let Some(dir) = cli.config_dir {
        ConfigLoader::with_dir(dir)
    } else {
        ConfigLoader::new()
    };

    let command = cli.command.unwrap_or(Commands::Chat);
    if let Commands::Onboard = command {
        return run_onboard(&config_loader);
    }

    let mut config = config_loader.load()?;
    if let Some(url) = cli.url {
        config.service.base_url = url;
        validate_config(&config)?;
    }

    let _log_guard = init_logging(&config.logging);

    match command {
        Commands::Chat => {
            info!("Starting interactive chat");
            run_chat(&config).await?;
        }
        Commands::Ask {
            message,
            approve,
            deny,
        } => {
            info!("Sending single message");
            let preset = match (approve, deny) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            run_ask(&config, &message, preset).await?;
        }
        Commands::Status => run_status(&config_loader, &config),
        Commands::Onboard => {}
    }

    Ok(())
}

fn build_controller(config: &Config) -> ConversationController {
    let client = HttpAssistantClient::from_config(&config.service);
    ConversationController::new(Arc::new(client), SessionStore::new())
        .with_fallback_message(config.chat.fallback_message.clone())
}

/// Print transcript entries after `shown`, returning the new count
fn print_new(controller: &ConversationController, shown: usize, echo_user: bool) -> usize {
    let messages = controller.messages_since(shown);
    for message in &messages {
        if message.role == Role::User && !echo_user {
            continue;
        }
        println!("{}", render::render_message(message));
    }
    shown + messages.len()
}

async fn with_spinner<F: Future>(message: &'static str, fut: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    let output = fut.await;
    spinner.finish_and_clear();
    output
}

/// Show the approval prompt and submit the decision
async fn resolve_approval(
    controller: &ConversationController,
    calculation: &PendingCalculation,
    preset: Option<bool>,
) -> Result<TurnOutcome> {
    println!("\n{}", render::render_approval_panel(calculation));

    let approved = match preset {
        Some(approved) => approved,
        None => {
            let choices = [render::APPROVE, render::DENY];
            let idx = Select::new()
                .with_prompt("Run this simulation?")
                .items(&choices)
                .default(0)
                .interact()?;
            idx == 0
        }
    };
    info!(approved, "Approval decision made");

    Ok(with_spinner(render::PROCESSING, controller.decide(approved)).await)
}

/// Run the interactive chat loop
async fn run_chat(config: &Config) -> Result<()> {
    let controller = build_controller(config).with_greeting(config.chat.greeting.clone());

    println!("{}\n", render::render_header(&config.chat.title));
    let mut shown = print_new(&controller, 0, false);
    println!(
        "{}",
        style(format!("{} (/quit to leave)", render::INPUT_HINT)).dim()
    );

    loop {
        let line: String = Input::new()
            .with_prompt(render::USER_LABEL)
            .allow_empty(true)
            .interact_text()?;

        let trimmed = line.trim();
        if trimmed == "/quit" || trimmed == "/exit" {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }

        let outcome = with_spinner(render::SENDING, controller.send_message(&line)).await;
        shown = print_new(&controller, shown, false);

        if let TurnOutcome::ApprovalRequired(calculation) = outcome {
            resolve_approval(&controller, &calculation, None).await?;
            shown = print_new(&controller, shown, false);
        }
    }

    println!("{}", style("Goodbye!").dim());
    Ok(())
}

/// Send one message, resolving any approval request
async fn run_ask(config: &Config, message: &str, preset: Option<bool>) -> Result<()> {
    let controller = build_controller(config);

    let mut outcome = with_spinner(render::SENDING, controller.send_message(message)).await;
    let mut shown = print_new(&controller, 0, true);

    if let TurnOutcome::ApprovalRequired(calculation) = outcome.clone() {
        outcome = resolve_approval(&controller, &calculation, preset).await?;
        shown = print_new(&controller, shown, true);
    }

    if let TurnOutcome::Failed(kind) = outcome {
        error!(?kind, shown, "Message could not be completed");
        anyhow::bail!("Assistant service request failed ({:?})", kind);
    }
    Ok(())
}

/// Show configuration status
fn run_status(loader: &ConfigLoader, config: &Config) {
    println!("{}", style(format!("{} Status", config.chat.title)).bold().cyan());
    println!("Version: {}\n", env!("CARGO_PKG_VERSION"));

    println!("{}", style("Configuration:").bold());
    println!("  Config file: {}", loader.config_path().display());
    let file_state = if loader.config_path().exists() {
        style("present").green()
    } else {
        style("using defaults").dim()
    };
    println!("  File: {}", file_state);
    println!();

    println!("{}", style("Service:").bold());
    println!("  Endpoint: {}", config.service.endpoint());
    println!();

    println!("{}", style("Logging:").bold());
    println!("  Level: {}", config.logging.level);
    println!("  Format: {}", config.logging.format);
    println!("  Directory: {}", config.logging.dir);
}

/// Write a configuration file
fn run_onboard(loader: &ConfigLoader) -> Result<()> {
    println!("{}", style("Mortgage chat setup").bold().cyan());

    let config_path = loader.config_path();
    if config_path.exists() {
        let overwrite = Confirm::new()
            .with_prompt("Configuration already exists. Overwrite?")
            .default(false)
            .interact()?;
        if !overwrite {
            println!("Onboard cancelled.");
            return Ok(());
        }
    }

    let mut config = Config::default();
    config.service.base_url = Input::new()
        .with_prompt("Assistant service URL")
        .default(config.service.base_url.clone())
        .interact_text()?;
    config.service.chat_path = Input::new()
        .with_prompt("Chat endpoint path")
        .default(config.service.chat_path.clone())
        .interact_text()?;

    validate_config(&config)?;
    loader.save(&config)?;

    println!(
        "\n{}",
        style("Configuration saved successfully!").green().bold()
    );
    println!("Config location: {}", config_path.display());
    println!("\nYou can now run:");
    println!("  {} - Start chatting", style("mortgage-chat chat").cyan());
    println!(
        "  {} - Send a message",
        style("mortgage-chat ask --message 'Hello!'").cyan()
    );

    Ok(())
}
