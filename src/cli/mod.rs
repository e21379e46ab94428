//! CLI module for Glorpi
//!
//! Provides commands:
//! - `estimate`: token, cost and context-window preview
//! - `validate` / `fix`: preflight checks and auto-fixes
//! - `messages` / `payload`: assembled messages and provider requests
//! - `send`: dispatch a project to a provider
//! - `providers` / `models`: provider status and model catalogue

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod catalog;
pub mod estimate;
pub mod input;
pub mod messages;
pub mod output;
pub mod send;
pub mod validate;

/// Glorpi prompt studio CLI
#[derive(Parser, Debug)]
#[command(name = "glorpi")]
#[command(about = "Estimate, validate and send block-based prompts")]
#[command(version)]
pub struct Cli {
    /// Extra configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Machine-readable JSON output
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Estimate tokens, cost and context-window usage
    Estimate(estimate::EstimateArgs),
    /// Run preflight validation
    Validate(validate::ValidateArgs),
    /// Apply auto-fixes and print the fixed project
    Fix(validate::FixArgs),
    /// Print the assembled messages
    Messages(messages::MessagesArgs),
    /// Print the provider request without sending it
    Payload(messages::PayloadArgs),
    /// Send the prompt to a provider
    Send(send::SendArgs),
    /// Show which providers are configured
    Providers,
    /// List known models
    Models(catalog::ModelsArgs),
}

/// Run the CLI command
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let json = cli.json;
    match cli.command {
        Some(Commands::Estimate(args)) => estimate::run(args, &config, json),
        Some(Commands::Validate(args)) => validate::run_validate(args, json),
        Some(Commands::Fix(args)) => validate::run_fix(args),
        Some(Commands::Messages(args)) => messages::run_messages(args),
        Some(Commands::Payload(args)) => messages::run_payload(args, &config),
        Some(Commands::Send(args)) => send::run(args, &config, json).await,
        Some(Commands::Providers) => catalog::run_providers(&config, json),
        Some(Commands::Models(args)) => catalog::run_models(args, json),
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}
