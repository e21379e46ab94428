//! `glorpi messages` and `glorpi payload`

use super::input::{load_project, resolve_target};
use super::output::print_json;
use crate::config::AppConfig;
use anyhow::Result;
use clap::Args;
use glorpi_core::blocks_to_messages;
use glorpi_llm::{BuildPayloadParams, ProviderRegistry};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct MessagesArgs {
    /// Project file (`-` for stdin)
    pub project: PathBuf,
}

#[derive(Args, Debug)]
pub struct PayloadArgs {
    /// Project file (`-` for stdin)
    pub project: PathBuf,
    /// Provider id
    #[arg(long)]
    pub provider: Option<String>,
    /// Model id
    #[arg(long)]
    pub model: Option<String>,
    /// Print credentials unmasked
    #[arg(long)]
    pub show_secrets: bool,
}

pub fn run_messages(args: MessagesArgs) -> Result<()> {
    let project = load_project(&args.project)?;
    print_json(&blocks_to_messages(&project.blocks))
}

pub fn run_payload(args: PayloadArgs, config: &AppConfig) -> Result<()> {
    let project = load_project(&args.project)?;
    let target = resolve_target(
        config,
        Some(&project),
        args.provider.as_deref(),
        args.model.as_deref(),
    )?;

    let registry = ProviderRegistry::from_config(&config.llm)?;
    let adapter = registry.get_adapter(target.provider.as_str())?;
    let messages = blocks_to_messages(&project.blocks);
    let request = adapter.build_payload(BuildPayloadParams {
        model: &target.model,
        messages: &messages,
        knobs: &project.knobs,
    });

    if args.show_secrets {
        print_json(&request)
    } else {
        print_json(&request.redacted())
    }
}
