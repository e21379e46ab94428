//! `glorpi send` - validate, then dispatch to a provider

use super::input::{load_project, resolve_target};
use super::output::print_json;
use crate::config::AppConfig;
use anyhow::{bail, Result};
use clap::Args;
use glorpi_core::{blocks_to_messages, calculate_cost, validate_prompt, Severity};
use glorpi_llm::{CancellationToken, ProviderRegistry, SendParams};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Project file (`-` for stdin)
    pub project: PathBuf,
    /// Provider id
    #[arg(long)]
    pub provider: Option<String>,
    /// Model id
    #[arg(long)]
    pub model: Option<String>,
    /// Send even when validation reports errors
    #[arg(long)]
    pub force: bool,
    /// Answer with a simulated response when the provider has no credentials
    #[arg(long)]
    pub mock_unconfigured: bool,
}

pub async fn run(args: SendArgs, config: &AppConfig, json: bool) -> Result<()> {
    let project = load_project(&args.project)?;
    let target = resolve_target(
        config,
        Some(&project),
        args.provider.as_deref(),
        args.model.as_deref(),
    )?;

    let blocking: Vec<_> = validate_prompt(&project.blocks)
        .into_iter()
        .filter(|issue| issue.severity == Severity::Error)
        .collect();
    if !blocking.is_empty() {
        for issue in &blocking {
            warn!(issue = %issue.id, "{}", issue.title);
        }
        if !args.force {
            bail!(
                "{} blocking issue(s); run `glorpi validate` or pass --force",
                blocking.len()
            );
        }
    }

    let registry = ProviderRegistry::from_config(&config.llm)?;
    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    info!(provider = %target.provider, model = %target.model, "Sending prompt");
    let params = SendParams::new(target.model.clone(), blocks_to_messages(&project.blocks))
        .with_knobs(project.knobs.clone())
        .with_cancellation(cancel);
    let response = registry
        .send(target.provider.as_str(), params, args.mock_unconfigured)
        .await?;

    if json {
        print_json(&response)?;
    } else if response.success {
        println!("{}", response.content.as_deref().unwrap_or_default());
        if let Some(usage) = response.usage {
            let cost = calculate_cost(&target.model, usage.input_tokens, usage.output_tokens);
            eprintln!(
                "\n[{} in / {} out, ${:.6}, {} ms]",
                usage.input_tokens,
                usage.output_tokens,
                cost.total_cost,
                response.latency_ms.unwrap_or_default()
            );
        }
    }

    if response.is_cancelled() {
        eprintln!("Request cancelled");
        return Ok(());
    }
    if !response.success {
        bail!(
            "{}",
            response
                .error
                .unwrap_or_else(|| "Request failed".to_string())
        );
    }
    Ok(())
}
