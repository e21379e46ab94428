//! `glorpi estimate` - token, cost and context-window preview

use super::input::{load_project, resolve_target};
use super::output::print_json;
use crate::config::AppConfig;
use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use glorpi_core::{
    calculate_cost, context_window_usage, estimate_output_tokens, estimate_prompt_tokens,
    estimate_tokens_for_text, format_token_count, ContextWindowUsage, CostEstimate,
    TokenEstimate, Verbosity,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct EstimateArgs {
    /// Project file (`-` for stdin)
    pub project: Option<PathBuf>,
    /// Estimate raw text instead of a project
    #[arg(long, conflicts_with = "project")]
    pub text: Option<String>,
    /// Provider id
    #[arg(long)]
    pub provider: Option<String>,
    /// Model id used for cost and context window
    #[arg(long)]
    pub model: Option<String>,
    /// Expected output tokens (replaces the 30% placeholder)
    #[arg(long, conflicts_with = "verbosity")]
    pub output_tokens: Option<u32>,
    /// Derive expected output from a verbosity preset
    #[arg(long, value_enum)]
    pub verbosity: Option<VerbosityArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum VerbosityArg {
    Minimal,
    Standard,
    Detailed,
    Comprehensive,
}

impl From<VerbosityArg> for Verbosity {
    fn from(arg: VerbosityArg) -> Self {
        match arg {
            VerbosityArg::Minimal => Self::Minimal,
            VerbosityArg::Standard => Self::Standard,
            VerbosityArg::Detailed => Self::Detailed,
            VerbosityArg::Comprehensive => Self::Comprehensive,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateReport {
    provider: String,
    model: String,
    tokens: TokenEstimate,
    cost: CostEstimate,
    context_window: ContextWindowUsage,
}

pub fn run(args: EstimateArgs, config: &AppConfig, json: bool) -> Result<()> {
    let project = args.project.as_deref().map(load_project).transpose()?;
    let target = resolve_target(
        config,
        project.as_ref(),
        args.provider.as_deref(),
        args.model.as_deref(),
    )?;

    let estimate = match (&args.text, &project) {
        (Some(text), _) => {
            TokenEstimate::from_input(estimate_tokens_for_text(text, target.provider))
        }
        (None, Some(project)) => estimate_prompt_tokens(&project.blocks, target.provider),
        (None, None) => bail!("Pass a project file or --text"),
    };

    let estimate = match (args.output_tokens, args.verbosity) {
        (Some(tokens), _) => estimate.with_output_tokens(tokens),
        (None, Some(verbosity)) => {
            let tokens = estimate_output_tokens(estimate.input_tokens, verbosity.into());
            estimate.with_output_tokens(tokens)
        }
        (None, None) => estimate,
    };

    let report = EstimateReport {
        provider: target.provider.to_string(),
        cost: calculate_cost(&target.model, estimate.input_tokens, estimate.output_tokens),
        context_window: context_window_usage(
            &target.model,
            estimate.input_tokens,
            estimate.output_tokens,
        ),
        model: target.model,
        tokens: estimate,
    };

    if json {
        return print_json(&report);
    }

    println!("Provider:   {} ({})", report.provider, report.model);
    println!(
        "Tokens:     {} in / {} out / {} total ({:?} confidence)",
        format_token_count(report.tokens.input_tokens),
        format_token_count(report.tokens.output_tokens),
        format_token_count(report.tokens.total_tokens),
        report.tokens.confidence,
    );
    if let Some(breakdown) = &report.tokens.breakdown {
        for (block_id, tokens) in breakdown {
            println!("  {block_id:<36} {tokens}");
        }
    }
    println!(
        "Cost:       ${:.6} in + ${:.6} out = ${:.6} {}",
        report.cost.input_cost,
        report.cost.output_cost,
        report.cost.total_cost,
        report.cost.currency
    );
    println!(
        "Context:    {} / {} ({:.1}%)",
        report.context_window.used, report.context_window.total, report.context_window.percentage
    );
    Ok(())
}
