//! `glorpi providers` and `glorpi models`

use super::output::print_json;
use crate::config::AppConfig;
use anyhow::Result;
use clap::Args;
use glorpi_core::{models_by_provider, ModelConfig, ModelRegistry, ProviderId};
use glorpi_llm::ProviderRegistry;

#[derive(Args, Debug)]
pub struct ModelsArgs {
    /// Only list models of this provider
    #[arg(long)]
    pub provider: Option<String>,
}

pub fn run_providers(config: &AppConfig, json: bool) -> Result<()> {
    let status = ProviderRegistry::from_config(&config.llm)?.status();
    if json {
        return print_json(&status);
    }

    for provider in &status.providers {
        let mark = if provider.configured { "✓" } else { "✗" };
        println!("{mark} {:<18} {}", provider.id.as_str(), provider.display_name);
    }
    Ok(())
}

pub fn run_models(args: ModelsArgs, json: bool) -> Result<()> {
    let models: Vec<&'static ModelConfig> = match args.provider.as_deref() {
        Some(provider) => models_by_provider(provider.parse::<ProviderId>()?),
        None => ModelRegistry::builtin().models().iter().collect(),
    };
    if json {
        return print_json(&models);
    }

    for model in models {
        let default = if model.is_default { " (default)" } else { "" };
        println!(
            "{:<32} {:<18} ctx {:>9}  ${:>6.2} / ${:>6.2} per 1M{default}",
            model.id,
            model.provider.as_str(),
            model.context_window,
            model.input_price_per_million,
            model.output_price_per_million,
        );
    }
    Ok(())
}
