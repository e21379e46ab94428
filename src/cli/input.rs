//! Project loading and provider/model selection

use crate::config::AppConfig;
use anyhow::{bail, Context, Result};
use glorpi_core::{default_model_for, get_model, Project, ProviderId};
use std::io::Read;
use std::path::Path;

/// Read a project document from a path, or stdin for `-`
pub fn load_project(path: &Path) -> Result<Project> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read project from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read project file {}", path.display()))?
    };

    Project::from_json(&raw).with_context(|| format!("Invalid project {}", path.display()))
}

/// Provider and model a command should target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub provider: ProviderId,
    pub model: String,
}

/// Pick provider and model.
///
/// Precedence: command line, then the project's selection, then configured
/// defaults. A model known to the registry implies its provider.
pub fn resolve_target(
    config: &AppConfig,
    project: Option<&Project>,
    provider_flag: Option<&str>,
    model_flag: Option<&str>,
) -> Result<Target> {
    let model_choice = model_flag
        .map(str::to_string)
        .or_else(|| project.and_then(|p| p.selected_model.clone()));

    let provider = match provider_flag {
        Some(p) => Some(p.parse::<ProviderId>()?),
        None => match project.map(Project::provider).transpose()?.flatten() {
            Some(p) => Some(p),
            None => model_choice
                .as_deref()
                .and_then(get_model)
                .map(|m| m.provider),
        },
    };
    let provider = match provider {
        Some(p) => p,
        None => config.defaults.provider()?.unwrap_or_default(),
    };

    let model = model_choice
        .or_else(|| {
            config
                .defaults
                .model
                .clone()
                .filter(|m| get_model(m).is_some_and(|c| c.provider == provider))
        })
        .or_else(|| default_model_for(provider).map(|m| m.id.to_string()));

    match model {
        Some(model) => Ok(Target { provider, model }),
        None => bail!(
            "No model known for provider {provider}; pass --model explicitly"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DefaultsConfig;

    fn config(provider: &str, model: &str) -> AppConfig {
        AppConfig {
            defaults: DefaultsConfig {
                provider: Some(provider.to_string()),
                model: Some(model.to_string()),
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_flags_win() {
        let target = resolve_target(
            &config("anthropic", "claude-sonnet-4-20250514"),
            None,
            Some("openai"),
            Some("gpt-4o-mini"),
        )
        .unwrap();
        assert_eq!(target.provider, ProviderId::OpenAi);
        assert_eq!(target.model, "gpt-4o-mini");
    }

    #[test]
    fn test_model_implies_provider() {
        let target = resolve_target(
            &config("anthropic", "claude-sonnet-4-20250514"),
            None,
            None,
            Some("gemini-2.0-flash"),
        )
        .unwrap();
        assert_eq!(target.provider, ProviderId::Gemini);
    }

    #[test]
    fn test_project_selection() {
        let project = Project {
            selected_provider: Some("deepseek".to_string()),
            ..Default::default()
        };
        let target = resolve_target(
            &config("anthropic", "claude-sonnet-4-20250514"),
            Some(&project),
            None,
            None,
        )
        .unwrap();
        assert_eq!(target.provider, ProviderId::DeepSeek);
        assert_eq!(target.model, "deepseek-chat");
    }

    #[test]
    fn test_configured_defaults() {
        let target =
            resolve_target(&config("anthropic", "claude-sonnet-4-20250514"), None, None, None)
                .unwrap();
        assert_eq!(target.provider, ProviderId::Anthropic);
        assert_eq!(target.model, "claude-sonnet-4-20250514");
    }

    #[test]
    fn test_compatible_needs_explicit_model() {
        let err = resolve_target(&AppConfig::default(), None, Some("openai_compatible"), None)
            .unwrap_err();
        assert!(err.to_string().contains("--model"));
    }

    #[test]
    fn test_unknown_provider_flag() {
        assert!(resolve_target(&AppConfig::default(), None, Some("mistral"), None).is_err());
    }
}
