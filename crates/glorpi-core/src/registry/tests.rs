//! Tests for the model registry

use super::*;

#[test]
fn test_catalogue_ids_are_unique() {
    let registry = ModelRegistry::builtin();
    assert_eq!(registry.by_id.len(), registry.models().len());
    assert_eq!(registry.models().len(), 14);
}

#[test]
fn test_get_model() {
    let model = get_model("gpt-4o").unwrap();
    assert_eq!(model.provider, ProviderId::OpenAi);
    assert_eq!(model.context_window, 128_000);
    assert!(model.supports(Knob::ResponseFormat));
    assert!(model.has_capability("json_mode"));

    assert!(get_model("gpt-2").is_none());
}

#[test]
fn test_reasoning_models_reject_temperature() {
    for id in ["o1", "o3-mini", "o1-mini"] {
        let model = get_model(id).unwrap();
        assert!(!model.supports(Knob::Temperature));
        assert!(model.supports(Knob::ReasoningEffort));
    }
}

#[test]
fn test_models_by_provider_keeps_catalogue_order() {
    let ids: Vec<_> = models_by_provider(ProviderId::Anthropic)
        .iter()
        .map(|m| m.id)
        .collect();
    assert_eq!(
        ids,
        vec![
            "claude-sonnet-4-20250514",
            "claude-opus-4-20250514",
            "claude-3-5-haiku-20241022"
        ]
    );
    assert!(models_by_provider(ProviderId::OpenAiCompatible).is_empty());
}

#[test]
fn test_at_most_one_default_per_provider() {
    for provider in ProviderId::ALL {
        let defaults = models_by_provider(provider)
            .iter()
            .filter(|m| m.is_default)
            .count();
        assert!(defaults <= 1, "{provider} has {defaults} defaults");
    }
}

#[test]
fn test_default_models() {
    assert_eq!(default_model().id, "claude-sonnet-4-20250514");
    assert_eq!(
        default_model_for(ProviderId::Anthropic).unwrap().id,
        "claude-sonnet-4-20250514"
    );
    assert_eq!(
        default_model_for(ProviderId::Gemini).unwrap().id,
        "gemini-2.5-pro-preview-05-06"
    );
    assert!(default_model_for(ProviderId::OpenAiCompatible).is_none());
}

#[test]
fn test_provider_catalogue() {
    let catalogue = providers();
    assert_eq!(catalogue.len(), 5);

    let compatible = catalogue
        .iter()
        .find(|p| p.id == ProviderId::OpenAiCompatible)
        .unwrap();
    assert!(!compatible.enabled);
    assert!(compatible.models.is_empty());

    let deepseek = catalogue
        .iter()
        .find(|p| p.id == ProviderId::DeepSeek)
        .unwrap();
    assert!(deepseek.enabled);
    assert_eq!(deepseek.models.len(), 2);
}

#[test]
fn test_calculate_cost() {
    let cost = calculate_cost("claude-sonnet-4-20250514", 1_000_000, 1_000_000);
    assert!((cost.input_cost - 3.0).abs() < 1e-9);
    assert!((cost.output_cost - 15.0).abs() < 1e-9);
    assert!((cost.total_cost - 18.0).abs() < 1e-9);
    assert_eq!(cost.currency, "USD");

    let cost = calculate_cost("gpt-4o-mini", 1_000, 1_000);
    assert!((cost.total_cost - 0.00075).abs() < 1e-12);
}

#[test]
fn test_calculate_cost_unknown_model_is_zero() {
    let cost = calculate_cost("not-a-model", 1000, 1000);
    assert_eq!(cost, CostEstimate::zero());
    assert_eq!(cost.input_cost, 0.0);
    assert_eq!(cost.output_cost, 0.0);
    assert_eq!(cost.total_cost, 0.0);
}

#[test]
fn test_cost_serializes_camel_case() {
    let value = serde_json::to_value(calculate_cost("o1", 0, 0)).unwrap();
    assert!(value.get("inputCost").is_some());
    assert!(value.get("totalCost").is_some());
    assert_eq!(value["currency"], "USD");
}

#[test]
fn test_context_window_usage() {
    let usage = context_window_usage("deepseek-chat", 30_000, 2_000);
    assert_eq!(usage.used, 32_000);
    assert_eq!(usage.total, 64_000);
    assert!((usage.percentage - 50.0).abs() < 1e-9);
}

#[test]
fn test_context_window_usage_is_capped() {
    let usage = context_window_usage("deepseek-chat", 100_000, 100_000);
    assert_eq!(usage.used, 200_000);
    assert_eq!(usage.percentage, 100.0);
}

#[test]
fn test_context_window_usage_unknown_model() {
    assert_eq!(
        context_window_usage("mystery", 10, 10),
        ContextWindowUsage::default()
    );
}
