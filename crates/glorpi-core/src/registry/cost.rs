//! Cost and context-window arithmetic

use super::get_model;
use serde::Serialize;

/// Currency every registry price is quoted in
pub const CURRENCY: &str = "USD";

/// Estimated cost of a request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    /// Input side cost
    pub input_cost: f64,
    /// Output side cost
    pub output_cost: f64,
    /// `input_cost + output_cost`
    pub total_cost: f64,
    /// Always `"USD"`
    pub currency: &'static str,
}

impl CostEstimate {
    /// All-zero estimate
    #[must_use]
    pub fn zero() -> Self {
        Self {
            input_cost: 0.0,
            output_cost: 0.0,
            total_cost: 0.0,
            currency: CURRENCY,
        }
    }
}

/// How much of a model's context window a request occupies
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ContextWindowUsage {
    /// Input plus output tokens
    pub used: u32,
    /// Context window size
    pub total: u32,
    /// `used / total * 100`, capped at 100
    pub percentage: f64,
}

/// Cost for a request; unknown models cost nothing
#[must_use]
pub fn calculate_cost(model_id: &str, input_tokens: u32, output_tokens: u32) -> CostEstimate {
    let Some(model) = get_model(model_id) else {
        return CostEstimate::zero();
    };

    let input_cost = (f64::from(input_tokens) / 1_000_000.0) * model.input_price_per_million;
    let output_cost = (f64::from(output_tokens) / 1_000_000.0) * model.output_price_per_million;

    CostEstimate {
        input_cost,
        output_cost,
        total_cost: input_cost + output_cost,
        currency: CURRENCY,
    }
}

/// Context window usage; unknown models yield all zeros
#[must_use]
pub fn context_window_usage(
    model_id: &str,
    input_tokens: u32,
    output_tokens: u32,
) -> ContextWindowUsage {
    let Some(model) = get_model(model_id) else {
        return ContextWindowUsage::default();
    };

    let used = input_tokens.saturating_add(output_tokens);
    let percentage = (f64::from(used) / f64::from(model.context_window) * 100.0).min(100.0);

    ContextWindowUsage {
        used,
        total: model.context_window,
        percentage,
    }
}
