use std::fmt;

use serde::{Deserialize, Serialize};

/// Price of a model in USD per unit (not per thousand).
///
/// Deserializes from either a bare number (flat per-unit price) or a
/// `{ prompt, completion }` table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ModelCost {
    /// Chat/completion models billed separately for prompt and completion tokens
    Completion { prompt: f64, completion: f64 },
    /// Embedding, image and audio models billed per token, image or minute
    PerUnit(f64),
}

impl ModelCost {
    /// Build a completion price from USD-per-1K-token figures.
    pub(crate) const fn per_thousand(prompt: f64, completion: f64) -> Self {
        ModelCost::Completion {
            prompt: prompt / 1000.0,
            completion: completion / 1000.0,
        }
    }

    pub fn is_completion(&self) -> bool {
        matches!(self, ModelCost::Completion { .. })
    }

    /// Multiply-add of unit counts against this price. Output is ignored for
    /// per-unit prices.
    pub fn apply(&self, input: u64, output: u64) -> f64 {
        match *self {
            ModelCost::Completion { prompt, completion } => {
                prompt * input as f64 + completion * output as f64
            }
            ModelCost::PerUnit(price) => price * input as f64,
        }
    }
}

/// What a per-unit price is counted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Token,
    Image,
    Minute,
    /// Per-unit price from user configuration with no declared unit
    Unit,
}

impl UnitKind {
    pub fn label(self) -> &'static str {
        match self {
            UnitKind::Token => "token",
            UnitKind::Image => "image",
            UnitKind::Minute => "minute",
            UnitKind::Unit => "unit",
        }
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    Builtin,
    Config,
}

impl PriceSource {
    pub fn label(self) -> &'static str {
        match self {
            PriceSource::Builtin => "builtin",
            PriceSource::Config => "config",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Exact,
    Prefix,
}

impl MatchKind {
    pub fn label(self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::Prefix => "prefix",
        }
    }
}

/// Result of resolving a requested model name to a pricing entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricedModel {
    /// Key of the table entry that priced the request
    pub name: String,
    pub cost: ModelCost,
    pub unit: UnitKind,
    pub source: PriceSource,
    pub matched_by: MatchKind,
}

/// Row of the pricing table as listed to users
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceEntry {
    pub name: String,
    pub cost: ModelCost,
    pub unit: UnitKind,
    pub source: PriceSource,
}

/// One API call to be priced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CostRequest<'a> {
    pub model: Option<&'a str>,
    pub input: Option<u64>,
    pub output: Option<u64>,
}

impl<'a> CostRequest<'a> {
    pub fn new(model: &'a str, input: u64, output: u64) -> Self {
        Self {
            model: Some(model),
            input: Some(input),
            output: Some(output),
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn per_thousand_divides_both_prices() {
        let cost = ModelCost::per_thousand(0.03, 0.06);
        let ModelCost::Completion { prompt, completion } = cost else {
            panic!("expected completion pricing");
        };
        assert!((prompt - 0.00003).abs() < 1e-12);
        assert!((completion - 0.00006).abs() < 1e-12);
    }

    #[test]
    fn per_unit_ignores_output() {
        let cost = ModelCost::PerUnit(0.02);
        assert!((cost.apply(3, 1_000) - 0.06).abs() < 1e-12);
        assert!(!cost.is_completion());
    }

    #[test]
    fn deserialize_number_as_per_unit() {
        let cost: ModelCost = serde_json::from_str("0.006").unwrap();
        assert_eq!(cost, ModelCost::PerUnit(0.006));
    }

    #[test]
    fn deserialize_table_as_completion() {
        let cost: ModelCost =
            serde_json::from_str(r#"{"prompt": 0.000001, "completion": 0.000002}"#).unwrap();
        assert_eq!(
            cost,
            ModelCost::Completion {
                prompt: 0.000001,
                completion: 0.000002
            }
        );
    }

    #[test]
    fn unit_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&UnitKind::Minute).unwrap(),
            "\"minute\""
        );
        assert_eq!(UnitKind::Image.to_string(), "image");
    }
}
