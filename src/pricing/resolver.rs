use std::collections::HashMap;

use super::error::PricingError;
use super::table::{PREFIX_FALLBACKS, TableEntry, lookup};
use super::types::{CostRequest, MatchKind, ModelCost, PriceSource, PricedModel, UnitKind};

fn from_table(entry: &TableEntry, matched_by: MatchKind) -> PricedModel {
    PricedModel {
        name: entry.name.to_string(),
        cost: entry.cost,
        unit: entry.unit,
        source: PriceSource::Builtin,
        matched_by,
    }
}

fn from_override(name: &str, cost: ModelCost, matched_by: MatchKind) -> PricedModel {
    let unit = if cost.is_completion() {
        UnitKind::Token
    } else {
        UnitKind::Unit
    };
    PricedModel {
        name: name.to_string(),
        cost,
        unit,
        source: PriceSource::Config,
        matched_by,
    }
}

/// Resolve a model name against user overrides and the built-in table.
///
/// Order: override exact, built-in exact, override prefix (longest key
/// first), built-in prefix fallbacks.
pub(super) fn resolve_pricing(
    model: &str,
    overrides: &HashMap<String, ModelCost>,
) -> Option<PricedModel> {
    if let Some(cost) = overrides.get(model) {
        return Some(from_override(model, *cost, MatchKind::Exact));
    }

    if let Some(entry) = lookup(model) {
        return Some(from_table(entry, MatchKind::Exact));
    }

    let mut candidates: Vec<(&String, &ModelCost)> = overrides
        .iter()
        .filter(|(name, _)| !name.is_empty() && model.starts_with(name.as_str()))
        .collect();
    candidates.sort_by(|(a, _), (b, _)| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
    if let Some((name, cost)) = candidates.first() {
        return Some(from_override(name, **cost, MatchKind::Prefix));
    }

    PREFIX_FALLBACKS
        .iter()
        .find(|(prefix, _)| model.starts_with(prefix))
        .and_then(|(_, target)| lookup(target))
        .map(|entry| from_table(entry, MatchKind::Prefix))
}

/// Look up the built-in price for `model` by exact name or known prefix.
pub fn get_model_cost(model: &str) -> Result<ModelCost, PricingError> {
    resolve_pricing(model, &HashMap::new())
        .map(|priced| priced.cost)
        .ok_or_else(|| PricingError::UnknownModel {
            model: model.to_string(),
        })
}

/// Shared short-circuit rules for pricing a single call.
///
/// A missing model or a missing/zero input or output count costs nothing,
/// without consulting the table.
pub(super) fn cost_with<F>(request: &CostRequest<'_>, resolve: F) -> Result<f64, PricingError>
where
    F: FnOnce(&str) -> Result<ModelCost, PricingError>,
{
    let Some(model) = request.model.filter(|m| !m.is_empty()) else {
        return Ok(0.0);
    };
    let input = request.input.unwrap_or(0);
    let output = request.output.unwrap_or(0);
    if input == 0 || output == 0 {
        return Ok(0.0);
    }

    let cost = resolve(model)?;
    Ok(cost.apply(input, output))
}

/// Price one call against the built-in table.
pub fn calculate_cost(request: &CostRequest<'_>) -> Result<f64, PricingError> {
    cost_with(request, get_model_cost)
}
