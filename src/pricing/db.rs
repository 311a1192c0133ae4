use std::cell::RefCell;
use std::collections::HashMap;

use super::error::PricingError;
use super::resolver::{cost_with, resolve_pricing};
use super::table::MODEL_COSTS;
use super::types::{CostRequest, ModelCost, PriceEntry, PriceSource, PricedModel, UnitKind};

/// Built-in pricing table layered under user-supplied overrides
#[derive(Debug, Default)]
pub struct PricingDb {
    overrides: HashMap<String, ModelCost>,
    resolved: RefCell<HashMap<String, PricedModel>>,
}

impl PricingDb {
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn with_overrides(overrides: HashMap<String, ModelCost>) -> Self {
        Self {
            overrides,
            resolved: RefCell::new(HashMap::new()),
        }
    }

    pub fn override_count(&self) -> usize {
        self.overrides.len()
    }

    /// Resolve `model` to the table entry that prices it. Successful
    /// resolutions are memoized per name.
    pub fn resolve(&self, model: &str) -> Result<PricedModel, PricingError> {
        if let Some(cached) = self.resolved.borrow().get(model) {
            return Ok(cached.clone());
        }

        let priced = resolve_pricing(model, &self.overrides).ok_or_else(|| {
            PricingError::UnknownModel {
                model: model.to_string(),
            }
        })?;
        self.resolved
            .borrow_mut()
            .insert(model.to_string(), priced.clone());
        Ok(priced)
    }

    pub fn get(&self, model: &str) -> Result<ModelCost, PricingError> {
        self.resolve(model).map(|priced| priced.cost)
    }

    /// Price one call. Same short-circuit rules as [`super::calculate_cost`].
    pub fn cost(&self, request: &CostRequest<'_>) -> Result<f64, PricingError> {
        cost_with(request, |model| self.get(model))
    }

    /// Every priced name, sorted. Overrides shadow built-in entries of the
    /// same name.
    pub fn entries(&self) -> Vec<PriceEntry> {
        let mut entries: Vec<PriceEntry> = MODEL_COSTS
            .iter()
            .filter(|entry| !self.overrides.contains_key(entry.name))
            .map(|entry| PriceEntry {
                name: entry.name.to_string(),
                cost: entry.cost,
                unit: entry.unit,
                source: PriceSource::Builtin,
            })
            .collect();

        entries.extend(self.overrides.iter().map(|(name, cost)| PriceEntry {
            name: name.clone(),
            cost: *cost,
            unit: if cost.is_completion() {
                UnitKind::Token
            } else {
                UnitKind::Unit
            },
            source: PriceSource::Config,
        }));

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::MatchKind;

    fn custom_db() -> PricingDb {
        let mut overrides = HashMap::new();
        overrides.insert(
            "llama-3-70b".to_string(),
            ModelCost::Completion {
                prompt: 0.6e-6,
                completion: 0.8e-6,
            },
        );
        overrides.insert("gpt-4".to_string(), ModelCost::per_thousand(0.02, 0.04));
        PricingDb::with_overrides(overrides)
    }

    #[test]
    fn builtin_db_matches_free_function() {
        let db = PricingDb::builtin();
        let request = CostRequest::new("gpt-3.5-turbo-0301", 2_000, 1_000);
        let via_db = db.cost(&request).unwrap();
        let direct = crate::pricing::calculate_cost(&request).unwrap();
        assert!((via_db - direct).abs() < 1e-12);
    }

    #[test]
    fn override_prices_unknown_model() {
        let db = custom_db();
        let cost = db.cost(&CostRequest::new("llama-3-70b", 1_000_000, 1_000_000)).unwrap();
        assert!((cost - 1.4).abs() < 1e-9);
    }

    #[test]
    fn override_prefix_applies_to_variants() {
        let db = custom_db();
        let priced = db.resolve("llama-3-70b-instruct").unwrap();
        assert_eq!(priced.name, "llama-3-70b");
        assert_eq!(priced.matched_by, MatchKind::Prefix);
        assert_eq!(priced.source, PriceSource::Config);
    }

    #[test]
    fn override_replaces_builtin_price() {
        let db = custom_db();
        let cost = db.cost(&CostRequest::new("gpt-4", 1_000, 1_000)).unwrap();
        assert!((cost - 0.06).abs() < 1e-9);
    }

    #[test]
    fn resolve_is_memoized() {
        let db = PricingDb::builtin();
        let first = db.resolve("gpt-4-0613").unwrap();
        assert_eq!(db.resolved.borrow().len(), 1);
        let second = db.resolve("gpt-4-0613").unwrap();
        assert_eq!(first, second);
        assert_eq!(db.resolved.borrow().len(), 1);
    }

    #[test]
    fn unknown_model_not_memoized() {
        let db = PricingDb::builtin();
        assert!(db.resolve("bard").is_err());
        assert!(db.resolved.borrow().is_empty());
    }

    #[test]
    fn entries_are_sorted_and_shadowed() {
        let db = custom_db();
        let entries = db.entries();
        assert_eq!(entries.len(), MODEL_COSTS.len() + 1);

        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);

        let gpt4 = entries.iter().find(|e| e.name == "gpt-4").unwrap();
        assert_eq!(gpt4.source, PriceSource::Config);
        assert_eq!(gpt4.unit, UnitKind::Token);
    }
}
