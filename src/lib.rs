//! Cost calculation for language-model API calls.
//!
//! The pricing table is static; [`calculate_cost`] looks a model up by exact
//! name or known prefix and multiplies the unit counts by its price.

pub mod pricing;

pub use pricing::{
    CostRequest, MatchKind, ModelCost, PriceEntry, PriceSource, PricedModel, PricingDb,
    PricingError, UnitKind, calculate_cost, get_model_cost,
};
