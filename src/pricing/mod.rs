mod db;
mod error;
mod resolver;
mod table;
mod types;

pub use db::PricingDb;
pub use error::PricingError;
pub use resolver::{calculate_cost, get_model_cost};
pub use types::{CostRequest, MatchKind, ModelCost, PriceEntry, PriceSource, PricedModel, UnitKind};
