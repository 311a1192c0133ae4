//! Batch costing of JSONL usage logs

mod loader;
mod parser;
mod summary;
mod types;

pub(crate) use loader::load_usage;
pub(crate) use summary::{ModelCostRow, UsageReport, summarize};
