//! Built-in OpenAI pricing table.
//!
//! Completion prices are stored per token; the source figures are USD per
//! 1K tokens. Image sizes are priced per generated image, audio per minute.

use super::types::{ModelCost, UnitKind};

#[derive(Debug, Clone, Copy)]
pub(super) struct TableEntry {
    pub(super) name: &'static str,
    pub(super) cost: ModelCost,
    pub(super) unit: UnitKind,
}

const fn completion(name: &'static str, prompt_per_1k: f64, completion_per_1k: f64) -> TableEntry {
    TableEntry {
        name,
        cost: ModelCost::per_thousand(prompt_per_1k, completion_per_1k),
        unit: UnitKind::Token,
    }
}

const fn flat(name: &'static str, price: f64, unit: UnitKind) -> TableEntry {
    TableEntry {
        name,
        cost: ModelCost::PerUnit(price),
        unit,
    }
}

pub(super) const MODEL_COSTS: &[TableEntry] = &[
    completion("gpt-4-1106-preview", 0.01, 0.03),
    completion("gpt-4-1106-vision-preview", 0.01, 0.03),
    completion("gpt-3.5-turbo-1106", 0.001, 0.002),
    completion("ft:gpt-3.5-turbo", 0.003, 0.006),
    completion("gpt-3.5-turbo", 0.0015, 0.002),
    completion("gpt-3.5-turbo-16k", 0.001, 0.002),
    completion("gpt-4", 0.03, 0.06),
    completion("gpt-4-32k", 0.06, 0.12),
    // Embeddings
    flat("text-embedding-ada-002", 0.0001 / 1000.0, UnitKind::Token),
    flat("text-embedding-ada-002-v2", 0.0001 / 1000.0, UnitKind::Token),
    // DALL-E image sizes
    flat("1024x1024", 0.02, UnitKind::Image),
    flat("512x512", 0.018, UnitKind::Image),
    flat("256x256", 0.016, UnitKind::Image),
    // Audio
    flat("whisper-1", 0.006, UnitKind::Minute),
    flat("whisper-2", 0.006, UnitKind::Minute),
];

/// Prefix → table key, checked in order. Longer prefixes of the same family
/// must come before shorter ones.
pub(super) const PREFIX_FALLBACKS: &[(&str, &str)] = &[
    ("gpt-3.5-turbo-16k", "gpt-3.5-turbo-16k"),
    ("gpt-3.5-turbo-1106", "gpt-3.5-turbo-1106"),
    ("gpt-3.5-turbo", "gpt-3.5-turbo"),
    ("ft:gpt-3.5-turbo", "ft:gpt-3.5-turbo"),
    ("gpt-4-32k", "gpt-4-32k"),
    ("gpt-4-1106", "gpt-4-1106-preview"),
    ("gpt-4", "gpt-4"),
];

pub(super) fn lookup(name: &str) -> Option<&'static TableEntry> {
    MODEL_COSTS.iter().find(|entry| entry.name == name)
}
