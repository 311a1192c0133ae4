use std::path::PathBuf;

use llmcost::PricingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("{0}")]
    Pricing(#[from] PricingError),

    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unsupported locale: {input}")]
    UnsupportedLocale { input: String },

    #[error("Invalid file pattern \"{pattern}\": {source}")]
    InvalidPattern {
        pattern: String,
        source: glob::PatternError,
    },

    #[error("No usage files matched: {patterns}")]
    NoInputFiles { patterns: String },

    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}
