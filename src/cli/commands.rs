//! CLI subcommand definitions

use clap::Subcommand;

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Price a single API call
    Calc {
        /// Model identifier (exact name or a variant of a known family, e.g. gpt-4-0613)
        model: String,
        /// Input units: prompt tokens, images, or audio minutes
        #[arg(short, long)]
        input: Option<u64>,
        /// Output (completion) tokens
        #[arg(short, long)]
        output: Option<u64>,
    },
    /// List the pricing table
    Models,
    /// Total the cost of JSONL usage records per model
    Batch {
        /// Files or glob patterns (e.g. "logs/**/*.jsonl")
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<String>,
    },
}
