//! JSONL usage record parser
//!
//! Accepts flat `{model, input, output}` records as well as records carrying
//! an OpenAI (`prompt_tokens`/`completion_tokens`) or Anthropic-style
//! (`input_tokens`/`output_tokens`) usage object.

use serde::Deserialize;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::utils::debug_enabled;

use super::types::{ParsedFile, UsageRecord};

// ============================================================================
// Internal types for JSONL parsing
// ============================================================================

#[derive(Debug, Deserialize)]
struct LogLine {
    model: Option<String>,
    input: Option<u64>,
    output: Option<u64>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize, Default)]
struct Usage {
    prompt_tokens: Option<u64>,
    completion_tokens: Option<u64>,
    input_tokens: Option<u64>,
    output_tokens: Option<u64>,
}

impl LogLine {
    fn into_record(self) -> Option<UsageRecord> {
        let model = self.model.filter(|m| !m.is_empty())?;
        let usage = self.usage.unwrap_or_default();
        let input = self
            .input
            .or(usage.prompt_tokens)
            .or(usage.input_tokens)
            .unwrap_or(0);
        let output = self
            .output
            .or(usage.completion_tokens)
            .or(usage.output_tokens)
            .unwrap_or(0);
        Some(UsageRecord {
            model,
            input,
            output,
        })
    }
}

// ============================================================================
// Parsing
// ============================================================================

pub(super) fn parse_line(line: &str) -> Result<Option<UsageRecord>, serde_json::Error> {
    let parsed: LogLine = serde_json::from_str(line)?;
    Ok(parsed.into_record())
}

pub(super) fn parse_usage_file(path: &Path) -> ParsedFile {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(err) => {
            if debug_enabled() {
                eprintln!("Failed to open {}: {}", path.display(), err);
            }
            return ParsedFile {
                unreadable: 1,
                ..ParsedFile::default()
            };
        }
    };
    parse_reader(BufReader::new(file), path)
}

fn parse_reader<R: BufRead>(reader: R, path: &Path) -> ParsedFile {
    let mut parsed = ParsedFile::default();
    for (line_no, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                if debug_enabled() {
                    eprintln!(
                        "Failed to read line {} in {}: {}",
                        line_no + 1,
                        path.display(),
                        err
                    );
                }
                parsed.skipped += 1;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_line(&line) {
            Ok(Some(record)) => parsed.records.push(record),
            Ok(None) => {
                if debug_enabled() {
                    eprintln!("No model on line {} in {}", line_no + 1, path.display());
                }
                parsed.skipped += 1;
            }
            Err(err) => {
                if debug_enabled() {
                    eprintln!(
                        "Invalid JSON on line {} in {}: {}",
                        line_no + 1,
                        path.display(),
                        err
                    );
                }
                parsed.skipped += 1;
            }
        }
    }
    parsed
}
