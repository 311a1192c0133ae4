use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::error::AppError;

use super::parser::parse_usage_file;
use super::types::{LoadResult, ParsedFile};

/// Expand paths and glob patterns into a sorted, de-duplicated file list.
fn find_files(patterns: &[String]) -> Result<Vec<PathBuf>, AppError> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }

        let entries = glob::glob(pattern).map_err(|source| AppError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        files.extend(entries.flatten().filter(|p| p.is_file()));
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Find and parse usage files in parallel.
pub(crate) fn load_usage(patterns: &[String], quiet: bool) -> Result<LoadResult, AppError> {
    let start = Instant::now();
    let files = find_files(patterns)?;
    if files.is_empty() {
        return Err(AppError::NoInputFiles {
            patterns: patterns.join(", "),
        });
    }

    if !quiet {
        eprintln!(
            "Scanning {} usage files... ({:.2}ms)",
            files.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
    }

    let parsed = files
        .par_iter()
        .map(|path| parse_usage_file(path))
        .reduce(ParsedFile::default, ParsedFile::merge);

    if parsed.unreadable > 0 && !quiet {
        eprintln!(
            "Warning: {} of {} usage files could not be opened",
            parsed.unreadable,
            files.len()
        );
    }

    Ok(LoadResult {
        records: parsed.records,
        skipped: parsed.skipped,
        files: files.len(),
        unreadable_files: parsed.unreadable,
        elapsed_ms: start.elapsed().as_secs_f64() * 1000.0,
    })
}
