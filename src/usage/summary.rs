use std::collections::HashMap;

use llmcost::{CostRequest, PricingDb};

use crate::error::AppError;
use crate::utils::debug_enabled;

use super::types::UsageRecord;

/// Per-model totals. `cost` is NaN when the model could not be priced.
#[derive(Debug, Clone)]
pub(crate) struct ModelCostRow {
    pub(crate) model: String,
    /// Pricing entry the model resolved to, if any
    pub(crate) priced_as: Option<String>,
    pub(crate) calls: u64,
    pub(crate) input: u64,
    pub(crate) output: u64,
    pub(crate) cost: f64,
}

impl ModelCostRow {
    fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
            priced_as: None,
            calls: 0,
            input: 0,
            output: 0,
            cost: 0.0,
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct UsageReport {
    pub(crate) rows: Vec<ModelCostRow>,
    pub(crate) calls: u64,
    pub(crate) input: u64,
    pub(crate) output: u64,
    /// Sum over priced models only
    pub(crate) total_cost: f64,
    pub(crate) unpriced_models: usize,
}

/// Price each record and aggregate per model.
///
/// Calls are priced one at a time, so zero-count short-circuits apply per
/// call rather than to the aggregate. In strict mode the first unknown model
/// aborts the summary.
pub(crate) fn summarize(
    records: &[UsageRecord],
    db: &PricingDb,
    strict: bool,
) -> Result<UsageReport, AppError> {
    let mut by_model: HashMap<&str, ModelCostRow> = HashMap::new();

    for record in records {
        let row = by_model
            .entry(record.model.as_str())
            .or_insert_with(|| ModelCostRow::new(&record.model));
        // Counts come from untrusted logs; clamp instead of wrapping
        row.calls = row.calls.saturating_add(1);
        row.input = row.input.saturating_add(record.input);
        row.output = row.output.saturating_add(record.output);

        let request = CostRequest::new(&record.model, record.input, record.output);
        match db.cost(&request) {
            Ok(cost) => row.cost += cost,
            Err(err) if strict => return Err(err.into()),
            Err(err) => {
                if debug_enabled() && !row.cost.is_nan() {
                    eprintln!("{err}");
                }
                row.cost = f64::NAN;
            }
        }
    }

    let mut rows: Vec<ModelCostRow> = by_model
        .into_values()
        .map(|mut row| {
            row.priced_as = db.resolve(&row.model).ok().map(|priced| priced.name);
            row
        })
        .collect();
    rows.sort_by(|a, b| a.model.cmp(&b.model));

    let saturating_total =
        |count: fn(&ModelCostRow) -> u64| rows.iter().map(count).fold(0u64, u64::saturating_add);

    let report = UsageReport {
        calls: saturating_total(|r| r.calls),
        input: saturating_total(|r| r.input),
        output: saturating_total(|r| r.output),
        total_cost: rows.iter().map(|r| r.cost).filter(|c| !c.is_nan()).sum(),
        unpriced_models: rows.iter().filter(|r| r.cost.is_nan()).count(),
        rows,
    };
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(model: &str, input: u64, output: u64) -> UsageRecord {
        UsageRecord {
            model: model.to_string(),
            input,
            output,
        }
    }

    #[test]
    fn aggregates_per_model() {
        let records = vec![
            record("gpt-4", 1_000, 500),
            record("gpt-4-0613", 1_000, 500),
            record("text-embedding-ada-002", 10_000, 1),
            record("text-embedding-ada-002", 10_000, 0),
            record("gpt-4", 1_000, 500),
        ];
        let report = summarize(&records, &PricingDb::builtin(), true).unwrap();

        assert_eq!(report.calls, 5);
        assert_eq!(report.rows.len(), 3);
        assert_eq!(report.unpriced_models, 0);

        let gpt4 = &report.rows[0];
        assert_eq!(gpt4.model, "gpt-4");
        assert_eq!(gpt4.calls, 2);
        assert_eq!(gpt4.input, 2_000);
        assert!((gpt4.cost - 0.12).abs() < 1e-9);

        let variant = &report.rows[1];
        assert_eq!(variant.priced_as.as_deref(), Some("gpt-4"));

        // The embedding call without an output count is free
        let embedding = &report.rows[2];
        assert_eq!(embedding.calls, 2);
        assert!((embedding.cost - 0.001).abs() < 1e-12);

        assert!((report.total_cost - 0.181).abs() < 1e-9);
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let half = u64::MAX / 2 + 1;
        let records = vec![record("gpt-4", half, half), record("gpt-4", half, half)];
        let report = summarize(&records, &PricingDb::builtin(), true).unwrap();

        assert_eq!(report.rows[0].input, u64::MAX);
        assert_eq!(report.rows[0].output, u64::MAX);
        assert_eq!(report.input, u64::MAX);
        assert_eq!(report.output, u64::MAX);
        assert!(report.total_cost.is_finite());
    }

    #[test]
    fn report_totals_saturate_across_models() {
        let records = vec![
            record("gpt-4", u64::MAX, 1),
            record("gpt-3.5-turbo", u64::MAX, 1),
        ];
        let report = summarize(&records, &PricingDb::builtin(), true).unwrap();
        assert_eq!(report.input, u64::MAX);
        assert_eq!(report.output, 2);
    }

    #[test]
    fn zero_output_call_is_free_for_completion_models() {
        let records = vec![record("gpt-4", 1_000, 0), record("gpt-4", 1_000, 1_000)];
        let report = summarize(&records, &PricingDb::builtin(), false).unwrap();
        assert!((report.rows[0].cost - 0.09).abs() < 1e-9);
    }

    #[test]
    fn unknown_model_is_nan_when_lenient() {
        let records = vec![record("gpt-4", 1_000, 500), record("claude-2", 100, 100)];
        let report = summarize(&records, &PricingDb::builtin(), false).unwrap();

        let claude = report.rows.iter().find(|r| r.model == "claude-2").unwrap();
        assert!(claude.cost.is_nan());
        assert!(claude.priced_as.is_none());
        assert_eq!(report.unpriced_models, 1);
        assert!((report.total_cost - 0.06).abs() < 1e-9);
    }

    #[test]
    fn unknown_model_fails_when_strict() {
        let records = vec![record("claude-2", 100, 100)];
        let err = summarize(&records, &PricingDb::builtin(), true).unwrap_err();
        assert_eq!(err.to_string(), "Cost for model claude-2 not found");
    }
}
