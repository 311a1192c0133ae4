use crate::error::AppError;
use crate::usage::{ModelCostRow, UsageReport};

use super::format::{NumberFormat, ReportTable, Tone, cost_json_value};

#[derive(Debug, Clone, Copy)]
pub(crate) struct BatchTableOptions {
    pub(crate) use_color: bool,
    pub(crate) number_format: NumberFormat,
    pub(crate) files: usize,
    pub(crate) unreadable_files: usize,
    pub(crate) skipped: usize,
    pub(crate) elapsed_ms: f64,
}

pub(crate) fn print_batch_table(report: &UsageReport, options: BatchTableOptions) {
    let BatchTableOptions {
        use_color,
        number_format: fmt,
        ..
    } = options;

    let mut table = ReportTable::new(
        &["Model", "Priced as", "Calls", "Input", "Output", "Cost"],
        use_color,
    );

    for row in &report.rows {
        let cells = vec![
            table.label(&row.model, Tone::Plain),
            table.label(row.priced_as.as_deref().unwrap_or("-"), Tone::Plain),
            table.figure(&fmt.count(row.calls), Tone::Plain),
            table.figure(&fmt.count(row.input), Tone::Plain),
            table.figure(&fmt.count(row.output), Tone::Plain),
            table.cost(row.cost, fmt, Tone::Cost),
        ];
        table.push(cells);
    }

    let totals = vec![
        table.label("TOTAL", Tone::Total),
        table.label("", Tone::Plain),
        table.figure(&fmt.count(report.calls), Tone::Total),
        table.figure(&fmt.count(report.input), Tone::Total),
        table.figure(&fmt.count(report.output), Tone::Total),
        table.cost(report.total_cost, fmt, Tone::Total),
    ];
    table.push(totals);

    println!("{table}");
    println!("\n  {}", summary_line(report, &options));
    if report.unpriced_models > 0 {
        println!(
            "  {} model(s) missing from the pricing table are excluded from the total\n",
            report.unpriced_models
        );
    } else {
        println!();
    }
}

fn summary_line(report: &UsageReport, options: &BatchTableOptions) -> String {
    let fmt = options.number_format;
    let mut line = format!(
        "{} calls from {} files ({} lines skipped",
        fmt.count(report.calls),
        fmt.count(options.files as u64),
        fmt.count(options.skipped as u64)
    );
    if options.unreadable_files > 0 {
        line.push_str(&format!(
            ", {} files unreadable",
            fmt.count(options.unreadable_files as u64)
        ));
    }
    line.push(')');
    if options.use_color {
        format!("{line} | \x1b[36m{:.0}ms\x1b[0m", options.elapsed_ms)
    } else {
        format!("{line} | {:.0}ms", options.elapsed_ms)
    }
}

fn model_json(row: &ModelCostRow) -> serde_json::Value {
    serde_json::json!({
        "model": row.model,
        "priced_as": row.priced_as,
        "calls": row.calls,
        "input": row.input,
        "output": row.output,
        "cost": cost_json_value(row.cost),
    })
}

pub(crate) fn output_batch_json(report: &UsageReport) -> Result<String, AppError> {
    let models: Vec<serde_json::Value> = report.rows.iter().map(model_json).collect();

    let value = serde_json::json!({
        "models": models,
        "calls": report.calls,
        "input": report.input,
        "output": report.output,
        "total_cost": report.total_cost,
        "unpriced_models": report.unpriced_models,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
