use llmcost::{ModelCost, PriceEntry, PriceSource, UnitKind};

use crate::error::AppError;

use super::format::{NumberFormat, ReportTable, Tone};

/// Token prices are shown per 1K tokens; image and audio prices per unit.
fn display_scale(unit: UnitKind) -> (f64, &'static str) {
    match unit {
        UnitKind::Token => (1000.0, "1K tokens"),
        UnitKind::Image => (1.0, "image"),
        UnitKind::Minute => (1.0, "minute"),
        UnitKind::Unit => (1.0, "unit"),
    }
}

pub(crate) fn print_models_table(
    entries: &[PriceEntry],
    number_format: NumberFormat,
    use_color: bool,
) {
    let mut table = ReportTable::new(
        &["Model", "Per", "Prompt / Unit", "Completion", "Source"],
        use_color,
    );

    for entry in entries {
        let (scale, per) = display_scale(entry.unit);
        let (prompt, completion) = match entry.cost {
            ModelCost::Completion { prompt, completion } => (
                number_format.price(prompt * scale),
                number_format.price(completion * scale),
            ),
            ModelCost::PerUnit(price) => (number_format.price(price * scale), "-".to_string()),
        };
        let source_tone = match entry.source {
            PriceSource::Config => Tone::Override,
            PriceSource::Builtin => Tone::Plain,
        };
        let row = vec![
            table.label(&entry.name, Tone::Plain),
            table.label(per, Tone::Plain),
            table.figure(&prompt, Tone::Plain),
            table.figure(&completion, Tone::Plain),
            table.label(entry.source.label(), source_tone),
        ];
        table.push(row);
    }

    println!("{table}");
}

/// Prices in JSON are per unit as stored (USD per token, image or minute).
pub(crate) fn output_models_json(entries: &[PriceEntry]) -> Result<String, AppError> {
    let rows: Vec<serde_json::Value> = entries
        .iter()
        .map(|entry| {
            let mut row = serde_json::json!({
                "model": entry.name,
                "unit": entry.unit,
                "source": entry.source,
            });
            match entry.cost {
                ModelCost::Completion { prompt, completion } => {
                    row["prompt"] = serde_json::json!(prompt);
                    row["completion"] = serde_json::json!(completion);
                }
                ModelCost::PerUnit(price) => {
                    row["price"] = serde_json::json!(price);
                }
            }
            row
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}
