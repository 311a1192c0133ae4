use llmcost::{PriceSource, PricedModel, UnitKind};

use crate::error::AppError;

use super::format::{NumberFormat, ReportTable, Tone, cost_json_value};

/// Priced single call
#[derive(Debug, Clone)]
pub(crate) struct CalcResult {
    pub(crate) model: String,
    pub(crate) input: Option<u64>,
    pub(crate) output: Option<u64>,
    /// None when the model is missing from the pricing table
    pub(crate) priced: Option<PricedModel>,
    pub(crate) cost: f64,
}

fn unit_label(result: &CalcResult) -> &'static str {
    match result.priced.as_ref().map(|p| p.unit) {
        Some(UnitKind::Token) => "tokens",
        Some(UnitKind::Image) => "images",
        Some(UnitKind::Minute) => "minutes",
        Some(UnitKind::Unit) | None => "units",
    }
}

pub(crate) fn print_calc_table(result: &CalcResult, number_format: NumberFormat, use_color: bool) {
    let mut table = ReportTable::new(&["Field", "Value"], use_color);

    let row = vec![
        table.label("Model", Tone::Plain),
        table.label(&result.model, Tone::Plain),
    ];
    table.push(row);

    if let Some(priced) = &result.priced {
        let detail = format!(
            "{} ({} match, {})",
            priced.name,
            priced.matched_by.label(),
            priced.source.label()
        );
        let tone = match priced.source {
            PriceSource::Config => Tone::Override,
            PriceSource::Builtin => Tone::Plain,
        };
        let row = vec![
            table.label("Priced as", Tone::Plain),
            table.label(&detail, tone),
        ];
        table.push(row);
    }

    let count = |n: Option<u64>| n.map_or("-".to_string(), |n| number_format.count(n));
    let row = vec![
        table.label(&format!("Input ({})", unit_label(result)), Tone::Plain),
        table.figure(&count(result.input), Tone::Plain),
    ];
    table.push(row);
    let row = vec![
        table.label("Output", Tone::Plain),
        table.figure(&count(result.output), Tone::Plain),
    ];
    table.push(row);

    let row = vec![
        table.label("Cost", Tone::Total),
        table.cost(result.cost, number_format, Tone::Cost),
    ];
    table.push(row);

    println!("{table}");
}

pub(crate) fn output_calc_json(result: &CalcResult) -> Result<String, AppError> {
    let value = serde_json::json!({
        "model": result.model,
        "input": result.input,
        "output": result.output,
        "priced_as": result.priced.as_ref().map(|p| &p.name),
        "match": result.priced.as_ref().map(|p| p.matched_by),
        "source": result.priced.as_ref().map(|p| p.source),
        "unit": result.priced.as_ref().map(|p| p.unit),
        "cost": cost_json_value(result.cost),
    });
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use llmcost::PricingDb;

    #[test]
    fn calc_json_includes_match_details() {
        let db = PricingDb::builtin();
        let result = CalcResult {
            model: "gpt-4-0613".to_string(),
            input: Some(1_000),
            output: Some(500),
            priced: db.resolve("gpt-4-0613").ok(),
            cost: 0.06,
        };
        let json: serde_json::Value =
            serde_json::from_str(&output_calc_json(&result).unwrap()).unwrap();
        assert_eq!(json["priced_as"], "gpt-4");
        assert_eq!(json["match"], "prefix");
        assert_eq!(json["source"], "builtin");
        assert_eq!(json["unit"], "token");
        assert_eq!(json["input"], 1000);
    }

    #[test]
    fn calc_json_short_circuit_has_null_match() {
        let result = CalcResult {
            model: "mystery".to_string(),
            input: None,
            output: None,
            priced: None,
            cost: 0.0,
        };
        let json: serde_json::Value =
            serde_json::from_str(&output_calc_json(&result).unwrap()).unwrap();
        assert!(json["priced_as"].is_null());
        assert!(json["input"].is_null());
        assert_eq!(json["cost"].as_f64(), Some(0.0));
    }
}
