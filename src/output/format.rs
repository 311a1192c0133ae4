use std::fmt;

use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

use crate::error::AppError;

/// Decimal places beyond which tiny amounts are shown as zero anyway
const MAX_DECIMALS: usize = 12;

/// Locale-dependent separators for counts and dollar amounts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NumberFormat {
    group_sep: char,
    decimal_sep: char,
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat {
            group_sep: ',',
            decimal_sep: '.',
        }
    }
}

impl NumberFormat {
    pub(crate) fn from_locale(locale: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = locale.map(str::trim).filter(|l| !l.is_empty()) else {
            return Ok(NumberFormat::default());
        };
        let language = raw
            .split(['-', '_'])
            .next()
            .unwrap_or(raw)
            .to_ascii_lowercase();

        match language.as_str() {
            "en" | "zh" => Ok(NumberFormat::default()),
            "de" => Ok(NumberFormat {
                group_sep: '.',
                decimal_sep: ',',
            }),
            "fr" | "ru" => Ok(NumberFormat {
                group_sep: ' ',
                decimal_sep: ',',
            }),
            _ => Err(AppError::UnsupportedLocale {
                input: raw.to_string(),
            }),
        }
    }

    /// Token, call or file count with digit grouping
    pub(super) fn count(self, n: u64) -> String {
        let digits = n.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(self.group_sep);
            }
            grouped.push(c);
        }
        grouped
    }

    /// Dollar amount of a call or a total. Cents for anything from one cent
    /// up; smaller amounts keep two significant digits.
    pub(super) fn cost(self, cost: f64) -> String {
        if cost.is_nan() {
            return "N/A".to_string();
        }
        let decimals = if cost.abs() >= 0.01 {
            2
        } else {
            significant_decimals(cost, 6)
        };
        self.dollars(cost, decimals)
    }

    /// Unit price. Per-token prices can be far below a hundredth of a cent,
    /// so precision grows until two significant digits are visible.
    pub(super) fn price(self, price: f64) -> String {
        self.dollars(price, significant_decimals(price, 4))
    }

    fn dollars(self, amount: f64, decimals: usize) -> String {
        let s = format!("{amount:.decimals$}");
        if self.decimal_sep == '.' {
            format!("${s}")
        } else {
            format!("${}", s.replace('.', &self.decimal_sep.to_string()))
        }
    }
}

/// Decimals needed to show two significant digits of `value`, at least `min`.
fn significant_decimals(value: f64, min: usize) -> usize {
    let magnitude = value.abs();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return min;
    }
    let leading_zeros = (-magnitude.log10()).floor();
    if leading_zeros < 0.0 {
        return min;
    }
    (leading_zeros as usize + 2).clamp(min, MAX_DECIMALS)
}

/// Cost as a JSON number, or `null` when the model could not be priced.
pub(super) fn cost_json_value(cost: f64) -> serde_json::Value {
    if cost.is_nan() {
        serde_json::Value::Null
    } else {
        serde_json::json!(cost)
    }
}

/// What a cell shows, which decides its color and weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Tone {
    Plain,
    /// Dollar amount that was priced
    Cost,
    /// Model missing from the pricing table
    Unpriced,
    /// Price coming from the user's config
    Override,
    Total,
}

impl Tone {
    fn color(self) -> Option<Color> {
        match self {
            Tone::Plain => None,
            Tone::Cost => Some(Color::Green),
            Tone::Unpriced => Some(Color::Red),
            Tone::Override | Tone::Total => Some(Color::Yellow),
        }
    }

    fn bold(self) -> bool {
        self == Tone::Total
    }
}

/// Bordered report table shared by every command's table output.
pub(super) struct ReportTable {
    table: Table,
    use_color: bool,
}

impl ReportTable {
    pub(super) fn new(headers: &[&str], use_color: bool) -> Self {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_SOLID_INNER_BORDERS)
            .set_content_arrangement(ContentArrangement::Dynamic);
        // Single-line rule under the header instead of the preset's double line
        table.set_style(TableComponent::HeaderLines, '─');
        table.set_style(TableComponent::LeftHeaderIntersection, '├');
        table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
        table.set_style(TableComponent::RightHeaderIntersection, '┤');

        table.set_header(headers.iter().map(|h| {
            let cell = Cell::new(h).add_attribute(Attribute::Bold);
            if use_color { cell.fg(Color::Cyan) } else { cell }
        }));
        Self { table, use_color }
    }

    /// Left-aligned text such as a model name
    pub(super) fn label(&self, text: &str, tone: Tone) -> Cell {
        self.toned(Cell::new(text), tone)
    }

    /// Right-aligned figure such as a count or a price
    pub(super) fn figure(&self, text: &str, tone: Tone) -> Cell {
        self.toned(Cell::new(text).set_alignment(CellAlignment::Right), tone)
    }

    /// Right-aligned dollar amount; unpriced (NaN) costs show as N/A in red.
    pub(super) fn cost(&self, cost: f64, format: NumberFormat, tone: Tone) -> Cell {
        let tone = if cost.is_nan() { Tone::Unpriced } else { tone };
        self.figure(&format.cost(cost), tone)
    }

    pub(super) fn push(&mut self, cells: Vec<Cell>) {
        self.table.add_row(cells);
    }

    fn toned(&self, mut cell: Cell, tone: Tone) -> Cell {
        if self.use_color
            && let Some(color) = tone.color()
        {
            cell = cell.fg(color);
        }
        if tone.bold() {
            cell = cell.add_attribute(Attribute::Bold);
        }
        cell
    }
}

impl fmt::Display for ReportTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.table)
    }
}
