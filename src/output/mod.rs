mod batch;
mod calc;
mod format;
mod models;

pub(crate) use batch::{BatchTableOptions, output_batch_json, print_batch_table};
pub(crate) use calc::{CalcResult, output_calc_json, print_calc_table};
pub(crate) use format::NumberFormat;
pub(crate) use models::{output_models_json, print_models_table};
