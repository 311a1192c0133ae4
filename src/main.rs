mod app;
mod cli;
mod config;
mod error;
mod output;
mod usage;
mod utils;

use clap::Parser;
use llmcost::PricingDb;

use app::{CommandContext, handle_command};
use cli::Cli;
use config::Config;
use error::AppError;
use output::NumberFormat;
use utils::set_debug;

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let loaded = Config::load(cli.config.as_deref())?;
    let cli = cli.with_config(&loaded.config);
    set_debug(cli.debug);
    // Decided after the merge so `json = true` in the config silences stderr too
    loaded.report(cli.quiet());
    let config = loaded.config;

    let number_format = NumberFormat::from_locale(cli.locale.as_deref())?;
    let pricing_db = PricingDb::with_overrides(config.prices);
    if cli.debug && pricing_db.override_count() > 0 {
        eprintln!("Using {} price overrides from config", pricing_db.override_count());
    }

    let ctx = CommandContext {
        cli: &cli,
        pricing_db: &pricing_db,
        number_format,
    };
    handle_command(&ctx)
}
