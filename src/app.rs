use llmcost::{CostRequest, PricingDb};

use crate::cli::{Cli, Commands};
use crate::error::AppError;
use crate::output::{
    BatchTableOptions, CalcResult, NumberFormat, output_batch_json, output_calc_json,
    output_models_json, print_batch_table, print_calc_table, print_models_table,
};
use crate::usage::{load_usage, summarize};

pub(crate) struct CommandContext<'a> {
    pub(crate) cli: &'a Cli,
    pub(crate) pricing_db: &'a PricingDb,
    pub(crate) number_format: NumberFormat,
}

fn handle_calc(
    model: &str,
    input: Option<u64>,
    output: Option<u64>,
    ctx: &CommandContext<'_>,
) -> Result<(), AppError> {
    let request = CostRequest {
        model: Some(model),
        input,
        output,
    };
    let cost = ctx.pricing_db.cost(&request)?;
    let priced = match ctx.pricing_db.resolve(model) {
        Ok(priced) => Some(priced),
        // Zero counts skip the lookup; strict mode still rejects unknown names
        Err(err) if ctx.cli.strict => return Err(err.into()),
        Err(_) => None,
    };

    let result = CalcResult {
        model: model.to_string(),
        input,
        output,
        priced,
        cost,
    };
    if ctx.cli.json {
        println!("{}", output_calc_json(&result)?);
    } else {
        print_calc_table(&result, ctx.number_format, ctx.cli.use_color());
    }
    Ok(())
}

fn handle_models(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let entries = ctx.pricing_db.entries();
    if ctx.cli.json {
        println!("{}", output_models_json(&entries)?);
    } else {
        print_models_table(&entries, ctx.number_format, ctx.cli.use_color());
    }
    Ok(())
}

fn handle_batch(paths: &[String], ctx: &CommandContext<'_>) -> Result<(), AppError> {
    let loaded = load_usage(paths, ctx.cli.quiet())?;
    let report = summarize(&loaded.records, ctx.pricing_db, ctx.cli.strict)?;

    if ctx.cli.json {
        println!("{}", output_batch_json(&report)?);
    } else {
        print_batch_table(
            &report,
            BatchTableOptions {
                use_color: ctx.cli.use_color(),
                number_format: ctx.number_format,
                files: loaded.files,
                unreadable_files: loaded.unreadable_files,
                skipped: loaded.skipped,
                elapsed_ms: loaded.elapsed_ms,
            },
        );
    }
    Ok(())
}

pub(crate) fn handle_command(ctx: &CommandContext<'_>) -> Result<(), AppError> {
    match &ctx.cli.command {
        Commands::Calc {
            model,
            input,
            output,
        } => handle_calc(model, *input, *output, ctx),
        Commands::Models => handle_models(ctx),
        Commands::Batch { paths } => handle_batch(paths, ctx),
    }
}
