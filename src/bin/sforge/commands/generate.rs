use std::collections::BTreeSet;
use std::io::Write;

use anyhow::{Context, Result};

use stoich_forge::{AbstractFormula, Composition, DesignError, generate_for_formula};

use crate::cli::GenerateArgs;
use crate::config::build_design_config;
use crate::display::{Context as DisplayContext, Progress, print_search_summary};
use crate::io::{create_output, read_catalog};

const TOTAL_STEPS: u8 = 3;

pub fn run_generate(args: GenerateArgs, ctx: DisplayContext) -> Result<()> {
    let formula: AbstractFormula = args
        .formula
        .parse()
        .map_err(|e| DesignError::invalid_formula(&args.formula, e))?;

    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Loading element catalog");
    let catalog = read_catalog(args.catalog.catalog.as_deref())?;
    let catalog_detail = match &args.catalog.catalog {
        Some(path) => format!("Custom catalog: {}", path.display()),
        None => "Built-in oxidation-state catalog".to_string(),
    };
    let config = build_design_config(&args.oxidation, &args.constraints, catalog)?;
    progress.complete_step("Loading element catalog", &[catalog_detail]);

    progress.step("Enumerating compositions");
    let (compositions, stats) =
        generate_for_formula(&formula, &config).context("Enumeration failed")?;

    let formulas = reduced_formulas(&compositions);
    progress.complete_step(
        "Enumerating compositions",
        &[
            format!("{} compositions", compositions.len()),
            format!("{} distinct reduced formulas", formulas.len()),
        ],
    );

    if ctx.interactive {
        print_search_summary(&formula, &config, &stats, formulas.len());
    }

    progress.step("Writing output");
    let mut out = create_output(args.io.output.as_deref())?;
    write_formulas(&mut out, &formulas).context("Failed to write output")?;
    out.flush().context("Failed to flush output")?;

    let destination = match &args.io.output {
        Some(path) => path.display().to_string(),
        None => "stdout".to_string(),
    };
    progress.complete_step("Writing output", &[format!("Written to {}", destination)]);

    progress.finish("Enumeration complete");

    Ok(())
}

/// Distinct reduced formulas in sorted order.
fn reduced_formulas<'a>(compositions: impl IntoIterator<Item = &'a Composition>) -> BTreeSet<String> {
    compositions
        .into_iter()
        .map(Composition::reduced_formula)
        .collect()
}

fn write_formulas(out: &mut impl Write, formulas: &BTreeSet<String>) -> std::io::Result<()> {
    for formula in formulas {
        writeln!(out, "{}", formula)?;
    }
    Ok(())
}
