use std::io::Write;

use anyhow::{Context, Result};

use stoich_forge::{ElementCatalog, load_catalog};

use crate::cli::CatalogArgs;
use crate::display::{Context as DisplayContext, Progress, print_catalog_summary};
use crate::io::{create_output, read_catalog};
use crate::util::text::join_signed;

const TOTAL_STEPS: u8 = 2;

pub fn run_catalog(args: CatalogArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, TOTAL_STEPS);

    progress.step("Loading element catalog");
    let source = read_catalog(args.catalog.catalog.as_deref())?;
    let catalog = load_catalog(source.as_deref()).context("Failed to load element catalog")?;
    progress.complete_step(
        "Loading element catalog",
        &[format!("{} elements", catalog.len())],
    );

    if ctx.interactive {
        print_catalog_summary(&catalog);
    }

    progress.step("Writing output");
    let mut out = create_output(args.io.output.as_deref())?;
    write_catalog(&mut out, &catalog).context("Failed to write output")?;
    out.flush().context("Failed to flush output")?;
    progress.complete_step("Writing output", &[]);

    progress.finish("Catalog listed");

    Ok(())
}

fn write_catalog(out: &mut impl Write, catalog: &ElementCatalog) -> std::io::Result<()> {
    writeln!(out, "{:<4} {:<32} common", "el", "all")?;
    for (element, states) in catalog.entries() {
        writeln!(
            out,
            "{:<4} {:<32} {}",
            element.symbol(),
            join_signed(&states.all, ","),
            join_signed(&states.common, ",")
        )?;
    }
    Ok(())
}
