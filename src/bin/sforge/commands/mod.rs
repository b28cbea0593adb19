mod catalog;
mod generate;

use catalog::run_catalog;
use generate::run_generate;

use anyhow::Result;

use crate::cli::Command;
use crate::display::Context;

pub fn dispatch(command: Command, ctx: Context) -> Result<()> {
    match command {
        Command::Generate(args) => run_generate(args, ctx),
        Command::Catalog(args) => run_catalog(args, ctx),
    }
}
