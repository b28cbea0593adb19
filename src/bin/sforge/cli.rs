use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use stoich_forge::Element;

#[derive(Parser)]
#[command(
    name = "sforge",
    about = "Charge-balanced composition enumeration",
    version,
    author,
    before_help = crate::display::banner_for_help(),
    propagate_version = true
)]
pub struct Cli {
    /// Log search diagnostics to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Enumerate concrete compositions of an abstract formula
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Show the oxidation states known for each element
    #[command(visible_alias = "c")]
    Catalog(CatalogArgs),
}

/// Output options shared by all commands.
#[derive(Args)]
pub struct IoOptions {
    /// Output file (stdout if omitted)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Suppress progress output (for scripting)
    #[arg(short, long)]
    pub quiet: bool,
}

/// Element data options shared by all commands.
#[derive(Args)]
#[command(next_help_heading = "Element Data")]
pub struct CatalogOptions {
    /// Custom oxidation-state catalog (TOML file)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,
}

#[derive(Args)]
#[command(next_help_heading = "Oxidation States")]
pub struct OxidationOptions {
    /// Required total oxidation state of the composition
    #[arg(
        short = 't',
        long = "total-oxidation",
        value_name = "N",
        default_value = "0",
        allow_hyphen_values = true
    )]
    pub total: i32,

    /// Consider every known oxidation state, not only the common ones
    #[arg(long = "all-states")]
    pub all_states: bool,
}

#[derive(Args)]
#[command(next_help_heading = "Slot Constraints")]
pub struct ConstraintOptions {
    /// Restrict a slot to the listed elements (SLOT:El,El,...), repeatable
    #[arg(long, value_name = "SLOT:ELEMENTS", action = ArgAction::Append)]
    pub allow: Vec<AllowSpec>,

    /// Require a slot to take a positive oxidation state, repeatable
    #[arg(long, value_name = "SLOT", action = ArgAction::Append)]
    pub cation: Vec<String>,

    /// Require a slot to take a negative oxidation state, repeatable
    #[arg(long, value_name = "SLOT", action = ArgAction::Append)]
    pub anion: Vec<String>,
}

#[derive(Args)]
pub struct GenerateArgs {
    /// Abstract formula, e.g. AX2, ABC3 or (AB)2X
    #[arg(value_name = "FORMULA")]
    pub formula: String,

    #[command(flatten)]
    pub io: IoOptions,

    #[command(flatten)]
    pub oxidation: OxidationOptions,

    #[command(flatten)]
    pub constraints: ConstraintOptions,

    #[command(flatten)]
    pub catalog: CatalogOptions,
}

#[derive(Args)]
pub struct CatalogArgs {
    #[command(flatten)]
    pub io: IoOptions,

    #[command(flatten)]
    pub catalog: CatalogOptions,
}

/// Allow list for one slot, written `SLOT:El,El,...`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllowSpec {
    pub slot: String,
    pub elements: Vec<Element>,
}

impl std::str::FromStr for AllowSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (slot, list) = s
            .split_once(':')
            .ok_or_else(|| format!("expected SLOT:El,El,... but got '{}'", s))?;

        let slot = slot.trim();
        if slot.is_empty() {
            return Err(format!("missing slot label in '{}'", s));
        }

        let elements = list
            .split(',')
            .map(str::trim)
            .filter(|sym| !sym.is_empty())
            .map(|sym| sym.parse::<Element>().map_err(|e| e.to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        if elements.is_empty() {
            return Err(format!("no elements listed for slot '{}'", slot));
        }

        Ok(Self {
            slot: slot.to_string(),
            elements,
        })
    }
}

pub fn parse() -> Cli {
    Cli::parse()
}
