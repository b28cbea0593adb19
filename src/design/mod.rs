mod catalog;
mod config;
mod constraint;
mod error;
mod search;

pub use catalog::{ElementCatalog, OxidationStates, default_catalog, load_catalog};
pub use config::DesignConfig;
pub use constraint::{ChargeSign, Constraints, SlotConstraint};
pub use error::Error;
pub use search::{SearchOptions, SearchStats, enumerate, enumerate_with_stats};

use std::collections::HashSet;

use crate::model::composition::Composition;
use crate::model::formula::AbstractFormula;

/// Generates every concrete composition of an abstract formula whose total
/// oxidation state can equal `config.total_oxidation_state`.
pub fn generate_compositions_by_oxidation(
    formula: &str,
    config: &DesignConfig,
) -> Result<HashSet<Composition>, Error> {
    generate_with_stats(formula, config).map(|(compositions, _)| compositions)
}

/// Like [`generate_compositions_by_oxidation`], also returning search counters.
pub fn generate_with_stats(
    formula: &str,
    config: &DesignConfig,
) -> Result<(HashSet<Composition>, SearchStats), Error> {
    let abstract_formula: AbstractFormula = formula
        .parse()
        .map_err(|e| Error::invalid_formula(formula, e))?;

    generate_for_formula(&abstract_formula, config)
}

/// Runs the checked enumeration on an already parsed formula.
///
/// Fails with [`Error::UnknownSlot`] when a constraint names a slot the
/// formula lacks, or with a catalog error when `config.catalog` is invalid.
pub fn generate_for_formula(
    formula: &AbstractFormula,
    config: &DesignConfig,
) -> Result<(HashSet<Composition>, SearchStats), Error> {
    if let Some(label) = config
        .constraints
        .labels()
        .find(|label| formula.slot(label).is_none())
    {
        return Err(Error::UnknownSlot(label.to_string()));
    }

    let catalog = load_catalog(config.catalog.as_deref())?;

    Ok(enumerate_with_stats(formula, &catalog, &config.search_options()))
}
