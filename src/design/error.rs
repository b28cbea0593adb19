//! Error types for composition enumeration.
//!
//! Errors fall into three groups: the abstract formula could not be parsed,
//! the element catalog could not be loaded, or a slot constraint refers to a
//! slot the formula does not have. An unreachable oxidation target is not an
//! error; it yields an empty result set.

use thiserror::Error;

use crate::model::formula::ParseFormulaError;

/// Errors that can occur while generating compositions.
#[derive(Debug, Error)]
pub enum Error {
    /// The abstract formula could not be parsed into one or more slots.
    #[error("invalid abstract formula '{formula}'")]
    InvalidFormula {
        /// The formula exactly as supplied.
        formula: String,
        /// Where and why parsing failed.
        source: ParseFormulaError,
    },

    /// Failed to parse an element catalog TOML document.
    #[error("failed to parse element catalog: {0}")]
    CatalogParse(#[from] toml::de::Error),

    /// The element catalog parsed but its contents are inconsistent.
    #[error("invalid element catalog entry '{symbol}': {detail}")]
    InvalidCatalog {
        /// The catalog key that failed validation.
        symbol: String,
        /// Description of the problem.
        detail: String,
    },

    /// A constraint names a slot that does not occur in the formula.
    #[error("constraint refers to slot '{0}', which does not occur in the formula")]
    UnknownSlot(String),
}

impl Error {
    /// Creates an [`InvalidFormula`](Error::InvalidFormula) error.
    pub fn invalid_formula(formula: impl Into<String>, source: ParseFormulaError) -> Self {
        Self::InvalidFormula {
            formula: formula.into(),
            source,
        }
    }

    /// Creates an [`InvalidCatalog`](Error::InvalidCatalog) error.
    ///
    /// # Arguments
    ///
    /// * `symbol` — Catalog key of the offending entry
    /// * `details` — Description of the problem
    pub fn invalid_catalog(symbol: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidCatalog {
            symbol: symbol.into(),
            detail: details.into(),
        }
    }
}
