//! Combinatorial generation of charge-balanced compositions.
//!
//! Given an abstract formula such as `AX2` or `ABC3`, `stoich-forge` assigns a
//! concrete element to every placeholder slot and keeps the assignments whose
//! total oxidation state can match a requested value, using each element's
//! known oxidation states.
//!
//! # Features
//!
//! - **Recursive enumeration** — Slots are filled one at a time; branches that
//!   can no longer reach the target oxidation state are pruned early
//! - **Common or full oxidation states** — Choose between each element's
//!   chemically typical states and every reported state
//! - **Slot constraints** — Restrict a slot to listed elements or to cationic,
//!   anionic or neutral states
//! - **Replaceable element data** — The embedded oxidation-state catalog can be
//!   swapped for a user-supplied TOML table
//!
//! # Quick Start
//!
//! The main entry point is [`generate_compositions_by_oxidation`], which takes
//! an abstract formula string and a [`DesignConfig`]:
//!
//! ```
//! use stoich_forge::{Composition, DesignConfig, DesignError, Element};
//! use stoich_forge::generate_compositions_by_oxidation;
//!
//! // Every element with a +3 oxidation state
//! let config = DesignConfig {
//!     total_oxidation_state: 3,
//!     only_common_oxidation_states: false,
//!     ..Default::default()
//! };
//! let ions = generate_compositions_by_oxidation("X", &config)?;
//! assert!(ions.contains(&Composition::new().with(Element::Fe, 1)));
//!
//! // Charge-neutral AX compounds, e.g. NaCl
//! let binaries = generate_compositions_by_oxidation("AX", &DesignConfig::default())?;
//! let nacl = Composition::new().with(Element::Na, 1).with(Element::Cl, 1);
//! assert!(binaries.contains(&nacl));
//! assert_eq!(nacl.reduced_formula(), "NaCl");
//!
//! // Binary formulas never collapse onto one element
//! assert!(binaries.iter().all(|c| !c.is_element()));
//! # Ok::<(), DesignError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`generate_compositions_by_oxidation`] — Parse, load the catalog, search
//! - [`enumerate`] — The pure search over a parsed formula and a catalog
//! - [`DesignConfig`] — Oxidation target, state set, catalog and constraints
//!
//! # Data Types
//!
//! - [`AbstractFormula`] / [`Slot`] — Placeholder slots with atom counts
//! - [`Element`] — Chemical element (H through Og)
//! - [`Composition`] — Concrete element-to-count mapping
//! - [`PartialComposition`] — Composition under construction with its
//!   running oxidation total
//! - [`ElementCatalog`] / [`OxidationStates`] — Oxidation states per element
//! - [`Constraints`] / [`SlotConstraint`] / [`ChargeSign`] — Slot restrictions

mod design;
mod model;

pub use model::composition::{Composition, PartialComposition};
pub use model::formula::{AbstractFormula, ParseFormulaError, Slot};
pub use model::types::{Element, ParseElementError};

pub use design::{
    ChargeSign, Constraints, DesignConfig, ElementCatalog, OxidationStates, SearchOptions,
    SearchStats, SlotConstraint, default_catalog, enumerate, enumerate_with_stats,
    generate_compositions_by_oxidation, generate_for_formula, generate_with_stats, load_catalog,
};

pub use design::Error as DesignError;
