//! Core data structures for composition enumeration.
//!
//! - [`types`] – Periodic table elements with symbols and electronegativities.
//! - [`formula`] – Abstract formulas made of placeholder slots with atom counts.
//! - [`composition`] – Concrete element-to-count compositions and the partial
//!   compositions built while searching.
//!
//! Abstract formulas are the input to the enumeration search; compositions are its
//! output.

pub mod composition;
pub mod formula;
pub mod types;
