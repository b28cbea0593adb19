//! Configuration for composition generation.
//!
//! [`DesignConfig`] collects every knob of
//! [`generate_compositions_by_oxidation`](super::generate_compositions_by_oxidation):
//! the oxidation target, which oxidation-state set to draw from, an optional
//! replacement element catalog and per-slot constraints.

use super::constraint::Constraints;
use super::search::SearchOptions;

/// Main configuration for composition generation.
///
/// # Examples
///
/// ```
/// use stoich_forge::{ChargeSign, Constraints, DesignConfig};
///
/// // Charge-neutral compounds from common oxidation states
/// let default = DesignConfig::default();
/// assert_eq!(default.total_oxidation_state, 0);
///
/// // Dianions over the full oxidation-state range, X restricted to anions
/// let custom = DesignConfig {
///     total_oxidation_state: -2,
///     only_common_oxidation_states: false,
///     constraints: Constraints::new().sign("X", ChargeSign::Anion),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct DesignConfig {
    /// Required sum of oxidation state times atom count over all slots.
    pub total_oxidation_state: i32,

    /// Draw from each element's common oxidation states only.
    ///
    /// When `false`, every recorded oxidation state is considered.
    pub only_common_oxidation_states: bool,

    /// Custom element catalog in TOML format.
    ///
    /// If `None`, uses the embedded `oxidation_states.toml`.
    pub catalog: Option<String>,

    /// Per-slot restrictions on elements and oxidation-state signs.
    pub constraints: Constraints,
}

impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            total_oxidation_state: 0,
            only_common_oxidation_states: true,
            catalog: None,
            constraints: Constraints::default(),
        }
    }
}

impl DesignConfig {
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            total_oxidation_state: self.total_oxidation_state,
            only_common_oxidation_states: self.only_common_oxidation_states,
            constraints: self.constraints.clone(),
        }
    }
}
