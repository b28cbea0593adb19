use anyhow::{Result, bail};

use stoich_forge::{ChargeSign, Constraints, DesignConfig};

use crate::cli::{ConstraintOptions, OxidationOptions};

pub fn build_design_config(
    oxidation: &OxidationOptions,
    constraints: &ConstraintOptions,
    catalog: Option<String>,
) -> Result<DesignConfig> {
    Ok(DesignConfig {
        total_oxidation_state: oxidation.total,
        only_common_oxidation_states: !oxidation.all_states,
        catalog,
        constraints: build_constraints(constraints)?,
    })
}

pub fn build_constraints(opts: &ConstraintOptions) -> Result<Constraints> {
    if let Some(slot) = opts.cation.iter().find(|slot| opts.anion.contains(slot)) {
        bail!("Slot '{}' cannot be both --cation and --anion", slot);
    }

    let mut constraints = Constraints::new();
    for spec in &opts.allow {
        constraints = constraints.allow(spec.slot.as_str(), spec.elements.iter().copied());
    }
    for slot in &opts.cation {
        constraints = constraints.sign(slot.as_str(), ChargeSign::Cation);
    }
    for slot in &opts.anion {
        constraints = constraints.sign(slot.as_str(), ChargeSign::Anion);
    }

    Ok(constraints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::AllowSpec;
    use stoich_forge::Element;

    fn options(allow: &[&str], cation: &[&str], anion: &[&str]) -> ConstraintOptions {
        ConstraintOptions {
            allow: allow.iter().map(|s| s.parse::<AllowSpec>().unwrap()).collect(),
            cation: cation.iter().map(|s| s.to_string()).collect(),
            anion: anion.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn empty_options_give_no_constraints() {
        let constraints = build_constraints(&options(&[], &[], &[])).unwrap();
        assert!(constraints.is_empty());
    }

    #[test]
    fn allow_and_sign_merge_per_slot() {
        let constraints =
            build_constraints(&options(&["A:Ba", "A:Sr", "X:O"], &["A"], &["X"])).unwrap();
        let a = constraints.get("A").unwrap();
        assert!(a.admits_element(Element::Ba));
        assert!(a.admits_element(Element::Sr));
        assert_eq!(a.sign, Some(ChargeSign::Cation));
        assert_eq!(constraints.get("X").unwrap().sign, Some(ChargeSign::Anion));
    }

    #[test]
    fn conflicting_signs_are_rejected() {
        let err = build_constraints(&options(&[], &["A"], &["A"])).unwrap_err();
        assert!(err.to_string().contains("'A'"));
    }

    #[test]
    fn design_config_maps_flags() {
        let oxidation = OxidationOptions {
            total: -2,
            all_states: true,
        };
        let config = build_design_config(&oxidation, &options(&[], &[], &[]), None).unwrap();
        assert_eq!(config.total_oxidation_state, -2);
        assert!(!config.only_common_oxidation_states);
        assert!(config.catalog.is_none());
    }
}
