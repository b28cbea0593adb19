use std::collections::{BTreeMap, BTreeSet};

use crate::model::types::Element;

/// Sign restriction on the oxidation state a slot may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargeSign {
    /// Strictly positive oxidation states.
    Cation,
    /// Strictly negative oxidation states.
    Anion,
    /// Oxidation state zero.
    Neutral,
}

impl ChargeSign {
    pub fn admits(self, oxidation_state: i32) -> bool {
        match self {
            ChargeSign::Cation => oxidation_state > 0,
            ChargeSign::Anion => oxidation_state < 0,
            ChargeSign::Neutral => oxidation_state == 0,
        }
    }
}

/// Restrictions on which species may fill one slot.
///
/// An unset field places no restriction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotConstraint {
    /// Elements the slot may take. `None` admits every catalog element.
    pub elements: Option<BTreeSet<Element>>,
    /// Required sign of the oxidation state.
    pub sign: Option<ChargeSign>,
}

impl SlotConstraint {
    pub fn admits_element(&self, element: Element) -> bool {
        self.elements
            .as_ref()
            .is_none_or(|allowed| allowed.contains(&element))
    }

    pub fn admits_state(&self, oxidation_state: i32) -> bool {
        self.sign.is_none_or(|sign| sign.admits(oxidation_state))
    }
}

/// Per-slot constraints, keyed by slot label.
///
/// # Examples
///
/// ```
/// use stoich_forge::{ChargeSign, Constraints, Element};
///
/// let constraints = Constraints::new()
///     .allow("A", [Element::Ba, Element::Sr])
///     .sign("X", ChargeSign::Anion);
///
/// assert!(constraints.get("A").unwrap().admits_element(Element::Sr));
/// assert!(!constraints.get("X").unwrap().admits_state(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Constraints {
    slots: BTreeMap<String, SlotConstraint>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, label: &str) -> Option<&SlotConstraint> {
        self.slots.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.slots.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SlotConstraint)> + '_ {
        self.slots.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Adds `elements` to the allow list of `label`.
    ///
    /// Repeated calls for the same slot widen the list.
    pub fn allow(
        mut self,
        label: impl Into<String>,
        elements: impl IntoIterator<Item = Element>,
    ) -> Self {
        let entry = self.slots.entry(label.into()).or_default();
        entry
            .elements
            .get_or_insert_with(BTreeSet::new)
            .extend(elements);
        self
    }

    /// Requires the oxidation state of `label` to have the given sign.
    pub fn sign(mut self, label: impl Into<String>, sign: ChargeSign) -> Self {
        self.slots.entry(label.into()).or_default().sign = Some(sign);
        self
    }

    pub fn insert(&mut self, label: impl Into<String>, constraint: SlotConstraint) {
        self.slots.insert(label.into(), constraint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charge_sign_admits() {
        assert!(ChargeSign::Cation.admits(3));
        assert!(!ChargeSign::Cation.admits(0));
        assert!(ChargeSign::Anion.admits(-2));
        assert!(!ChargeSign::Anion.admits(1));
        assert!(ChargeSign::Neutral.admits(0));
        assert!(!ChargeSign::Neutral.admits(-1));
    }

    #[test]
    fn unrestricted_slot_admits_everything() {
        let c = SlotConstraint::default();
        assert!(c.admits_element(Element::Og));
        assert!(c.admits_state(-4));
    }

    #[test]
    fn allow_widens_on_repeat() {
        let constraints = Constraints::new()
            .allow("A", [Element::Ba])
            .allow("A", [Element::Sr]);
        let a = constraints.get("A").unwrap();
        assert!(a.admits_element(Element::Ba));
        assert!(a.admits_element(Element::Sr));
        assert!(!a.admits_element(Element::Ca));
        assert_eq!(a.sign, None);
    }

    #[test]
    fn sign_and_allow_combine() {
        let constraints = Constraints::new()
            .sign("X", ChargeSign::Anion)
            .allow("X", [Element::O, Element::S]);
        let x = constraints.get("X").unwrap();
        assert_eq!(x.sign, Some(ChargeSign::Anion));
        assert!(x.admits_element(Element::S));
        assert!(!x.admits_state(4));
        assert_eq!(constraints.labels().collect::<Vec<_>>(), vec!["X"]);
    }

    #[test]
    fn insert_replaces_existing() {
        let mut constraints = Constraints::new().sign("A", ChargeSign::Cation);
        constraints.insert("A", SlotConstraint::default());
        assert_eq!(constraints.get("A"), Some(&SlotConstraint::default()));
        assert!(constraints.get("B").is_none());
        assert!(!constraints.is_empty());
    }
}
