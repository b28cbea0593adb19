use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{self, Write};

use super::types::Element;

/// Reduced formulas that are conventionally written as molecules rather than
/// as their empirical ratio.
const SPECIAL_FORMULAS: [(&str, &str); 11] = [
    ("LiO", "LiO2"),
    ("NaO", "NaO2"),
    ("KO", "KO2"),
    ("HO", "H2O2"),
    ("CsO", "CsO2"),
    ("RbO", "RbO2"),
    ("O", "O2"),
    ("N", "N2"),
    ("F", "F2"),
    ("Cl", "Cl2"),
    ("H", "H2"),
];

/// A concrete assignment of atom counts to elements.
///
/// Backed by an ordered map, so two compositions compare (and hash) equal
/// exactly when they contain the same elements with the same counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Composition {
    amounts: BTreeMap<Element, u32>,
}

impl Composition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this composition with `count` more atoms of `element`.
    ///
    /// The count saturates at `u32::MAX`.
    pub fn with(&self, element: Element, count: u32) -> Self {
        let mut amounts = self.amounts.clone();
        if count > 0 {
            let entry = amounts.entry(element).or_insert(0);
            *entry = entry.saturating_add(count);
        }
        Self { amounts }
    }

    pub fn get(&self, element: Element) -> u32 {
        self.amounts.get(&element).copied().unwrap_or(0)
    }

    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.amounts.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, u32)> + '_ {
        self.amounts.iter().map(|(e, n)| (*e, *n))
    }

    pub fn num_elements(&self) -> usize {
        self.amounts.len()
    }

    pub fn num_atoms(&self) -> u64 {
        self.amounts.values().map(|n| u64::from(*n)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// `true` when the composition consists of a single element.
    pub fn is_element(&self) -> bool {
        self.amounts.len() == 1
    }

    /// Formula with the stored counts, ordered by electronegativity.
    pub fn formula(&self) -> String {
        render(&self.sorted_amounts(), 1)
    }

    /// Formula divided through by the greatest common divisor of the counts.
    ///
    /// Elements are ordered by increasing electronegativity (elements without
    /// a tabulated value last, ties broken by symbol). Diatomic elements and
    /// the alkali peroxides/superoxides use their molecular form, so a pure
    /// oxygen composition reduces to `O2` rather than `O`.
    pub fn reduced_formula(&self) -> String {
        let amounts = self.sorted_amounts();
        let divisor = amounts.iter().fold(0, |acc, (_, n)| gcd(acc, *n)).max(1);
        let reduced = render(&amounts, divisor);

        SPECIAL_FORMULAS
            .iter()
            .find(|(plain, _)| *plain == reduced)
            .map(|(_, special)| special.to_string())
            .unwrap_or(reduced)
    }

    fn sorted_amounts(&self) -> Vec<(Element, u32)> {
        let mut amounts: Vec<(Element, u32)> = self.iter().collect();
        amounts.sort_by(|(a, _), (b, _)| electronegativity_order(*a, *b));
        amounts
    }
}

impl FromIterator<(Element, u32)> for Composition {
    fn from_iter<T: IntoIterator<Item = (Element, u32)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Composition::new(), |acc, (element, count)| {
                acc.with(element, count)
            })
    }
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formula())
    }
}

/// A composition under construction, paired with the oxidation total of the
/// species chosen so far.
///
/// Extending never mutates the receiver; every step yields a new value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialComposition {
    composition: Composition,
    total_oxidation_state: i64,
}

impl PartialComposition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&self, element: Element, count: u32, oxidation_delta: i64) -> Self {
        Self {
            composition: self.composition.with(element, count),
            total_oxidation_state: self.total_oxidation_state + oxidation_delta,
        }
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn total_oxidation_state(&self) -> i64 {
        self.total_oxidation_state
    }

    pub fn is_empty(&self) -> bool {
        self.composition.is_empty()
    }

    pub fn into_composition(self) -> Composition {
        self.composition
    }
}

fn electronegativity_order(a: Element, b: Element) -> Ordering {
    match (a.electronegativity(), b.electronegativity()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| a.symbol().cmp(b.symbol()))
}

fn render(amounts: &[(Element, u32)], divisor: u32) -> String {
    let mut out = String::new();
    for (element, count) in amounts {
        out.push_str(element.symbol());
        let count = count / divisor;
        if count != 1 {
            let _ = write!(out, "{count}");
        }
    }
    out
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 { a } else { gcd(b, a % b) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn comp(pairs: &[(Element, u32)]) -> Composition {
        pairs.iter().copied().collect()
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a = comp(&[(Element::Na, 1), (Element::Cl, 1)]);
        let b = comp(&[(Element::Cl, 1), (Element::Na, 1)]);
        assert_eq!(a, b);

        let set: HashSet<Composition> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn with_accumulates_counts() {
        let c = Composition::new()
            .with(Element::Fe, 1)
            .with(Element::O, 2)
            .with(Element::Fe, 1);
        assert_eq!(c.get(Element::Fe), 2);
        assert_eq!(c.get(Element::O), 2);
        assert_eq!(c.get(Element::N), 0);
        assert_eq!(c.num_atoms(), 4);
        assert_eq!(c.num_elements(), 2);
    }

    #[test]
    fn with_zero_count_is_noop() {
        let c = Composition::new().with(Element::Fe, 0);
        assert!(c.is_empty());
    }

    #[test]
    fn is_element_detects_single_element() {
        assert!(comp(&[(Element::Fe, 3)]).is_element());
        assert!(!comp(&[(Element::Fe, 1), (Element::O, 1)]).is_element());
        assert!(!Composition::new().is_element());
    }

    #[test]
    fn formula_orders_by_electronegativity() {
        assert_eq!(comp(&[(Element::Cl, 1), (Element::Na, 1)]).formula(), "NaCl");
        assert_eq!(comp(&[(Element::O, 2), (Element::Hg, 1)]).formula(), "HgO2");
        assert_eq!(
            comp(&[(Element::O, 3), (Element::Ba, 1), (Element::Ti, 1)]).formula(),
            "BaTiO3"
        );
    }

    #[test]
    fn formula_places_missing_electronegativity_last() {
        assert_eq!(comp(&[(Element::Ar, 1), (Element::F, 2)]).formula(), "F2Ar");
    }

    #[test]
    fn reduced_formula_divides_by_gcd() {
        assert_eq!(comp(&[(Element::Fe, 2), (Element::O, 4)]).reduced_formula(), "FeO2");
        assert_eq!(comp(&[(Element::Fe, 2), (Element::O, 3)]).reduced_formula(), "Fe2O3");
        assert_eq!(comp(&[(Element::Fe, 2), (Element::O, 4)]).formula(), "Fe2O4");
    }

    #[test]
    fn reduced_formula_special_cases() {
        assert_eq!(comp(&[(Element::O, 1)]).reduced_formula(), "O2");
        assert_eq!(comp(&[(Element::Cl, 4)]).reduced_formula(), "Cl2");
        assert_eq!(comp(&[(Element::H, 2), (Element::O, 2)]).reduced_formula(), "H2O2");
        assert_eq!(comp(&[(Element::Na, 1), (Element::O, 1)]).reduced_formula(), "NaO2");
        assert_eq!(comp(&[(Element::Fe, 1)]).reduced_formula(), "Fe");
    }

    #[test]
    fn empty_composition_formula() {
        assert_eq!(Composition::new().formula(), "");
        assert_eq!(Composition::new().reduced_formula(), "");
    }

    #[test]
    fn partial_extend_leaves_receiver_untouched() {
        let root = PartialComposition::new();
        let a = root.extend(Element::Ba, 1, 2);
        let b = a.extend(Element::O, 1, -2);

        assert!(root.is_empty());
        assert_eq!(root.total_oxidation_state(), 0);
        assert_eq!(a.composition().num_elements(), 1);
        assert_eq!(a.total_oxidation_state(), 2);
        assert_eq!(b.total_oxidation_state(), 0);
        assert_eq!(b.into_composition().formula(), "BaO");
    }
}
