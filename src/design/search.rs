//! Recursive slot-by-slot enumeration of charge-balanced compositions.
//!
//! The search fills the slots of an [`AbstractFormula`] in order. Every
//! intermediate step produces a fresh [`PartialComposition`] carrying the
//! oxidation total of the species chosen so far, and each branch returns an
//! owned result set that its caller merges by union.
//!
//! Before descending, a branch is dropped when the remaining slots cannot
//! bring the running total to the target even at their most extreme
//! oxidation states. The bound is derived from the same candidate tables the
//! search walks, so it never removes a reachable composition.

use std::collections::{BTreeSet, HashSet};

use super::catalog::ElementCatalog;
use super::constraint::Constraints;
use crate::model::composition::{Composition, PartialComposition};
use crate::model::formula::AbstractFormula;
use crate::model::types::Element;

/// Parameters of a single enumeration.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Required sum of oxidation state times atom count over all slots.
    pub total_oxidation_state: i32,
    /// Use each element's common oxidation states instead of all of them.
    pub only_common_oxidation_states: bool,
    /// Per-slot restrictions on elements and oxidation-state signs.
    pub constraints: Constraints,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            total_oxidation_state: 0,
            only_common_oxidation_states: true,
            constraints: Constraints::default(),
        }
    }
}

/// Counters collected while searching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Branches descended into.
    pub branches: u64,
    /// Branches skipped because the target was out of reach.
    pub pruned: u64,
    /// Compositions emitted before de-duplication.
    pub emitted: u64,
}

/// Enumerates every concrete composition of `formula` whose total oxidation
/// state can equal the requested target.
///
/// An empty formula yields an empty set. Constraints naming slots that are
/// absent from the formula are ignored here; the checked entry point
/// [`generate_compositions_by_oxidation`](super::generate_compositions_by_oxidation)
/// rejects them instead.
pub fn enumerate(
    formula: &AbstractFormula,
    catalog: &ElementCatalog,
    options: &SearchOptions,
) -> HashSet<Composition> {
    enumerate_with_stats(formula, catalog, options).0
}

/// Like [`enumerate`], also returning search counters.
pub fn enumerate_with_stats(
    formula: &AbstractFormula,
    catalog: &ElementCatalog,
    options: &SearchOptions,
) -> (HashSet<Composition>, SearchStats) {
    if formula.is_empty() {
        return (HashSet::new(), SearchStats::default());
    }

    let slots = build_slot_tables(formula, catalog, options);
    let Some(reach) = remaining_reach(&slots) else {
        log::debug!("formula {formula}: a slot has no admissible species, nothing to search");
        return (HashSet::new(), SearchStats::default());
    };

    let mut search = Search {
        slots: &slots,
        reach,
        target: i64::from(options.total_oxidation_state),
        stats: SearchStats::default(),
    };
    let results = search.expand(0, &PartialComposition::new());

    log::debug!(
        "formula {formula}: {} slot(s), {} branch(es) visited, {} pruned, {} composition(s)",
        slots.len(),
        search.stats.branches,
        search.stats.pruned,
        results.len()
    );

    (results, search.stats)
}

/// Candidate species of one slot: each admissible element with its distinct
/// admissible oxidation states in ascending order.
struct SlotTable {
    count: u32,
    candidates: Vec<(Element, Vec<i32>)>,
}

impl SlotTable {
    fn extreme_states(&self) -> Option<(i32, i32)> {
        let lo = self.candidates.iter().filter_map(|(_, s)| s.first()).min()?;
        let hi = self.candidates.iter().filter_map(|(_, s)| s.last()).max()?;
        Some((*lo, *hi))
    }
}

fn build_slot_tables(
    formula: &AbstractFormula,
    catalog: &ElementCatalog,
    options: &SearchOptions,
) -> Vec<SlotTable> {
    formula
        .slots()
        .iter()
        .map(|slot| {
            let constraint = options.constraints.get(&slot.label);
            let candidates = catalog
                .candidates(options.only_common_oxidation_states)
                .filter(|(element, _)| constraint.is_none_or(|c| c.admits_element(*element)))
                .filter_map(|(element, states)| {
                    let states: BTreeSet<i32> = states
                        .iter()
                        .copied()
                        .filter(|s| constraint.is_none_or(|c| c.admits_state(*s)))
                        .collect();
                    (!states.is_empty()).then(|| (element, states.into_iter().collect::<Vec<i32>>()))
                })
                .collect();
            log::trace!("slot {}{}: candidate species built", slot.label, slot.count);
            SlotTable {
                count: slot.count,
                candidates,
            }
        })
        .collect()
}

/// For each depth `d`, the lowest and highest oxidation contribution that
/// slots `d..` can add together. `None` if any slot has no candidates.
fn remaining_reach(slots: &[SlotTable]) -> Option<Vec<(i64, i64)>> {
    let mut reach = vec![(0i64, 0i64); slots.len() + 1];
    for (depth, slot) in slots.iter().enumerate().rev() {
        let (lo, hi) = slot.extreme_states()?;
        let count = i64::from(slot.count);
        let (rest_lo, rest_hi) = reach[depth + 1];
        reach[depth] = (
            rest_lo + i64::from(lo) * count,
            rest_hi + i64::from(hi) * count,
        );
    }
    Some(reach)
}

struct Search<'a> {
    slots: &'a [SlotTable],
    reach: Vec<(i64, i64)>,
    target: i64,
    stats: SearchStats,
}

impl Search<'_> {
    fn expand(&mut self, depth: usize, partial: &PartialComposition) -> HashSet<Composition> {
        let slots = self.slots;
        let slot = &slots[depth];
        let count = slot.count;

        if depth + 1 == slots.len() {
            return self.fill_last(slot, partial);
        }

        let mut results = HashSet::new();
        for (element, states) in &slot.candidates {
            for &oxidation_state in states {
                let delta = i64::from(oxidation_state) * i64::from(count);
                if !self.within_reach(depth + 1, partial.total_oxidation_state() + delta) {
                    self.stats.pruned += 1;
                    continue;
                }

                self.stats.branches += 1;
                let next = partial.extend(*element, count, delta);
                results.extend(self.expand(depth + 1, &next));
            }
        }
        results
    }

    fn fill_last(&mut self, slot: &SlotTable, partial: &PartialComposition) -> HashSet<Composition> {
        let count = i64::from(slot.count);
        let mut results = HashSet::new();

        for (element, states) in &slot.candidates {
            let reachable = states
                .iter()
                .any(|&s| partial.total_oxidation_state() + i64::from(s) * count == self.target);
            if !reachable {
                continue;
            }

            let composition = partial.extend(*element, slot.count, 0).into_composition();
            // A multi-slot formula must not collapse onto a single element.
            if partial.is_empty() || !composition.is_element() {
                self.stats.emitted += 1;
                results.insert(composition);
            }
        }
        results
    }

    fn within_reach(&self, depth: usize, total: i64) -> bool {
        let (lo, hi) = self.reach[depth];
        (total + lo..=total + hi).contains(&self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::design::catalog::{OxidationStates, default_catalog};
    use crate::design::constraint::ChargeSign;

    fn formula(s: &str) -> AbstractFormula {
        s.parse().unwrap()
    }

    fn options(target: i32, only_common: bool) -> SearchOptions {
        SearchOptions {
            total_oxidation_state: target,
            only_common_oxidation_states: only_common,
            constraints: Constraints::default(),
        }
    }

    fn small_catalog() -> ElementCatalog {
        ElementCatalog::from_entries([
            (Element::Na, OxidationStates::new([-1, 1], [1])),
            (Element::Ba, OxidationStates::new([1, 2], [2])),
            (Element::Fe, OxidationStates::new([2, 3, 6], [2, 3])),
            (Element::O, OxidationStates::new([-2, -1, 1, 2], [-2])),
            (Element::Cl, OxidationStates::new([-1, 1, 3, 5, 7], [-1, 1, 3, 5, 7])),
            (Element::He, OxidationStates::default()),
        ])
        .unwrap()
    }

    /// Exhaustive search without pruning or de-duplicated totals, used as the
    /// reference for the pruned recursion.
    fn brute_force(
        formula: &AbstractFormula,
        catalog: &ElementCatalog,
        target: i32,
        only_common: bool,
    ) -> HashSet<Composition> {
        fn go(
            slots: &[crate::model::formula::Slot],
            catalog: &ElementCatalog,
            only_common: bool,
            target: i64,
            partial: PartialComposition,
            out: &mut HashSet<Composition>,
        ) {
            let Some((slot, rest)) = slots.split_first() else {
                return;
            };
            for element in catalog.elements() {
                for &s in catalog.oxidation_states(element, only_common) {
                    let next = partial.extend(element, slot.count, i64::from(s) * i64::from(slot.count));
                    if rest.is_empty() {
                        let multi_slot = !partial.is_empty();
                        let composition = next.composition().clone();
                        if next.total_oxidation_state() == target
                            && !(multi_slot && composition.is_element())
                        {
                            out.insert(composition);
                        }
                    } else {
                        go(rest, catalog, only_common, target, next, out);
                    }
                }
            }
        }

        let mut out = HashSet::new();
        go(
            formula.slots(),
            catalog,
            only_common,
            i64::from(target),
            PartialComposition::new(),
            &mut out,
        );
        out
    }

    #[test]
    fn empty_formula_yields_nothing() {
        let result = enumerate(&AbstractFormula::default(), default_catalog(), &SearchOptions::default());
        assert!(result.is_empty());
    }

    #[test]
    fn single_slot_selects_matching_elements() {
        let result = enumerate(&formula("X"), &small_catalog(), &options(2, true));
        let expected: HashSet<Composition> = [Element::Ba, Element::Fe]
            .into_iter()
            .map(|e| Composition::new().with(e, 1))
            .collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn single_slot_may_be_an_element() {
        let result = enumerate(&formula("X2"), &small_catalog(), &options(-4, true));
        assert_eq!(result.len(), 1);
        assert!(result.contains(&Composition::new().with(Element::O, 2)));
    }

    #[test]
    fn binary_collapse_is_excluded() {
        // Cl(+1)Cl(-1) balances but is elemental chlorine.
        let result = enumerate(&formula("AX"), &small_catalog(), &options(0, true));
        assert!(result.iter().all(|c| !c.is_element()));
        assert!(result.contains(&Composition::new().with(Element::Na, 1).with(Element::Cl, 1)));
        assert!(!result.contains(&Composition::new().with(Element::Cl, 2)));
    }

    #[test]
    fn partial_repeats_are_kept_for_three_slots() {
        // Na(+1) Cl(+1) Cl(-1): one element may fill two of three slots.
        let result = enumerate(&formula("ABX"), &small_catalog(), &options(1, true));
        let nacl2 = Composition::new().with(Element::Na, 1).with(Element::Cl, 2);
        assert!(result.contains(&nacl2));
    }

    #[test]
    fn pruned_search_matches_brute_force() {
        let catalog = small_catalog();
        for (f, target, only_common) in [
            ("ABX3", 0, true),
            ("ABX3", 0, false),
            ("A2X", -1, false),
            ("AB2X4", 0, true),
            ("ABC", 5, false),
        ] {
            let abstract_formula = formula(f);
            let expected = brute_force(&abstract_formula, &catalog, target, only_common);
            let actual = enumerate(&abstract_formula, &catalog, &options(target, only_common));
            assert_eq!(actual, expected, "{f} target {target} common {only_common}");
        }
    }

    #[test]
    fn pruning_skips_unreachable_branches() {
        let (result, stats) =
            enumerate_with_stats(&formula("AX4"), &small_catalog(), &options(-20, true));
        assert!(result.is_empty());
        assert_eq!(stats.branches, 0);
        assert!(stats.pruned > 0);
    }

    #[test]
    fn catalog_order_does_not_matter() {
        let forward = small_catalog();
        let reversed = ElementCatalog::from_entries(
            forward
                .entries()
                .map(|(e, s)| (e, s.clone()))
                .collect::<Vec<_>>()
                .into_iter()
                .rev(),
        )
        .unwrap();

        let f = formula("AX2");
        let opts = options(0, false);
        assert_eq!(enumerate(&f, &forward, &opts), enumerate(&f, &reversed, &opts));
    }

    #[test]
    fn constraints_restrict_slots() {
        let mut opts = options(0, false);
        opts.constraints = Constraints::new()
            .sign("A", ChargeSign::Cation)
            .allow("X", [Element::O]);

        let result = enumerate(&formula("AX"), &small_catalog(), &opts);
        let expected: HashSet<Composition> = [Element::Na, Element::Ba, Element::Fe, Element::Cl]
            .into_iter()
            .map(|e| Composition::new().with(e, 1).with(Element::O, 1))
            .collect();
        assert_eq!(result, expected);
    }

    #[test]
    fn unsatisfiable_constraint_yields_nothing() {
        let mut opts = options(0, true);
        opts.constraints = Constraints::new().allow("A", [Element::He]);
        assert!(enumerate(&formula("AX"), &small_catalog(), &opts).is_empty());
    }

    #[test]
    fn elements_without_states_never_appear() {
        let result = enumerate(&formula("AX"), &small_catalog(), &options(0, false));
        assert!(result.iter().all(|c| c.get(Element::He) == 0));
    }
}
