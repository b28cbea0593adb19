use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid or unsupported element symbol: '{0}'")]
pub struct ParseElementError(String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Element {
    H = 1,
    He,
    Li,
    Be,
    B,
    C,
    N,
    O,
    F,
    Ne,
    Na,
    Mg,
    Al,
    Si,
    P,
    S,
    Cl,
    Ar,
    K,
    Ca,
    Sc,
    Ti,
    V,
    Cr,
    Mn,
    Fe,
    Co,
    Ni,
    Cu,
    Zn,
    Ga,
    Ge,
    As,
    Se,
    Br,
    Kr,
    Rb,
    Sr,
    Y,
    Zr,
    Nb,
    Mo,
    Tc,
    Ru,
    Rh,
    Pd,
    Ag,
    Cd,
    In,
    Sn,
    Sb,
    Te,
    I,
    Xe,
    Cs,
    Ba,
    La,
    Ce,
    Pr,
    Nd,
    Pm,
    Sm,
    Eu,
    Gd,
    Tb,
    Dy,
    Ho,
    Er,
    Tm,
    Yb,
    Lu,
    Hf,
    Ta,
    W,
    Re,
    Os,
    Ir,
    Pt,
    Au,
    Hg,
    Tl,
    Pb,
    Bi,
    Po,
    At,
    Rn,
    Fr,
    Ra,
    Ac,
    Th,
    Pa,
    U,
    Np,
    Pu,
    Am,
    Cm,
    Bk,
    Cf,
    Es,
    Fm,
    Md,
    No,
    Lr,
    Rf,
    Db,
    Sg,
    Bh,
    Hs,
    Mt,
    Ds,
    Rg,
    Cn,
    Nh,
    Fl,
    Mc,
    Lv,
    Ts,
    Og = 118,
}

const ELEMENT_COUNT: u8 = 118;

#[rustfmt::skip]
static SYMBOLS: [&str; ELEMENT_COUNT as usize] = [
    "H",                                                                                  "He",
    "Li", "Be",                                                  "B",  "C",  "N",  "O",  "F",  "Ne",
    "Na", "Mg",                                                  "Al", "Si", "P",  "S",  "Cl", "Ar",
    "K",  "Ca", "Sc", "Ti", "V",  "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As", "Se", "Br", "Kr",
    "Rb", "Sr", "Y",  "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In", "Sn", "Sb", "Te", "I",  "Xe",
    "Cs", "Ba",
    "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb", "Dy", "Ho", "Er", "Tm", "Yb",
    "Lu", "Hf", "Ta", "W",  "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl", "Pb", "Bi", "Po", "At", "Rn",
    "Fr", "Ra",
    "Ac", "Th", "Pa", "U",  "Np", "Pu", "Am", "Cm", "Bk", "Cf", "Es", "Fm", "Md", "No",
    "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh", "Fl", "Mc", "Lv", "Ts", "Og",
];

// Pauling scale; zero marks elements without a tabulated value.
#[rustfmt::skip]
static ELECTRONEGATIVITIES: [f64; ELEMENT_COUNT as usize] = [
    2.20,                                                                                       0.0,
    0.98, 1.57,                                                       2.04, 2.55, 3.04, 3.44, 3.98, 0.0,
    0.93, 1.31,                                                       1.61, 1.90, 2.19, 2.58, 3.16, 0.0,
    0.82, 1.00, 1.36, 1.54, 1.63, 1.66, 1.55, 1.83, 1.88, 1.91, 1.90, 1.65, 1.81, 2.01, 2.18, 2.55, 2.96, 3.00,
    0.82, 0.95, 1.22, 1.33, 1.60, 2.16, 1.90, 2.20, 2.28, 2.20, 1.93, 1.69, 1.78, 1.96, 2.05, 2.10, 2.66, 2.60,
    0.79, 0.89,
    1.10, 1.12, 1.13, 1.14, 1.13, 1.17, 1.20, 1.20, 1.10, 1.22, 1.23, 1.24, 1.25, 1.10,
    1.27, 1.30, 1.50, 2.36, 1.90, 2.20, 2.20, 2.28, 2.54, 2.00, 1.62, 2.33, 2.02, 2.00, 2.20, 2.20,
    0.70, 0.90,
    1.10, 1.30, 1.50, 1.38, 1.36, 1.28, 1.13, 1.28, 1.30, 1.30, 1.30, 1.30, 1.30, 1.30,
    1.30, 0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,  0.0,
];

impl Element {
    pub fn from_atomic_number(n: u8) -> Option<Element> {
        if (1..=ELEMENT_COUNT).contains(&n) {
            // SAFETY: Element is repr(u8) with contiguous variants 1..=118 and n is in range.
            Some(unsafe { std::mem::transmute::<u8, Element>(n) })
        } else {
            None
        }
    }

    /// Iterates over every element in order of increasing atomic number.
    pub fn all() -> impl Iterator<Item = Element> {
        (1..=ELEMENT_COUNT).filter_map(Element::from_atomic_number)
    }

    #[inline]
    pub fn atomic_number(&self) -> u8 {
        *self as u8
    }

    pub fn symbol(&self) -> &'static str {
        SYMBOLS[*self as usize - 1]
    }

    /// Pauling electronegativity, if one is tabulated for this element.
    pub fn electronegativity(&self) -> Option<f64> {
        let x = ELECTRONEGATIVITIES[*self as usize - 1];
        if x > 0.0 { Some(x) } else { None }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SYMBOLS
            .iter()
            .position(|sym| *sym == s)
            .and_then(|idx| Element::from_atomic_number(idx as u8 + 1))
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn element_from_str_valid() {
        assert_eq!(Element::from_str("H").unwrap(), Element::H);
        assert_eq!(Element::from_str("He").unwrap(), Element::He);
        assert_eq!(Element::from_str("Fe").unwrap(), Element::Fe);
        assert_eq!(Element::from_str("Og").unwrap(), Element::Og);
    }

    #[test]
    fn element_from_str_invalid_case() {
        let err = Element::from_str("fe").unwrap_err();
        assert_eq!(err.to_string(), "invalid or unsupported element symbol: 'fe'");
        assert!(Element::from_str("X").is_err());
        assert!(Element::from_str("").is_err());
    }

    #[test]
    fn symbol_table_matches_atomic_numbers() {
        for element in Element::all() {
            let parsed = Element::from_str(element.symbol()).unwrap();
            assert_eq!(parsed, element);
        }
        assert_eq!(Element::Na.atomic_number(), 11);
        assert_eq!(Element::Hg.symbol(), "Hg");
        assert_eq!(Element::Og.atomic_number(), 118);
    }

    #[test]
    fn all_is_ordered_and_complete() {
        let all: Vec<Element> = Element::all().collect();
        assert_eq!(all.len(), 118);
        assert_eq!(all.first(), Some(&Element::H));
        assert_eq!(all.last(), Some(&Element::Og));
        assert!(all.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn from_atomic_number_bounds() {
        assert_eq!(Element::from_atomic_number(0), None);
        assert_eq!(Element::from_atomic_number(26), Some(Element::Fe));
        assert_eq!(Element::from_atomic_number(119), None);
    }

    #[test]
    fn electronegativity_values() {
        assert!(approx_eq(Element::F.electronegativity().unwrap(), 3.98, 1e-9));
        assert!(approx_eq(Element::Cs.electronegativity().unwrap(), 0.79, 1e-9));
        assert!(approx_eq(Element::Fe.electronegativity().unwrap(), 1.83, 1e-9));
        assert_eq!(Element::He.electronegativity(), None);
        assert_eq!(Element::Og.electronegativity(), None);
    }

    #[test]
    fn display_is_symbol() {
        assert_eq!(Element::Cl.to_string(), "Cl");
        assert_eq!(format!("{}{}", Element::Na, Element::Cl), "NaCl");
    }
}
