use std::borrow::Cow;
use std::collections::HashMap;
use std::sync::OnceLock;

use serde::Deserialize;

use super::error::Error;
use crate::model::types::Element;

const DEFAULT_CATALOG_TOML: &str = include_str!("../../resources/oxidation_states.toml");

static DEFAULT_CATALOG: OnceLock<ElementCatalog> = OnceLock::new();

/// Oxidation states recorded for one element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OxidationStates {
    /// Every oxidation state observed for the element.
    #[serde(default)]
    pub all: Vec<i32>,
    /// The chemically typical subset of `all`.
    #[serde(default)]
    pub common: Vec<i32>,
}

impl OxidationStates {
    pub fn new(all: impl Into<Vec<i32>>, common: impl Into<Vec<i32>>) -> Self {
        Self {
            all: all.into(),
            common: common.into(),
        }
    }

    pub fn select(&self, only_common: bool) -> &[i32] {
        if only_common { &self.common } else { &self.all }
    }
}

/// Read-only table of oxidation states per element.
///
/// Iteration follows the order entries were supplied in; catalogs parsed
/// from TOML are ordered by atomic number.
#[derive(Debug, Clone, Default)]
pub struct ElementCatalog {
    entries: Vec<(Element, OxidationStates)>,
}

impl ElementCatalog {
    /// Parses a catalog from TOML, one table per element symbol.
    ///
    /// ```toml
    /// [Fe]
    /// all = [-2, -1, 1, 2, 3, 4, 5, 6]
    /// common = [2, 3]
    /// ```
    pub fn from_toml(source: &str) -> Result<Self, Error> {
        let raw: HashMap<String, OxidationStates> = toml::from_str(source)?;

        let mut entries = Vec::with_capacity(raw.len());
        for (symbol, states) in raw {
            let element = symbol
                .parse::<Element>()
                .map_err(|e| Error::invalid_catalog(&symbol, e.to_string()))?;
            entries.push((element, states));
        }
        entries.sort_by_key(|(element, _)| *element);

        Self::from_entries(entries)
    }

    /// Builds a catalog from explicit entries, keeping their order.
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Element, OxidationStates)>,
    ) -> Result<Self, Error> {
        let mut validated: Vec<(Element, OxidationStates)> = Vec::new();
        for (element, states) in entries {
            if validated.iter().any(|(e, _)| *e == element) {
                return Err(Error::invalid_catalog(
                    element.symbol(),
                    "element listed more than once",
                ));
            }
            if let Some(extra) = states.common.iter().find(|s| !states.all.contains(*s)) {
                return Err(Error::invalid_catalog(
                    element.symbol(),
                    format!("common oxidation state {extra} is missing from `all`"),
                ));
            }
            validated.push((element, states));
        }
        Ok(Self { entries: validated })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.entries.iter().map(|(e, _)| *e)
    }

    pub fn entries(&self) -> impl Iterator<Item = (Element, &OxidationStates)> + '_ {
        self.entries.iter().map(|(e, s)| (*e, s))
    }

    /// Selected oxidation states of `element`; empty if it has no entry.
    pub fn oxidation_states(&self, element: Element, only_common: bool) -> &[i32] {
        self.entries
            .iter()
            .find(|(e, _)| *e == element)
            .map(|(_, s)| s.select(only_common))
            .unwrap_or(&[])
    }

    /// Elements that have at least one selected oxidation state.
    pub fn candidates(&self, only_common: bool) -> impl Iterator<Item = (Element, &[i32])> + '_ {
        self.entries
            .iter()
            .map(move |(e, s)| (*e, s.select(only_common)))
            .filter(|(_, states)| !states.is_empty())
    }

    /// Lowest and highest selected oxidation state across the catalog.
    pub fn oxidation_range(&self, only_common: bool) -> Option<(i32, i32)> {
        self.candidates(only_common)
            .flat_map(|(_, states)| states.iter().copied())
            .fold(None, |range, s| match range {
                None => Some((s, s)),
                Some((lo, hi)) => Some((lo.min(s), hi.max(s))),
            })
    }
}

/// Returns the built-in catalog, or parses `custom_toml` when given.
pub fn load_catalog(custom_toml: Option<&str>) -> Result<Cow<'static, ElementCatalog>, Error> {
    match custom_toml {
        Some(toml) => {
            let catalog = ElementCatalog::from_toml(toml)?;
            log::debug!("loaded custom element catalog with {} entries", catalog.len());
            Ok(Cow::Owned(catalog))
        }
        None => Ok(Cow::Borrowed(default_catalog())),
    }
}

/// The embedded catalog, parsed on first use.
pub fn default_catalog() -> &'static ElementCatalog {
    DEFAULT_CATALOG.get_or_init(|| {
        let catalog = ElementCatalog::from_toml(DEFAULT_CATALOG_TOML)
            .expect("Failed to parse embedded element catalog. This is a library bug.");
        log::debug!("loaded built-in element catalog with {} entries", catalog.len());
        catalog
    })
}
