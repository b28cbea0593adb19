//! Abstract stoichiometric formulas such as `ABC3` or `(AB)2X`.
//!
//! A formula is a list of placeholder slots, each with a positive atom count.
//! Placeholders follow element-symbol casing (`A`, `X`, `Ab`) but carry no
//! chemical identity; the enumerator decides which element fills each slot.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Why an abstract formula string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} at position {position}")]
pub struct ParseFormulaError {
    /// Byte offset into the input where parsing stopped.
    pub position: usize,
    /// Human-readable description of the problem.
    pub reason: String,
}

impl ParseFormulaError {
    fn new(position: usize, reason: impl Into<String>) -> Self {
        Self {
            position,
            reason: reason.into(),
        }
    }
}

/// One placeholder position of an abstract formula.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slot {
    pub label: String,
    pub count: u32,
}

impl Slot {
    pub fn new(label: impl Into<String>, count: u32) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

/// An ordered list of distinct placeholder slots.
///
/// Slots keep the order in which their labels first appear in the source
/// string. A label that appears more than once has its counts summed into the
/// first occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AbstractFormula {
    slots: Vec<Slot>,
}

impl AbstractFormula {
    /// Builds a formula from explicit slots, merging repeated labels.
    ///
    /// Slots with a zero count are dropped. The result may be empty. Merged
    /// counts that exceed `u32::MAX` are clamped; parsing rejects them instead.
    pub fn from_slots(slots: impl IntoIterator<Item = Slot>) -> Self {
        let mut merged: Vec<Slot> = Vec::new();
        for slot in slots.into_iter().filter(|s| s.count > 0) {
            match merged.iter_mut().find(|s| s.label == slot.label) {
                Some(existing) => existing.count = existing.count.saturating_add(slot.count),
                None => merged.push(slot),
            }
        }
        Self { slots: merged }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slot(&self, label: &str) -> Option<&Slot> {
        self.slots.iter().find(|s| s.label == label)
    }

    /// Total number of atoms across all slots.
    pub fn num_atoms(&self) -> u64 {
        self.slots.iter().map(|s| u64::from(s.count)).sum()
    }
}

impl fmt::Display for AbstractFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for slot in &self.slots {
            f.write_str(&slot.label)?;
            if slot.count != 1 {
                write!(f, "{}", slot.count)?;
            }
        }
        Ok(())
    }
}

impl FromStr for AbstractFormula {
    type Err = ParseFormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parser = Parser::new(s);
        let terms = parser.parse_sequence(0)?;
        parser.skip_whitespace();
        if let Some(c) = parser.peek() {
            return Err(ParseFormulaError::new(
                parser.pos,
                format!("unexpected character '{c}'"),
            ));
        }

        let total: u64 = terms.iter().map(|slot| u64::from(slot.count)).sum();
        if total > u64::from(u32::MAX) {
            return Err(ParseFormulaError::new(0, "count overflows"));
        }

        let formula = AbstractFormula::from_slots(terms);
        if formula.is_empty() {
            return Err(ParseFormulaError::new(0, "formula has no slots"));
        }
        Ok(formula)
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    fn parse_sequence(&mut self, depth: usize) -> Result<Vec<Slot>, ParseFormulaError> {
        let mut terms = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                Some(c) if c.is_ascii_uppercase() => {
                    let label = self.parse_label();
                    let count = self.parse_count()?.unwrap_or(1);
                    terms.push(Slot::new(label, count));
                }
                Some('(') => {
                    let open = self.pos;
                    self.bump();
                    let inner = self.parse_sequence(depth + 1)?;
                    self.skip_whitespace();
                    if self.peek() != Some(')') {
                        return Err(ParseFormulaError::new(open, "unclosed '('"));
                    }
                    self.bump();
                    if inner.is_empty() {
                        return Err(ParseFormulaError::new(open, "empty group"));
                    }
                    let multiplier = self.parse_count()?.unwrap_or(1);
                    for slot in inner {
                        let count = slot.count.checked_mul(multiplier).ok_or_else(|| {
                            ParseFormulaError::new(open, "group count overflows")
                        })?;
                        terms.push(Slot::new(slot.label, count));
                    }
                }
                Some(')') if depth > 0 => return Ok(terms),
                Some(')') => {
                    return Err(ParseFormulaError::new(self.pos, "unmatched ')'"));
                }
                _ => return Ok(terms),
            }
        }
    }

    fn parse_label(&mut self) -> String {
        let start = self.pos;
        self.bump();
        while self.peek().is_some_and(|c| c.is_ascii_lowercase()) {
            self.bump();
        }
        self.src[start..self.pos].to_string()
    }

    fn parse_count(&mut self) -> Result<Option<u32>, ParseFormulaError> {
        self.skip_whitespace();
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.bump();
        }
        if start == self.pos {
            return Ok(None);
        }

        let digits = &self.src[start..self.pos];
        let count: u32 = digits
            .parse()
            .map_err(|_| ParseFormulaError::new(start, format!("count '{digits}' is too large")))?;
        if count == 0 {
            return Err(ParseFormulaError::new(start, "count must be positive"));
        }
        Ok(Some(count))
    }
}
