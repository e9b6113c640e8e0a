use super::element::{Element, UnknownElementError};
use super::formula::Formula;
use crate::core::models::composition::{CompositionError, CompositionVector};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SystemError {
    #[error("A chemical system needs at least two elements, got {0}")]
    TooFewElements(usize),
    #[error("Element '{0}' appears more than once in the chemical system")]
    DuplicateElement(String),
    #[error(transparent)]
    UnknownElement(#[from] UnknownElementError),
}

/// The ordered element list of a k-element chemical system (e.g. `Ce-Co-B`).
///
/// The order fixes the coordinate order of every [`CompositionVector`] built for
/// this system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChemicalSystem {
    elements: Vec<Element>,
}

impl ChemicalSystem {
    pub fn new(elements: Vec<Element>) -> Result<Self, SystemError> {
        if elements.len() < 2 {
            return Err(SystemError::TooFewElements(elements.len()));
        }
        for (i, element) in elements.iter().enumerate() {
            if elements[..i].contains(element) {
                return Err(SystemError::DuplicateElement(element.to_string()));
            }
        }
        Ok(Self { elements })
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn arity(&self) -> usize {
        self.elements.len()
    }

    pub fn contains(&self, element: &Element) -> bool {
        self.elements.contains(element)
    }

    /// Concatenated element symbols, e.g. `CeCoB`, used to name report files.
    pub fn compact_label(&self) -> String {
        self.elements.iter().map(|e| e.symbol()).collect()
    }

    /// Elements of `formula` that are not part of this system.
    pub fn foreign_elements(&self, formula: &Formula) -> Vec<Element> {
        formula.elements().filter(|e| !self.contains(e)).collect()
    }

    /// Expresses `formula` as atomic fractions over this system's elements.
    ///
    /// Fails with [`CompositionError::OutOfSystem`] if the formula contains any element
    /// outside the system; formulas are never used partially.
    pub fn composition_of(&self, formula: &Formula) -> Result<CompositionVector, CompositionError> {
        let foreign = self.foreign_elements(formula);
        if !foreign.is_empty() {
            return Err(CompositionError::OutOfSystem {
                elements: foreign.iter().map(|e| e.to_string()).collect(),
            });
        }
        let fractions = self
            .elements
            .iter()
            .map(|e| formula.atomic_fraction(e))
            .collect();
        CompositionVector::new(fractions)
    }
}

impl FromStr for ChemicalSystem {
    type Err = SystemError;

    /// Parses a dash-separated element list such as `Ce-Co-B`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let elements = s
            .split('-')
            .filter(|part| !part.trim().is_empty())
            .map(Element::from_symbol)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(elements)
    }
}

impl fmt::Display for ChemicalSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbols: Vec<&str> = self.elements.iter().map(|e| e.symbol()).collect();
        f.write_str(&symbols.join("-"))
    }
}
