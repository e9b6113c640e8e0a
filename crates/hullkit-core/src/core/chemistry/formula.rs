use super::element::Element;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

const INTEGER_TOLERANCE: f64 = 1e-8;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum FormulaError {
    #[error("Formula is empty")]
    Empty,
    #[error("Unknown element '{symbol}' at position {position}")]
    UnknownElement { symbol: String, position: usize },
    #[error("Unexpected character '{character}' at position {position}")]
    UnexpectedCharacter { character: char, position: usize },
    #[error("Unbalanced brackets at position {position}")]
    UnbalancedBrackets { position: usize },
    #[error("Invalid amount '{value}' at position {position}")]
    InvalidAmount { value: String, position: usize },
}

/// A parsed chemical formula: a multiset of elements with (possibly fractional) amounts.
///
/// Elements keep the order in which they first appear in the source text, and repeated
/// occurrences (`CH3COOH`) are merged into a single amount.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    amounts: Vec<(Element, f64)>,
}

impl Formula {
    pub fn parse(text: &str) -> Result<Self, FormulaError> {
        if text.trim().is_empty() {
            return Err(FormulaError::Empty);
        }
        let mut parser = FormulaParser {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        };
        let terms = parser.parse_sequence(None)?;

        let mut amounts: Vec<(Element, f64)> = Vec::new();
        for (element, amount) in terms {
            match amounts.iter_mut().find(|(e, _)| *e == element) {
                Some((_, total)) => *total += amount,
                None => amounts.push((element, amount)),
            }
        }
        if amounts.is_empty() {
            return Err(FormulaError::Empty);
        }
        Ok(Self { amounts })
    }

    pub fn elements(&self) -> impl Iterator<Item = Element> + '_ {
        self.amounts.iter().map(|(e, _)| *e)
    }

    pub fn amount(&self, element: &Element) -> f64 {
        self.amounts
            .iter()
            .find(|(e, _)| e == element)
            .map_or(0.0, |(_, a)| *a)
    }

    pub fn total_atoms(&self) -> f64 {
        self.amounts.iter().map(|(_, a)| a).sum()
    }

    pub fn atomic_fraction(&self, element: &Element) -> f64 {
        let total = self.total_atoms();
        if total <= 0.0 {
            return 0.0;
        }
        self.amount(element) / total
    }

    /// Returns the formula with integer amounts divided by their greatest common divisor.
    ///
    /// Formulas with non-integer amounts are returned unreduced.
    pub fn reduced_formula(&self) -> String {
        let all_integral = self
            .amounts
            .iter()
            .all(|(_, a)| (a - a.round()).abs() < INTEGER_TOLERANCE);

        let divisor = if all_integral {
            self.amounts
                .iter()
                .map(|(_, a)| a.round() as u64)
                .fold(0, gcd)
                .max(1) as f64
        } else {
            1.0
        };

        self.amounts
            .iter()
            .map(|(e, a)| format!("{}{}", e, format_amount(a / divisor)))
            .collect()
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (element, amount) in &self.amounts {
            write!(f, "{}{}", element, format_amount(*amount))?;
        }
        Ok(())
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

fn format_amount(amount: f64) -> String {
    if (amount - 1.0).abs() < INTEGER_TOLERANCE {
        String::new()
    } else if (amount - amount.round()).abs() < INTEGER_TOLERANCE {
        format!("{}", amount.round() as u64)
    } else {
        let text = format!("{:.6}", amount);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

struct FormulaParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl FormulaParser<'_> {
    fn skip_whitespace(&mut self) {
        while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    fn unexpected(&self) -> FormulaError {
        FormulaError::UnexpectedCharacter {
            character: self.text[self.pos..].chars().next().unwrap_or('\0'),
            position: self.pos,
        }
    }

    /// Parses terms until end of input or until the closing bracket of an enclosing group.
    fn parse_sequence(&mut self, open: Option<(u8, usize)>) -> Result<Vec<(Element, f64)>, FormulaError> {
        let mut terms = Vec::new();
        loop {
            self.skip_whitespace();
            let Some(&byte) = self.bytes.get(self.pos) else {
                return match open {
                    Some((_, position)) => Err(FormulaError::UnbalancedBrackets { position }),
                    None => Ok(terms),
                };
            };

            match byte {
                b'(' | b'[' => {
                    let group_start = self.pos;
                    self.pos += 1;
                    let inner = self.parse_sequence(Some((byte, group_start)))?;
                    let multiplier = self.parse_amount()?.unwrap_or(1.0);
                    terms.extend(inner.into_iter().map(|(e, a)| (e, a * multiplier)));
                }
                b')' | b']' => {
                    let expected = match open {
                        Some((b'(', _)) => b')',
                        Some((b'[', _)) => b']',
                        _ => {
                            return Err(FormulaError::UnbalancedBrackets { position: self.pos });
                        }
                    };
                    if byte != expected {
                        return Err(FormulaError::UnbalancedBrackets { position: self.pos });
                    }
                    self.pos += 1;
                    return Ok(terms);
                }
                b'A'..=b'Z' => {
                    let start = self.pos;
                    self.pos += 1;
                    while self.pos < self.bytes.len() && self.bytes[self.pos].is_ascii_lowercase() {
                        self.pos += 1;
                    }
                    let symbol = &self.text[start..self.pos];
                    let element = Element::from_symbol(symbol).map_err(|_| {
                        FormulaError::UnknownElement {
                            symbol: symbol.to_string(),
                            position: start,
                        }
                    })?;
                    let amount = self.parse_amount()?.unwrap_or(1.0);
                    terms.push((element, amount));
                }
                _ => return Err(self.unexpected()),
            }
        }
    }

    fn parse_amount(&mut self) -> Result<Option<f64>, FormulaError> {
        let start = self.pos;
        while self.pos < self.bytes.len()
            && (self.bytes[self.pos].is_ascii_digit() || self.bytes[self.pos] == b'.')
        {
            self.pos += 1;
        }
        if start == self.pos {
            return Ok(None);
        }
        let value = &self.text[start..self.pos];
        match value.parse::<f64>() {
            Ok(amount) if amount.is_finite() && amount > 0.0 => Ok(Some(amount)),
            _ => Err(FormulaError::InvalidAmount {
                value: value.to_string(),
                position: start,
            }),
        }
    }
}
