use thiserror::Error;

/// Allowed deviation of the fraction sum from one.
pub const FRACTION_SUM_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum CompositionError {
    #[error("Composition must have at least two components, got {0}")]
    TooFewComponents(usize),
    #[error("Fraction {value} at index {index} is negative or not finite")]
    InvalidFraction { index: usize, value: f64 },
    #[error("Fractions sum to {0}, expected 1")]
    NotNormalized(f64),
    #[error("Composition contains elements outside the chemical system: {elements:?}")]
    OutOfSystem { elements: Vec<String> },
}

/// A point in the (k-1)-dimensional compositional simplex of a k-element system.
///
/// Invariant: every fraction is non-negative and the fractions sum to one within
/// [`FRACTION_SUM_TOLERANCE`]. The k-th coordinate is linearly dependent on the
/// others, which is why the engine only ever works with the first k-1.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionVector {
    fractions: Vec<f64>,
}

impl CompositionVector {
    pub fn new(fractions: Vec<f64>) -> Result<Self, CompositionError> {
        if fractions.len() < 2 {
            return Err(CompositionError::TooFewComponents(fractions.len()));
        }
        if let Some((index, &value)) = fractions
            .iter()
            .enumerate()
            .find(|(_, f)| !f.is_finite() || **f < 0.0)
        {
            return Err(CompositionError::InvalidFraction { index, value });
        }
        let sum: f64 = fractions.iter().sum();
        if (sum - 1.0).abs() > FRACTION_SUM_TOLERANCE {
            return Err(CompositionError::NotNormalized(sum));
        }
        Ok(Self { fractions })
    }

    pub fn arity(&self) -> usize {
        self.fractions.len()
    }

    pub fn fractions(&self) -> &[f64] {
        &self.fractions
    }

    #[inline]
    pub fn fraction(&self, index: usize) -> f64 {
        self.fractions[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_accepts_normalized_fractions() {
        let c = CompositionVector::new(vec![0.25, 0.25, 0.5]).unwrap();
        assert_eq!(c.arity(), 3);
        assert_eq!(c.fraction(2), 0.5);
    }

    #[test]
    fn new_tolerates_small_rounding_in_sum() {
        assert!(CompositionVector::new(vec![1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0 + 5e-7]).is_ok());
    }

    #[test]
    fn new_rejects_unnormalized_fractions() {
        assert!(matches!(
            CompositionVector::new(vec![0.5, 0.6]),
            Err(CompositionError::NotNormalized(_))
        ));
    }

    #[test]
    fn new_rejects_negative_and_nan_fractions() {
        assert_eq!(
            CompositionVector::new(vec![1.5, -0.5]),
            Err(CompositionError::InvalidFraction {
                index: 1,
                value: -0.5
            })
        );
        assert!(matches!(
            CompositionVector::new(vec![f64::NAN, 1.0]),
            Err(CompositionError::InvalidFraction { index: 0, .. })
        ));
    }

    #[test]
    fn new_rejects_single_component() {
        assert_eq!(
            CompositionVector::new(vec![1.0]),
            Err(CompositionError::TooFewComponents(1))
        );
    }
}
