use super::config::Tolerances;
use crate::core::models::composition::CompositionVector;
use crate::core::models::phase::ReferencePhase;
use nalgebra::{DMatrix, DVector};

/// Barycentric coordinates of a query inside one facet and the energy they interpolate.
#[derive(Debug, Clone, PartialEq)]
pub struct BarycentricFit {
    /// One weight per facet phase, summing to one.
    pub weights: Vec<f64>,
    /// `Σ weights[i] * facet[i].energy_per_atom`.
    pub interpolated_energy: f64,
}

/// Tests whether `query` lies inside the simplex spanned by the k phases of `facet`.
///
/// Only the first k-1 composition coordinates are used; the last one is implied by
/// normalization. Returns `None` when the facet is degenerate (its difference matrix
/// has `|det| <= tolerances.degenerate`), when the barycentric system is singular, when
/// any weight is below `-tolerances.inside`, or when the arities do not agree.
pub fn evaluate(
    facet: &[&ReferencePhase],
    query: &CompositionVector,
    tolerances: &Tolerances,
) -> Option<BarycentricFit> {
    let k = query.arity();
    if k < 2 || facet.len() != k || facet.iter().any(|p| p.composition.arity() != k) {
        return None;
    }
    let dim = k - 1;

    let origin = &facet[0].composition;
    let spread = DMatrix::from_fn(dim, dim, |row, col| {
        facet[col + 1].composition.fraction(row) - origin.fraction(row)
    });
    let det = spread.determinant();
    if !det.is_finite() || det.abs() <= tolerances.degenerate {
        return None;
    }

    let system = DMatrix::from_fn(k, k, |row, col| {
        if row < dim {
            facet[col].composition.fraction(row)
        } else {
            1.0
        }
    });
    let rhs = DVector::from_fn(k, |row, _| if row < dim { query.fraction(row) } else { 1.0 });
    let weights = system.lu().solve(&rhs)?;

    if weights.iter().any(|w| !w.is_finite() || *w < -tolerances.inside) {
        return None;
    }

    let interpolated_energy = weights
        .iter()
        .zip(facet)
        .map(|(w, phase)| w * phase.energy_per_atom)
        .sum();

    Some(BarycentricFit {
        weights: weights.iter().copied().collect(),
        interpolated_energy,
    })
}
