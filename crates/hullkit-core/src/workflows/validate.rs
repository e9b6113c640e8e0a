use crate::core::models::phase::QueryPoint;
use crate::engine::config::Tolerances;
use crate::engine::reference::ReferenceSet;
use crate::engine::search::{HullVerdict, search};
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct HullViolation {
    pub label: String,
    pub ehull: f64,
    pub facet_labels: Vec<String>,
}

/// Phases the remaining set cannot enclose (pure elements, typically) are not violations.
#[instrument(skip_all, name = "validate_workflow", fields(system = %reference.system(), phases = reference.len()))]
pub fn validate_reference(
    reference: &ReferenceSet,
    tolerances: &Tolerances,
    violation_tolerance: f64,
) -> Vec<HullViolation> {
    let indices: Vec<usize> = (0..reference.len()).collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = indices.iter();

    #[cfg(feature = "parallel")]
    let iterator = indices.par_iter();

    let violations: Vec<HullViolation> = iterator
        .filter_map(|&index| {
            let phase = &reference.phases()[index];
            let others = reference.without(index);
            match search(&others, &QueryPoint::from(phase), tolerances) {
                HullVerdict::Found(distance) if distance.ehull > violation_tolerance => {
                    Some(HullViolation {
                        label: phase.label.clone(),
                        ehull: distance.ehull,
                        facet_labels: distance.facet_labels,
                    })
                }
                _ => None,
            }
        })
        .collect();

    for violation in &violations {
        warn!(
            phase = %violation.label,
            ehull = violation.ehull,
            "Reference phase lies above the hull of the others."
        );
    }
    info!(violations = violations.len(), "Reference validation complete.");

    violations
}
