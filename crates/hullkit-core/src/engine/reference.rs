use crate::core::chemistry::formula::Formula;
use crate::core::chemistry::system::ChemicalSystem;
use crate::core::io::phases::RawPhase;
use crate::core::models::composition::CompositionError;
use crate::core::models::phase::ReferencePhase;
use tracing::{debug, info, instrument, warn};

/// The known-stable phases of one chemical system, in input order.
///
/// Built once and shared read-only by every query evaluation. Duplicate compositions
/// are kept as given.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSet {
    system: ChemicalSystem,
    phases: Vec<ReferencePhase>,
}

impl ReferenceSet {
    /// Wraps phases whose compositions are already expressed over `system`.
    pub fn new(system: ChemicalSystem, phases: Vec<ReferencePhase>) -> Self {
        Self { system, phases }
    }

    pub fn system(&self) -> &ChemicalSystem {
        &self.system
    }

    pub fn phases(&self) -> &[ReferencePhase] {
        &self.phases
    }

    pub fn arity(&self) -> usize {
        self.system.arity()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    /// A copy of this set with the phase at `index` removed.
    pub fn without(&self, index: usize) -> Self {
        let phases = self
            .phases
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != index)
            .map(|(_, phase)| phase.clone())
            .collect();
        Self {
            system: self.system.clone(),
            phases,
        }
    }
}

/// The outcome of [`build`]: the accepted reference set plus skip counts.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceBuild {
    pub reference: ReferenceSet,
    pub skipped_unparsable: usize,
    pub skipped_out_of_system: usize,
}

/// Keeps the phases whose formulas lie entirely within `system` and converts them to
/// composition vectors over its elements.
///
/// Unparsable formulas and non-finite energies are skipped with a warning; phases with
/// elements outside the system are skipped silently (they are expected when a phase
/// file covers a larger system). Neither aborts the build.
#[instrument(skip_all, name = "reference_build", fields(system = %system))]
pub fn build(raw_phases: &[RawPhase], system: &ChemicalSystem) -> ReferenceBuild {
    let mut phases = Vec::new();
    let mut skipped_unparsable = 0;
    let mut skipped_out_of_system = 0;

    for raw in raw_phases {
        if !raw.energy_per_atom.is_finite() {
            warn!(formula = %raw.formula, "Skipping reference phase with a non-finite energy.");
            skipped_unparsable += 1;
            continue;
        }

        let formula = match Formula::parse(&raw.formula) {
            Ok(formula) => formula,
            Err(e) => {
                warn!(formula = %raw.formula, error = %e, "Skipping unparsable reference formula.");
                skipped_unparsable += 1;
                continue;
            }
        };

        match system.composition_of(&formula) {
            Ok(composition) => phases.push(ReferencePhase::new(
                raw.formula.clone(),
                composition,
                raw.energy_per_atom,
            )),
            Err(CompositionError::OutOfSystem { elements }) => {
                debug!(formula = %raw.formula, ?elements, "Phase lies outside the system.");
                skipped_out_of_system += 1;
            }
            Err(e) => {
                warn!(formula = %raw.formula, error = %e, "Skipping reference phase with an invalid composition.");
                skipped_unparsable += 1;
            }
        }
    }

    info!(
        accepted = phases.len(),
        skipped_unparsable, skipped_out_of_system, "Reference set built."
    );

    ReferenceBuild {
        reference: ReferenceSet::new(system.clone(), phases),
        skipped_unparsable,
        skipped_out_of_system,
    }
}
