use super::composition::CompositionVector;

/// A known-stable phase used as a candidate hull vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferencePhase {
    pub label: String,
    pub composition: CompositionVector,
    pub energy_per_atom: f64,
}

impl ReferencePhase {
    pub fn new(label: impl Into<String>, composition: CompositionVector, energy_per_atom: f64) -> Self {
        Self {
            label: label.into(),
            composition,
            energy_per_atom,
        }
    }
}

/// A candidate whose stability is evaluated against a reference set.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPoint {
    pub label: String,
    pub composition: CompositionVector,
    pub energy_per_atom: f64,
}

impl QueryPoint {
    pub fn new(label: impl Into<String>, composition: CompositionVector, energy_per_atom: f64) -> Self {
        Self {
            label: label.into(),
            composition,
            energy_per_atom,
        }
    }

    /// Same composition, energy shifted by `delta`.
    pub fn with_energy_offset(&self, delta: f64) -> Self {
        Self {
            energy_per_atom: self.energy_per_atom + delta,
            ..self.clone()
        }
    }
}

impl From<&ReferencePhase> for QueryPoint {
    fn from(phase: &ReferencePhase) -> Self {
        Self {
            label: phase.label.clone(),
            composition: phase.composition.clone(),
            energy_per_atom: phase.energy_per_atom,
        }
    }
}
