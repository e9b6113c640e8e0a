use crate::core::chemistry::system::ChemicalSystem;
use thiserror::Error;

// Barycentric membership slack: k <= 3 uses the ternary value, k >= 4 the quaternary one.
pub const TERNARY_INSIDE_TOLERANCE: f64 = 3e-3;
pub const QUATERNARY_INSIDE_TOLERANCE: f64 = 1e-5;
pub const DEGENERACY_TOLERANCE: f64 = 1e-5;
pub const BELOW_HULL_TOLERANCE: f64 = 1e-5;
pub const ON_HULL_TOLERANCE: f64 = 1e-5;

pub const DEFAULT_TOP_N: usize = 20;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub inside: f64,
    pub degenerate: f64,
}

impl Tolerances {
    pub fn new(inside: f64, degenerate: f64) -> Result<Self, ConfigError> {
        Ok(Self {
            inside: non_negative("inside_tolerance", inside)?,
            degenerate: non_negative("degeneracy_tolerance", degenerate)?,
        })
    }

    pub fn for_arity(arity: usize) -> Self {
        let inside = if arity <= 3 {
            TERNARY_INSIDE_TOLERANCE
        } else {
            QUATERNARY_INSIDE_TOLERANCE
        };
        Self {
            inside,
            degenerate: DEGENERACY_TOLERANCE,
        }
    }
}

/// An entry is promising if its Ehull is at most `threshold` or its 1-based rank is at
/// most `top_n`. A `top_n` of zero disables the rank criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionPolicy {
    pub threshold: f64,
    pub top_n: usize,
}

impl SelectionPolicy {
    pub fn for_arity(arity: usize) -> Self {
        let threshold = if arity <= 3 {
            0.0
        } else {
            QUATERNARY_INSIDE_TOLERANCE
        };
        Self {
            threshold,
            top_n: DEFAULT_TOP_N,
        }
    }

    #[inline]
    pub fn is_promising(&self, ehull: f64, rank: usize) -> bool {
        ehull <= self.threshold || rank <= self.top_n
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyConfig {
    pub system: ChemicalSystem,
    pub tolerances: Tolerances,
    pub selection: SelectionPolicy,
    pub below_hull_tolerance: f64,
    pub on_hull_tolerance: f64,
}

#[derive(Default)]
pub struct ClassifyConfigBuilder {
    system: Option<ChemicalSystem>,
    inside_tolerance: Option<f64>,
    degeneracy_tolerance: Option<f64>,
    promising_threshold: Option<f64>,
    top_n: Option<usize>,
    below_hull_tolerance: Option<f64>,
    on_hull_tolerance: Option<f64>,
}

impl ClassifyConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn system(mut self, system: ChemicalSystem) -> Self {
        self.system = Some(system);
        self
    }
    pub fn inside_tolerance(mut self, tolerance: f64) -> Self {
        self.inside_tolerance = Some(tolerance);
        self
    }
    pub fn degeneracy_tolerance(mut self, tolerance: f64) -> Self {
        self.degeneracy_tolerance = Some(tolerance);
        self
    }
    pub fn promising_threshold(mut self, threshold: f64) -> Self {
        self.promising_threshold = Some(threshold);
        self
    }
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }
    pub fn below_hull_tolerance(mut self, tolerance: f64) -> Self {
        self.below_hull_tolerance = Some(tolerance);
        self
    }
    pub fn on_hull_tolerance(mut self, tolerance: f64) -> Self {
        self.on_hull_tolerance = Some(tolerance);
        self
    }

    pub fn build(self) -> Result<ClassifyConfig, ConfigError> {
        let system = self.system.ok_or(ConfigError::MissingParameter("system"))?;
        let arity = system.arity();

        let defaults = Tolerances::for_arity(arity);
        let tolerances = Tolerances::new(
            self.inside_tolerance.unwrap_or(defaults.inside),
            self.degeneracy_tolerance.unwrap_or(defaults.degenerate),
        )?;

        let default_selection = SelectionPolicy::for_arity(arity);
        let threshold = self
            .promising_threshold
            .unwrap_or(default_selection.threshold);
        if !threshold.is_finite() {
            return Err(ConfigError::InvalidParameter {
                name: "promising_threshold",
                reason: format!("expected a finite value, got {}", threshold),
            });
        }
        let selection = SelectionPolicy {
            threshold,
            top_n: self.top_n.unwrap_or(default_selection.top_n),
        };

        Ok(ClassifyConfig {
            system,
            tolerances,
            selection,
            below_hull_tolerance: non_negative(
                "below_hull_tolerance",
                self.below_hull_tolerance.unwrap_or(BELOW_HULL_TOLERANCE),
            )?,
            on_hull_tolerance: non_negative(
                "on_hull_tolerance",
                self.on_hull_tolerance.unwrap_or(ON_HULL_TOLERANCE),
            )?,
        })
    }
}

fn non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            reason: format!("expected a finite non-negative value, got {}", value),
        })
    }
}
