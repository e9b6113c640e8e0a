use std::fmt;

/// One successfully evaluated query, in ranked position.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedEntry {
    pub rank: usize,
    pub id: String,
    pub formula: String,
    pub energy_per_atom: f64,
    pub spacegroup: Option<String>,
    pub ehull: f64,
    pub facet_labels: Vec<String>,
    pub on_hull: bool,
    pub promising: bool,
}

impl RankedEntry {
    /// Spacegroup if the query carried one, otherwise the bounding facet (`A+B+C`).
    pub fn facet_or_spacegroup(&self) -> String {
        match &self.spacegroup {
            Some(sg) if !sg.is_empty() => sg.clone(),
            _ => self.facet_labels.join("+"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnresolvedReason {
    /// The formula contains elements the reference system does not span.
    OutOfSystem { elements: Vec<String> },
    /// No facet of the reference set encloses the query composition.
    NoEnclosingFacet,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfSystem { elements } => {
                write!(f, "contains elements outside the system: {}", elements.join(", "))
            }
            Self::NoEnclosingFacet => f.write_str("no reference facet encloses the composition"),
        }
    }
}

/// A query that could not be placed relative to the hull. Never ranked.
#[derive(Debug, Clone, PartialEq)]
pub struct UnresolvedQuery {
    pub id: String,
    pub formula: String,
    pub reason: UnresolvedReason,
}

/// The outcome of classifying a batch of queries against one reference set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StabilityReport {
    /// System arity k; the number of facet labels per entry.
    pub arity: usize,
    /// Compact system label (e.g. `CeCoB`).
    pub system_label: String,
    /// Entries sorted by ascending energy above hull.
    pub ranked: Vec<RankedEntry>,
    pub unresolved: Vec<UnresolvedQuery>,
    pub parse_failures: usize,
    pub below_hull: usize,
}

impl StabilityReport {
    pub fn promising(&self) -> impl Iterator<Item = &RankedEntry> {
        self.ranked.iter().filter(|e| e.promising)
    }

    pub fn promising_count(&self) -> usize {
        self.promising().count()
    }

    pub fn on_hull_count(&self) -> usize {
        self.ranked.iter().filter(|e| e.on_hull).count()
    }

    pub fn evaluated(&self) -> usize {
        self.ranked.len()
    }
}
