use super::config::Tolerances;
use super::facet::{BarycentricFit, evaluate};
use super::reference::ReferenceSet;
use crate::core::models::phase::{QueryPoint, ReferencePhase};
use itertools::Itertools;
use tracing::trace;

/// The bounding facet of a query and the query's vertical distance above it.
#[derive(Debug, Clone, PartialEq)]
pub struct HullDistance {
    /// `E_query - ê`: positive above the hull, near zero on it, negative below it.
    pub ehull: f64,
    pub facet_labels: Vec<String>,
    pub weights: Vec<f64>,
}

impl HullDistance {
    #[inline]
    pub fn is_on_hull(&self, tolerance: f64) -> bool {
        self.ehull.abs() <= tolerance
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HullVerdict {
    Found(HullDistance),
    /// No facet of the reference set encloses the query composition.
    NotFound,
}

impl HullVerdict {
    pub fn ehull(&self) -> Option<f64> {
        match self {
            Self::Found(distance) => Some(distance.ehull),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Computes the energy above hull of `query` by trying every k-phase facet of the
/// reference set.
///
/// Among all facets that enclose the query, the one giving the largest
/// `E_query - ê` is kept; on exact ties the first facet in enumeration order wins,
/// so repeated searches are bit-identical. A query with a non-finite energy, or one
/// whose arity differs from the reference system, is `NotFound`.
pub fn search(reference: &ReferenceSet, query: &QueryPoint, tolerances: &Tolerances) -> HullVerdict {
    let k = reference.arity();
    if query.composition.arity() != k {
        trace!(query = %query.label, "Query arity does not match the reference system.");
        return HullVerdict::NotFound;
    }
    if !query.energy_per_atom.is_finite() {
        trace!(query = %query.label, "Query energy is not finite.");
        return HullVerdict::NotFound;
    }

    let mut best: Option<(f64, Vec<&ReferencePhase>, BarycentricFit)> = None;
    for facet in reference.phases().iter().combinations(k) {
        let Some(fit) = evaluate(&facet, &query.composition, tolerances) else {
            continue;
        };
        let distance = query.energy_per_atom - fit.interpolated_energy;
        if best.as_ref().is_none_or(|(current, _, _)| distance > *current) {
            best = Some((distance, facet, fit));
        }
    }

    match best {
        Some((ehull, facet, fit)) => {
            trace!(query = %query.label, ehull, "Hull facet found.");
            HullVerdict::Found(HullDistance {
                ehull,
                facet_labels: facet.iter().map(|p| p.label.clone()).collect(),
                weights: fit.weights,
            })
        }
        None => {
            trace!(query = %query.label, "No enclosing facet.");
            HullVerdict::NotFound
        }
    }
}

/// Number of facets a single search enumerates: `C(phases, arity)`.
pub fn facet_count(phases: usize, arity: usize) -> u128 {
    if arity > phases {
        return 0;
    }
    let arity = arity.min(phases - arity);
    (0..arity).fold(1u128, |acc, i| acc * (phases - i) as u128 / (i + 1) as u128)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chemistry::formula::Formula;
    use crate::core::chemistry::system::ChemicalSystem;
    use crate::core::io::phases::RawPhase;
    use crate::engine::config::ON_HULL_TOLERANCE;
    use crate::engine::reference::build;

    const EPS: f64 = 1e-9;

    fn reference(system: &str, records: &[(&str, f64)]) -> ReferenceSet {
        let system: ChemicalSystem = system.parse().unwrap();
        let raw: Vec<RawPhase> = records
            .iter()
            .map(|&(formula, energy)| RawPhase::new(formula, energy))
            .collect();
        build(&raw, &system).reference
    }

    fn query(reference: &ReferenceSet, formula: &str, energy: f64) -> QueryPoint {
        let parsed: Formula = formula.parse().unwrap();
        let composition = reference.system().composition_of(&parsed).unwrap();
        QueryPoint::new(formula, composition, energy)
    }

    fn found(verdict: HullVerdict) -> HullDistance {
        match verdict {
            HullVerdict::Found(distance) => distance,
            HullVerdict::NotFound => panic!("expected a bounding facet"),
        }
    }

    fn sorted(labels: &[String]) -> Vec<&str> {
        let mut labels: Vec<&str> = labels.iter().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    fn nabc() -> ReferenceSet {
        reference(
            "Na-B-C",
            &[
                ("Na", 0.0),
                ("B", 0.0),
                ("C", 0.0),
                ("NaB", -0.2),
                ("BC", -0.4),
                ("NaBC", -0.5),
            ],
        )
    }

    #[test]
    fn binary_query_above_the_hull() {
        let reference = reference("Na-B", &[("Na", 0.0), ("B", 0.0), ("NaB", -0.5)]);
        let q = query(&reference, "NaB2", -0.1);
        let distance = found(search(&reference, &q, &Tolerances::for_arity(2)));
        assert!((distance.ehull - 7.0 / 30.0).abs() < EPS);
        assert_eq!(sorted(&distance.facet_labels), vec!["B", "NaB"]);
    }

    #[test]
    fn binary_result_is_unchanged_inside_a_ternary() {
        let reference = reference(
            "Na-B-C",
            &[("Na", 0.0), ("B", 0.0), ("C", 0.0), ("NaB", -0.5)],
        );
        let q = query(&reference, "NaB2", -0.1);
        let distance = found(search(&reference, &q, &Tolerances::for_arity(3)));
        assert!((distance.ehull - 7.0 / 30.0).abs() < EPS);
        assert_eq!(sorted(&distance.facet_labels), vec!["B", "C", "NaB"]);

        let c_index = distance.facet_labels.iter().position(|l| l == "C").unwrap();
        assert!(distance.weights[c_index].abs() < EPS);
    }

    #[test]
    fn ternary_query_above_the_hull() {
        let reference = nabc();
        let q = query(&reference, "Na2BC", -0.2);
        let distance = found(search(&reference, &q, &Tolerances::for_arity(3)));
        assert!((distance.ehull - 0.175).abs() < EPS);
        assert!(distance.facet_labels.iter().any(|l| l == "Na"));
        assert!(distance.facet_labels.iter().any(|l| l == "NaBC"));
    }

    #[test]
    fn quaternary_reference_phase_is_on_the_hull() {
        let reference = reference(
            "Li-Fe-P-O",
            &[
                ("Li", 0.0),
                ("Fe", 0.0),
                ("P", 0.0),
                ("O", 0.0),
                ("LiFePO4", -1.5),
            ],
        );
        let q = query(&reference, "LiFePO4", -1.5);
        let distance = found(search(&reference, &q, &Tolerances::for_arity(4)));
        assert!(distance.ehull.abs() < EPS);
        assert!(distance.facet_labels.iter().any(|l| l == "LiFePO4"));
    }

    #[test]
    fn arity_mismatch_is_not_found() {
        let reference = nabc();
        let foreign: ChemicalSystem = "Li-Fe-P-O".parse().unwrap();
        let composition = foreign
            .composition_of(&"LiFePO4".parse::<Formula>().unwrap())
            .unwrap();
        let q = QueryPoint::new("LiFePO4", composition, -1.0);
        assert_eq!(
            search(&reference, &q, &Tolerances::for_arity(3)),
            HullVerdict::NotFound
        );
    }

    #[test]
    fn degenerate_reference_gives_not_found() {
        let reference = reference("Na-B-C", &[("Na", 0.0), ("B", 0.0), ("NaB", -0.2)]);
        let q = query(&reference, "NaBC", -0.3);
        assert_eq!(
            search(&reference, &q, &Tolerances::for_arity(3)),
            HullVerdict::NotFound
        );
    }

    #[test]
    fn too_few_phases_gives_not_found() {
        let reference = reference("Na-B-C", &[("Na", 0.0), ("B", 0.0)]);
        let q = query(&reference, "NaB", -0.3);
        assert!(!search(&reference, &q, &Tolerances::for_arity(3)).is_found());
    }

    #[test]
    fn repeated_searches_are_identical() {
        let reference = nabc();
        let q = query(&reference, "Na2BC", -0.2);
        let tol = Tolerances::for_arity(3);
        let first = search(&reference, &q, &tol);
        for _ in 0..5 {
            let again = search(&reference, &q, &tol);
            assert_eq!(again, first);
            assert_eq!(
                again.ehull().unwrap().to_bits(),
                first.ehull().unwrap().to_bits()
            );
        }
    }

    #[test]
    fn element_order_does_not_change_ehull() {
        let records = [
            ("Na", 0.0),
            ("B", 0.0),
            ("C", 0.0),
            ("NaB", -0.2),
            ("BC", -0.4),
            ("NaBC", -0.5),
        ];
        let tol = Tolerances::for_arity(3);
        let mut results = Vec::new();
        for system in ["Na-B-C", "C-Na-B", "B-C-Na"] {
            let reference = reference(system, &records);
            let q = query(&reference, "Na2BC", -0.2);
            results.push(search(&reference, &q, &tol).ehull().unwrap());
        }
        assert!((results[0] - results[1]).abs() < EPS);
        assert!((results[0] - results[2]).abs() < EPS);
    }

    #[test]
    fn every_reference_phase_is_on_the_hull() {
        let reference = nabc();
        let tol = Tolerances::for_arity(3);
        for phase in reference.phases() {
            let q = QueryPoint::from(phase);
            let distance = found(search(&reference, &q, &tol));
            assert!(distance.ehull.abs() < EPS, "{} has ehull {}", phase.label, distance.ehull);
            assert!(distance.facet_labels.contains(&phase.label));
        }
    }

    #[test]
    fn energy_shift_shifts_ehull_equally() {
        let reference = nabc();
        let tol = Tolerances::for_arity(3);
        let q = query(&reference, "Na2BC", -0.2);
        let base = search(&reference, &q, &tol).ehull().unwrap();
        for delta in [-0.5, -0.05, 0.05, 1.0] {
            let shifted = search(&reference, &q.with_energy_offset(delta), &tol)
                .ehull()
                .unwrap();
            assert!((shifted - (base + delta)).abs() < EPS);
        }
    }

    #[test]
    fn query_below_the_hull_has_negative_ehull() {
        let reference = nabc();
        let q = query(&reference, "Na2BC", -0.5);
        let ehull = search(&reference, &q, &Tolerances::for_arity(3))
            .ehull()
            .unwrap();
        assert!((ehull + 0.125).abs() < EPS);
    }

    #[test]
    fn on_hull_check_separates_stable_from_metastable() {
        let reference = nabc();
        let tol = Tolerances::for_arity(3);
        let stable = found(search(&reference, &query(&reference, "NaBC", -0.5), &tol));
        let above = found(search(&reference, &query(&reference, "Na2BC", -0.2), &tol));
        let below = found(search(&reference, &query(&reference, "Na2BC", -0.5), &tol));

        assert!(stable.is_on_hull(ON_HULL_TOLERANCE));
        assert!(!above.is_on_hull(ON_HULL_TOLERANCE));
        assert!(!below.is_on_hull(ON_HULL_TOLERANCE));
        assert!(above.is_on_hull(0.2));
    }

    #[test]
    fn non_finite_query_energy_is_not_found() {
        let reference = reference("Na-B", &[("Na", 0.0), ("B", 0.0), ("NaB", -0.5)]);
        let tol = Tolerances::for_arity(2);
        for energy in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let q = query(&reference, "NaB2", energy);
            assert_eq!(search(&reference, &q, &tol), HullVerdict::NotFound);
        }
    }

    #[test]
    fn facet_count_is_binomial() {
        assert_eq!(facet_count(6, 3), 20);
        assert_eq!(facet_count(5, 4), 5);
        assert_eq!(facet_count(2, 3), 0);
        assert_eq!(facet_count(40, 4), 91_390);
    }
}
