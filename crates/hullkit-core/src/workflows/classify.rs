use crate::core::chemistry::formula::Formula;
use crate::core::io::queries::QueryRecord;
use crate::core::models::composition::CompositionError;
use crate::core::models::phase::QueryPoint;
use crate::core::models::report::{RankedEntry, StabilityReport, UnresolvedQuery, UnresolvedReason};
use crate::engine::config::ClassifyConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::reference::ReferenceSet;
use crate::engine::search::{HullVerdict, facet_count, search};
use tracing::{debug, info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

enum Prepared<'q> {
    Ready {
        record: &'q QueryRecord,
        point: QueryPoint,
    },
    Unresolved(UnresolvedQuery),
}

/// Unparsable formulas are counted and skipped, queries that cannot be placed are listed
/// as unresolved, and neither stops the batch.
#[instrument(skip_all, name = "classify_workflow", fields(system = %config.system, queries = queries.len()))]
pub fn classify_batch(
    reference: &ReferenceSet,
    queries: &[QueryRecord],
    config: &ClassifyConfig,
    reporter: &ProgressReporter,
) -> Result<StabilityReport, EngineError> {
    if reference.system() != &config.system {
        return Err(EngineError::SystemMismatch {
            expected: config.system.to_string(),
            found: reference.system().to_string(),
        });
    }
    if reference.is_empty() {
        return Err(EngineError::EmptyReferenceSet {
            system: config.system.to_string(),
        });
    }

    // === Phase 1: Query preparation ===
    let (prepared, parse_failures) =
        reporter.in_phase("Preparation", || prepare_queries(queries, config));

    let mut report = StabilityReport {
        arity: config.system.arity(),
        system_label: config.system.compact_label(),
        parse_failures,
        ..Default::default()
    };

    let mut ready = Vec::with_capacity(prepared.len());
    for item in prepared {
        match item {
            Prepared::Ready { record, point } => ready.push((record, point)),
            Prepared::Unresolved(unresolved) => report.unresolved.push(unresolved),
        }
    }

    // === Phase 2: Hull search ===
    debug!(
        reference_phases = reference.len(),
        facets_per_query = %facet_count(reference.len(), reference.arity()),
        "Enumerating hull facets."
    );
    let verdicts = reporter.in_phase("Hull Search", || {
        search_all(reference, &ready, config, reporter)
    });

    // === Phase 3: Ranking ===
    reporter.in_phase("Ranking", || {
        for ((record, _), verdict) in ready.iter().zip(verdicts) {
            match verdict {
                HullVerdict::Found(distance) => {
                    let on_hull = distance.is_on_hull(config.on_hull_tolerance);
                    report.ranked.push(RankedEntry {
                        rank: 0,
                        id: record.id.clone(),
                        formula: record.formula.clone(),
                        energy_per_atom: record.energy_per_atom,
                        spacegroup: record.spacegroup.clone(),
                        ehull: distance.ehull,
                        facet_labels: distance.facet_labels,
                        on_hull,
                        promising: false,
                    })
                }
                HullVerdict::NotFound => report.unresolved.push(UnresolvedQuery {
                    id: record.id.clone(),
                    formula: record.formula.clone(),
                    reason: UnresolvedReason::NoEnclosingFacet,
                }),
            }
        }
        rank_entries(&mut report, config);
    });

    reporter.report(Progress::Message(format!(
        "{} on hull, {} off hull, {} unresolved",
        report.on_hull_count(),
        report.evaluated() - report.on_hull_count(),
        report.unresolved.len()
    )));

    info!(
        evaluated = report.evaluated(),
        on_hull = report.on_hull_count(),
        promising = report.promising_count(),
        unresolved = report.unresolved.len(),
        parse_failures = report.parse_failures,
        below_hull = report.below_hull,
        "Classification complete."
    );

    Ok(report)
}

fn prepare_queries<'q>(
    queries: &'q [QueryRecord],
    config: &ClassifyConfig,
) -> (Vec<Prepared<'q>>, usize) {
    let mut prepared = Vec::with_capacity(queries.len());
    let mut parse_failures = 0;

    for record in queries {
        let formula = match Formula::parse(&record.formula) {
            Ok(formula) => formula,
            Err(e) => {
                warn!(id = %record.id, formula = %record.formula, error = %e, "Skipping query with an unparsable formula.");
                parse_failures += 1;
                continue;
            }
        };
        if !record.energy_per_atom.is_finite() {
            warn!(id = %record.id, "Skipping query with a non-finite energy.");
            parse_failures += 1;
            continue;
        }

        match config.system.composition_of(&formula) {
            Ok(composition) => prepared.push(Prepared::Ready {
                record,
                point: QueryPoint::new(record.id.clone(), composition, record.energy_per_atom),
            }),
            Err(CompositionError::OutOfSystem { elements }) => {
                debug!(id = %record.id, ?elements, "Query lies outside the system.");
                prepared.push(Prepared::Unresolved(UnresolvedQuery {
                    id: record.id.clone(),
                    formula: record.formula.clone(),
                    reason: UnresolvedReason::OutOfSystem { elements },
                }));
            }
            Err(e) => {
                warn!(id = %record.id, error = %e, "Skipping query with an invalid composition.");
                parse_failures += 1;
            }
        }
    }

    (prepared, parse_failures)
}

fn search_all(
    reference: &ReferenceSet,
    ready: &[(&QueryRecord, QueryPoint)],
    config: &ClassifyConfig,
    reporter: &ProgressReporter,
) -> Vec<HullVerdict> {
    if ready.is_empty() {
        return Vec::new();
    }

    reporter.report(Progress::TaskStart {
        total_steps: ready.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = ready.iter();

    #[cfg(feature = "parallel")]
    let iterator = ready.par_iter();

    let verdicts = iterator
        .map(|(_, point)| {
            let verdict = search(reference, point, &config.tolerances);
            reporter.report(Progress::TaskIncrement);
            verdict
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    verdicts
}

// Ties in Ehull are ordered by id.
fn rank_entries(report: &mut StabilityReport, config: &ClassifyConfig) {
    report.ranked.sort_by(|a, b| {
        a.ehull
            .total_cmp(&b.ehull)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut below_hull = 0;
    for (index, entry) in report.ranked.iter_mut().enumerate() {
        entry.rank = index + 1;
        entry.promising = config.selection.is_promising(entry.ehull, entry.rank);
        if entry.ehull < -config.below_hull_tolerance {
            warn!(
                id = %entry.id,
                formula = %entry.formula,
                ehull = entry.ehull,
                "Query lies below the reference hull; the reference set may be incomplete."
            );
            below_hull += 1;
        }
    }
    report.below_hull = below_hull;
}
