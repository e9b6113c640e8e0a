use crate::core::chemistry::formula::Formula;
use crate::core::io::phases::RawPhase;
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};

#[instrument(skip_all, name = "compile_workflow", fields(records = records.len()))]
pub fn compile_energy_table(records: &[RawPhase]) -> Vec<RawPhase> {
    let mut lowest: BTreeMap<String, f64> = BTreeMap::new();

    for record in records {
        let key = match Formula::parse(&record.formula) {
            Ok(formula) => formula.reduced_formula(),
            Err(e) => {
                debug!(formula = %record.formula, error = %e, "Keeping unparsable formula verbatim.");
                record.formula.clone()
            }
        };
        lowest
            .entry(key)
            .and_modify(|energy| *energy = energy.min(record.energy_per_atom))
            .or_insert(record.energy_per_atom);
    }

    info!(
        input = records.len(),
        compositions = lowest.len(),
        "Energy table compiled."
    );

    lowest
        .into_iter()
        .map(|(formula, energy)| RawPhase::new(formula, energy))
        .collect()
}
