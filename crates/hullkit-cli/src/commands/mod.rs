pub mod classify;
pub mod compile;
pub mod validate;

use crate::error::{CliError, Result};
use hullkit::core::chemistry::system::ChemicalSystem;
use hullkit::core::io::phases;
use hullkit::engine::reference::{self, ReferenceBuild};
use std::path::Path;
use tracing::{info, warn};

/// Reads a phase file and keeps the phases that belong to `system`.
fn load_reference(path: &Path, system: &ChemicalSystem) -> Result<ReferenceBuild> {
    info!("Loading reference phases from {:?}", path);
    let records = phases::read_from_path(path).map_err(|e| CliError::file(path, e))?;
    if !records.malformed_lines.is_empty() {
        warn!(
            lines = ?records.malformed_lines,
            "Skipped malformed lines in the reference file."
        );
    }

    let build = reference::build(&records.phases, system);
    println!(
        "Reference set: {} phase(s) in {} ({} outside the system, {} unparsable, {} malformed line(s))",
        build.reference.len(),
        system,
        build.skipped_out_of_system,
        build.skipped_unparsable,
        records.malformed_lines.len()
    );
    Ok(build)
}
