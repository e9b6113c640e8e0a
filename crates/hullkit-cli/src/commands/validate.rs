use super::load_reference;
use crate::cli::ValidateArgs;
use crate::config::builder::build_validate_config;
use crate::error::{CliError, Result};
use hullkit::engine::error::EngineError;
use hullkit::workflows;
use tracing::info;

pub fn run(args: ValidateArgs) -> Result<()> {
    let strict = args.strict;
    let app = build_validate_config(&args)?;
    let build = load_reference(&app.reference_path, &app.system)?;
    if build.reference.is_empty() {
        return Err(EngineError::EmptyReferenceSet {
            system: app.system.to_string(),
        }
        .into());
    }

    info!(
        violation_tolerance = app.violation_tolerance,
        "Checking reference phases against the hull of the others."
    );
    let violations = workflows::validate::validate_reference(
        &build.reference,
        &app.tolerances,
        app.violation_tolerance,
    );

    if violations.is_empty() {
        println!(
            "✓ All {} reference phase(s) lie on the hull.",
            build.reference.len()
        );
        return Ok(());
    }

    println!("Reference phases above the hull of the others:");
    for violation in &violations {
        println!(
            "  {:<16} {:>10.6} eV/atom  (facet: {})",
            violation.label,
            violation.ehull,
            violation.facet_labels.join("+")
        );
    }

    if strict {
        Err(CliError::HullViolations(violations.len()))
    } else {
        Ok(())
    }
}
