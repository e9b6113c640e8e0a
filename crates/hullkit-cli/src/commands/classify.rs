use super::load_reference;
use crate::cli::ClassifyArgs;
use crate::config::builder::build_classify_config;
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use hullkit::core::io::queries;
use hullkit::core::io::report::{HullDat, PromisingList, StabilityCsv};
use hullkit::core::io::traits::ReportFormat;
use hullkit::core::models::report::StabilityReport;
use hullkit::engine::progress::ProgressReporter;
use hullkit::workflows;
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: ClassifyArgs, show_progress: bool) -> Result<()> {
    let app = build_classify_config(&args)?;
    let config = &app.core_config;
    info!(
        system = %config.system,
        inside = config.tolerances.inside,
        degenerate = config.tolerances.degenerate,
        "Configuration resolved."
    );

    let build = load_reference(&app.reference_path, &config.system)?;

    info!("Loading queries from {:?}", &app.queries_path);
    let batch = queries::read_from_path(&app.queries_path)
        .map_err(|e| CliError::file(&app.queries_path, e))?;

    let progress_handler = CliProgressHandler::new(show_progress);
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Evaluating {} quer{} against the {} hull...",
        batch.records.len(),
        if batch.records.len() == 1 { "y" } else { "ies" },
        config.system
    );
    let mut report =
        workflows::classify::classify_batch(&build.reference, &batch.records, config, &reporter)?;
    report.parse_failures += batch.malformed_rows.len();

    for unresolved in &report.unresolved {
        info!(id = %unresolved.id, formula = %unresolved.formula, reason = %unresolved.reason, "Unresolved query.");
    }

    write_reports(&report, &app.output.hull_file, &app.output.csv_file, &app.output.selected_file)?;
    print_summary(&report);
    Ok(())
}

fn write_reports(
    report: &StabilityReport,
    hull_file: &Path,
    csv_file: &Path,
    selected_file: &Path,
) -> Result<()> {
    for path in [hull_file, csv_file, selected_file] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
    }

    HullDat::write_to_path(report, hull_file).map_err(|e| CliError::file(hull_file, e))?;
    StabilityCsv::write_to_path(report, csv_file).map_err(|e| CliError::file(csv_file, e))?;
    PromisingList::write_to_path(report, selected_file)
        .map_err(|e| CliError::file(selected_file, e))?;

    println!("✓ Ranked hull distances written to: {}", hull_file.display());
    println!("✓ Stability table written to: {}", csv_file.display());
    println!("✓ Promising ids written to: {}", selected_file.display());
    Ok(())
}

fn print_summary(report: &StabilityReport) {
    println!(
        "{} evaluated, {} on hull, {} promising, {} unresolved, {} skipped as unparsable.",
        report.evaluated(),
        report.on_hull_count(),
        report.promising_count(),
        report.unresolved.len(),
        report.parse_failures
    );
    if report.below_hull > 0 {
        warn!(
            count = report.below_hull,
            "Some queries lie below the reference hull."
        );
        println!(
            "Warning: {} quer{} below the reference hull; the reference set may be incomplete.",
            report.below_hull,
            if report.below_hull == 1 { "y lies" } else { "ies lie" }
        );
    }
    if let Some(best) = report.ranked.first() {
        println!(
            "Lowest Ehull: {} ({}) at {:.6} eV/atom",
            best.id, best.formula, best.ehull
        );
    }
}
