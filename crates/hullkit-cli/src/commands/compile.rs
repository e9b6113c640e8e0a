use crate::cli::CompileArgs;
use crate::error::{CliError, Result};
use hullkit::core::io::phases;
use hullkit::workflows;
use tracing::{info, warn};

pub fn run(args: CompileArgs) -> Result<()> {
    let mut records = Vec::new();
    for path in &args.input {
        info!("Reading energy records from {:?}", path);
        let file_records = phases::read_from_path(path).map_err(|e| CliError::file(path, e))?;
        if !file_records.malformed_lines.is_empty() {
            warn!(
                file = %path.display(),
                lines = ?file_records.malformed_lines,
                "Skipped malformed energy lines."
            );
        }
        records.extend(file_records.phases);
    }

    let table = workflows::compile::compile_energy_table(&records);

    if let Some(parent) = args.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    phases::write_to_path(&table, &args.output).map_err(|e| CliError::file(&args.output, e))?;

    println!(
        "✓ Compiled {} record(s) from {} file(s) into {} composition(s): {}",
        records.len(),
        args.input.len(),
        table.len(),
        args.output.display()
    );
    Ok(())
}
