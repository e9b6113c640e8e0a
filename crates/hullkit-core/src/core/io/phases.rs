use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum PhaseFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Failed to open phase file '{path}': {source}", path = path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A `(formula, energy_per_atom)` record as it appears in a phase file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPhase {
    pub formula: String,
    pub energy_per_atom: f64,
}

impl RawPhase {
    pub fn new(formula: impl Into<String>, energy_per_atom: f64) -> Self {
        Self {
            formula: formula.into(),
            energy_per_atom,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseRecords {
    pub phases: Vec<RawPhase>,
    /// 1-based line numbers that could not be interpreted.
    pub malformed_lines: Vec<usize>,
}

/// Reads a phase file: one record per line, first token the formula, last token the
/// energy per atom. Tokens may be separated by whitespace or commas. Blank lines and
/// lines starting with `#` are ignored.
///
/// Malformed lines are skipped and reported in [`PhaseRecords::malformed_lines`];
/// only I/O failures are errors.
pub fn read_from(reader: &mut impl BufRead) -> Result<PhaseRecords, PhaseFileError> {
    let mut records = PhaseRecords::default();

    for (line_num, line_res) in reader.lines().enumerate() {
        let line = line_res?;
        let line_num = line_num + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let normalized = trimmed.replace(',', " ");
        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        if tokens.len() < 2 {
            warn!(line = line_num, "Skipping phase line without an energy column.");
            records.malformed_lines.push(line_num);
            continue;
        }

        let energy_str = tokens[tokens.len() - 1];
        match energy_str.parse::<f64>() {
            Ok(energy) if energy.is_finite() => {
                records.phases.push(RawPhase::new(tokens[0], energy));
            }
            _ => {
                warn!(
                    line = line_num,
                    value = energy_str,
                    "Skipping phase line with an unparsable energy."
                );
                records.malformed_lines.push(line_num);
            }
        }
    }
    Ok(records)
}

pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<PhaseRecords, PhaseFileError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| PhaseFileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    read_from(&mut reader)
}

/// Writes records as `"<formula> <energy:.6f>"` lines.
pub fn write_to(phases: &[RawPhase], writer: &mut impl Write) -> Result<(), PhaseFileError> {
    for phase in phases {
        writeln!(writer, "{} {:.6}", phase.formula, phase.energy_per_atom)?;
    }
    Ok(())
}

pub fn write_to_path<P: AsRef<Path>>(phases: &[RawPhase], path: P) -> Result<(), PhaseFileError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(phases, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn reads_whitespace_delimited_records() {
        let content = "Na -1.312\nB -6.679\nNaB3C -6.153\n";
        let records = read_from(&mut Cursor::new(content)).unwrap();
        assert_eq!(
            records.phases,
            vec![
                RawPhase::new("Na", -1.312),
                RawPhase::new("B", -6.679),
                RawPhase::new("NaB3C", -6.153),
            ]
        );
        assert!(records.malformed_lines.is_empty());
    }

    #[test]
    fn uses_first_and_last_tokens_and_accepts_commas() {
        let content = "Ce2Co17B mp-1234 -7.5\nCo,-7.1\n";
        let records = read_from(&mut Cursor::new(content)).unwrap();
        assert_eq!(records.phases[0], RawPhase::new("Ce2Co17B", -7.5));
        assert_eq!(records.phases[1], RawPhase::new("Co", -7.1));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let content = "# formula energy\n\n   \nFe -8.3\n";
        let records = read_from(&mut Cursor::new(content)).unwrap();
        assert_eq!(records.phases.len(), 1);
        assert!(records.malformed_lines.is_empty());
    }

    #[test]
    fn reports_malformed_lines_without_failing() {
        let content = "Fe -8.3\nOnlyFormula\nNi abc\nCo nan\nO -4.9\n";
        let records = read_from(&mut Cursor::new(content)).unwrap();
        assert_eq!(records.phases.len(), 2);
        assert_eq!(records.malformed_lines, vec![2, 3, 4]);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let dir = tempdir().unwrap();
        let result = read_from_path(dir.path().join("missing.dat"));
        assert!(matches!(result, Err(PhaseFileError::Open { .. })));
    }

    #[test]
    fn written_records_can_be_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stable.dat");
        let phases = vec![RawPhase::new("NaC", -3.25), RawPhase::new("B", -6.679)];

        write_to_path(&phases, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "NaC -3.250000\nB -6.679000\n");
        let records = read_from_path(&path).unwrap();
        assert_eq!(records.phases, phases);
    }
}
