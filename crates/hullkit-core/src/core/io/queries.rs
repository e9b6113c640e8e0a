use serde::Deserialize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

const REQUIRED_COLUMNS: [&str; 3] = ["id", "formula", "energy_per_atom"];

#[derive(Debug, Error)]
pub enum QueryFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error in '{path}': {source}", path = path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Query batch is missing required column '{0}'")]
    MissingColumn(&'static str),
}

/// One candidate structure of a query batch.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QueryRecord {
    pub id: String,
    pub formula: String,
    pub energy_per_atom: f64,
    #[serde(default)]
    pub spacegroup: Option<String>,
}

impl QueryRecord {
    pub fn new(id: impl Into<String>, formula: impl Into<String>, energy_per_atom: f64) -> Self {
        Self {
            id: id.into(),
            formula: formula.into(),
            energy_per_atom,
            spacegroup: None,
        }
    }

    pub fn with_spacegroup(mut self, spacegroup: impl Into<String>) -> Self {
        self.spacegroup = Some(spacegroup.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryBatch {
    pub records: Vec<QueryRecord>,
    /// 1-based file line numbers of rows that could not be deserialized.
    pub malformed_rows: Vec<usize>,
}

/// Reads a CSV query batch with a header row naming at least `id`, `formula` and
/// `energy_per_atom`; an optional `spacegroup` column is carried through to reports.
pub fn read_from(reader: impl io::Read, source_name: &Path) -> Result<QueryBatch, QueryFileError> {
    let csv_err = |source: csv::Error| QueryFileError::Csv {
        path: source_name.to_path_buf(),
        source,
    };

    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_err)?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(QueryFileError::MissingColumn(column));
        }
    }

    let mut batch = QueryBatch::default();
    for (row_idx, result) in csv_reader.deserialize::<QueryRecord>().enumerate() {
        match result {
            Ok(record) if record.energy_per_atom.is_finite() => batch.records.push(record),
            Ok(record) => {
                warn!(id = %record.id, "Skipping query with a non-finite energy.");
                batch.malformed_rows.push(row_idx + 2);
            }
            Err(e) if e.is_io_error() => return Err(csv_err(e)),
            Err(e) => {
                let line = e
                    .position()
                    .map_or(row_idx + 2, |pos| pos.line() as usize);
                warn!(line, error = %e, "Skipping malformed query row.");
                batch.malformed_rows.push(line);
            }
        }
    }
    Ok(batch)
}

pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<QueryBatch, QueryFileError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    read_from(io::BufReader::new(file), path)
}
