use crate::core::models::report::StabilityReport;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Defines the interface for serializing a [`StabilityReport`] into a text format.
///
/// Implementors only provide [`ReportFormat::write_to`]; writing to a path opens,
/// buffers and flushes the file within the call.
pub trait ReportFormat {
    /// The error type for write operations.
    type Error: Error + From<io::Error>;

    /// Writes the report to a writer.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the underlying writer fails.
    fn write_to(report: &StabilityReport, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Writes the report to a file path, creating or truncating the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(report: &StabilityReport, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(report, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
