//! Reading and writing the text formats that surround the stability engine.
//!
//! - [`phases`] - whitespace-delimited `"<formula> <energy_per_atom>"` phase files
//! - [`queries`] - CSV query batches (`id,formula,energy_per_atom[,spacegroup]`)
//! - [`report`] - ranked `hull.dat` lines, the stability CSV table and promising-id lists
//! - [`traits`] - the shared [`traits::ReportFormat`] interface for report writers

pub mod phases;
pub mod queries;
pub mod report;
pub mod traits;
