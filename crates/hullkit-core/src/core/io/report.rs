use super::traits::ReportFormat;
use crate::core::models::report::StabilityReport;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// `hull.dat`: one `"<id>,<formula>,<ehull:.6f>,<facet_or_spacegroup>"` line per ranked
/// entry, in ascending Ehull order, preceded by a `#` header line.
pub struct HullDat;

impl ReportFormat for HullDat {
    type Error = ReportError;

    fn write_to(report: &StabilityReport, writer: &mut impl Write) -> Result<(), Self::Error> {
        writeln!(writer, "# Index,Formula,Ehull(eV/atom),Facet_or_Spacegroup")?;
        for entry in &report.ranked {
            writeln!(
                writer,
                "{},{},{:.6},{}",
                entry.id,
                entry.formula,
                entry.ehull,
                entry.facet_or_spacegroup()
            )?;
        }
        Ok(())
    }
}

/// The machine-readable stability table:
/// `Formula,Total_Energy_per_atom,Ehull,Hull_Phase1..Hull_PhaseK`.
pub struct StabilityCsv;

impl ReportFormat for StabilityCsv {
    type Error = ReportError;

    fn write_to(report: &StabilityReport, writer: &mut impl Write) -> Result<(), Self::Error> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header = vec![
            "Formula".to_string(),
            "Total_Energy_per_atom".to_string(),
            "Ehull".to_string(),
        ];
        header.extend((1..=report.arity).map(|i| format!("Hull_Phase{}", i)));
        csv_writer.write_record(&header)?;

        for entry in &report.ranked {
            let mut row = vec![
                entry.formula.clone(),
                format!("{:.6}", entry.energy_per_atom),
                format!("{:.6}", entry.ehull),
            ];
            row.extend(
                (0..report.arity).map(|i| entry.facet_labels.get(i).cloned().unwrap_or_default()),
            );
            csv_writer.write_record(&row)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Ids of the promising entries, one per line, in ranked order.
pub struct PromisingList;

impl ReportFormat for PromisingList {
    type Error = ReportError;

    fn write_to(report: &StabilityReport, writer: &mut impl Write) -> Result<(), Self::Error> {
        for entry in report.promising() {
            writeln!(writer, "{}", entry.id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::report::RankedEntry;
    use tempfile::tempdir;

    fn entry(rank: usize, id: &str, formula: &str, ehull: f64, promising: bool) -> RankedEntry {
        RankedEntry {
            rank,
            id: id.to_string(),
            formula: formula.to_string(),
            energy_per_atom: -5.0,
            spacegroup: None,
            ehull,
            facet_labels: vec!["Na".into(), "NaB".into(), "NaBC".into()],
            on_hull: ehull == 0.0,
            promising,
        }
    }

    fn sample_report() -> StabilityReport {
        let mut with_sg = entry(2, "17", "Na2BC", 0.125, false);
        with_sg.spacegroup = Some("P4/mmm".to_string());
        StabilityReport {
            arity: 3,
            system_label: "NaBC".to_string(),
            ranked: vec![entry(1, "3", "NaBC", 0.0, true), with_sg],
            ..Default::default()
        }
    }

    fn render<F: ReportFormat>(report: &StabilityReport) -> String {
        let mut buffer = Vec::new();
        F::write_to(report, &mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn hull_dat_lists_entries_in_rank_order() {
        let text = render::<HullDat>(&sample_report());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "# Index,Formula,Ehull(eV/atom),Facet_or_Spacegroup");
        assert_eq!(lines[1], "3,NaBC,0.000000,Na+NaB+NaBC");
        assert_eq!(lines[2], "17,Na2BC,0.125000,P4/mmm");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn stability_csv_has_one_phase_column_per_component() {
        let text = render::<StabilityCsv>(&sample_report());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Formula,Total_Energy_per_atom,Ehull,Hull_Phase1,Hull_Phase2,Hull_Phase3"
        );
        assert_eq!(lines[1], "NaBC,-5.000000,0.000000,Na,NaB,NaBC");
    }

    #[test]
    fn promising_list_only_contains_promising_ids() {
        let text = render::<PromisingList>(&sample_report());
        assert_eq!(text, "3\n");
    }

    #[test]
    fn write_to_path_creates_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("hull.dat");
        HullDat::write_to_path(&sample_report(), &path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("17,Na2BC,0.125000,P4/mmm"));
    }
}
