use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSystemConfig {
    /// Dash-separated element list, e.g. `"Ce-Co-B"`.
    pub elements: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileTolerancesConfig {
    pub inside: Option<f64>,
    pub degenerate: Option<f64>,
    pub below_hull: Option<f64>,
    pub on_hull: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileSelectionConfig {
    pub threshold: Option<f64>,
    pub top_n: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOutputConfig {
    pub hull_file: Option<String>,
    pub csv_file: Option<String>,
    pub selected_file: Option<String>,
}

/// The TOML configuration file. Every section and key is optional.
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub system: Option<FileSystemConfig>,
    pub tolerances: Option<FileTolerancesConfig>,
    pub selection: Option<FileSelectionConfig>,
    pub output: Option<FileOutputConfig>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::file(path, e))?;
        Self::from_toml(&content).map_err(|e| CliError::file(path, e))
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn parses_all_sections() {
        let config = FileConfig::from_toml(
            r#"
            [system]
            elements = "Ce-Co-B"

            [tolerances]
            inside = 0.002
            degenerate = 1e-6
            below-hull = 1e-4
            on-hull = 1e-3

            [selection]
            threshold = 0.05
            top-n = 10

            [output]
            hull-file = "CeCoB_hull.dat"
            csv-file = "CeCoB.csv"
            selected-file = "picked.txt"
            "#,
        )
        .unwrap();

        assert_eq!(config.system.unwrap().elements.as_deref(), Some("Ce-Co-B"));
        let tolerances = config.tolerances.unwrap();
        assert_eq!(tolerances.inside, Some(0.002));
        assert_eq!(tolerances.below_hull, Some(1e-4));
        assert_eq!(tolerances.on_hull, Some(1e-3));
        assert_eq!(config.selection.unwrap().top_n, Some(10));
        assert_eq!(
            config.output.unwrap().selected_file.as_deref(),
            Some("picked.txt")
        );
    }

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(FileConfig::from_toml("").unwrap(), FileConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(FileConfig::from_toml("[selection]\ntop_n = 3\n").is_err());
        assert!(FileConfig::from_toml("[plotting]\nenabled = true\n").is_err());
    }

    #[test]
    fn unreadable_file_reports_its_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = FileConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, CliError::FileParsing { path: p, .. } if p == path));

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "[system\n").unwrap();
        assert!(matches!(
            FileConfig::from_file(&bad),
            Err(CliError::FileParsing { .. })
        ));
    }
}
