use hullkit::core::chemistry::system::ChemicalSystem;
use hullkit::engine::config::{ClassifyConfig, Tolerances};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub struct OutputPaths {
    pub hull_file: PathBuf,
    pub csv_file: PathBuf,
    pub selected_file: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassifyAppConfig {
    pub reference_path: PathBuf,
    pub queries_path: PathBuf,
    pub output: OutputPaths,
    pub core_config: ClassifyConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidateAppConfig {
    pub reference_path: PathBuf,
    pub system: ChemicalSystem,
    pub tolerances: Tolerances,
    pub violation_tolerance: f64,
}
