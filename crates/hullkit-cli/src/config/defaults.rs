use hullkit::engine::config::BELOW_HULL_TOLERANCE;

pub struct DefaultsConfig {
    pub hull_file: String,
    pub csv_file: String,
    pub selected_file: String,
    pub violation_tolerance: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            hull_file: "hull.dat".to_string(),
            csv_file: "stability.csv".to_string(),
            selected_file: "selected.txt".to_string(),
            violation_tolerance: BELOW_HULL_TOLERANCE,
        }
    }
}
