use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "HullKit CLI - Rank candidate structures by their energy above the convex hull of known stable phases.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output and progress bars
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for parallel hull searches.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate a batch of candidates against a reference set and rank them by Ehull.
    Classify(ClassifyArgs),
    /// Collapse energy records into one lowest-energy line per reduced formula.
    Compile(CompileArgs),
    /// Check that every reference phase lies on the hull of the others.
    Validate(ValidateArgs),
}

/// Arguments for the `classify` subcommand.
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    // --- Core Arguments ---
    /// Reference phase file with `<formula> <energy_per_atom>` lines.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub reference: PathBuf,

    /// Query batch in CSV format (`id,formula,energy_per_atom[,spacegroup]`).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Directory that receives the report files.
    #[arg(short, long, default_value = ".", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Chemical system as dash-separated elements (e.g. 'Ce-Co-B').
    #[arg(short, long, value_name = "ELEMENTS")]
    pub system: Option<String>,

    // --- Tolerance Overrides ---
    /// Override the smallest accepted barycentric weight (as a positive slack).
    #[arg(long, value_name = "FLOAT")]
    pub inside_tolerance: Option<f64>,

    /// Override the determinant threshold below which facets are degenerate.
    #[arg(long, value_name = "FLOAT")]
    pub degeneracy_tolerance: Option<f64>,

    // --- Selection Overrides ---
    /// Override the Ehull threshold (eV/atom) for promising candidates.
    #[arg(short = 't', long, value_name = "FLOAT")]
    pub threshold: Option<f64>,

    /// Override how many top-ranked candidates are always promising (0 disables).
    #[arg(short = 'n', long, value_name = "INT")]
    pub top_n: Option<usize>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S selection.top-n=10
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `compile` subcommand.
#[derive(Args, Debug)]
pub struct CompileArgs {
    /// One or more energy files with `<formula> ... <energy_per_atom>` lines.
    #[arg(short, long, required = true, num_args(1..), value_name = "PATH")]
    pub input: Vec<PathBuf>,

    /// Output path for the compiled `<formula> <energy>` table.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Reference phase file with `<formula> <energy_per_atom>` lines.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub reference: PathBuf,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Chemical system as dash-separated elements (e.g. 'Ce-Co-B').
    #[arg(short, long, value_name = "ELEMENTS")]
    pub system: Option<String>,

    /// Override the smallest accepted barycentric weight (as a positive slack).
    #[arg(long, value_name = "FLOAT")]
    pub inside_tolerance: Option<f64>,

    /// Override the determinant threshold below which facets are degenerate.
    #[arg(long, value_name = "FLOAT")]
    pub degeneracy_tolerance: Option<f64>,

    /// Ehull (eV/atom) above which a reference phase counts as off the hull.
    #[arg(long, value_name = "FLOAT")]
    pub violation_tolerance: Option<f64>,

    /// Exit with an error if any reference phase lies above the hull.
    #[arg(long)]
    pub strict: bool,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S tolerances.inside=1e-4
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}
