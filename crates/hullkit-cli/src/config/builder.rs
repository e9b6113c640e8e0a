use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::{ClassifyAppConfig, OutputPaths, ValidateAppConfig};
use crate::cli::{ClassifyArgs, ValidateArgs};
use crate::error::{CliError, Result};
use hullkit::core::chemistry::system::ChemicalSystem;
use hullkit::engine::config::{ClassifyConfigBuilder, Tolerances};
use hullkit::engine::error::EngineError;
use std::path::Path;
use std::str::FromStr;

pub fn build_classify_config(args: &ClassifyArgs) -> Result<ClassifyAppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = apply_set_values(load_file(args.config.as_deref())?, &args.set_values)?;

    let system = resolve_system(args.system.as_deref(), &file_config)?;

    let tolerances_file = file_config.tolerances.take().unwrap_or_default();
    let selection_file = file_config.selection.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let mut builder = ClassifyConfigBuilder::new().system(system);
    if let Some(inside) = args.inside_tolerance.or(tolerances_file.inside) {
        builder = builder.inside_tolerance(inside);
    }
    if let Some(degenerate) = args.degeneracy_tolerance.or(tolerances_file.degenerate) {
        builder = builder.degeneracy_tolerance(degenerate);
    }
    if let Some(below_hull) = tolerances_file.below_hull {
        builder = builder.below_hull_tolerance(below_hull);
    }
    if let Some(on_hull) = tolerances_file.on_hull {
        builder = builder.on_hull_tolerance(on_hull);
    }
    if let Some(threshold) = args.threshold.or(selection_file.threshold) {
        builder = builder.promising_threshold(threshold);
    }
    if let Some(top_n) = args.top_n.or(selection_file.top_n) {
        builder = builder.top_n(top_n);
    }
    let core_config = builder.build().map_err(EngineError::from)?;

    let output = OutputPaths {
        hull_file: args
            .output_dir
            .join(output_file.hull_file.unwrap_or(defaults.hull_file)),
        csv_file: args
            .output_dir
            .join(output_file.csv_file.unwrap_or(defaults.csv_file)),
        selected_file: args
            .output_dir
            .join(output_file.selected_file.unwrap_or(defaults.selected_file)),
    };

    Ok(ClassifyAppConfig {
        reference_path: args.reference.clone(),
        queries_path: args.input.clone(),
        output,
        core_config,
    })
}

pub fn build_validate_config(args: &ValidateArgs) -> Result<ValidateAppConfig> {
    let defaults = DefaultsConfig::default();
    let mut file_config = apply_set_values(load_file(args.config.as_deref())?, &args.set_values)?;

    let system = resolve_system(args.system.as_deref(), &file_config)?;
    let tolerances_file = file_config.tolerances.take().unwrap_or_default();

    let arity_defaults = Tolerances::for_arity(system.arity());
    let tolerances = Tolerances::new(
        args.inside_tolerance
            .or(tolerances_file.inside)
            .unwrap_or(arity_defaults.inside),
        args.degeneracy_tolerance
            .or(tolerances_file.degenerate)
            .unwrap_or(arity_defaults.degenerate),
    )
    .map_err(EngineError::from)?;

    let violation_tolerance = args
        .violation_tolerance
        .or(tolerances_file.below_hull)
        .unwrap_or(defaults.violation_tolerance);
    if !violation_tolerance.is_finite() || violation_tolerance < 0.0 {
        return Err(CliError::Config(format!(
            "violation-tolerance must be a finite non-negative value, got {}",
            violation_tolerance
        )));
    }

    Ok(ValidateAppConfig {
        reference_path: args.reference.clone(),
        system,
        tolerances,
        violation_tolerance,
    })
}

fn load_file(path: Option<&Path>) -> Result<FileConfig> {
    match path {
        Some(path) => FileConfig::from_file(path),
        None => Ok(FileConfig::default()),
    }
}

fn resolve_system(cli_arg: Option<&str>, file_config: &FileConfig) -> Result<ChemicalSystem> {
    let elements = cli_arg
        .or_else(|| {
            file_config
                .system
                .as_ref()
                .and_then(|s| s.elements.as_deref())
        })
        .ok_or_else(|| {
            CliError::Config(
                "A chemical system is required: pass --system or set `elements` under [system]"
                    .to_string(),
            )
        })?;
    ChemicalSystem::from_str(elements)
        .map_err(|e| CliError::Argument(format!("Invalid chemical system '{}': {}", elements, e)))
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();
        let value_str = value_str.trim();

        match key {
            "system.elements" => {
                config.system.get_or_insert_with(Default::default).elements =
                    Some(value_str.to_string());
            }
            "tolerances.inside" => {
                config.tolerances.get_or_insert_with(Default::default).inside =
                    Some(parse_value(key, value_str, "float")?);
            }
            "tolerances.degenerate" => {
                config.tolerances.get_or_insert_with(Default::default).degenerate =
                    Some(parse_value(key, value_str, "float")?);
            }
            "tolerances.below-hull" => {
                config.tolerances.get_or_insert_with(Default::default).below_hull =
                    Some(parse_value(key, value_str, "float")?);
            }
            "tolerances.on-hull" => {
                config.tolerances.get_or_insert_with(Default::default).on_hull =
                    Some(parse_value(key, value_str, "float")?);
            }
            "selection.threshold" => {
                config.selection.get_or_insert_with(Default::default).threshold =
                    Some(parse_value(key, value_str, "float")?);
            }
            "selection.top-n" => {
                config.selection.get_or_insert_with(Default::default).top_n =
                    Some(parse_value(key, value_str, "integer")?);
            }
            "output.hull-file" => {
                config.output.get_or_insert_with(Default::default).hull_file =
                    Some(value_str.to_string());
            }
            "output.csv-file" => {
                config.output.get_or_insert_with(Default::default).csv_file =
                    Some(value_str.to_string());
            }
            "output.selected-file" => {
                config.output.get_or_insert_with(Default::default).selected_file =
                    Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
