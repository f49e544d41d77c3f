mod defaults;
mod models;

pub use defaults::DefaultsConfig;
pub use models::{CompareConfig, SideConfig};

use crate::cli::CompareArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use mdcheck::core::terms::map::CanonicalTermMap;
use mdcheck::core::terms::presets::preset;
use mdcheck::core::units::{EnergyUnit, ForceUnit};
use mdcheck::engine::config::ComparisonConfigBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialSideConfig {
    label: Option<String>,
    map: Option<String>,
    unit: Option<EnergyUnit>,
    force_unit: Option<ForceUnit>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialReportConfig {
    precision: Option<usize>,
    delta: Option<bool>,
    total: Option<bool>,
    unit: Option<EnergyUnit>,
    worst_particles: Option<usize>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct PartialChecksConfig {
    total_tolerance: Option<f64>,
    strict_total: Option<bool>,
}

/// The `compare` configuration as read from a TOML file, before CLI overrides.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialCompareConfig {
    a: Option<PartialSideConfig>,
    b: Option<PartialSideConfig>,
    report: Option<PartialReportConfig>,
    checks: Option<PartialChecksConfig>,
}

impl PartialCompareConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Layers CLI flags and then `--set` values over the file contents and resolves
    /// term maps, labels and units for both sides.
    pub fn merge_with_cli(mut self, args: &CompareArgs) -> Result<CompareConfig> {
        self.apply_cli_args(args);
        self.apply_set_values(&args.set_values)?;

        let defaults = DefaultsConfig::default();
        let side_a = resolve_side(
            "a",
            self.a.take().unwrap_or_default(),
            &args.energies_a,
            args.forces_a.as_ref(),
        )?;
        let side_b = resolve_side(
            "b",
            self.b.take().unwrap_or_default(),
            &args.energies_b,
            args.forces_b.as_ref(),
        )?;
        let report = self.report.take().unwrap_or_default();
        let checks = self.checks.take().unwrap_or_default();

        let mut builder = ComparisonConfigBuilder::new()
            .label_a(side_a.label.clone())
            .label_b(side_b.label.clone())
            .precision(report.precision.unwrap_or(defaults.precision))
            .show_delta(report.delta.unwrap_or(defaults.show_delta))
            .include_total(report.total.unwrap_or(defaults.include_total))
            .worst_particles(report.worst_particles.unwrap_or(defaults.worst_particles))
            .total_tolerance(checks.total_tolerance.unwrap_or(defaults.total_tolerance))
            .strict_total(checks.strict_total.unwrap_or(defaults.strict_total));
        if let Some(unit) = report.unit {
            builder = builder.report_unit(unit);
        }
        let comparison = builder.build().map_err(|e| CliError::Config(e.to_string()))?;

        Ok(CompareConfig {
            a: side_a,
            b: side_b,
            comparison,
        })
    }

    fn apply_cli_args(&mut self, args: &CompareArgs) {
        let a = self.a.get_or_insert_with(Default::default);
        overlay(&mut a.label, &args.label_a);
        overlay(&mut a.map, &args.map_a);
        overlay(&mut a.unit, &args.unit_a);
        overlay(&mut a.force_unit, &args.force_unit_a);

        let b = self.b.get_or_insert_with(Default::default);
        overlay(&mut b.label, &args.label_b);
        overlay(&mut b.map, &args.map_b);
        overlay(&mut b.unit, &args.unit_b);
        overlay(&mut b.force_unit, &args.force_unit_b);

        let report = self.report.get_or_insert_with(Default::default);
        overlay(&mut report.precision, &args.precision);
        overlay(&mut report.unit, &args.report_unit);
        overlay(&mut report.worst_particles, &args.worst_particles);
        if args.delta {
            report.delta = Some(true);
        }
        if args.total {
            report.total = Some(true);
        }

        let checks = self.checks.get_or_insert_with(Default::default);
        overlay(&mut checks.total_tolerance, &args.total_tolerance);
        if args.strict_total {
            checks.strict_total = Some(true);
        }
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;
            let (section, field) = key
                .split_once('.')
                .ok_or_else(|| unsupported_key(key))?;

            match section {
                "a" | "b" => {
                    let side = if section == "a" {
                        self.a.get_or_insert_with(Default::default)
                    } else {
                        self.b.get_or_insert_with(Default::default)
                    };
                    match field {
                        "label" => side.label = Some(value.to_string()),
                        "map" => side.map = Some(value.to_string()),
                        "unit" => side.unit = Some(parse_set_value(key, value)?),
                        "force-unit" => side.force_unit = Some(parse_set_value(key, value)?),
                        _ => return Err(unsupported_key(key)),
                    }
                }
                "report" => {
                    let report = self.report.get_or_insert_with(Default::default);
                    match field {
                        "precision" => report.precision = Some(parse_set_value(key, value)?),
                        "delta" => report.delta = Some(parse_set_value(key, value)?),
                        "total" => report.total = Some(parse_set_value(key, value)?),
                        "unit" => report.unit = Some(parse_set_value(key, value)?),
                        "worst-particles" => {
                            report.worst_particles = Some(parse_set_value(key, value)?)
                        }
                        _ => return Err(unsupported_key(key)),
                    }
                }
                "checks" => {
                    let checks = self.checks.get_or_insert_with(Default::default);
                    match field {
                        "total-tolerance" => {
                            checks.total_tolerance = Some(parse_set_value(key, value)?)
                        }
                        "strict-total" => checks.strict_total = Some(parse_set_value(key, value)?),
                        _ => return Err(unsupported_key(key)),
                    }
                }
                _ => return Err(unsupported_key(key)),
            }
        }
        Ok(())
    }
}

fn overlay<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

fn parse_set_value<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| CliError::Config(format!("Invalid value for {}: {}", key, value)))
}

fn unsupported_key(key: &str) -> CliError {
    CliError::Config(format!("Unsupported configuration key for --set: '{}'", key))
}

fn resolve_side(
    key: &str,
    partial: PartialSideConfig,
    energies: &Path,
    forces: Option<&PathBuf>,
) -> Result<SideConfig> {
    let map_spec = partial.map.ok_or_else(|| {
        CliError::Config(format!(
            "A term map for side '{key}' is required either via --map-{key} or `[{key}] map` in the config file."
        ))
    })?;
    let (term_map, default_label) = resolve_term_map(&map_spec)?;

    let forces = match forces {
        Some(path) => {
            let unit = partial
                .force_unit
                .or(term_map.force_unit())
                .ok_or_else(|| {
                    CliError::Config(format!(
                        "The force unit of side '{key}' is unknown. Pass --force-unit-{key} or declare `force-unit` in the term map."
                    ))
                })?;
            Some((path.clone(), unit))
        }
        None => None,
    };

    Ok(SideConfig {
        label: partial.label.unwrap_or(default_label),
        energies: energies.to_path_buf(),
        energy_unit: partial.unit.or(term_map.energy_unit()),
        forces,
        term_map,
    })
}

/// Resolves a term map given either as a TOML path or as a preset name.
///
/// Returns the map together with the label used when none is configured.
fn resolve_term_map(name_or_path: &str) -> Result<(CanonicalTermMap, String)> {
    let path = Path::new(name_or_path);
    let looks_like_path = path.is_absolute()
        || name_or_path.contains(['/', '\\'])
        || name_or_path.to_ascii_lowercase().ends_with(".toml");

    if looks_like_path {
        if !path.exists() {
            return Err(CliError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Provided path does not exist: {}", name_or_path),
            )));
        }
        let map = CanonicalTermMap::load(path).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        let label = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| name_or_path.to_string());
        return Ok((map, label));
    }

    let parsed =
        parser::parse_preset_name(name_or_path).map_err(|e| CliError::Argument(e.to_string()))?;
    let map = preset(parsed.engine, parsed.variant).map_err(|e| CliError::Argument(e.to_string()))?;
    Ok((map, parsed.engine.display_name().to_string()))
}
