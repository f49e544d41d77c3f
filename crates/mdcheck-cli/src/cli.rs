use clap::{Args, Parser, Subcommand};
use mdcheck::core::units::{EnergyUnit, ForceUnit};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    version,
    about = "mdcheck - Compare potential energy decompositions and forces between molecular dynamics engines (OpenMM, Amber, CHARMM, Gromacs).",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for the per-particle force comparison.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the energy decomposition (and optionally forces) of two engines.
    Compare(CompareArgs),
    /// List the built-in term map presets, or show the labels of one preset.
    Terms(TermsArgs),
}

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    // --- Inputs ---
    /// Energy decomposition of side A (.toml or .csv).
    #[arg(long, required = true, value_name = "PATH")]
    pub energies_a: PathBuf,

    /// Energy decomposition of side B (.toml or .csv).
    #[arg(long, required = true, value_name = "PATH")]
    pub energies_b: PathBuf,

    /// Per-particle forces of side A (CSV with x,y,z columns).
    #[arg(long, value_name = "PATH")]
    pub forces_a: Option<PathBuf>,

    /// Per-particle forces of side B (CSV with x,y,z columns).
    #[arg(long, value_name = "PATH")]
    pub forces_b: Option<PathBuf>,

    /// Optional configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    // --- Sides ---
    /// Term map of side A. A preset name (e.g., 'openmm', 'amber@igb5') or a path to a TOML map.
    #[arg(long, value_name = "PRESET_OR_PATH")]
    pub map_a: Option<String>,

    /// Term map of side B. A preset name (e.g., 'charmm', 'openmm@charmm') or a path to a TOML map.
    #[arg(long, value_name = "PRESET_OR_PATH")]
    pub map_b: Option<String>,

    /// Column label for side A in the report.
    #[arg(long, value_name = "TEXT")]
    pub label_a: Option<String>,

    /// Column label for side B in the report.
    #[arg(long, value_name = "TEXT")]
    pub label_b: Option<String>,

    /// Energy unit of side A when its file does not declare one (kcal/mol or kJ/mol).
    #[arg(long, value_name = "UNIT")]
    pub unit_a: Option<EnergyUnit>,

    /// Energy unit of side B when its file does not declare one (kcal/mol or kJ/mol).
    #[arg(long, value_name = "UNIT")]
    pub unit_b: Option<EnergyUnit>,

    /// Unit of the side A force file (kcal/mol/A or kJ/mol/nm).
    #[arg(long, value_name = "UNIT")]
    pub force_unit_a: Option<ForceUnit>,

    /// Unit of the side B force file (kcal/mol/A or kJ/mol/nm).
    #[arg(long, value_name = "UNIT")]
    pub force_unit_b: Option<ForceUnit>,

    // --- Report ---
    /// Energy unit of the report. Defaults to the unit of side A.
    #[arg(long, value_name = "UNIT")]
    pub report_unit: Option<EnergyUnit>,

    /// Number of decimal places in the report.
    #[arg(long, value_name = "INT")]
    pub precision: Option<usize>,

    /// Add a column with the per-term difference A - B.
    #[arg(long)]
    pub delta: bool,

    /// Add a row with the summed canonical total of each side.
    #[arg(long)]
    pub total: bool,

    /// Number of worst-agreeing particles to list in the force section.
    #[arg(long = "worst", value_name = "INT")]
    pub worst_particles: Option<usize>,

    // --- Checks ---
    /// Relative tolerance between a side's summed total and its reported total.
    #[arg(long, value_name = "FLOAT")]
    pub total_tolerance: Option<f64>,

    /// Fail instead of warning when a summed total disagrees with the reported total.
    #[arg(long)]
    pub strict_total: bool,

    /// Set a specific configuration value, overriding the config file and flags.
    /// Can be used multiple times. Example: -S report.precision=3
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `terms` subcommand.
#[derive(Args, Debug)]
pub struct TermsArgs {
    /// Preset to show (e.g., 'gromacs', 'amber@igb8'). Lists all presets when omitted.
    #[arg(value_name = "PRESET")]
    pub preset: Option<String>,
}
