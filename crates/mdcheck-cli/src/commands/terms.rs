use crate::cli::TermsArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use mdcheck::core::terms::map::TermTarget;
use mdcheck::core::terms::presets::{Engine, PresetVariant, preset};
use mdcheck::core::terms::solvent::ImplicitSolventModel;

pub fn run(args: TermsArgs) -> Result<()> {
    let lines = match args.preset.as_deref() {
        Some(name) => describe_preset(name)?,
        None => list_presets(),
    };
    for line in lines {
        println!("{line}");
    }
    Ok(())
}

fn list_presets() -> Vec<String> {
    let mut lines = vec![format!(
        "{:<10} {:<10} {:<10} {}",
        "Preset", "Engine", "Energy", "Force"
    )];
    lines.extend(Engine::ALL.iter().map(|engine| {
        format!(
            "{:<10} {:<10} {:<10} {}",
            engine.name(),
            engine.display_name(),
            engine.native_energy_unit(),
            engine.native_force_unit()
        )
    }));

    lines.push(String::new());
    lines.push("Amber implicit-solvent variants (amber@igbN, amber@gas):".to_string());
    lines.extend(
        ImplicitSolventModel::ALL
            .iter()
            .map(|model| format!("  amber@igb{:<3} {}", model.igb(), model.name())),
    );

    lines.push(String::new());
    lines.push("OpenMM system built from CHARMM files:".to_string());
    lines.push(format!(
        "  openmm@charmm  {}; pair with 'charmm'",
        PresetVariant::CharmmSystem
    ));
    lines
}

fn describe_preset(name: &str) -> Result<Vec<String>> {
    let parsed = parser::parse_preset_name(name).map_err(|e| CliError::Argument(e.to_string()))?;
    let map = preset(parsed.engine, parsed.variant).map_err(|e| CliError::Argument(e.to_string()))?;

    let mut lines = vec![match parsed.variant {
        Some(variant) => format!("{} with {variant}", parsed.engine.display_name()),
        None => parsed.engine.display_name().to_string(),
    }];
    if let Some(unit) = map.energy_unit() {
        lines.push(format!("Energy unit: {unit}"));
    }
    if let Some(unit) = map.force_unit() {
        lines.push(format!("Force unit:  {unit}"));
    }

    lines.push(String::new());
    lines.extend(map.sorted_entries().into_iter().map(|(label, target)| {
        let target = match target {
            TermTarget::Term(term) => term.name().to_string(),
            TermTarget::Ignore => "(ignored)".to_string(),
        };
        format!("  {label:<28} {target}")
    }));
    Ok(lines)
}
