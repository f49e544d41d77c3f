use mdcheck::core::terms::presets::{Engine, PresetVariant};
use mdcheck::core::terms::solvent::ImplicitSolventModel;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown engine '{0}' in preset name. Expected 'openmm', 'amber', 'charmm' or 'gromacs'.")]
    UnknownEngine(String),

    #[error("Invalid preset variant in '{0}'. Expected 'amber@igbN', 'amber@gas' or 'openmm@charmm'.")]
    InvalidVariant(String),

    #[error("Unsupported Amber igb={igb} in preset name '{name}'. Supported: 0, 1, 2, 5, 6, 7, 8.")]
    UnknownIgb { name: String, igb: i32 },

    #[error("Component '{component}' cannot be empty in preset name '{name}'.")]
    EmptyComponent {
        component: &'static str,
        name: String,
    },
}

/// A built-in term map selected by name, such as `gromacs`, `amber@igb5` or
/// `openmm@charmm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetName {
    pub engine: Engine,
    pub variant: Option<PresetVariant>,
}

/// Parses `engine[@variant]`, where the variant is `igbN`, `gas` or `charmm`.
///
/// Whether the engine accepts the variant is decided when the preset is built.
pub fn parse_preset_name(name: &str) -> Result<PresetName, ParseError> {
    let (engine_part, variant_part) = match name.split_once('@') {
        Some((engine, variant)) => (engine, Some(variant)),
        None => (name, None),
    };

    if engine_part.trim().is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "engine",
            name: name.to_string(),
        });
    }
    let engine: Engine = engine_part
        .parse()
        .map_err(|_| ParseError::UnknownEngine(engine_part.to_string()))?;

    let variant = match variant_part.map(|v| v.trim().to_ascii_lowercase()) {
        None => None,
        Some(variant) if variant.is_empty() => {
            return Err(ParseError::EmptyComponent {
                component: "variant",
                name: name.to_string(),
            });
        }
        Some(variant) if variant == "gas" => None,
        Some(variant) if variant == "charmm" => Some(PresetVariant::CharmmSystem),
        Some(variant) => {
            let igb: i32 = variant
                .strip_prefix("igb")
                .and_then(|code| code.parse().ok())
                .ok_or_else(|| ParseError::InvalidVariant(name.to_string()))?;
            ImplicitSolventModel::from_igb(igb)
                .map_err(|_| ParseError::UnknownIgb {
                    name: name.to_string(),
                    igb,
                })?
                .map(PresetVariant::ImplicitSolvent)
        }
    };

    Ok(PresetName { engine, variant })
}
