use super::map::{CanonicalTermMap, TermMapError};
use super::solvent::ImplicitSolventModel;
use crate::core::models::term::CanonicalTerm;
use crate::core::units::{EnergyUnit, ForceUnit};
use phf::{Map, phf_map};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Bond,
    Angle,
    Dihedral,
    Nonbonded,
    Solvent,
    Total,
    Ignore,
}

// Force class names as reported by a per-force-group energy decomposition.
static OPENMM_LABELS: Map<&'static str, Slot> = phf_map! {
    "HarmonicBondForce" => Slot::Bond,
    "HarmonicAngleForce" => Slot::Angle,
    "PeriodicTorsionForce" => Slot::Dihedral,
    "RBTorsionForce" => Slot::Dihedral,
    "CustomTorsionForce" => Slot::Dihedral,
    "CMAPTorsionForce" => Slot::Dihedral,
    "NonbondedForce" => Slot::Nonbonded,
    "CustomNonbondedForce" => Slot::Nonbonded,
    "GBSAOBCForce" => Slot::Solvent,
    "CustomGBForce" => Slot::Solvent,
    "CMMotionRemover" => Slot::Ignore,
    "MonteCarloBarostat" => Slot::Ignore,
    "AndersenThermostat" => Slot::Ignore,
};

// Occurrence key of the Urey-Bradley force in an OpenMM system built from CHARMM files.
const UREY_BRADLEY_BOND_FORCE: &str = "HarmonicBondForce#2";

// Fields of sander's energy record.
static AMBER_LABELS: Map<&'static str, Slot> = phf_map! {
    "tot" => Slot::Total,
    "bond" => Slot::Bond,
    "angle" => Slot::Angle,
    "dihedral" => Slot::Dihedral,
    "elec" => Slot::Nonbonded, "vdw" => Slot::Nonbonded,
    "elec_14" => Slot::Nonbonded, "vdw_14" => Slot::Nonbonded,
    "hbond" => Slot::Nonbonded,
    "egb" => Slot::Solvent, "surf" => Slot::Solvent,
    "constraint" => Slot::Ignore, "polar" => Slot::Ignore, "pb" => Slot::Ignore,
    "cavity" => Slot::Ignore, "disp" => Slot::Ignore, "rism" => Slot::Ignore,
    "scf" => Slot::Ignore, "emap" => Slot::Ignore, "dvdl" => Slot::Ignore,
    "les" => Slot::Ignore, "noe" => Slot::Ignore, "ct" => Slot::Ignore,
    "amd_boost" => Slot::Ignore, "gamd_boost" => Slot::Ignore,
};

// Column names of the CHARMM `ENER` property block.
static CHARMM_LABELS: Map<&'static str, Slot> = phf_map! {
    "ENERgy" => Slot::Total,
    "Delta-E" => Slot::Ignore, "GRMS" => Slot::Ignore,
    "BONDs" => Slot::Bond,
    "ANGLes" => Slot::Angle, "UREY-b" => Slot::Angle,
    "DIHEdrals" => Slot::Dihedral, "IMPRopers" => Slot::Dihedral, "CMAPs" => Slot::Dihedral,
    "VDWaals" => Slot::Nonbonded, "ELEC" => Slot::Nonbonded, "HBONds" => Slot::Nonbonded,
    "IMNBvdw" => Slot::Nonbonded, "IMELec" => Slot::Nonbonded, "IMHBnd" => Slot::Nonbonded,
    "RXNField" => Slot::Nonbonded, "EXTElec" => Slot::Nonbonded,
    "EWKSum" => Slot::Nonbonded, "EWSElf" => Slot::Nonbonded, "EWEXcl" => Slot::Nonbonded,
    "EWQCor" => Slot::Nonbonded, "EWUTil" => Slot::Nonbonded,
    "ASP" => Slot::Solvent, "GBEnr" => Slot::Solvent,
    "USER" => Slot::Ignore, "PMF1D" => Slot::Ignore, "PMF2D" => Slot::Ignore,
    "PRIMO" => Slot::Ignore,
};

// Term names printed by `gmx energy` / `gmx dump -e`.
static GROMACS_LABELS: Map<&'static str, Slot> = phf_map! {
    "Bond" => Slot::Bond, "G96Bond" => Slot::Bond,
    "Angle" => Slot::Angle, "G96Angle" => Slot::Angle, "U-B" => Slot::Angle,
    "Proper Dih." => Slot::Dihedral, "Improper Dih." => Slot::Dihedral,
    "Per. Imp. Dih." => Slot::Dihedral, "Ryckaert-Bell." => Slot::Dihedral,
    "CMAP Dih." => Slot::Dihedral,
    "LJ-14" => Slot::Nonbonded, "Coulomb-14" => Slot::Nonbonded,
    "LJ (SR)" => Slot::Nonbonded, "Coulomb (SR)" => Slot::Nonbonded,
    "Coul. recip." => Slot::Nonbonded, "LJ recip." => Slot::Nonbonded,
    "Disper. corr." => Slot::Nonbonded, "Buck.ham (SR)" => Slot::Nonbonded,
    "GB Polarization" => Slot::Solvent, "Nonpolar Sol." => Slot::Solvent,
    "Potential" => Slot::Total,
    "Kinetic En." => Slot::Ignore, "Total Energy" => Slot::Ignore,
    "Conserved En." => Slot::Ignore, "Temperature" => Slot::Ignore,
    "Pressure (bar)" => Slot::Ignore, "Pres. DC (bar)" => Slot::Ignore,
    "Constr. rmsd" => Slot::Ignore, "Position Rest." => Slot::Ignore,
    "Box-X" => Slot::Ignore, "Box-Y" => Slot::Ignore, "Box-Z" => Slot::Ignore,
    "Volume" => Slot::Ignore, "Density" => Slot::Ignore, "pV" => Slot::Ignore,
    "Enthalpy" => Slot::Ignore,
};

/// Simulation engines with a built-in term map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Engine {
    OpenMm,
    Amber,
    Charmm,
    Gromacs,
}

impl Engine {
    pub const ALL: [Self; 4] = [Self::OpenMm, Self::Amber, Self::Charmm, Self::Gromacs];

    pub fn name(self) -> &'static str {
        match self {
            Self::OpenMm => "openmm",
            Self::Amber => "amber",
            Self::Charmm => "charmm",
            Self::Gromacs => "gromacs",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::OpenMm => "OpenMM",
            Self::Amber => "Amber",
            Self::Charmm => "CHARMM",
            Self::Gromacs => "Gromacs",
        }
    }

    pub fn native_energy_unit(self) -> EnergyUnit {
        match self {
            Self::OpenMm | Self::Gromacs => EnergyUnit::KjPerMol,
            Self::Amber | Self::Charmm => EnergyUnit::KcalPerMol,
        }
    }

    pub fn native_force_unit(self) -> ForceUnit {
        match self {
            Self::OpenMm | Self::Gromacs => ForceUnit::KjPerMolNanometer,
            Self::Amber | Self::Charmm => ForceUnit::KcalPerMolAngstrom,
        }
    }

    fn labels(self) -> &'static Map<&'static str, Slot> {
        match self {
            Self::OpenMm => &OPENMM_LABELS,
            Self::Amber => &AMBER_LABELS,
            Self::Charmm => &CHARMM_LABELS,
            Self::Gromacs => &GROMACS_LABELS,
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Engine {
    type Err = TermMapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openmm" | "omm" => Ok(Self::OpenMm),
            "amber" | "sander" => Ok(Self::Amber),
            "charmm" => Ok(Self::Charmm),
            "gromacs" | "gmx" => Ok(Self::Gromacs),
            _ => Err(TermMapError::UnknownPreset(s.to_string())),
        }
    }
}

/// Refinement of a built-in preset, written after `@` in a preset name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresetVariant {
    /// Amber run with a Generalized Born model active (`amber@igbN`).
    ImplicitSolvent(ImplicitSolventModel),
    /// OpenMM system built from CHARMM files (`openmm@charmm`). Its second
    /// `HarmonicBondForce` holds the Urey-Bradley terms, which CHARMM, Gromacs and
    /// the `charmm` preset all count as angle energy.
    CharmmSystem,
}

impl PresetVariant {
    fn suffix(self) -> String {
        match self {
            Self::ImplicitSolvent(model) => format!("igb{}", model.igb()),
            Self::CharmmSystem => "charmm".to_string(),
        }
    }

    fn applies_to(self, engine: Engine) -> bool {
        match self {
            Self::ImplicitSolvent(_) => engine == Engine::Amber,
            Self::CharmmSystem => engine == Engine::OpenMm,
        }
    }
}

impl From<ImplicitSolventModel> for PresetVariant {
    fn from(model: ImplicitSolventModel) -> Self {
        Self::ImplicitSolvent(model)
    }
}

impl fmt::Display for PresetVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImplicitSolvent(model) => write!(f, "{model}"),
            Self::CharmmSystem => f.write_str("CHARMM force field (Urey-Bradley counted as Angle)"),
        }
    }
}

/// Builds the built-in term map for `engine`.
///
/// Amber's energy record always carries the `egb`/`surf` fields: they are compared
/// as implicit solvent when a GB model variant is given and ignored otherwise. Other
/// engines only report solvent forces that are actually present in the system.
pub fn preset(
    engine: Engine,
    variant: Option<PresetVariant>,
) -> Result<CanonicalTermMap, TermMapError> {
    if let Some(variant) = variant {
        if !variant.applies_to(engine) {
            return Err(TermMapError::InvalidVariant {
                preset: engine.name().to_string(),
                variant: variant.suffix(),
            });
        }
    }

    let gb_active = matches!(variant, Some(PresetVariant::ImplicitSolvent(_)));
    let solvent_target = if engine == Engine::Amber && !gb_active {
        None
    } else {
        Some(CanonicalTerm::ImplicitSolvent)
    };

    let mut builder = CanonicalTermMap::builder()
        .energy_unit(engine.native_energy_unit())
        .force_unit(engine.native_force_unit());

    for (&label, &slot) in engine.labels().entries() {
        let term = match slot {
            Slot::Bond => Some(CanonicalTerm::Bond),
            Slot::Angle => Some(CanonicalTerm::Angle),
            Slot::Dihedral => Some(CanonicalTerm::Dihedral),
            Slot::Nonbonded => Some(CanonicalTerm::Nonbonded),
            Slot::Solvent => solvent_target.clone(),
            Slot::Total => Some(CanonicalTerm::Total),
            Slot::Ignore => None,
        };
        builder = match term {
            Some(term) => builder.map(label, term),
            None => builder.ignore(label),
        };
    }

    if variant == Some(PresetVariant::CharmmSystem) {
        builder = builder.map(UREY_BRADLEY_BOND_FORCE, CanonicalTerm::Angle);
    }

    builder.build()
}
