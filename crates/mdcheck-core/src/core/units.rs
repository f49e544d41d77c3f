use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const KJ_PER_KCAL: f64 = 4.184;
pub const ANGSTROMS_PER_NANOMETER: f64 = 10.0;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum UnitParseError {
    #[error("Unknown energy unit '{0}'. Expected 'kcal/mol' or 'kJ/mol'.")]
    Energy(String),
    #[error("Unknown force unit '{0}'. Expected 'kcal/mol/A' or 'kJ/mol/nm'.")]
    Force(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum EnergyUnit {
    KcalPerMol,
    KjPerMol,
}

impl EnergyUnit {
    #[inline]
    fn in_kj_per_mol(self) -> f64 {
        match self {
            Self::KcalPerMol => KJ_PER_KCAL,
            Self::KjPerMol => 1.0,
        }
    }

    /// Factor that turns a value expressed in `from` into one expressed in `to`.
    #[inline]
    pub fn conversion_factor(from: Self, to: Self) -> f64 {
        if from == to {
            1.0
        } else {
            from.in_kj_per_mol() / to.in_kj_per_mol()
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::KcalPerMol => "kcal/mol",
            Self::KjPerMol => "kJ/mol",
        }
    }
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

impl FromStr for EnergyUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "kcal/mol" | "kcal" | "kcalpermol" => Ok(Self::KcalPerMol),
            "kj/mol" | "kj" | "kjpermol" => Ok(Self::KjPerMol),
            _ => Err(UnitParseError::Energy(s.to_string())),
        }
    }
}

impl TryFrom<String> for EnergyUnit {
    type Error = UnitParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum ForceUnit {
    KcalPerMolAngstrom,
    KjPerMolNanometer,
}

impl ForceUnit {
    #[inline]
    fn in_kj_per_mol_nm(self) -> f64 {
        match self {
            Self::KcalPerMolAngstrom => KJ_PER_KCAL * ANGSTROMS_PER_NANOMETER,
            Self::KjPerMolNanometer => 1.0,
        }
    }

    #[inline]
    pub fn conversion_factor(from: Self, to: Self) -> f64 {
        if from == to {
            1.0
        } else {
            from.in_kj_per_mol_nm() / to.in_kj_per_mol_nm()
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::KcalPerMolAngstrom => "kcal/mol/A",
            Self::KjPerMolNanometer => "kJ/mol/nm",
        }
    }
}

impl fmt::Display for ForceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

impl FromStr for ForceUnit {
    type Err = UnitParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "kcal/mol/a" | "kcal/mol/angstrom" | "kcal/(mol*a)" => Ok(Self::KcalPerMolAngstrom),
            "kj/mol/nm" | "kj/mol/nanometer" | "kj/(mol*nm)" => Ok(Self::KjPerMolNanometer),
            _ => Err(UnitParseError::Force(s.to_string())),
        }
    }
}

impl TryFrom<String> for ForceUnit {
    type Error = UnitParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'Å' || c == 'å' { 'a' } else { c })
        .collect()
}
