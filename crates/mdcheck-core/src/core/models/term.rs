use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
#[error("Canonical term name cannot be empty")]
pub struct EmptyTermName;

/// Engine-independent energy contribution.
///
/// The derived ordering is the reporting order: the bonded terms first, then
/// nonbonded and solvent terms, user-defined terms alphabetically, and the total last.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum CanonicalTerm {
    Bond,
    Angle,
    Dihedral,
    Nonbonded,
    ImplicitSolvent,
    Custom(String),
    Total,
}

impl CanonicalTerm {
    pub fn name(&self) -> &str {
        match self {
            Self::Bond => "Bond",
            Self::Angle => "Angle",
            Self::Dihedral => "Dihedral",
            Self::Nonbonded => "Nonbonded",
            Self::ImplicitSolvent => "ImplicitSolvent",
            Self::Custom(name) => name,
            Self::Total => "Total",
        }
    }

    #[inline]
    pub fn is_total(&self) -> bool {
        matches!(self, Self::Total)
    }
}

impl fmt::Display for CanonicalTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CanonicalTerm {
    type Err = EmptyTermName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(EmptyTermName);
        }
        let key: String = trimmed
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let term = match key.as_str() {
            "bond" | "bonds" => Self::Bond,
            "angle" | "angles" => Self::Angle,
            "dihedral" | "dihedrals" | "torsion" | "torsions" => Self::Dihedral,
            "nonbonded" => Self::Nonbonded,
            "implicitsolvent" | "gb" | "solvation" => Self::ImplicitSolvent,
            "total" => Self::Total,
            _ => Self::Custom(trimmed.to_string()),
        };
        Ok(term)
    }
}

impl TryFrom<String> for CanonicalTerm {
    type Error = EmptyTermName;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
