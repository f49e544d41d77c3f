use super::map::TermMapError;
use std::fmt;

/// Generalized Born implicit-solvent models selectable through Amber's `igb` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImplicitSolventModel {
    Hct,
    Obc1,
    Obc2,
    GbN,
    GbN2,
}

impl ImplicitSolventModel {
    pub const ALL: [Self; 5] = [Self::Hct, Self::Obc1, Self::Obc2, Self::GbN, Self::GbN2];

    /// Resolves an Amber `igb` code. `0` and `6` select no implicit solvent.
    pub fn from_igb(igb: i32) -> Result<Option<Self>, TermMapError> {
        match igb {
            0 | 6 => Ok(None),
            1 => Ok(Some(Self::Hct)),
            2 => Ok(Some(Self::Obc1)),
            5 => Ok(Some(Self::Obc2)),
            7 => Ok(Some(Self::GbN)),
            8 => Ok(Some(Self::GbN2)),
            other => Err(TermMapError::UnknownIgb(other)),
        }
    }

    pub fn igb(self) -> i32 {
        match self {
            Self::Hct => 1,
            Self::Obc1 => 2,
            Self::Obc2 => 5,
            Self::GbN => 7,
            Self::GbN2 => 8,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Hct => "HCT",
            Self::Obc1 => "OBC1",
            Self::Obc2 => "OBC2",
            Self::GbN => "GBn",
            Self::GbN2 => "GBn2",
        }
    }
}

impl fmt::Display for ImplicitSolventModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (igb={})", self.name(), self.igb())
    }
}
