use crate::core::models::term::CanonicalTerm;
use crate::core::units::{EnergyUnit, ForceUnit};
use serde::Deserialize;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TermMapError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Label '{label}' is mapped to both {first} and {second}")]
    ConflictingLabel {
        label: String,
        first: TermTarget,
        second: TermTarget,
    },
    #[error("Unknown term map preset '{0}'. Expected one of: openmm, amber, charmm, gromacs.")]
    UnknownPreset(String),
    #[error("Preset '{preset}' does not accept the variant '{variant}'")]
    InvalidVariant { preset: String, variant: String },
    #[error("Unknown Amber implicit-solvent model igb={0}")]
    UnknownIgb(i32),
}

/// Where a native label ends up after reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermTarget {
    Term(CanonicalTerm),
    Ignore,
}

impl fmt::Display for TermTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Term(term) => write!(f, "'{}'", term),
            Self::Ignore => f.write_str("<ignored>"),
        }
    }
}

/// Immutable mapping from engine-native energy labels to canonical terms.
///
/// A map is validated once when it is built; afterwards a label is either mapped,
/// explicitly ignored, or unknown. Unknown labels are never given a default target.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTermMap {
    entries: HashMap<String, TermTarget>,
    energy_unit: Option<EnergyUnit>,
    force_unit: Option<ForceUnit>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct TermMapFile {
    unit: Option<EnergyUnit>,
    force_unit: Option<ForceUnit>,
    #[serde(default)]
    terms: HashMap<String, CanonicalTerm>,
    #[serde(default)]
    ignore: Vec<String>,
}

impl CanonicalTermMap {
    pub fn builder() -> CanonicalTermMapBuilder {
        CanonicalTermMapBuilder::default()
    }

    #[inline]
    pub fn lookup(&self, label: &str) -> Option<&TermTarget> {
        self.entries.get(label)
    }

    /// Looks up the `occurrence`-th (1-based) appearance of `label` in a decomposition.
    ///
    /// An entry keyed `label#N` takes precedence over the plain `label` entry, so a map
    /// can route one of several identically named force groups elsewhere.
    pub fn lookup_occurrence(&self, label: &str, occurrence: usize) -> Option<&TermTarget> {
        self.entries
            .get(&format!("{label}#{occurrence}"))
            .or_else(|| self.lookup(label))
    }

    /// Native energy unit of the engine this map describes, if known.
    #[inline]
    pub fn energy_unit(&self) -> Option<EnergyUnit> {
        self.energy_unit
    }

    #[inline]
    pub fn force_unit(&self) -> Option<ForceUnit> {
        self.force_unit
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries sorted by label.
    pub fn sorted_entries(&self) -> Vec<(&str, &TermTarget)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(label, target)| (label.as_str(), target))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub fn load(path: &Path) -> Result<Self, TermMapError> {
        let path_str = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| TermMapError::Io {
            path: path_str.clone(),
            source: e,
        })?;
        Self::from_toml_str(&content, &path_str)
    }

    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, TermMapError> {
        let file: TermMapFile = toml::from_str(content).map_err(|e| TermMapError::Toml {
            path: origin.to_string(),
            source: e,
        })?;

        let mut builder = Self::builder();
        if let Some(unit) = file.unit {
            builder = builder.energy_unit(unit);
        }
        if let Some(unit) = file.force_unit {
            builder = builder.force_unit(unit);
        }
        for (label, term) in file.terms {
            builder = builder.map(label, term);
        }
        for label in file.ignore {
            builder = builder.ignore(label);
        }
        builder.build()
    }
}

#[derive(Debug, Default)]
pub struct CanonicalTermMapBuilder {
    pending: Vec<(String, TermTarget)>,
    energy_unit: Option<EnergyUnit>,
    force_unit: Option<ForceUnit>,
}

impl CanonicalTermMapBuilder {
    pub fn map(mut self, label: impl Into<String>, term: CanonicalTerm) -> Self {
        self.pending.push((label.into(), TermTarget::Term(term)));
        self
    }

    pub fn ignore(mut self, label: impl Into<String>) -> Self {
        self.pending.push((label.into(), TermTarget::Ignore));
        self
    }

    pub fn energy_unit(mut self, unit: EnergyUnit) -> Self {
        self.energy_unit = Some(unit);
        self
    }

    pub fn force_unit(mut self, unit: ForceUnit) -> Self {
        self.force_unit = Some(unit);
        self
    }

    pub fn build(self) -> Result<CanonicalTermMap, TermMapError> {
        let mut entries = HashMap::with_capacity(self.pending.len());
        for (label, target) in self.pending {
            match entries.entry(label) {
                Entry::Vacant(slot) => {
                    slot.insert(target);
                }
                Entry::Occupied(slot) => {
                    if *slot.get() != target {
                        return Err(TermMapError::ConflictingLabel {
                            label: slot.key().clone(),
                            first: slot.get().clone(),
                            second: target,
                        });
                    }
                }
            }
        }
        Ok(CanonicalTermMap {
            entries,
            energy_unit: self.energy_unit,
            force_unit: self.force_unit,
        })
    }
}
