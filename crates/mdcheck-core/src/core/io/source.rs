use super::energies::read_energies;
use super::error::SourceError;
use super::forces::read_forces;
use super::traits::EnergySource;
use crate::core::models::decomposition::EnergyDecomposition;
use crate::core::models::forces::ForceField;
use crate::core::units::{EnergyUnit, ForceUnit};
use std::path::PathBuf;

/// A source backed by exported energy and force files on disk.
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    energies_path: PathBuf,
    energy_unit: Option<EnergyUnit>,
    forces: Option<(PathBuf, ForceUnit)>,
}

impl FileSource {
    pub fn new(name: impl Into<String>, energies_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            energies_path: energies_path.into(),
            energy_unit: None,
            forces: None,
        }
    }

    /// Unit assumed when the energy file does not declare one.
    pub fn with_energy_unit(mut self, unit: EnergyUnit) -> Self {
        self.energy_unit = Some(unit);
        self
    }

    pub fn with_forces(mut self, path: impl Into<PathBuf>, unit: ForceUnit) -> Self {
        self.forces = Some((path.into(), unit));
        self
    }
}

impl EnergySource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn decompose(&self) -> Result<EnergyDecomposition, SourceError> {
        read_energies(&self.energies_path, self.energy_unit)
    }

    fn forces(&self) -> Result<Option<ForceField>, SourceError> {
        self.forces
            .as_ref()
            .map(|(path, unit)| read_forces(path, *unit))
            .transpose()
    }
}

/// A source over values that are already in memory.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    decomposition: EnergyDecomposition,
    forces: Option<ForceField>,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, decomposition: EnergyDecomposition) -> Self {
        Self {
            name: name.into(),
            decomposition,
            forces: None,
        }
    }

    pub fn with_forces(mut self, forces: ForceField) -> Self {
        self.forces = Some(forces);
        self
    }
}

impl EnergySource for InMemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn decompose(&self) -> Result<EnergyDecomposition, SourceError> {
        Ok(self.decomposition.clone())
    }

    fn forces(&self) -> Result<Option<ForceField>, SourceError> {
        Ok(self.forces.clone())
    }
}
