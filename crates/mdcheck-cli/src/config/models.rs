use mdcheck::core::io::source::FileSource;
use mdcheck::core::terms::map::CanonicalTermMap;
use mdcheck::core::units::{EnergyUnit, ForceUnit};
use mdcheck::engine::config::ComparisonConfig;
use std::path::PathBuf;

/// One fully resolved side of a `compare` run.
#[derive(Debug, Clone)]
pub struct SideConfig {
    pub label: String,
    pub energies: PathBuf,
    pub energy_unit: Option<EnergyUnit>,
    pub forces: Option<(PathBuf, ForceUnit)>,
    pub term_map: CanonicalTermMap,
}

impl SideConfig {
    pub fn source(&self) -> FileSource {
        let mut source = FileSource::new(self.label.clone(), self.energies.clone());
        if let Some(unit) = self.energy_unit {
            source = source.with_energy_unit(unit);
        }
        if let Some((path, unit)) = &self.forces {
            source = source.with_forces(path.clone(), *unit);
        }
        source
    }
}

#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub a: SideConfig,
    pub b: SideConfig,
    pub comparison: ComparisonConfig,
}
