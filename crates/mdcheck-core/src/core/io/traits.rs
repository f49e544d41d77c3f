use super::error::SourceError;
use crate::core::models::decomposition::EnergyDecomposition;
use crate::core::models::forces::ForceField;

/// The contract every engine adapter fulfils.
///
/// A source describes one engine's view of one molecular configuration. How the
/// engine was run, or how its native output was read, is hidden behind this trait;
/// the comparison only sees labeled energies and, optionally, per-particle forces.
pub trait EnergySource {
    /// Human-readable name used as the column header in reports.
    fn name(&self) -> &str;

    /// Returns the engine's potential-energy decomposition.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying data cannot be read or parsed.
    fn decompose(&self) -> Result<EnergyDecomposition, SourceError>;

    /// Returns the per-particle forces, or `None` if this source has none.
    ///
    /// # Errors
    ///
    /// Returns an error if forces were configured but cannot be read or parsed.
    fn forces(&self) -> Result<Option<ForceField>, SourceError>;
}
