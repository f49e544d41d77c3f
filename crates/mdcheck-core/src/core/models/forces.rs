use crate::core::units::ForceUnit;
use nalgebra::Vector3;

pub type Force = Vector3<f64>;

/// Per-particle force vectors reported by one engine.
///
/// Particle ordering is the caller's responsibility: two force fields are only
/// comparable if index `i` refers to the same particle in both.
#[derive(Debug, Clone, PartialEq)]
pub struct ForceField {
    unit: ForceUnit,
    vectors: Vec<Force>,
}

impl ForceField {
    pub fn new(unit: ForceUnit, vectors: Vec<Force>) -> Self {
        Self { unit, vectors }
    }

    pub fn from_components<I>(unit: ForceUnit, components: I) -> Self
    where
        I: IntoIterator<Item = [f64; 3]>,
    {
        Self {
            unit,
            vectors: components
                .into_iter()
                .map(|[x, y, z]| Vector3::new(x, y, z))
                .collect(),
        }
    }

    #[inline]
    pub fn unit(&self) -> ForceUnit {
        self.unit
    }

    #[inline]
    pub fn vectors(&self) -> &[Force] {
        &self.vectors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    pub fn converted_to(&self, unit: ForceUnit) -> Self {
        let factor = ForceUnit::conversion_factor(self.unit, unit);
        Self {
            unit,
            vectors: self.vectors.iter().map(|v| v * factor).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converted_to_scales_every_component() {
        let forces = ForceField::from_components(
            ForceUnit::KjPerMolNanometer,
            [[41.84, 0.0, -83.68], [0.0, 4.184, 0.0]],
        );
        let converted = forces.converted_to(ForceUnit::KcalPerMolAngstrom);

        assert_eq!(converted.unit(), ForceUnit::KcalPerMolAngstrom);
        assert!((converted.vectors()[0] - Vector3::new(1.0, 0.0, -2.0)).norm() < 1e-12);
        assert!((converted.vectors()[1] - Vector3::new(0.0, 0.1, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn converted_to_same_unit_is_identity() {
        let forces = ForceField::from_components(ForceUnit::KcalPerMolAngstrom, [[1.0, 2.0, 3.0]]);
        assert_eq!(forces.converted_to(ForceUnit::KcalPerMolAngstrom), forces);
    }
}
