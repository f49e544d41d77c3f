use crate::core::units::EnergyUnit;

/// An engine's breakdown of the potential energy of one configuration into
/// labeled additive contributions, all expressed in a single unit.
///
/// Labels are engine-native (`HarmonicBondForce`, `BONDs`, `Coulomb (SR)`, ...) and
/// keep the order the engine reported them in. The same label may appear more than
/// once, e.g. when an engine reports one force object per parameter set.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyDecomposition {
    unit: EnergyUnit,
    entries: Vec<(String, f64)>,
}

impl EnergyDecomposition {
    pub fn new(unit: EnergyUnit) -> Self {
        Self {
            unit,
            entries: Vec::new(),
        }
    }

    pub fn from_entries<I, S>(unit: EnergyUnit, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            unit,
            entries: entries
                .into_iter()
                .map(|(label, value)| (label.into(), value))
                .collect(),
        }
    }

    pub fn push(&mut self, label: impl Into<String>, value: f64) {
        self.entries.push((label.into(), value));
    }

    #[inline]
    pub fn unit(&self) -> EnergyUnit {
        self.unit
    }

    #[inline]
    pub fn entries(&self) -> &[(String, f64)] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(label, value)| (label.as_str(), *value))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
