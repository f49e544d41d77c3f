use super::error::ComparisonError;
use crate::core::models::decomposition::EnergyDecomposition;
use crate::core::models::term::CanonicalTerm;
use crate::core::terms::map::{CanonicalTermMap, TermTarget};
use crate::core::units::EnergyUnit;
use std::collections::{BTreeMap, HashMap};
use tracing::{instrument, trace};

/// Energies accumulated into canonical buckets.
///
/// Only terms that actually appeared in the decomposition are present. Labels mapped
/// to [`CanonicalTerm::Total`] are kept apart as the engine's own reported total so
/// that they are never double-counted with the per-term values.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalEnergies {
    unit: EnergyUnit,
    terms: BTreeMap<CanonicalTerm, f64>,
    reported_total: Option<f64>,
}

impl CanonicalEnergies {
    pub fn new(
        unit: EnergyUnit,
        terms: BTreeMap<CanonicalTerm, f64>,
        reported_total: Option<f64>,
    ) -> Self {
        Self {
            unit,
            terms,
            reported_total,
        }
    }

    #[inline]
    pub fn unit(&self) -> EnergyUnit {
        self.unit
    }

    #[inline]
    pub fn get(&self, term: &CanonicalTerm) -> Option<f64> {
        self.terms.get(term).copied()
    }

    #[inline]
    pub fn terms(&self) -> &BTreeMap<CanonicalTerm, f64> {
        &self.terms
    }

    #[inline]
    pub fn reported_total(&self) -> Option<f64> {
        self.reported_total
    }

    pub fn summed_total(&self) -> f64 {
        self.terms.values().sum()
    }

    pub fn converted_to(&self, unit: EnergyUnit) -> Self {
        let factor = EnergyUnit::conversion_factor(self.unit, unit);
        Self {
            unit,
            terms: self
                .terms
                .iter()
                .map(|(term, value)| (term.clone(), value * factor))
                .collect(),
            reported_total: self.reported_total.map(|total| total * factor),
        }
    }
}

#[instrument(skip_all, name = "canonicalize")]
pub fn canonicalize(
    decomposition: &EnergyDecomposition,
    term_map: &CanonicalTermMap,
) -> Result<CanonicalEnergies, ComparisonError> {
    let mut terms: BTreeMap<CanonicalTerm, f64> = BTreeMap::new();
    let mut reported_total: Option<f64> = None;
    let mut occurrences: HashMap<&str, usize> = HashMap::new();

    for (label, value) in decomposition.iter() {
        let occurrence = occurrences.entry(label).or_insert(0);
        *occurrence += 1;

        match term_map.lookup_occurrence(label, *occurrence) {
            Some(TermTarget::Term(CanonicalTerm::Total)) => {
                *reported_total.get_or_insert(0.0) += value;
            }
            Some(TermTarget::Term(term)) => {
                *terms.entry(term.clone()).or_insert(0.0) += value;
            }
            Some(TermTarget::Ignore) => {
                trace!("Ignoring label '{}' ({})", label, value);
            }
            None => {
                return Err(ComparisonError::UnmappedTerm {
                    label: label.to_string(),
                });
            }
        }
    }

    Ok(CanonicalEnergies {
        unit: decomposition.unit(),
        terms,
        reported_total,
    })
}
