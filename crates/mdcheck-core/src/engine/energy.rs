use super::canonicalize::CanonicalEnergies;
use super::config::{EnergyOptions, TotalCheckConfig};
use super::error::{ComparisonError, Side};
use crate::core::models::term::CanonicalTerm;
use crate::core::units::EnergyUnit;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyRow {
    pub term: CanonicalTerm,
    pub value_a: f64,
    pub value_b: f64,
}

impl EnergyRow {
    #[inline]
    pub fn delta(&self) -> f64 {
        self.value_a - self.value_b
    }
}

/// A summed canonical total that disagrees with the total the engine reported.
///
/// Usually a sign of a label that was ignored or mapped to the wrong term.
#[derive(Debug, Clone, PartialEq)]
pub struct TotalMismatch {
    pub side: Side,
    pub summed: f64,
    pub reported: f64,
    pub relative_error: f64,
    pub tolerance: f64,
}

impl fmt::Display for TotalMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "side {}: summed canonical total {:.6} differs from reported total {:.6} (relative error {:.3e} > tolerance {:.1e})",
            self.side, self.summed, self.reported, self.relative_error, self.tolerance
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyComparison {
    pub unit: EnergyUnit,
    pub rows: Vec<EnergyRow>,
    pub total: Option<EnergyRow>,
    pub warnings: Vec<TotalMismatch>,
}

/// Compares two canonical decompositions term by term.
///
/// `conversion_b` multiplies every value of side B (including its reported total);
/// pass `1.0` when both sides already share a unit. The rows are expressed in the
/// unit of side A.
#[instrument(skip_all, name = "compare_energies")]
pub fn compare_energies(
    a: &CanonicalEnergies,
    b: &CanonicalEnergies,
    conversion_b: f64,
    options: &EnergyOptions,
) -> Result<EnergyComparison, ComparisonError> {
    let union: BTreeSet<&CanonicalTerm> = a
        .terms()
        .keys()
        .chain(b.terms().keys())
        .filter(|term| !term.is_total())
        .collect();

    let rows = union
        .into_iter()
        .map(|term| {
            let value_a = a.get(term).ok_or_else(|| ComparisonError::MissingTerm {
                term: term.clone(),
                missing: Side::A,
            })?;
            let value_b = b.get(term).ok_or_else(|| ComparisonError::MissingTerm {
                term: term.clone(),
                missing: Side::B,
            })?;
            Ok(EnergyRow {
                term: term.clone(),
                value_a,
                value_b: value_b * conversion_b,
            })
        })
        .collect::<Result<Vec<_>, ComparisonError>>()?;

    let summed_a: f64 = rows.iter().map(|row| row.value_a).sum();
    let summed_b: f64 = rows.iter().map(|row| row.value_b).sum();
    debug!(
        "Compared {} canonical terms (summed totals: A = {:.6}, B = {:.6})",
        rows.len(),
        summed_a,
        summed_b
    );

    let mut warnings = Vec::new();
    let checks = [
        (Side::A, summed_a, a.reported_total()),
        (Side::B, summed_b, b.reported_total().map(|t| t * conversion_b)),
    ];
    for (side, summed, reported) in checks {
        let Some(reported) = reported else {
            continue;
        };
        if let Some(mismatch) = check_total(side, summed, reported, &options.total_check) {
            if options.total_check.strict {
                return Err(ComparisonError::TotalMismatch(mismatch));
            }
            warn!("Total energy mismatch on {}", mismatch);
            warnings.push(mismatch);
        }
    }

    let total = options.include_total.then(|| EnergyRow {
        term: CanonicalTerm::Total,
        value_a: summed_a,
        value_b: summed_b,
    });

    Ok(EnergyComparison {
        unit: a.unit(),
        rows,
        total,
        warnings,
    })
}

fn check_total(
    side: Side,
    summed: f64,
    reported: f64,
    config: &TotalCheckConfig,
) -> Option<TotalMismatch> {
    let difference = (summed - reported).abs();
    let relative_error = if reported == 0.0 {
        difference
    } else {
        difference / reported.abs()
    };
    (relative_error > config.relative_tolerance).then_some(TotalMismatch {
        side,
        summed,
        reported,
        relative_error,
        tolerance: config.relative_tolerance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::KJ_PER_KCAL;
    use std::collections::BTreeMap;

    fn energies(unit: EnergyUnit, terms: &[(CanonicalTerm, f64)], total: Option<f64>) -> CanonicalEnergies {
        CanonicalEnergies::new(unit, terms.iter().cloned().collect::<BTreeMap<_, _>>(), total)
    }

    fn strict_options() -> EnergyOptions {
        let mut options = EnergyOptions::default();
        options.total_check.strict = true;
        options
    }

    #[test]
    fn matching_decompositions_yield_zero_deltas() {
        let a = energies(
            EnergyUnit::KjPerMol,
            &[(CanonicalTerm::Bond, 100.0), (CanonicalTerm::Angle, 50.0)],
            None,
        );
        let b = a.clone();
        let comparison = compare_energies(&a, &b, 1.0, &EnergyOptions::default()).unwrap();

        assert_eq!(comparison.rows.len(), 2);
        assert_eq!(comparison.rows[0].term, CanonicalTerm::Bond);
        assert_eq!(comparison.rows[1].term, CanonicalTerm::Angle);
        assert!(comparison.rows.iter().all(|row| row.delta() == 0.0));
        assert!(comparison.total.is_none());
        assert!(comparison.warnings.is_empty());
    }

    #[test]
    fn term_missing_on_one_side_is_an_error_not_a_zero() {
        let a = energies(
            EnergyUnit::KjPerMol,
            &[(CanonicalTerm::Bond, 1.0), (CanonicalTerm::ImplicitSolvent, -3.0)],
            None,
        );
        let b = energies(EnergyUnit::KjPerMol, &[(CanonicalTerm::Bond, 1.0)], None);

        let error = compare_energies(&a, &b, 1.0, &EnergyOptions::default()).unwrap_err();
        assert!(matches!(
            error,
            ComparisonError::MissingTerm {
                term: CanonicalTerm::ImplicitSolvent,
                missing: Side::B
            }
        ));

        let error = compare_energies(&b, &a, 1.0, &EnergyOptions::default()).unwrap_err();
        assert!(matches!(
            error,
            ComparisonError::MissingTerm { missing: Side::A, .. }
        ));
    }

    #[test]
    fn conversion_is_applied_to_side_b_only() {
        let a = energies(EnergyUnit::KjPerMol, &[(CanonicalTerm::Bond, KJ_PER_KCAL)], None);
        let b = energies(EnergyUnit::KcalPerMol, &[(CanonicalTerm::Bond, 1.0)], None);

        let comparison = compare_energies(&a, &b, KJ_PER_KCAL, &EnergyOptions::default()).unwrap();
        assert_eq!(comparison.unit, EnergyUnit::KjPerMol);
        assert_eq!(comparison.rows[0].value_a, KJ_PER_KCAL);
        assert_eq!(comparison.rows[0].value_b, KJ_PER_KCAL);
    }

    #[test]
    fn total_row_sums_each_side_independently() {
        let a = energies(
            EnergyUnit::KcalPerMol,
            &[(CanonicalTerm::Bond, 1.0), (CanonicalTerm::Angle, 2.0)],
            None,
        );
        let b = energies(
            EnergyUnit::KcalPerMol,
            &[(CanonicalTerm::Bond, 1.5), (CanonicalTerm::Angle, 2.5)],
            None,
        );
        let options = EnergyOptions {
            include_total: true,
            ..EnergyOptions::default()
        };
        let comparison = compare_energies(&a, &b, 1.0, &options).unwrap();
        let total = comparison.total.unwrap();
        assert_eq!(total.term, CanonicalTerm::Total);
        assert_eq!(total.value_a, 3.0);
        assert_eq!(total.value_b, 4.0);
    }

    #[test]
    fn reported_total_mismatch_is_a_warning_by_default() {
        let a = energies(
            EnergyUnit::KcalPerMol,
            &[(CanonicalTerm::Bond, 3220.73435), (CanonicalTerm::Angle, 2240.66772)],
            Some(6000.0),
        );
        let b = energies(
            EnergyUnit::KcalPerMol,
            &[(CanonicalTerm::Bond, 3220.73435), (CanonicalTerm::Angle, 2240.66772)],
            None,
        );
        let comparison = compare_energies(&a, &b, 1.0, &EnergyOptions::default()).unwrap();

        assert_eq!(comparison.warnings.len(), 1);
        let warning = &comparison.warnings[0];
        assert_eq!(warning.side, Side::A);
        assert_eq!(warning.reported, 6000.0);
        assert!((warning.summed - 5461.40207).abs() < 1e-9);
        assert!(warning.relative_error > 1e-3);
    }

    #[test]
    fn reported_total_within_tolerance_produces_no_warning() {
        let a = energies(
            EnergyUnit::KcalPerMol,
            &[(CanonicalTerm::Bond, 100.0), (CanonicalTerm::Angle, 50.0)],
            Some(150.01),
        );
        let comparison = compare_energies(&a, &a, 1.0, &strict_options()).unwrap();
        assert!(comparison.warnings.is_empty());
    }

    #[test]
    fn strict_mode_promotes_total_mismatch_to_error() {
        let a = energies(EnergyUnit::KjPerMol, &[(CanonicalTerm::Bond, 1.0)], None);
        let b = energies(EnergyUnit::KjPerMol, &[(CanonicalTerm::Bond, 1.0)], Some(2.0));

        let error = compare_energies(&a, &b, 1.0, &strict_options()).unwrap_err();
        match error {
            ComparisonError::TotalMismatch(mismatch) => {
                assert_eq!(mismatch.side, Side::B);
                assert_eq!(mismatch.relative_error, 0.5);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn reported_total_of_side_b_is_converted_before_checking() {
        let a = energies(EnergyUnit::KjPerMol, &[(CanonicalTerm::Bond, KJ_PER_KCAL)], None);
        let b = energies(EnergyUnit::KcalPerMol, &[(CanonicalTerm::Bond, 1.0)], Some(1.0));

        let comparison = compare_energies(&a, &b, KJ_PER_KCAL, &strict_options()).unwrap();
        assert!(comparison.warnings.is_empty());
    }

    #[test]
    fn zero_reported_total_uses_absolute_tolerance() {
        let a = energies(
            EnergyUnit::KjPerMol,
            &[(CanonicalTerm::Bond, 5e-4), (CanonicalTerm::Angle, -5e-4)],
            Some(0.0),
        );
        let comparison = compare_energies(&a, &a, 1.0, &strict_options()).unwrap();
        assert!(comparison.warnings.is_empty());
    }

    #[test]
    fn rows_follow_canonical_order_across_both_sides() {
        let a = energies(
            EnergyUnit::KjPerMol,
            &[
                (CanonicalTerm::Nonbonded, 1.0),
                (CanonicalTerm::Bond, 1.0),
                (CanonicalTerm::Dihedral, 1.0),
            ],
            None,
        );
        let comparison = compare_energies(&a, &a, 1.0, &EnergyOptions::default()).unwrap();
        let order: Vec<_> = comparison.rows.iter().map(|r| r.term.clone()).collect();
        assert_eq!(
            order,
            [
                CanonicalTerm::Bond,
                CanonicalTerm::Dihedral,
                CanonicalTerm::Nonbonded
            ]
        );
    }
}
