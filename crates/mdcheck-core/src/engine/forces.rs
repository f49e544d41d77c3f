use super::error::{ComparisonError, Side};
use super::stats::Summary;
use crate::core::models::forces::Force;
use tracing::{debug, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Agreement metrics of a single particle's force vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleAgreement {
    pub index: usize,
    /// `dot(a, b) / dot(b, b)`; `None` when the reference vector `b` is zero.
    pub projection: Option<f64>,
    /// `2|a - b| / (|a| + |b|)`, in `[0, 2]`.
    pub relative_error: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForceComparison {
    pub particles: usize,
    pub projection: Option<Summary>,
    pub relative_error: Option<Summary>,
    pub excluded_projections: usize,
    pub agreements: Vec<ParticleAgreement>,
}

impl ForceComparison {
    /// The `n` particles with the largest relative error, worst first.
    ///
    /// Ties keep ascending particle order.
    pub fn worst(&self, n: usize) -> Vec<&ParticleAgreement> {
        let mut ranked: Vec<&ParticleAgreement> = self.agreements.iter().collect();
        ranked.sort_by(|x, y| y.relative_error.total_cmp(&x.relative_error));
        ranked.truncate(n);
        ranked
    }
}

/// Compares two per-particle force arrays expressed in the same unit.
///
/// `b` is the reference side: projections are taken onto it.
#[instrument(skip_all, name = "compare_forces")]
pub fn compare_forces(a: &[Force], b: &[Force]) -> Result<ForceComparison, ComparisonError> {
    if a.len() != b.len() {
        return Err(ComparisonError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }

    for (index, (fa, fb)) in a.iter().zip(b).enumerate() {
        for (side, vector) in [(Side::A, fa), (Side::B, fb)] {
            if vector.iter().any(|c| !c.is_finite()) {
                return Err(ComparisonError::InvalidVector {
                    side,
                    index,
                    vector: [vector.x, vector.y, vector.z],
                });
            }
        }
    }

    #[cfg(not(feature = "parallel"))]
    let iterator = a.iter().zip(b.iter()).enumerate();

    #[cfg(feature = "parallel")]
    let iterator = a.par_iter().zip(b.par_iter()).enumerate();

    let agreements: Vec<ParticleAgreement> = iterator
        .map(|(index, (fa, fb))| particle_agreement(index, fa, fb))
        .collect();

    let projections: Vec<f64> = agreements.iter().filter_map(|p| p.projection).collect();
    let excluded_projections = agreements.len() - projections.len();
    let relative_errors: Vec<f64> = agreements.iter().map(|p| p.relative_error).collect();

    debug!(
        particles = agreements.len(),
        excluded_projections, "Computed per-particle force agreement."
    );

    Ok(ForceComparison {
        particles: agreements.len(),
        projection: Summary::from_values(projections),
        relative_error: Summary::from_values(relative_errors),
        excluded_projections,
        agreements,
    })
}

/// Both metrics are evaluated on scaled vectors so that finite inputs can neither
/// overflow nor underflow. The projection is `None` only when `b` is exactly zero.
fn particle_agreement(index: usize, a: &Force, b: &Force) -> ParticleAgreement {
    let scale = a.amax().max(b.amax());
    if scale == 0.0 {
        return ParticleAgreement {
            index,
            projection: None,
            relative_error: 0.0,
        };
    }
    let a_unit = a / scale;

    let b_max = b.amax();
    let projection = (b_max != 0.0).then(|| {
        let b_unit = b / b_max;
        a_unit.dot(&b_unit) / b_unit.dot(&b_unit) * (scale / b_max)
    });

    let b_scaled = b / scale;
    let relative_error = 2.0 * (a_unit - b_scaled).norm() / (a_unit.norm() + b_scaled.norm());

    ParticleAgreement {
        index,
        projection,
        relative_error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f(x: f64, y: f64, z: f64) -> Force {
        Force::new(x, y, z)
    }

    #[test]
    fn identical_forces_agree_perfectly() {
        let forces = vec![f(1.0, 2.0, 3.0), f(-4.0, 0.5, 0.0)];
        let comparison = compare_forces(&forces, &forces).unwrap();

        assert_eq!(comparison.particles, 2);
        assert_eq!(comparison.excluded_projections, 0);
        let projection = comparison.projection.unwrap();
        assert!((projection.mean - 1.0).abs() < 1e-12);
        assert!((projection.min - 1.0).abs() < 1e-12);
        let relative = comparison.relative_error.unwrap();
        assert_eq!(relative.max, 0.0);
    }

    #[test]
    fn projection_is_asymmetric_and_relative_error_is_symmetric() {
        let a = vec![f(1.0, 0.0, 0.0)];
        let b = vec![f(2.0, 0.0, 0.0)];

        let ab = compare_forces(&a, &b).unwrap();
        let ba = compare_forces(&b, &a).unwrap();

        assert_eq!(ab.agreements[0].projection, Some(0.5));
        assert_eq!(ba.agreements[0].projection, Some(2.0));
        assert!((ab.agreements[0].relative_error - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(ab.agreements[0].relative_error, ba.agreements[0].relative_error);
    }

    #[test]
    fn zero_vectors_are_excluded_from_projection() {
        let a = vec![f(0.0, 0.0, 0.0), f(1.0, 0.0, 0.0), f(1.0, 1.0, 0.0)];
        let b = vec![f(0.0, 0.0, 0.0), f(0.0, 0.0, 0.0), f(1.0, 1.0, 0.0)];
        let comparison = compare_forces(&a, &b).unwrap();

        assert_eq!(comparison.agreements[0].projection, None);
        assert_eq!(comparison.agreements[0].relative_error, 0.0);
        assert_eq!(comparison.agreements[1].projection, None);
        assert_eq!(comparison.agreements[1].relative_error, 2.0);
        assert_eq!(comparison.excluded_projections, 2);
        assert_eq!(comparison.projection.unwrap().count, 1);
        assert_eq!(comparison.relative_error.unwrap().count, 3);
    }

    #[test]
    fn all_reference_vectors_zero_yields_no_projection_summary() {
        let a = vec![f(1.0, 0.0, 0.0)];
        let b = vec![f(0.0, 0.0, 0.0)];
        let comparison = compare_forces(&a, &b).unwrap();
        assert_eq!(comparison.projection, None);
        assert!(comparison.relative_error.is_some());
    }

    #[test]
    fn huge_finite_forces_do_not_overflow() {
        let a = vec![f(1e200, 0.0, 0.0), f(1e200, 1e200, 0.0)];
        let b = vec![f(-1e200, 0.0, 0.0), f(1e200, 1e200, 0.0)];
        let comparison = compare_forces(&a, &b).unwrap();

        assert_eq!(comparison.agreements[0].projection, Some(-1.0));
        assert_eq!(comparison.agreements[0].relative_error, 2.0);
        assert!((comparison.agreements[1].projection.unwrap() - 1.0).abs() < 1e-12);
        assert_eq!(comparison.agreements[1].relative_error, 0.0);

        let relative = comparison.relative_error.unwrap();
        assert!(relative.mean.is_finite());
        assert_eq!(relative.max, 2.0);
        assert!(comparison.projection.unwrap().mean.is_finite());
    }

    #[test]
    fn tiny_reference_forces_are_not_treated_as_zero() {
        let a = vec![f(1e-170, 0.0, 0.0), f(0.0, 2e-170, 0.0)];
        let b = vec![f(1e-170, 0.0, 0.0), f(0.0, 1e-170, 0.0)];
        let comparison = compare_forces(&a, &b).unwrap();

        assert_eq!(comparison.excluded_projections, 0);
        assert_eq!(comparison.agreements[0].projection, Some(1.0));
        assert!((comparison.agreements[1].projection.unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(comparison.agreements[0].relative_error, 0.0);
        assert!((comparison.agreements[1].relative_error - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn reference_far_smaller_than_the_other_side_still_projects() {
        let a = vec![f(1e100, 0.0, 0.0)];
        let b = vec![f(1e-170, 0.0, 0.0)];
        let comparison = compare_forces(&a, &b).unwrap();

        assert_eq!(comparison.excluded_projections, 0);
        let projection = comparison.agreements[0].projection.unwrap();
        assert!((projection / 1e270 - 1.0).abs() < 1e-12);
        assert!((comparison.agreements[0].relative_error - 2.0).abs() < 1e-12);
    }

    #[test]
    fn empty_arrays_produce_no_statistics() {
        let comparison = compare_forces(&[], &[]).unwrap();
        assert_eq!(comparison.particles, 0);
        assert_eq!(comparison.projection, None);
        assert_eq!(comparison.relative_error, None);
    }

    #[test]
    fn length_mismatch_is_rejected() {
        let a = vec![f(1.0, 0.0, 0.0); 3];
        let b = vec![f(1.0, 0.0, 0.0); 2];
        let error = compare_forces(&a, &b).unwrap_err();
        assert!(matches!(
            error,
            ComparisonError::LengthMismatch { left: 3, right: 2 }
        ));
    }

    #[test]
    fn non_finite_component_reports_lowest_index() {
        let a = vec![f(1.0, 0.0, 0.0), f(1.0, 0.0, 0.0), f(f64::NAN, 0.0, 0.0)];
        let b = vec![f(1.0, 0.0, 0.0), f(0.0, f64::INFINITY, 0.0), f(1.0, 0.0, 0.0)];
        let error = compare_forces(&a, &b).unwrap_err();
        match error {
            ComparisonError::InvalidVector { side, index, .. } => {
                assert_eq!(side, Side::B);
                assert_eq!(index, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn worst_ranks_by_relative_error_descending() {
        let a = vec![f(1.0, 0.0, 0.0), f(1.0, 0.0, 0.0), f(1.0, 0.0, 0.0)];
        let b = vec![f(1.0, 0.0, 0.0), f(3.0, 0.0, 0.0), f(2.0, 0.0, 0.0)];
        let comparison = compare_forces(&a, &b).unwrap();

        let worst: Vec<usize> = comparison.worst(2).iter().map(|p| p.index).collect();
        assert_eq!(worst, [1, 2]);
        assert_eq!(comparison.worst(10).len(), 3);
        assert!(comparison.worst(0).is_empty());
    }
}
