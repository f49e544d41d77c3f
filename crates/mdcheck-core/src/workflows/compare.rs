use crate::core::io::traits::EnergySource;
use crate::core::terms::map::CanonicalTermMap;
use crate::core::units::EnergyUnit;
use crate::engine::canonicalize::canonicalize;
use crate::engine::config::ComparisonConfig;
use crate::engine::energy::compare_energies;
use crate::engine::error::ComparisonError;
use crate::engine::forces::{ForceComparison, compare_forces};
use crate::engine::report::ComparisonReport;
use tracing::{info, instrument, warn};

/// One side of a comparison: where the numbers come from and how to read its labels.
#[derive(Clone, Copy)]
pub struct SourceSpec<'a> {
    pub source: &'a dyn EnergySource,
    pub term_map: &'a CanonicalTermMap,
}

impl<'a> SourceSpec<'a> {
    pub fn new(source: &'a dyn EnergySource, term_map: &'a CanonicalTermMap) -> Self {
        Self { source, term_map }
    }
}

#[instrument(skip_all, name = "compare_workflow")]
pub fn run(
    a: &SourceSpec<'_>,
    b: &SourceSpec<'_>,
    config: &ComparisonConfig,
) -> Result<ComparisonReport, ComparisonError> {
    info!(
        "Comparing '{}' against '{}'.",
        a.source.name(),
        b.source.name()
    );

    let energies_a = canonicalize(&a.source.decompose()?, a.term_map)?;
    let energies_b = canonicalize(&b.source.decompose()?, b.term_map)?;

    let report_unit: EnergyUnit = config.report_unit.unwrap_or(energies_a.unit());
    let energies_a = energies_a.converted_to(report_unit);
    let conversion_b = EnergyUnit::conversion_factor(energies_b.unit(), report_unit);

    let energies = compare_energies(&energies_a, &energies_b, conversion_b, &config.energy)?;

    let forces = match (a.source.forces()?, b.source.forces()?) {
        (Some(forces_a), Some(forces_b)) => {
            let forces_b = forces_b.converted_to(forces_a.unit());
            let comparison: ForceComparison =
                compare_forces(forces_a.vectors(), forces_b.vectors())?;
            Some(comparison)
        }
        (Some(_), None) | (None, Some(_)) => {
            warn!("Only one side supplied forces; skipping force comparison.");
            None
        }
        (None, None) => None,
    };

    info!(
        terms = energies.rows.len(),
        warnings = energies.warnings.len(),
        forces = forces.is_some(),
        "Comparison finished."
    );

    Ok(ComparisonReport {
        label_a: config
            .label_a
            .clone()
            .unwrap_or_else(|| a.source.name().to_string()),
        label_b: config
            .label_b
            .clone()
            .unwrap_or_else(|| b.source.name().to_string()),
        energies,
        forces,
        render: config.render.clone(),
    })
}
