use super::config::RenderOptions;
use super::energy::{EnergyComparison, EnergyRow};
use super::forces::ForceComparison;
use super::stats::Summary;
use std::fmt;

const LABEL_WIDTH: usize = 20;
const VALUE_WIDTH: usize = 15;
const COLUMN_SEPARATOR: &str = " | ";

/// A complete, renderable comparison of two engines.
///
/// The `Display` implementation produces the fixed-width textual report.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonReport {
    pub label_a: String,
    pub label_b: String,
    pub energies: EnergyComparison,
    pub forces: Option<ForceComparison>,
    pub render: RenderOptions,
}

impl ComparisonReport {
    fn value_columns(&self) -> usize {
        if self.render.show_delta { 3 } else { 2 }
    }

    fn rule_width(&self) -> usize {
        LABEL_WIDTH + self.value_columns() * (COLUMN_SEPARATOR.len() + VALUE_WIDTH)
    }

    fn write_row(&self, f: &mut fmt::Formatter<'_>, row: &EnergyRow) -> fmt::Result {
        let p = self.render.precision;
        write!(
            f,
            "{:<LABEL_WIDTH$} | {:>VALUE_WIDTH$.p$} | {:>VALUE_WIDTH$.p$}",
            row.term.name(),
            row.value_a,
            row.value_b,
        )?;
        if self.render.show_delta {
            write!(f, " | {:>VALUE_WIDTH$.p$}", row.delta())?;
        }
        writeln!(f)
    }

    fn write_summary(
        &self,
        f: &mut fmt::Formatter<'_>,
        summary: Option<&Summary>,
    ) -> fmt::Result {
        let p = self.render.precision;
        match summary {
            Some(s) => {
                writeln!(f, "  Mean:   {:>VALUE_WIDTH$.p$}", s.mean)?;
                writeln!(f, "  Min:    {:>VALUE_WIDTH$.p$}", s.min)?;
                writeln!(f, "  Max:    {:>VALUE_WIDTH$.p$}", s.max)?;
                writeln!(f, "  Median: {:>VALUE_WIDTH$.p$}", s.median)
            }
            None => writeln!(f, "  no data"),
        }
    }

    fn write_forces(&self, f: &mut fmt::Formatter<'_>, forces: &ForceComparison) -> fmt::Result {
        writeln!(f)?;
        writeln!(
            f,
            "Force comparison over {} particles ({} projected onto {})",
            forces.particles, self.label_a, self.label_b
        )?;

        writeln!(f, "Projection:")?;
        self.write_summary(f, forces.projection.as_ref())?;
        if forces.excluded_projections > 0 {
            writeln!(
                f,
                "  Excluded: {} (zero reference force)",
                forces.excluded_projections
            )?;
        }

        writeln!(f, "Relative error:")?;
        self.write_summary(f, forces.relative_error.as_ref())?;

        let worst = forces.worst(self.render.worst_particles);
        if !worst.is_empty() {
            let p = self.render.precision;
            writeln!(f, "Worst particles by relative error:")?;
            for particle in worst {
                write!(
                    f,
                    "  #{:<8} relative error {:>VALUE_WIDTH$.p$}",
                    particle.index, particle.relative_error
                )?;
                match particle.projection {
                    Some(projection) => writeln!(f, "  projection {:>VALUE_WIDTH$.p$}", projection)?,
                    None => writeln!(f, "  projection n/a")?,
                }
            }
        }
        Ok(())
    }
}

impl fmt::Display for ComparisonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "-".repeat(self.rule_width());

        write!(
            f,
            "{:<LABEL_WIDTH$} | {:<VALUE_WIDTH$} | {:<VALUE_WIDTH$}",
            "Component", self.label_a, self.label_b
        )?;
        if self.render.show_delta {
            write!(f, " | {:<VALUE_WIDTH$}", "Delta")?;
        }
        writeln!(f)?;
        writeln!(f, "{rule}")?;

        for row in &self.energies.rows {
            self.write_row(f, row)?;
        }
        if let Some(total) = &self.energies.total {
            writeln!(f, "{rule}")?;
            self.write_row(f, total)?;
        }

        writeln!(f)?;
        writeln!(f, "Output in {}", self.energies.unit)?;

        for warning in &self.energies.warnings {
            writeln!(f, "Warning: {warning}")?;
        }

        if let Some(forces) = &self.forces {
            self.write_forces(f, forces)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::forces::Force;
    use crate::core::models::term::CanonicalTerm;
    use crate::core::units::EnergyUnit;
    use crate::engine::energy::TotalMismatch;
    use crate::engine::error::Side;
    use crate::engine::forces::compare_forces;

    fn energies() -> EnergyComparison {
        EnergyComparison {
            unit: EnergyUnit::KjPerMol,
            rows: vec![
                EnergyRow {
                    term: CanonicalTerm::Bond,
                    value_a: 100.0,
                    value_b: 100.0,
                },
                EnergyRow {
                    term: CanonicalTerm::Angle,
                    value_a: 50.0,
                    value_b: 49.5,
                },
            ],
            total: None,
            warnings: Vec::new(),
        }
    }

    fn report(energies: EnergyComparison, render: RenderOptions) -> ComparisonReport {
        ComparisonReport {
            label_a: "OpenMM".to_string(),
            label_b: "Amber".to_string(),
            energies,
            forces: None,
            render,
        }
    }

    #[test]
    fn renders_fixed_width_table() {
        let text = report(energies(), RenderOptions::default()).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Component            | OpenMM          | Amber          "
        );
        assert_eq!(lines[1], "-".repeat(56));
        assert_eq!(
            lines[2],
            "Bond                 |      100.000000 |      100.000000"
        );
        assert_eq!(
            lines[3],
            "Angle                |       50.000000 |       49.500000"
        );
        assert!(text.contains("Output in kJ/mol"));
        assert!(!text.contains("Delta"));
        assert!(!text.contains("Force comparison"));
    }

    #[test]
    fn delta_column_and_total_row_are_optional() {
        let mut comparison = energies();
        comparison.total = Some(EnergyRow {
            term: CanonicalTerm::Total,
            value_a: 150.0,
            value_b: 149.5,
        });
        let render = RenderOptions {
            precision: 2,
            show_delta: true,
            ..RenderOptions::default()
        };
        let text = report(comparison, render).to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].ends_with("| Delta          "));
        assert_eq!(lines[1].len(), 74);
        assert_eq!(
            lines[3],
            "Angle                |           50.00 |           49.50 |            0.50"
        );
        assert_eq!(lines[4], "-".repeat(74));
        assert!(lines[5].starts_with("Total                |          150.00"));
    }

    #[test]
    fn total_warnings_are_printed() {
        let mut comparison = energies();
        comparison.warnings.push(TotalMismatch {
            side: Side::B,
            summed: 149.5,
            reported: 160.0,
            relative_error: 0.065625,
            tolerance: 1e-3,
        });
        let text = report(comparison, RenderOptions::default()).to_string();
        assert!(text.contains("Warning: side B: summed canonical total 149.500000"));
    }

    #[test]
    fn force_block_reports_statistics_and_exclusions() {
        let a = vec![Force::new(1.0, 0.0, 0.0), Force::new(1.0, 0.0, 0.0)];
        let b = vec![Force::new(2.0, 0.0, 0.0), Force::zeros()];
        let mut report = report(energies(), RenderOptions::default());
        report.forces = Some(compare_forces(&a, &b).unwrap());

        let text = report.to_string();
        assert!(text.contains("Force comparison over 2 particles (OpenMM projected onto Amber)"));
        assert!(text.contains("Projection:\n  Mean:          0.500000"));
        assert!(text.contains("  Excluded: 1 (zero reference force)"));
        assert!(text.contains("Relative error:\n  Mean:"));
        assert!(text.contains("#1        relative error        2.000000  projection n/a"));
    }

    #[test]
    fn empty_force_statistics_render_as_no_data() {
        let mut report = report(energies(), RenderOptions::default());
        report.forces = Some(compare_forces(&[], &[]).unwrap());

        let text = report.to_string();
        assert!(text.contains("Projection:\n  no data"));
        assert!(text.contains("Relative error:\n  no data"));
        assert!(!text.contains("Worst particles"));
    }
}
