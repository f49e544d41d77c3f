use crate::core::units::EnergyUnit;
use thiserror::Error;

pub const DEFAULT_TOTAL_TOLERANCE: f64 = 1e-3;
pub const DEFAULT_PRECISION: usize = 6;
pub const DEFAULT_WORST_PARTICLES: usize = 5;
const MAX_PRECISION: usize = 15;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalCheckConfig {
    /// Relative tolerance between the summed canonical total and the reported total.
    /// Applied as an absolute tolerance when the reported total is exactly zero.
    pub relative_tolerance: f64,
    /// Promote a total mismatch from a warning to a failed comparison.
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnergyOptions {
    pub include_total: bool,
    pub total_check: TotalCheckConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub precision: usize,
    pub show_delta: bool,
    pub worst_particles: usize,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComparisonConfig {
    pub label_a: Option<String>,
    pub label_b: Option<String>,
    pub report_unit: Option<EnergyUnit>,
    pub energy: EnergyOptions,
    pub render: RenderOptions,
}

impl Default for EnergyOptions {
    fn default() -> Self {
        Self {
            include_total: false,
            total_check: TotalCheckConfig {
                relative_tolerance: DEFAULT_TOTAL_TOLERANCE,
                strict: false,
            },
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            show_delta: false,
            worst_particles: DEFAULT_WORST_PARTICLES,
        }
    }
}

#[derive(Default)]
pub struct ComparisonConfigBuilder {
    label_a: Option<String>,
    label_b: Option<String>,
    report_unit: Option<EnergyUnit>,
    include_total: Option<bool>,
    total_tolerance: Option<f64>,
    strict_total: Option<bool>,
    precision: Option<usize>,
    show_delta: Option<bool>,
    worst_particles: Option<usize>,
}

impl ComparisonConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label_a(mut self, label: impl Into<String>) -> Self {
        self.label_a = Some(label.into());
        self
    }
    pub fn label_b(mut self, label: impl Into<String>) -> Self {
        self.label_b = Some(label.into());
        self
    }
    pub fn report_unit(mut self, unit: EnergyUnit) -> Self {
        self.report_unit = Some(unit);
        self
    }
    pub fn include_total(mut self, include: bool) -> Self {
        self.include_total = Some(include);
        self
    }
    pub fn total_tolerance(mut self, tolerance: f64) -> Self {
        self.total_tolerance = Some(tolerance);
        self
    }
    pub fn strict_total(mut self, strict: bool) -> Self {
        self.strict_total = Some(strict);
        self
    }
    pub fn precision(mut self, digits: usize) -> Self {
        self.precision = Some(digits);
        self
    }
    pub fn show_delta(mut self, show: bool) -> Self {
        self.show_delta = Some(show);
        self
    }
    pub fn worst_particles(mut self, count: usize) -> Self {
        self.worst_particles = Some(count);
        self
    }

    pub fn build(self) -> Result<ComparisonConfig, ConfigError> {
        let relative_tolerance = self.total_tolerance.unwrap_or(DEFAULT_TOTAL_TOLERANCE);
        if !relative_tolerance.is_finite() || relative_tolerance < 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "total_tolerance",
                reason: format!("must be a finite, non-negative number (got {relative_tolerance})"),
            });
        }

        let precision = self.precision.unwrap_or(DEFAULT_PRECISION);
        if precision > MAX_PRECISION {
            return Err(ConfigError::InvalidParameter {
                name: "precision",
                reason: format!("must be at most {MAX_PRECISION} digits (got {precision})"),
            });
        }

        let energy = EnergyOptions {
            include_total: self.include_total.unwrap_or(false),
            total_check: TotalCheckConfig {
                relative_tolerance,
                strict: self.strict_total.unwrap_or(false),
            },
        };

        let render = RenderOptions {
            precision,
            show_delta: self.show_delta.unwrap_or(false),
            worst_particles: self.worst_particles.unwrap_or(DEFAULT_WORST_PARTICLES),
        };

        Ok(ComparisonConfig {
            label_a: self.label_a,
            label_b: self.label_b,
            report_unit: self.report_unit,
            energy,
            render,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_with_no_overrides_matches_default() {
        let config = ComparisonConfigBuilder::new().build().unwrap();
        assert_eq!(config, ComparisonConfig::default());
        assert_eq!(config.energy.total_check.relative_tolerance, 1e-3);
        assert!(!config.energy.total_check.strict);
        assert_eq!(config.render.precision, 6);
    }

    #[test]
    fn build_applies_every_override() {
        let config = ComparisonConfigBuilder::new()
            .label_a("CHARMM")
            .label_b("OpenMM")
            .report_unit(EnergyUnit::KjPerMol)
            .include_total(true)
            .total_tolerance(1e-4)
            .strict_total(true)
            .precision(2)
            .show_delta(true)
            .worst_particles(0)
            .build()
            .unwrap();

        assert_eq!(config.label_a.as_deref(), Some("CHARMM"));
        assert_eq!(config.label_b.as_deref(), Some("OpenMM"));
        assert_eq!(config.report_unit, Some(EnergyUnit::KjPerMol));
        assert!(config.energy.include_total);
        assert_eq!(config.energy.total_check.relative_tolerance, 1e-4);
        assert!(config.energy.total_check.strict);
        assert_eq!(config.render.precision, 2);
        assert!(config.render.show_delta);
        assert_eq!(config.render.worst_particles, 0);
    }

    #[test]
    fn negative_or_nan_tolerance_is_rejected() {
        for tolerance in [-1e-3, f64::NAN, f64::INFINITY] {
            let result = ComparisonConfigBuilder::new()
                .total_tolerance(tolerance)
                .build();
            assert!(matches!(
                result,
                Err(ConfigError::InvalidParameter {
                    name: "total_tolerance",
                    ..
                })
            ));
        }
    }

    #[test]
    fn excessive_precision_is_rejected() {
        let result = ComparisonConfigBuilder::new().precision(30).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "precision",
                ..
            })
        ));
    }
}
