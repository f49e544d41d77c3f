use mdcheck::engine::config::{DEFAULT_PRECISION, DEFAULT_TOTAL_TOLERANCE, DEFAULT_WORST_PARTICLES};

pub struct DefaultsConfig {
    pub precision: usize,
    pub show_delta: bool,
    pub include_total: bool,
    pub worst_particles: usize,
    pub total_tolerance: f64,
    pub strict_total: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            show_delta: false,
            include_total: false,
            worst_particles: DEFAULT_WORST_PARTICLES,
            total_tolerance: DEFAULT_TOTAL_TOLERANCE,
            strict_total: false,
        }
    }
}
