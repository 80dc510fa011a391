pub struct DefaultsConfig {
    pub strategy: String,
    pub min_base_count: u32,
    pub time_step: f64,
    pub max_passes: usize,
    pub kmax: usize,
    pub emax: f64,
    pub base_range: u32,
    pub stiffness: f64,
    pub sleep_threshold: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            strategy: "gradient-descent".to_string(),
            min_base_count: 7,
            time_step: 1.0 / 60.0,
            max_passes: 1,
            kmax: 100,
            emax: 0.0,
            base_range: 1,
            stiffness: 30.0,
            sleep_threshold: 1e-4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rectify::core::physics::relaxation::RelaxationParams;
    use rectify::engine::config::{RelaxationConfig, Strategy};

    #[test]
    fn defaults_agree_with_the_library() {
        let defaults = DefaultsConfig::default();
        let core = RelaxationConfig::default();
        let physics = RelaxationParams::default();

        assert_eq!(defaults.strategy.parse::<Strategy>(), Ok(core.strategy));
        assert_eq!(defaults.min_base_count, core.min_base_count);
        assert_eq!(defaults.time_step, core.time_step);
        assert_eq!(defaults.max_passes, core.gradient_descent.max_passes);
        assert_eq!(defaults.kmax, core.annealing.kmax);
        assert_eq!(defaults.emax, core.annealing.emax);
        assert_eq!(defaults.base_range, core.annealing.base_range);
        assert_eq!(defaults.stiffness, physics.stiffness);
        assert_eq!(defaults.sleep_threshold, physics.sleep_threshold);
    }
}
