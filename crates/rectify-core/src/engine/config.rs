use crate::core::dna::HelixSpec;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Unknown strategy '{0}' (expected gradient-descent, simulated-annealing or rectify)")]
    UnknownStrategy(String),
}

/// How base counts are searched once the scene has been built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Greedy ±1 base trials per helix, keeping strict improvements.
    #[default]
    GradientDescent,
    /// Randomized trials around the initial base counts with a cooling acceptance rule.
    SimulatedAnnealing,
    /// Settle once and keep the settled state without changing any base count.
    Rectify,
}

impl Strategy {
    pub fn name(self) -> &'static str {
        match self {
            Strategy::GradientDescent => "gradient-descent",
            Strategy::SimulatedAnnealing => "simulated-annealing",
            Strategy::Rectify => "rectify",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "gradient-descent" | "gd" => Ok(Strategy::GradientDescent),
            "simulated-annealing" | "sa" => Ok(Strategy::SimulatedAnnealing),
            "rectify" | "rectification" => Ok(Strategy::Rectify),
            _ => Err(ConfigError::UnknownStrategy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GradientDescentConfig {
    /// Upper bound on full passes over all helices; passes stop early once one brings no
    /// improvement.
    pub max_passes: usize,
}

impl Default for GradientDescentConfig {
    fn default() -> Self {
        Self { max_passes: 1 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingConfig {
    /// Number of annealing steps.
    pub kmax: usize,
    /// Stop as soon as the accepted total separation is at or below this value.
    pub emax: f64,
    /// Perturbations move a base count by `1 + uniform[0, base_range)` from its initial value.
    pub base_range: u32,
}

impl Default for AnnealingConfig {
    fn default() -> Self {
        Self {
            kmax: 100,
            emax: 0.0,
            base_range: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RelaxationConfig {
    pub strategy: Strategy,
    /// Lower bound for every trial base count. Never below what the helix geometry allows.
    pub min_base_count: u32,
    /// Fixed physics time step in seconds.
    pub time_step: f64,
    pub gradient_descent: GradientDescentConfig,
    pub annealing: AnnealingConfig,
}

impl RelaxationConfig {
    /// The trial lower bound actually used for `spec`.
    pub fn effective_min_base_count(&self, spec: &HelixSpec) -> u32 {
        self.min_base_count.max(spec.min_base_count())
    }
}

impl Default for RelaxationConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::default(),
            min_base_count: 7,
            time_step: 1.0 / 60.0,
            gradient_descent: GradientDescentConfig::default(),
            annealing: AnnealingConfig::default(),
        }
    }
}

#[derive(Default)]
pub struct RelaxationConfigBuilder {
    strategy: Option<Strategy>,
    min_base_count: Option<u32>,
    time_step: Option<f64>,
    max_passes: Option<usize>,
    kmax: Option<usize>,
    emax: Option<f64>,
    base_range: Option<u32>,
}

impl RelaxationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }
    pub fn min_base_count(mut self, count: u32) -> Self {
        self.min_base_count = Some(count);
        self
    }
    pub fn time_step(mut self, seconds: f64) -> Self {
        self.time_step = Some(seconds);
        self
    }
    pub fn max_passes(mut self, passes: usize) -> Self {
        self.max_passes = Some(passes);
        self
    }
    pub fn kmax(mut self, steps: usize) -> Self {
        self.kmax = Some(steps);
        self
    }
    pub fn emax(mut self, energy: f64) -> Self {
        self.emax = Some(energy);
        self
    }
    pub fn base_range(mut self, range: u32) -> Self {
        self.base_range = Some(range);
        self
    }

    /// Builds the configuration. The strategy is required; everything else falls back to the
    /// defaults.
    pub fn build(self) -> Result<RelaxationConfig, ConfigError> {
        let defaults = RelaxationConfig::default();
        let config = RelaxationConfig {
            strategy: self
                .strategy
                .ok_or(ConfigError::MissingParameter("strategy"))?,
            min_base_count: self.min_base_count.unwrap_or(defaults.min_base_count),
            time_step: self.time_step.unwrap_or(defaults.time_step),
            gradient_descent: GradientDescentConfig {
                max_passes: self
                    .max_passes
                    .unwrap_or(defaults.gradient_descent.max_passes),
            },
            annealing: AnnealingConfig {
                kmax: self.kmax.unwrap_or(defaults.annealing.kmax),
                emax: self.emax.unwrap_or(defaults.annealing.emax),
                base_range: self.base_range.unwrap_or(defaults.annealing.base_range),
            },
        };

        if !(config.time_step.is_finite() && config.time_step > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "time_step",
                reason: format!("{} is not a positive number of seconds", config.time_step),
            });
        }
        if config.gradient_descent.max_passes == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_passes",
                reason: "at least one pass is required".to_string(),
            });
        }
        if config.annealing.base_range == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "base_range",
                reason: "must be at least 1".to_string(),
            });
        }
        if config.annealing.emax.is_nan() {
            return Err(ConfigError::InvalidParameter {
                name: "emax",
                reason: "must be a number".to_string(),
            });
        }
        Ok(config)
    }
}
