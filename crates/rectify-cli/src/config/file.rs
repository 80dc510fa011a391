use crate::error::{CliError, Result};
use rectify::core::dna::HelixSpec;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileOptimizationConfig {
    pub min_base_count: Option<u32>,
    pub time_step: Option<f64>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileGradientDescentConfig {
    pub max_passes: Option<usize>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileAnnealingConfig {
    pub kmax: Option<usize>,
    pub emax: Option<f64>,
    pub base_range: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePhysicsConfig {
    pub stiffness: Option<f64>,
    pub sleep_threshold: Option<f64>,
}

/// The TOML configuration file. Every value is optional; command-line arguments take
/// precedence and [`DefaultsConfig`](super::defaults::DefaultsConfig) fills the rest.
///
/// ```toml
/// strategy = "simulated-annealing"
/// seed = 42
///
/// [optimization]
/// min-base-count = 7
///
/// [simulated-annealing]
/// kmax = 500
/// base-range = 2
///
/// [helix]
/// radius = 1.0
/// ```
#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub strategy: Option<String>,
    pub seed: Option<u64>,
    pub optimization: Option<FileOptimizationConfig>,
    pub gradient_descent: Option<FileGradientDescentConfig>,
    pub simulated_annealing: Option<FileAnnealingConfig>,
    pub physics: Option<FilePhysicsConfig>,
    pub helix: Option<HelixSpec>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::file(path, e))?;
        toml::from_str(&content).map_err(|e| CliError::file(path, e))
    }
}
