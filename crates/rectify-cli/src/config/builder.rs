use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::RelaxArgs;
use crate::error::{CliError, Result};
use rectify::core::dna::HelixSpec;
use rectify::core::physics::relaxation::RelaxationParams;
use rectify::engine::config::{self as core_config, Strategy};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Merges defaults, the config file, `--set` pairs and explicit arguments, in increasing order
/// of precedence.
pub fn build_config(args: &RelaxArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };
    let file_config = apply_set_values(file_config, &args.set_values)?;

    let strategy_name = args
        .strategy
        .as_deref()
        .or(file_config.strategy.as_deref())
        .unwrap_or(&defaults.strategy);
    let strategy: Strategy = strategy_name
        .parse()
        .map_err(|e: core_config::ConfigError| CliError::Config(e.to_string()))?;

    let opt_file = file_config.optimization.unwrap_or_default();
    let gd_file = file_config.gradient_descent.unwrap_or_default();
    let sa_file = file_config.simulated_annealing.unwrap_or_default();

    let core_config = core_config::RelaxationConfigBuilder::new()
        .strategy(strategy)
        .min_base_count(
            args.min_base_count
                .or(opt_file.min_base_count)
                .unwrap_or(defaults.min_base_count),
        )
        .time_step(opt_file.time_step.unwrap_or(defaults.time_step))
        .max_passes(
            args.max_passes
                .or(gd_file.max_passes)
                .unwrap_or(defaults.max_passes),
        )
        .kmax(args.kmax.or(sa_file.kmax).unwrap_or(defaults.kmax))
        .emax(args.emax.or(sa_file.emax).unwrap_or(defaults.emax))
        .base_range(
            args.base_range
                .or(sa_file.base_range)
                .unwrap_or(defaults.base_range),
        )
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let physics = merge_physics(file_config.physics.unwrap_or_default(), &defaults)?;
    let helix_spec = resolve_helix_spec(args.helix_params.as_deref(), file_config.helix)?;

    debug!(?core_config, ?physics, ?helix_spec, "Configuration merged.");

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        trace_path: args.trace.clone(),
        seed: args.seed.or(file_config.seed),
        helix_spec,
        physics,
        core_config,
    })
}

fn merge_physics(
    file_val: super::file::FilePhysicsConfig,
    defaults: &DefaultsConfig,
) -> Result<RelaxationParams> {
    let params = RelaxationParams {
        stiffness: file_val.stiffness.unwrap_or(defaults.stiffness),
        sleep_threshold: file_val.sleep_threshold.unwrap_or(defaults.sleep_threshold),
    };
    for (name, value) in [
        ("physics.stiffness", params.stiffness),
        ("physics.sleep-threshold", params.sleep_threshold),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(CliError::Config(format!(
                "`{}` must be a positive number, got {}",
                name, value
            )));
        }
    }
    Ok(params)
}

/// A helix parameter file given on the command line replaces the `[helix]` table entirely.
fn resolve_helix_spec(cli_path: Option<&Path>, file_val: Option<HelixSpec>) -> Result<HelixSpec> {
    if let Some(path) = cli_path {
        return HelixSpec::load(path).map_err(|e| CliError::file(path, e));
    }
    let spec = file_val.unwrap_or_default();
    spec.validate()
        .map_err(|e| CliError::Config(format!("[helix] {}", e)))?;
    Ok(spec)
}

fn parse_value<T: FromStr>(key: &str, value: &str, kind: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value))
    })
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let Some((key, value_str)) = kv_pair.split_once('=') else {
            return Err(CliError::Config(format!(
                "Invalid --set format: '{}'. Expected KEY=VALUE.",
                kv_pair
            )));
        };
        let key = key.trim();

        match key {
            "strategy" => config.strategy = Some(value_str.trim().to_string()),
            "seed" => config.seed = Some(parse_value(key, value_str, "integer")?),
            "optimization.min-base-count" => {
                config
                    .optimization
                    .get_or_insert_with(Default::default)
                    .min_base_count = Some(parse_value(key, value_str, "integer")?);
            }
            "optimization.time-step" => {
                config
                    .optimization
                    .get_or_insert_with(Default::default)
                    .time_step = Some(parse_value(key, value_str, "float")?);
            }
            "gradient-descent.max-passes" => {
                config
                    .gradient_descent
                    .get_or_insert_with(Default::default)
                    .max_passes = Some(parse_value(key, value_str, "integer")?);
            }
            "simulated-annealing.kmax" => {
                config
                    .simulated_annealing
                    .get_or_insert_with(Default::default)
                    .kmax = Some(parse_value(key, value_str, "integer")?);
            }
            "simulated-annealing.emax" => {
                config
                    .simulated_annealing
                    .get_or_insert_with(Default::default)
                    .emax = Some(parse_value(key, value_str, "float")?);
            }
            "simulated-annealing.base-range" => {
                config
                    .simulated_annealing
                    .get_or_insert_with(Default::default)
                    .base_range = Some(parse_value(key, value_str, "integer")?);
            }
            "physics.stiffness" => {
                config
                    .physics
                    .get_or_insert_with(Default::default)
                    .stiffness = Some(parse_value(key, value_str, "float")?);
            }
            "physics.sleep-threshold" => {
                config
                    .physics
                    .get_or_insert_with(Default::default)
                    .sleep_threshold = Some(parse_value(key, value_str, "float")?);
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
