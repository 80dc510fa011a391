use crate::cli::RelaxArgs;
use crate::config::{self, AppConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rectify::{
    core::io::{
        scene::{SceneFormat, SceneMetadata},
        trace::write_trace,
        traits::SceneFile,
    },
    core::models::topology::Topology,
    core::physics::relaxation::RelaxationWorld,
    engine::{
        cancel::CancellationToken,
        error::EngineError,
        progress::ProgressReporter,
        state::{Solution, StoreBestCallback},
    },
    workflows::relax::{self, RelaxationResult},
};
use std::path::Path;
use tracing::{info, warn};

pub async fn run(args: RelaxArgs, token: CancellationToken) -> Result<()> {
    let app = config::build_config(&args)?;
    relax_scene(&app, &token, CliProgressHandler::new())
}

/// Loads, relaxes and writes one scene. Runs the synchronous workflow on the current worker
/// thread so the Ctrl-C task keeps being polled.
pub(crate) fn relax_scene(
    app: &AppConfig,
    token: &CancellationToken,
    progress_handler: CliProgressHandler,
) -> Result<()> {
    info!("Loading input scene from {:?}", &app.input_path);
    let (description, _metadata) = SceneFormat::read_from_path(&app.input_path)
        .map_err(|e| CliError::file(&app.input_path, e))?;

    let mut world = RelaxationWorld::new(app.physics);
    let mut topology = Topology::from_description(&mut world, app.helix_spec, &description)
        .map_err(EngineError::from)?;
    if topology.is_empty() {
        warn!("The scene has no helices; the output will equal the input.");
    }

    let seed = app.seed.unwrap_or_else(rand::random);
    info!(seed, "Random number generator seeded.");
    let mut rng = StdRng::seed_from_u64(seed);

    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let store_best: StoreBestCallback = Box::new(|solution: &Solution| {
        info!(
            min = solution.stats.min,
            max = solution.stats.max,
            average = solution.stats.average,
            total = solution.stats.total,
            "Stored new best configuration."
        );
    });

    println!(
        "Relaxing {} helices from {} with {} (press Ctrl-C to stop early)...",
        topology.len(),
        app.input_path.display(),
        app.core_config.strategy
    );

    let result = tokio::task::block_in_place(|| {
        relax::run(
            &mut topology,
            &mut world,
            &app.core_config,
            token,
            &reporter,
            Some(store_best),
            &mut rng,
        )
    })?;

    if result.cancelled {
        println!("Relaxation interrupted; writing the best configuration found so far.");
    }
    println!("Initial: {}", result.initial.stats);
    println!("Result:  {}", result.best.stats);

    let metadata = SceneMetadata::with_header(header_lines(&app.input_path, &result));
    SceneFormat::write_to_path(&result.best.description, &metadata, &app.output_path)
        .map_err(|e| CliError::file(&app.output_path, e))?;
    info!("Wrote relaxed scene to {:?}", &app.output_path);
    println!("✓ Relaxed scene written to: {}", app.output_path.display());

    if let Some(trace_path) = &app.trace_path {
        write_trace(trace_path, &result.trials).map_err(|e| CliError::file(trace_path, e))?;
        info!(trials = result.trials.len(), "Wrote trial trace to {:?}", trace_path);
    }

    Ok(())
}

/// Comment lines recording where the scene came from and how much the strain changed.
pub(crate) fn header_lines(input: &Path, result: &RelaxationResult) -> Vec<String> {
    let (initial, best) = (&result.initial.stats, &result.best.stats);
    vec![
        format!(
            "Relaxation of original {} file. {} helices.",
            input.display(),
            result.best.description.helices.len()
        ),
        format!(
            "Total separation: Initial: min: {}, max: {}, average: {}, total: {} nm, final: min: {}, max: {}, average: {}, total: {} nm",
            initial.min,
            initial.max,
            initial.average,
            initial.total,
            best.min,
            best.max,
            best.average,
            best.total
        ),
    ]
}
