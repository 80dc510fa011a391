use crate::core::io::trace::TrialRecord;
use crate::core::models::topology::Topology;
use crate::core::physics::PhysicsWorld;
use crate::engine::cancel::RunningPredicate;
use crate::engine::config::{RelaxationConfig, Strategy};
use crate::engine::context::OptimizationContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::state::{OptimizationState, Solution, StoreBestCallback, Termination};
use crate::engine::tasks;
use rand::Rng;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct RelaxationResult {
    /// The scene as built, measured before any settling.
    pub initial: Solution,
    /// Lowest total separation seen. Equals `initial` if the run was cancelled before the
    /// baseline settled.
    pub best: Solution,
    pub trials: Vec<TrialRecord>,
    pub termination: Termination,
    pub cancelled: bool,
}

/// Runs the configured strategy on `topology`, leaving it and `world` in the best configuration
/// found.
///
/// Cancellation through `running` is not an error: the result then carries the best
/// configuration found so far and `cancelled` is set.
#[instrument(skip_all, name = "relaxation_workflow", fields(strategy = %config.strategy, helices = topology.len()))]
pub fn run<W: PhysicsWorld + ?Sized, R: Rng>(
    topology: &mut Topology,
    world: &mut W,
    config: &RelaxationConfig,
    running: &dyn RunningPredicate,
    reporter: &ProgressReporter,
    store_best: Option<StoreBestCallback<'_>>,
    rng: &mut R,
) -> Result<RelaxationResult, EngineError> {
    // === Phase 1: Measure the scene as built ===
    reporter.report(Progress::PhaseStart {
        name: "Measuring Initial State",
    });
    let initial = Solution::capture(topology, &*world);
    info!(
        min = initial.stats.min,
        max = initial.stats.max,
        average = initial.stats.average,
        total = initial.stats.total,
        connections = initial.stats.connections,
        "Initial separation measured."
    );
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Optimize ===
    let mut state = OptimizationState::new(config.strategy);
    if let Some(callback) = store_best {
        state = state.with_store_best(callback);
    }

    let phase = match config.strategy {
        Strategy::GradientDescent => "Gradient Descent",
        Strategy::SimulatedAnnealing => "Simulated Annealing",
        Strategy::Rectify => "Rectification",
    };
    reporter.report(Progress::PhaseStart { name: phase });
    let termination = {
        let mut ctx = OptimizationContext {
            topology: &mut *topology,
            world: &mut *world,
            config,
            running,
            reporter,
        };
        match config.strategy {
            Strategy::GradientDescent => tasks::gradient_descent::run(&mut ctx, &mut state)?,
            Strategy::SimulatedAnnealing => {
                tasks::simulated_annealing::run(&mut ctx, &mut state, rng)?
            }
            Strategy::Rectify => tasks::rectify::run(&mut ctx, &mut state)?,
        }
    };
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Collect results ===
    let (best, trials) = state.into_parts();
    let best = best.unwrap_or_else(|| {
        warn!("No configuration was settled before the run stopped; keeping the initial scene.");
        initial.clone()
    });
    best.restore(topology, world)?;

    let cancelled = termination == Termination::Cancelled;
    if cancelled {
        reporter.report(Progress::Message(
            "Relaxation cancelled; keeping the best configuration so far.".to_string(),
        ));
    }
    info!(
        ?termination,
        trials = trials.len(),
        total = best.stats.total,
        "Relaxation finished."
    );

    Ok(RelaxationResult {
        initial,
        best,
        trials,
        termination,
        cancelled,
    })
}
