use crate::core::models::ids::HelixId;
use crate::core::physics::PhysicsWorld;
use crate::engine::context::OptimizationContext;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::state::{OptimizationState, Termination};
use rand::Rng;
use tracing::{debug, info, instrument};

/// Cooling schedule: falls from `helix_count` at step 0 to zero at `kmax`.
pub fn temperature(k: usize, kmax: usize, helix_count: usize) -> f64 {
    if kmax == 0 {
        return 0.0;
    }
    let inv_e = (-1.0f64).exp();
    let x = k as f64 / kmax as f64;
    let normalized = ((-x).exp() - inv_e) / (1.0 - inv_e);
    normalized.max(0.0) * helix_count as f64
}

/// Probability of accepting a move that changes the energy by `delta` at `temperature`.
pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
    if delta < 0.0 {
        1.0
    } else if temperature <= 0.0 {
        0.0
    } else {
        (-delta / temperature).exp()
    }
}

/// Annealing over base counts.
///
/// Each step starts from the reference placements, picks a helix uniformly and gives it a base
/// count a random distance from its initial count. Worse configurations are accepted with the
/// Boltzmann probability at the current temperature; rejected steps restore only the modified
/// helix.
#[instrument(skip_all, name = "simulated_annealing")]
pub fn run<W: PhysicsWorld + ?Sized, R: Rng>(
    ctx: &mut OptimizationContext<'_, W>,
    state: &mut OptimizationState,
    rng: &mut R,
) -> Result<Termination, EngineError> {
    if !ctx.settle()? {
        return Ok(Termination::Cancelled);
    }
    let mut energy = ctx.total_separation();
    ctx.submit_current(state);
    state.record_trial(None, None, energy, true);
    info!(total = energy, "Baseline settled.");

    let helix_count = ctx.topology.len();
    if helix_count == 0 {
        return Ok(Termination::Settled);
    }
    let minimum = ctx
        .config
        .effective_min_base_count(ctx.topology.spec());
    let annealing = &ctx.config.annealing;
    let (kmax, emax, base_range) = (annealing.kmax, annealing.emax, annealing.base_range);

    ctx.reporter.report(Progress::TaskStart {
        total_steps: kmax as u64,
    });
    for k in 0..kmax {
        if !ctx.is_running() {
            ctx.reporter.report(Progress::TaskFinish);
            return Ok(Termination::Cancelled);
        }
        if energy <= emax {
            break;
        }

        let t = temperature(k, kmax, helix_count);
        let id = HelixId(rng.gen_range(0..helix_count));
        let helix = ctx.topology.helix(id);
        let previous = helix.base_count();
        let initial = helix.initial_base_count();

        let distance = 1 + rng.gen_range(0..base_range);
        let candidate = if rng.gen_bool(0.5) {
            initial.saturating_add(distance)
        } else {
            initial.saturating_sub(distance)
        }
        .max(minimum);

        ctx.reset_to_reference();
        ctx.topology.rebuild_helix(&mut *ctx.world, id, candidate)?;
        if !ctx.settle()? {
            ctx.reporter.report(Progress::TaskFinish);
            return Ok(Termination::Cancelled);
        }

        let new_energy = ctx.total_separation();
        let probability = acceptance_probability(new_energy - energy, t);
        let accepted = probability >= 1.0 || rng.r#gen::<f64>() < probability;
        if accepted {
            energy = new_energy;
            ctx.submit_current(state);
        } else {
            ctx.topology.rebuild_helix(&mut *ctx.world, id, previous)?;
        }
        debug!(
            step = k,
            temperature = t,
            helix = id.index(),
            bases = candidate,
            total = new_energy,
            accepted,
            "Annealing step."
        );
        state.record_trial(Some(id), Some(candidate), new_energy, accepted);
        ctx.reporter.report(Progress::TaskIncrement);
    }
    ctx.reporter.report(Progress::TaskFinish);

    info!(
        energy,
        best = state.best_total(),
        "Simulated annealing finished."
    );
    if energy <= emax {
        Ok(Termination::TargetReached)
    } else {
        Ok(Termination::BudgetExhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cancel::{CancellationToken, RunningPredicate};
    use crate::engine::config::{AnnealingConfig, RelaxationConfig, Strategy};
    use crate::engine::progress::ProgressReporter;
    use crate::engine::tasks::testing::fixture;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn anneal(
        config: &RelaxationConfig,
        running: &dyn RunningPredicate,
        seed: u64,
    ) -> (Termination, OptimizationState<'static>, Vec<u32>) {
        let (mut world, mut topology) = fixture();
        let reporter = ProgressReporter::new();
        let mut state = OptimizationState::new(Strategy::SimulatedAnnealing);
        let mut rng = StdRng::seed_from_u64(seed);
        let mut ctx = OptimizationContext {
            topology: &mut topology,
            world: &mut world,
            config,
            running,
            reporter: &reporter,
        };
        let termination = run(&mut ctx, &mut state, &mut rng).unwrap();
        let counts = topology.base_counts();
        (termination, state, counts)
    }

    fn config(kmax: usize, emax: f64, base_range: u32) -> RelaxationConfig {
        RelaxationConfig {
            strategy: Strategy::SimulatedAnnealing,
            annealing: AnnealingConfig {
                kmax,
                emax,
                base_range,
            },
            ..RelaxationConfig::default()
        }
    }

    #[test]
    fn temperature_falls_from_helix_count_to_zero() {
        assert!((temperature(0, 100, 6) - 6.0).abs() < 1e-12);
        assert!(temperature(100, 100, 6).abs() < 1e-12);
        assert_eq!(temperature(150, 100, 6), 0.0);
        let mut last = f64::INFINITY;
        for k in 0..=100 {
            let t = temperature(k, 100, 6);
            assert!(t <= last);
            last = t;
        }
        assert_eq!(temperature(0, 0, 6), 0.0);
    }

    #[test]
    fn acceptance_follows_boltzmann_and_zero_temperature_is_greedy() {
        assert_eq!(acceptance_probability(-0.5, 0.0), 1.0);
        assert_eq!(acceptance_probability(0.5, 0.0), 0.0);
        assert!((acceptance_probability(1.0, 2.0) - (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn best_is_a_running_minimum_of_accepted_energies() {
        let (_, state, _) = anneal(&config(60, -1.0, 3), &|| true, 7);
        let trials = state.trials();
        assert_eq!(trials.len(), 61);

        let min_accepted = trials
            .iter()
            .filter(|t| t.accepted)
            .map(|t| t.total)
            .fold(f64::INFINITY, f64::min);
        assert_eq!(state.best_total(), min_accepted);
        for trial in trials {
            assert!(state.best_total() <= trial.best);
        }
    }

    #[test]
    fn perturbations_stay_within_range_of_initial_counts() {
        let (_, topology) = fixture();
        let initial = topology.base_counts();

        let (_, state, _) = anneal(&config(80, -1.0, 2), &|| true, 11);
        for trial in state.trials().iter().skip(1) {
            let helix = trial.helix.unwrap();
            let bases = trial.base_count.unwrap() as i64;
            let distance = (bases - initial[helix] as i64).abs();
            assert!((1..=2).contains(&distance), "distance {distance}");
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_run() {
        let (_, a, counts_a) = anneal(&config(40, -1.0, 2), &|| true, 3);
        let (_, b, counts_b) = anneal(&config(40, -1.0, 2), &|| true, 3);
        assert_eq!(a.trials(), b.trials());
        assert_eq!(counts_a, counts_b);
    }

    #[test]
    fn reaching_emax_stops_early() {
        let (termination, state, _) = anneal(&config(50, f64::INFINITY, 1), &|| true, 1);
        assert_eq!(termination, Termination::TargetReached);
        assert_eq!(state.trials().len(), 1);
    }

    #[test]
    fn cancellation_returns_best_so_far() {
        let token = CancellationToken::new();
        let cancel_after = token.clone();
        let calls = std::cell::Cell::new(0usize);
        let running = move || {
            calls.set(calls.get() + 1);
            if calls.get() > 20 {
                cancel_after.cancel();
            }
            !cancel_after.is_cancelled()
        };
        let (termination, state, _) = anneal(&config(1000, -1.0, 1), &running, 5);
        assert_eq!(termination, Termination::Cancelled);
        assert!(state.best().is_some());
        assert!(state.trials().len() < 1001);
    }
}
