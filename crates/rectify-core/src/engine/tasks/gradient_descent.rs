use crate::core::models::ids::HelixId;
use crate::core::physics::PhysicsWorld;
use crate::engine::context::OptimizationContext;
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::state::{OptimizationState, Termination};
use tracing::{debug, info, instrument};

/// Greedy search over base counts.
///
/// After a settled baseline, every helix in index order tries one base fewer and one base more
/// than it had when its turn started. Each trial starts from the reference placements. A trial is
/// kept only if its total separation is strictly below the best so far; otherwise the helix is
/// rebuilt with the count it had before the trial. Passes repeat up to the configured budget
/// while they keep improving.
#[instrument(skip_all, name = "gradient_descent")]
pub fn run<W: PhysicsWorld + ?Sized>(
    ctx: &mut OptimizationContext<'_, W>,
    state: &mut OptimizationState,
) -> Result<Termination, EngineError> {
    if !ctx.settle()? {
        return Ok(Termination::Cancelled);
    }
    let baseline = ctx.total_separation();
    ctx.submit_current(state);
    state.record_trial(None, None, baseline, true);
    info!(total = baseline, "Baseline settled.");

    let helix_count = ctx.topology.len();
    let minimum = ctx
        .config
        .effective_min_base_count(ctx.topology.spec());
    let max_passes = ctx.config.gradient_descent.max_passes;

    for pass in 0..max_passes {
        ctx.reporter.status(format!(
            "Pass {}/{}, best {:.4} nm",
            pass + 1,
            max_passes,
            state.best_total()
        ));
        ctx.reporter.report(Progress::TaskStart {
            total_steps: helix_count as u64,
        });

        let mut improved = false;
        for index in 0..helix_count {
            let id = HelixId(index);
            let start = ctx.topology.helix(id).base_count();
            let mut kept = start;

            let fewer = start.saturating_sub(1).max(minimum);
            let more = (start + 1).max(minimum);
            let candidates = if fewer == more { vec![fewer] } else { vec![fewer, more] };

            for candidate in candidates {
                if !ctx.is_running() {
                    ctx.reporter.report(Progress::TaskFinish);
                    return Ok(Termination::Cancelled);
                }
                if candidate == kept {
                    continue;
                }

                ctx.reset_to_reference();
                ctx.topology
                    .rebuild_helix(&mut *ctx.world, id, candidate)?;
                if !ctx.settle()? {
                    ctx.reporter.report(Progress::TaskFinish);
                    return Ok(Termination::Cancelled);
                }

                let total = ctx.total_separation();
                let accepted = total < state.best_total();
                if accepted {
                    kept = candidate;
                    improved = true;
                    ctx.submit_current(state);
                    debug!(helix = index, bases = candidate, total, "Kept trial.");
                } else {
                    ctx.topology.rebuild_helix(&mut *ctx.world, id, kept)?;
                }
                state.record_trial(Some(id), Some(candidate), total, accepted);
            }
            ctx.reporter.report(Progress::TaskIncrement);
        }
        ctx.reporter.report(Progress::TaskFinish);

        info!(
            pass = pass + 1,
            best = state.best_total(),
            improved,
            "Gradient descent pass finished."
        );
        if !improved {
            return Ok(Termination::Converged);
        }
    }
    Ok(Termination::BudgetExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::cancel::{CancellationToken, RunningPredicate};
    use crate::engine::config::{RelaxationConfig, Strategy};
    use crate::engine::progress::ProgressReporter;
    use crate::engine::tasks::testing::{fixture, straight_pair};

    fn descend(
        config: &RelaxationConfig,
        running: &dyn RunningPredicate,
        world: &mut crate::core::physics::testing::FrozenWorld,
        topology: &mut crate::core::models::topology::Topology,
    ) -> (Termination, OptimizationState<'static>) {
        let reporter = ProgressReporter::new();
        let mut state = OptimizationState::new(Strategy::GradientDescent);
        let mut ctx = OptimizationContext {
            topology,
            world,
            config,
            running,
            reporter: &reporter,
        };
        let termination = run(&mut ctx, &mut state).unwrap();
        (termination, state)
    }

    #[test]
    fn best_total_never_increases_across_trials() {
        let (mut world, mut topology) = fixture();
        let config = RelaxationConfig {
            gradient_descent: crate::engine::config::GradientDescentConfig { max_passes: 3 },
            ..RelaxationConfig::default()
        };
        let (_, state) = descend(&config, &|| true, &mut world, &mut topology);

        let trials = state.trials();
        assert_eq!(trials[0].helix, None);
        for pair in trials.windows(2) {
            assert!(pair[1].best <= pair[0].best);
        }
        let best = state.best().unwrap();
        assert!(best.total() <= trials[0].total);
        assert_eq!(best.total(), state.best_total());
    }

    #[test]
    fn accepted_trials_are_strict_improvements_and_rejected_ones_are_reverted() {
        let (mut world, mut topology) = fixture();
        let before = topology.base_counts();
        let (_, state) = descend(
            &RelaxationConfig::default(),
            &|| true,
            &mut world,
            &mut topology,
        );

        let mut best = f64::INFINITY;
        for trial in state.trials() {
            if trial.accepted {
                assert!(trial.total < best);
                best = trial.total;
            } else {
                assert!(trial.total >= best);
            }
        }
        // Counts differ from the start only where a trial was kept.
        let final_counts = topology.base_counts();
        assert_eq!(final_counts, state.best().unwrap().base_counts());
        for (index, (&a, &b)) in before.iter().zip(&final_counts).enumerate() {
            if a != b {
                assert!(
                    state
                        .trials()
                        .iter()
                        .any(|t| t.accepted && t.helix == Some(index) && t.base_count == Some(b))
                );
            }
        }
    }

    #[test]
    fn one_pass_tries_two_candidates_per_helix() {
        let (mut world, mut topology) = straight_pair();
        let (termination, state) = descend(
            &RelaxationConfig::default(),
            &|| true,
            &mut world,
            &mut topology,
        );
        // Baseline plus two trials for each of the two helices.
        assert_eq!(state.trials().len(), 5);
        assert!(matches!(
            termination,
            Termination::Converged | Termination::BudgetExhausted
        ));
    }

    #[test]
    fn candidates_below_the_minimum_are_clamped_and_skipped() {
        let (mut world, mut topology) = straight_pair();
        let start = topology.base_counts()[0];
        let config = RelaxationConfig {
            min_base_count: start,
            ..RelaxationConfig::default()
        };
        let (_, state) = descend(&config, &|| true, &mut world, &mut topology);

        let helix_zero: Vec<_> = state
            .trials()
            .iter()
            .filter(|t| t.helix == Some(0))
            .collect();
        assert_eq!(helix_zero.len(), 1);
        assert_eq!(helix_zero[0].base_count, Some(start + 1));
    }

    #[test]
    fn helix_below_the_minimum_is_tried_once_at_the_minimum() {
        let (mut world, mut topology) = straight_pair();
        let minimum = topology.base_counts()[0] + 3;
        let config = RelaxationConfig {
            min_base_count: minimum,
            ..RelaxationConfig::default()
        };
        let (_, state) = descend(&config, &|| true, &mut world, &mut topology);

        for helix in 0..2 {
            let tried: Vec<_> = state
                .trials()
                .iter()
                .filter(|t| t.helix == Some(helix))
                .map(|t| t.base_count)
                .collect();
            assert_eq!(tried, vec![Some(minimum)]);
        }
        assert_eq!(state.trials().len(), 3);
    }

    #[test]
    fn cancellation_mid_trial_returns_previous_best() {
        let (mut world, mut topology) = fixture();
        let token = CancellationToken::new();
        // Baseline takes two steps; cancel during the second trial's settle.
        world.cancel_after_steps = Some((world.total_steps + 5, token.clone()));

        let (termination, state) = descend(
            &RelaxationConfig::default(),
            &token,
            &mut world,
            &mut topology,
        );

        assert_eq!(termination, Termination::Cancelled);
        assert!(state.best().is_some());
        let best = state.best_total();
        assert!(state.trials().iter().all(|t| t.best >= best));
    }

    #[test]
    fn physics_failure_propagates_as_engine_error() {
        let (mut world, mut topology) = fixture();
        world.fail_on_step = Some(world.total_steps + 3);

        let reporter = ProgressReporter::new();
        let mut state = OptimizationState::new(Strategy::GradientDescent);
        let config = RelaxationConfig::default();
        let running = || true;
        let mut ctx = OptimizationContext {
            topology: &mut topology,
            world: &mut world,
            config: &config,
            running: &running,
            reporter: &reporter,
        };
        let err = run(&mut ctx, &mut state).unwrap_err();
        assert!(matches!(err, EngineError::Physics { .. }));
    }
}
