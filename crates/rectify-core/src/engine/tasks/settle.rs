use crate::core::physics::{PhysicsError, PhysicsWorld};
use crate::engine::cancel::RunningPredicate;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleOutcome {
    pub steps: usize,
    /// `false` when the predicate stopped the loop before the scene went to sleep.
    pub settled: bool,
}

/// Advances `world` by fixed steps of `time_step` seconds until it reports sleeping or `running`
/// turns false. There is no step limit.
pub fn run<W: PhysicsWorld + ?Sized>(
    world: &mut W,
    time_step: f64,
    running: &dyn RunningPredicate,
) -> Result<SettleOutcome, PhysicsError> {
    let mut steps = 0usize;
    while !world.is_sleeping() && running.is_running() {
        world.simulate(time_step)?;
        world.fetch_results(true)?;
        steps += 1;
    }
    let settled = world.is_sleeping();
    trace!(steps, settled, "Settle loop finished.");
    Ok(SettleOutcome { steps, settled })
}
