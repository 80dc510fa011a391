use crate::core::physics::PhysicsWorld;
use crate::engine::context::OptimizationContext;
use crate::engine::error::EngineError;
use crate::engine::state::{OptimizationState, Termination};
use tracing::{info, instrument};

/// Settles the scene once and stores the result without changing any base count.
#[instrument(skip_all, name = "rectify")]
pub fn run<W: PhysicsWorld + ?Sized>(
    ctx: &mut OptimizationContext<'_, W>,
    state: &mut OptimizationState,
) -> Result<Termination, EngineError> {
    let settled = ctx.settle()?;
    let total = ctx.total_separation();
    ctx.submit_current(state);
    state.record_trial(None, None, total, true);
    info!(total, settled, "Rectification finished.");
    Ok(if settled {
        Termination::Settled
    } else {
        Termination::Cancelled
    })
}
