use super::cancel::RunningPredicate;
use super::config::RelaxationConfig;
use super::progress::{Progress, ProgressReporter};
use super::state::{OptimizationState, Solution};
use super::tasks::settle;
use crate::core::models::topology::Topology;
use crate::core::physics::{PhysicsError, PhysicsWorld};

/// Everything a strategy needs to run trials against one scene.
pub(crate) struct OptimizationContext<'a, W: PhysicsWorld + ?Sized> {
    pub topology: &'a mut Topology,
    pub world: &'a mut W,
    pub config: &'a RelaxationConfig,
    pub running: &'a dyn RunningPredicate,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a, W: PhysicsWorld + ?Sized> OptimizationContext<'a, W> {
    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.is_running()
    }

    /// Steps the collaborator until it sleeps. Returns `false` if the run was cancelled first.
    pub fn settle(&mut self) -> Result<bool, PhysicsError> {
        let outcome = settle::run(&mut *self.world, self.config.time_step, self.running)?;
        Ok(outcome.settled)
    }

    pub fn reset_to_reference(&mut self) {
        self.topology.reset_to_reference(&mut *self.world);
    }

    pub fn total_separation(&self) -> f64 {
        self.topology.total_separation(&*self.world)
    }

    /// Snapshots the current scene into `state` if it beats the best so far.
    pub fn submit_current(&self, state: &mut OptimizationState) -> bool {
        let solution = Solution::capture(self.topology, &*self.world);
        let total = solution.total();
        let stored = state.submit(solution);
        if stored {
            self.reporter.report(Progress::BestImproved { total });
        }
        stored
    }
}
