use super::config::Strategy;
use crate::core::io::trace::TrialRecord;
use crate::core::models::description::SceneDescription;
use crate::core::models::ids::HelixId;
use crate::core::models::topology::{SeparationStats, Topology, TopologyError};
use crate::core::physics::PhysicsWorld;
use nalgebra::Isometry3;

/// A measured configuration: its strain statistics, the full placement of every helix body and
/// the scene projection written to disk.
///
/// `transforms` keeps each helix's roll about its axis, which `description` cannot express.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub stats: SeparationStats,
    pub transforms: Vec<Isometry3<f64>>,
    pub description: SceneDescription,
}

impl Solution {
    pub fn capture<W: PhysicsWorld + ?Sized>(topology: &Topology, world: &W) -> Self {
        Self {
            stats: topology.separation_stats(world),
            transforms: topology
                .helices()
                .iter()
                .map(|helix| helix.transform(world))
                .collect(),
            description: topology.describe(world),
        }
    }

    /// Puts `topology` back into this configuration. Helices whose base count differs are
    /// rebuilt first; every body is then moved to its recorded placement.
    ///
    /// # Panics
    ///
    /// If the snapshot was taken from a topology with a different number of helices.
    pub fn restore<W: PhysicsWorld + ?Sized>(
        &self,
        topology: &mut Topology,
        world: &mut W,
    ) -> Result<(), TopologyError> {
        assert_eq!(
            self.transforms.len(),
            topology.len(),
            "snapshot and topology disagree on the helix count"
        );
        for (index, (bases, transform)) in self
            .base_counts()
            .into_iter()
            .zip(&self.transforms)
            .enumerate()
        {
            let id = HelixId(index);
            if topology.helix(id).base_count() != bases {
                topology.rebuild_helix(world, id, bases)?;
            }
            topology.helix(id).set_transform(world, transform);
        }
        Ok(())
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.stats.total
    }

    pub fn base_counts(&self) -> Vec<u32> {
        self.description.base_counts()
    }
}

/// Why an optimization run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A full gradient-descent pass brought no improvement.
    Converged,
    /// The pass or step budget ran out.
    BudgetExhausted,
    /// The accepted total separation reached the annealing target.
    TargetReached,
    /// The scene was settled once without any base count change.
    Settled,
    /// The running predicate turned false.
    Cancelled,
}

/// Invoked every time a new best configuration is stored.
pub type StoreBestCallback<'a> = Box<dyn FnMut(&Solution) + 'a>;

/// Bookkeeping shared by all strategies: the best configuration so far and the trial log.
pub struct OptimizationState<'a> {
    strategy: Strategy,
    best: Option<Solution>,
    trials: Vec<TrialRecord>,
    store_best: Option<StoreBestCallback<'a>>,
}

impl<'a> OptimizationState<'a> {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            best: None,
            trials: Vec::new(),
            store_best: None,
        }
    }

    pub fn with_store_best(mut self, callback: StoreBestCallback<'a>) -> Self {
        self.store_best = Some(callback);
        self
    }

    pub fn best(&self) -> Option<&Solution> {
        self.best.as_ref()
    }

    /// Total separation of the best configuration, or infinity before anything was stored.
    pub fn best_total(&self) -> f64 {
        self.best.as_ref().map_or(f64::INFINITY, Solution::total)
    }

    /// Stores `solution` if it is strictly better than the current best. Returns whether it was
    /// stored.
    pub fn submit(&mut self, solution: Solution) -> bool {
        if solution.total() >= self.best_total() {
            return false;
        }
        if let Some(callback) = self.store_best.as_mut() {
            callback(&solution);
        }
        self.best = Some(solution);
        true
    }

    pub fn record_trial(
        &mut self,
        helix: Option<HelixId>,
        base_count: Option<u32>,
        total: f64,
        accepted: bool,
    ) {
        let record = TrialRecord {
            trial: self.trials.len(),
            strategy: self.strategy.name().to_string(),
            helix: helix.map(HelixId::index),
            base_count,
            total,
            accepted,
            best: self.best_total(),
        };
        self.trials.push(record);
    }

    pub fn trials(&self) -> &[TrialRecord] {
        &self.trials
    }

    pub fn into_parts(self) -> (Option<Solution>, Vec<TrialRecord>) {
        (self.best, self.trials)
    }
}
