use super::{BodyHandle, BodyShape, JointHandle, PhysicsError, PhysicsWorld};
use crate::engine::cancel::CancellationToken;
use nalgebra::Isometry3;
use slotmap::SlotMap;

#[derive(Debug, Clone)]
pub(crate) struct FrozenBody {
    pub pose: Isometry3<f64>,
}

/// A collaborator whose bodies never move: they stay exactly where they were placed and the
/// scene reports sleeping after a fixed number of steps. Strain is therefore a pure function of
/// placements and base counts, which makes optimizer runs fully deterministic.
#[derive(Debug, Default)]
pub(crate) struct FrozenWorld {
    pub bodies: SlotMap<BodyHandle, FrozenBody>,
    pub joints: SlotMap<JointHandle, (BodyHandle, BodyHandle)>,
    pub steps_to_sleep: usize,
    pub steps_since_wake: usize,
    pub total_steps: usize,
    pub bodies_created: usize,
    pub cancel_after_steps: Option<(usize, CancellationToken)>,
    pub fail_on_step: Option<usize>,
    awake: bool,
}

impl FrozenWorld {
    pub fn new(steps_to_sleep: usize) -> Self {
        Self {
            steps_to_sleep,
            ..Self::default()
        }
    }

    fn wake(&mut self) {
        self.awake = true;
        self.steps_since_wake = 0;
    }
}

impl PhysicsWorld for FrozenWorld {
    fn create_rigid_body(
        &mut self,
        _shape: &BodyShape,
        placement: &Isometry3<f64>,
    ) -> Result<BodyHandle, PhysicsError> {
        self.wake();
        self.bodies_created += 1;
        Ok(self.bodies.insert(FrozenBody { pose: *placement }))
    }

    fn destroy_rigid_body(&mut self, body: BodyHandle) {
        self.wake();
        self.bodies.remove(body);
    }

    fn create_joint(
        &mut self,
        a: BodyHandle,
        _frame_a: &Isometry3<f64>,
        b: BodyHandle,
        _frame_b: &Isometry3<f64>,
    ) -> Result<JointHandle, PhysicsError> {
        if !self.bodies.contains_key(a) {
            return Err(PhysicsError::UnknownBody(a));
        }
        if !self.bodies.contains_key(b) {
            return Err(PhysicsError::UnknownBody(b));
        }
        self.wake();
        Ok(self.joints.insert((a, b)))
    }

    fn release_joint(&mut self, joint: JointHandle) {
        self.wake();
        self.joints.remove(joint);
    }

    fn simulate(&mut self, _dt: f64) -> Result<(), PhysicsError> {
        if self.fail_on_step == Some(self.total_steps) {
            return Err(PhysicsError::Simulation("injected failure".to_string()));
        }
        Ok(())
    }

    fn fetch_results(&mut self, _block: bool) -> Result<bool, PhysicsError> {
        self.total_steps += 1;
        self.steps_since_wake += 1;
        if self.steps_since_wake >= self.steps_to_sleep {
            self.awake = false;
        }
        if let Some((after, token)) = &self.cancel_after_steps {
            if self.total_steps >= *after {
                token.cancel();
            }
        }
        Ok(true)
    }

    fn is_sleeping(&self) -> bool {
        !self.awake
    }

    fn global_transform(&self, body: BodyHandle) -> Isometry3<f64> {
        self.bodies[body].pose
    }

    fn set_global_transform(&mut self, body: BodyHandle, transform: &Isometry3<f64>) {
        self.wake();
        if let Some(entry) = self.bodies.get_mut(body) {
            entry.pose = *transform;
        }
    }
}
