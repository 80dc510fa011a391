use super::{BodyHandle, BodyShape, JointHandle, PhysicsError, PhysicsWorld};
use nalgebra::{Isometry3, Point3, Translation3, UnitQuaternion, Vector3};
use slotmap::{SecondaryMap, SlotMap};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelaxationParams {
    /// Fraction of the remaining joint error corrected per second of simulated time.
    pub stiffness: f64,
    /// Largest per-step body motion (translation plus arc length of the rotation at the body's
    /// extent) below which the scene counts as sleeping.
    pub sleep_threshold: f64,
}

impl Default for RelaxationParams {
    fn default() -> Self {
        Self {
            stiffness: 30.0,
            sleep_threshold: 1e-4,
        }
    }
}

#[derive(Debug, Clone)]
struct Body {
    pose: Isometry3<f64>,
    extent: f64,
}

#[derive(Debug, Clone)]
struct Joint {
    a: BodyHandle,
    frame_a: Isometry3<f64>,
    b: BodyHandle,
    frame_b: Isometry3<f64>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Correction {
    translation: Vector3<f64>,
    rotation: Vector3<f64>,
    count: u32,
}

/// Position-based relaxation of spherical joints.
///
/// Each step moves every jointed body so that its anchors travel part of the way towards their
/// partners' anchors, half by translation and half by rotation about the body centre. There is
/// no inertia and no contact handling: the scene settles into the pose where joint errors
/// balance, which is what the base-count search measures.
#[derive(Debug, Default)]
pub struct RelaxationWorld {
    params: RelaxationParams,
    bodies: SlotMap<BodyHandle, Body>,
    joints: SlotMap<JointHandle, Joint>,
    pending: Option<Vec<(BodyHandle, Isometry3<f64>)>>,
    pending_motion: f64,
    last_motion: f64,
    awake: bool,
    steps: u64,
}

impl RelaxationWorld {
    pub fn new(params: RelaxationParams) -> Self {
        Self {
            params,
            ..Self::default()
        }
    }

    pub fn params(&self) -> &RelaxationParams {
        &self.params
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Motion of the fastest body during the last completed step.
    pub fn last_motion(&self) -> f64 {
        self.last_motion
    }

    fn anchor(&self, body: BodyHandle, frame: &Isometry3<f64>) -> Point3<f64> {
        self.bodies[body].pose * Point3::from(frame.translation.vector)
    }

    fn accumulate(
        &self,
        corrections: &mut SecondaryMap<BodyHandle, Correction>,
        body: BodyHandle,
        anchor: &Point3<f64>,
        displacement: Vector3<f64>,
    ) {
        let center = Point3::from(self.bodies[body].pose.translation.vector);
        let lever = anchor - center;
        let half = displacement * 0.5;
        let Some(entry) = corrections.get_mut(body) else {
            return;
        };
        entry.translation += half;
        let lever_sq = lever.norm_squared();
        if lever_sq > f64::EPSILON {
            entry.rotation += lever.cross(&half) / lever_sq;
        }
        entry.count += 1;
    }
}

impl PhysicsWorld for RelaxationWorld {
    fn create_rigid_body(
        &mut self,
        shape: &BodyShape,
        placement: &Isometry3<f64>,
    ) -> Result<BodyHandle, PhysicsError> {
        if !(shape.capsule.radius > 0.0) || shape.capsule.half_height < 0.0 {
            return Err(PhysicsError::BodyCreation(format!(
                "degenerate capsule (radius {}, half height {})",
                shape.capsule.radius, shape.capsule.half_height
            )));
        }
        let extent = shape.capsule.half_height + shape.capsule.radius;
        self.awake = true;
        Ok(self.bodies.insert(Body {
            pose: *placement,
            extent,
        }))
    }

    fn destroy_rigid_body(&mut self, body: BodyHandle) {
        if self.bodies.remove(body).is_some() {
            self.joints.retain(|_, joint| joint.a != body && joint.b != body);
            self.awake = true;
        }
    }

    fn create_joint(
        &mut self,
        a: BodyHandle,
        frame_a: &Isometry3<f64>,
        b: BodyHandle,
        frame_b: &Isometry3<f64>,
    ) -> Result<JointHandle, PhysicsError> {
        if !self.bodies.contains_key(a) {
            return Err(PhysicsError::UnknownBody(a));
        }
        if !self.bodies.contains_key(b) {
            return Err(PhysicsError::UnknownBody(b));
        }
        if a == b {
            return Err(PhysicsError::JointCreation(
                "a body cannot be jointed to itself".to_string(),
            ));
        }
        self.awake = true;
        Ok(self.joints.insert(Joint {
            a,
            frame_a: *frame_a,
            b,
            frame_b: *frame_b,
        }))
    }

    fn release_joint(&mut self, joint: JointHandle) {
        if self.joints.remove(joint).is_some() {
            self.awake = true;
        }
    }

    fn simulate(&mut self, dt: f64) -> Result<(), PhysicsError> {
        if !(dt > 0.0) || !dt.is_finite() {
            return Err(PhysicsError::Simulation(format!("invalid time step {}", dt)));
        }
        let alpha = (self.params.stiffness * dt).min(1.0);

        let mut corrections: SecondaryMap<BodyHandle, Correction> =
            self.bodies.keys().map(|handle| (handle, Correction::default())).collect();

        for joint in self.joints.values() {
            let anchor_a = self.anchor(joint.a, &joint.frame_a);
            let anchor_b = self.anchor(joint.b, &joint.frame_b);
            let error = anchor_b - anchor_a;
            self.accumulate(&mut corrections, joint.a, &anchor_a, error * alpha);
            self.accumulate(&mut corrections, joint.b, &anchor_b, -error * alpha);
        }

        let mut motion: f64 = 0.0;
        let mut updated = Vec::with_capacity(corrections.len());
        for (handle, correction) in corrections.iter() {
            if correction.count == 0 {
                continue;
            }
            let body = &self.bodies[handle];
            let scale = 1.0 / f64::from(correction.count);
            let translation = correction.translation * scale;
            let rotation = correction.rotation * scale;
            motion = motion.max(translation.norm() + rotation.norm() * body.extent);

            let pose = Isometry3::from_parts(
                Translation3::from(body.pose.translation.vector + translation),
                UnitQuaternion::from_scaled_axis(rotation) * body.pose.rotation,
            );
            updated.push((handle, pose));
        }

        self.pending = Some(updated);
        self.pending_motion = motion;
        Ok(())
    }

    fn fetch_results(&mut self, _block: bool) -> Result<bool, PhysicsError> {
        let Some(updated) = self.pending.take() else {
            return Ok(false);
        };
        for (handle, pose) in updated {
            if let Some(body) = self.bodies.get_mut(handle) {
                body.pose = pose;
            }
        }
        self.steps += 1;
        self.last_motion = self.pending_motion;
        self.awake = self.last_motion >= self.params.sleep_threshold;
        trace!(
            step = self.steps,
            motion = self.last_motion,
            "Relaxation step completed."
        );
        Ok(true)
    }

    fn is_sleeping(&self) -> bool {
        !self.awake
    }

    fn global_transform(&self, body: BodyHandle) -> Isometry3<f64> {
        self.bodies[body].pose
    }

    fn set_global_transform(&mut self, body: BodyHandle, transform: &Isometry3<f64>) {
        if let Some(entry) = self.bodies.get_mut(body) {
            entry.pose = *transform;
            self.awake = true;
        }
    }
}
