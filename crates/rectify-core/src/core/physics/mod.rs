//! # Physics Collaborator
//!
//! The rigid-body simulation is treated as an external collaborator with a narrow capability
//! set. Helices and the optimizer only ever talk to it through [`PhysicsWorld`], which keeps
//! the structural search independent of any particular solver and lets tests substitute
//! deterministic fakes.
//!
//! [`relaxation::RelaxationWorld`] is the reference implementation shipped with the crate: an
//! analytic spring relaxation of joint constraints, without contacts or inertia.

pub mod relaxation;

#[cfg(test)]
pub(crate) mod testing;

use nalgebra::{Isometry3, Point3};
use slotmap::new_key_type;
use thiserror::Error;

new_key_type! {
    pub struct BodyHandle;
    pub struct JointHandle;
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    #[error("Failed to create rigid body: {0}")]
    BodyCreation(String),
    #[error("Failed to create joint: {0}")]
    JointCreation(String),
    #[error("Unknown rigid body handle {0:?}")]
    UnknownBody(BodyHandle),
    #[error("Simulation step failed: {0}")]
    Simulation(String),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capsule {
    pub radius: f64,
    /// Half length of the cylindrical section along local +Z.
    pub half_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub radius: f64,
    pub center: Point3<f64>,
}

/// Collision description of one rigid body, in body-local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct BodyShape {
    pub capsule: Capsule,
    pub spheres: Vec<Sphere>,
    pub density: f64,
}

/// Capabilities the relaxation core needs from a rigid-body simulation.
///
/// `simulate` followed by a blocking `fetch_results` advances the scene by one fixed step.
/// Implementations may parallelize internally, but every call is made from a single thread.
pub trait PhysicsWorld {
    fn create_rigid_body(
        &mut self,
        shape: &BodyShape,
        placement: &Isometry3<f64>,
    ) -> Result<BodyHandle, PhysicsError>;

    fn destroy_rigid_body(&mut self, body: BodyHandle);

    /// Joins `a` and `b` so that `frame_a` (local to `a`) and `frame_b` (local to `b`) coincide.
    fn create_joint(
        &mut self,
        a: BodyHandle,
        frame_a: &Isometry3<f64>,
        b: BodyHandle,
        frame_b: &Isometry3<f64>,
    ) -> Result<JointHandle, PhysicsError>;

    fn release_joint(&mut self, joint: JointHandle);

    fn simulate(&mut self, dt: f64) -> Result<(), PhysicsError>;

    /// Collects the results of the last `simulate` call. Returns whether results were available.
    fn fetch_results(&mut self, block: bool) -> Result<bool, PhysicsError>;

    /// Whether every body in the scene has come to rest.
    fn is_sleeping(&self) -> bool;

    fn global_transform(&self, body: BodyHandle) -> Isometry3<f64>;

    /// Teleports `body`, discarding its simulated motion.
    fn set_global_transform(&mut self, body: BodyHandle, transform: &Isometry3<f64>);
}
