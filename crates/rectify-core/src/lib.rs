//! # rectify Core Library
//!
//! Relaxation of DNA-origami scaffold routings. Every double-helix segment of a routing is
//! modelled as a rigid body joined to its neighbours at strand attachment points; a physics
//! collaborator settles the assembly and the optimizer adjusts per-helix base counts to minimize
//! the separation between attachment points that should coincide.
//!
//! ## Architectural Philosophy
//!
//! The library keeps the same three-layer split throughout:
//!
//! - **[`core`]: The Foundation.** DNA geometry constants (`HelixSpec`), the physics collaborator
//!   contract (`PhysicsWorld`) with a small reference implementation, the helix and topology
//!   models, and scene/trace I/O.
//!
//! - **[`engine`]: The Logic Core.** The stateful optimization layer: configuration, settling,
//!   greedy gradient descent, simulated annealing, best-state tracking, cancellation and progress
//!   reporting.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into a complete
//!   relaxation run that starts from a scene description and returns the best configuration.

pub mod core;
pub mod engine;
pub mod workflows;
