//! # Workflows Module
//!
//! High-level entry points that drive a complete relaxation from a built topology to the best
//! configuration found.
//!
//! ## Architecture
//!
//! - **Relaxation Workflow** ([`relax`]) - Measures the initial scene, runs the configured
//!   strategy (gradient descent, simulated annealing or a single rectification) and collects the
//!   best configuration, the trial log and the reason the run stopped.
//!
//! Front ends own the collaborator, the random source and the cancellation predicate and pass
//! them in, so a run is reproducible given a seed and a deterministic collaborator.

pub mod relax;
