//! # Engine Module
//!
//! The optimization layer: it owns the search over helix base counts that minimizes the total
//! separation between attachment points once the physics collaborator has settled the scene.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Strategy selection, budgets and the settle time step
//! - **State Tracking** ([`state`]) - Best configuration, trial log and termination reasons
//! - **Cancellation** ([`cancel`]) - Shared stop token and the running predicate contract
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events for front ends
//! - **Error Handling** ([`error`]) - Engine-level error type aggregating the core errors
//!
//! The strategies themselves (gradient descent, simulated annealing, rectification) live in the
//! crate-private `tasks` module and are driven by [`crate::workflows::relax`].

pub mod cancel;
pub mod config;
pub(crate) mod context;
pub mod error;
pub mod progress;
pub mod state;
pub(crate) mod tasks;
