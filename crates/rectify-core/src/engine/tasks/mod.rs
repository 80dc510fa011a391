//! Optimization strategies and the settle loop they share.
//!
//! Every strategy follows the same shape: perturb base counts, settle the collaborator, measure
//! the total separation, then accept or revert. They differ only in how candidates are chosen and
//! accepted.

pub mod gradient_descent;
pub mod rectify;
pub mod settle;
pub mod simulated_annealing;

#[cfg(test)]
pub(crate) mod testing;
