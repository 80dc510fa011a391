//! # Core Module
//!
//! The fundamental building blocks of a relaxation: DNA helix geometry, the physics
//! collaborator contract, the helix/topology models and file I/O.
//!
//! ## Architecture
//!
//! - **DNA Geometry** ([`dna`]) - Helix constants and base count ↔ length/rotation conversions
//! - **Physics** ([`physics`]) - The rigid-body collaborator trait and a reference implementation
//! - **Structural Models** ([`models`]) - Helices, their attachment points and the scene topology
//! - **File I/O** ([`io`]) - Scene text format and optimization trace output
//! - **Utilities** ([`utils`]) - Frame and angle helpers shared by the models

pub mod dna;
pub mod io;
pub mod models;
pub mod physics;
pub mod utils;
