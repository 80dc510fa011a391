//! # Core Models Module
//!
//! Data structures describing a routed DNA-origami structure.
//!
//! ## Key Components
//!
//! - [`helix`] - One rigid double-helix segment, its attachment points and connections
//! - [`topology`] - Vertices, the scaffold path and the helices derived from it
//! - [`description`] - Plain-data scene form used for persistence and snapshots
//! - [`ids`] - Identifier type for helices within a topology
//!
//! ## Usage
//!
//! ```ignore
//! use rectify::core::{dna::HelixSpec, models::topology::Topology};
//! use rectify::core::physics::relaxation::RelaxationWorld;
//!
//! let mut world = RelaxationWorld::default();
//! let topology = Topology::from_path(&mut world, HelixSpec::default(), vertices, path)?;
//! let stats = topology.separation_stats(&world);
//! ```

pub mod description;
pub mod helix;
pub mod ids;
pub mod topology;
