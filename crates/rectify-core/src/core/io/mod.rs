//! Provides input/output functionality for scene files and optimization traces.
//!
//! Scenes use a small line-oriented text format shared with the routing tools that produce them.
//! Reading and writing go through the [`traits::SceneFile`] interface; [`trace`] records every
//! optimization trial as CSV for later analysis.

pub mod scene;
pub mod trace;
pub mod traits;
