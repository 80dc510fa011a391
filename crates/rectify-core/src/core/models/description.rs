use nalgebra::{Point3, Vector3};

/// A pre-built helix as persisted in a scene: its base count, the world position of its centre
/// and the world direction of its axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixRecord {
    pub bases: u32,
    pub position: Point3<f64>,
    pub direction: Vector3<f64>,
}

/// Plain-data form of a scene, shared by the persistence layer and the optimizer's snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneDescription {
    pub vertices: Vec<Point3<f64>>,
    /// Ordered vertex indices of the scaffold route, 0-based.
    pub path: Vec<usize>,
    pub helices: Vec<HelixRecord>,
}

impl SceneDescription {
    pub fn new(vertices: Vec<Point3<f64>>, path: Vec<usize>) -> Self {
        Self {
            vertices,
            path,
            helices: Vec::new(),
        }
    }

    pub fn base_counts(&self) -> Vec<u32> {
        self.helices.iter().map(|h| h.bases).collect()
    }
}
