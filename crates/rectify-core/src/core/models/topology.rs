use super::description::{HelixRecord, SceneDescription};
use super::helix::{self, AttachmentPoint, Helix};
use super::ids::HelixId;
use crate::core::dna::HelixSpec;
use crate::core::physics::{PhysicsError, PhysicsWorld};
use crate::core::utils::geometry::{
    axis_direction, placement_along, placement_between, sgn_nozero, signed_angle, unsigned_angle,
};
use nalgebra::{Point3, Vector3};
use std::fmt;
use thiserror::Error;
use tracing::{debug, instrument, warn};

const DEGENERATE_EPS: f64 = 1e-9;
const ANGLE_TIE_EPS: f64 = 1e-9;

#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("Path entry {position} references vertex {vertex}, but only {count} vertices exist")]
    VertexOutOfRange {
        position: usize,
        vertex: usize,
        count: usize,
    },
    #[error(
        "Edge {edge} is {length:.3} nm long and rounds to {bases} bases; a helix must be longer than {minimum:.3} nm"
    )]
    EdgeTooShort {
        edge: usize,
        length: f64,
        bases: u32,
        minimum: f64,
    },
    #[error("Helix record {index} is invalid: {reason}")]
    InvalidHelix { index: usize, reason: String },
    #[error("Physics collaborator error: {0}")]
    Physics(#[from] PhysicsError),
}

/// Aggregate strain over every live connection of a topology.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SeparationStats {
    pub min: f64,
    pub max: f64,
    pub average: f64,
    pub total: f64,
    pub connections: usize,
}

impl fmt::Display for SeparationStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "total {:.4} nm over {} connections (min {:.4}, max {:.4}, avg {:.4})",
            self.total, self.connections, self.min, self.max, self.average
        )
    }
}

/// One pass of the scaffold through an interior vertex.
#[derive(Debug, Clone, Copy)]
struct Visit {
    position: usize,
    vertex: usize,
    incoming: usize,
    outgoing: usize,
    sign: f64,
}

/// Vertices, the scaffold route through them and the helices realizing it.
///
/// Helices derived from the path are indexed by the path edge they span, so `helices[i]` runs
/// from `path[i]` to `path[i + 1]`.
#[derive(Debug)]
pub struct Topology {
    spec: HelixSpec,
    vertices: Vec<Point3<f64>>,
    path: Vec<usize>,
    helices: Vec<Helix>,
}

impl Topology {
    /// Creates an empty topology over `vertices` and `path` after checking every path entry.
    pub fn new(
        spec: HelixSpec,
        vertices: Vec<Point3<f64>>,
        path: Vec<usize>,
    ) -> Result<Self, TopologyError> {
        if let Some((position, &vertex)) = path
            .iter()
            .enumerate()
            .find(|&(_, &vertex)| vertex >= vertices.len())
        {
            return Err(TopologyError::VertexOutOfRange {
                position,
                vertex,
                count: vertices.len(),
            });
        }
        Ok(Self {
            spec,
            vertices,
            path,
            helices: Vec::new(),
        })
    }

    /// Builds helices along the path, wires the scaffold and the staples.
    #[instrument(skip_all, name = "topology_from_path", fields(vertices = vertices.len(), path = path.len()))]
    pub fn from_path<W: PhysicsWorld + ?Sized>(
        world: &mut W,
        spec: HelixSpec,
        vertices: Vec<Point3<f64>>,
        path: Vec<usize>,
    ) -> Result<Self, TopologyError> {
        let mut topology = Self::new(spec, vertices, path)?;
        topology.build_from_path(world)?;
        topology.connect_scaffold(world)?;
        topology.connect_staples(world)?;
        Ok(topology)
    }

    /// Restores a topology from its plain-data form.
    ///
    /// A description without helices is built from its path. Pre-built helices are placed as
    /// recorded and wired by the path policy only when they line up with the path edges.
    #[instrument(skip_all, name = "topology_from_description", fields(helices = description.helices.len()))]
    pub fn from_description<W: PhysicsWorld + ?Sized>(
        world: &mut W,
        spec: HelixSpec,
        description: &SceneDescription,
    ) -> Result<Self, TopologyError> {
        if description.helices.is_empty() {
            return Self::from_path(
                world,
                spec,
                description.vertices.clone(),
                description.path.clone(),
            );
        }

        let mut topology = Self::new(
            spec,
            description.vertices.clone(),
            description.path.clone(),
        )?;
        for (index, record) in description.helices.iter().enumerate() {
            if record.direction.norm() <= DEGENERATE_EPS {
                return Err(TopologyError::InvalidHelix {
                    index,
                    reason: "axis direction is zero".to_string(),
                });
            }
            if !topology.spec.is_valid_base_count(record.bases) {
                return Err(TopologyError::InvalidHelix {
                    index,
                    reason: format!(
                        "{} bases is shorter than the minimum of {}",
                        record.bases,
                        topology.spec.min_base_count()
                    ),
                });
            }
        }
        for (index, record) in description.helices.iter().enumerate() {
            let placement = placement_along(&record.position, &record.direction);
            let helix = Helix::new(world, &topology.spec, HelixId(index), record.bases, placement)?;
            topology.helices.push(helix);
        }

        if topology.helices.len() + 1 == topology.path.len() {
            topology.connect_scaffold(world)?;
            topology.connect_staples(world)?;
        } else {
            warn!(
                helices = topology.helices.len(),
                path = topology.path.len(),
                "Pre-built helices do not match the path edges; they are left unconnected."
            );
        }
        Ok(topology)
    }

    /// Creates one helix per consecutive path pair, centred on the edge midpoint with its axis
    /// along the edge. All edges are checked before any body is created.
    pub fn build_from_path<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
    ) -> Result<(), TopologyError> {
        self.clear(world);

        let minimum = 2.0 * self.spec.radius;
        let mut planned = Vec::with_capacity(self.path.len().saturating_sub(1));
        for (edge, pair) in self.path.windows(2).enumerate() {
            let (start, end) = (self.vertices[pair[0]], self.vertices[pair[1]]);
            let length = (end - start).norm();
            let bases = self.spec.base_count_for_distance(length);
            if !self.spec.is_valid_base_count(bases) {
                return Err(TopologyError::EdgeTooShort {
                    edge,
                    length,
                    bases,
                    minimum,
                });
            }
            planned.push((bases, placement_between(&start, &end)));
        }

        for (index, (bases, placement)) in planned.into_iter().enumerate() {
            let helix = Helix::new(world, &self.spec, HelixId(index), bases, placement)?;
            self.helices.push(helix);
        }
        debug!(helices = self.helices.len(), "Built helices from path.");
        Ok(())
    }

    /// Joins the forward strand of every helix to the next one. A closed path (first vertex
    /// repeated at the end) is also joined across the seam.
    pub fn connect_scaffold<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
    ) -> Result<(), TopologyError> {
        for i in 1..self.helices.len() {
            self.attach(
                world,
                HelixId(i - 1),
                AttachmentPoint::ForwardThreePrime,
                HelixId(i),
                AttachmentPoint::ForwardFivePrime,
            )?;
        }
        if self.is_closed() {
            self.attach(
                world,
                HelixId(self.helices.len() - 1),
                AttachmentPoint::ForwardThreePrime,
                HelixId(0),
                AttachmentPoint::ForwardFivePrime,
            )?;
        }
        Ok(())
    }

    /// Crosses the backward strands over at vertices the scaffold visits more than once.
    ///
    /// Every visit gets the sign of its turn about the vertex normal. In path order, a visit with
    /// a free backward 3' slot is paired with the opposite-turning visit of the same vertex whose
    /// outgoing edge is closest in angle to the visit's incoming edge.
    pub fn connect_staples<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
    ) -> Result<(), TopologyError> {
        let visits = self.visits();
        let mut staples = 0usize;

        for visit in &visits {
            if self.helices[visit.incoming]
                .connection(AttachmentPoint::BackwardThreePrime)
                .is_some()
            {
                continue;
            }
            let incoming = self.edge_direction(visit.incoming);

            let mut best: Option<(f64, usize, usize, usize)> = None;
            for other in &visits {
                if other.position == visit.position
                    || other.vertex != visit.vertex
                    || other.sign == visit.sign
                    || other.outgoing == visit.incoming
                    || self.helices[other.outgoing]
                        .connection(AttachmentPoint::BackwardFivePrime)
                        .is_some()
                {
                    continue;
                }
                let angle = unsigned_angle(&incoming, &self.edge_direction(other.outgoing));
                let far_vertex = self.path[other.outgoing + 1];
                let better = match best {
                    None => true,
                    Some((best_angle, best_far, best_position, _)) => {
                        if (angle - best_angle).abs() > ANGLE_TIE_EPS {
                            angle < best_angle
                        } else {
                            (far_vertex, other.position) < (best_far, best_position)
                        }
                    }
                };
                if better {
                    best = Some((angle, far_vertex, other.position, other.outgoing));
                }
            }

            if let Some((_, _, _, outgoing)) = best {
                self.attach(
                    world,
                    HelixId(visit.incoming),
                    AttachmentPoint::BackwardThreePrime,
                    HelixId(outgoing),
                    AttachmentPoint::BackwardFivePrime,
                )?;
                staples += 1;
            }
        }
        debug!(staples, "Connected staples.");
        Ok(())
    }

    pub fn attach<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        this: HelixId,
        this_point: AttachmentPoint,
        other: HelixId,
        other_point: AttachmentPoint,
    ) -> Result<(), TopologyError> {
        helix::attach(
            world,
            &mut self.helices,
            &self.spec,
            this,
            this_point,
            other,
            other_point,
        )?;
        Ok(())
    }

    pub fn detach<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        id: HelixId,
        point: AttachmentPoint,
    ) -> bool {
        helix::detach(world, &mut self.helices, id, point)
    }

    pub fn separation<W: PhysicsWorld + ?Sized>(
        &self,
        world: &W,
        id: HelixId,
        point: AttachmentPoint,
    ) -> f64 {
        helix::separation(world, &self.helices, &self.spec, id, point)
    }

    /// Min, max, average and total separation, counting every connection once through its
    /// three-prime end.
    pub fn separation_stats<W: PhysicsWorld + ?Sized>(&self, world: &W) -> SeparationStats {
        let mut stats = SeparationStats {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            ..SeparationStats::default()
        };
        for helix in &self.helices {
            for (point, _) in helix.connections().filter(|(p, _)| p.is_three_prime()) {
                let distance = self.separation(world, helix.id(), point);
                stats.min = stats.min.min(distance);
                stats.max = stats.max.max(distance);
                stats.total += distance;
                stats.connections += 1;
            }
        }
        if stats.connections == 0 {
            return SeparationStats::default();
        }
        stats.average = stats.total / stats.connections as f64;
        stats
    }

    pub fn total_separation<W: PhysicsWorld + ?Sized>(&self, world: &W) -> f64 {
        self.separation_stats(world).total
    }

    /// Changes the base count of one helix. The body is recreated at its reference transform and
    /// every connection it held is restored.
    pub fn rebuild_helix<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        id: HelixId,
        bases: u32,
    ) -> Result<(), TopologyError> {
        let helix = &self.helices[id.index()];
        let recorded: Vec<(AttachmentPoint, HelixId, AttachmentPoint)> = helix
            .connections()
            .map(|(point, connection)| {
                let partner = &self.helices[connection.helix.index()];
                (point, connection.helix, helix.reciprocal_point(point, partner))
            })
            .collect();

        for &(point, _, _) in &recorded {
            self.detach(world, id, point);
        }
        let reference = *self.helices[id.index()].initial_transform();
        self.helices[id.index()].recreate_rigid_body(world, &self.spec, bases, &reference)?;
        for (point, other, other_point) in recorded {
            self.attach(world, id, point, other, other_point)?;
        }
        Ok(())
    }

    /// Moves every body back to the placement it was created with.
    pub fn reset_to_reference<W: PhysicsWorld + ?Sized>(&self, world: &mut W) {
        for helix in &self.helices {
            helix.set_transform(world, helix.initial_transform());
        }
    }

    /// Snapshot of the scene with helices at their current simulated placements.
    pub fn describe<W: PhysicsWorld + ?Sized>(&self, world: &W) -> SceneDescription {
        let helices = self
            .helices
            .iter()
            .map(|helix| {
                let transform = helix.transform(world);
                HelixRecord {
                    bases: helix.base_count(),
                    position: Point3::from(transform.translation.vector),
                    direction: axis_direction(&transform),
                }
            })
            .collect();
        SceneDescription {
            vertices: self.vertices.clone(),
            path: self.path.clone(),
            helices,
        }
    }

    pub fn base_counts(&self) -> Vec<u32> {
        self.helices.iter().map(Helix::base_count).collect()
    }

    pub fn spec(&self) -> &HelixSpec {
        &self.spec
    }

    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    pub fn path(&self) -> &[usize] {
        &self.path
    }

    pub fn helices(&self) -> &[Helix] {
        &self.helices
    }

    pub fn helix(&self, id: HelixId) -> &Helix {
        &self.helices[id.index()]
    }

    pub fn len(&self) -> usize {
        self.helices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.helices.is_empty()
    }

    /// Whether the path returns to its first vertex with helices on both sides of the seam.
    pub fn is_closed(&self) -> bool {
        self.path.len() >= 3
            && self.path.first() == self.path.last()
            && self.helices.len() + 1 == self.path.len()
    }

    /// Releases every joint and body owned by this topology.
    pub fn clear<W: PhysicsWorld + ?Sized>(&mut self, world: &mut W) {
        for index in 0..self.helices.len() {
            for point in AttachmentPoint::ALL {
                self.detach(world, HelixId(index), point);
            }
        }
        for helix in self.helices.drain(..) {
            world.destroy_rigid_body(helix.body());
        }
    }

    fn edge_direction(&self, helix: usize) -> Vector3<f64> {
        self.vertices[self.path[helix + 1]] - self.vertices[self.path[helix]]
    }

    fn visits(&self) -> Vec<Visit> {
        if self.helices.len() + 1 != self.path.len() || self.helices.len() < 2 {
            return Vec::new();
        }
        let centroid = self
            .vertices
            .iter()
            .fold(Vector3::zeros(), |acc, v| acc + v.coords)
            / self.vertices.len() as f64;

        let mut visits: Vec<Visit> = (1..self.helices.len())
            .map(|k| self.visit(k, self.path[k], k - 1, k, &centroid))
            .collect();
        if self.is_closed() {
            let last = self.helices.len() - 1;
            visits.push(self.visit(self.path.len() - 1, self.path[0], last, 0, &centroid));
        }
        visits
    }

    fn visit(
        &self,
        position: usize,
        vertex: usize,
        incoming: usize,
        outgoing: usize,
        centroid: &Vector3<f64>,
    ) -> Visit {
        let d_in = self.edge_direction(incoming);
        let d_out = self.edge_direction(outgoing);

        let mut normal = self.vertices[vertex].coords - centroid;
        if normal.norm() <= DEGENERATE_EPS {
            normal = d_in.cross(&d_out);
        }
        if normal.norm() <= DEGENERATE_EPS {
            normal = Vector3::z();
        }

        Visit {
            position,
            vertex,
            incoming,
            outgoing,
            sign: sgn_nozero(signed_angle(&d_in, &d_out, &normal)),
        }
    }
}
