use super::ids::HelixId;
use crate::core::dna::HelixSpec;
use crate::core::physics::{
    BodyHandle, BodyShape, Capsule, JointHandle, PhysicsError, PhysicsWorld, Sphere,
};
use crate::core::utils::geometry::rotation_from_axis_angle;
use nalgebra::{Isometry3, Point3, Translation3, Vector3};
use std::fmt;
use tracing::trace;

/// The four strand ends of a double helix where it can be joined to another helix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum AttachmentPoint {
    ForwardThreePrime = 0,
    ForwardFivePrime = 1,
    BackwardThreePrime = 2,
    BackwardFivePrime = 3,
}

impl AttachmentPoint {
    pub const ALL: [AttachmentPoint; 4] = [
        AttachmentPoint::ForwardThreePrime,
        AttachmentPoint::ForwardFivePrime,
        AttachmentPoint::BackwardThreePrime,
        AttachmentPoint::BackwardFivePrime,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_three_prime(self) -> bool {
        matches!(
            self,
            AttachmentPoint::ForwardThreePrime | AttachmentPoint::BackwardThreePrime
        )
    }

    /// The roles a connection at `self` may reciprocate with on the partner helix.
    pub fn complements(self) -> [AttachmentPoint; 2] {
        if self.is_three_prime() {
            [
                AttachmentPoint::ForwardFivePrime,
                AttachmentPoint::BackwardFivePrime,
            ]
        } else {
            [
                AttachmentPoint::ForwardThreePrime,
                AttachmentPoint::BackwardThreePrime,
            ]
        }
    }

    pub fn is_complementary(self, other: AttachmentPoint) -> bool {
        self.is_three_prime() != other.is_three_prime()
    }
}

impl fmt::Display for AttachmentPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::ForwardThreePrime => "forward 3'",
                Self::ForwardFivePrime => "forward 5'",
                Self::BackwardThreePrime => "backward 3'",
                Self::BackwardFivePrime => "backward 5'",
            }
        )
    }
}

/// Rotation about the helix axis (degrees) and axial offset of an attachment point.
fn angle_and_offset(spec: &HelixSpec, point: AttachmentPoint, bases: u32) -> (f64, f64) {
    let half_length = spec.length_for_base_count(bases) / 2.0;
    let twist = spec.rotation_for_base_count(bases);
    match point {
        AttachmentPoint::ForwardFivePrime => (0.0, -half_length),
        AttachmentPoint::ForwardThreePrime => (twist, half_length),
        AttachmentPoint::BackwardFivePrime => (spec.opposite_rotation, -half_length),
        AttachmentPoint::BackwardThreePrime => (twist + spec.opposite_rotation, half_length),
    }
}

/// Frame of `point` in the body coordinates of a helix with `bases` bases.
///
/// The body frame is centred on the helix midpoint with the axis along +Z. Five-prime ends sit at
/// the origin end of the helix, three-prime ends are advanced by the full length and twist, and
/// the backward strand is rotated by the opposite-strand offset.
pub fn local_frame(spec: &HelixSpec, point: AttachmentPoint, bases: u32) -> Isometry3<f64> {
    let (angle, axial) = angle_and_offset(spec, point, bases);
    let rotation = rotation_from_axis_angle(&Vector3::z(), angle);
    let position = rotation * Vector3::new(spec.radius, 0.0, axial);
    Isometry3::from_parts(Translation3::from(position), rotation)
}

/// Collision description of a helix: a capsule along the axis plus one enlarged sphere per
/// attachment point, pulled inwards so that the capsule's rounded caps do not dominate contacts
/// near the helix ends.
pub fn body_shape(spec: &HelixSpec, bases: u32) -> BodyShape {
    let length = spec.length_for_base_count(bases);
    assert!(
        length > 2.0 * spec.radius,
        "helix of {} bases ({:.3} nm) is not longer than its diameter",
        bases,
        length
    );

    let capsule_radius = spec.radius + spec.sphere_radius;
    let marker_radius = spec.sphere_radius * spec.approximation_radius_multiplier;
    let radial = spec.radius - marker_radius + spec.sphere_radius;

    let spheres = AttachmentPoint::ALL
        .iter()
        .map(|&point| {
            let (angle, axial) = angle_and_offset(spec, point, bases);
            let inset = if axial > 0.0 {
                axial - marker_radius
            } else {
                axial + marker_radius
            };
            let rotation = rotation_from_axis_angle(&Vector3::z(), angle);
            Sphere {
                radius: marker_radius,
                center: Point3::from(rotation * Vector3::new(radial, 0.0, inset)),
            }
        })
        .collect();

    BodyShape {
        capsule: Capsule {
            radius: capsule_radius,
            half_height: (length / 2.0 - capsule_radius).max(0.0),
        },
        spheres,
        density: spec.density,
    }
}

/// One end of a joint between two helices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub helix: HelixId,
    pub joint: JointHandle,
}

/// A rigid double-helix segment owned by a topology.
#[derive(Debug, Clone)]
pub struct Helix {
    id: HelixId,
    bases: u32,
    initial_bases: u32,
    body: BodyHandle,
    initial_transform: Isometry3<f64>,
    connections: [Option<Connection>; 4],
}

impl Helix {
    /// Creates the helix body in `world` at `placement`.
    ///
    /// # Panics
    ///
    /// If `bases` does not produce a helix longer than twice the radius.
    pub fn new<W: PhysicsWorld + ?Sized>(
        world: &mut W,
        spec: &HelixSpec,
        id: HelixId,
        bases: u32,
        placement: Isometry3<f64>,
    ) -> Result<Self, PhysicsError> {
        let body = world.create_rigid_body(&body_shape(spec, bases), &placement)?;
        trace!(helix = id.index(), bases, "Created helix body.");
        Ok(Self {
            id,
            bases,
            initial_bases: bases,
            body,
            initial_transform: placement,
            connections: [None; 4],
        })
    }

    pub fn id(&self) -> HelixId {
        self.id
    }

    pub fn base_count(&self) -> u32 {
        self.bases
    }

    /// Base count the helix was created with, before any optimization.
    pub fn initial_base_count(&self) -> u32 {
        self.initial_bases
    }

    pub fn body(&self) -> BodyHandle {
        self.body
    }

    /// Reference placement every optimization trial starts from.
    pub fn initial_transform(&self) -> &Isometry3<f64> {
        &self.initial_transform
    }

    pub fn transform<W: PhysicsWorld + ?Sized>(&self, world: &W) -> Isometry3<f64> {
        world.global_transform(self.body)
    }

    pub fn set_transform<W: PhysicsWorld + ?Sized>(
        &self,
        world: &mut W,
        transform: &Isometry3<f64>,
    ) {
        world.set_global_transform(self.body, transform);
    }

    pub fn connection(&self, point: AttachmentPoint) -> Option<&Connection> {
        self.connections[point.index()].as_ref()
    }

    pub fn connections(&self) -> impl Iterator<Item = (AttachmentPoint, &Connection)> {
        AttachmentPoint::ALL
            .into_iter()
            .filter_map(|point| self.connection(point).map(|c| (point, c)))
    }

    pub fn is_connected(&self) -> bool {
        self.connections.iter().any(Option::is_some)
    }

    pub fn local_frame(&self, spec: &HelixSpec, point: AttachmentPoint) -> Isometry3<f64> {
        local_frame(spec, point, self.bases)
    }

    pub fn world_attachment_point<W: PhysicsWorld + ?Sized>(
        &self,
        world: &W,
        spec: &HelixSpec,
        point: AttachmentPoint,
    ) -> Point3<f64> {
        let frame = self.local_frame(spec, point);
        self.transform(world) * Point3::from(frame.translation.vector)
    }

    /// The slot on `other` holding the back-reference of the connection at `point`.
    ///
    /// # Panics
    ///
    /// If `other` holds no matching back-reference; the connection state is corrupt.
    pub fn reciprocal_point(&self, point: AttachmentPoint, other: &Helix) -> AttachmentPoint {
        let connection = self
            .connection(point)
            .unwrap_or_else(|| panic!("{} has no connection at {}", self.id, point));
        point
            .complements()
            .into_iter()
            .find(|&candidate| {
                other.connection(candidate).is_some_and(|back| {
                    back.helix == self.id && back.joint == connection.joint
                })
            })
            .unwrap_or_else(|| {
                panic!(
                    "{} at {} references {}, which holds no reciprocal connection",
                    self.id, point, other.id
                )
            })
    }

    /// Destroys the body and creates a new one with `bases` bases at `transform`, discarding all
    /// simulated motion. The reference transform is kept.
    ///
    /// # Panics
    ///
    /// If the helix still has live connections; they must be detached first.
    pub(crate) fn recreate_rigid_body<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        spec: &HelixSpec,
        bases: u32,
        transform: &Isometry3<f64>,
    ) -> Result<(), PhysicsError> {
        assert!(
            !self.is_connected(),
            "{} must be detached before its body is recreated",
            self.id
        );
        let shape = body_shape(spec, bases);
        world.destroy_rigid_body(self.body);
        self.body = world.create_rigid_body(&shape, transform)?;
        self.bases = bases;
        trace!(helix = self.id.index(), bases, "Recreated helix body.");
        Ok(())
    }
}

/// Joins `this` at `this_point` to `other` at `other_point`, replacing whatever either slot held.
///
/// # Panics
///
/// If the two helices are the same or the roles are not a three-prime/five-prime pair.
pub fn attach<W: PhysicsWorld + ?Sized>(
    world: &mut W,
    helices: &mut [Helix],
    spec: &HelixSpec,
    this: HelixId,
    this_point: AttachmentPoint,
    other: HelixId,
    other_point: AttachmentPoint,
) -> Result<(), PhysicsError> {
    assert_ne!(this, other, "a helix cannot be attached to itself");
    assert!(
        this_point.is_complementary(other_point),
        "{} cannot be joined to {}",
        this_point,
        other_point
    );

    detach(world, helices, this, this_point);
    detach(world, helices, other, other_point);

    let (body_a, frame_a) = {
        let helix = &helices[this.index()];
        (helix.body, helix.local_frame(spec, this_point))
    };
    let (body_b, frame_b) = {
        let helix = &helices[other.index()];
        (helix.body, helix.local_frame(spec, other_point))
    };
    let joint = world.create_joint(body_a, &frame_a, body_b, &frame_b)?;

    helices[this.index()].connections[this_point.index()] = Some(Connection {
        helix: other,
        joint,
    });
    helices[other.index()].connections[other_point.index()] = Some(Connection {
        helix: this,
        joint,
    });
    trace!(
        from = this.index(),
        to = other.index(),
        "Attached {} to {}.",
        this_point,
        other_point
    );
    Ok(())
}

/// Releases the connection at `point` of helix `id` on both sides. Returns whether one existed.
///
/// # Panics
///
/// If the partner holds no reciprocal slot.
pub fn detach<W: PhysicsWorld + ?Sized>(
    world: &mut W,
    helices: &mut [Helix],
    id: HelixId,
    point: AttachmentPoint,
) -> bool {
    let Some(connection) = helices[id.index()].connections[point.index()].take() else {
        return false;
    };
    world.release_joint(connection.joint);

    let partner = &mut helices[connection.helix.index()];
    let reciprocal = point.complements().into_iter().find(|&candidate| {
        partner.connections[candidate.index()]
            .is_some_and(|back| back.helix == id && back.joint == connection.joint)
    });
    match reciprocal {
        Some(slot) => partner.connections[slot.index()] = None,
        None => panic!(
            "{} at {} references {}, which holds no reciprocal connection",
            id, point, connection.helix
        ),
    }
    true
}

/// World-space distance between the attachment frame at `point` of helix `id` and the frame of
/// its connected partner. This is the strain being minimized.
///
/// # Panics
///
/// If there is no live connection at `point`.
pub fn separation<W: PhysicsWorld + ?Sized>(
    world: &W,
    helices: &[Helix],
    spec: &HelixSpec,
    id: HelixId,
    point: AttachmentPoint,
) -> f64 {
    let helix = &helices[id.index()];
    let connection = helix
        .connection(point)
        .unwrap_or_else(|| panic!("separation requested at empty slot {} of {}", point, id));
    let partner = &helices[connection.helix.index()];
    let partner_point = helix.reciprocal_point(point, partner);

    let here = helix.world_attachment_point(world, spec, point);
    let there = partner.world_attachment_point(world, spec, partner_point);
    (there - here).norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::physics::testing::FrozenWorld;

    const EPS: f64 = 1e-9;

    fn unit_spec() -> HelixSpec {
        HelixSpec {
            step: 1.0,
            ..HelixSpec::default()
        }
    }

    fn make_helix(world: &mut FrozenWorld, spec: &HelixSpec, id: usize, bases: u32) -> Helix {
        Helix::new(world, spec, HelixId(id), bases, Isometry3::identity()).unwrap()
    }

    fn three(world: &mut FrozenWorld, spec: &HelixSpec) -> Vec<Helix> {
        (0..3).map(|i| make_helix(world, spec, i, 10)).collect()
    }

    #[test]
    fn complements_pair_three_prime_with_five_prime() {
        for point in AttachmentPoint::ALL {
            for complement in point.complements() {
                assert!(point.is_complementary(complement));
                assert_ne!(point.is_three_prime(), complement.is_three_prime());
            }
        }
        assert!(!AttachmentPoint::ForwardThreePrime.is_complementary(AttachmentPoint::BackwardThreePrime));
    }

    #[test]
    fn local_frames_follow_twist_length_and_strand_offset() {
        let spec = unit_spec();
        let bases = 10;
        let half = 5.0;

        let five = local_frame(&spec, AttachmentPoint::ForwardFivePrime, bases);
        assert!((five.translation.vector - Vector3::new(spec.radius, 0.0, -half)).norm() < EPS);

        let twist = (bases as f64 * spec.pitch).to_radians();
        let three = local_frame(&spec, AttachmentPoint::ForwardThreePrime, bases);
        let expected = Vector3::new(spec.radius * twist.cos(), spec.radius * twist.sin(), half);
        assert!((three.translation.vector - expected).norm() < EPS);

        let opposite = spec.opposite_rotation.to_radians();
        let backward_five = local_frame(&spec, AttachmentPoint::BackwardFivePrime, bases);
        let expected = Vector3::new(
            spec.radius * opposite.cos(),
            spec.radius * opposite.sin(),
            -half,
        );
        assert!((backward_five.translation.vector - expected).norm() < EPS);

        let backward_three = local_frame(&spec, AttachmentPoint::BackwardThreePrime, bases);
        let angle = twist + opposite;
        let expected = Vector3::new(spec.radius * angle.cos(), spec.radius * angle.sin(), half);
        assert!((backward_three.translation.vector - expected).norm() < EPS);
    }

    #[test]
    fn body_shape_has_capsule_and_four_markers_inside_the_helix() {
        let spec = HelixSpec::default();
        let shape = body_shape(&spec, 30);
        let length = spec.length_for_base_count(30);

        assert_eq!(shape.spheres.len(), 4);
        assert!((shape.capsule.radius - (spec.radius + spec.sphere_radius)).abs() < EPS);
        assert!((shape.capsule.half_height - (length / 2.0 - shape.capsule.radius)).abs() < EPS);
        for sphere in &shape.spheres {
            assert!(sphere.center.z.abs() + sphere.radius <= length / 2.0 + EPS);
        }
    }

    #[test]
    #[should_panic(expected = "not longer than its diameter")]
    fn too_short_helix_is_a_precondition_violation() {
        let spec = unit_spec();
        let mut world = FrozenWorld::new(1);
        make_helix(&mut world, &spec, 0, 2);
    }

    #[test]
    fn attach_records_connection_on_both_sides() {
        let spec = unit_spec();
        let mut world = FrozenWorld::new(1);
        let mut helices = three(&mut world, &spec);

        attach(
            &mut world,
            &mut helices,
            &spec,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime,
            HelixId(1),
            AttachmentPoint::ForwardFivePrime,
        )
        .unwrap();

        let a = helices[0].connection(AttachmentPoint::ForwardThreePrime).unwrap();
        let b = helices[1].connection(AttachmentPoint::ForwardFivePrime).unwrap();
        assert_eq!(a.helix, HelixId(1));
        assert_eq!(b.helix, HelixId(0));
        assert_eq!(a.joint, b.joint);
        assert_eq!(world.joints.len(), 1);
        assert_eq!(
            helices[0].reciprocal_point(AttachmentPoint::ForwardThreePrime, &helices[1]),
            AttachmentPoint::ForwardFivePrime
        );
    }

    #[test]
    fn detach_clears_both_sides_and_releases_joint() {
        let spec = unit_spec();
        let mut world = FrozenWorld::new(1);
        let mut helices = three(&mut world, &spec);
        attach(
            &mut world,
            &mut helices,
            &spec,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime,
            HelixId(1),
            AttachmentPoint::ForwardFivePrime,
        )
        .unwrap();

        assert!(detach(
            &mut world,
            &mut helices,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime
        ));
        assert!(helices[0].connection(AttachmentPoint::ForwardThreePrime).is_none());
        assert!(helices[1].connection(AttachmentPoint::ForwardFivePrime).is_none());
        assert!(world.joints.is_empty());

        assert!(!detach(
            &mut world,
            &mut helices,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime
        ));
    }

    #[test]
    fn reattaching_an_occupied_slot_detaches_the_previous_partner() {
        let spec = unit_spec();
        let mut world = FrozenWorld::new(1);
        let mut helices = three(&mut world, &spec);
        attach(
            &mut world,
            &mut helices,
            &spec,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime,
            HelixId(1),
            AttachmentPoint::ForwardFivePrime,
        )
        .unwrap();
        attach(
            &mut world,
            &mut helices,
            &spec,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime,
            HelixId(2),
            AttachmentPoint::BackwardFivePrime,
        )
        .unwrap();

        assert_eq!(
            helices[0]
                .connection(AttachmentPoint::ForwardThreePrime)
                .unwrap()
                .helix,
            HelixId(2)
        );
        assert!(!helices[1].is_connected());
        assert_eq!(world.joints.len(), 1);
    }

    #[test]
    fn attaching_to_an_occupied_partner_slot_detaches_its_previous_partner() {
        let spec = unit_spec();
        let mut world = FrozenWorld::new(1);
        let mut helices = three(&mut world, &spec);
        attach(
            &mut world,
            &mut helices,
            &spec,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime,
            HelixId(1),
            AttachmentPoint::ForwardFivePrime,
        )
        .unwrap();
        attach(
            &mut world,
            &mut helices,
            &spec,
            HelixId(2),
            AttachmentPoint::BackwardThreePrime,
            HelixId(1),
            AttachmentPoint::ForwardFivePrime,
        )
        .unwrap();

        assert!(!helices[0].is_connected());
        assert_eq!(
            helices[1]
                .connection(AttachmentPoint::ForwardFivePrime)
                .unwrap()
                .helix,
            HelixId(2)
        );
        assert_eq!(world.joints.len(), 1);
    }

    #[test]
    fn two_connections_between_the_same_pair_stay_distinct() {
        let spec = unit_spec();
        let mut world = FrozenWorld::new(1);
        let mut helices = three(&mut world, &spec);
        attach(
            &mut world,
            &mut helices,
            &spec,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime,
            HelixId(1),
            AttachmentPoint::ForwardFivePrime,
        )
        .unwrap();
        attach(
            &mut world,
            &mut helices,
            &spec,
            HelixId(1),
            AttachmentPoint::BackwardThreePrime,
            HelixId(0),
            AttachmentPoint::BackwardFivePrime,
        )
        .unwrap();

        detach(
            &mut world,
            &mut helices,
            HelixId(0),
            AttachmentPoint::BackwardFivePrime,
        );
        assert!(helices[0].connection(AttachmentPoint::ForwardThreePrime).is_some());
        assert!(helices[1].connection(AttachmentPoint::ForwardFivePrime).is_some());
        assert!(helices[1].connection(AttachmentPoint::BackwardThreePrime).is_none());
    }

    #[test]
    #[should_panic(expected = "cannot be joined")]
    fn attaching_two_three_prime_ends_is_rejected() {
        let spec = unit_spec();
        let mut world = FrozenWorld::new(1);
        let mut helices = three(&mut world, &spec);
        let _ = attach(
            &mut world,
            &mut helices,
            &spec,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime,
            HelixId(1),
            AttachmentPoint::BackwardThreePrime,
        );
    }

    #[test]
    fn separation_is_zero_when_frames_coincide_and_tracks_displacement() {
        let spec = unit_spec();
        let mut world = FrozenWorld::new(1);
        let a = Helix::new(&mut world, &spec, HelixId(0), 10, Isometry3::identity()).unwrap();

        // Place b so that its forward 5' frame lands exactly on a's forward 3' frame.
        let a_three = local_frame(&spec, AttachmentPoint::ForwardThreePrime, 10);
        let b_five = local_frame(&spec, AttachmentPoint::ForwardFivePrime, 12);
        let b_placement = a_three * b_five.inverse();
        let b = Helix::new(&mut world, &spec, HelixId(1), 12, b_placement).unwrap();
        let mut helices = vec![a, b];

        attach(
            &mut world,
            &mut helices,
            &spec,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime,
            HelixId(1),
            AttachmentPoint::ForwardFivePrime,
        )
        .unwrap();

        let at_rest = separation(
            &world,
            &helices,
            &spec,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime,
        );
        assert!(at_rest < EPS, "separation was {}", at_rest);

        let displacement = Vector3::new(0.3, -1.2, 0.4);
        let moved = Isometry3::from_parts(
            Translation3::from(b_placement.translation.vector + displacement),
            b_placement.rotation,
        );
        helices[1].set_transform(&mut world, &moved);

        let from_a = separation(
            &world,
            &helices,
            &spec,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime,
        );
        let from_b = separation(
            &world,
            &helices,
            &spec,
            HelixId(1),
            AttachmentPoint::ForwardFivePrime,
        );
        assert!((from_a - displacement.norm()).abs() < EPS);
        assert!((from_a - from_b).abs() < EPS);
    }

    #[test]
    #[should_panic(expected = "empty slot")]
    fn separation_requires_a_connection() {
        let spec = unit_spec();
        let mut world = FrozenWorld::new(1);
        let helices = three(&mut world, &spec);
        separation(
            &world,
            &helices,
            &spec,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime,
        );
    }

    #[test]
    fn recreate_rigid_body_replaces_body_and_keeps_reference_transform() {
        let spec = unit_spec();
        let mut world = FrozenWorld::new(1);
        let reference = Isometry3::translation(1.0, 2.0, 3.0);
        let mut helix = Helix::new(&mut world, &spec, HelixId(0), 10, reference).unwrap();
        let old_body = helix.body();

        helix
            .recreate_rigid_body(&mut world, &spec, 11, &reference)
            .unwrap();

        assert_ne!(helix.body(), old_body);
        assert_eq!(helix.base_count(), 11);
        assert_eq!(helix.initial_base_count(), 10);
        assert_eq!(helix.initial_transform(), &reference);
        assert_eq!(helix.transform(&world), reference);
        assert_eq!(world.bodies.len(), 1);
    }

    #[test]
    #[should_panic(expected = "must be detached")]
    fn recreate_rigid_body_refuses_connected_helix() {
        let spec = unit_spec();
        let mut world = FrozenWorld::new(1);
        let mut helices = three(&mut world, &spec);
        attach(
            &mut world,
            &mut helices,
            &spec,
            HelixId(0),
            AttachmentPoint::ForwardThreePrime,
            HelixId(1),
            AttachmentPoint::ForwardFivePrime,
        )
        .unwrap();
        let _ = helices[0].recreate_rigid_body(&mut world, &spec, 11, &Isometry3::identity());
    }
}
