use crate::core::dna::HelixSpec;
use crate::core::models::topology::Topology;
use crate::core::physics::testing::FrozenWorld;
use nalgebra::Point3;

/// Steps every trial needs before the frozen collaborator reports sleeping.
pub(crate) const STEPS_TO_SLEEP: usize = 2;

pub(crate) fn unit_spec() -> HelixSpec {
    HelixSpec {
        step: 1.0,
        ..HelixSpec::default()
    }
}

/// Two helices of ten bases on a straight line.
pub(crate) fn straight_pair() -> (FrozenWorld, Topology) {
    let mut world = FrozenWorld::new(STEPS_TO_SLEEP);
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(20.0, 0.0, 0.0),
    ];
    let topology = Topology::from_path(&mut world, unit_spec(), vertices, vec![0, 1, 2])
        .expect("straight pair builds");
    (world, topology)
}

/// A closed route of two loops crossing at the origin, with scaffold and staple connections.
pub(crate) fn fixture() -> (FrozenWorld, Topology) {
    let mut world = FrozenWorld::new(STEPS_TO_SLEEP);
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(10.0, 0.0, 0.0),
        Point3::new(10.0, 12.0, 0.0),
        Point3::new(-11.0, 0.0, 0.0),
        Point3::new(-11.0, 9.0, 0.0),
        Point3::new(0.0, 0.0, -50.0),
    ];
    let topology = Topology::from_path(
        &mut world,
        unit_spec(),
        vertices,
        vec![0, 1, 2, 0, 3, 4, 0],
    )
    .expect("fixture builds");
    (world, topology)
}
