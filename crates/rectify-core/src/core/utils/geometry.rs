use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};

/// Sign of `value`, treating zero as positive.
pub fn sgn_nozero(value: f64) -> f64 {
    if value >= 0.0 { 1.0 } else { -1.0 }
}

/// Rotation taking the local helix axis (+Z) onto `direction`.
///
/// The antiparallel case has no unique shortest rotation, so it is resolved as a half turn
/// about +X.
pub fn rotation_to_align(direction: &Vector3<f64>) -> UnitQuaternion<f64> {
    UnitQuaternion::rotation_between(&Vector3::z(), direction).unwrap_or_else(|| {
        UnitQuaternion::from_axis_angle(&Vector3::x_axis(), std::f64::consts::PI)
    })
}

pub fn rotation_from_axis_angle(axis: &Vector3<f64>, angle_degrees: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Unit::new_normalize(*axis), angle_degrees.to_radians())
}

/// Unsigned angle between `from` and `to`, signed by the side of `to` relative to the plane
/// spanned by `normal` and `from`. Returns radians.
pub fn signed_angle(from: &Vector3<f64>, to: &Vector3<f64>, normal: &Vector3<f64>) -> f64 {
    let sign = sgn_nozero(normal.cross(from).dot(to));
    sign * unsigned_angle(from, to)
}

/// Angle between two vectors in radians, clamped against rounding outside `acos`'s domain.
pub fn unsigned_angle(from: &Vector3<f64>, to: &Vector3<f64>) -> f64 {
    let denom = from.norm() * to.norm();
    if denom <= f64::EPSILON {
        return 0.0;
    }
    (from.dot(to) / denom).clamp(-1.0, 1.0).acos()
}

/// Placement of a helix spanning `start`..`end`: centred on the midpoint with +Z along the edge.
pub fn placement_between(start: &Point3<f64>, end: &Point3<f64>) -> Isometry3<f64> {
    let midpoint = nalgebra::center(start, end);
    let direction = end - start;
    placement_along(&midpoint, &direction)
}

pub fn placement_along(center: &Point3<f64>, direction: &Vector3<f64>) -> Isometry3<f64> {
    Isometry3::from_parts(Translation3::from(center.coords), rotation_to_align(direction))
}

/// World direction of the local helix axis under `transform`.
pub fn axis_direction(transform: &Isometry3<f64>) -> Vector3<f64> {
    transform.rotation * Vector3::z()
}
