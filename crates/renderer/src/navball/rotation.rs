//! Platform attitude as a rotation of the navball sphere.
//!
//! Elevation turns about x, azimuth about y, bank about z, composed
//! intrinsically in Y·X·Z order through a unit quaternion.
//!
//! The sphere's screen frame has y pointing down, while world vectors from
//! the celestial calculator have y pointing up. [`to_view`] handles the
//! flip so both land on the same screen point.

use std::f32::consts::PI;

use nalgebra::{Matrix3, Rotation3, UnitQuaternion, Vector3};

use osd_common::Orientation;

/// Rotation taking a sphere-frame normal to its texture-frame direction.
pub fn platform_rotation(azimuth: f32, elevation: f32, bank: f32) -> Rotation3<f32> {
    let yaw = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), azimuth.to_radians());
    let pitch = UnitQuaternion::from_axis_angle(&Vector3::x_axis(), elevation.to_radians());
    let roll = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), bank.to_radians());
    (yaw * pitch * roll).to_rotation_matrix()
}

/// Rotation for an orientation sample; a missing sample is level and north.
pub fn orientation_rotation(orientation: Option<&Orientation>) -> Rotation3<f32> {
    match orientation {
        Some(o) => platform_rotation(o.azimuth as f32, o.elevation as f32, o.bank as f32),
        None => Rotation3::identity(),
    }
}

/// Equirectangular texture coordinates of a unit direction.
#[inline]
pub fn sphere_to_uv(p: &Vector3<f32>) -> (f32, f32) {
    let u = p.x.atan2(p.z) / (2.0 * PI) + 0.5;
    let v = p.y.clamp(-1.0, 1.0).asin() / PI + 0.5;
    (u, v)
}

/// Carry a world direction (x east, y up, z north) into the view frame.
///
/// Result keeps y up; `z > 0` is the hemisphere facing the viewer.
pub fn to_view(rotation: &Rotation3<f32>, world: &Vector3<f32>) -> Vector3<f32> {
    let flip = Matrix3::from_diagonal(&Vector3::new(1.0, -1.0, 1.0));
    flip * (rotation.inverse() * (flip * world))
}
