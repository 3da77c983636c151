use nalgebra::Matrix3;
use std::f64::consts::PI;

/// Builds the body-to-world rotation matrix for the given Euler angles using
/// the yaw-pitch-roll convention, R = Rz(yaw) · Ry(pitch) · Rx(roll).
///
/// The composition order matters: thrust is applied along the body z-axis and
/// projected into the world frame through this matrix.
pub fn rotation_matrix(roll: f64, pitch: f64, yaw: f64) -> Matrix3<f64> {
    let (sin_roll, cos_roll) = roll.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();
    let (sin_yaw, cos_yaw) = yaw.sin_cos();

    #[rustfmt::skip]
    let r_x = Matrix3::new(
        1.0, 0.0, 0.0,
        0.0, cos_roll, -sin_roll,
        0.0, sin_roll, cos_roll,
    );

    #[rustfmt::skip]
    let r_y = Matrix3::new(
        cos_pitch, 0.0, sin_pitch,
        0.0, 1.0, 0.0,
        -sin_pitch, 0.0, cos_pitch,
    );

    #[rustfmt::skip]
    let r_z = Matrix3::new(
        cos_yaw, -sin_yaw, 0.0,
        sin_yaw, cos_yaw, 0.0,
        0.0, 0.0, 1.0,
    );

    r_z * r_y * r_x
}

/// Maps any angle onto (−π, π]. Values already in range pass through
/// bit-exact; the add-and-reduce round trip would otherwise perturb them by
/// an ULP.
pub fn wrap_angle(value: f64) -> f64 {
    if value > -PI && value <= PI {
        return value;
    }
    let wrapped = (value + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped == -PI {
        PI
    } else {
        wrapped
    }
}
