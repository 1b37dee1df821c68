// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Construction of rotation matrices for geometric transformations.

use nalgebra::base::{Matrix3, Unit, Vector3};
use nalgebra::Rotation3;

use crate::errors::VectorError;
use crate::math::point::Point;

/// Smallest axis norm that is still treated as a valid rotation axis.
const AXIS_EPSILON: f64 = 1.0e-12;

/// Construct a rotation matrix for rotation by `angle` radians about `axis`.
///
/// The axis does not have to be a unit vector.
///
/// ## Example
/// ```
/// # use nanoxtal_rs::math::transforms::rotation_matrix;
/// # use float_cmp::assert_approx_eq;
/// # use nalgebra::Vector3;
/// #
/// let matrix = rotation_matrix(std::f64::consts::FRAC_PI_2, &Vector3::new(0.0, 0.0, 2.0)).unwrap();
/// let rotated = matrix * Vector3::new(1.0, 0.0, 0.0);
///
/// assert_approx_eq!(f64, rotated.x, 0.0, epsilon = 1e-12);
/// assert_approx_eq!(f64, rotated.y, 1.0, epsilon = 1e-12);
/// ```
pub fn rotation_matrix(angle: f64, axis: &Vector3<f64>) -> Result<Matrix3<f64>, VectorError> {
    let axis =
        Unit::try_new(*axis, AXIS_EPSILON).ok_or(VectorError::ZeroLength("rotation axis"))?;

    Ok(Rotation3::from_axis_angle(&axis, angle).into_inner())
}

/// Construct a rotation matrix for rotation by `angle` degrees about `axis`.
#[inline]
pub fn rotation_matrix_degrees(
    angle: f64,
    axis: &Vector3<f64>,
) -> Result<Matrix3<f64>, VectorError> {
    rotation_matrix(angle.to_radians(), axis)
}

/// Construct the rotation matrix taking the direction of `from` onto the direction of `to`.
///
/// ## Notes
/// - For antiparallel inputs the rotation is by π about an arbitrary
///   axis perpendicular to `from`.
pub fn alignment_matrix(
    from: &Vector3<f64>,
    to: &Vector3<f64>,
) -> Result<Matrix3<f64>, VectorError> {
    if from.norm() <= AXIS_EPSILON || to.norm() <= AXIS_EPSILON {
        return Err(VectorError::ZeroLength("vector alignment"));
    }

    match Rotation3::rotation_between(from, to) {
        Some(rotation) => Ok(rotation.into_inner()),
        // rotation_between returns None only for antiparallel vectors
        None => {
            let axis = perpendicular_axis(from);
            rotation_matrix(std::f64::consts::PI, &axis)
        }
    }
}

/// Apply a rotation matrix to a point, rotating it about an anchor point.
#[inline]
pub fn rotate_point(point: &Point, matrix: &Matrix3<f64>, anchor: &Point) -> Point {
    let mut rotated = *point;
    rotated.rotate_about(matrix, anchor);
    rotated
}

/// Find some vector perpendicular to the provided non-null vector.
fn perpendicular_axis(v: &Vector3<f64>) -> Vector3<f64> {
    // cross with whichever basis vector is least aligned with v
    let basis = if v.x.abs() <= v.y.abs() && v.x.abs() <= v.z.abs() {
        Vector3::x()
    } else if v.y.abs() <= v.z.abs() {
        Vector3::y()
    } else {
        Vector3::z()
    };

    v.cross(&basis)
}

/******************************/
/*         UNIT TESTS         */
/******************************/
