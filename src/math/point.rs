// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Implementation of methods for a point in three-dimensional space.

use std::ops::{Add, AddAssign, Deref, DerefMut, Sub};

use nalgebra::base::{Matrix3, Vector3};

/// Describes a position in three-dimensional space.
///
/// `Point` is a plain value type: copying it copies the coordinates,
/// so two vectors can never share (alias) the same anchor point.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Point(pub(crate) Vector3<f64>);

/// Allows accessing fields of `Point` as `.x`, `.y`, and `.z`.
pub struct PointRaw {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Deref for Point {
    type Target = PointRaw;

    #[inline]
    fn deref(&self) -> &Self::Target {
        unsafe { &*(self.0.as_ptr() as *const PointRaw) }
    }
}

impl DerefMut for Point {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        unsafe { &mut *(self.0.as_mut_ptr() as *mut PointRaw) }
    }
}

impl From<[f64; 3]> for Point {
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Point(Vector3::new(arr[0], arr[1], arr[2]))
    }
}

impl From<Point> for [f64; 3] {
    #[inline]
    fn from(point: Point) -> Self {
        [point.0.x, point.0.y, point.0.z]
    }
}

impl Point {
    /// Create a new `Point` at the given coordinates.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Point(Vector3::new(x, y, z))
    }

    /// Create a `Point` at the origin of the coordinate system.
    #[inline]
    pub fn origin() -> Self {
        Point(Vector3::zeros())
    }

    /// Get the coordinates of the point as a raw `nalgebra` vector.
    #[inline]
    pub fn coords(&self) -> Vector3<f64> {
        self.0
    }

    /// Move the point by the provided displacement.
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let mut point = Point::new(1.0, 2.0, 3.0);
    /// point.translate(&[0.5, -1.0, 0.0].into());
    ///
    /// assert_approx_eq!(f64, point.x, 1.5);
    /// assert_approx_eq!(f64, point.y, 1.0);
    /// assert_approx_eq!(f64, point.z, 3.0);
    /// ```
    #[inline]
    pub fn translate(&mut self, displacement: &Point) {
        self.0 += displacement.0;
    }

    /// Apply a transformation matrix to the point, rotating it about the origin.
    #[inline]
    pub fn rotate(&mut self, matrix: &Matrix3<f64>) {
        self.0 = matrix * self.0;
    }

    /// Apply a transformation matrix to the point, rotating it about an anchor point.
    #[inline]
    pub fn rotate_about(&mut self, matrix: &Matrix3<f64>, anchor: &Point) {
        self.0 = anchor.0 + matrix * (self.0 - anchor.0);
    }

    /// Snap coordinates with absolute value at most `epsilon` to exactly zero.
    ///
    /// Required before coordinates round-trip through lossy exports.
    pub fn rezero(&mut self, epsilon: f64) {
        for i in 0..3 {
            if self.0[i].abs() <= epsilon {
                self.0[i] = 0.0;
            }
        }
    }

    /// Returns `true` if all the coordinates of the point are exactly zero.
    #[inline]
    pub fn is_origin(&self) -> bool {
        self.0.x == 0.0 && self.0.y == 0.0 && self.0.z == 0.0
    }
}

impl Sub for Point {
    type Output = Vector3<f64>;

    /// Displacement from `rhs` to `self`.
    #[inline]
    fn sub(self, rhs: Point) -> Vector3<f64> {
        self.0 - rhs.0
    }
}

impl Add<Vector3<f64>> for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Vector3<f64>) -> Point {
        Point(self.0 + rhs)
    }
}

impl AddAssign<Vector3<f64>> for Point {
    #[inline]
    fn add_assign(&mut self, rhs: Vector3<f64>) {
        self.0 += rhs;
    }
}

/******************************/
/*       FEATURE: SERDE       */
/******************************/

#[cfg(feature = "serde")]
mod serde {
    use std::fmt;

    use super::*;
    use ::serde::{
        de::{self, SeqAccess, Visitor},
        Deserialize, Deserializer,
    };
    use ::serde::{ser::SerializeSeq, Serialize, Serializer};

    impl Serialize for Point {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(3))?;
            seq.serialize_element(&self.0.x)?;
            seq.serialize_element(&self.0.y)?;
            seq.serialize_element(&self.0.z)?;
            seq.end()
        }
    }

    impl<'de> Deserialize<'de> for Point {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct PointVisitor;

            impl<'de> Visitor<'de> for PointVisitor {
                type Value = Point;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a sequence of three floats")
                }

                fn visit_seq<S>(self, mut seq: S) -> Result<Point, S::Error>
                where
                    S: SeqAccess<'de>,
                {
                    let x = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                    let y = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                    let z = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                    Ok(Point(Vector3::new(x, y, z)))
                }
            }

            deserializer.deserialize_seq(PointVisitor)
        }
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn new_and_views() {
        let point = Point::new(1.5, -2.0, 0.25);

        assert_approx_eq!(f64, point.x, 1.5);
        assert_approx_eq!(f64, point.y, -2.0);
        assert_approx_eq!(f64, point.z, 0.25);
    }

    #[test]
    fn views_are_writable() {
        let mut point = Point::origin();
        point.x = 4.2;
        point.z = -1.1;

        assert_eq!(point, Point::new(4.2, 0.0, -1.1));
    }

    #[test]
    fn from_array_round_trip() {
        let point = Point::from([0.1, 0.2, 0.3]);
        let arr: [f64; 3] = point.into();

        assert_eq!(arr, [0.1, 0.2, 0.3]);
    }

    #[test]
    fn subtraction_gives_displacement() {
        let head = Point::new(3.0, 5.0, 7.0);
        let anchor = Point::new(1.0, 1.0, 1.0);

        let displacement = head - anchor;

        assert_approx_eq!(f64, displacement.x, 2.0);
        assert_approx_eq!(f64, displacement.y, 4.0);
        assert_approx_eq!(f64, displacement.z, 6.0);
    }

    #[test]
    fn rotate_about_anchor() {
        // 90° rotation about the z-axis
        let matrix = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);

        let mut point = Point::new(2.0, 1.0, 5.0);
        point.rotate_about(&matrix, &Point::new(1.0, 1.0, 0.0));

        assert_approx_eq!(f64, point.x, 1.0, epsilon = 1e-12);
        assert_approx_eq!(f64, point.y, 2.0, epsilon = 1e-12);
        assert_approx_eq!(f64, point.z, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn rotate_about_self_is_identity() {
        let matrix = Matrix3::new(0.0, -1.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0);

        let mut point = Point::new(2.0, 1.0, 5.0);
        let anchor = point;
        point.rotate_about(&matrix, &anchor);

        assert_eq!(point, anchor);
    }

    #[test]
    fn rezero_snaps_noise() {
        let mut point = Point::new(1.0e-14, -3.0e-11, 0.5);
        point.rezero(1.0e-10);

        assert_eq!(point, Point::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn is_origin() {
        assert!(Point::origin().is_origin());
        assert!(!Point::new(0.0, 1.0e-12, 0.0).is_origin());
    }
}

#[cfg(test)]
#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn point_to_yaml() {
        let point = Point::new(4.376, 2.13, 4.0);

        let string = serde_yaml::to_string(&point).unwrap();

        assert_eq!(string, "- 4.376\n- 2.13\n- 4.0\n");
    }

    #[test]
    fn point_from_yaml() {
        let string = "[ 4.376, 2.13, 4.0 ]\n";
        let point: Point = serde_yaml::from_str(string).unwrap();

        assert_approx_eq!(f64, point.x, 4.376);
        assert_approx_eq!(f64, point.y, 2.13);
        assert_approx_eq!(f64, point.z, 4.0);
    }
}
