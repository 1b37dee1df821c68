// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Implementation of methods for an anchored three-dimensional vector.

use std::ops::{Add, AddAssign, Deref, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use nalgebra::base::{Matrix3, Vector3};

use crate::errors::VectorError;
use crate::math::point::Point;
use crate::math::transforms;
use crate::structures::dimension::Dimension;
use crate::utility::warn_degenerate;

/// Default epsilon for [`Vector::rezero_default`].
pub const REZERO_EPSILON: f64 = 1.0e-10;

/// Reciprocal of square root of 2, i.e. 1/sqrt(2).
const REC_SQRT2: f64 = std::f64::consts::FRAC_1_SQRT_2;
/// Reciprocal of square root of 3, i.e. 1/sqrt(3).
const REC_SQRT3: f64 = 0.577_350_269_189_625_8_f64;

/// Describes a directed displacement between an anchor point `p0` and a
/// head point `p`.
///
/// The components, the anchor, and the head are stored together and the
/// identity `components == head - anchor` holds at all times: every
/// mutating method re-derives the dependent representation immediately.
/// Raw component storage is therefore never exposed mutably; use
/// [`Vector::set_components`], [`Vector::set_head`],
/// [`Vector::set_anchor`], or the coordinate setters.
///
/// Two-dimensional vectors follow the convention that they live in the
/// z = 0 plane.
#[derive(Debug, PartialEq, Clone, Copy, Default)]
pub struct Vector {
    comps: Vector3<f64>,
    p0: Point,
    p: Point,
}

/// Allows read access to the components of `Vector` as `.x`, `.y`, and `.z`.
pub struct VectorRaw {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Deref for Vector {
    type Target = VectorRaw;

    #[inline]
    fn deref(&self) -> &Self::Target {
        unsafe { &*(self.comps.as_ptr() as *const VectorRaw) }
    }
}

impl From<[f64; 3]> for Vector {
    /// Create a `Vector` with the given components, anchored at the origin.
    #[inline]
    fn from(arr: [f64; 3]) -> Self {
        Vector::new(arr[0], arr[1], arr[2])
    }
}

impl From<Vector3<f64>> for Vector {
    #[inline]
    fn from(comps: Vector3<f64>) -> Self {
        Vector {
            comps,
            p0: Point::origin(),
            p: Point(comps),
        }
    }
}

impl From<Point> for Vector {
    /// Create the position vector of a point: anchored at the origin
    /// with its head at the point.
    #[inline]
    fn from(point: Point) -> Self {
        Vector {
            comps: point.0,
            p0: Point::origin(),
            p: point,
        }
    }
}

impl From<Dimension> for Vector {
    /// Get the unit vector oriented along the specified dimension(s).
    /// If `dim` is `Dimension::None`, returns a null vector.
    #[inline]
    fn from(dim: Dimension) -> Self {
        match dim {
            Dimension::None => [0.0, 0.0, 0.0].into(),
            Dimension::X => [1.0, 0.0, 0.0].into(),
            Dimension::Y => [0.0, 1.0, 0.0].into(),
            Dimension::Z => [0.0, 0.0, 1.0].into(),
            Dimension::XY => [REC_SQRT2, REC_SQRT2, 0.0].into(),
            Dimension::XZ => [REC_SQRT2, 0.0, REC_SQRT2].into(),
            Dimension::YZ => [0.0, REC_SQRT2, REC_SQRT2].into(),
            Dimension::XYZ => [REC_SQRT3, REC_SQRT3, REC_SQRT3].into(),
        }
    }
}

impl Vector {
    /// Create a new `Vector` with the given components, anchored at the origin.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Vector::from(Vector3::new(x, y, z))
    }

    /// Re-anchor the vector at the given point, keeping its components.
    /// The head is re-derived as `anchor + components`.
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// #
    /// let vector = Vector::new(1.0, 2.0, 3.0).with_anchor(Point::new(0.0, 0.0, 1.0));
    ///
    /// assert_eq!(vector.head(), Point::new(1.0, 2.0, 4.0));
    /// ```
    #[inline]
    pub fn with_anchor(mut self, anchor: Point) -> Self {
        self.p0 = anchor;
        self.p = anchor + self.comps;
        self
    }

    /// Create a `Vector` from its anchor and head points.
    /// The components are derived as `head - anchor`.
    #[inline]
    pub fn from_points(anchor: Point, head: Point) -> Self {
        Vector {
            comps: head - anchor,
            p0: anchor,
            p: head,
        }
    }

    /// Get the components of the vector as a raw `nalgebra` vector.
    #[inline]
    pub fn components(&self) -> Vector3<f64> {
        self.comps
    }

    /// Get the anchor (tail) point of the vector.
    #[inline]
    pub fn anchor(&self) -> Point {
        self.p0
    }

    /// Get the head point of the vector.
    #[inline]
    pub fn head(&self) -> Point {
        self.p
    }

    /// Set the components of the vector. The head is re-derived as
    /// `anchor + components`.
    #[inline]
    pub fn set_components(&mut self, comps: Vector3<f64>) {
        self.comps = comps;
        self.sync_head();
    }

    /// Set the x-component of the vector, re-deriving the head.
    #[inline]
    pub fn set_x(&mut self, x: f64) {
        self.comps.x = x;
        self.p.x = self.p0.x + x;
    }

    /// Set the y-component of the vector, re-deriving the head.
    #[inline]
    pub fn set_y(&mut self, y: f64) {
        self.comps.y = y;
        self.p.y = self.p0.y + y;
    }

    /// Set the z-component of the vector, re-deriving the head.
    #[inline]
    pub fn set_z(&mut self, z: f64) {
        self.comps.z = z;
        self.p.z = self.p0.z + z;
    }

    /// Set the anchor point of the vector. The head stays fixed and the
    /// components are re-derived as `head - anchor`.
    #[inline]
    pub fn set_anchor(&mut self, anchor: Point) {
        self.p0 = anchor;
        self.comps = self.p - self.p0;
    }

    /// Set the head point of the vector. The anchor stays fixed and the
    /// components are re-derived as `head - anchor`.
    #[inline]
    pub fn set_head(&mut self, head: Point) {
        self.p = head;
        self.comps = self.p - self.p0;
    }

    /// Re-derive the head from the anchor and components.
    #[inline]
    fn sync_head(&mut self) {
        self.p = self.p0 + self.comps;
    }

    /// Calculate the Euclidean norm of the vector.
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let vector = Vector::new(1.0, 2.0, 2.0);
    /// assert_approx_eq!(f64, vector.norm(), 3.0);
    /// ```
    #[inline]
    pub fn norm(&self) -> f64 {
        self.comps.norm()
    }

    /// Alias for [`Vector::norm`].
    #[inline]
    pub fn length(&self) -> f64 {
        self.norm()
    }

    /// Calculate the squared Euclidean norm of the vector.
    #[inline]
    pub fn norm_squared(&self) -> f64 {
        self.comps.norm_squared()
    }

    /// Returns `true` if all the components of the vector are exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.comps.x == 0.0 && self.comps.y == 0.0 && self.comps.z == 0.0
    }

    /// Return the unit vector with the same direction and anchor.
    ///
    /// ## Notes
    /// - A null vector has no direction: the operation warns and
    ///   returns the vector unchanged instead of producing NaN.
    #[inline]
    pub fn unit_vector(&self) -> Vector {
        if self.is_zero() {
            warn_degenerate(
                "Vector::unit_vector",
                "Null vector has no direction. Returning the vector unchanged.",
            );
            return *self;
        }

        let mut unit = *self;
        unit.set_components(self.comps / self.norm());
        unit
    }

    /// Normalize the vector in place to a unit vector.
    ///
    /// ## Notes
    /// - A null vector is left unchanged (with a warning).
    #[inline]
    pub fn normalize(&mut self) {
        if self.is_zero() {
            warn_degenerate(
                "Vector::normalize",
                "Null vector has no direction. Leaving the vector unchanged.",
            );
            return;
        }

        let norm = self.norm();
        self.set_components(self.comps / norm);
    }

    /// Calculate the dot product of two vectors.
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let vector1 = Vector::new(4.0, 2.0, -1.0);
    /// let vector2 = Vector::new(1.0, -3.0, 2.0);
    ///
    /// assert_approx_eq!(f64, vector1.dot(&vector2), -4.0);
    /// ```
    #[inline]
    pub fn dot(&self, other: &Vector) -> f64 {
        self.comps.dot(&other.comps)
    }

    /// Calculate the cross product of two vectors.
    /// The result is anchored at the anchor of `self`.
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let vector1 = Vector::new(4.0, 2.0, -1.0);
    /// let vector2 = Vector::new(1.0, -3.0, 2.0);
    ///
    /// let cross = vector1.cross(&vector2);
    ///
    /// assert_approx_eq!(f64, cross.x, 1.0);
    /// assert_approx_eq!(f64, cross.y, -9.0);
    /// assert_approx_eq!(f64, cross.z, -14.0);
    /// ```
    #[inline]
    pub fn cross(&self, other: &Vector) -> Vector {
        Vector::from(self.comps.cross(&other.comps)).with_anchor(self.p0)
    }

    /// Calculate the cross product of two vectors lying in the z = 0 plane.
    ///
    /// Returns the z-component of the three-dimensional cross product,
    /// following the convention that two-dimensional vectors live in
    /// the z = 0 plane.
    #[inline]
    pub fn cross_2d(&self, other: &Vector) -> f64 {
        self.comps.x * other.comps.y - self.comps.y * other.comps.x
    }

    /// Calculate the angle between two vectors. Returns angle in radians.
    ///
    /// ## Returns
    /// Angle in the range `[0, π]`, or `VectorError::ZeroLength` if
    /// either vector has zero length (never NaN).
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// # use float_cmp::assert_approx_eq;
    /// #
    /// let vector1 = Vector::new(2.0, 0.0, 0.0);
    /// let vector2 = Vector::new(0.0, 0.0, 7.0);
    ///
    /// assert_approx_eq!(f64, vector1.angle(&vector2).unwrap(), std::f64::consts::FRAC_PI_2);
    /// ```
    pub fn angle(&self, other: &Vector) -> Result<f64, VectorError> {
        let norms = self.norm() * other.norm();
        if norms == 0.0 {
            return Err(VectorError::ZeroLength("angle"));
        }

        // clamp against floating-point overshoot outside [-1, 1]
        Ok((self.dot(other) / norms).clamp(-1.0, 1.0).acos())
    }

    /// Calculate the vector projection of `self` onto `onto`.
    /// The result is anchored at the anchor of `self`.
    ///
    /// ## Notes
    /// - Projecting onto a null vector is degenerate: warns and returns
    ///   `self` unchanged.
    pub fn projection(&self, onto: &Vector) -> Vector {
        if onto.is_zero() {
            warn_degenerate(
                "Vector::projection",
                "Cannot project onto a null vector. Returning the vector unchanged.",
            );
            return *self;
        }

        let scale = self.dot(onto) / onto.dot(onto);
        Vector::from(onto.comps * scale).with_anchor(self.p0)
    }

    /// Calculate the vector rejection of `self` from `onto`.
    /// The result is anchored at the anchor of `self`.
    ///
    /// ## Notes
    /// - Rejection from a null vector is degenerate: warns and returns
    ///   `self` unchanged.
    pub fn rejection(&self, onto: &Vector) -> Vector {
        if onto.is_zero() {
            warn_degenerate(
                "Vector::rejection",
                "Cannot reject from a null vector. Returning the vector unchanged.",
            );
            return *self;
        }

        let projection = self.projection(onto);
        Vector::from(self.comps - projection.comps).with_anchor(self.p0)
    }

    /// Raise each component of the vector to the given power.
    /// The result keeps the anchor of `self`.
    #[inline]
    pub fn powf(&self, exponent: f64) -> Vector {
        Vector::from(self.comps.map(|c| c.powf(exponent))).with_anchor(self.p0)
    }

    /// Translate the whole vector (both anchor and head) by `t`.
    /// The components are unaffected.
    #[inline]
    pub fn translate(&mut self, t: &Vector) {
        self.p0 += t.comps;
        self.p += t.comps;
    }

    /// Translate only the head of the vector by `t`, keeping the anchor
    /// fixed. The components are re-derived.
    #[inline]
    pub fn translate_head(&mut self, t: &Vector) {
        self.p += t.comps;
        self.comps = self.p - self.p0;
    }

    /// Apply a transformation matrix to both endpoints of the vector,
    /// rotating them about the origin, and re-derive the components.
    #[inline]
    pub fn rotate(&mut self, matrix: &Matrix3<f64>) {
        self.rotate_about(matrix, &Point::origin());
    }

    /// Apply a transformation matrix to both endpoints of the vector,
    /// rotating them about an anchor point, and re-derive the components.
    ///
    /// Since points are plain values, rotating one vector never moves
    /// the anchor of any other vector.
    #[inline]
    pub fn rotate_about(&mut self, matrix: &Matrix3<f64>, anchor: &Point) {
        self.p0 = transforms::rotate_point(&self.p0, matrix, anchor);
        self.p = transforms::rotate_point(&self.p, matrix, anchor);
        self.comps = self.p - self.p0;
    }

    /// Rotate the vector by `angle` radians about `axis` through the origin.
    #[inline]
    pub fn rotate_axis_angle(&mut self, angle: f64, axis: &Vector) -> Result<(), VectorError> {
        let matrix = transforms::rotation_matrix(angle, &axis.comps)?;
        self.rotate(&matrix);
        Ok(())
    }

    /// Rotate the vector by `angle` radians about `axis` through `anchor`.
    #[inline]
    pub fn rotate_axis_angle_about(
        &mut self,
        angle: f64,
        axis: &Vector,
        anchor: &Point,
    ) -> Result<(), VectorError> {
        let matrix = transforms::rotation_matrix(angle, &axis.comps)?;
        self.rotate_about(&matrix, anchor);
        Ok(())
    }

    /// Rotate the vector by the rotation taking the direction of `from`
    /// onto the direction of `to`.
    #[inline]
    pub fn rotate_aligning(&mut self, from: &Vector, to: &Vector) -> Result<(), VectorError> {
        let matrix = transforms::alignment_matrix(&from.comps, &to.comps)?;
        self.rotate(&matrix);
        Ok(())
    }

    /// Snap components with absolute value at most `epsilon` to exactly
    /// zero and re-derive the head.
    pub fn rezero(&mut self, epsilon: f64) {
        for i in 0..3 {
            if self.comps[i].abs() <= epsilon {
                self.comps[i] = 0.0;
            }
        }
        self.sync_head();
    }

    /// [`Vector::rezero`] with the default epsilon of 1e-10.
    #[inline]
    pub fn rezero_default(&mut self) {
        self.rezero(REZERO_EPSILON);
    }

    /// Apply `Dimension` as a filter for the vector components.
    ///
    /// All components which do not match the `Dimension` are set to 0
    /// and the head is re-derived.
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// #
    /// let mut vector = Vector::new(1.0, 2.0, 3.0);
    /// vector.filter(Dimension::XZ);
    ///
    /// assert_eq!(vector.components(), nalgebra::Vector3::new(1.0, 0.0, 3.0));
    /// ```
    pub fn filter(&mut self, dim: Dimension) {
        let mask = dim.mask();
        for i in 0..3 {
            if !mask[i] {
                self.comps[i] = 0.0;
            }
        }
        self.sync_head();
    }
}

/// Calculate the cross product of two vectors, anchoring the result at
/// the provided point instead of the anchor of `u`.
#[inline]
pub fn cross_with_anchor(u: &Vector, v: &Vector, anchor: Point) -> Vector {
    Vector::from(u.comps.cross(&v.comps)).with_anchor(anchor)
}

/// Calculate the scalar triple product `u · (v × w)`.
#[inline]
pub fn scalar_triple_product(u: &Vector, v: &Vector, w: &Vector) -> f64 {
    u.comps.dot(&v.comps.cross(&w.comps))
}

/// Calculate the vector triple product `u × (v × w)`.
/// The result is anchored at the anchor of `u`.
#[inline]
pub fn vector_triple_product(u: &Vector, v: &Vector, w: &Vector) -> Vector {
    u.cross(&v.cross(w))
}

impl Add for Vector {
    type Output = Vector;

    /// Componentwise sum, anchored at the anchor of the left operand.
    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector::from(self.comps + rhs.comps).with_anchor(self.p0)
    }
}

impl Sub for Vector {
    type Output = Vector;

    /// Componentwise difference, anchored at the anchor of the left operand.
    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Vector::from(self.comps - rhs.comps).with_anchor(self.p0)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    /// Componentwise scaling, anchored at the anchor of the left operand.
    #[inline]
    fn mul(self, rhs: f64) -> Vector {
        Vector::from(self.comps * rhs).with_anchor(self.p0)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    #[inline]
    fn mul(self, rhs: Vector) -> Vector {
        rhs * self
    }
}

impl Mul for Vector {
    type Output = f64;

    /// Multiplying two vectors computes their geometric **dot product**,
    /// not an elementwise product.
    #[inline]
    fn mul(self, rhs: Vector) -> f64 {
        self.dot(&rhs)
    }
}

impl Div<f64> for Vector {
    type Output = Vector;

    /// Componentwise division, anchored at the anchor of the left operand.
    ///
    /// ## Notes
    /// - Division by zero is degenerate: warns and returns the left
    ///   operand unchanged.
    #[inline]
    fn div(self, rhs: f64) -> Vector {
        if rhs == 0.0 {
            warn_degenerate(
                "Vector::div",
                "Division of a vector by zero. Returning the vector unchanged.",
            );
            return self;
        }

        Vector::from(self.comps / rhs).with_anchor(self.p0)
    }
}

impl Neg for Vector {
    type Output = Vector;

    /// Reverse the direction of the vector, keeping its anchor.
    #[inline]
    fn neg(self) -> Vector {
        Vector::from(-self.comps).with_anchor(self.p0)
    }
}

impl AddAssign for Vector {
    #[inline]
    fn add_assign(&mut self, rhs: Vector) {
        self.comps += rhs.comps;
        self.sync_head();
    }
}

impl SubAssign for Vector {
    #[inline]
    fn sub_assign(&mut self, rhs: Vector) {
        self.comps -= rhs.comps;
        self.sync_head();
    }
}

impl MulAssign<f64> for Vector {
    #[inline]
    fn mul_assign(&mut self, rhs: f64) {
        self.comps *= rhs;
        self.sync_head();
    }
}

impl DivAssign<f64> for Vector {
    /// ## Notes
    /// - Division by zero is degenerate: warns and leaves the vector unchanged.
    #[inline]
    fn div_assign(&mut self, rhs: f64) {
        if rhs == 0.0 {
            warn_degenerate(
                "Vector::div_assign",
                "Division of a vector by zero. Leaving the vector unchanged.",
            );
            return;
        }

        self.comps /= rhs;
        self.sync_head();
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

    impl Serialize for Vector {
        /// Serialized as a sequence of two points: components, then anchor.
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(2))?;
            seq.serialize_element(&Point(self.comps))?;
            seq.serialize_element(&self.p0)?;
            seq.end()
        }
    }

    impl<'de> Deserialize<'de> for Vector {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            struct VectorVisitor;

            impl<'de> Visitor<'de> for VectorVisitor {
                type Value = Vector;

                fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                    formatter.write_str("a sequence of two points (components, anchor)")
                }

                fn visit_seq<S>(self, mut seq: S) -> Result<Vector, S::Error>
                where
                    S: SeqAccess<'de>,
                {
                    let comps: Point = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                    let anchor: Point = seq
                        .next_element()?
                        .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                    Ok(Vector::from(comps.0).with_anchor(anchor))
                }
            }

            deserializer.deserialize_seq(VectorVisitor)
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
    use rand::{rngs::StdRng, Rng, SeedableRng};

    /// Check that `components == head - anchor` within floating tolerance.
    fn assert_invariant(vector: &Vector) {
        let derived = vector.head() - vector.anchor();
        assert_approx_eq!(f64, derived.x, vector.x, epsilon = 1e-10);
        assert_approx_eq!(f64, derived.y, vector.y, epsilon = 1e-10);
        assert_approx_eq!(f64, derived.z, vector.z, epsilon = 1e-10);
    }

    #[test]
    fn new_anchored_at_origin() {
        let vector = Vector::new(1.0, 2.0, 3.0);

        assert_eq!(vector.anchor(), Point::origin());
        assert_eq!(vector.head(), Point::new(1.0, 2.0, 3.0));
        assert_invariant(&vector);
    }

    #[test]
    fn with_anchor_rederives_head() {
        let vector = Vector::new(1.0, 2.0, 3.0).with_anchor(Point::new(-1.0, 0.5, 2.0));

        assert_eq!(vector.components(), Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(vector.head(), Point::new(0.0, 2.5, 5.0));
        assert_invariant(&vector);
    }

    #[test]
    fn from_points_derives_components() {
        let vector = Vector::from_points(Point::new(1.0, 1.0, 1.0), Point::new(4.0, 3.0, 2.0));

        assert_eq!(vector.components(), Vector3::new(3.0, 2.0, 1.0));
        assert_invariant(&vector);
    }

    #[test]
    fn set_components_rederives_head() {
        let mut vector = Vector::new(1.0, 2.0, 3.0).with_anchor(Point::new(1.0, 1.0, 1.0));
        vector.set_components(Vector3::new(0.5, -0.5, 0.0));

        assert_eq!(vector.head(), Point::new(1.5, 0.5, 1.0));
        assert_invariant(&vector);
    }

    #[test]
    fn set_coordinates_rederive_head() {
        let mut vector = Vector::new(1.0, 2.0, 3.0).with_anchor(Point::new(1.0, 1.0, 1.0));

        vector.set_x(4.0);
        assert_invariant(&vector);
        vector.set_y(-2.0);
        assert_invariant(&vector);
        vector.set_z(0.0);
        assert_invariant(&vector);

        assert_eq!(vector.head(), Point::new(5.0, -1.0, 1.0));
    }

    #[test]
    fn set_head_rederives_components() {
        let mut vector = Vector::new(1.0, 2.0, 3.0).with_anchor(Point::new(1.0, 1.0, 1.0));
        vector.set_head(Point::new(0.0, 0.0, 0.0));

        assert_eq!(vector.components(), Vector3::new(-1.0, -1.0, -1.0));
        assert_invariant(&vector);
    }

    #[test]
    fn set_anchor_rederives_components() {
        let mut vector = Vector::new(1.0, 2.0, 3.0);
        vector.set_anchor(Point::new(0.5, 0.5, 0.5));

        // head stays fixed, components shrink
        assert_eq!(vector.head(), Point::new(1.0, 2.0, 3.0));
        assert_eq!(vector.components(), Vector3::new(0.5, 1.5, 2.5));
        assert_invariant(&vector);
    }

    #[test]
    fn invariant_survives_mutation_sequence() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut vector = Vector::new(1.0, 0.0, 0.0).with_anchor(Point::new(0.3, -0.2, 1.1));

        for _ in 0..50 {
            match rng.gen_range(0..7) {
                0 => vector.translate(&Vector::new(
                    rng.gen_range(-2.0..2.0),
                    rng.gen_range(-2.0..2.0),
                    rng.gen_range(-2.0..2.0),
                )),
                1 => vector
                    .rotate_axis_angle(
                        rng.gen_range(-3.0..3.0),
                        &Vector::new(
                            rng.gen_range(-1.0..1.0),
                            rng.gen_range(-1.0..1.0),
                            rng.gen_range(0.1..1.0),
                        ),
                    )
                    .unwrap(),
                2 => vector.set_x(rng.gen_range(-5.0..5.0)),
                3 => vector.set_head(Point::new(
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                )),
                4 => vector.set_anchor(Point::new(
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                    rng.gen_range(-5.0..5.0),
                )),
                5 => vector += Vector::new(0.1, 0.2, 0.3),
                _ => vector *= rng.gen_range(0.5..1.5),
            }

            assert_invariant(&vector);
        }
    }

    #[test]
    fn norm() {
        let vector = Vector::new(4.3, 5.6, 1.2);
        assert_approx_eq!(f64, vector.norm(), 7.16170371, epsilon = 1e-7);
        assert_approx_eq!(f64, vector.length(), vector.norm());
    }

    #[test]
    fn norm_null() {
        assert_approx_eq!(f64, Vector::default().norm(), 0.0);
    }

    #[test]
    fn unit_vector() {
        let vector = Vector::new(3.0, 0.0, 4.0).with_anchor(Point::new(1.0, 1.0, 1.0));
        let unit = vector.unit_vector();

        assert_approx_eq!(f64, unit.x, 0.6);
        assert_approx_eq!(f64, unit.y, 0.0);
        assert_approx_eq!(f64, unit.z, 0.8);
        assert_approx_eq!(f64, unit.norm(), 1.0);
        assert_eq!(unit.anchor(), Point::new(1.0, 1.0, 1.0));
        assert_invariant(&unit);
    }

    #[test]
    fn unit_vector_null_is_graceful() {
        let vector = Vector::default();
        let unit = vector.unit_vector();

        // no crash, no NaN: the vector is returned unchanged
        assert_eq!(unit, vector);
    }

    #[test]
    fn normalize_null_is_graceful() {
        let mut vector = Vector::default().with_anchor(Point::new(2.0, 0.0, 0.0));
        let before = vector;
        vector.normalize();

        assert_eq!(vector, before);
    }

    #[test]
    fn dot() {
        let vector1 = Vector::new(-2.5, 0.3, 5.1);
        let vector2 = Vector::new(-3.9, 1.1, -4.2);

        assert_approx_eq!(f64, vector1.dot(&vector2), -11.34);
    }

    #[test]
    fn multiplication_is_dot_product() {
        let vector1 = Vector::new(2.0, 3.0, 4.0);
        let vector2 = Vector::new(1.0, 2.0, 3.0);

        assert_approx_eq!(f64, vector1 * vector2, 20.0);
    }

    #[test]
    fn cross() {
        let vector1 = Vector::new(-2.0, 0.0, 5.0).with_anchor(Point::new(1.0, 2.0, 3.0));
        let vector2 = Vector::new(3.0, 1.0, -4.0);

        let cross = vector1.cross(&vector2);

        assert_approx_eq!(f64, cross.x, -5.0);
        assert_approx_eq!(f64, cross.y, 7.0);
        assert_approx_eq!(f64, cross.z, -2.0);
        assert_eq!(cross.anchor(), Point::new(1.0, 2.0, 3.0));
        assert_invariant(&cross);
    }

    #[test]
    fn cross_anchor_override() {
        let vector1 = Vector::new(1.0, 0.0, 0.0).with_anchor(Point::new(1.0, 2.0, 3.0));
        let vector2 = Vector::new(0.0, 1.0, 0.0);

        let cross = cross_with_anchor(&vector1, &vector2, Point::new(9.0, 9.0, 9.0));

        assert_approx_eq!(f64, cross.z, 1.0);
        assert_eq!(cross.anchor(), Point::new(9.0, 9.0, 9.0));
    }

    #[test]
    fn cross_2d() {
        let vector1 = Vector::new(2.0, 1.0, 0.0);
        let vector2 = Vector::new(-1.0, 3.0, 0.0);

        assert_approx_eq!(f64, vector1.cross_2d(&vector2), 7.0);
        assert_approx_eq!(f64, vector2.cross_2d(&vector1), -7.0);
    }

    #[test]
    fn angle_perpendicular() {
        let vector1 = Vector::new(2.0, 0.0, 0.0);
        let vector2 = Vector::new(0.0, -2.0, 0.0);

        assert_approx_eq!(
            f64,
            vector1.angle(&vector2).unwrap(),
            std::f64::consts::FRAC_PI_2
        );
    }

    #[test]
    fn angle_antiparallel() {
        let vector1 = Vector::new(1.0, 0.0, 0.0);
        let vector2 = Vector::new(-4.0, 0.0, 0.0);

        assert_approx_eq!(f64, vector1.angle(&vector2).unwrap(), std::f64::consts::PI);
    }

    #[test]
    fn angle_domain() {
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..100 {
            let u = Vector::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );
            let v = Vector::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            );

            if u.is_zero() || v.is_zero() {
                continue;
            }

            let angle = u.angle(&v).unwrap();
            assert!((0.0..=std::f64::consts::PI).contains(&angle));
        }
    }

    #[test]
    fn angle_zero_length_fails() {
        let null = Vector::default();
        let vector = Vector::new(1.0, 2.0, 3.0);

        assert_eq!(vector.angle(&null), Err(VectorError::ZeroLength("angle")));
        assert_eq!(null.angle(&vector), Err(VectorError::ZeroLength("angle")));
    }

    #[test]
    fn projection_and_rejection() {
        let u = Vector::new(3.0, 4.0, 0.0).with_anchor(Point::new(1.0, 0.0, 0.0));
        let v = Vector::new(2.0, 0.0, 0.0);

        let projection = u.projection(&v);
        assert_approx_eq!(f64, projection.x, 3.0);
        assert_approx_eq!(f64, projection.y, 0.0);
        assert_eq!(projection.anchor(), Point::new(1.0, 0.0, 0.0));

        let rejection = u.rejection(&v);
        assert_approx_eq!(f64, rejection.x, 0.0);
        assert_approx_eq!(f64, rejection.y, 4.0);

        // projection + rejection reconstructs the vector
        let sum = projection + rejection;
        assert_approx_eq!(f64, sum.x, u.x);
        assert_approx_eq!(f64, sum.y, u.y);
        assert_approx_eq!(f64, sum.z, u.z);
    }

    #[test]
    fn projection_onto_null_is_graceful() {
        let u = Vector::new(3.0, 4.0, 0.0);
        assert_eq!(u.projection(&Vector::default()), u);
        assert_eq!(u.rejection(&Vector::default()), u);
    }

    #[test]
    fn triple_products() {
        let u = Vector::new(1.0, 0.0, 0.0);
        let v = Vector::new(0.0, 1.0, 0.0);
        let w = Vector::new(0.0, 0.0, 1.0);

        assert_approx_eq!(f64, scalar_triple_product(&u, &v, &w), 1.0);

        // u × (v × w) = v (u·w) − w (u·v) = 0 for orthonormal u, v, w
        let triple = vector_triple_product(&u, &v, &w);
        assert!(triple.is_zero());
    }

    #[test]
    fn addition_keeps_left_anchor() {
        let u = Vector::new(1.0, 2.0, 3.0).with_anchor(Point::new(1.0, 1.0, 1.0));
        let v = Vector::new(0.5, 0.5, 0.5).with_anchor(Point::new(9.0, 9.0, 9.0));

        let sum = u + v;
        assert_eq!(sum.components(), Vector3::new(1.5, 2.5, 3.5));
        assert_eq!(sum.anchor(), Point::new(1.0, 1.0, 1.0));
        assert_invariant(&sum);

        let difference = u - v;
        assert_eq!(difference.components(), Vector3::new(0.5, 1.5, 2.5));
        assert_eq!(difference.anchor(), Point::new(1.0, 1.0, 1.0));
        assert_invariant(&difference);
    }

    #[test]
    fn scalar_arithmetic() {
        let u = Vector::new(1.0, -2.0, 4.0).with_anchor(Point::new(1.0, 1.0, 1.0));

        let doubled = u * 2.0;
        assert_eq!(doubled.components(), Vector3::new(2.0, -4.0, 8.0));
        assert_eq!(doubled.anchor(), u.anchor());

        let also_doubled = 2.0 * u;
        assert_eq!(also_doubled, doubled);

        let halved = u / 2.0;
        assert_eq!(halved.components(), Vector3::new(0.5, -1.0, 2.0));

        let negated = -u;
        assert_eq!(negated.components(), Vector3::new(-1.0, 2.0, -4.0));
        assert_eq!(negated.anchor(), u.anchor());

        let squared = u.powf(2.0);
        assert_eq!(squared.components(), Vector3::new(1.0, 4.0, 16.0));
    }

    #[test]
    fn division_by_zero_is_graceful() {
        let u = Vector::new(1.0, 2.0, 3.0);
        assert_eq!(u / 0.0, u);

        let mut v = u;
        v /= 0.0;
        assert_eq!(v, u);
    }

    #[test]
    fn compound_assignment_rederives_head() {
        let mut u = Vector::new(1.0, 2.0, 3.0).with_anchor(Point::new(1.0, 0.0, 0.0));

        u += Vector::new(1.0, 1.0, 1.0);
        assert_eq!(u.head(), Point::new(3.0, 3.0, 4.0));
        assert_invariant(&u);

        u -= Vector::new(0.5, 0.5, 0.5);
        assert_invariant(&u);

        u *= 2.0;
        assert_eq!(u.components(), Vector3::new(3.0, 5.0, 7.0));
        assert_invariant(&u);

        u /= 2.0;
        assert_invariant(&u);
    }

    #[test]
    fn translate_moves_both_endpoints() {
        let mut u = Vector::new(1.0, 2.0, 3.0).with_anchor(Point::new(1.0, 1.0, 1.0));
        u.translate(&Vector::new(0.5, -0.5, 1.0));

        assert_eq!(u.anchor(), Point::new(1.5, 0.5, 2.0));
        assert_eq!(u.head(), Point::new(2.5, 2.5, 5.0));
        // components unchanged
        assert_eq!(u.components(), Vector3::new(1.0, 2.0, 3.0));
        assert_invariant(&u);
    }

    #[test]
    fn translate_head_changes_components() {
        let mut u = Vector::new(1.0, 2.0, 3.0).with_anchor(Point::new(1.0, 1.0, 1.0));
        u.translate_head(&Vector::new(0.5, -0.5, 1.0));

        assert_eq!(u.anchor(), Point::new(1.0, 1.0, 1.0));
        assert_eq!(u.components(), Vector3::new(1.5, 1.5, 4.0));
        assert_invariant(&u);
    }

    #[test]
    fn rotation_preserves_norm() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..25 {
            let mut u = Vector::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            )
            .with_anchor(Point::new(
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
                rng.gen_range(-5.0..5.0),
            ));
            let norm = u.norm();

            u.rotate_axis_angle_about(
                rng.gen_range(-3.0..3.0),
                &Vector::new(0.2, -0.7, 0.4),
                &Point::new(1.0, 2.0, 3.0),
            )
            .unwrap();

            assert_approx_eq!(f64, u.norm(), norm, epsilon = 1e-10);
            assert_invariant(&u);
        }
    }

    #[test]
    fn rotate_aligning() {
        let mut u = Vector::new(2.0, 0.0, 0.0);
        u.rotate_aligning(&Vector::new(1.0, 0.0, 0.0), &Vector::new(0.0, 3.0, 0.0))
            .unwrap();

        assert_approx_eq!(f64, u.x, 0.0, epsilon = 1e-10);
        assert_approx_eq!(f64, u.y, 2.0, epsilon = 1e-10);
        assert_invariant(&u);
    }

    #[test]
    fn rotate_zero_axis_fails() {
        let mut u = Vector::new(1.0, 0.0, 0.0);
        assert_eq!(
            u.rotate_axis_angle(1.0, &Vector::default()),
            Err(VectorError::ZeroLength("rotation axis"))
        );
        // the vector is untouched by the failed rotation
        assert_eq!(u, Vector::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn rezero_snaps_components() {
        let mut u =
            Vector::new(1.0e-14, -5.0e-11, 0.25).with_anchor(Point::new(1.0, 1.0, 1.0));
        u.rezero_default();

        assert_eq!(u.components(), Vector3::new(0.0, 0.0, 0.25));
        assert_eq!(u.head(), Point::new(1.0, 1.0, 1.25));
        assert_invariant(&u);
    }

    #[test]
    fn filter_components() {
        let mut u = Vector::new(4.3, 1.8, 2.7);
        u.filter(Dimension::XZ);
        assert_eq!(u.components(), Vector3::new(4.3, 0.0, 2.7));

        let mut u = Vector::new(4.3, 1.8, 2.7);
        u.filter(Dimension::None);
        assert!(u.is_zero());
    }

    #[test]
    fn dim_to_vector() {
        let vector = Vector::from(Dimension::XY);
        assert_approx_eq!(f64, vector.norm(), 1.0);
        assert_approx_eq!(f64, vector.x, REC_SQRT2);
        assert_approx_eq!(f64, vector.z, 0.0);

        let vector = Vector::from(Dimension::XYZ);
        assert_approx_eq!(f64, vector.norm(), 1.0, epsilon = 1e-12);

        assert!(Vector::from(Dimension::None).is_zero());
    }
}

#[cfg(test)]
#[cfg(feature = "serde")]
mod serde_tests {
    use super::*;
    use float_cmp::assert_approx_eq;

    #[test]
    fn vector_to_yaml() {
        let vector = Vector::new(4.376, 2.13, 4.0).with_anchor(Point::new(1.0, 0.0, 0.0));

        let string = serde_yaml::to_string(&vector).unwrap();

        assert_eq!(string, "- - 4.376\n  - 2.13\n  - 4.0\n- - 1.0\n  - 0.0\n  - 0.0\n");
    }

    #[test]
    fn vector_from_yaml() {
        let string = "[[4.376, 2.13, 4.0], [1.0, 0.0, 0.0]]\n";
        let vector: Vector = serde_yaml::from_str(string).unwrap();

        assert_approx_eq!(f64, vector.x, 4.376);
        assert_approx_eq!(f64, vector.y, 2.13);
        assert_approx_eq!(f64, vector.z, 4.0);
        assert_eq!(vector.anchor(), Point::new(1.0, 0.0, 0.0));
        assert_eq!(vector.head(), Point::new(5.376, 2.13, 4.0));
    }
}
