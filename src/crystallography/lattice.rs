// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Implementation of the Lattice structure and the lattice metric engine.

use float_cmp::approx_eq;
use getset::CopyGetters;
use nalgebra::base::{Matrix3, Vector3};

use crate::errors::LatticeError;
use crate::math::point::Point;
use crate::math::vector::Vector;
use crate::structures::dimension::Dimension;
use crate::utility::round_to;

/// Decimal precision of trigonometric ratios derived from the lattice angles.
const TRIG_DECIMALS: i32 = 6;
/// Decimal precision of the ortho matrix entries.
const MATRIX_DECIMALS: i32 = 10;
/// Epsilon for approximate structural equality of lattices.
const EQ_EPSILON: f64 = 1.0e-6;

/// Crystal lattice defined by six scalar parameters: the lengths of the
/// lattice vectors `a`, `b`, `c` and the inter-axial angles `alpha`,
/// `beta`, `gamma` (in degrees).
///
/// The `orientation_matrix` captures any global rotation applied after
/// construction and the `offset` translates the whole lattice origin;
/// both compose into every Cartesian conversion.
///
/// Construction validates the parameter domain eagerly: lengths must be
/// positive and finite, angles must lie inside (0°, 180°), and the
/// parameter combination must describe a cell of positive volume.
///
/// Derived trigonometric ratios are rounded to 6 decimals and the ortho
/// matrix to 10 decimals to suppress floating-point noise before
/// equality comparisons.
#[derive(Debug, Clone, CopyGetters)]
pub struct Lattice {
    /// Length of the first lattice vector.
    #[getset(get_copy = "pub")]
    a: f64,
    /// Length of the second lattice vector.
    #[getset(get_copy = "pub")]
    b: f64,
    /// Length of the third lattice vector.
    #[getset(get_copy = "pub")]
    c: f64,
    /// Angle between lattice vectors **b** and **c** in degrees.
    #[getset(get_copy = "pub")]
    alpha: f64,
    /// Angle between lattice vectors **c** and **a** in degrees.
    #[getset(get_copy = "pub")]
    beta: f64,
    /// Angle between lattice vectors **a** and **b** in degrees.
    #[getset(get_copy = "pub")]
    gamma: f64,
    /// Global rotation applied to the lattice after construction.
    #[getset(get_copy = "pub")]
    orientation_matrix: Matrix3<f64>,
    /// Translation of the lattice origin.
    #[getset(get_copy = "pub")]
    offset: Vector3<f64>,
}

impl Lattice {
    /// Create a new `Lattice` from the six lattice parameters.
    /// Angles are given in degrees and stored rounded to 6 decimals.
    ///
    /// ## Returns
    /// `Lattice` if the parameters are valid. `LatticeError` if a length
    /// is not positive and finite, an angle lies outside (0°, 180°), or
    /// the combination describes a cell of non-positive volume.
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// #
    /// let lattice = Lattice::new(2.46, 2.46, 10.0, 90.0, 90.0, 120.0).unwrap();
    /// assert!(Lattice::new(-1.0, 2.46, 10.0, 90.0, 90.0, 120.0).is_err());
    /// ```
    pub fn new(
        a: f64,
        b: f64,
        c: f64,
        alpha: f64,
        beta: f64,
        gamma: f64,
    ) -> Result<Self, LatticeError> {
        validate_length("a", a)?;
        validate_length("b", b)?;
        validate_length("c", c)?;
        validate_angle("alpha", alpha)?;
        validate_angle("beta", beta)?;
        validate_angle("gamma", gamma)?;

        let lattice = Lattice {
            a,
            b,
            c,
            alpha: round_to(alpha, TRIG_DECIMALS),
            beta: round_to(beta, TRIG_DECIMALS),
            gamma: round_to(gamma, TRIG_DECIMALS),
            orientation_matrix: Matrix3::identity(),
            offset: Vector3::zeros(),
        };

        let discriminant = lattice.volume_discriminant();
        if discriminant <= 0.0 {
            return Err(LatticeError::DegenerateCell(discriminant));
        }

        Ok(lattice)
    }

    /// Create an orthorhombic lattice (all angles 90°).
    #[inline]
    pub fn orthorhombic(a: f64, b: f64, c: f64) -> Result<Self, LatticeError> {
        Lattice::new(a, b, c, 90.0, 90.0, 90.0)
    }

    /// Create a cubic lattice.
    #[inline]
    pub fn cubic(a: f64) -> Result<Self, LatticeError> {
        Lattice::orthorhombic(a, a, a)
    }

    /// Create a hexagonal lattice (`a = b`, `γ = 120°`).
    #[inline]
    pub fn hexagonal(a: f64, c: f64) -> Result<Self, LatticeError> {
        Lattice::new(a, a, c, 90.0, 90.0, 120.0)
    }

    /// Create a `Lattice` from its three lattice vectors.
    ///
    /// Lengths and angles are derived from the vectors; any rotation of
    /// the vectors away from the canonical (upper-triangular) frame is
    /// captured in the orientation matrix.
    pub fn from_vectors(a1: &Vector, a2: &Vector, a3: &Vector) -> Result<Self, LatticeError> {
        let matrix = Matrix3::from_rows(&[
            a1.components().transpose(),
            a2.components().transpose(),
            a3.components().transpose(),
        ]);

        Lattice::from_matrix(matrix)
    }

    /// Create a `Lattice` from a cell matrix whose **rows** are the
    /// lattice vectors.
    pub fn from_matrix(matrix: Matrix3<f64>) -> Result<Self, LatticeError> {
        let v1 = matrix.row(0).transpose();
        let v2 = matrix.row(1).transpose();
        let v3 = matrix.row(2).transpose();

        let a = v1.norm();
        let b = v2.norm();
        let c = v3.norm();

        validate_length("a", a)?;
        validate_length("b", b)?;
        validate_length("c", c)?;

        let alpha = vector_angle_degrees(&v2, &v3);
        let beta = vector_angle_degrees(&v3, &v1);
        let gamma = vector_angle_degrees(&v1, &v2);

        let base = Lattice::new(a, b, c, alpha, beta, gamma)?;

        // the orientation takes the canonical frame onto the provided vectors
        let orientation = matrix.transpose() * base.fractional_matrix();

        Ok(Lattice {
            orientation_matrix: orientation,
            ..base
        })
    }

    /// Cosine of `alpha`, rounded to 6 decimals.
    #[inline]
    pub fn cos_alpha(&self) -> f64 {
        round_to(self.alpha.to_radians().cos(), TRIG_DECIMALS)
    }

    /// Cosine of `beta`, rounded to 6 decimals.
    #[inline]
    pub fn cos_beta(&self) -> f64 {
        round_to(self.beta.to_radians().cos(), TRIG_DECIMALS)
    }

    /// Cosine of `gamma`, rounded to 6 decimals.
    #[inline]
    pub fn cos_gamma(&self) -> f64 {
        round_to(self.gamma.to_radians().cos(), TRIG_DECIMALS)
    }

    /// Sine of `alpha`, rounded to 6 decimals.
    #[inline]
    pub fn sin_alpha(&self) -> f64 {
        round_to(self.alpha.to_radians().sin(), TRIG_DECIMALS)
    }

    /// Sine of `beta`, rounded to 6 decimals.
    #[inline]
    pub fn sin_beta(&self) -> f64 {
        round_to(self.beta.to_radians().sin(), TRIG_DECIMALS)
    }

    /// Sine of `gamma`, rounded to 6 decimals.
    #[inline]
    pub fn sin_gamma(&self) -> f64 {
        round_to(self.gamma.to_radians().sin(), TRIG_DECIMALS)
    }

    /// Cosine of the reciprocal angle `alpha*`, rounded to 6 decimals.
    #[inline]
    pub fn cos_alpha_star(&self) -> f64 {
        round_to(
            (self.cos_beta() * self.cos_gamma() - self.cos_alpha())
                / (self.sin_beta() * self.sin_gamma()),
            TRIG_DECIMALS,
        )
    }

    /// Cosine of the reciprocal angle `beta*`, rounded to 6 decimals.
    #[inline]
    pub fn cos_beta_star(&self) -> f64 {
        round_to(
            (self.cos_gamma() * self.cos_alpha() - self.cos_beta())
                / (self.sin_gamma() * self.sin_alpha()),
            TRIG_DECIMALS,
        )
    }

    /// Cosine of the reciprocal angle `gamma*`, rounded to 6 decimals.
    #[inline]
    pub fn cos_gamma_star(&self) -> f64 {
        round_to(
            (self.cos_alpha() * self.cos_beta() - self.cos_gamma())
                / (self.sin_alpha() * self.sin_beta()),
            TRIG_DECIMALS,
        )
    }

    /// Sine of the reciprocal angle `alpha*`.
    #[inline]
    pub fn sin_alpha_star(&self) -> f64 {
        (1.0 - self.cos_alpha_star().powi(2)).sqrt()
    }

    /// Sine of the reciprocal angle `beta*`.
    #[inline]
    pub fn sin_beta_star(&self) -> f64 {
        (1.0 - self.cos_beta_star().powi(2)).sqrt()
    }

    /// Sine of the reciprocal angle `gamma*`.
    #[inline]
    pub fn sin_gamma_star(&self) -> f64 {
        (1.0 - self.cos_gamma_star().powi(2)).sqrt()
    }

    /// The upper-triangular matrix mapping fractional coordinates to an
    /// orthonormal Cartesian frame, built from the lattice parameters
    /// via the standard triclinic formula. Entries are rounded to 10
    /// decimals.
    pub fn ortho_matrix(&self) -> Matrix3<f64> {
        let m11 = self.a;
        let m12 = self.b * self.cos_gamma();
        let m13 = self.c * self.cos_beta();

        let m22 = self.b * self.sin_gamma();
        let m23 = self.c * (self.cos_alpha() - self.cos_beta() * self.cos_gamma())
            / self.sin_gamma();

        let m33 =
            self.c * self.sin_alpha() * self.sin_beta() * self.sin_gamma_star() / self.sin_gamma();

        Matrix3::new(m11, m12, m13, 0.0, m22, m23, 0.0, 0.0, m33)
            .map(|entry| round_to(entry, MATRIX_DECIMALS))
    }

    /// The inverse of the ortho matrix, mapping Cartesian coordinates in
    /// the canonical frame back to fractional coordinates.
    ///
    /// ## Panics
    /// Panics if the ortho matrix is not invertible. This cannot happen
    /// for a successfully constructed lattice.
    pub fn fractional_matrix(&self) -> Matrix3<f64> {
        self.ortho_matrix().try_inverse().expect(
            "FATAL NANOXTAL ERROR | Lattice::fractional_matrix | Ortho matrix is not invertible.",
        )
    }

    /// The cell matrix whose rows are the lattice vectors in the world
    /// frame (orientation applied).
    pub fn matrix(&self) -> Matrix3<f64> {
        (self.orientation_matrix * self.ortho_matrix()).transpose()
    }

    /// Discriminant of the cell volume formula.
    fn volume_discriminant(&self) -> f64 {
        let (ca, cb, cg) = (self.cos_alpha(), self.cos_beta(), self.cos_gamma());
        1.0 - ca * ca - cb * cb - cg * cg + 2.0 * ca * cb * cg
    }

    /// Volume of the unit cell.
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// #
    /// let lattice = Lattice::orthorhombic(2.46, 4.26, 10.0).unwrap();
    /// assert_eq!(lattice.cell_volume(), 2.46 * 4.26 * 10.0);
    /// ```
    pub fn cell_volume(&self) -> f64 {
        self.a * self.b * self.c * self.volume_discriminant().sqrt()
    }

    /// First direct lattice vector (first column of the ortho matrix),
    /// anchored at the origin.
    pub fn a1(&self) -> Vector {
        Vector::from(self.ortho_matrix().column(0).into_owned())
    }

    /// Second direct lattice vector (second column of the ortho matrix),
    /// anchored at the origin.
    pub fn a2(&self) -> Vector {
        Vector::from(self.ortho_matrix().column(1).into_owned())
    }

    /// Third direct lattice vector (third column of the ortho matrix),
    /// anchored at the origin.
    pub fn a3(&self) -> Vector {
        Vector::from(self.ortho_matrix().column(2).into_owned())
    }

    /// First reciprocal lattice vector, `a2 × a3 / V`.
    pub fn b1(&self) -> Vector {
        self.a2().cross(&self.a3()) / self.cell_volume()
    }

    /// Second reciprocal lattice vector, `a3 × a1 / V`.
    pub fn b2(&self) -> Vector {
        self.a3().cross(&self.a1()) / self.cell_volume()
    }

    /// Third reciprocal lattice vector, `a1 × a2 / V`.
    pub fn b3(&self) -> Vector {
        self.a1().cross(&self.a2()) / self.cell_volume()
    }

    /// Convert a fractional coordinate to a Cartesian coordinate:
    /// `orientation · ortho · v + offset`.
    pub fn fractional_to_cartesian(&self, fractional: &Point) -> Point {
        Point(self.orientation_matrix * self.ortho_matrix() * fractional.0 + self.offset)
    }

    /// Convert a Cartesian coordinate to a fractional coordinate.
    /// Exact algebraic inverse of [`Lattice::fractional_to_cartesian`],
    /// including the orientation matrix and the offset.
    pub fn cartesian_to_fractional(&self, cartesian: &Point) -> Point {
        Point(self.fractional_matrix() * self.inverse_orientation() * (cartesian.0 - self.offset))
    }

    /// Convert a displacement from fractional to Cartesian axes.
    /// Unlike the point conversion, no offset is applied.
    pub fn fractional_to_cartesian_displacement(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.orientation_matrix * self.ortho_matrix() * v
    }

    /// Convert a displacement from Cartesian to fractional axes.
    /// Unlike the point conversion, no offset is applied.
    pub fn cartesian_to_fractional_displacement(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.fractional_matrix() * self.inverse_orientation() * v
    }

    /// Inverse of the orientation matrix.
    ///
    /// ## Panics
    /// Panics if the orientation matrix is not invertible. This cannot
    /// happen for a successfully constructed lattice.
    fn inverse_orientation(&self) -> Matrix3<f64> {
        self.orientation_matrix.try_inverse().expect(
            "FATAL NANOXTAL ERROR | Lattice::inverse_orientation | Orientation matrix is not invertible.",
        )
    }

    /// Wrap a fractional coordinate into `[0, 1)` along the selected axes.
    pub fn wrap_fractional(&self, fractional: &Point, axes: Dimension) -> Point {
        let mut wrapped = fractional.0;
        let mask = axes.mask();

        for i in 0..3 {
            if mask[i] {
                wrapped[i] -= wrapped[i].floor();
                // a coordinate infinitesimally below zero wraps to 1.0
                // after rounding; it belongs at the cell origin
                if wrapped[i] == 1.0 {
                    wrapped[i] = 0.0;
                }
            }
        }

        Point(wrapped)
    }

    /// Apply a transformation matrix to the lattice, rotating it about
    /// the origin. The rotation composes with any previously applied
    /// orientation; it never discards it.
    pub fn rotate(&mut self, matrix: &Matrix3<f64>) {
        self.rotate_about(matrix, &Point::origin());
    }

    /// Apply a transformation matrix to the lattice, rotating it about
    /// an anchor point. The offset is rotated about the anchor; rotating
    /// about the lattice offset itself leaves the offset in place.
    pub fn rotate_about(&mut self, matrix: &Matrix3<f64>, anchor: &Point) {
        self.orientation_matrix = matrix * self.orientation_matrix;
        self.offset = anchor.0 + matrix * (self.offset - anchor.0);
    }

    /// Translate the lattice origin by the provided vector.
    pub fn translate(&mut self, t: &Vector) {
        self.offset += t.components();
    }

    /// Get the lattice offset as a point.
    pub fn offset_point(&self) -> Point {
        Point(self.offset)
    }
}

impl PartialEq for Lattice {
    /// Approximate structural equality: parameters, orientation, and
    /// offset agree within the rounding precision of the derived
    /// quantities.
    fn eq(&self, other: &Self) -> bool {
        let params = approx_eq!(f64, self.a, other.a, epsilon = EQ_EPSILON)
            && approx_eq!(f64, self.b, other.b, epsilon = EQ_EPSILON)
            && approx_eq!(f64, self.c, other.c, epsilon = EQ_EPSILON)
            && approx_eq!(f64, self.alpha, other.alpha, epsilon = EQ_EPSILON)
            && approx_eq!(f64, self.beta, other.beta, epsilon = EQ_EPSILON)
            && approx_eq!(f64, self.gamma, other.gamma, epsilon = EQ_EPSILON);

        let frames = self
            .orientation_matrix
            .iter()
            .zip(other.orientation_matrix.iter())
            .all(|(own, their)| approx_eq!(f64, *own, *their, epsilon = EQ_EPSILON))
            && self
                .offset
                .iter()
                .zip(other.offset.iter())
                .all(|(own, their)| approx_eq!(f64, *own, *their, epsilon = EQ_EPSILON));

        params && frames
    }
}

/// Check that a lattice length is positive and finite.
fn validate_length(name: &'static str, value: f64) -> Result<(), LatticeError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(LatticeError::InvalidLength { name, value });
    }
    Ok(())
}

/// Check that a lattice angle lies inside (0°, 180°).
fn validate_angle(name: &'static str, value: f64) -> Result<(), LatticeError> {
    if !value.is_finite() || value <= 0.0 || value >= 180.0 {
        return Err(LatticeError::InvalidAngle { name, value });
    }
    Ok(())
}

/// Angle between two raw vectors in degrees.
fn vector_angle_degrees(u: &Vector3<f64>, v: &Vector3<f64>) -> f64 {
    (u.dot(v) / (u.norm() * v.norm()))
        .clamp(-1.0, 1.0)
        .acos()
        .to_degrees()
}

/******************************/
/*         UNIT TESTS         */
/******************************/

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::transforms::rotation_matrix;
    use float_cmp::assert_approx_eq;

    fn assert_matrix_eq(m1: &Matrix3<f64>, m2: &Matrix3<f64>, epsilon: f64) {
        for i in 0..3 {
            for j in 0..3 {
                assert_approx_eq!(f64, m1[(i, j)], m2[(i, j)], epsilon = epsilon);
            }
        }
    }

    #[test]
    fn orthorhombic_scenario() {
        let lattice = Lattice::orthorhombic(2.46, 4.26, 10.0).unwrap();

        // cosines of right angles vanish exactly after rounding
        assert_eq!(lattice.cos_alpha(), 0.0);
        assert_eq!(lattice.cos_beta(), 0.0);
        assert_eq!(lattice.cos_gamma(), 0.0);
        assert_eq!(lattice.sin_gamma(), 1.0);

        // the volume is exactly the product of the lengths
        assert_eq!(lattice.cell_volume(), 2.46 * 4.26 * 10.0);

        // the ortho matrix is diagonal
        let expected = Matrix3::new(2.46, 0.0, 0.0, 0.0, 4.26, 0.0, 0.0, 0.0, 10.0);
        assert_eq!(lattice.ortho_matrix(), expected);
    }

    #[test]
    fn hexagonal_metrics() {
        let lattice = Lattice::hexagonal(2.46, 10.0).unwrap();

        assert_eq!(lattice.cos_gamma(), -0.5);
        assert_eq!(lattice.cos_gamma_star(), 0.5);
        assert_approx_eq!(f64, lattice.sin_gamma(), 0.866025);
        assert_approx_eq!(f64, lattice.sin_gamma_star(), 0.8660254038, epsilon = 1e-9);

        // direct lattice vectors have the right lengths and angle
        let a1 = lattice.a1();
        let a2 = lattice.a2();
        assert_approx_eq!(f64, a1.norm(), 2.46, epsilon = 1e-5);
        assert_approx_eq!(f64, a2.norm(), 2.46, epsilon = 1e-5);
        assert_approx_eq!(
            f64,
            a1.angle(&a2).unwrap().to_degrees(),
            120.0,
            epsilon = 1e-4
        );

        // volume = a² c sin(120°)
        assert_approx_eq!(
            f64,
            lattice.cell_volume(),
            2.46 * 2.46 * 10.0 * 0.8660254038,
            epsilon = 1e-4
        );
    }

    #[test]
    fn validation_rejects_bad_lengths() {
        assert_eq!(
            Lattice::new(0.0, 1.0, 1.0, 90.0, 90.0, 90.0),
            Err(LatticeError::InvalidLength {
                name: "a",
                value: 0.0
            })
        );
        assert!(Lattice::new(1.0, -2.0, 1.0, 90.0, 90.0, 90.0).is_err());
        assert!(Lattice::new(1.0, 1.0, f64::NAN, 90.0, 90.0, 90.0).is_err());
        assert!(Lattice::new(1.0, 1.0, f64::INFINITY, 90.0, 90.0, 90.0).is_err());
    }

    #[test]
    fn validation_rejects_bad_angles() {
        assert_eq!(
            Lattice::new(1.0, 1.0, 1.0, 0.0, 90.0, 90.0),
            Err(LatticeError::InvalidAngle {
                name: "alpha",
                value: 0.0
            })
        );
        assert!(Lattice::new(1.0, 1.0, 1.0, 90.0, 180.0, 90.0).is_err());
        assert!(Lattice::new(1.0, 1.0, 1.0, 90.0, 90.0, 200.0).is_err());
        assert!(Lattice::new(1.0, 1.0, 1.0, 90.0, f64::NAN, 90.0).is_err());
    }

    #[test]
    fn validation_rejects_degenerate_cell() {
        // α + β < γ cannot close a parallelepiped of positive volume
        assert!(matches!(
            Lattice::new(1.0, 1.0, 1.0, 10.0, 10.0, 30.0),
            Err(LatticeError::DegenerateCell(_))
        ));
    }

    #[test]
    fn round_trip_orthorhombic() {
        let lattice = Lattice::orthorhombic(2.46, 4.26, 10.0).unwrap();

        let fractional = Point::new(0.25, 0.5, 0.75);
        let cartesian = lattice.fractional_to_cartesian(&fractional);

        assert_approx_eq!(f64, cartesian.x, 0.615, epsilon = 1e-10);
        assert_approx_eq!(f64, cartesian.y, 2.13, epsilon = 1e-10);
        assert_approx_eq!(f64, cartesian.z, 7.5, epsilon = 1e-10);

        let back = lattice.cartesian_to_fractional(&cartesian);
        assert_approx_eq!(f64, back.x, fractional.x, epsilon = 1e-8);
        assert_approx_eq!(f64, back.y, fractional.y, epsilon = 1e-8);
        assert_approx_eq!(f64, back.z, fractional.z, epsilon = 1e-8);
    }

    #[test]
    fn round_trip_triclinic_rotated_offset() {
        let mut lattice = Lattice::new(5.297, 4.863, 2.976, 120.0, 70.0, 80.0).unwrap();

        let rotation =
            rotation_matrix(0.83, &Vector3::new(1.0, -0.4, 0.2)).unwrap();
        lattice.rotate(&rotation);
        lattice.translate(&Vector::new(1.5, -2.0, 0.7));

        for point in [
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.3, 0.8, -0.2),
            Point::new(-1.7, 2.4, 11.0),
        ] {
            let cartesian = lattice.fractional_to_cartesian(&point);
            let back = lattice.cartesian_to_fractional(&cartesian);

            assert_approx_eq!(f64, back.x, point.x, epsilon = 1e-8);
            assert_approx_eq!(f64, back.y, point.y, epsilon = 1e-8);
            assert_approx_eq!(f64, back.z, point.z, epsilon = 1e-8);
        }
    }

    #[test]
    fn from_matrix_round_trip() {
        let lattice = Lattice::hexagonal(2.46, 10.0).unwrap();
        let matrix = lattice.matrix();

        let rebuilt = Lattice::from_matrix(matrix).unwrap();

        assert_approx_eq!(f64, rebuilt.a(), 2.46, epsilon = 1e-4);
        assert_approx_eq!(f64, rebuilt.b(), 2.46, epsilon = 1e-4);
        assert_approx_eq!(f64, rebuilt.gamma(), 120.0, epsilon = 1e-4);

        // the reconstructed world-frame cell matrix matches the input
        assert_matrix_eq(&rebuilt.matrix(), &matrix, 1e-9);
    }

    #[test]
    fn from_vectors_recovers_parameters() {
        let a1 = Vector::new(2.0, 0.0, 0.0);
        let a2 = Vector::new(0.0, 3.0, 0.0);
        let a3 = Vector::new(0.0, 0.0, 4.0);

        let lattice = Lattice::from_vectors(&a1, &a2, &a3).unwrap();

        assert_approx_eq!(f64, lattice.a(), 2.0, epsilon = 1e-10);
        assert_approx_eq!(f64, lattice.b(), 3.0, epsilon = 1e-10);
        assert_approx_eq!(f64, lattice.c(), 4.0, epsilon = 1e-10);
        assert_approx_eq!(f64, lattice.alpha(), 90.0, epsilon = 1e-10);
        assert_eq!(lattice, Lattice::orthorhombic(2.0, 3.0, 4.0).unwrap());
    }

    #[test]
    fn from_matrix_rejects_singular() {
        // coplanar lattice vectors
        let matrix = Matrix3::new(1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0);
        assert!(Lattice::from_matrix(matrix).is_err());

        // a null lattice vector
        let matrix = Matrix3::new(1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.0);
        assert!(matches!(
            Lattice::from_matrix(matrix),
            Err(LatticeError::InvalidLength { name: "b", .. })
        ));
    }

    #[test]
    fn reciprocal_vectors_are_dual() {
        let lattice = Lattice::new(5.297, 4.863, 2.976, 120.0, 70.0, 80.0).unwrap();

        let direct = [lattice.a1(), lattice.a2(), lattice.a3()];
        let reciprocal = [lattice.b1(), lattice.b2(), lattice.b3()];

        for (i, a) in direct.iter().enumerate() {
            for (j, b) in reciprocal.iter().enumerate() {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_approx_eq!(f64, a.dot(b), expected, epsilon = 1e-4);
            }
        }
    }

    #[test]
    fn rotation_composes() {
        let mut lattice = Lattice::orthorhombic(2.0, 3.0, 4.0).unwrap();

        let r1 = rotation_matrix(0.5, &Vector3::z()).unwrap();
        let r2 = rotation_matrix(-1.2, &Vector3::x()).unwrap();

        lattice.rotate(&r1);
        let after_first = lattice.orientation_matrix();
        assert_matrix_eq(&after_first, &r1, 1e-12);

        // the second rotation composes with the first instead of replacing it
        lattice.rotate(&r2);
        assert_matrix_eq(&lattice.orientation_matrix(), &(r2 * r1), 1e-12);
    }

    #[test]
    fn rotation_about_offset_keeps_offset() {
        let mut lattice = Lattice::orthorhombic(2.0, 3.0, 4.0).unwrap();
        lattice.translate(&Vector::new(1.0, 1.0, 1.0));

        let rotation = rotation_matrix(1.0, &Vector3::z()).unwrap();
        let anchor = lattice.offset_point();
        lattice.rotate_about(&rotation, &anchor);

        assert_approx_eq!(f64, lattice.offset().x, 1.0, epsilon = 1e-12);
        assert_approx_eq!(f64, lattice.offset().y, 1.0, epsilon = 1e-12);
        assert_approx_eq!(f64, lattice.offset().z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn translation_accumulates() {
        let mut lattice = Lattice::cubic(1.0).unwrap();
        lattice.translate(&Vector::new(1.0, 0.0, 0.0));
        lattice.translate(&Vector::new(0.0, 2.0, 0.0));

        assert_approx_eq!(f64, lattice.offset().x, 1.0);
        assert_approx_eq!(f64, lattice.offset().y, 2.0);

        let origin = lattice.fractional_to_cartesian(&Point::origin());
        assert_eq!(origin, Point::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn wrap_fractional() {
        let lattice = Lattice::cubic(1.0).unwrap();

        let wrapped = lattice.wrap_fractional(&Point::new(1.25, -0.25, 0.5), Dimension::XY);
        assert_approx_eq!(f64, wrapped.x, 0.25, epsilon = 1e-12);
        assert_approx_eq!(f64, wrapped.y, 0.75, epsilon = 1e-12);
        assert_approx_eq!(f64, wrapped.z, 0.5, epsilon = 1e-12);

        // z is wrapped only when selected
        let wrapped = lattice.wrap_fractional(&Point::new(0.0, 0.0, -1.5), Dimension::XY);
        assert_approx_eq!(f64, wrapped.z, -1.5);
        let wrapped = lattice.wrap_fractional(&Point::new(0.0, 0.0, -1.5), Dimension::XYZ);
        assert_approx_eq!(f64, wrapped.z, 0.5);

        // exact 1.0 wraps to exact 0.0
        let wrapped = lattice.wrap_fractional(&Point::new(1.0, 0.0, 0.0), Dimension::XYZ);
        assert_eq!(wrapped.x, 0.0);

        // a coordinate infinitesimally below zero lands at the origin,
        // never at 1.0
        let wrapped = lattice.wrap_fractional(&Point::new(-1.0e-17, 0.0, 0.0), Dimension::XYZ);
        assert_eq!(wrapped.x, 0.0);
    }

    #[test]
    fn structural_equality() {
        let lattice1 = Lattice::hexagonal(2.46, 10.0).unwrap();
        let lattice2 = Lattice::new(2.46, 2.46, 10.0, 90.0, 90.0, 120.0).unwrap();
        assert_eq!(lattice1, lattice2);

        let different = Lattice::hexagonal(2.47, 10.0).unwrap();
        assert_ne!(lattice1, different);

        let mut rotated = lattice1.clone();
        rotated.rotate(&rotation_matrix(0.3, &Vector3::z()).unwrap());
        assert_ne!(lattice1, rotated);
    }
}
