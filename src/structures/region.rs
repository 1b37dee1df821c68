// Released under MIT License.
// Copyright (c) 2025 Ladislav Bartos

//! Implementation of geometric regions used for clipping atoms.

use crate::math::point::Point;
use crate::structures::dimension::Dimension;

/// Any structure implementing this trait can be used for clipping an
/// atom container ([`crate::structures::atoms::Atoms::clip_to_region`]).
///
/// Regions are absolute: no periodic images are considered.
pub trait Region {
    /// Returns `true` if target point is inside the region. Else returns `false`.
    fn contains(&self, point: &Point) -> bool;
}

/// Axis-aligned rectangular bounding region.
#[derive(Debug, Clone)]
pub struct Rectangular {
    /// Coordinates of the box origin (minimal corner).
    origin: Point,
    /// Length of the box side along the x-axis.
    x: f64,
    /// Length of the box side along the y-axis.
    y: f64,
    /// Length of the box side along the z-axis.
    z: f64,
}

impl Rectangular {
    /// Construct a new Rectangular region.
    ///
    /// ## Arguments
    /// - `origin` - Coordinates of the minimal corner of the box.
    /// - `x` - Length of the box side along the x-axis.
    /// - `y` - Length of the box side along the y-axis.
    /// - `z` - Length of the box side along the z-axis.
    ///
    /// ## Example
    /// ```
    /// # use nanoxtal_rs::prelude::*;
    /// #
    /// // rectangular region spanning [−1, 1] × [0, 2] × [0, 10]
    /// let rect = Rectangular::new(Point::new(-1.0, 0.0, 0.0), 2.0, 2.0, 10.0);
    ///
    /// assert!(rect.contains(&Point::new(0.0, 1.0, 5.0)));
    /// assert!(!rect.contains(&Point::new(0.0, 3.0, 5.0)));
    /// ```
    pub fn new(origin: Point, x: f64, y: f64, z: f64) -> Self {
        Rectangular { origin, x, y, z }
    }

    /// Get the origin (minimal corner) of the box.
    pub fn get_origin(&self) -> &Point {
        &self.origin
    }

    /// Get the length of the box side along the x-axis.
    pub fn get_x(&self) -> f64 {
        self.x
    }

    /// Get the length of the box side along the y-axis.
    pub fn get_y(&self) -> f64 {
        self.y
    }

    /// Get the length of the box side along the z-axis.
    pub fn get_z(&self) -> f64 {
        self.z
    }
}

impl Region for Rectangular {
    /// Check if point is inside the rectangular region.
    fn contains(&self, point: &Point) -> bool {
        let d = *point - self.origin;

        (0.0..=self.x).contains(&d.x) && (0.0..=self.y).contains(&d.y) && (0.0..=self.z).contains(&d.z)
    }
}

/// Spherical region.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Coordinates of the center of the sphere.
    center: Point,
    /// Radius of the sphere.
    radius: f64,
}

impl Sphere {
    /// Construct a new Sphere.
    ///
    /// ## Arguments
    /// - `center` - Coordinates of the center of the sphere.
    /// - `radius` - Radius of the sphere.
    pub fn new(center: Point, radius: f64) -> Self {
        Sphere { center, radius }
    }

    /// Get the center of the sphere.
    pub fn get_center(&self) -> &Point {
        &self.center
    }

    /// Get the radius of the sphere.
    pub fn get_radius(&self) -> f64 {
        self.radius
    }
}

impl Region for Sphere {
    /// Check if point is inside the sphere.
    fn contains(&self, point: &Point) -> bool {
        (*point - self.center).norm() <= self.radius
    }
}

/// Cylindrical region oriented along one of the coordinate axes.
///
/// Nanotube generators clip their structures with cylinders.
#[derive(Debug, Clone)]
pub struct Cylinder {
    /// Coordinates of the center of the cylinder base.
    base: Point,
    /// Radius of the cylinder.
    radius: f64,
    /// Height of the cylinder along its main axis.
    height: f64,
    /// Orientation of the cylinder in space.
    orientation: Dimension,
}

impl Cylinder {
    /// Construct a new Cylinder.
    ///
    /// ## Arguments
    /// - `base` - Coordinates of the center of the cylinder's base.
    /// - `radius` - Radius of the cylinder.
    /// - `height` - Height of the cylinder along its main axis.
    /// - `orientation` - Orientation of the cylinder in space. Only X, Y, and Z are supported.
    ///
    /// ## Panics
    /// Panics if `orientation` is not `Dimension::X`, `Dimension::Y`, nor `Dimension::Z`.
    pub fn new(base: Point, radius: f64, height: f64, orientation: Dimension) -> Self {
        match orientation {
            Dimension::X | Dimension::Y | Dimension::Z => Cylinder {
                base,
                radius,
                height,
                orientation,
            },
            d => panic!(
                "FATAL NANOXTAL ERROR | Cylinder::new | Unsupported orientation dimension '{}'.",
                d
            ),
        }
    }

    /// Get the center of the cylinder's base.
    pub fn get_base(&self) -> &Point {
        &self.base
    }

    /// Get the radius of the cylinder.
    pub fn get_radius(&self) -> f64 {
        self.radius
    }

    /// Get the height of the cylinder.
    pub fn get_height(&self) -> f64 {
        self.height
    }

    /// Get the orientation of the cylinder.
    pub fn get_orientation(&self) -> Dimension {
        self.orientation
    }
}

impl Region for Cylinder {
    /// Check if point is inside the cylinder.
    fn contains(&self, point: &Point) -> bool {
        let d = *point - self.base;

        let (axial, radial) = match self.orientation {
            Dimension::X => (d.x, (d.y * d.y + d.z * d.z).sqrt()),
            Dimension::Y => (d.y, (d.x * d.x + d.z * d.z).sqrt()),
            Dimension::Z => (d.z, (d.x * d.x + d.y * d.y).sqrt()),
            // unreachable: the constructor rejects other orientations
            d => panic!(
                "FATAL NANOXTAL ERROR | Cylinder::contains | Orientation dimension '{}' should never occur in a cylinder.",
                d
            ),
        };

        (0.0..=self.height).contains(&axial) && radial <= self.radius
    }
}

/******************************/
/*         UNIT TESTS         */
/******************************/
